use serde::Serialize;

use crate::modules::actions::{Shortcut, SHORTCUTS};
use crate::modules::theme::{Preset, Theme};

/// Compiled-in shell configuration. Nothing here is read from disk, the
/// environment or the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub homepage: String,
    pub window_title: String,
    pub new_tab_label: String,
    pub show_title_bar: bool,
    pub show_settings_menu: bool,
    pub initial_theme: Theme,
    pub title_bar_height: f64,
    pub toolbar_height: f64,
    pub tab_strip_height: f64,
    pub window_icon: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homepage: "http://localhost:3000/cwanda.html".to_string(),
            window_title: "Cwanda".to_string(),
            new_tab_label: "New Tab".to_string(),
            show_title_bar: true,
            show_settings_menu: true,
            initial_theme: Theme::Preset(Preset::Light),
            title_bar_height: 30.0,
            toolbar_height: 30.0,
            tab_strip_height: 30.0,
            window_icon: "icons/window.svg".to_string(),
        }
    }
}

impl Settings {
    /// Logical height of everything drawn above the content views.
    pub fn chrome_height(&self) -> f64 {
        let title_bar = if self.show_title_bar {
            self.title_bar_height
        } else {
            0.0
        };
        title_bar + self.toolbar_height + self.tab_strip_height
    }

    pub fn shell_config(&self) -> ShellConfig {
        ShellConfig {
            homepage: self.homepage.clone(),
            window_title: self.window_title.clone(),
            window_icon: self.window_icon.clone(),
            show_title_bar: self.show_title_bar,
            show_settings_menu: self.show_settings_menu,
            title_bar_height: self.title_bar_height,
            toolbar_height: self.toolbar_height,
            tab_strip_height: self.tab_strip_height,
            shortcuts: SHORTCUTS.to_vec(),
            presets: Preset::ALL
                .into_iter()
                .map(|p| PresetInfo {
                    slug: p.slug(),
                    name: p.display_name(),
                })
                .collect(),
        }
    }
}

/// What the chrome UI reads once at startup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    pub homepage: String,
    pub window_title: String,
    pub window_icon: String,
    pub show_title_bar: bool,
    pub show_settings_menu: bool,
    pub title_bar_height: f64,
    pub toolbar_height: f64,
    pub tab_strip_height: f64,
    pub shortcuts: Vec<Shortcut>,
    pub presets: Vec<PresetInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub slug: String,
    pub name: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.homepage, "http://localhost:3000/cwanda.html");
        assert_eq!(settings.initial_theme, Theme::Preset(Preset::Light));
        assert_eq!(settings.chrome_height(), 90.0);
    }

    #[test]
    fn test_chrome_height_without_title_bar() {
        let settings = Settings {
            show_title_bar: false,
            ..Settings::default()
        };
        assert_eq!(settings.chrome_height(), 60.0);
    }

    #[test]
    fn test_shell_config_serializes_camel_case() {
        let json = serde_json::to_value(Settings::default().shell_config()).unwrap();
        assert_eq!(json["showTitleBar"], true);
        assert_eq!(json["shortcuts"][0]["accelerator"], "CmdOrCtrl+T");
        assert_eq!(json["presets"][6]["slug"], "sky-blue");
    }
}
