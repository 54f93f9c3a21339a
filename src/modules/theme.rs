//! Window themes.
//!
//! A [`Theme`] is a value: either a named [`Preset`] or an arbitrary
//! [`Color`]. It renders to one [`StyleSheet`] covering every chrome
//! element, and [`ThemeEngine::apply`] installs that sheet in a single call.

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::Serialize;

use crate::error::{Result, ShellError};

/// Color in RGB format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub const WHITE: Color = Color::gray(0xff);
    pub const BLACK: Color = Color::gray(0x00);

    /// Relative luminance in 0.0..=1.0 (sRGB, WCAG formula).
    pub fn luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    pub fn is_light(self) -> bool {
        self.luminance() > 0.5
    }
}

impl FromStr for Color {
    type Err = ShellError;

    /// Accepts `#rgb` or `#rrggbb`, with or without the `#`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ShellError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Color::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Ok(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named presets offered in the settings menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Light,
    Dark,
    White,
    Lavender,
    Normal,
    Midnight,
    SkyBlue,
    Black,
    Blue,
    DarkBlue,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Light,
        Preset::Dark,
        Preset::White,
        Preset::Lavender,
        Preset::Normal,
        Preset::Midnight,
        Preset::SkyBlue,
        Preset::Black,
        Preset::Blue,
        Preset::DarkBlue,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Preset::Light => "Light",
            Preset::Dark => "Dark",
            Preset::White => "White",
            Preset::Lavender => "Lavender",
            Preset::Normal => "Normal",
            Preset::Midnight => "Midnight",
            Preset::SkyBlue => "Sky Blue",
            Preset::Black => "Black",
            Preset::Blue => "Blue",
            Preset::DarkBlue => "Dark Blue",
        }
    }

    /// Identifier used in action and menu ids, e.g. `sky-blue`.
    pub fn slug(self) -> String {
        self.display_name().to_ascii_lowercase().replace(' ', "-")
    }

    /// Case-insensitive lookup; spaces, dashes and underscores are ignored.
    pub fn from_name(name: &str) -> Result<Self> {
        let key = fold_name(name);
        Preset::ALL
            .into_iter()
            .find(|p| fold_name(p.display_name()) == key)
            .ok_or_else(|| ShellError::UnknownPreset(name.to_string()))
    }

    /// Accent color for the custom-color presets; `None` for Light, which
    /// has its own palette.
    pub fn accent(self) -> Option<Color> {
        match self {
            Preset::Light => None,
            Preset::Dark => Some(Color::gray(0x33)),
            Preset::White => Some(Color::WHITE),
            Preset::Lavender => Some(Color::rgb(0xe6, 0xe6, 0xfa)),
            Preset::Normal => Some(Color::gray(0x3c)),
            Preset::Midnight => Some(Color::rgb(0x25, 0x26, 0x35)),
            Preset::SkyBlue => Some(Color::rgb(0x87, 0xce, 0xeb)),
            Preset::Black => Some(Color::BLACK),
            Preset::Blue => Some(Color::rgb(0x00, 0x00, 0xff)),
            Preset::DarkBlue => Some(Color::rgb(0x00, 0x00, 0x8b)),
        }
    }
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The theme descriptor selected by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Preset(Preset),
    Custom(Color),
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Preset(Preset::Light)
    }
}

impl Theme {
    pub fn name(&self) -> String {
        match self {
            Theme::Preset(p) => p.display_name().to_string(),
            Theme::Custom(c) => c.to_string(),
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Preset(p) => match p.accent() {
                Some(accent) => Palette::accented(accent),
                None => Palette::light(),
            },
            Theme::Custom(c) => Palette::accented(*c),
        }
    }

    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet {
            theme: self.name(),
            css: self.palette().to_css(),
        }
    }
}

/// Every color the chrome uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub window_background: Color,
    pub foreground: Color,
    pub toolbar_background: Color,
    pub address_background: Color,
    pub address_foreground: Color,
    pub border: Color,
    pub tab_background: Color,
    pub tab_foreground: Color,
    pub tab_selected_background: Color,
    pub title_bar_background: Color,
    pub label_foreground: Color,
    pub button_background: Color,
    pub button_foreground: Color,
    pub button_hover_background: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            window_background: Color::gray(0xf0),
            foreground: Color::BLACK,
            toolbar_background: Color::gray(0xe0),
            address_background: Color::WHITE,
            address_foreground: Color::BLACK,
            border: Color::gray(0xcc),
            tab_background: Color::gray(0xf0),
            tab_foreground: Color::BLACK,
            tab_selected_background: Color::gray(0xd0),
            title_bar_background: Color::gray(0xf0),
            label_foreground: Color::BLACK,
            button_background: Color::gray(0xf0),
            button_foreground: Color::BLACK,
            button_hover_background: Color::gray(0xe0),
        }
    }

    /// Palette built around one accent color. Dark accents get white text
    /// on gray fields; light accents get black text on light fields.
    pub fn accented(accent: Color) -> Self {
        if accent.is_light() {
            Self {
                window_background: accent,
                foreground: Color::BLACK,
                toolbar_background: accent,
                address_background: Color::WHITE,
                address_foreground: Color::BLACK,
                border: Color::gray(0xcc),
                tab_background: Color::gray(0xf0),
                tab_foreground: Color::BLACK,
                tab_selected_background: Color::gray(0xd0),
                title_bar_background: accent,
                label_foreground: Color::BLACK,
                button_background: accent,
                button_foreground: Color::BLACK,
                button_hover_background: Color::gray(0xe0),
            }
        } else {
            Self {
                window_background: accent,
                foreground: Color::WHITE,
                toolbar_background: accent,
                address_background: Color::gray(0x55),
                address_foreground: Color::WHITE,
                border: Color::gray(0x44),
                tab_background: Color::gray(0x3c),
                tab_foreground: Color::WHITE,
                tab_selected_background: Color::gray(0x55),
                title_bar_background: accent,
                label_foreground: Color::WHITE,
                button_background: accent,
                button_foreground: Color::WHITE,
                button_hover_background: Color::gray(0x55),
            }
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            r#"body {{
    background-color: {window_bg};
    color: {fg};
}}
#toolbar {{
    background-color: {toolbar_bg};
    border: none;
}}
#address-bar {{
    background-color: {address_bg};
    color: {address_fg};
    border: 1px solid {border};
}}
#tab-strip {{
    border-bottom: 1px solid {border};
}}
.tab {{
    background: {tab_bg};
    color: {tab_fg};
}}
.tab.selected {{
    background: {tab_selected_bg};
}}
#title-bar {{
    background-color: {title_bg};
}}
label, .label {{
    color: {label_fg};
}}
button {{
    background-color: {button_bg};
    color: {button_fg};
    border: none;
}}
button:hover {{
    background-color: {button_hover_bg};
}}
"#,
            window_bg = self.window_background,
            fg = self.foreground,
            toolbar_bg = self.toolbar_background,
            address_bg = self.address_background,
            address_fg = self.address_foreground,
            border = self.border,
            tab_bg = self.tab_background,
            tab_fg = self.tab_foreground,
            tab_selected_bg = self.tab_selected_background,
            title_bg = self.title_bar_background,
            label_fg = self.label_foreground,
            button_bg = self.button_background,
            button_fg = self.button_foreground,
            button_hover_bg = self.button_hover_background,
        )
    }
}

/// A complete style description for the window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleSheet {
    pub theme: String,
    pub css: String,
}

/// Where style sheets get installed. One call replaces the whole style.
pub trait StyleTarget {
    fn install(&self, sheet: &StyleSheet) -> Result<()>;
}

pub struct ThemeEngine<S: StyleTarget> {
    target: S,
    current: Theme,
    sheet: StyleSheet,
}

impl<S: StyleTarget> ThemeEngine<S> {
    /// Builds the engine and installs `initial`.
    pub fn new(target: S, initial: Theme) -> Result<Self> {
        let sheet = initial.style_sheet();
        target.install(&sheet)?;
        Ok(Self {
            target,
            current: initial,
            sheet,
        })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn apply(&mut self, theme: Theme) -> Result<()> {
        let sheet = theme.style_sheet();
        self.target.install(&sheet)?;
        info!("[Theme] Applied '{}'", sheet.theme);
        self.current = theme;
        self.sheet = sheet;
        Ok(())
    }

    pub fn apply_named_preset(&mut self, name: &str) -> Result<()> {
        self.apply(Theme::Preset(Preset::from_name(name)?))
    }

    pub fn apply_custom_color(&mut self, color: &str) -> Result<()> {
        self.apply(Theme::Custom(color.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingStyle;
    use rstest::rstest;

    #[rstest]
    #[case("#fff", Color::WHITE)]
    #[case("#E6E6FA", Color::rgb(0xe6, 0xe6, 0xfa))]
    #[case("252635", Color::rgb(0x25, 0x26, 0x35))]
    #[case(" #333 ", Color::gray(0x33))]
    fn test_color_parsing(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("#ff")]
    #[case("#gggggg")]
    #[case("#12345")]
    #[case("red")]
    #[case("#ééé")]
    fn test_invalid_colors(#[case] input: &str) {
        assert!(matches!(input.parse::<Color>(), Err(ShellError::InvalidColor(_))));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0x87, 0xce, 0xeb).to_string(), "#87ceeb");
    }

    #[rstest]
    #[case("Light", Preset::Light)]
    #[case("sky blue", Preset::SkyBlue)]
    #[case("sky-blue", Preset::SkyBlue)]
    #[case("DARK_BLUE", Preset::DarkBlue)]
    #[case("lavender", Preset::Lavender)]
    fn test_preset_lookup(#[case] name: &str, #[case] expected: Preset) {
        assert_eq!(Preset::from_name(name).unwrap(), expected);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(Preset::from_name("neon"), Err(ShellError::UnknownPreset(_))));
    }

    #[test]
    fn test_slugs_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(&preset.slug()).unwrap(), preset);
        }
    }

    #[test]
    fn test_dark_accent_palette() {
        let palette = Theme::Preset(Preset::Normal).palette();
        assert_eq!(palette.window_background, Color::gray(0x3c));
        assert_eq!(palette.foreground, Color::WHITE);
        assert_eq!(palette.tab_selected_background, Color::gray(0x55));
        assert_eq!(palette.button_hover_background, Color::gray(0x55));
    }

    #[test]
    fn test_light_accent_gets_dark_text() {
        let palette = Theme::Preset(Preset::Lavender).palette();
        assert_eq!(palette.window_background, Color::rgb(0xe6, 0xe6, 0xfa));
        assert_eq!(palette.foreground, Color::BLACK);
        assert_eq!(palette.button_foreground, Color::BLACK);
    }

    #[test]
    fn test_css_covers_every_element() {
        let css = Theme::Custom(Color::rgb(0x25, 0x26, 0x35)).style_sheet().css;
        for selector in [
            "body {",
            "#toolbar {",
            "#address-bar {",
            ".tab {",
            ".tab.selected {",
            "#title-bar {",
            "label, .label {",
            "button {",
            "button:hover {",
        ] {
            assert!(css.contains(selector), "missing {selector}");
        }
        assert!(css.contains("background-color: #252635;"));
    }

    #[test]
    fn test_engine_installs_initial_theme() {
        let style = RecordingStyle::default();
        let engine = ThemeEngine::new(style.clone(), Theme::default()).unwrap();
        assert_eq!(engine.current(), Theme::Preset(Preset::Light));
        assert_eq!(style.installed().len(), 1);
        assert_eq!(style.installed()[0].theme, "Light");
    }

    #[test]
    fn test_preset_application_is_idempotent() {
        let style = RecordingStyle::default();
        let mut engine = ThemeEngine::new(style.clone(), Theme::default()).unwrap();
        engine.apply_named_preset("Dark Blue").unwrap();
        let once = engine.sheet().clone();
        engine.apply_named_preset("Dark Blue").unwrap();

        assert_eq!(engine.sheet(), &once);
        let installed = style.installed();
        assert_eq!(installed[installed.len() - 1], installed[installed.len() - 2]);
    }

    #[test]
    fn test_last_write_wins() {
        let style = RecordingStyle::default();
        let mut engine = ThemeEngine::new(style.clone(), Theme::default()).unwrap();
        engine.apply_named_preset("Black").unwrap();
        engine.apply_custom_color("#87ceeb").unwrap();

        let expected = Theme::Custom(Color::rgb(0x87, 0xce, 0xeb)).style_sheet();
        assert_eq!(engine.sheet(), &expected);
        assert_eq!(style.installed().last(), Some(&expected));
    }

    #[test]
    fn test_failed_lookup_keeps_current_theme() {
        let style = RecordingStyle::default();
        let mut engine = ThemeEngine::new(style.clone(), Theme::Preset(Preset::Dark)).unwrap();
        assert!(engine.apply_custom_color("nope").is_err());
        assert!(engine.apply_named_preset("nope").is_err());
        assert_eq!(engine.current(), Theme::Preset(Preset::Dark));
        assert_eq!(style.installed().len(), 1);
    }
}
