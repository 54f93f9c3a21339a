// Action identifiers and the keyboard shortcut table.
// Toolbar buttons, tab strip, title bar, shortcuts and menu items all name
// actions by these ids; `Shell::dispatch` is the single place they run.

use serde::Serialize;

use crate::error::{Result, ShellError};
use crate::modules::menu::{StubFeature, CUSTOM_COLOR_ITEM_ID};
use crate::modules::tabs::TabId;
use crate::modules::theme::Preset;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    NewTab,
    CloseTab(TabId),
    SelectTab(TabId),
    Back,
    Forward,
    Reload,
    Home,
    Navigate(String),
    FocusAddressBar,
    ApplyPreset(Preset),
    ApplyCustomColor(String),
    PickCustomColor,
    Stub(StubFeature),
    Minimize,
    ToggleMaximize,
    CloseWindow,
}

impl Action {
    /// Resolves an action id plus its optional argument.
    pub fn parse(id: &str, arg: Option<&str>) -> Result<Self> {
        let required = || arg.ok_or_else(|| ShellError::MissingArgument(id.to_string()));

        let action = match id {
            "new_tab" => Action::NewTab,
            "close_tab" => Action::CloseTab(required()?.parse()?),
            "select_tab" => Action::SelectTab(required()?.parse()?),
            "back" => Action::Back,
            "forward" => Action::Forward,
            "reload" => Action::Reload,
            "home" => Action::Home,
            "navigate" => Action::Navigate(required()?.to_string()),
            "focus_address_bar" => Action::FocusAddressBar,
            "custom_color" => Action::ApplyCustomColor(required()?.to_string()),
            "minimize" => Action::Minimize,
            "toggle_maximize" => Action::ToggleMaximize,
            "close_window" => Action::CloseWindow,
            CUSTOM_COLOR_ITEM_ID => Action::PickCustomColor,
            _ => {
                if let Some(name) = id.strip_prefix("theme:") {
                    Action::ApplyPreset(Preset::from_name(name)?)
                } else if let Some(feature) = StubFeature::ALL.into_iter().find(|f| f.id() == id) {
                    Action::Stub(feature)
                } else {
                    return Err(ShellError::UnknownAction(id.to_string()));
                }
            }
        };
        Ok(action)
    }
}

/// One keyboard binding, in Tauri accelerator syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub accelerator: &'static str,
    pub action: &'static str,
}

pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut { accelerator: "CmdOrCtrl+T", action: "new_tab" },
    Shortcut { accelerator: "CmdOrCtrl+W", action: "close_window" },
    Shortcut { accelerator: "CmdOrCtrl+Left", action: "back" },
    Shortcut { accelerator: "CmdOrCtrl+Right", action: "forward" },
    Shortcut { accelerator: "CmdOrCtrl+R", action: "reload" },
    Shortcut { accelerator: "CmdOrCtrl+L", action: "focus_address_bar" },
];
