// Settings menu layout - pure data, turned into a native popup by the host.
// Every item id is an action id, so a selection goes straight to dispatch.

use log::info;

use crate::modules::theme::Preset;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuNode {
    Item { id: String, label: String },
    Submenu { label: String, items: Vec<MenuNode> },
    Separator,
}

impl MenuNode {
    fn item(id: impl Into<String>, label: impl Into<String>) -> Self {
        MenuNode::Item {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Entries that exist in the menu but have no backing view yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StubFeature {
    History,
    Bookmarks,
    Incognito,
    Help,
}

impl StubFeature {
    pub const ALL: [StubFeature; 4] = [
        StubFeature::History,
        StubFeature::Bookmarks,
        StubFeature::Incognito,
        StubFeature::Help,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StubFeature::History => "history",
            StubFeature::Bookmarks => "bookmarks",
            StubFeature::Incognito => "incognito",
            StubFeature::Help => "help",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StubFeature::History => "History",
            StubFeature::Bookmarks => "Bookmarks",
            StubFeature::Incognito => "Incognito",
            StubFeature::Help => "Help",
        }
    }

    pub fn open(self) {
        info!("[Menu] {} is not available in this build", self.label());
    }
}

pub fn preset_item_id(preset: Preset) -> String {
    format!("theme:{}", preset.slug())
}

pub const CUSTOM_COLOR_ITEM_ID: &str = "theme:custom";

pub fn settings_menu() -> Vec<MenuNode> {
    let mut modes: Vec<MenuNode> = Preset::ALL
        .into_iter()
        .map(|p| MenuNode::item(preset_item_id(p), p.display_name()))
        .collect();
    modes.push(MenuNode::Separator);
    modes.push(MenuNode::item(CUSTOM_COLOR_ITEM_ID, "Custom Color…"));

    let mut menu = vec![
        MenuNode::Submenu {
            label: "Mode".to_string(),
            items: modes,
        },
        MenuNode::Separator,
    ];
    menu.extend(
        StubFeature::ALL
            .into_iter()
            .map(|f| MenuNode::item(f.id(), f.label())),
    );
    menu
}
