//! Address bar text, kept in step with the active tab.
//!
//! Location notifications arrive from every content view; only the one
//! belonging to the tab currently being shown may replace the text.

use log::debug;

use crate::modules::tabs::TabId;

#[derive(Debug, Default)]
pub struct AddressBar {
    text: String,
    showing: Option<TabId>,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn showing(&self) -> Option<TabId> {
        self.showing
    }

    /// Rebinds the bar to a newly active tab. Returns true if the text
    /// changed.
    pub fn follow(&mut self, tab: TabId, location: &str) -> bool {
        self.showing = Some(tab);
        self.replace(location)
    }

    /// Applies a location notification. Notifications from any tab other
    /// than the one being shown are dropped.
    pub fn on_location_changed(&mut self, tab: TabId, location: &str) -> bool {
        if self.showing != Some(tab) {
            debug!("[Address] Dropping location from background tab {}", tab);
            return false;
        }
        self.replace(location)
    }

    fn replace(&mut self, location: &str) -> bool {
        if self.text == location {
            return false;
        }
        self.text = location.to_string();
        true
    }
}
