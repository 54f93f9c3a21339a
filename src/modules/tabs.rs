// Tab collection - pure logic, no Tauri imports.
// The collection is never empty once the shell has opened its first tab.

use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{Result, ShellError};
use crate::modules::content_view::{ContentView, ContentViewFactory};

/// Stable handle for a tab. Ids are never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl TabId {
    /// Label of the host webview backing this tab.
    pub fn webview_label(self) -> String {
        format!("content-{}", self.0)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(TabId)
            .map_err(|_| ShellError::InvalidTabId(s.to_string()))
    }
}

pub struct Tab<V> {
    pub id: TabId,
    pub view: V,
    pub label: String,
    pub icon: Option<String>,
    /// Last location reported by the view.
    pub url: String,
}

/// What the chrome UI needs to draw one entry of the tab strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub label: String,
    pub icon: Option<String>,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsSnapshot {
    pub tabs: Vec<TabInfo>,
    pub active_tab_id: Option<TabId>,
}

pub struct TabManager<F: ContentViewFactory> {
    factory: F,
    tabs: Vec<Tab<F::View>>,
    active: usize,
    next_id: u64,
}

impl<F: ContentViewFactory> TabManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            tabs: Vec::new(),
            active: 0,
            next_id: 1,
        }
    }

    /// Creates a view bound to `url`, appends it and makes it active.
    pub fn add_tab(&mut self, url: &str, label: &str) -> Result<TabId> {
        let id = TabId(self.next_id);
        let view = self.factory.create(id, url)?;
        self.next_id += 1;

        if let Some(previous) = self.tabs.get(self.active) {
            if let Err(e) = previous.view.set_visible(false) {
                release(id, &view);
                return Err(e);
            }
        }

        self.tabs.push(Tab {
            id,
            view,
            label: label.to_string(),
            icon: None,
            url: url.to_string(),
        });
        self.active = self.tabs.len() - 1;

        info!("[Tabs] Opened tab {} at '{}' ({} open)", id, url, self.tabs.len());
        Ok(id)
    }

    /// Removes the tab unless it is the last one. Returns whether anything
    /// was removed.
    ///
    /// When the active tab is closed, the tab that slides into its index
    /// becomes active; if it was the rightmost, its left neighbour does.
    pub fn close_tab(&mut self, id: TabId) -> Result<bool> {
        if self.tabs.len() < 2 {
            debug!("[Tabs] Ignoring close of tab {}: last remaining tab", id);
            return Ok(false);
        }
        let Some(index) = self.index_of(id) else {
            debug!("[Tabs] Ignoring close of unknown tab {}", id);
            return Ok(false);
        };

        let was_active = index == self.active;
        let removed = self.tabs.remove(index);

        let shown = if was_active {
            self.active = index.min(self.tabs.len() - 1);
            self.tabs[self.active].view.set_visible(true)
        } else {
            if index < self.active {
                self.active -= 1;
            }
            Ok(())
        };

        let closed = removed.view.close();
        shown.and(closed)?;
        info!("[Tabs] Closed tab {} ({} open)", id, self.tabs.len());
        Ok(true)
    }

    /// Makes `id` the active tab. Returns false if it is unknown or
    /// already active.
    pub fn select_tab(&mut self, id: TabId) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        if index == self.active {
            return Ok(false);
        }

        self.tabs[self.active].view.set_visible(false)?;
        self.tabs[index].view.set_visible(true)?;
        self.active = index;
        debug!("[Tabs] Selected tab {}", id);
        Ok(true)
    }

    pub fn active_tab(&self) -> Option<&Tab<F::View>> {
        self.tabs.get(self.active)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active_tab().map(|t| t.id)
    }

    pub fn is_active(&self, id: TabId) -> bool {
        self.active_id() == Some(id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab<F::View>> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab<F::View>> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab<F::View>> {
        self.tabs.iter()
    }

    pub fn snapshot(&self) -> TabsSnapshot {
        TabsSnapshot {
            tabs: self
                .tabs
                .iter()
                .map(|t| TabInfo {
                    id: t.id,
                    label: t.label.clone(),
                    icon: t.icon.clone(),
                    url: t.url.clone(),
                })
                .collect(),
            active_tab_id: self.active_id(),
        }
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }
}

/// Closes a view that never made it into the tab list.
fn release<V: ContentView>(id: TabId, view: &V) {
    if let Err(e) = view.close() {
        warn!("[Tabs] Failed to release view for tab {}: {}", id, e);
    }
}
