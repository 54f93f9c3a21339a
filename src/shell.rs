//! The browser shell: tabs, navigation, address bar, theme and window chrome
//! wired together behind one dispatch entry point.
//!
//! Everything here runs on whichever thread holds the shell lock; the host
//! only ever calls in with an [`Action`], a pointer event, or a
//! [`ContentEvent`] tagged with the tab it came from.

use log::{debug, warn};
use serde::Serialize;

use crate::error::Result;
use crate::modules::actions::Action;
use crate::modules::address_bar::AddressBar;
use crate::modules::chrome::{ChromeState, Point, PointerButton, WindowChrome, WindowHost};
use crate::modules::content_view::{ContentEvent, ContentViewFactory};
use crate::modules::navigation::Navigator;
use crate::modules::tabs::{TabId, TabManager, TabsSnapshot};
use crate::modules::theme::{StyleSheet, StyleTarget, Theme, ThemeEngine};
use crate::settings::Settings;

/// UI updates produced by the shell for the host to publish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    TabsChanged(TabsSnapshot),
    AddressChanged(String),
    ChromeChanged(ChromeState),
    FocusAddressBar,
    PickColor,
}

impl ShellEvent {
    /// Event name on the chrome UI side.
    pub fn name(&self) -> &'static str {
        match self {
            ShellEvent::TabsChanged(_) => "tabs-changed",
            ShellEvent::AddressChanged(_) => "address-changed",
            ShellEvent::ChromeChanged(_) => "chrome-changed",
            ShellEvent::FocusAddressBar => "focus-address-bar",
            ShellEvent::PickColor => "pick-color",
        }
    }
}

/// Full state of the chrome UI, fetched once when it loads.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    #[serde(flatten)]
    pub tabs: TabsSnapshot,
    pub address: String,
    pub style: StyleSheet,
    pub chrome: ChromeState,
}

pub struct Shell<F, W, S>
where
    F: ContentViewFactory,
    W: WindowHost,
    S: StyleTarget,
{
    settings: Settings,
    tabs: TabManager<F>,
    navigator: Navigator,
    address_bar: AddressBar,
    themes: ThemeEngine<S>,
    chrome: WindowChrome<W>,
}

impl<F, W, S> Shell<F, W, S>
where
    F: ContentViewFactory,
    W: WindowHost,
    S: StyleTarget,
{
    /// Installs the initial theme and opens the home page in the first tab.
    pub fn new(settings: Settings, factory: F, window: W, style: S) -> Result<Self> {
        let themes = ThemeEngine::new(style, settings.initial_theme)?;
        let chrome = WindowChrome::new(window)?;
        let mut shell = Self {
            navigator: Navigator::new(settings.homepage.clone()),
            tabs: TabManager::new(factory),
            address_bar: AddressBar::new(),
            themes,
            chrome,
            settings,
        };

        let home = shell.settings.homepage.clone();
        let label = shell.settings.new_tab_label.clone();
        let id = shell.tabs.add_tab(&home, &label)?;
        shell.address_bar.follow(id, &home);
        Ok(shell)
    }

    pub fn tabs(&self) -> &TabManager<F> {
        &self.tabs
    }

    pub fn address(&self) -> &str {
        self.address_bar.text()
    }

    pub fn theme(&self) -> Theme {
        self.themes.current()
    }

    pub fn chrome(&self) -> &WindowChrome<W> {
        &self.chrome
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            tabs: self.tabs.snapshot(),
            address: self.address_bar.text().to_string(),
            style: self.themes.sheet().clone(),
            chrome: self.chrome.state(),
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<ShellEvent>> {
        debug!("[Shell] Dispatch {:?}", action);
        let mut events = Vec::new();

        match action {
            Action::NewTab => {
                let home = self.settings.homepage.clone();
                let label = self.settings.new_tab_label.clone();
                self.tabs.add_tab(&home, &label)?;
                self.tab_switched(&mut events);
            }
            Action::CloseTab(id) => {
                if self.tabs.close_tab(id)? {
                    self.tab_switched(&mut events);
                }
            }
            Action::SelectTab(id) => {
                if self.tabs.select_tab(id)? {
                    self.tab_switched(&mut events);
                }
            }
            Action::Back => self.navigator.back(&self.tabs)?,
            Action::Forward => self.navigator.forward(&self.tabs)?,
            Action::Reload => self.navigator.reload(&self.tabs)?,
            Action::Home => self.navigator.go_home(&self.tabs)?,
            Action::Navigate(text) => {
                self.navigator.navigate(&self.tabs, &text)?;
            }
            Action::FocusAddressBar => events.push(ShellEvent::FocusAddressBar),
            Action::ApplyPreset(preset) => self.themes.apply(Theme::Preset(preset))?,
            Action::ApplyCustomColor(color) => self.themes.apply_custom_color(&color)?,
            Action::PickCustomColor => events.push(ShellEvent::PickColor),
            Action::Stub(feature) => feature.open(),
            Action::Minimize => self.chrome.minimize()?,
            Action::ToggleMaximize => {
                let state = self.chrome.toggle_maximize_restore()?;
                events.push(ShellEvent::ChromeChanged(state));
            }
            Action::CloseWindow => self.chrome.close()?,
        }

        Ok(events)
    }

    /// Applies a change notification from the view backing `tab`.
    pub fn on_content_event(&mut self, tab: TabId, event: ContentEvent) -> Vec<ShellEvent> {
        let new_tab_label = self.settings.new_tab_label.clone();
        let Some(entry) = self.tabs.get_mut(tab) else {
            debug!("[Shell] Dropping {:?} from closed tab {}", event, tab);
            return Vec::new();
        };

        let mut events = Vec::new();
        match event {
            ContentEvent::LocationChanged(location) => {
                entry.url = location.clone();
                if self.address_bar.on_location_changed(tab, &location) {
                    events.push(ShellEvent::AddressChanged(location));
                }
            }
            ContentEvent::TitleChanged(title) => {
                entry.label = if !title.trim().is_empty() {
                    title
                } else if !entry.url.is_empty() {
                    entry.url.clone()
                } else {
                    new_tab_label
                };
            }
            ContentEvent::IconChanged(icon) => entry.icon = icon,
        }
        events.push(ShellEvent::TabsChanged(self.tabs.snapshot()));
        events
    }

    pub fn pointer_press(&mut self, at: Point, button: PointerButton) {
        self.chrome.pointer_press(at, button);
    }

    pub fn pointer_move(&mut self, at: Point) -> Result<()> {
        self.chrome.pointer_move(at)
    }

    pub fn pointer_release(&mut self) {
        self.chrome.pointer_release();
    }

    fn tab_switched(&mut self, events: &mut Vec<ShellEvent>) {
        match self.tabs.active_tab() {
            Some(active) => {
                let (id, url) = (active.id, active.url.clone());
                if self.address_bar.follow(id, &url) {
                    events.push(ShellEvent::AddressChanged(url));
                }
            }
            None => warn!("[Shell] No active tab after tab change"),
        }
        events.push(ShellEvent::TabsChanged(self.tabs.snapshot()));
    }
}
