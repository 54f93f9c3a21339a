// Tauri implementations of the shell's host seams.
// Content views are child webviews of the main window, stacked below the
// chrome webview; the chrome itself is the window's "main" webview.

use std::sync::mpsc::Receiver;
use std::thread;

use log::{debug, warn};
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::webview::PageLoadEvent;
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, PhysicalPosition, PhysicalSize,
    Rect, Runtime, Url, Webview, WebviewBuilder, WebviewUrl, Window,
};

use crate::error::{Result, ShellError};
use crate::modules::chrome::{Bounds, Point, WindowHost};
use crate::modules::content_view::{
    content_event_queue, ContentEvent, ContentEventSender, ContentView, ContentViewFactory,
    TabContentEvent,
};
use crate::modules::menu::{settings_menu, MenuNode};
use crate::modules::navigation::favicon_for;
use crate::modules::tabs::TabId;
use crate::modules::theme::{StyleSheet, StyleTarget};
use crate::settings::Settings;
use crate::shell::{Shell, ShellEvent};
use crate::state::AppState;

/// Label of the chrome (toolbar/title bar) webview.
pub const CHROME_LABEL: &str = "main";

const CONTENT_LABEL_PREFIX: &str = "content-";

pub struct WebviewContentView {
    webview: Webview,
}

impl WebviewContentView {
    fn eval(&self, js: &str) -> Result<()> {
        self.webview.eval(js)?;
        Ok(())
    }
}

impl ContentView for WebviewContentView {
    fn load(&self, url: &str) -> Result<()> {
        // Assign through the page so malformed addresses end up on the
        // view's own error page instead of failing here.
        let target = serde_json::to_string(url).map_err(|e| ShellError::Host(e.to_string()))?;
        self.eval(&format!("window.location.href = {}", target))
    }

    fn back(&self) -> Result<()> {
        self.eval("window.history.back()")
    }

    fn forward(&self) -> Result<()> {
        self.eval("window.history.forward()")
    }

    fn reload(&self) -> Result<()> {
        self.eval("window.location.reload()")
    }

    fn set_visible(&self, visible: bool) -> Result<()> {
        if visible {
            self.webview.show()?;
            self.webview.set_focus()?;
        } else {
            self.webview.hide()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.webview.close()?;
        Ok(())
    }
}

pub struct WebviewFactory {
    window: Window,
    chrome_height: f64,
    events: ContentEventSender,
}

impl WebviewFactory {
    pub fn new(window: Window, chrome_height: f64, events: ContentEventSender) -> Self {
        Self {
            window,
            chrome_height,
            events,
        }
    }
}

impl ContentViewFactory for WebviewFactory {
    type View = WebviewContentView;

    fn create(&mut self, tab: TabId, url: &str) -> Result<WebviewContentView> {
        let target = if url.is_empty() { "about:blank" } else { url };
        let parsed = Url::parse(target).map_err(|e| ShellError::InvalidUrl {
            input: url.to_string(),
            reason: e.to_string(),
        })?;

        let load_events = self.events.clone();
        let title_events = self.events.clone();
        let builder = WebviewBuilder::new(tab.webview_label(), WebviewUrl::External(parsed))
            .on_page_load(move |_webview, payload| {
                let location = payload.url().to_string();
                let event = match payload.event() {
                    PageLoadEvent::Started => ContentEvent::LocationChanged(location),
                    PageLoadEvent::Finished => ContentEvent::IconChanged(favicon_for(&location)),
                };
                load_events.send(tab, event);
            })
            .on_document_title_changed(move |_webview, title| {
                title_events.send(tab, ContentEvent::TitleChanged(title));
            });

        let (position, size) = content_area(&self.window, self.chrome_height)?;
        let webview = self.window.add_child(builder, position, size)?;
        debug!("[Host] Created webview {}", webview.label());
        Ok(WebviewContentView { webview })
    }
}

impl<R: Runtime> WindowHost for Window<R> {
    fn position(&self) -> Result<Point> {
        let p = self.outer_position()?;
        Ok(Point::new(p.x, p.y))
    }

    fn move_to(&self, point: Point) -> Result<()> {
        self.set_position(PhysicalPosition::new(point.x, point.y))?;
        Ok(())
    }

    fn bounds(&self) -> Result<Bounds> {
        let p = self.outer_position()?;
        let s = self.outer_size()?;
        Ok(Bounds::new(p.x, p.y, s.width, s.height))
    }

    fn set_bounds(&self, bounds: Bounds) -> Result<()> {
        self.set_position(PhysicalPosition::new(bounds.x, bounds.y))?;
        self.set_size(PhysicalSize::new(bounds.width, bounds.height))?;
        Ok(())
    }

    fn is_maximized(&self) -> Result<bool> {
        Ok(Window::is_maximized(self)?)
    }

    fn maximize(&self) -> Result<()> {
        Window::maximize(self)?;
        Ok(())
    }

    fn unmaximize(&self) -> Result<()> {
        Window::unmaximize(self)?;
        Ok(())
    }

    fn minimize(&self) -> Result<()> {
        Window::minimize(self)?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        Window::close(self)?;
        Ok(())
    }
}

/// Sends generated style sheets to the chrome webview.
pub struct ChromeStyle {
    app: AppHandle,
}

impl ChromeStyle {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl StyleTarget for ChromeStyle {
    fn install(&self, sheet: &StyleSheet) -> Result<()> {
        self.app.emit_to(CHROME_LABEL, "theme-changed", sheet.clone())?;
        Ok(())
    }
}

/// Builds the shell and stores it in the managed state. The lock is held
/// while the first tab is created so early page events queue behind it.
pub fn install_shell(app: &AppHandle, window: &Window, settings: Settings) -> Result<()> {
    let (events, queue) = content_event_queue();
    let consumer = app.clone();
    thread::Builder::new()
        .name("content-events".into())
        .spawn(move || drain_content_events(consumer, queue))
        .map_err(|e| ShellError::Host(format!("cannot start content event thread: {}", e)))?;

    let state = app.state::<AppState>();
    let mut slot = state.shell.lock().map_err(|_| ShellError::StatePoisoned)?;

    let factory = WebviewFactory::new(window.clone(), settings.chrome_height(), events);
    let style = ChromeStyle::new(app.clone());
    *slot = Some(Shell::new(settings, factory, window.clone(), style)?);
    Ok(())
}

/// Page callbacks fire on the event loop thread and only enqueue. This
/// thread applies them one at a time in arrival order, so the event loop
/// never waits on the shell lock and a later location always lands last.
fn drain_content_events(app: AppHandle, queue: Receiver<TabContentEvent>) {
    for (tab, event) in queue {
        let state = app.state::<AppState>();
        match state.with_shell(|shell| Ok(shell.on_content_event(tab, event))) {
            Ok(events) => publish(&app, &events),
            Err(e) => warn!("[Host] Dropped content event for tab {}: {}", tab, e),
        }
    }
    debug!("[Host] Content event queue closed");
}

/// Runs an action id coming from the native menu.
pub fn dispatch_from_menu(app: &AppHandle, id: String) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        let state = app.state::<AppState>();
        let result = state.dispatch(&id, None);
        match result {
            Ok(events) => publish(&app, &events),
            Err(e) => warn!("[Menu] '{}' failed: {}", id, e),
        }
    });
}

/// Emits shell events to the chrome webview.
pub fn publish(app: &AppHandle, events: &[ShellEvent]) {
    for event in events {
        let name = event.name();
        let sent = match event {
            ShellEvent::TabsChanged(snapshot) => app.emit_to(CHROME_LABEL, name, snapshot.clone()),
            ShellEvent::AddressChanged(address) => app.emit_to(CHROME_LABEL, name, address.clone()),
            ShellEvent::ChromeChanged(state) => app.emit_to(CHROME_LABEL, name, *state),
            ShellEvent::FocusAddressBar => {
                focus_chrome(app);
                app.emit_to(CHROME_LABEL, name, ())
            }
            ShellEvent::PickColor => app.emit_to(CHROME_LABEL, name, ()),
        };
        if let Err(e) = sent {
            warn!("[Host] Failed to emit {}: {}", name, e);
        }
    }
}

fn focus_chrome(app: &AppHandle) {
    // Window first, then the chrome webview inside it.
    if let Some(window) = app.get_window(CHROME_LABEL) {
        if let Err(e) = window.set_focus() {
            warn!("[Host] Failed to focus window: {}", e);
        }
    }
    if let Some(webview) = app.get_webview(CHROME_LABEL) {
        if let Err(e) = webview.set_focus() {
            warn!("[Host] Failed to focus chrome webview: {}", e);
        }
    }
}

fn content_area(
    window: &Window,
    chrome_height: f64,
) -> Result<(LogicalPosition<f64>, LogicalSize<f64>)> {
    let scale = window.scale_factor()?;
    let size = window.inner_size()?.to_logical::<f64>(scale);
    let height = (size.height - chrome_height).max(100.0);
    Ok((
        LogicalPosition::new(0.0, chrome_height),
        LogicalSize::new(size.width, height),
    ))
}

/// Re-fits every content webview below the chrome after a resize.
pub fn relayout_content(app: &AppHandle, window: &Window, chrome_height: f64) {
    let (position, size) = match content_area(window, chrome_height) {
        Ok(area) => area,
        Err(e) => {
            warn!("[Host] Cannot compute content area: {}", e);
            return;
        }
    };
    for (label, webview) in app.webviews() {
        if !label.starts_with(CONTENT_LABEL_PREFIX) {
            continue;
        }
        let placed = webview.set_bounds(Rect {
            position: position.into(),
            size: size.into(),
        });
        if let Err(e) = placed {
            warn!("[Host] Failed to relayout {}: {}", label, e);
        }
    }
}

/// Native popup for the toolbar's settings button.
pub fn build_settings_menu(window: &Window) -> Result<Menu<tauri::Wry>> {
    let menu = Menu::new(window)?;
    for node in settings_menu() {
        match node {
            MenuNode::Item { id, label } => {
                menu.append(&MenuItem::with_id(window, id, label, true, None::<&str>)?)?;
            }
            MenuNode::Separator => menu.append(&PredefinedMenuItem::separator(window)?)?,
            MenuNode::Submenu { label, items } => {
                let submenu = Submenu::new(window, label, true)?;
                for child in items {
                    match child {
                        MenuNode::Item { id, label } => {
                            submenu.append(&MenuItem::with_id(window, id, label, true, None::<&str>)?)?;
                        }
                        MenuNode::Separator => submenu.append(&PredefinedMenuItem::separator(window)?)?,
                        MenuNode::Submenu { label, .. } => {
                            warn!("[Menu] Nested submenu '{}' is not supported", label);
                        }
                    }
                }
                menu.append(&submenu)?;
            }
        }
    }
    Ok(menu)
}
