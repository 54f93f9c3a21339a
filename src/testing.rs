// Recording host doubles for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Result, ShellError};
use crate::modules::chrome::{Bounds, Point, WindowHost};
use crate::modules::content_view::{ContentView, ContentViewFactory};
use crate::modules::tabs::TabId;
use crate::modules::theme::{StyleSheet, StyleTarget};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewCall {
    Load(String),
    Back,
    Forward,
    Reload,
    Visible(bool),
    Close,
}

#[derive(Clone)]
pub struct RecordingView {
    id: TabId,
    initial_url: String,
    calls: Rc<RefCell<Vec<ViewCall>>>,
    visibility_fails: Rc<Cell<bool>>,
}

impl RecordingView {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn initial_url(&self) -> &str {
        &self.initial_url
    }

    /// Makes every later `set_visible` call fail after being recorded.
    pub fn fail_visibility(&self) {
        self.visibility_fails.set(true);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    pub fn loads(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ViewCall::Load(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ViewCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl ContentView for RecordingView {
    fn load(&self, url: &str) -> Result<()> {
        self.record(ViewCall::Load(url.to_string()))
    }

    fn back(&self) -> Result<()> {
        self.record(ViewCall::Back)
    }

    fn forward(&self) -> Result<()> {
        self.record(ViewCall::Forward)
    }

    fn reload(&self) -> Result<()> {
        self.record(ViewCall::Reload)
    }

    fn set_visible(&self, visible: bool) -> Result<()> {
        self.record(ViewCall::Visible(visible))?;
        if self.visibility_fails.get() {
            return Err(ShellError::Host(format!("tab {} cannot change visibility", self.id)));
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.record(ViewCall::Close)
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    created: Vec<RecordingView>,
}

impl RecordingFactory {
    pub fn created(&self) -> Vec<RecordingView> {
        self.created.clone()
    }
}

impl ContentViewFactory for RecordingFactory {
    type View = RecordingView;

    fn create(&mut self, tab: TabId, url: &str) -> Result<RecordingView> {
        let view = RecordingView {
            id: tab,
            initial_url: url.to_string(),
            calls: Rc::default(),
            visibility_fails: Rc::default(),
        };
        self.created.push(view.clone());
        Ok(view)
    }
}

/// Window double with maximize/restore semantics of a real window manager:
/// maximizing fills the screen, restoring returns to the normal bounds.
pub struct FakeWindow {
    bounds: Cell<Bounds>,
    normal: Cell<Bounds>,
    maximized: Cell<bool>,
    minimized: Cell<bool>,
    closed: Cell<bool>,
    screen: Bounds,
}

impl FakeWindow {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds: Cell::new(bounds),
            normal: Cell::new(bounds),
            maximized: Cell::new(false),
            minimized: Cell::new(false),
            closed: Cell::new(false),
            screen: Bounds::new(0, 0, 1920, 1080),
        }
    }

    pub fn current(&self) -> Bounds {
        self.bounds.get()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl WindowHost for FakeWindow {
    fn position(&self) -> Result<Point> {
        Ok(self.bounds.get().origin())
    }

    fn move_to(&self, point: Point) -> Result<()> {
        let b = self.bounds.get();
        self.bounds.set(Bounds::new(point.x, point.y, b.width, b.height));
        Ok(())
    }

    fn bounds(&self) -> Result<Bounds> {
        Ok(self.bounds.get())
    }

    fn set_bounds(&self, bounds: Bounds) -> Result<()> {
        self.bounds.set(bounds);
        Ok(())
    }

    fn is_maximized(&self) -> Result<bool> {
        Ok(self.maximized.get())
    }

    fn maximize(&self) -> Result<()> {
        if !self.maximized.get() {
            self.normal.set(self.bounds.get());
        }
        self.maximized.set(true);
        self.bounds.set(self.screen);
        Ok(())
    }

    fn unmaximize(&self) -> Result<()> {
        if self.maximized.get() {
            self.bounds.set(self.normal.get());
        }
        self.maximized.set(false);
        Ok(())
    }

    fn minimize(&self) -> Result<()> {
        self.minimized.set(true);
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingStyle {
    installed: Rc<RefCell<Vec<StyleSheet>>>,
}

impl RecordingStyle {
    pub fn installed(&self) -> Vec<StyleSheet> {
        self.installed.borrow().clone()
    }
}

impl StyleTarget for RecordingStyle {
    fn install(&self, sheet: &StyleSheet) -> Result<()> {
        self.installed.borrow_mut().push(sheet.clone());
        Ok(())
    }
}
