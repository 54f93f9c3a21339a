//! Custom title bar behaviour: minimize, maximize/restore, close and
//! pointer-drag relocation.

use std::ops::{Add, Sub};

use log::{debug, info};
use serde::Serialize;

use crate::error::Result;

/// A point in physical screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Outer window rectangle in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The top-level window as seen by the chrome.
pub trait WindowHost {
    fn position(&self) -> Result<Point>;
    fn move_to(&self, point: Point) -> Result<()>;
    fn bounds(&self) -> Result<Bounds>;
    fn set_bounds(&self, bounds: Bounds) -> Result<()>;
    fn is_maximized(&self) -> Result<bool>;
    fn maximize(&self) -> Result<()>;
    fn unmaximize(&self) -> Result<()>;
    fn minimize(&self) -> Result<()>;
    fn close(&self) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChromeState {
    Normal,
    Maximized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

pub struct WindowChrome<W: WindowHost> {
    window: W,
    state: ChromeState,
    /// Bounds to return to when leaving the maximized state.
    restore_bounds: Option<Bounds>,
    /// Last pointer position of an active drag.
    drag: Option<Point>,
}

impl<W: WindowHost> WindowChrome<W> {
    pub fn new(window: W) -> Result<Self> {
        let state = if window.is_maximized()? {
            ChromeState::Maximized
        } else {
            ChromeState::Normal
        };
        Ok(Self {
            window,
            state,
            restore_bounds: None,
            drag: None,
        })
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn state(&self) -> ChromeState {
        self.state
    }

    pub fn is_maximized(&self) -> bool {
        self.state == ChromeState::Maximized
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Flips between maximized and normal, starting from what the window
    /// reports rather than the last state set here: the window manager can
    /// maximize or restore on its own.
    pub fn toggle_maximize_restore(&mut self) -> Result<ChromeState> {
        let current = if self.window.is_maximized()? {
            ChromeState::Maximized
        } else {
            ChromeState::Normal
        };
        if current != self.state {
            debug!("[Chrome] Window changed to {:?} outside the chrome", current);
            self.restore_bounds = None;
        }
        match current {
            ChromeState::Normal => {
                self.restore_bounds = Some(self.window.bounds()?);
                self.window.maximize()?;
                self.state = ChromeState::Maximized;
            }
            ChromeState::Maximized => {
                self.window.unmaximize()?;
                if let Some(saved) = self.restore_bounds.take() {
                    if self.window.bounds()? != saved {
                        self.window.set_bounds(saved)?;
                    }
                }
                self.state = ChromeState::Normal;
            }
        }
        info!("[Chrome] Window is now {:?}", self.state);
        Ok(self.state)
    }

    pub fn minimize(&mut self) -> Result<()> {
        self.drag = None;
        self.window.minimize()
    }

    pub fn close(&mut self) -> Result<()> {
        self.drag = None;
        self.window.close()
    }

    /// Starts a drag at the global pointer position. Only the primary
    /// button drags.
    pub fn pointer_press(&mut self, at: Point, button: PointerButton) {
        if button == PointerButton::Primary {
            debug!("[Chrome] Drag start at {:?}", at);
            self.drag = Some(at);
        }
    }

    /// Moves the window by the pointer delta since the last captured point.
    /// Without an active drag this does nothing.
    pub fn pointer_move(&mut self, at: Point) -> Result<()> {
        let Some(last) = self.drag else {
            return Ok(());
        };
        let delta = at - last;
        if delta != Point::default() {
            let position = self.window.position()?;
            self.window.move_to(position + delta)?;
        }
        self.drag = Some(at);
        Ok(())
    }

    pub fn pointer_release(&mut self) {
        if self.drag.take().is_some() {
            debug!("[Chrome] Drag end");
        }
    }
}
