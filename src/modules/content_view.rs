// Host-facing seams for the embedded web surfaces.
// Implementations live in `host.rs` (Tauri) and in `testing` (recorders).

use std::sync::mpsc::{self, Receiver, Sender};

use log::warn;

use crate::error::Result;
use crate::modules::tabs::TabId;

/// One embedded web-rendering surface. Commands are fire-and-forget:
/// an `Err` only means the host rejected the call, never that a page failed
/// to load.
pub trait ContentView {
    fn load(&self, url: &str) -> Result<()>;
    fn back(&self) -> Result<()>;
    fn forward(&self) -> Result<()>;
    fn reload(&self) -> Result<()>;
    fn set_visible(&self, visible: bool) -> Result<()>;
    fn close(&self) -> Result<()>;
}

/// Creates one content view per tab. An empty `url` yields a blank view.
pub trait ContentViewFactory {
    type View: ContentView;

    fn create(&mut self, tab: TabId, url: &str) -> Result<Self::View>;
}

/// Change notifications reported by a content view, tagged by the shell
/// with the tab they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    LocationChanged(String),
    TitleChanged(String),
    IconChanged(Option<String>),
}

/// Notification tagged with the tab whose view reported it.
pub type TabContentEvent = (TabId, ContentEvent);

/// Producer side of the single queue every content view reports into.
/// Views call it in the order the host raises notifications; one consumer
/// drains the queue, so that order is the order the shell applies them.
#[derive(Clone)]
pub struct ContentEventSender {
    tx: Sender<TabContentEvent>,
}

impl ContentEventSender {
    pub fn send(&self, tab: TabId, event: ContentEvent) {
        if self.tx.send((tab, event)).is_err() {
            warn!("[Content] Event queue closed, dropping notification from tab {}", tab);
        }
    }
}

pub fn content_event_queue() -> (ContentEventSender, Receiver<TabContentEvent>) {
    let (tx, rx) = mpsc::channel();
    (ContentEventSender { tx }, rx)
}
