// Shared state managed by Tauri.
// The shell lives behind one lock; every command and page callback goes
// through `with_shell`.

use std::sync::Mutex;

use tauri::Window;

use crate::error::{Result, ShellError};
use crate::host::{ChromeStyle, WebviewFactory};
use crate::modules::actions::Action;
use crate::settings::Settings;
use crate::shell::{Shell, ShellEvent};

pub type BrowserShell = Shell<WebviewFactory, Window, ChromeStyle>;

pub struct AppState {
    pub settings: Settings,
    pub shell: Mutex<Option<BrowserShell>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            shell: Mutex::new(None),
        }
    }

    pub fn with_shell<T>(&self, f: impl FnOnce(&mut BrowserShell) -> Result<T>) -> Result<T> {
        let mut guard = self.shell.lock().map_err(|_| ShellError::StatePoisoned)?;
        let shell = guard.as_mut().ok_or(ShellError::NotReady)?;
        f(shell)
    }

    pub fn dispatch(&self, id: &str, arg: Option<&str>) -> Result<Vec<ShellEvent>> {
        let action = Action::parse(id, arg)?;
        self.with_shell(|shell| shell.dispatch(action))
    }
}
