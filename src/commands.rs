// Commands invoked by the chrome UI.
// All of them are async so they run off the event loop thread: creating a
// tab needs that thread while the shell lock is held.

use tauri::{AppHandle, State, Window};

use crate::error::ShellError;
use crate::host::{build_settings_menu, publish};
use crate::modules::chrome::{Point, PointerButton};
use crate::settings::ShellConfig;
use crate::shell::ShellSnapshot;
use crate::state::AppState;

#[tauri::command]
pub async fn get_shell_config(state: State<'_, AppState>) -> Result<ShellConfig, ShellError> {
    Ok(state.settings.shell_config())
}

#[tauri::command]
pub async fn get_snapshot(state: State<'_, AppState>) -> Result<ShellSnapshot, ShellError> {
    state.with_shell(|shell| Ok(shell.snapshot()))
}

#[tauri::command]
pub async fn dispatch_action(
    app: AppHandle,
    state: State<'_, AppState>,
    id: String,
    arg: Option<String>,
) -> Result<(), ShellError> {
    let events = state.dispatch(&id, arg.as_deref())?;
    publish(&app, &events);
    Ok(())
}

#[tauri::command]
pub async fn open_settings_menu(window: Window) -> Result<(), ShellError> {
    let menu = build_settings_menu(&window)?;
    window.popup_menu(&menu)?;
    Ok(())
}

/// Chrome pointer coordinates arrive as logical screen pixels.
fn to_physical(window: &Window, x: f64, y: f64) -> Result<Point, ShellError> {
    let scale = window.scale_factor()?;
    Ok(Point::new((x * scale).round() as i32, (y * scale).round() as i32))
}

#[tauri::command]
pub async fn chrome_pointer_press(
    window: Window,
    state: State<'_, AppState>,
    x: f64,
    y: f64,
    button: i16,
) -> Result<(), ShellError> {
    let at = to_physical(&window, x, y)?;
    state.with_shell(|shell| {
        shell.pointer_press(at, PointerButton::from_dom(button));
        Ok(())
    })
}

#[tauri::command]
pub async fn chrome_pointer_move(
    window: Window,
    state: State<'_, AppState>,
    x: f64,
    y: f64,
) -> Result<(), ShellError> {
    let at = to_physical(&window, x, y)?;
    state.with_shell(|shell| shell.pointer_move(at))
}

#[tauri::command]
pub async fn chrome_pointer_release(state: State<'_, AppState>) -> Result<(), ShellError> {
    state.with_shell(|shell| {
        shell.pointer_release();
        Ok(())
    })
}
