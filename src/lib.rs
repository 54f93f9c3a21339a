// Cwanda Browser Library Entry Point
// Pure shell logic lives in `modules` and `shell`; `host`, `state` and
// `commands` bind it to Tauri.

use log::LevelFilter;
use tauri::Manager;

pub mod error;
pub mod settings;
pub mod shell;

// Pure logic modules (no Tauri imports)
pub mod modules;

// Tauri bindings
pub mod commands;
pub mod host;
pub mod state;

#[cfg(test)]
mod testing;

use crate::host::CHROME_LABEL;
use crate::settings::Settings;
use crate::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::default().level(level).build())
        .setup(|app| {
            let settings = Settings::default();
            let chrome_height = settings.chrome_height();
            let window = app
                .get_window(CHROME_LABEL)
                .ok_or("main window is missing from tauri.conf.json")?;

            window.set_title(&settings.window_title)?;
            window.set_decorations(!settings.show_title_bar)?;

            app.manage(AppState::new(settings.clone()));
            host::install_shell(app.handle(), &window, settings)?;

            // Settings popup selections come back as action ids
            app.on_menu_event(|app_handle, event| {
                host::dispatch_from_menu(app_handle, event.id().0.clone());
            });

            let handle = app.handle().clone();
            let window_for_resize = window.clone();
            window.on_window_event(move |event| {
                if let tauri::WindowEvent::Resized(_) = event {
                    host::relayout_content(&handle, &window_for_resize, chrome_height);
                }
            });

            log::info!("[Setup] Shell ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_shell_config,
            commands::get_snapshot,
            commands::dispatch_action,
            commands::open_settings_menu,
            commands::chrome_pointer_press,
            commands::chrome_pointer_move,
            commands::chrome_pointer_release,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
