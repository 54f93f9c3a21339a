// Module exports for pure logic
pub mod actions;             // Action ids + shortcut table
pub mod address_bar;
pub mod chrome;              // Title bar: maximize/restore, drag
pub mod content_view;        // Host seam for web surfaces
pub mod menu;
pub mod navigation;
pub mod tabs;
pub mod theme;
