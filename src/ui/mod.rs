pub mod autostart_row;
pub mod hibernate_row;
