pub mod config;
pub mod render;
pub mod watch;
pub mod windows;
