pub mod config;
pub mod console_interface;
pub mod core;
pub mod error;
pub mod level_source;
pub mod models;
pub mod session;
pub mod win_sink;

#[cfg(test)]
mod test;
