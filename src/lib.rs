pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
pub mod model;
pub mod sheet;
mod utils;
pub mod view;

pub use config::Config;

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;
