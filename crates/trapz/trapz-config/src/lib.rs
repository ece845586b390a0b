mod config;

pub use config::{ConfigError, TrapzConfig};
