pub mod config;
pub mod fake;
