pub mod generator;
pub mod infra;
pub mod lifecycle;
pub mod logging;
pub mod shared;
