pub mod artifacts;
pub mod host;
pub mod instances;
pub mod monitor;
pub mod params;

#[cfg(test)]
pub mod monitor_tests;
