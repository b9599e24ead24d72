pub mod behaviors;
pub mod context;
pub mod http;
pub mod user;

#[cfg(test)]
pub mod behaviors_tests;
#[cfg(test)]
pub mod context_tests;
