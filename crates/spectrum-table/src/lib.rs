pub mod authority;
pub mod config;
pub mod logging;
pub mod policy;
pub mod runner;
