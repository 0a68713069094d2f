pub mod application;
pub mod args;
pub mod cli;
pub mod logging;
