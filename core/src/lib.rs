pub mod api;
pub mod builder;
pub mod cancel;
pub mod command;
pub mod config;
pub mod error;
pub mod hexdump;
pub mod log;
pub mod probe;
pub mod prompt;
pub mod runner;
pub mod scan;
pub mod tool;
