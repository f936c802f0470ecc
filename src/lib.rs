pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod reader;
pub mod run;
pub mod scanner;
