// Library root; exposes the client modules to the binary and to `tests/`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod pages;
pub mod render;
pub mod sample;
pub mod services;
pub mod session;
pub mod validation;
