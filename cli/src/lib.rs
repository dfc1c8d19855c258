//! Formbase command-line front end

pub mod app;
pub mod core;
pub mod utils;
