//! CLI library components for the site manager dashboard.

pub mod input;
pub mod logging;
pub mod render;
