#![recursion_limit = "256"]
pub mod config;
pub mod constants;
pub mod errors;
pub mod feed;
pub mod icons;
pub mod layout;
pub mod node_utils;
pub mod sentinel;
pub mod throttle;
pub mod trigger;
