pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod ranking;
pub mod risk;
pub mod services;
pub mod utils;

pub use error::types::*;
