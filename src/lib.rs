pub mod config;
pub mod engine;
pub mod search;
pub mod util;
pub mod vault;
