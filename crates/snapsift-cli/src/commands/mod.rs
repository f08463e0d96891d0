pub mod combo;
pub mod config;
