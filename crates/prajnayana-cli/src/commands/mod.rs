pub mod auth;
pub mod board;
pub mod config;
pub mod discovery;
pub mod habit;
pub mod profile;
