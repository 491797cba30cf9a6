pub mod action;
pub mod config;
pub mod connection;
pub mod credential;
pub mod flags;
pub mod interactive;
pub mod paths;
pub mod repository;
pub mod storage;
pub mod style;

pub use crate::config::Config;
