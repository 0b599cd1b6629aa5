// Library root for the time progression service

pub mod core;
pub mod engine;
pub mod api;
pub mod config;
