// src/utils/mod.rs
pub mod config;
pub mod error;
pub mod telemetry;
