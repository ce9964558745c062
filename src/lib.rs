//! Smart Greenhouse API - read-only telemetry service over the greenhouse database.
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod services;
