//! # Taskboard API Server Library
//!
//! Core functionality for the taskboard API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors (validated JSON bodies, authenticated user)
//! - `services`: Business rules, one module per entity
//! - `routes`: HTTP handlers, one module per resource

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
