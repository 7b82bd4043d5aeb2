//! Apple Store Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. The binary in `main.rs` only
//! wires configuration, telemetry and the listener around [`app::build_app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
