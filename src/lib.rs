//! palette-swap
//!
//! Four-colour palette swap post-process: a CPU renderer around the
//! `palette-mapper` core, an HTTP service and a CLI.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
