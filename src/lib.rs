//! Library crate for jparty-back, exposing modules for binaries and integration tests.

pub mod config;
pub mod dto;
pub mod error;
pub mod retrieve;
pub mod routes;
pub mod services;
pub mod state;
