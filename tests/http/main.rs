//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "http")]

mod auth;
mod catalog;
mod films;
mod support;
