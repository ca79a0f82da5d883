//! HTTP front-end for segue.
//!
//! Wires a loaded [`segue_core::Recommender`] into an axum router serving
//! the HTML form, the result page, and a small JSON API. Also owns the
//! layered configuration shared with the command line.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod views;

pub use config::Config;
pub use error::{WebError, WebResult};
pub use server::{router, serve, AppState};
