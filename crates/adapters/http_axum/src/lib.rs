//! # minaret-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the two call recordings at `/adhan` and `/fajradhan` so cast
//!   devices can fetch them by URL
//! - Serve a small JSON control API under `/api` (start, stop, select a
//!   device, list devices, status, play a call now)
//! - Expose recent log lines and a live Server-Sent-Events log stream
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `minaret-app` (for port traits and the controller) and
//! `minaret-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
