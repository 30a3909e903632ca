//! Server-side rendering
//!
//! This module provides access to reinhardt-islands-server: component
//! resolution with a per-identifier module cache, and a render boundary that
//! always returns a [`RenderResult`](crate::protocol::RenderResult).
//!
//! ## Runtime Mode
//!
//! `REINHARDT_ENV=production` keeps resolved components cached for the life of
//! the process. Any other value evicts and reloads a component on every
//! resolution so edits show up on the next request.

pub use reinhardt_islands_server::*;
