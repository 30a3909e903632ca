//! Client-side revival
//!
//! This module provides access to reinhardt-islands-client: document scanning,
//! component mapping and revival of server-rendered islands. On wasm32 the
//! live browser document is available as `BrowserDocument`.

pub use reinhardt_islands_client::*;
