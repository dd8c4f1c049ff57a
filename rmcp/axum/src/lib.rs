//! # rmcp-axum
//!
//! Extensions for serving MCP servers built with [rmcp](https://docs.rs/rmcp)
//! over streamable HTTP with [axum](https://docs.rs/axum).
//!
//! [`router`] mounts the MCP service under an endpoint path next to a
//! `GET /health` liveness route, and [`serve`] runs it until Ctrl-C.
//!
//! ```rust,ignore
//! let app = rmcp_axum::router("/mcp", "my-server", || Ok(MyMcpService::new()));
//! rmcp_axum::serve("0.0.0.0:8080".parse()?, app).await?;
//! ```

pub use axum;

pub mod health;
mod serve;

pub use serve::{router, serve};
