//! MCP server providing file and directory tools confined to one workspace.
//!
//! Every caller-supplied path is resolved against the workspace root by
//! [`validate::resolve`] before the filesystem is touched. Implements 7 tools:
//! `read_file`, `write_file`, `delete_file`, `create_directory`,
//! `delete_directory`, `list_directory` and `tree_view`.

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod dirs;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod files;
pub mod tools;
pub mod tree;
pub mod validate;

/// Name reported in server info and by the health endpoint.
pub const SERVER_NAME: &str = "wmcp-files";

/// MCP files server bound to a single workspace root.
#[derive(Debug, Clone)]
pub struct FilesServer {
    pub(crate) workspace: Arc<config::WorkspaceConfig>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl FilesServer {
    pub fn workspace(&self) -> &config::WorkspaceConfig {
        &self.workspace
    }
}

#[tool_handler]
impl ServerHandler for FilesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                title: Some("Walrus MCP Files Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Files server providing file and directory operations confined to one workspace folder. \
                 All paths are relative to the workspace root."
                    .into(),
            ),
        }
    }
}
