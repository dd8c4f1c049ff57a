//! Tool implementations for the files MCP server.
//!
//! Argument shapes are enforced by deserializing into the parameter structs;
//! a request that does not fit is rejected by rmcp as invalid params before
//! any tool body runs. Domain failures come back as tool errors prefixed with
//! their kind, e.g. `[not_found] read_file: file not found: ...`.

use crate::FilesServer;
use crate::config::WorkspaceConfig;
use crate::dispatch::Operation;
use rmcp::{
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Parameters for reading a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Path to the file to read.
    pub file_path: String,
}

/// Parameters for writing a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// Path to the file to write.
    pub file_path: String,
    /// Content to write to the file.
    pub content: String,
}

/// Parameters for deleting a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteFileParams {
    /// Path to the file to delete.
    pub file_path: String,
}

/// Parameters for creating a directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDirectoryParams {
    /// Path to the directory to create.
    pub directory_path: String,
}

/// Parameters for deleting a directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteDirectoryParams {
    /// Path to the directory to delete.
    pub directory_path: String,
}

/// Parameters for listing a directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDirectoryParams {
    /// Path to the directory to list.
    pub directory_path: String,
}

/// Parameters for rendering a directory tree.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TreeViewParams {
    /// Path to the directory to display as tree.
    pub directory_path: String,
    /// Maximum depth to traverse (default: unlimited).
    #[serde(default, deserialize_with = "deserialize_depth")]
    #[schemars(with = "Option<f64>")]
    pub max_depth: Option<i64>,
}

/// Accept any JSON number for a depth, truncating fractions.
fn deserialize_depth<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))))
}

#[tool_router]
impl FilesServer {
    /// Create a new files server confined to `workspace`.
    pub fn new(workspace: WorkspaceConfig) -> Self {
        Self {
            workspace: Arc::new(workspace),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Read the content of a text file")]
    async fn read_file(
        &self,
        Parameters(params): Parameters<ReadFileParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::ReadFile(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "Write content to a text file, creating parent directories as needed")]
    async fn write_file(
        &self,
        Parameters(params): Parameters<WriteFileParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::WriteFile(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "Delete a file from the filesystem")]
    async fn delete_file(
        &self,
        Parameters(params): Parameters<DeleteFileParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::DeleteFile(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "Create a directory and its parent directories if they don't exist")]
    async fn create_directory(
        &self,
        Parameters(params): Parameters<CreateDirectoryParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::CreateDirectory(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "Delete a directory and all its contents from the filesystem")]
    async fn delete_directory(
        &self,
        Parameters(params): Parameters<DeleteDirectoryParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::DeleteDirectory(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "List the contents of a directory")]
    async fn list_directory(
        &self,
        Parameters(params): Parameters<ListDirectoryParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::ListDirectory(params))
            .await
            .into_tool_result()
    }

    #[tool(description = "Display a tree view of a directory structure")]
    async fn tree_view(
        &self,
        Parameters(params): Parameters<TreeViewParams>,
    ) -> Result<String, String> {
        self.dispatch(Operation::TreeView(params))
            .await
            .into_tool_result()
    }
}
