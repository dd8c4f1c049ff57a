//! Operation dispatch: name + arguments in, uniform result out.

use crate::FilesServer;
use crate::error::{ErrorKind, FsError};
use crate::tools::{
    CreateDirectoryParams, DeleteDirectoryParams, DeleteFileParams, ListDirectoryParams,
    ReadFileParams, TreeViewParams, WriteFileParams,
};
use crate::{dirs, files, tree};
use rmcp::model::JsonObject;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

/// Malformed requests, rejected before any filesystem access.
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("invalid arguments for '{operation}': {source}")]
    Invalid {
        operation: &'static str,
        source: serde_json::Error,
    },
}

/// A fully validated request.
#[derive(Debug)]
pub enum Operation {
    ReadFile(ReadFileParams),
    WriteFile(WriteFileParams),
    DeleteFile(DeleteFileParams),
    CreateDirectory(CreateDirectoryParams),
    DeleteDirectory(DeleteDirectoryParams),
    ListDirectory(ListDirectoryParams),
    TreeView(TreeViewParams),
}

fn parse<T: DeserializeOwned>(
    operation: &'static str,
    arguments: JsonObject,
) -> Result<T, ArgumentError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|source| ArgumentError::Invalid { operation, source })
}

impl Operation {
    /// Build an operation from its name and raw arguments.
    pub fn from_call(name: &str, arguments: JsonObject) -> Result<Self, ArgumentError> {
        Ok(match name {
            "read_file" => Self::ReadFile(parse("read_file", arguments)?),
            "write_file" => Self::WriteFile(parse("write_file", arguments)?),
            "delete_file" => Self::DeleteFile(parse("delete_file", arguments)?),
            "create_directory" => Self::CreateDirectory(parse("create_directory", arguments)?),
            "delete_directory" => Self::DeleteDirectory(parse("delete_directory", arguments)?),
            "list_directory" => Self::ListDirectory(parse("list_directory", arguments)?),
            "tree_view" => Self::TreeView(parse("tree_view", arguments)?),
            other => return Err(ArgumentError::UnknownOperation(other.to_owned())),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadFile(_) => "read_file",
            Self::WriteFile(_) => "write_file",
            Self::DeleteFile(_) => "delete_file",
            Self::CreateDirectory(_) => "create_directory",
            Self::DeleteDirectory(_) => "delete_directory",
            Self::ListDirectory(_) => "list_directory",
            Self::TreeView(_) => "tree_view",
        }
    }
}

/// Outcome of one operation, as reported to callers outside MCP.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationResult {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl OperationResult {
    /// Wrap the outcome of `operation`, naming it in any failure message.
    pub fn new(operation: &str, result: Result<String, FsError>) -> Self {
        match result {
            Ok(text) => Self::Success { text },
            Err(e) => Self::Failure {
                kind: e.kind(),
                message: format!("{operation}: {e}"),
            },
        }
    }

    /// Split into tool output, tagging failures with their kind.
    pub fn into_tool_result(self) -> Result<String, String> {
        match self {
            Self::Success { text } => Ok(text),
            Self::Failure { kind, message } => Err(format!("[{kind}] {message}")),
        }
    }
}

impl FilesServer {
    /// Run one operation against the workspace.
    pub async fn execute(&self, operation: Operation) -> Result<String, FsError> {
        let name = operation.name();
        let result = self.run(operation).await;
        if let Err(e) = &result {
            warn!(operation = name, kind = ?e.kind(), "{e}");
        }
        result
    }

    /// Run one operation and fold the outcome into an [`OperationResult`].
    pub async fn dispatch(&self, operation: Operation) -> OperationResult {
        let name = operation.name();
        OperationResult::new(name, self.execute(operation).await)
    }

    async fn run(&self, operation: Operation) -> Result<String, FsError> {
        let workspace = &self.workspace;
        match operation {
            Operation::ReadFile(params) => {
                let path = workspace.resolve(&params.file_path)?;
                let content = files::read(&path).await?;
                info!(path = %path.display(), bytes = content.len(), "read file");
                Ok(String::from_utf8(content)
                    .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
            Operation::WriteFile(params) => {
                let path = workspace.resolve(&params.file_path)?;
                let written = files::write(&path, params.content.as_bytes()).await?;
                info!(path = %path.display(), bytes = written, "wrote file");
                Ok(format!(
                    "Successfully wrote {written} bytes to {}",
                    path.display()
                ))
            }
            Operation::DeleteFile(params) => {
                let path = workspace.resolve(&params.file_path)?;
                files::delete(&path).await?;
                info!(path = %path.display(), "deleted file");
                Ok(format!("Successfully deleted file: {}", path.display()))
            }
            Operation::CreateDirectory(params) => {
                let path = workspace.resolve(&params.directory_path)?;
                dirs::create(&path).await?;
                info!(path = %path.display(), "created directory");
                Ok(format!("Successfully created directory: {}", path.display()))
            }
            Operation::DeleteDirectory(params) => {
                let path = workspace.resolve(&params.directory_path)?;
                dirs::delete(&path).await?;
                info!(path = %path.display(), "deleted directory");
                Ok(format!("Successfully deleted directory: {}", path.display()))
            }
            Operation::ListDirectory(params) => {
                let path = workspace.resolve(&params.directory_path)?;
                let listing = dirs::list(&path, &params.directory_path).await?;
                info!(path = %path.display(), entries = listing.entries.len(), "listed directory");
                Ok(listing.to_string())
            }
            Operation::TreeView(params) => {
                let path = workspace.resolve(&params.directory_path)?;
                // Negative depths mean unlimited.
                let max_depth = params.max_depth.and_then(|d| usize::try_from(d).ok());
                let tree = tree::build(&path, &params.directory_path, max_depth).await?;
                info!(path = %path.display(), ?max_depth, "rendered tree");
                Ok(tree.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::FilesServer;
    use crate::config::WorkspaceConfig;
    use crate::dispatch::{ArgumentError, Operation, OperationResult};
    use crate::error::ErrorKind;
    use rmcp::model::JsonObject;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("arguments must be an object"),
        }
    }

    fn server() -> (tempfile::TempDir, FilesServer) {
        let tmp = tempfile::tempdir().unwrap();
        let server = FilesServer::new(WorkspaceConfig::new(tmp.path()).unwrap());
        (tmp, server)
    }

    async fn call(server: &FilesServer, name: &str, value: serde_json::Value) -> OperationResult {
        let op = Operation::from_call(name, args(value)).unwrap();
        server.dispatch(op).await
    }

    #[test]
    fn parses_every_operation() {
        let cases = [
            ("read_file", json!({"file_path": "a"})),
            ("write_file", json!({"file_path": "a", "content": "b"})),
            ("delete_file", json!({"file_path": "a"})),
            ("create_directory", json!({"directory_path": "d"})),
            ("delete_directory", json!({"directory_path": "d"})),
            ("list_directory", json!({"directory_path": "d"})),
            ("tree_view", json!({"directory_path": "d", "max_depth": 2})),
        ];
        for (name, value) in cases {
            let op = Operation::from_call(name, args(value)).unwrap();
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn rejects_unknown_operation() {
        let err = Operation::from_call("format_disk", JsonObject::new()).unwrap_err();
        assert!(matches!(err, ArgumentError::UnknownOperation(name) if name == "format_disk"));
    }

    #[test]
    fn rejects_missing_argument() {
        let err = Operation::from_call("write_file", args(json!({"file_path": "a"}))).unwrap_err();
        assert!(matches!(err, ArgumentError::Invalid { operation: "write_file", .. }));
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn rejects_wrong_type() {
        let err = Operation::from_call("read_file", args(json!({"file_path": 7}))).unwrap_err();
        assert!(matches!(err, ArgumentError::Invalid { .. }));

        let err = Operation::from_call(
            "tree_view",
            args(json!({"directory_path": "", "max_depth": "deep"})),
        )
        .unwrap_err();
        assert!(matches!(err, ArgumentError::Invalid { .. }));
    }

    #[test]
    fn max_depth_accepts_any_number() {
        let parse = |value| match Operation::from_call("tree_view", args(value)).unwrap() {
            Operation::TreeView(params) => params.max_depth,
            other => panic!("unexpected operation {other:?}"),
        };
        assert_eq!(parse(json!({"directory_path": ""})), None);
        assert_eq!(parse(json!({"directory_path": "", "max_depth": null})), None);
        assert_eq!(parse(json!({"directory_path": "", "max_depth": 3})), Some(3));
        assert_eq!(parse(json!({"directory_path": "", "max_depth": 2.9})), Some(2));
        assert_eq!(parse(json!({"directory_path": "", "max_depth": -1})), Some(-1));
    }

    #[tokio::test]
    async fn write_read_round_trip() {
        let (_tmp, server) = server();
        let written = call(
            &server,
            "write_file",
            json!({"file_path": "docs/a.txt", "content": "one\ntwo\n"}),
        )
        .await;
        assert!(
            matches!(written, OperationResult::Success { ref text } if text.starts_with("Successfully wrote 8 bytes to "))
        );

        let read = call(&server, "read_file", json!({"file_path": "docs/a.txt"})).await;
        assert!(matches!(read, OperationResult::Success { ref text } if text == "one\ntwo\n"));
    }

    #[tokio::test]
    async fn escape_is_containment_violation() {
        let (_tmp, server) = server();
        let result = call(&server, "read_file", json!({"file_path": "../secret.txt"})).await;
        assert!(matches!(
            result,
            OperationResult::Failure { kind: ErrorKind::ContainmentViolation, .. }
        ));
    }

    #[tokio::test]
    async fn failures_carry_kind_and_path() {
        let (_tmp, server) = server();
        let result = call(&server, "delete_file", json!({"file_path": "nope.txt"})).await;
        match result {
            OperationResult::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::NotFound);
                assert!(message.starts_with("delete_file: "));
                assert!(message.contains("nope.txt"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn negative_depth_is_unlimited() {
        let (tmp, server) = server();
        std::fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        let result = call(
            &server,
            "tree_view",
            json!({"directory_path": "", "max_depth": -5}),
        )
        .await;
        assert!(matches!(result, OperationResult::Success { ref text } if text.contains("c/")));
    }

    #[test]
    fn tool_result_tags_failure_kind() {
        let failure = OperationResult::Failure {
            kind: ErrorKind::NotFound,
            message: "read_file: file not found: /w/a".into(),
        };
        assert_eq!(
            failure.into_tool_result().unwrap_err(),
            "[not_found] read_file: file not found: /w/a"
        );

        let success = OperationResult::Success { text: "ok".into() };
        assert_eq!(success.into_tool_result().unwrap(), "ok");
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let failure = OperationResult::Failure {
            kind: ErrorKind::TypeMismatch,
            message: "path is not a file: /w".into(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"status": "failure", "kind": "type_mismatch", "message": "path is not a file: /w"})
        );
    }
}
