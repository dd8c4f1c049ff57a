//! Command-line interface for the files server.

use crate::config::WorkspaceConfig;
use crate::dispatch::{Operation, OperationResult};
use crate::{FilesServer, SERVER_NAME};
use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use rmcp::{ServiceExt, model::JsonObject};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Port used when neither `--port` nor `MCP_HTTP_PORT` is given.
pub const DEFAULT_PORT: u16 = 9090;

/// Walrus MCP Files Server, file and directory tools confined to one workspace.
#[derive(Parser, Debug)]
#[command(name = "wmcp-files", version, about)]
pub struct App {
    /// Workspace folder every operation is confined to.
    #[arg(long, env = "LOCAL_WORKSPACE_FOLDER", value_name = "DIR")]
    pub workspace: PathBuf,

    #[command(flatten)]
    pub http: HttpArgs,

    /// Transport to serve on; streamable HTTP when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Streamable HTTP listener settings.
#[derive(Args, Debug, Clone)]
pub struct HttpArgs {
    /// Port to listen on.
    #[arg(long, env = "MCP_HTTP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve MCP over stdin/stdout.
    Stdio,
    /// Run one operation against the workspace and print the result.
    Call {
        /// Name of the operation (e.g. read_file, tree_view).
        name: String,

        /// Arguments as KEY=VALUE pairs (e.g. file_path=notes.txt).
        /// Values are parsed as JSON; plain strings are treated as JSON strings.
        /// A value that is valid JSON keeps its JSON type, so a path such as
        /// `123` or `true` must be quoted: file_path='"123"'.
        #[arg(value_name = "KEY=VALUE")]
        args: Vec<String>,
    },
}

impl App {
    /// Execute the parsed command line.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let workspace = WorkspaceConfig::new(&self.workspace)?;
        let server = FilesServer::new(workspace);
        info!(root = %server.workspace().root().display(), "workspace ready");

        match self.command {
            None => serve_http(server, self.http).await?,
            Some(Command::Stdio) => serve_stdio(server).await?,
            Some(Command::Call { name, args }) => {
                let result = call(&server, &name, &args).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
                if matches!(result, OperationResult::Failure { .. }) {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}

async fn serve_http(server: FilesServer, http: HttpArgs) -> anyhow::Result<()> {
    let addr = SocketAddr::new(http.host, http.port);
    let app = rmcp_axum::router("/mcp", SERVER_NAME, move || Ok(server.clone()));
    rmcp_axum::serve(addr, app)
        .await
        .with_context(|| format!("failed to serve on {addr}"))
}

async fn serve_stdio(server: FilesServer) -> anyhow::Result<()> {
    let transport = rmcp::transport::stdio();
    server
        .serve(transport)
        .await
        .context("failed to start server")?
        .waiting()
        .await
        .context("server error")?;
    Ok(())
}

/// Parse `key=value` pairs into a JSON object.
///
/// Each value is first attempted as JSON. If parsing fails, it is
/// treated as a plain string.
fn parse_args(args: &[String]) -> anyhow::Result<JsonObject> {
    let mut map = JsonObject::new();
    for arg in args {
        let (key, raw_value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid argument {arg:?}, expected KEY=VALUE"))?;

        let value = serde_json::from_str(raw_value)
            .unwrap_or_else(|_| serde_json::Value::String(raw_value.to_string()));

        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// Run one operation locally, without any transport.
pub async fn call(
    server: &FilesServer,
    name: &str,
    args: &[String],
) -> anyhow::Result<OperationResult> {
    let arguments = parse_args(args)?;
    let operation = Operation::from_call(name, arguments)?;
    Ok(server.dispatch(operation).await)
}
