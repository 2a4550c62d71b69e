//! KsApi command-line client
//!
//! Settings come from the optional YAML file and `KSAPI_*` variables.
//! Results print as pretty JSON on stdout; failures print their kind and
//! message on stderr and exit with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ksapi::{
    ApiError, GraphError, JsonDecoder, PageCursor, QueryField, QuerySet, Service, init_tracing,
};
use ksapi_infrastructure::{ConfigError, ConfigLoader};
use serde::Serialize;

#[derive(Clone, Debug, Parser)]
#[command(name = "ksapi", version = env!("CARGO_PKG_VERSION"), about = "Query the Kickstarter API", long_about = None)]
struct Cli {
    /// YAML settings file, read before `KSAPI_*` variables.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// App configuration
    #[command(alias = "cfg")]
    Config,
    /// The logged-in user
    Me,
    /// A user by id
    User { id: i64 },
    /// A project by id or slug
    #[command(alias = "p")]
    Project { param: String },
    /// A next-page URL from an earlier response
    Page { url: String },
    /// Root categories (GraphQL)
    Categories,
}

/// A failure reduced to what the user sees.
#[derive(Debug)]
struct Failure {
    kind: &'static str,
    message: String,
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        let message = error
            .error_envelope()
            .and_then(|envelope| envelope.message().map(str::to_string))
            .map_or_else(|| error.to_string(), |server| format!("{error}: {server}"));
        Self {
            kind: error.kind().as_str(),
            message,
        }
    }
}

impl From<GraphError> for Failure {
    fn from(error: GraphError) -> Self {
        Self {
            kind: error.kind().as_str(),
            message: error.to_string(),
        }
    }
}

impl From<ConfigError> for Failure {
    fn from(error: ConfigError) -> Self {
        Self {
            kind: "config",
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self {
            kind: "output",
            message: error.to_string(),
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String, Failure> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run(cli: Cli) -> Result<String, Failure> {
    let mut loader = ConfigLoader::new().with_process_env();
    if let Some(path) = cli.config {
        loader = loader.with_file(path);
    }
    let settings = loader.load().await?;
    let service = Service::from_settings(&settings).map_err(|error| Failure {
        kind: "transport",
        message: error.to_string(),
    })?;

    tracing::debug!(
        environment = %service.server_config().environment().as_str(),
        authenticated = service.identity().is_authenticated(),
        "service ready"
    );

    match cli.command {
        Command::Config => pretty(&service.fetch_config().await?),
        Command::Me => pretty(&service.fetch_user_self().await?),
        Command::User { id } => pretty(&service.fetch_user(id).await?),
        Command::Project { param } => pretty(&service.fetch_project(param.as_str()).await?),
        Command::Page { url } => {
            let page: serde_json::Value = service
                .client()
                .request_page(&PageCursor::new(url), &JsonDecoder::new())
                .await?;
            pretty(&page)
        }
        Command::Categories => {
            let queries = QuerySet::new(
                QueryField::new("rootCategories").leaves(["id", "name", "parentId"]),
            );
            pretty(&service.fetch_graph_categories(&queries).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("error [{}]: {}", failure.kind, failure.message);
            ExitCode::FAILURE
        }
    }
}
