use std::io;
use std::io::Write;

use apigw_cli::commands::{
    api_cmd::{self, ApiCommands},
    api_key_cmd::{self, ApiKeyCommands},
    authorizer_cmd::{self, AuthorizerCommands},
    config_cmd::{self, ConfigCommands},
    product_cmd::{self, ProductCommands},
    sign_cmd::{self, SignArgs},
    stage_cmd::{self, StageCommands},
    usage_plan_cmd::{self, UsagePlanCommands},
};
use apigw_cli::config::{get_config_path, AppConfig};
use apigw_cli::errors::Error;
use apigw_client::ApiGatewayClient;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// apigw: manage API Gateway products, APIs, stages and keys
#[derive(Parser, Debug)]
#[command(name = "apigw")]
#[command(about = "Manage API Gateway products, APIs, stages and keys", long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./apigw.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(subcommand)]
    Config(ConfigCommands),

    #[command(subcommand)]
    Product(ProductCommands),

    #[command(subcommand)]
    Api(ApiCommands),

    #[command(subcommand)]
    Stage(StageCommands),

    #[command(subcommand)]
    UsagePlan(UsagePlanCommands),

    #[command(subcommand)]
    ApiKey(ApiKeyCommands),

    #[command(subcommand)]
    Authorizer(AuthorizerCommands),

    /// Print the authentication headers for a request
    Sign(SignArgs),

    /// Show the CLI version
    Version,
}

fn version_text() -> String {
    format!(
        "apigw version {}",
        option_env!("APIGW_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
    )
}

fn load_config(cli: &Cli) -> Result<AppConfig, Error> {
    let path = get_config_path(cli.config.as_deref());
    debug!(path = %path.display(), "Loading configuration");
    AppConfig::load_or_default(&path)
}

async fn run_with_client(cli: &Cli, client: &ApiGatewayClient) -> Result<String, Error> {
    match &cli.command {
        Commands::Product(cmd) => product_cmd::execute(cmd, client).await,
        Commands::Api(cmd) => api_cmd::execute(cmd, client).await,
        Commands::Stage(cmd) => stage_cmd::execute(cmd, client).await,
        Commands::UsagePlan(cmd) => usage_plan_cmd::execute(cmd, client).await,
        Commands::ApiKey(cmd) => api_key_cmd::execute(cmd, client).await,
        Commands::Authorizer(cmd) => authorizer_cmd::execute(cmd, client).await,
        Commands::Config(_) | Commands::Sign(_) | Commands::Version => Err(
            Error::InvalidArguments("command does not call the API".to_string()),
        ),
    }
}

async fn run(cli: &Cli) -> Result<String, Error> {
    match &cli.command {
        Commands::Config(cmd) => config_cmd::execute(cmd, cli.config.as_deref()),
        Commands::Sign(args) => sign_cmd::execute(args, &load_config(cli)?),
        Commands::Version => Ok(version_text()),
        _ => {
            let client = load_config(cli)?.build_client()?;
            run_with_client(cli, &client).await
        }
    }
}

fn print_output(output: &str) -> Result<(), Error> {
    let mut stdout = io::stdout();
    if output.ends_with('\n') {
        write!(stdout, "{}", output).map_err(|_| Error::StdOutFlushFailed)?;
    } else {
        writeln!(stdout, "{}", output).map_err(|_| Error::StdOutFlushFailed)?;
    }
    stdout.flush().map_err(|_| Error::StdOutFlushFailed)
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("APIGW_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match run(&cli).await {
        Ok(output) => print_output(&output),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
