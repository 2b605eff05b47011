use std::path::PathBuf;
use std::sync::Arc;

use account_client::account::operations;
use account_client::account::{AccountPatch, LoginBody, RegisterBody};
use account_client::routes::HistoryNavigator;
use account_client::session::FileTokenStorage;
use account_client::{ApiError, AppState, ClientConfig};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_FILE: &str = ".account-token";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("update-profile needs at least one field to change")]
    EmptyPatch,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "account", about = "Account API client with a persisted session")]
struct Cli {
    #[arg(long, env = "ACCOUNT_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "ACCOUNT_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ACCOUNT_PASSWORD")]
        password: String,
    },
    /// Create an account and persist the session token.
    Register(RegisterArgs),
    /// End the session on the server and forget the token.
    Logout,
    /// Print the current account.
    Profile,
    /// Change one or more profile fields.
    UpdateProfile(UpdateProfileArgs),
    /// Report whether a session token is held.
    Status,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "ACCOUNT_PASSWORD")]
    password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
}

#[derive(Args, Debug)]
struct UpdateProfileArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    avatar: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env_with_base_url(&cli.base_url)?;
    config.token_file = Some(cli.token_file.clone());

    let storage = Arc::new(FileTokenStorage::new(&cli.token_file));
    let state = AppState::from_config(config, storage, Arc::new(HistoryNavigator::new()))?;

    run(&state, cli.command).await
}

async fn run(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let response = operations::login(state, LoginBody { email, password }).await?;
            print_json(&serde_json::to_value(&response.user)?)
        }
        Command::Register(args) => {
            let body = RegisterBody {
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
            };
            let response = operations::register(state, body).await?;
            print_json(&serde_json::to_value(&response.user)?)
        }
        Command::Logout => {
            operations::logout(state).await?;
            println!("logged out");
            Ok(())
        }
        Command::Profile => match operations::profile(state).await? {
            Some(account) => print_json(&serde_json::to_value(&account)?),
            None => {
                println!("not logged in");
                Ok(())
            }
        },
        Command::UpdateProfile(args) => {
            let patch = AccountPatch {
                email: args.email,
                first_name: args.first_name,
                last_name: args.last_name,
                avatar: args.avatar,
            };
            if patch.is_empty() {
                return Err(CliError::EmptyPatch);
            }
            let account = operations::update_profile(state, patch).await?;
            print_json(&serde_json::to_value(&account)?)
        }
        Command::Status => {
            let authenticated = state.session.is_authenticated();
            print_json(&serde_json::json!({
                "authenticated": authenticated,
                "base_url": state.config.base_url,
            }))
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
