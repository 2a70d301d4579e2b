// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info};

use amanat_admin::client::RequestOptions;
use amanat_admin::transport::Method;
use amanat_admin::{ApiClient, ClientConfig, FileTokenStore, Session};

/// Command-line client for the Amanat admin API.
#[derive(Debug, Parser)]
#[command(name = "amanat-admin", version)]
struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    /// Log format (json or text).
    #[arg(long, env = "AMANAT_LOG_FORMAT", default_value = "text")]
    log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "AMANAT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and persist the session tokens.
    Login {
        #[arg(long, env = "AMANAT_EMAIL")]
        email: String,
        #[arg(long, env = "AMANAT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the stored tokens.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Show dashboard statistics.
    Stats,
    /// Send an authenticated request and print the response data.
    Request {
        method: Method,
        /// Path relative to the API URL, e.g. `/contributions`.
        path: String,
        /// JSON request body.
        #[arg(long, value_parser = parse_json)]
        data: Option<Value>,
        /// Query parameter, repeatable.
        #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        error!("fatal: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries command output.
    match cli.log_format.as_str() {
        "json" => fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init(),
        _ => fmt::fmt().with_env_filter(filter).with_writer(std::io::stderr).init(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let token_path = cli.client.token_path();
    let tokens = Arc::new(FileTokenStore::open(&token_path));
    let client = ApiClient::new(&cli.client, tokens)?;
    let session = Session::new(client.clone());

    match cli.command {
        Command::Login { email, password } => {
            if !session.login(&email, &password).await {
                anyhow::bail!("login failed for {email}");
            }
            info!(path = %token_path.display(), "tokens saved");
            print_json(&session.current_user())?;
        }
        Command::Logout => session.logout().await,
        Command::Whoami => {
            let user = session.restore_session().await.ok_or_else(|| anyhow::anyhow!("not logged in"))?;
            print_json(&user)?;
        }
        Command::Stats => {
            require_session(&session).await?;
            print_json(&client.statistics().dashboard().await?)?;
        }
        Command::Request { method, path, data, query } => {
            let data = client.send(method, &path, data, RequestOptions::query(query)).await?;
            print_json(&data)?;
        }
    }
    Ok(())
}

async fn require_session(session: &Session) -> anyhow::Result<()> {
    if session.restore_session().await.is_none() {
        anyhow::bail!("not logged in");
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
