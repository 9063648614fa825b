pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "datasets")]
#[command(about = "Command-line client for the Dataset API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "DATASETS_SERVER_URL", default_value = DEFAULT_SERVER_URL, help = "Dataset API base URL")]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Register a new account and log in")]
    Signup {
        #[arg(help = "Username")]
        username: String,
        #[arg(long = "display-name", help = "Name shown as dataset owner")]
        display_name: String,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Log in and store the session token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show the logged-in user")]
    Whoami,

    #[command(about = "List datasets, newest first")]
    List,

    #[command(about = "Show one dataset")]
    Show {
        #[arg(help = "Dataset ID")]
        id: String,
    },

    #[command(about = "Create a dataset owned by the logged-in user")]
    Create {
        #[arg(long, help = "Dataset name")]
        name: String,
        #[arg(long, help = "Dataset description")]
        description: String,
        #[arg(long, help = "Dataset size")]
        size: Option<f64>,
    },

    #[command(about = "Change a dataset you own")]
    Update {
        #[arg(help = "Dataset ID")]
        id: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_size", help = "New size")]
        size: Option<f64>,
        #[arg(long, help = "Remove the size")]
        clear_size: bool,
    },

    #[command(about = "Delete a dataset you own")]
    Delete {
        #[arg(help = "Dataset ID")]
        id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// API client for `server`, carrying the stored token when one exists
pub fn api_client(server: &str) -> anyhow::Result<ApiClient> {
    let token = config::load_session()?.map(|s| s.token);
    Ok(ApiClient::new(server)?.with_token(token))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server;

    match cli.command {
        Commands::Signup {
            username,
            display_name,
            email,
            password,
        } => commands::auth::signup(&server, username, display_name, email, password, output_format).await,
        Commands::Login { username, password } => {
            commands::auth::login(&server, username, password, output_format).await
        }
        Commands::Logout => commands::auth::logout(output_format),
        Commands::Whoami => commands::auth::whoami(&server, output_format).await,
        Commands::List => commands::datasets::list(&server, output_format).await,
        Commands::Show { id } => commands::datasets::show(&server, &id, output_format).await,
        Commands::Create {
            name,
            description,
            size,
        } => commands::datasets::create(&server, name, description, size, output_format).await,
        Commands::Update {
            id,
            name,
            description,
            size,
            clear_size,
        } => {
            let size = if clear_size { Some(None) } else { size.map(Some) };
            commands::datasets::update(&server, &id, name, description, size, output_format).await
        }
        Commands::Delete { id } => commands::datasets::delete(&server, &id, output_format).await,
    }
}
