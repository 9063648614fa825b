use serde_json::json;

use crate::cli::config::{self, SessionConfig};
use crate::cli::utils::output_success;
use crate::cli::{api_client, OutputFormat};
use crate::client::{ApiClient, SignupPayload};

fn read_password(provided: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}

pub async fn signup(
    server: &str,
    username: String,
    display_name: String,
    email: Option<String>,
    password: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let payload = SignupPayload {
        username,
        password: read_password(password)?,
        display_name,
        email,
    };

    let session = ApiClient::new(server)?.signup(&payload).await?;
    config::save_session(&SessionConfig::new(server, &session))?;

    output_success(
        &output_format,
        &format!("Signed up as {} ({})", session.user.username, session.user.display_name),
        Some(json!({ "user": session.user })),
    )
}

pub async fn login(
    server: &str,
    username: String,
    password: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let password = read_password(password)?;
    let session = ApiClient::new(server)?.signin(&username, &password).await?;
    config::save_session(&SessionConfig::new(server, &session))?;

    output_success(
        &output_format,
        &format!("Logged in as {}", session.user.username),
        Some(json!({ "user": session.user })),
    )
}

pub fn logout(output_format: OutputFormat) -> anyhow::Result<()> {
    let message = if config::clear_session()? {
        "Logged out"
    } else {
        "No session to log out from"
    };
    output_success(&output_format, message, None)
}

pub async fn whoami(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = api_client(server)?;
    if client.token().is_none() {
        anyhow::bail!("Not logged in. Run 'datasets login <username>' first.");
    }

    let profile = client.me().await?;
    output_success(
        &output_format,
        &format!("{} ({}) {}", profile.username, profile.display_name, profile.id),
        Some(json!({ "user": profile })),
    )
}
