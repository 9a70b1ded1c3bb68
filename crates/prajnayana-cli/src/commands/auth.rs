//! API token and registration commands for CLI.

use std::io::BufRead;

use clap::Subcommand;
use prajnayana_core::{ApiClient, AuthToken, Config, KeyringTokenStore, RegisterRequest, TokenStore};

use crate::common::CliResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the API token in the OS keyring
    Login {
        /// API token (read from stdin when omitted)
        #[arg(long)]
        token: Option<String>,
        /// Account id used for profile requests
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Remove the stored token
    Logout,
    /// Check whether a token is stored
    Status,
    /// Create a new account
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        year_of_birth: Option<i32>,
    },
}

pub async fn run(action: AuthAction) -> CliResult {
    let store = KeyringTokenStore;

    match action {
        AuthAction::Login { token, user_id } => {
            let raw = match token {
                Some(t) => t,
                None => {
                    eprintln!("Paste API token:");
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    line
                }
            };
            let token = AuthToken::new(raw);
            if token.is_empty() {
                return Err("empty token".into());
            }
            store.store(&token)?;
            if let Some(id) = user_id {
                let mut config = Config::load()?;
                config.account.user_id = Some(id);
                config.save()?;
            }
            println!("Token stored");
        }
        AuthAction::Logout => {
            store.clear()?;
            println!("Token removed");
        }
        AuthAction::Status => {
            let token = match store.load() {
                Ok(Some(t)) if !t.is_empty() => "stored".to_string(),
                Ok(_) => "not stored".to_string(),
                Err(e) => format!("unavailable ({e})"),
            };
            let config = Config::load()?;
            println!("Server:  {}", config.api.base_url);
            println!("Token:   {token}");
            match config.account.user_id {
                Some(id) => println!("User id: {id}"),
                None => println!("User id: not set"),
            }
        }
        AuthAction::Register {
            username,
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            gender,
            year_of_birth,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                confirm_password,
                first_name,
                last_name,
                gender,
                year_of_birth,
            };
            let config = Config::load()?;
            let message = ApiClient::anonymous(&config.api)?.register(&request).await?;
            println!("{message}");
        }
    }
    Ok(())
}
