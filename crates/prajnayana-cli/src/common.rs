//! Shared helpers for CLI commands.

use chrono::NaiveDate;
use prajnayana_core::{parse_date_key, today_local, ApiClient, Config, KeyringTokenStore, TokenStore};
use tracing::debug;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Load config and the stored token, and build an authenticated client.
pub fn connect() -> CliResult<(Config, ApiClient)> {
    let config = Config::load()?;
    let token = KeyringTokenStore.require()?;
    let client = ApiClient::new(&config.api, &token)?;
    debug!(base_url = %client.base_url(), "connected");
    Ok((config, client))
}

pub fn user_id(config: &Config) -> CliResult<i64> {
    config
        .account
        .user_id
        .ok_or_else(|| "no user id configured: run `auth login --user-id <ID>` first".into())
}

/// `--date` value, or today in local time.
pub fn day_or_today(date: Option<&str>) -> CliResult<NaiveDate> {
    match date {
        Some(key) => Ok(parse_date_key(key)?),
        None => Ok(today_local()),
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
