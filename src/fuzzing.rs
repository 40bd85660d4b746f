use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use serde_json::Value;

use crate::args::ProbeArgs;
use crate::config::apply_config;
use crate::config::types::ConfigFormat;
use crate::error::{AppError, AppResult};
use crate::shape::{PRODUCT_ID_KEYS, extract_identifier, resolve_list};

thread_local! {
    static BASE_MATCHES: ArgMatches = ProbeArgs::command().get_matches_from(["apiprobe", "all"]);
}

/// Parses a positive integer the way `--page` does.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    input
        .parse::<crate::args::PositiveU64>()
        .map(u64::from)
        .map_err(AppError::from)
}

/// Validates a base URL the way `--base-url` does.
///
/// # Errors
///
/// Returns an error when the URL is rejected.
pub fn parse_base_url_input(input: &str) -> AppResult<String> {
    crate::args::parse_base_url(input).map_err(AppError::from)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or applying fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config = crate::config::parse_config_str(input, ConfigFormat::Toml, Path::new("fuzz.toml"))?;
    apply_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or applying fails.
pub fn apply_config_from_json(input: &str) -> AppResult<()> {
    let config = crate::config::parse_config_str(input, ConfigFormat::Json, Path::new("fuzz.json"))?;
    apply_to_defaults(&config)
}

/// Resolves a listing body and extracts the first product id.
///
/// # Errors
///
/// Returns an error when the body is not JSON or has no recognized list.
pub fn resolve_product_listing(input: &[u8]) -> AppResult<Option<String>> {
    let body: Value = serde_json::from_slice(input)?;
    let resolved = resolve_list(&body, "products")?;
    Ok(resolved
        .first()
        .and_then(|record| extract_identifier(record, &PRODUCT_ID_KEYS)))
}

fn apply_to_defaults(config: &crate::config::types::ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = ProbeArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}
