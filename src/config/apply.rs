use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, ProbeArgs, parse_base_url};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Options set on the command line are left untouched.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    let sub_matches = matches.subcommand().map(|(_, sub)| sub);

    if !is_cli(matches, sub_matches, "base_url")
        && let Some(base_url) = config.base_url.as_deref()
    {
        args.base_url = parse_base_url(base_url)
            .map_err(|err| AppError::config(ConfigError::InvalidBaseUrl { source: err }))?;
    }

    if !is_cli(matches, sub_matches, "username")
        && let Some(username) = config.username.as_deref()
    {
        args.username = ensure_non_empty(username, "username")?;
    }

    if !is_cli(matches, sub_matches, "password")
        && let Some(password) = config.password.clone()
    {
        args.password = password;
    }

    if !is_cli(matches, sub_matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, sub_matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if let Some(products) = args.products_mut() {
        if !is_cli(matches, sub_matches, "page")
            && let Some(page) = config.page
        {
            products.page = ensure_positive_u64(page, "page")?;
        }
        if !is_cli(matches, sub_matches, "page_size")
            && let Some(page_size) = config.page_size
        {
            products.page_size = ensure_positive_u64(page_size, "page_size")?;
        }
    }

    if let Some(users) = args.users_mut() {
        if !is_cli(matches, sub_matches, "admin_user_id")
            && let Some(admin_user_id) = config.admin_user_id.as_deref()
        {
            users.admin_user_id = ensure_non_empty(admin_user_id, "admin_user_id")?;
        }
        if !is_cli(matches, sub_matches, "lookup_page_size")
            && let Some(lookup_page_size) = config.lookup_page_size
        {
            users.lookup_page_size = ensure_positive_u64(lookup_page_size, "lookup_page_size")?;
        }
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, sub_matches: Option<&ArgMatches>, name: &str) -> bool {
    let from_cli = |m: &ArgMatches| {
        m.try_get_raw(name).is_ok() && m.value_source(name) == Some(ValueSource::CommandLine)
    };
    from_cli(matches) || sub_matches.is_some_and(from_cli)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_non_empty(value: &str, field: &'static str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::config(ConfigError::FieldEmpty { field }));
    }
    Ok(trimmed.to_owned())
}
