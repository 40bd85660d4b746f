use clap::{Args, Parser, Subcommand};

use super::defaults::{
    DEFAULT_ADMIN_USER_ID, DEFAULT_BASE_URL, DEFAULT_LOOKUP_PAGE_SIZE, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, DEFAULT_PASSWORD, DEFAULT_USERNAME,
};
use super::parsers::{parse_base_url, parse_bool_env, parse_non_empty, parse_positive_u64};
use super::types::PositiveU64;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Log in and attempt one privileged write (create product)
    Auth,
    /// List products, then fetch the first one by id
    Products(ProductsArgs),
    /// Register a throwaway user and exercise the user state endpoint
    Users(UsersArgs),
    /// Run the auth, products and users probes in sequence
    All(AllArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ProductsArgs {
    /// Page number requested from the product listing
    #[arg(long = "page", default_value_t = positive_default(DEFAULT_PAGE), value_parser = parse_positive_u64)]
    pub page: PositiveU64,

    /// Page size requested from the product listing
    #[arg(long = "page-size", default_value_t = positive_default(DEFAULT_PAGE_SIZE), value_parser = parse_positive_u64)]
    pub page_size: PositiveU64,
}

#[derive(Debug, Args, Clone)]
pub struct UsersArgs {
    /// Administrator account targeted by the negative-path state change
    #[arg(long = "admin-user-id", default_value = DEFAULT_ADMIN_USER_ID, value_parser = parse_non_empty)]
    pub admin_user_id: String,

    /// Page size used when looking the new user up by email
    #[arg(long = "lookup-page-size", default_value_t = positive_default(DEFAULT_LOOKUP_PAGE_SIZE), value_parser = parse_positive_u64)]
    pub lookup_page_size: PositiveU64,
}

#[derive(Debug, Args, Clone)]
pub struct AllArgs {
    #[command(flatten)]
    pub products: ProductsArgs,

    #[command(flatten)]
    pub users: UsersArgs,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Diagnostic probes for the food delivery HTTP API - login, product list/detail and user lifecycle checks with human-readable reports."
)]
pub struct ProbeArgs {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL including the version prefix
    #[arg(long = "base-url", global = true, default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,

    /// Username or email used to log in
    #[arg(long = "username", global = true, default_value = DEFAULT_USERNAME, value_parser = parse_non_empty)]
    pub username: String,

    /// Password used to log in
    #[arg(long = "password", global = true, default_value = DEFAULT_PASSWORD)]
    pub password: String,

    /// Path to config file (TOML/JSON). Defaults to ./apiprobe.toml or ./apiprobe.json
    #[arg(long = "config", short = 'c', global = true)]
    pub config: Option<String>,

    /// Enable debug logging (overridden by APIPROBE_LOG / RUST_LOG)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", global = true, env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl ProbeArgs {
    /// Product listing options for the selected command, if it runs the products probe.
    #[must_use]
    pub const fn products(&self) -> Option<&ProductsArgs> {
        match &self.command {
            Command::Products(args) => Some(args),
            Command::All(args) => Some(&args.products),
            Command::Auth | Command::Users(_) => None,
        }
    }

    /// User probe options for the selected command, if it runs the users probe.
    #[must_use]
    pub const fn users(&self) -> Option<&UsersArgs> {
        match &self.command {
            Command::Users(args) => Some(args),
            Command::All(args) => Some(&args.users),
            Command::Auth | Command::Products(_) => None,
        }
    }

    pub(crate) const fn products_mut(&mut self) -> Option<&mut ProductsArgs> {
        match &mut self.command {
            Command::Products(args) => Some(args),
            Command::All(args) => Some(&mut args.products),
            Command::Auth | Command::Users(_) => None,
        }
    }

    pub(crate) const fn users_mut(&mut self) -> Option<&mut UsersArgs> {
        match &mut self.command {
            Command::Users(args) => Some(args),
            Command::All(args) => Some(&mut args.users),
            Command::Auth | Command::Products(_) => None,
        }
    }
}

fn positive_default(value: u64) -> PositiveU64 {
    PositiveU64::try_from(value).unwrap_or(PositiveU64::MIN)
}
