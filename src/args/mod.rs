//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{AllArgs, Command, ProbeArgs, ProductsArgs, UsersArgs};
pub use types::{PositiveU64, UserState};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::parse_base_url;
