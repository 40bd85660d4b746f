use reqwest::Method;

use crate::args::PositiveU64;

/// Every route the probes touch, relative to the versioned base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    CreateProduct,
    ListProducts { page: PositiveU64, page_size: PositiveU64 },
    ProductById(String),
    RegisterUser,
    ListUsers { page: PositiveU64, page_size: PositiveU64 },
    UserState(String),
}

impl Endpoint {
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::CreateProduct | Endpoint::RegisterUser => Method::POST,
            Endpoint::ListProducts { .. } | Endpoint::ProductById(_) | Endpoint::ListUsers { .. } => {
                Method::GET
            }
            Endpoint::UserState(_) => Method::PUT,
        }
    }

    /// Path segments appended to the base URL.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Login => vec!["identity", "login"],
            Endpoint::CreateProduct | Endpoint::ListProducts { .. } => {
                vec!["catalogs", "products"]
            }
            Endpoint::ProductById(id) => vec!["catalogs", "products", id.as_str()],
            Endpoint::RegisterUser | Endpoint::ListUsers { .. } => vec!["identity", "users"],
            Endpoint::UserState(id) => vec!["identity", "users", id.as_str(), "state"],
        }
    }

    /// Query parameters, using the server's `Page`/`PageSize` casing.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::ListProducts { page, page_size } | Endpoint::ListUsers { page, page_size } => {
                vec![("Page", page.to_string()), ("PageSize", page_size.to_string())]
            }
            Endpoint::Login
            | Endpoint::CreateProduct
            | Endpoint::ProductById(_)
            | Endpoint::RegisterUser
            | Endpoint::UserState(_) => Vec::new(),
        }
    }
}
