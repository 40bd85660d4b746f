mod app;
mod config;
mod http;
mod shape;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use shape::ShapeError;
pub use validation::ValidationError;
