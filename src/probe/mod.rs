//! The diagnostic probes and the verdicts they report.
mod auth;
mod products;
mod report;
mod session;
pub mod synthetic;
mod users;

#[cfg(test)]
mod tests;

use std::io::Write;

use rand::Rng;

use crate::args::{Command, ProbeArgs};
use crate::error::AppResult;
use crate::http::{ApiClient, Credentials};

pub use auth::run_auth_probe;
pub use products::run_product_probe;
pub use report::Reporter;
pub use session::{LoginFailure, Session, login};
pub use users::run_user_probe;

/// Everything a probe needs for one run. Nothing outlives the process.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub client: ApiClient,
    pub credentials: Credentials,
}

impl ProbeContext {
    /// Builds the client and credentials from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_args(args: &ProbeArgs) -> AppResult<Self> {
        Ok(Self {
            client: ApiClient::new(&args.base_url)?,
            credentials: Credentials::new(args.username.clone(), args.password.clone()),
        })
    }
}

/// Ordered from best to worst so runs can be folded with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    Passed,
    Warned,
    Aborted,
    Inconsistent,
}

impl Verdict {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Passed => "passed",
            Verdict::Warned => "warned",
            Verdict::Aborted => "aborted",
            Verdict::Inconsistent => "inconsistent",
        }
    }

    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Verdict::Aborted | Verdict::Inconsistent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Auth,
    Products,
    Users,
}

impl ProbeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ProbeKind::Auth => "auth",
            ProbeKind::Products => "products",
            ProbeKind::Users => "users",
        }
    }
}

/// Runs the probes selected by the subcommand, in order, and prints a summary.
///
/// # Errors
///
/// Returns an error when the report cannot be written.
pub async fn run_command<W, R>(
    ctx: &ProbeContext,
    command: &Command,
    rng: &mut R,
    out: &mut Reporter<W>,
) -> AppResult<Vec<(ProbeKind, Verdict)>>
where
    W: Write,
    R: Rng + ?Sized,
{
    let mut results = Vec::with_capacity(3);
    match command {
        Command::Auth => {
            results.push((ProbeKind::Auth, run_auth_probe(ctx, out).await?));
        }
        Command::Products(opts) => {
            results.push((ProbeKind::Products, run_product_probe(ctx, opts, out).await?));
        }
        Command::Users(opts) => {
            results.push((ProbeKind::Users, run_user_probe(ctx, opts, rng, out).await?));
        }
        Command::All(opts) => {
            results.push((ProbeKind::Auth, run_auth_probe(ctx, out).await?));
            results.push((
                ProbeKind::Products,
                run_product_probe(ctx, &opts.products, out).await?,
            ));
            results.push((
                ProbeKind::Users,
                run_user_probe(ctx, &opts.users, rng, out).await?,
            ));
        }
    }

    out.heading("Summary")?;
    for (kind, verdict) in &results {
        out.line(format!("{:<8} {}", kind.name(), verdict.label()))?;
    }
    out.flush()?;
    Ok(results)
}
