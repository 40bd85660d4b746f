use std::io::Write;

use crate::error::AppResult;
use crate::http::Endpoint;
use crate::http::models::CreateProductRequest;

use super::report::Reporter;
use super::session::{login, report_login_failure};
use super::{ProbeContext, Verdict};

/// Logs in, then attempts one admin-only write and prints whatever comes back.
///
/// # Errors
///
/// Returns an error only when the report cannot be written.
pub async fn run_auth_probe<W: Write>(
    ctx: &ProbeContext,
    out: &mut Reporter<W>,
) -> AppResult<Verdict> {
    out.heading("Authentication probe")?;
    out.line(format!("Logging in as {}...", ctx.credentials.username))?;

    let session = match login(&ctx.client, &ctx.credentials).await {
        Ok(session) => session,
        Err(failure) => {
            report_login_failure(out, &failure)?;
            return Ok(Verdict::Aborted);
        }
    };
    out.line(format!("Login successful. Token obtained: {}", session.token))?;

    let mut verdict = Verdict::Passed;
    if !session.token.looks_like_jwt() {
        out.line("WARNING: Token does not look like a JWT (expected header.payload.signature).")?;
        verdict = Verdict::Warned;
    }

    out.line("")?;
    out.line("Attempting Admin Action (Create Product)...")?;
    let payload = CreateProductRequest::debug_product();
    match ctx
        .client
        .send_json(&Endpoint::CreateProduct, Some(&session.token), &payload)
        .await
    {
        Ok(response) => out.response("", &response)?,
        Err(err) => {
            out.line(format!("Request failed: {}", err))?;
            verdict = verdict.max(Verdict::Warned);
        }
    }

    Ok(verdict)
}
