use std::io::Write;

use serde_json::Value;

use crate::args::ProductsArgs;
use crate::error::{AppResult, ShapeError};
use crate::http::{ApiResponse, Endpoint};
use crate::shape::{
    DetailVerdict, PRODUCT_ID_KEYS, classify_detail, extract_identifier, resolve_list,
    top_level_keys,
};

use super::report::Reporter;
use super::session::{Session, login, report_login_failure};
use super::{ProbeContext, Verdict};

const PRODUCTS_FIELD: &str = "products";

/// Lists products, picks the first, and fetches it by id.
///
/// # Errors
///
/// Returns an error only when the report cannot be written.
pub async fn run_product_probe<W: Write>(
    ctx: &ProbeContext,
    opts: &ProductsArgs,
    out: &mut Reporter<W>,
) -> AppResult<Verdict> {
    out.heading("Product discovery probe")?;
    out.line(format!(
        "1. Listing Products (page {}, size {})...",
        opts.page, opts.page_size
    ))?;

    let mut session = None;
    let list_endpoint = Endpoint::ListProducts {
        page: opts.page,
        page_size: opts.page_size,
    };
    let Some(listing) = fetch_with_login_fallback(
        ctx,
        &list_endpoint,
        &mut session,
        "Auth required. Logging in...",
        out,
    )
    .await?
    else {
        return Ok(Verdict::Aborted);
    };

    if !listing.is_success() {
        tracing::warn!("Product listing returned status {}", listing.status);
        out.line(format!(
            "Error: listing returned status {}",
            listing.status_code()
        ))?;
        out.line(format!("Response: {}", listing.body))?;
        return Ok(Verdict::Aborted);
    }

    let body = match listing.json() {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!("Product listing unreadable: {}", err);
            out.line(format!("Error: {}", err))?;
            out.line(format!("Response: {}", listing.body))?;
            return Ok(Verdict::Aborted);
        }
    };
    out.line(format!(
        "List response: {}",
        serde_json::to_string_pretty(&body)?
    ))?;
    out.line(format!(
        "List response keys: [{}]",
        top_level_keys(&body).join(", ")
    ))?;

    let Some(target_id) = select_target(&body, out)? else {
        return Ok(Verdict::Warned);
    };

    out.line(format!(
        "2. Fetching Product Details (GetProductById) for ID: {}...",
        target_id
    ))?;
    let detail_endpoint = Endpoint::ProductById(target_id.clone());
    let Some(detail) = fetch_with_login_fallback(
        ctx,
        &detail_endpoint,
        &mut session,
        "Auth required for details.",
        out,
    )
    .await?
    else {
        return Ok(Verdict::Aborted);
    };
    out.response("", &detail)?;

    let verdict = match classify_detail(detail.status, &detail.body) {
        DetailVerdict::Found => {
            out.line("SUCCESS: Product details fetched.")?;
            Verdict::Passed
        }
        DetailVerdict::NotFoundAfterListing => {
            tracing::error!("Product {} listed but not fetchable", target_id);
            out.line(format!(
                "FATAL: Product {} found in list but returned 404 on details.",
                target_id
            ))?;
            Verdict::Inconsistent
        }
        DetailVerdict::UnexpectedStructure { keys } => {
            tracing::warn!("Product {} detail has unexpected keys [{}]", target_id, keys.join(", "));
            out.line(format!(
                "WARNING: 200 OK but response structure unexpected: [{}]",
                keys.join(", ")
            ))?;
            Verdict::Warned
        }
        DetailVerdict::UnreadableBody => {
            tracing::warn!("Product {} detail body is not JSON", target_id);
            out.line("WARNING: 200 OK but response body is not JSON.")?;
            Verdict::Warned
        }
        DetailVerdict::UnexpectedStatus(code) => {
            tracing::warn!("Product {} detail returned status {}", target_id, code);
            out.line(format!(
                "WARNING: Unexpected status {} fetching product details.",
                code
            ))?;
            Verdict::Warned
        }
    };
    Ok(verdict)
}

/// Resolves the listing and extracts the first product's id, reporting why not.
fn select_target<W: Write>(body: &Value, out: &mut Reporter<W>) -> AppResult<Option<String>> {
    let resolved = match resolve_list(body, PRODUCTS_FIELD) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!("{}", err);
            out.line(format!("No products found in list (could not parse: {}).", err))?;
            return Ok(None);
        }
    };
    out.line(format!(
        "Found product list: {} ({} records).",
        resolved.shape,
        resolved.records.len()
    ))?;

    let Some(target) = resolved.first() else {
        out.line("No products found in list.")?;
        return Ok(None);
    };
    let Some(target_id) = extract_identifier(target, &PRODUCT_ID_KEYS) else {
        let err = ShapeError::MissingIdentifier {
            candidates: PRODUCT_ID_KEYS.join(", "),
        };
        tracing::warn!("{}", err);
        out.line(format!("Could not determine ID from product object: {}", err))?;
        return Ok(None);
    };
    out.line(format!("Targeting Product ID: {}", target_id))?;
    Ok(Some(target_id))
}

/// Sends anonymously; on 401 retries once with a token, logging in only if
/// `session` is still empty. `None` means the failure was already reported.
async fn fetch_with_login_fallback<W: Write>(
    ctx: &ProbeContext,
    endpoint: &Endpoint,
    session: &mut Option<Session>,
    auth_notice: &str,
    out: &mut Reporter<W>,
) -> AppResult<Option<ApiResponse>> {
    let response = match ctx.client.send(endpoint, None).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("{}", err);
            out.line(format!("Error: {}", err))?;
            return Ok(None);
        }
    };
    if !response.is_unauthorized() {
        return Ok(Some(response));
    }

    out.line(auth_notice)?;
    if session.is_none() {
        match login(&ctx.client, &ctx.credentials).await {
            Ok(fresh) => *session = Some(fresh),
            Err(failure) => {
                report_login_failure(out, &failure)?;
                return Ok(None);
            }
        }
    }
    let token = session.as_ref().map(|active| &active.token);
    match ctx.client.send(endpoint, token).await {
        Ok(retried) => Ok(Some(retried)),
        Err(err) => {
            tracing::warn!("Retry with token failed: {}", err);
            out.line(format!("Error: {}", err))?;
            Ok(None)
        }
    }
}
