use std::io::Write;

use rand::Rng;

use crate::args::{PositiveU64, UserState, UsersArgs};
use crate::error::{AppResult, ShapeError};
use crate::http::models::UpdateUserStateRequest;
use crate::http::{ApiResponse, Endpoint};
use crate::shape::{
    REGISTERED_USER_ID_PATHS, extract_identifier, find_identifier_at_paths, find_record_by_field,
    resolve_list,
};

use super::report::Reporter;
use super::session::{Session, login, report_login_failure};
use super::synthetic::SyntheticUser;
use super::{ProbeContext, Verdict};

const USERS_FIELD: &str = "identityUsers";
const USER_ID_KEYS: [&str; 3] = ["id", "userId", "Id"];

const LOCKED: UpdateUserStateRequest = UpdateUserStateRequest {
    user_state: UserState::Locked,
};

/// Registers a throwaway user, locks it, then tries to lock the admin account.
///
/// # Errors
///
/// Returns an error only when the report cannot be written.
pub async fn run_user_probe<W, R>(
    ctx: &ProbeContext,
    opts: &UsersArgs,
    rng: &mut R,
    out: &mut Reporter<W>,
) -> AppResult<Verdict>
where
    W: Write,
    R: Rng + ?Sized,
{
    out.heading("User lifecycle probe")?;
    out.line(format!("Logging in as Admin ({})...", ctx.credentials.username))?;
    let session = match login(&ctx.client, &ctx.credentials).await {
        Ok(session) => session,
        Err(failure) => {
            report_login_failure(out, &failure)?;
            return Ok(Verdict::Aborted);
        }
    };
    out.line("Login successful. Token obtained.")?;

    let mut verdict = match SyntheticUser::generate(rng) {
        Ok(user) => register_and_lock(ctx, opts, &session, &user, out).await?,
        Err(err) => {
            tracing::warn!("Could not build test user: {}", err);
            out.line(format!("Could not build test user: {}", err))?;
            Verdict::Warned
        }
    };

    // Runs regardless of the registration outcome.
    out.line(format!(
        "Attempting to update Admin state (ID: {})...",
        opts.admin_user_id
    ))?;
    match ctx
        .client
        .send_json(
            &Endpoint::UserState(opts.admin_user_id.clone()),
            Some(&session.token),
            &LOCKED,
        )
        .await
    {
        Ok(response) => out.response("Update ", &response)?,
        Err(err) => {
            tracing::warn!("Admin state update request failed: {}", err);
            out.line(format!("Update request failed: {}", err))?;
            verdict = verdict.max(Verdict::Warned);
        }
    }

    Ok(verdict)
}

async fn register_and_lock<W: Write>(
    ctx: &ProbeContext,
    opts: &UsersArgs,
    session: &Session,
    user: &SyntheticUser,
    out: &mut Reporter<W>,
) -> AppResult<Verdict> {
    out.line(format!("Registering test user: {}", user.email()))?;
    let registration = match ctx
        .client
        .send_json(&Endpoint::RegisterUser, None, &user.registration())
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("Registration request failed: {}", err);
            out.line(format!("Registration failed: {}", err))?;
            return Ok(Verdict::Warned);
        }
    };
    if !registration.is_success() {
        tracing::warn!("Registration rejected with status {}", registration.status);
        out.line(format!(
            "Registration failed: status {}",
            registration.status_code()
        ))?;
        out.line(&registration.body)?;
        return Ok(Verdict::Warned);
    }
    out.line("Registration successful.")?;
    out.line(format!("Registration Response: {}", registration.body))?;

    let Some(user_id) = locate_user_id(ctx, opts, session, user, &registration, out).await? else {
        tracing::warn!("No id for {}; state update skipped", user.email());
        out.line("Could not determine the test user's ID; skipping state update.")?;
        return Ok(Verdict::Warned);
    };
    out.line(format!("Test User ID: {}", user_id))?;

    out.line(format!(
        "Attempting to update Test User state (ID: {})...",
        user_id
    ))?;
    let verdict = match ctx
        .client
        .send_json(&Endpoint::UserState(user_id), Some(&session.token), &LOCKED)
        .await
    {
        Ok(response) if response.is_success() => {
            out.line(format!(
                "Successfully updated Test User state to {}.",
                UserState::Locked.label()
            ))?;
            Verdict::Passed
        }
        Ok(response) => {
            tracing::warn!("Test user state update returned status {}", response.status);
            out.line(format!(
                "Failed to update Test User state: status {}",
                response.status_code()
            ))?;
            out.line(&response.body)?;
            Verdict::Warned
        }
        Err(err) => {
            tracing::warn!("Test user state update failed: {}", err);
            out.line(format!("Failed to update Test User state: {}", err))?;
            Verdict::Warned
        }
    };
    Ok(verdict)
}

/// Looks in the registration body first, then in the user listing by email.
async fn locate_user_id<W: Write>(
    ctx: &ProbeContext,
    opts: &UsersArgs,
    session: &Session,
    user: &SyntheticUser,
    registration: &ApiResponse,
    out: &mut Reporter<W>,
) -> AppResult<Option<String>> {
    match registration.json() {
        Ok(body) => {
            if let Some((id, path)) = find_identifier_at_paths(&body, &REGISTERED_USER_ID_PATHS) {
                tracing::debug!("User id found at {}", path);
                return Ok(Some(id));
            }
            let err = ShapeError::UserIdNotFound {
                paths: joined_paths(),
            };
            out.line(format!("Registration response: {}", err))?;
        }
        Err(err) => {
            out.line(format!("Registration response unreadable: {}", err))?;
        }
    }

    out.line(format!(
        "Looking up {} in the user listing...",
        user.email()
    ))?;
    let listing = match ctx
        .client
        .send(
            &Endpoint::ListUsers {
                page: PositiveU64::MIN,
                page_size: opts.lookup_page_size,
            },
            Some(&session.token),
        )
        .await
    {
        Ok(response) if response.is_success() => response,
        Ok(response) => {
            tracing::warn!("User listing returned status {}", response.status);
            out.line(format!(
                "User listing failed: status {}",
                response.status_code()
            ))?;
            return Ok(None);
        }
        Err(err) => {
            tracing::warn!("User listing request failed: {}", err);
            out.line(format!("User listing failed: {}", err))?;
            return Ok(None);
        }
    };

    let body = match listing.json() {
        Ok(body) => body,
        Err(err) => {
            out.line(format!("User listing unreadable: {}", err))?;
            return Ok(None);
        }
    };
    let resolved = match resolve_list(&body, USERS_FIELD) {
        Ok(resolved) => resolved,
        Err(err) => {
            out.line(format!("User listing unreadable: {}", err))?;
            return Ok(None);
        }
    };
    let found = find_record_by_field(resolved.records, "email", user.email())
        .and_then(|record| extract_identifier(record, &USER_ID_KEYS));
    if found.is_none() {
        out.line(format!(
            "{} not found among {} listed users.",
            user.email(),
            resolved.records.len()
        ))?;
    }
    Ok(found)
}

fn joined_paths() -> String {
    REGISTERED_USER_ID_PATHS
        .iter()
        .map(|path| path.join("."))
        .collect::<Vec<_>>()
        .join(", ")
}
