use super::*;
use crate::args::PositiveU64;
use crate::error::{AppError, AppResult};

fn page(value: u64) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(AppError::from)
}

#[test]
fn url_for_appends_segments_to_versioned_base() -> AppResult<()> {
    let client = ApiClient::new("http://localhost:5000/api/v1")?;
    let url = client.url_for(&Endpoint::Login)?;
    if url.as_str() != "http://localhost:5000/api/v1/identity/login" {
        return Err(AppError::validation(format!("Unexpected login url: {}", url)));
    }
    Ok(())
}

#[test]
fn url_for_tolerates_trailing_slash_on_base() -> AppResult<()> {
    let client = ApiClient::new("http://localhost:5000/api/v1/")?;
    let url = client.url_for(&Endpoint::CreateProduct)?;
    if url.as_str() != "http://localhost:5000/api/v1/catalogs/products" {
        return Err(AppError::validation(format!("Unexpected product url: {}", url)));
    }
    Ok(())
}

#[test]
fn list_endpoints_carry_page_query() -> AppResult<()> {
    let client = ApiClient::new("http://localhost:5000/api/v1")?;
    let url = client.url_for(&Endpoint::ListProducts {
        page: page(1)?,
        page_size: page(10)?,
    })?;
    if url.as_str() != "http://localhost:5000/api/v1/catalogs/products?Page=1&PageSize=10" {
        return Err(AppError::validation(format!("Unexpected list url: {}", url)));
    }
    let users = client.url_for(&Endpoint::ListUsers {
        page: page(2)?,
        page_size: page(50)?,
    })?;
    if users.query() != Some("Page=2&PageSize=50") {
        return Err(AppError::validation(format!("Unexpected users url: {}", users)));
    }
    Ok(())
}

#[test]
fn user_state_path_encodes_identifier() -> AppResult<()> {
    let client = ApiClient::new("http://localhost:5000/api/v1")?;
    let url = client.url_for(&Endpoint::UserState("a b/c".to_owned()))?;
    if url.path() != "/api/v1/identity/users/a%20b%2Fc/state" {
        return Err(AppError::validation(format!("Unexpected state path: {}", url.path())));
    }
    if Endpoint::UserState(String::new()).method() != reqwest::Method::PUT {
        return Err(AppError::validation("Expected PUT for user state"));
    }
    Ok(())
}

#[test]
fn new_rejects_unparseable_base_url() -> AppResult<()> {
    match ApiClient::new("not a url") {
        Err(AppError::Http(_)) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error kind: {}", err))),
        Ok(_) => Err(AppError::validation("Expected invalid base url to fail")),
    }
}

#[test]
fn bearer_token_rejects_blank_and_keeps_value_verbatim() -> AppResult<()> {
    if BearerToken::new("   ").is_some() {
        return Err(AppError::validation("Expected blank token to be rejected"));
    }
    let token = BearerToken::new("aaa.bbb.ccc").ok_or_else(|| AppError::validation("Expected token"))?;
    if token.as_str() != "aaa.bbb.ccc" {
        return Err(AppError::validation(format!("Unexpected token: {}", token)));
    }
    let quoted = BearerToken::new("\"aaa.bbb.ccc\"")
        .ok_or_else(|| AppError::validation("Expected token"))?;
    if quoted.as_str() != "\"aaa.bbb.ccc\"" || quoted.to_string() != "\"aaa.bbb.ccc\"" {
        return Err(AppError::validation(format!("Quoted token was altered: {}", quoted)));
    }
    if !token.looks_like_jwt() {
        return Err(AppError::validation("Expected JWT-shaped token"));
    }
    let opaque = BearerToken::new("opaque").ok_or_else(|| AppError::validation("Expected token"))?;
    if opaque.looks_like_jwt() {
        return Err(AppError::validation("Opaque token should not look like a JWT"));
    }
    if format!("{:?}", opaque).contains("opaque") {
        return Err(AppError::validation("Debug output must not leak the token"));
    }
    Ok(())
}

#[test]
fn state_payload_serializes_numeric_code() -> AppResult<()> {
    let payload = models::UpdateUserStateRequest {
        user_state: crate::args::UserState::Locked,
    };
    let encoded = serde_json::to_string(&payload)?;
    if encoded != r#"{"userState":2}"# {
        return Err(AppError::validation(format!("Unexpected payload: {}", encoded)));
    }
    let login = serde_json::to_string(&models::LoginRequest {
        user_name_or_email: "mehdi@test.com",
        password: "123456",
    })?;
    if login != r#"{"userNameOrEmail":"mehdi@test.com","password":"123456"}"# {
        return Err(AppError::validation(format!("Unexpected login payload: {}", login)));
    }
    Ok(())
}
