//! Auth Gateway

use serde::{Deserialize, Serialize};

use super::decode;
use crate::error::ApiResult;
use crate::http::{ApiClient, QueryParams};
use crate::models::StaffProfile;

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: StaffProfile,
}

/// Log in and store the token in the client's session
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<StaffProfile> {
    let body = client.post("auth/login", &LoginArgs { email, password }).await?;
    let response: LoginResponse = decode(body)?;
    client.session().login(&response.token);
    log::info!("[AUTH] Logged in as {} ({})", response.user.email, response.user.role);
    Ok(response.user)
}

pub async fn me(client: &ApiClient) -> ApiResult<StaffProfile> {
    decode(client.get("auth/me", QueryParams::new()).await?)
}
