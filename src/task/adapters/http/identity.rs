//! HTTP client for the identity service's private user lookup.
//!
//! The identity service answers `GET /users/private/{id}` with the user
//! record, or 404 when the user does not exist. Users are soft-deleted or
//! banned rather than erased, so a record whose `userStatus` is `BANNED` or
//! `DELETED` is reported as not found as well. Every other outcome is a
//! transport failure and is never folded into "not found".

use crate::config::IdentityConfig;
use crate::task::{
    domain::UserId,
    ports::{IdentityError, IdentityResult, IdentityValidator, UserLookup},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Identity validator backed by the identity service's REST API.
#[derive(Debug, Clone)]
pub struct HttpIdentityValidator {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpIdentityValidator {
    /// Creates a validator for the service at `base_url`.
    ///
    /// `timeout` bounds each request end to end.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> IdentityResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("task-engine/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(IdentityError::transport)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Creates a validator from the `identity` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &IdentityConfig) -> IdentityResult<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Returns the lookup URL for `user_id`.
    #[must_use]
    pub fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/private/{user_id}", self.base_url)
    }
}

#[async_trait]
impl IdentityValidator for HttpIdentityValidator {
    async fn check(&self, user_id: UserId) -> IdentityResult<UserLookup> {
        let response = self
            .http
            .get(self.user_url(user_id))
            .send()
            .await
            .map_err(|err| self.request_error(user_id, err))?;
        classify_response(user_id, response).await
    }
}

impl HttpIdentityValidator {
    fn request_error(&self, user_id: UserId, err: reqwest::Error) -> IdentityError {
        if err.is_timeout() {
            return IdentityError::Timeout {
                user_id,
                timeout: self.timeout,
            };
        }
        IdentityError::transport(err)
    }
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(rename = "userStatus")]
    user_status: Option<String>,
}

/// Maps an identity service response onto a lookup outcome.
async fn classify_response(
    user_id: UserId,
    response: reqwest::Response,
) -> IdentityResult<UserLookup> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(UserLookup::NotFound);
    }
    if !status.is_success() {
        return Err(IdentityError::UnexpectedStatus {
            user_id,
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(IdentityError::transport)?;
    Ok(lookup_from_body(&body))
}

/// A successful answer proves existence; only an explicit unusable status
/// overrides it.
fn lookup_from_body(body: &[u8]) -> UserLookup {
    match serde_json::from_slice::<UserRecord>(body) {
        Ok(UserRecord {
            user_status: Some(status),
        }) if is_unusable_status(&status) => UserLookup::NotFound,
        _ => UserLookup::Usable,
    }
}

fn is_unusable_status(status: &str) -> bool {
    matches!(
        status.trim().to_ascii_uppercase().as_str(),
        "BANNED" | "DELETED"
    )
}
