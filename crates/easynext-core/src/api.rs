//! License API client for easynext.org
//!
//! Two endpoints back the premium flow: token exchange at login, and signed
//! download URL issuance for gated templates. Responses are shape-validated;
//! anything unexpected is treated as a rejection, never parsed further.

use serde::Deserialize;
use url::Url;

use crate::error::ApiError;
use crate::USER_AGENT;

pub const DEFAULT_API_BASE: &str = "https://easynext.org";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "EASYNEXT_API_URL";

pub const PREMIUM_GUIDE_URL: &str = "https://easynext.org/premium/guide";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TemplateUrlResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    download_url: Option<String>,
}

pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { base, client }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        let raw = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let base = Url::parse(&raw).map_err(|_| ApiError::InvalidBaseUrl(raw))?;
        Ok(Self::new(base))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))
    }

    /// Exchange a user token for a premium access token
    pub async fn cli_login(&self, token: &str) -> Result<String, ApiError> {
        let url = self.endpoint("/api/premium/cli-login")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;
        let body: LoginResponse = response.json().await.map_err(|_| ApiError::InvalidResponse)?;
        match body {
            LoginResponse {
                success: true,
                access_token: Some(access_token),
            } => Ok(access_token),
            _ => Err(ApiError::Rejected),
        }
    }

    /// Request a signed download URL for a premium template
    pub async fn template_url(&self, token: &str, template_name: &str) -> Result<String, ApiError> {
        let url = self.endpoint("/api/premium/template-url")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "token": token,
                "template_name": template_name,
            }))
            .send()
            .await?;
        let body: TemplateUrlResponse =
            response.json().await.map_err(|_| ApiError::InvalidResponse)?;
        match body {
            TemplateUrlResponse {
                success: true,
                download_url: Some(download_url),
            } => Ok(download_url),
            _ => Err(ApiError::Rejected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_shape() {
        let ok: LoginResponse =
            serde_json::from_str(r#"{"success":true,"access_token":"abc"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.access_token.as_deref(), Some("abc"));

        // error bodies from the server carry neither field
        let err: LoginResponse =
            serde_json::from_str(r#"{"error":"invalid","code":"TOKEN_NOT_FOUND"}"#).unwrap();
        assert!(!err.success);
        assert!(err.access_token.is_none());
    }

    #[test]
    fn template_url_response_shape() {
        let ok: TemplateUrlResponse =
            serde_json::from_str(r#"{"success":true,"download_url":"https://cdn/x.zip"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.download_url.as_deref(), Some("https://cdn/x.zip"));

        let partial: TemplateUrlResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(partial.download_url.is_none());
    }
}
