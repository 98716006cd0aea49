// src/sink/auth.rs

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::SinkError;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The subset of a Google service-account key file we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_json(s: &str) -> Result<Self, SinkError> {
        serde_json::from_str(s)
            .map_err(|e| SinkError::Credentials(format!("service account key: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self, SinkError> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SinkError::Credentials(format!("read {}: {e}", path.display()))
        })?;
        Self::from_json(&s)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JwtClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn jwt_claims(key: &ServiceAccountKey, token_uri: &str, now: i64) -> JwtClaims {
    JwtClaims {
        iss: key.client_email.clone(),
        scope: SHEETS_SCOPE.to_string(),
        aud: token_uri.to_string(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at - REFRESH_MARGIN_SECS
    }
}

#[derive(Debug)]
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    token_uri: String,
    cached: Option<CachedToken>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, token_uri_override: Option<String>) -> Self {
        let token_uri = token_uri_override.unwrap_or_else(|| key.token_uri.clone());
        Self {
            key,
            token_uri,
            cached: None,
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn signed_assertion(&self, now: i64) -> Result<String, SinkError> {
        let claims = jwt_claims(&self.key, &self.token_uri, now);
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| SinkError::Credentials(format!("private key: {e}")))?;
        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SinkError::Credentials(format!("sign assertion: {e}")))
    }

    fn bearer(&mut self, client: &Client, now: i64) -> Result<String, SinkError> {
        if let Some(c) = self.cached.as_ref().filter(|c| c.is_fresh(now)) {
            return Ok(c.token.clone());
        }

        let assertion = self.signed_assertion(now)?;
        let resp = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SinkError::Auth(format!("token endpoint {status}: {body}")));
        }

        let t: TokenResponse = resp.json()?;
        let expires_at = now + t.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        log::debug!(
            "sink: issued access token for {} (expires in {}s)",
            self.key.client_email,
            expires_at - now
        );

        self.cached = Some(CachedToken {
            token: t.access_token.clone(),
            expires_at,
        });
        Ok(t.access_token)
    }
}

#[derive(Debug)]
pub enum TokenSource {
    Static(String),
    ServiceAccount(ServiceAccountAuth),
}

impl TokenSource {
    pub fn bearer(&mut self, client: &Client) -> Result<String, SinkError> {
        match self {
            TokenSource::Static(t) => Ok(t.clone()),
            TokenSource::ServiceAccount(sa) => sa.bearer(client, chrono::Utc::now().timestamp()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TokenSource::Static(_) => "static token".to_string(),
            TokenSource::ServiceAccount(sa) => format!("service account {}", sa.client_email()),
        }
    }
}
