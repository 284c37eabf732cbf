// src/services/session.rs

//! Authenticated session against the Twitter REST API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials};
use crate::services::oauth::{OAuthSigner, percent_encode};
use crate::utils::{endpoint_url, http};

const VERIFY_CREDENTIALS_PATH: &str = "1.1/account/verify_credentials.json";

/// Live API session: an HTTP client plus an OAuth signer.
pub struct TwitterSession {
    client: Client,
    base_url: String,
    signer: OAuthSigner,
}

impl TwitterSession {
    /// Open a session with the given credentials.
    ///
    /// Malformed credentials are rejected locally. When
    /// `api.verify_credentials` is set, the credentials are also checked
    /// against the API and a rejection is returned as [`AppError::Auth`].
    pub async fn open(credentials: &Credentials, api: &ApiConfig) -> Result<Self> {
        log::info!("Open connection to Twitter ...");
        check_credentials(credentials)?;

        let session = Self {
            client: http::create_client(api)?,
            base_url: api.base_url.clone(),
            signer: OAuthSigner::new(credentials),
        };

        if api.verify_credentials {
            let account = session.verify_credentials().await?;
            log::info!("... connection opened as @{}", account.screen_name);
        } else {
            log::info!("... connection opened");
        }
        Ok(session)
    }

    /// Fetch the account the access credentials belong to.
    ///
    /// A 401 here means the credentials were rejected and is returned as
    /// [`AppError::Auth`].
    pub async fn verify_credentials(&self) -> Result<Account> {
        match self.get(VERIFY_CREDENTIALS_PATH, &[]).await {
            Err(AppError::Api { status, message })
                if status == StatusCode::UNAUTHORIZED.as_u16() =>
            {
                Err(AppError::auth(message))
            }
            other => other,
        }
    }

    /// Signed GET request decoding a JSON response body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let mut url = endpoint_url(&self.base_url, path)?;
        let auth_header = self.signer.sign("GET", url.as_str(), params)?;

        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }

        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, auth_header)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Subset of the account returned by credential verification.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Account {
    pub screen_name: String,
}

/// Reject credentials that could never be valid.
fn check_credentials(credentials: &Credentials) -> Result<()> {
    let fields = [
        ("consumer_key", &credentials.consumer_key),
        ("consumer_secret", &credentials.consumer_secret),
        ("access_key", &credentials.access_key),
        ("access_secret", &credentials.access_secret),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            return Err(AppError::auth(format!("{name} is empty")));
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::auth(format!(
                "{name} contains whitespace or control characters"
            )));
        }
    }
    Ok(())
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes)?);
    }

    Err(AppError::Api {
        status: status.as_u16(),
        message: error_message(&bytes),
    })
}

/// Extract the first message of a v1.1 `{"errors": [...]}` payload.
fn error_message(bytes: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        errors: Vec<ErrorItem>,
        #[serde(default)]
        error: Option<String>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorItem {
        message: String,
        #[serde(default)]
        code: Option<i64>,
    }

    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => match body.errors.into_iter().next() {
            Some(ErrorItem {
                message,
                code: Some(code),
            }) => format!("{message} (code {code})"),
            Some(item) => item.message,
            None => body.error.unwrap_or_else(|| "Unknown error".into()),
        },
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
