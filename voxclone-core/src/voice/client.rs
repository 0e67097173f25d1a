use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, error, info};

use super::credentials::Credentials;
use super::error::VoiceError;

pub const DEFAULT_BASE_URL: &str = "https://api.play.ht/api/v2";

#[derive(Debug, Clone)]
pub struct PlayHtConfig {
    pub credentials: Credentials,
    pub base_url: String,
}

impl PlayHtConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Authenticated HTTP plumbing shared by the cloner, lister and generator.
#[derive(Clone)]
pub struct PlayHtClient {
    client: Client,
    config: PlayHtConfig,
}

impl PlayHtClient {
    pub fn new(config: PlayHtConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let credentials = &self.config.credentials;
        self.client
            .request(method, self.url(path))
            .header("X-User-ID", credentials.user_id())
            .header(
                "Authorization",
                format!("Bearer {}", credentials.api_key()),
            )
    }

    /// Sends a request and logs the transport-level outcome. Status handling
    /// is left to the caller.
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Response, VoiceError> {
        let response = builder.send().await.map_err(|e| {
            error!(operation, error = %e, "Play.ht request failed");
            VoiceError::Transport(e)
        })?;

        info!(operation, status = %response.status(), "Play.ht response status");
        info!(operation, headers = ?response.headers(), "Play.ht response headers");

        Ok(response)
    }

    /// Consumes a non-success response into its classified error, logging the
    /// body for diagnostics.
    pub(crate) async fn error_from_response(
        operation: &'static str,
        response: Response,
    ) -> VoiceError {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(operation, error = %e, "Failed to read error body");
                String::new()
            }
        };

        let err = VoiceError::from_status(status, body);
        error!(operation, %status, kind = err.kind(), body = ?error_body(&err), "Play.ht returned an error");
        err
    }
}

fn error_body(err: &VoiceError) -> &str {
    match err {
        VoiceError::Auth { body }
        | VoiceError::Permission { body }
        | VoiceError::UnexpectedStatus { body, .. } => body,
        _ => "",
    }
}
