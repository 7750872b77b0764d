//! Client for the generation endpoint

use reqwest::Client;
use text3d_engine::params::{GenerateRequest, ModelDescriptor};

use crate::server::{ErrorResponse, GenerateResponse};

/// Generation request failures
///
/// None of these are retried; the caller logs and moves on.
#[derive(thiserror::Error, Debug)]
pub enum MalformedRequestError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The endpoint answered with a non-OK status
    #[error("Server returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the body, or the status text
        message: String,
    },

    /// The response body was not a descriptor
    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Posts submissions to a running parameter service
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    base_url: String,
}

impl GenerationClient {
    /// Client for the service at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit `request` and return the normalized descriptor
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<ModelDescriptor, MalformedRequestError> {
        let url = format!("{}/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                log::error!("Generation request to {} failed: {}", url, err);
                MalformedRequestError::Network(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            log::error!("Generation request rejected ({}): {}", status, message);
            return Err(MalformedRequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map(|body| body.model_data)
            .map_err(MalformedRequestError::Decode)
    }
}
