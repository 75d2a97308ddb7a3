//! Client for the prediction backend.

use crate::errors::SubmitError;
use crate::extract::Record;
use crate::options::PredictionOption;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PREDICTIONS_PATH: &str = "get_predictions";

/// JSON body posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub data: Vec<Record>,
    pub options: Vec<PredictionOption>,
}

impl PredictionRequest {
    pub fn new(data: Vec<Record>, options: Vec<PredictionOption>) -> Result<Self, SubmitError> {
        if data.is_empty() {
            return Err(SubmitError::NoData);
        }
        if options.is_empty() {
            return Err(SubmitError::NoOptions);
        }
        Ok(Self { data, options })
    }
}

/// Backend answer. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub status: String,
    pub total_processed: usize,
    pub successful: usize,
    pub errors: usize,
    pub results: Vec<serde_json::Value>,
    pub error_details: Option<Vec<String>>,
}

pub struct PredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), PREDICTIONS_PATH)
    }

    /// Post the request; any non-success status is an error.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, SubmitError> {
        let url = self.endpoint();
        debug!(
            "Posting {} rows with options {:?} to {url}",
            request.data.len(),
            request.options
        );
        let resp = self.client.post(&url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read the error body: {e}");
                    String::new()
                }
            };
            debug!("Backend returned {status}: {body}");
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }
}
