use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{consts::SIMULATION_KEY_HEADER, transaction_data::TransactionBatch};

/// Client for a transaction simulation service that accepts batch files.
///
/// Simulation is advisory. Callers surface the result and carry on either way.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    endpoint: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// The simulation ran and reported on the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    Passed { url: Option<String>, trace: Option<Value> },
    Reverted { error: String, url: Option<String>, trace: Option<Value> },
}

/// The simulation did not run at all.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Simulation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Simulation service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Unable to parse simulation response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SimulationResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    trace: Option<Value>,
}

impl SimulationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationOutcome::Passed { .. })
    }

    pub fn trace(&self) -> Option<&Value> {
        match self {
            SimulationOutcome::Passed { trace, .. } | SimulationOutcome::Reverted { trace, .. } => {
                trace.as_ref()
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            SimulationOutcome::Passed { url, .. } | SimulationOutcome::Reverted { url, .. } => {
                url.as_deref()
            }
        }
    }
}

impl SimulationClient {
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self { endpoint, api_key, client: reqwest::Client::new() }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts the batch as-is and relays the service verdict.
    pub async fn simulate(
        &self,
        batch: &TransactionBatch,
    ) -> Result<SimulationOutcome, SimulationError> {
        debug!(
            endpoint = %self.endpoint,
            chain_id = %batch.chain_id,
            transactions = batch.transactions.len(),
            "submitting batch for simulation"
        );

        let mut request = self.client.post(self.endpoint.clone()).json(batch);
        if let Some(key) = &self.api_key {
            request = request.header(SIMULATION_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "simulation service rejected the request");
            return Err(SimulationError::Status { status, body });
        }

        let response: SimulationResponse = serde_json::from_str(&body)?;

        if response.success {
            Ok(SimulationOutcome::Passed { url: response.url, trace: response.trace })
        } else {
            Ok(SimulationOutcome::Reverted {
                error: response.error.unwrap_or_else(|| "execution reverted".to_string()),
                url: response.url,
                trace: response.trace,
            })
        }
    }
}
