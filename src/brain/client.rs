// Brain client - HTTP communication with inference backend

use super::error::Result;
use super::{BrainConfig, BrainError, BrainInitError, Message, MessageRequest, MessageResponse, Role};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Brain client for LLM inference
#[derive(Clone)]
pub struct Brain {
    config: BrainConfig,
    client: Client,
}

impl Brain {
    /// Create a new Brain instance
    pub fn new(config: BrainConfig) -> std::result::Result<Self, BrainInitError> {
        info!(
            endpoint = %config.endpoint,
            model = %config.default_model,
            timeout_secs = config.request_timeout_secs,
            max_retries = config.max_retries,
            "initializing brain"
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Request for `history` under `system`, cleaned up by [`prepare_messages`]
    pub fn build_request(&self, system: &str, history: &[Message]) -> MessageRequest {
        MessageRequest {
            model: self.config.default_model.clone(),
            system: (!system.is_empty()).then(|| system.to_string()),
            messages: prepare_messages(history),
            max_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Send the conversation and return the model's text reply
    pub async fn complete(&self, system: &str, history: &[Message]) -> Result<String> {
        let request = self.build_request(system, history);
        let response = self.infer(request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(BrainError::EmptyResponse);
        }
        Ok(text)
    }

    /// Perform inference with retries for transient failures
    pub async fn infer(&self, request: MessageRequest) -> Result<MessageResponse> {
        info!(
            model = %request.model,
            messages_count = request.messages.len(),
            has_system = request.system.is_some(),
            max_tokens = request.max_tokens,
            "starting inference"
        );

        let start = Instant::now();
        let mut retries = 0;
        let max_retries = self.config.max_retries;
        let base_delay = Duration::from_millis(self.config.base_retry_delay_ms);

        loop {
            debug!(retry = retries, "sending request to inference backend");
            match self.send_request(&request).await {
                Ok(response) => {
                    let (input_tokens, output_tokens) = response
                        .usage
                        .as_ref()
                        .map(|u| (u.input_tokens, u.output_tokens))
                        .unwrap_or((0, 0));

                    info!(
                        model = %response.model,
                        input_tokens = input_tokens,
                        output_tokens = output_tokens,
                        latency_ms = start.elapsed().as_millis() as u64,
                        retries = retries,
                        stop_reason = ?response.stop_reason,
                        "inference completed successfully"
                    );
                    return Ok(response);
                }
                Err(e) if !e.is_retryable() => {
                    error!(error = %e, "inference failed");
                    return Err(e);
                }
                Err(e) => {
                    retries += 1;
                    if retries > max_retries {
                        error!(
                            retries = retries,
                            total_latency_ms = start.elapsed().as_millis() as u64,
                            error = %e,
                            "inference failed: exhausted retries"
                        );
                        return Err(BrainError::Exhausted {
                            retries,
                            last_error: e.to_string(),
                        });
                    }

                    let delay = backoff_delay(base_delay, retries);
                    warn!(
                        retry = retries,
                        max_retries = max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "inference failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_request(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let url = format!("{}/v1/messages", self.config.endpoint.trim_end_matches('/'));

        debug!(url = %url, "sending HTTP request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", &self.config.api_key))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received HTTP response");

        let body = response.text().await?;
        if status.is_success() {
            debug!(response_preview = %body.chars().take(200).collect::<String>(), "response body received");
            return Ok(serde_json::from_str(&body)?);
        }

        Err(match status.as_u16() {
            401 | 403 => BrainError::AuthenticationFailed(body),
            400 => BrainError::InvalidRequest(body),
            402 => BrainError::InsufficientBalance(body),
            429 => BrainError::RateLimited(body),
            _ if status.is_server_error() => BrainError::ModelError(body),
            _ => BrainError::InvalidRequest(format!("HTTP {}: {}", status, body)),
        })
    }
}

/// Exponential backoff capped at 30 seconds
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let multiplier = 2u64.saturating_pow(retry.saturating_sub(1));
    let delay_ms = (base.as_millis() as u64).saturating_mul(multiplier);
    Duration::from_millis(delay_ms.min(30_000))
}

/// Shape a history for the Messages API: leading assistant messages are
/// dropped and consecutive messages from the same role are merged.
pub fn prepare_messages(history: &[Message]) -> Vec<Message> {
    let mut messages: Vec<Message> = Vec::with_capacity(history.len());
    for message in history
        .iter()
        .skip_while(|m| m.role == Role::Assistant)
    {
        match messages.last_mut() {
            Some(last) if last.role == message.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&message.content);
            }
            _ => messages.push(message.clone()),
        }
    }
    messages
}
