//! Webhook delivery over HTTP(S).
//!
//! The outbound body is the [`envelope`]: fixed `timestamp`/`source` fields
//! plus `event_type`, `severity`, `message` and `metadata`, with the event's
//! own serialised fields spread over the top. The spread goes last, so a
//! pinned event timestamp replaces the dispatch time and the body carries
//! both `event_type` and `type`.

use crate::DeliveryError;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use clawpatrol_core::{config::Config, Event, EventSink, Metadata};
use http_body_util::Full;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use std::time::Duration;

/// Posts events to the collector webhook.
#[derive(Clone)]
pub struct WebhookSink {
    client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    endpoint: Uri,
    source: String,
    timeout: Duration,
}

impl WebhookSink {
    pub fn new(config: &Config) -> Result<Self, DeliveryError> {
        let endpoint: Uri = config.webhook_url.parse()?;

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = HyperClient::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(https);

        Ok(Self {
            client,
            endpoint,
            source: config.source.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Make one delivery attempt and report the outcome.
    pub async fn try_deliver(&self, event: &Event) -> Result<StatusCode, DeliveryError> {
        let body = serde_json::to_vec(&envelope(&self.source, Utc::now(), event)?)?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| DeliveryError::Timeout(self.timeout))??;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }
        Ok(status)
    }
}

impl EventSink for WebhookSink {
    async fn deliver(&self, event: Event) {
        match self.try_deliver(&event).await {
            Ok(status) => tracing::info!(
                status = status.as_u16(),
                "Sent to collector: {} - {}",
                event.event_type,
                event.message
            ),
            Err(e) => tracing::error!(
                event_type = %event.event_type,
                "Failed to send to collector: {e}"
            ),
        }
    }
}

/// Build the wire payload for `event`, stamped with `now` and `source`.
pub fn envelope(
    source: &str,
    now: DateTime<Utc>,
    event: &Event,
) -> Result<Metadata, serde_json::Error> {
    let mut payload = Metadata::new();
    payload.insert(
        "timestamp".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    payload.insert("source".to_string(), Value::String(source.to_string()));
    payload.insert(
        "event_type".to_string(),
        Value::String(event.event_type.to_string()),
    );
    payload.insert(
        "severity".to_string(),
        Value::String(event.severity.to_string()),
    );
    payload.insert("message".to_string(), Value::String(event.message.clone()));
    payload.insert(
        "metadata".to_string(),
        Value::Object(event.metadata.clone()),
    );

    if let Value::Object(fields) = serde_json::to_value(event)? {
        payload.extend(fields);
    }
    Ok(payload)
}
