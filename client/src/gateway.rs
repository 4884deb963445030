//! Request gateway for the FitLife backend
//!
//! Every resource client goes through the [`Gateway`] trait: auth header
//! injection, JSON/multipart payloads, and uniform error translation live
//! here so the callers stay thin.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use error_types::{ClientError, Result};
use token_store::TokenStore;

/// Successful response body.
///
/// A 204 response, or any successful `DELETE`, yields [`ApiBody::Empty`]
/// rather than a parsed body.
#[derive(Debug, Clone)]
pub enum ApiBody {
    Json(Value),
    Empty,
}

impl ApiBody {
    /// Unwrap the JSON body, failing when the server sent none.
    pub fn into_json(self) -> Result<Value> {
        match self {
            ApiBody::Json(value) => Ok(value),
            ApiBody::Empty => Err(ClientError::Decode(
                "expected a response body, got none".to_string(),
            )),
        }
    }
}

/// Owned multipart payload, independent of any transport type so mocks can
/// inspect it.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

#[derive(Debug, Clone)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// First text field with the given name, for assertions in tests.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| match field {
            FormField::Text { name: n, .. } | FormField::File { name: n, .. } => n == name,
        })
    }

    fn into_multipart(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for field in self.fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let part = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|err| {
                            ClientError::Validation(format!("invalid content type: {err}"))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Transport contract the resource clients rely on.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue a request with an optional JSON body.
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiBody>;

    /// Issue a request with a multipart form body; the content type is left
    /// to the transport.
    async fn send_form(&self, method: Method, path: &str, form: FormPayload) -> Result<ApiBody>;
}

/// HTTP gateway over `reqwest`.
///
/// A bearer credential from the token store is injected into every request
/// when one is present and unexpired; the store itself enforces expiry.
pub struct HttpGateway {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            tokens,
        }
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<ApiBody> {
        debug!(%method, path, "dispatching request");
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            if status == StatusCode::NO_CONTENT || *method == Method::DELETE {
                return Ok(ApiBody::Empty);
            }
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.contains("application/json"))
                .unwrap_or(false);
            if is_json {
                return Ok(ApiBody::Json(response.json().await?));
            }
            let text = response.text().await?;
            if text.is_empty() {
                return Ok(ApiBody::Empty);
            }
            return Ok(ApiBody::Json(Value::String(text)));
        }

        let reason = status.canonical_reason().unwrap_or("Request failed");
        let body = response.text().await.unwrap_or_default();
        let err = translate_error(status.as_u16(), reason, &body);
        warn!(%method, path, status = status.as_u16(), "request failed: {err}");
        Err(err)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiBody> {
        let mut request = self.builder(method.clone(), path);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.dispatch(request, &method, path).await
    }

    async fn send_form(&self, method: Method, path: &str, form: FormPayload) -> Result<ApiBody> {
        let request = self
            .builder(method.clone(), path)
            .multipart(form.into_multipart()?);
        self.dispatch(request, &method, path).await
    }
}

/// Build the error for a non-success status: the server-provided message
/// when present (`error`, then `detail`), else a status-derived one.
pub fn translate_error(status: u16, reason: &str, body: &str) -> ClientError {
    let server_message = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("error")
            .or_else(|| value.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    let message = server_message.unwrap_or_else(|| format!("Error {status}: {reason}"));
    match status {
        404 => ClientError::NotFound(message),
        _ => ClientError::Http { status, message },
    }
}
