// crates/petstore-client/src/client.rs
// ============================================================================
// Module: API Client
// Description: Request builder and dispatcher for pet-store endpoints.
// Purpose: Send one exchange per call and record it in a shared transcript.
// Dependencies: reqwest, serde, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`ApiClient`] owns the HTTP connection pool and the exchange transcript.
//! Each exchange starts from [`ApiClient::request`], which returns a
//! [`RequestSpec`] builder: headers, query and path parameters, and at most
//! one body are attached, then [`RequestSpec::send`] dispatches exactly one
//! request and captures the full response.
//!
//! Bodies are sent verbatim. Malformed JSON text is a first-class body kind
//! because several scenarios check how the service treats it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::PetstoreError;
use crate::path::PathTemplate;
use crate::response::ApiResponse;

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position within the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path and query, relative to the host.
    pub path: String,
    /// Request body summary.
    pub request: Value,
    /// Response status when a response arrived.
    pub status: Option<u16>,
    /// Decoded response body (JSON when parseable, text otherwise).
    pub response: Value,
    /// Dispatch error when no response arrived.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Pet-store HTTP client with transcript capture.
///
/// Clones share the connection pool and the transcript.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base address every path template is appended to.
    base_url: Url,
    /// Underlying HTTP client.
    http: Client,
    /// Exchanges recorded so far.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl ApiClient {
    /// Creates a client from an existing reqwest client.
    #[must_use]
    pub fn with_http_client(base_url: Url, http: Client) -> Self {
        Self {
            base_url,
            http,
            transcript: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts building a request.
    #[must_use]
    pub fn request(&self) -> RequestSpec<'_> {
        RequestSpec {
            client: self,
            headers: Vec::new(),
            query: Vec::new(),
            path_params: BTreeMap::new(),
            body: None,
            pending_error: None,
        }
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Appends an exchange to the transcript.
    fn record(
        &self,
        method: &Method,
        url: &Url,
        request: Value,
        outcome: Result<(u16, Value), String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        let (status, response, error) = match outcome {
            Ok((status, body)) => (Some(status), body, None),
            Err(err) => (None, Value::Null, Some(err)),
        };
        guard.push(TranscriptEntry {
            sequence,
            method: method.to_string(),
            path: relative_path(url),
            request,
            status,
            response,
            error,
        });
    }
}

// ============================================================================
// SECTION: Request Builder
// ============================================================================

/// Request body variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document sent as `application/json`.
    Json(Value),
    /// Verbatim text with an explicit content type.
    Raw {
        /// Content type header value.
        content_type: String,
        /// Body text.
        text: String,
    },
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// Single-file `multipart/form-data` upload.
    Multipart {
        /// Form field name.
        field: String,
        /// File name reported to the server.
        file_name: String,
        /// File contents.
        contents: Vec<u8>,
    },
}

impl RequestBody {
    /// Summarizes the body for the transcript.
    fn summary(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Raw {
                text, ..
            } => Value::String(text.clone()),
            Self::Form(fields) => Value::Object(
                fields.iter().map(|(name, value)| (name.clone(), Value::String(value.clone()))).collect(),
            ),
            Self::Multipart {
                field,
                file_name,
                contents,
            } => serde_json::json!({
                "field": field,
                "file_name": file_name,
                "bytes": contents.len(),
            }),
        }
    }
}

/// Builder for a single exchange.
#[derive(Debug)]
pub struct RequestSpec<'a> {
    /// Client that dispatches the request.
    client: &'a ApiClient,
    /// Extra headers in insertion order.
    headers: Vec<(String, String)>,
    /// Query parameters in insertion order.
    query: Vec<(String, String)>,
    /// Path placeholder values.
    path_params: BTreeMap<String, String>,
    /// Optional body.
    body: Option<RequestBody>,
    /// First builder error, reported at send time.
    pending_error: Option<PetstoreError>,
}

impl RequestSpec<'_> {
    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets a path placeholder value.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: impl ToString) -> Self {
        self.path_params.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets a JSON body from any serializable value.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.body(RequestBody::Json(value)),
            Err(err) => self.fail(PetstoreError::Request(format!("json body encoding failed: {err}"))),
        }
    }

    /// Sets verbatim JSON text, which may be deliberately malformed.
    #[must_use]
    pub fn raw_json(self, text: &str) -> Self {
        self.body(RequestBody::Raw {
            content_type: "application/json".to_string(),
            text: text.to_string(),
        })
    }

    /// Adds a form field, switching the body to form encoding.
    #[must_use]
    pub fn form_param(mut self, name: &str, value: &str) -> Self {
        let pair = (name.to_string(), value.to_string());
        if let Some(RequestBody::Form(fields)) = &mut self.body {
            fields.push(pair);
            return self;
        }
        if self.body.is_some() {
            return self.fail(PetstoreError::Request(
                "form fields cannot be mixed with another body".to_string(),
            ));
        }
        self.body = Some(RequestBody::Form(vec![pair]));
        self
    }

    /// Attaches a single file as a multipart upload.
    #[must_use]
    pub fn multipart_file(self, field: &str, file_name: &str, contents: &[u8]) -> Self {
        self.body(RequestBody::Multipart {
            field: field.to_string(),
            file_name: file_name.to_string(),
            contents: contents.to_vec(),
        })
    }

    /// Dispatches `GET path`.
    ///
    /// # Errors
    ///
    /// See [`RequestSpec::send`].
    pub async fn get(self, path: &str) -> Result<ApiResponse, PetstoreError> {
        self.send(Method::GET, path).await
    }

    /// Dispatches `POST path`.
    ///
    /// # Errors
    ///
    /// See [`RequestSpec::send`].
    pub async fn post(self, path: &str) -> Result<ApiResponse, PetstoreError> {
        self.send(Method::POST, path).await
    }

    /// Dispatches `PUT path`.
    ///
    /// # Errors
    ///
    /// See [`RequestSpec::send`].
    pub async fn put(self, path: &str) -> Result<ApiResponse, PetstoreError> {
        self.send(Method::PUT, path).await
    }

    /// Dispatches `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`RequestSpec::send`].
    pub async fn delete(self, path: &str) -> Result<ApiResponse, PetstoreError> {
        self.send(Method::DELETE, path).await
    }

    /// Dispatches the request and reads the full response.
    ///
    /// Any HTTP status is a successful dispatch; status checks belong to
    /// [`ApiResponse`] expectations.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] for a malformed path template and
    /// [`PetstoreError::Request`] when a builder step failed, a path
    /// parameter is missing, or the exchange could not complete.
    pub async fn send(self, method: Method, path: &str) -> Result<ApiResponse, PetstoreError> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }
        let template = PathTemplate::parse(path)?;
        let url = template.render(&self.client.base_url, &self.path_params)?;
        let request_summary = self.body.as_ref().map_or(Value::Null, RequestBody::summary);

        let mut builder = self.client.http.request(method.clone(), url.clone());
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match self.body {
            None => builder,
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Raw {
                content_type,
                text,
            }) => {
                if self.headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type")) {
                    builder.body(text)
                } else {
                    builder.header(CONTENT_TYPE, content_type).body(text)
                }
            }
            Some(RequestBody::Form(fields)) => builder.form(&fields),
            Some(RequestBody::Multipart {
                field,
                file_name,
                contents,
            }) => builder.multipart(Form::new().part(field, Part::bytes(contents).file_name(file_name))),
        };

        let request = builder
            .build()
            .map_err(|err| PetstoreError::Request(format!("failed to build {method} {path}: {err}")))?;
        let sent_url = request.url().clone();
        let response = match self.client.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let message = format!("{method} {path} failed: {err}");
                tracing::debug!(%method, path, error = %err, "exchange failed before a response");
                self.client.record(&method, &sent_url, request_summary, Err(message.clone()));
                return Err(PetstoreError::Request(message));
            }
        };
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let message = format!("{method} {path} body read failed: {err}");
                self.client.record(&method, &sent_url, request_summary, Err(message.clone()));
                return Err(PetstoreError::Request(message));
            }
        };
        let api_response =
            ApiResponse::new(method.to_string(), relative_path(&sent_url), status, headers, body);
        tracing::debug!(
            method = %method,
            path = %api_response.path(),
            status,
            "exchange completed"
        );
        self.client.record(
            &method,
            &sent_url,
            request_summary,
            Ok((status, api_response.body_value())),
        );
        Ok(api_response)
    }

    /// Replaces the body unless a builder error is already pending.
    fn body(mut self, body: RequestBody) -> Self {
        if self.body.is_some() {
            return self.fail(PetstoreError::Request("request body already set".to_string()));
        }
        self.body = Some(body);
        self
    }

    /// Remembers the first builder error.
    fn fail(mut self, err: PetstoreError) -> Self {
        if self.pending_error.is_none() {
            self.pending_error = Some(err);
        }
        self
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the path and query of a URL.
fn relative_path(url: &Url) -> String {
    url.query().map_or_else(|| url.path().to_string(), |query| format!("{}?{query}", url.path()))
}
