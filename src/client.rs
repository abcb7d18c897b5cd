/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! `reqwest`-backed [`DirectoryApi`].
//!
//! Address handling:
//! - `--base-url` may be `host:port/path` (no scheme) or an explicit
//!   `http://...` / `https://...`. An explicit scheme is authoritative.
//! - With `--tls-ca`, the CA is installed as a root and a bare
//!   address is promoted to `https`.
//!
//! Response handling: the body is read as text first so that a
//! non-JSON success body is reported as `MalformedResponse` rather
//! than as a transport failure.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::api::AuthToken;
use crate::api::DeleteMode;
use crate::api::DirectoryApi;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::ResourceKind;
use crate::model::SalaryPreview;
use crate::model::SalaryResponse;

/// Split an address into an optional `http`/`https` scheme and the
/// remainder.
pub(crate) fn parse_addr(addr: &str) -> (Option<&str>, &str) {
    if let Some(host) = addr.strip_prefix("https://") {
        (Some("https"), host)
    } else if let Some(host) = addr.strip_prefix("http://") {
        (Some("http"), host)
    } else {
        (None, addr)
    }
}

/// Install a PEM root CA on the builder.
///
/// Returns `(updated_builder, ca_installed)`; an unreadable or
/// unparsable CA leaves the builder unchanged.
fn add_tls_from_path(
    builder: reqwest::ClientBuilder,
    ca_path: &str,
) -> (reqwest::ClientBuilder, bool) {
    let ca_bytes = match std::fs::read(ca_path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(ca_path, error = %e, "cannot read CA file");
            return (builder, false);
        }
    };
    match reqwest::Certificate::from_pem(&ca_bytes) {
        Ok(cert) => (builder.add_root_certificate(cert), true),
        Err(e) => {
            tracing::warn!(ca_path, error = %e, "invalid CA PEM");
            (builder, false)
        }
    }
}

/// Build the HTTP directory client from configuration.
pub fn build_client(config: &ConsoleConfig) -> HttpDirectory {
    let (explicit_scheme, rest) = parse_addr(&config.base_url);

    let mut builder = reqwest::Client::builder();
    let mut use_tls = explicit_scheme == Some("https");

    if let Some(ca_path) = &config.tls_ca {
        let (b, ok) = add_tls_from_path(builder, ca_path);
        builder = b;
        use_tls = use_tls || (ok && explicit_scheme.is_none());
    }

    let scheme = match explicit_scheme {
        Some(s) if !use_tls || s == "https" => s,
        _ if use_tls => "https",
        _ => "http",
    };
    let base_url = format!("{}://{}", scheme, rest.trim_end_matches('/'));
    let client = builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default HTTP client");
        reqwest::Client::new()
    });

    HttpDirectory::new(base_url, client)
}

/// Directory API over HTTP with bearer authentication.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDirectory {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: ResourceKind, action: &str) -> String {
        format!("{}/{}/{}", self.base_url, kind.path_segment(), action)
    }

    async fn send_raw(&self, request: RequestBuilder, token: &AuthToken) -> Result<String, ConsoleError> {
        let resp = request.bearer_auth(token.bearer()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ConsoleError::from_response(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &AuthToken,
    ) -> Result<T, ConsoleError> {
        let body = self.send_raw(request, token).await?;
        serde_json::from_str(&body).map_err(|e| ConsoleError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectory {
    async fn list<R: Record>(&self, token: &AuthToken) -> Result<Vec<R>, ConsoleError> {
        let request = self.client.get(self.url(R::KIND, "get"));
        self.send_json(request, token).await
    }

    async fn get_by_id<R: Record>(
        &self,
        token: &AuthToken,
        id: RecordId,
    ) -> Result<R, ConsoleError> {
        let request = self
            .client
            .get(self.url(R::KIND, "getById"))
            .query(&[("id", id)]);
        self.send_json(request, token).await
    }

    async fn search_by_name<R: Record>(
        &self,
        token: &AuthToken,
        name: &str,
    ) -> Result<Vec<R>, ConsoleError> {
        let url = format!(
            "{}?name={}",
            self.url(R::KIND, "getByName"),
            urlencoding::encode(name)
        );
        self.send_json(self.client.get(url), token).await
    }

    async fn create<R: Record>(
        &self,
        token: &AuthToken,
        draft: &R::Draft,
    ) -> Result<R, ConsoleError> {
        let request = self.client.post(self.url(R::KIND, "post")).json(draft);
        self.send_json(request, token).await
    }

    async fn delete(
        &self,
        token: &AuthToken,
        kind: ResourceKind,
        id: RecordId,
        mode: DeleteMode,
    ) -> Result<(), ConsoleError> {
        let request = match mode {
            DeleteMode::Soft => self.client.put(self.url(kind, "softDelete")),
            DeleteMode::Hard => self.client.delete(self.url(kind, "delete")),
        }
        .query(&[("id", id)]);
        self.send_raw(request, token).await.map(|_| ())
    }

    async fn calculate_pay(
        &self,
        token: &AuthToken,
        employee_id: RecordId,
        gross_basis: &str,
    ) -> Result<SalaryPreview, ConsoleError> {
        let url = format!(
            "{}/{}?grossBasis={}",
            self.url(ResourceKind::Employee, "calculatePay"),
            employee_id,
            urlencoding::encode(gross_basis)
        );
        let dto: SalaryResponse = self.send_json(self.client.get(url), token).await?;
        SalaryPreview::try_from(dto).map_err(ConsoleError::MalformedResponse)
    }
}
