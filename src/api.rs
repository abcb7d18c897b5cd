/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The REST surface the console consumes, as a trait.
//!
//! [`crate::client::HttpDirectory`] is the production implementation;
//! tests substitute an in-memory fake. Every call is fire-once: no
//! retries, and no timeouts beyond what the transport imposes.

use std::fmt;

use async_trait::async_trait;

use crate::error::ConsoleError;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::ResourceKind;
use crate::model::SalaryPreview;

/// Bearer credential issued elsewhere and handed to the console.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for an empty or all-whitespace token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.trim().to_string()))
        }
    }

    pub fn bearer(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// How a record is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Mark inactive (`PUT softDelete`); the server keeps the row.
    Soft,
    /// Permanent removal (`DELETE delete`).
    Hard,
}

impl fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteMode::Soft => f.write_str("deactivate"),
            DeleteMode::Hard => f.write_str("delete"),
        }
    }
}

#[async_trait]
pub trait DirectoryApi: Send + Sync + 'static {
    /// `GET /{kind}/get`
    async fn list<R: Record>(&self, token: &AuthToken) -> Result<Vec<R>, ConsoleError>;

    /// `GET /{kind}/getById?id=`
    async fn get_by_id<R: Record>(&self, token: &AuthToken, id: RecordId)
    -> Result<R, ConsoleError>;

    /// `GET /{kind}/getByName?name=`
    async fn search_by_name<R: Record>(
        &self,
        token: &AuthToken,
        name: &str,
    ) -> Result<Vec<R>, ConsoleError>;

    /// `POST /{kind}/post`
    async fn create<R: Record>(&self, token: &AuthToken, draft: &R::Draft)
    -> Result<R, ConsoleError>;

    /// `PUT /{kind}/softDelete?id=` or `DELETE /{kind}/delete?id=`
    async fn delete(
        &self,
        token: &AuthToken,
        kind: ResourceKind,
        id: RecordId,
        mode: DeleteMode,
    ) -> Result<(), ConsoleError>;

    /// `GET /employee/calculatePay/{id}?grossBasis=`
    async fn calculate_pay(
        &self,
        token: &AuthToken,
        employee_id: RecordId,
        gross_basis: &str,
    ) -> Result<SalaryPreview, ConsoleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_no_token() {
        assert!(AuthToken::new("").is_none());
        assert!(AuthToken::new("   ").is_none());
        assert_eq!(AuthToken::new(" abc ").unwrap().bearer(), "abc");
    }

    #[test]
    fn token_debug_is_redacted() {
        let t = AuthToken::new("secret-jwt").unwrap();
        assert!(!format!("{:?}", t).contains("secret"));
    }
}
