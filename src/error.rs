/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Failure taxonomy for every request the console issues.
//!
//! All variants are recovered at the component boundary and surfaced
//! as a notification; none escape as a panic.

use reqwest::StatusCode;
use serde::Deserialize;

/// Coarse classification of a [`ConsoleError`], used to emit at most
/// one notice per class for a batch of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Unauthenticated,
    Connectivity,
    ClientError,
    ServerError,
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsoleError {
    /// No credential was supplied; nothing was sent.
    #[error("you aren't logged in, supply a token")]
    Unauthenticated,

    /// The request was sent but no response came back.
    #[error("no response from the server: {0}")]
    Connectivity(String),

    /// 4xx: validation, not found, or auth rejection.
    #[error("{message} ({status})")]
    ClientError { status: u16, message: String },

    /// 5xx.
    #[error("server error: {message} ({status})")]
    ServerError { status: u16, message: String },

    /// A body that should have been JSON of a known shape was not.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ConsoleError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ConsoleError::Unauthenticated => ErrorClass::Unauthenticated,
            ConsoleError::Connectivity(_) => ErrorClass::Connectivity,
            ConsoleError::ClientError { .. } => ErrorClass::ClientError,
            ConsoleError::ServerError { .. } => ErrorClass::ServerError,
            ConsoleError::MalformedResponse(_) => ErrorClass::MalformedResponse,
        }
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::ClientError { status, .. } | ConsoleError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Classify a non-success response.
    ///
    /// The message is taken from a JSON `{"message": ..}` body when
    /// there is one, then from a non-empty plain-text body (the
    /// server's exception handler answers with bare strings), and
    /// finally from the status line.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = error_message(status, body);
        if status.is_server_error() {
            ConsoleError::ServerError {
                status: status.as_u16(),
                message,
            }
        } else {
            ConsoleError::ClientError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ConsoleError::MalformedResponse(e.to_string())
        } else {
            ConsoleError::Connectivity(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        if !message.trim().is_empty() {
            return message;
        }
    }
    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') && !text.starts_with('<') {
        return text.to_string();
    }
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}
