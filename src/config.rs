/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Console configuration.
//!
//! Every setting is a CLI flag that falls back to an environment
//! variable and then to a compiled-in default.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser;

use crate::api::AuthToken;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/skroflin";
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_GROSS_BASIS: &str = "1000.00";

/// Command-line arguments for the directory console.
#[derive(Debug, Parser)]
#[command(
    name = "directory-console",
    about = "Terminal console for the employee/department/company directory"
)]
pub struct Args {
    /// Directory API base URL (e.g., http://localhost:8080/api/skroflin)
    #[arg(long, env = "DIRECTORY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token for the API
    #[arg(long, env = "DIRECTORY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Records per page
    #[arg(long, env = "DIRECTORY_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from))]
    pub page_size: usize,

    /// Initial gross basis for the payroll preview
    #[arg(long, env = "DIRECTORY_GROSS_BASIS", default_value = DEFAULT_GROSS_BASIS)]
    pub gross_basis: String,

    /// PEM root CA for an https directory server
    #[arg(long, env = "DIRECTORY_TLS_CA")]
    pub tls_ca: Option<String>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, env = "DIRECTORY_LOG_FILE", default_value = "directory-console.log")]
    pub log_file: PathBuf,
}

/// Validated configuration consumed by the library.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub token: Option<AuthToken>,
    pub page_size: usize,
    pub gross_basis: String,
    pub tls_ca: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            gross_basis: DEFAULT_GROSS_BASIS.to_string(),
            tls_ca: None,
        }
    }
}

impl ConsoleConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            base_url: normalize_base_url(&args.base_url),
            token: args.token.clone().and_then(AuthToken::new),
            page_size: args.page_size.max(1),
            gross_basis: args.gross_basis.trim().to_string(),
            tls_ca: args.tls_ca.clone(),
        }
    }
}

/// Strip trailing slashes; an empty value falls back to the default.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
