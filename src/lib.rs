/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Terminal console for the employee/department/company directory
//! API.
//!
//! The console loads all three collections, resolves the foreign keys
//! between them locally, and shows one paged list per collection next
//! to a detail pane. Selecting an employee requests a payroll preview
//! for the current gross basis.
//!
//! Invariants held throughout:
//! - **Atomic snapshots**: a reload publishes all three collections
//!   together or none of them ([`store::EntityStore`]).
//! - **Copy-on-write collections**: every mutation produces a new
//!   `Arc<Vec<_>>`; on failure the previous `Arc` is kept, so pointer
//!   identity tells indices and views whether anything changed.
//! - **Fallback resolution**: a `null` or dangling foreign key
//!   resolves to [`index::UNASSIGNED`], never to an error.
//! - **Page clamping**: a view's page is always within
//!   `1..=total_pages`, and an empty collection has one empty page.
//! - **Latest request wins**: a payroll reply is applied only if it
//!   carries the ticket of the most recent request
//!   ([`selection::Selection`]).
//! - **Local patching**: deletes, creates and single-record refreshes
//!   patch the loaded collections instead of refetching them.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod model;
pub mod notify;
pub mod reconcile;
pub mod selection;
pub mod store;
pub mod view;

pub(crate) mod actions;
pub(crate) mod format;
pub(crate) mod render;
pub(crate) mod theme;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use app::App;
pub use app::run_app;
pub use client::HttpDirectory;
pub use client::build_client;
pub use config::Args;
pub use config::ConsoleConfig;
pub use error::ConsoleError;
