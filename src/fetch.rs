/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Fetch orchestration for the three directory collections.
//!
//! The collections are requested concurrently and joined with a
//! barrier: either all three arrive and are published to the
//! [`EntityStore`] in one step, or nothing is published and the store
//! keeps its prior contents. Indices built from the store therefore
//! never see a mix of old and new collections.

use crate::api::AuthToken;
use crate::api::DirectoryApi;
use crate::error::ConsoleError;
use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::notify::Notifier;
use crate::store::EntityStore;

/// Monotonic ordering key for load results.
///
/// `ts_micros` comes from wall-clock time and `seq` breaks ties to
/// ensure a total order within this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp {
    /// Wall-clock timestamp in microseconds since UNIX epoch.
    pub ts_micros: u64,
    /// Monotonic tie-breaker for identical timestamps in this
    /// process.
    pub seq: u64,
}

/// Wall-clock microseconds since UNIX epoch.
pub fn now_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

impl Stamp {
    /// Take the next stamp, advancing `seq_counter`.
    pub fn next(seq_counter: &mut u64) -> Self {
        *seq_counter += 1;
        Stamp {
            ts_micros: now_micros(),
            seq: *seq_counter,
        }
    }
}

/// Load status of the entity store.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Unknown,
    /// A load is in flight. Collections still hold the previous
    /// snapshot, if any.
    Loading { stamp: Stamp },
    /// The last load published a full snapshot.
    Ready {
        /// Ordering key of the load that produced the snapshot.
        stamp: Stamp,
        /// Store generation the snapshot was published as.
        generation: u64,
    },
    /// The last load failed. Collections are untouched.
    Error { stamp: Stamp, error: ConsoleError },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading { .. })
    }
}

/// All three collections from a single successful load.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub companies: Vec<Company>,
}

/// Fetch all three collections concurrently.
///
/// Fails fast with `Unauthenticated` before any request when `token`
/// is absent. Any single failure fails the whole load; the remaining
/// in-flight requests are dropped.
pub async fn load_all<A: DirectoryApi>(
    api: &A,
    token: Option<&AuthToken>,
) -> Result<Snapshot, ConsoleError> {
    let token = token.ok_or(ConsoleError::Unauthenticated)?;
    let (employees, departments, companies) = tokio::try_join!(
        api.list::<Employee>(token),
        api.list::<Department>(token),
        api.list::<Company>(token),
    )?;
    Ok(Snapshot {
        employees,
        departments,
        companies,
    })
}

/// Load every collection and publish the result into `store`.
///
/// On failure the store keeps its prior collections and exactly one
/// error notice is sent. Returns `true` when a snapshot was published.
pub async fn refresh_store<A: DirectoryApi>(
    api: &A,
    token: Option<&AuthToken>,
    store: &mut EntityStore,
    notifier: &Notifier,
    seq_counter: &mut u64,
) -> bool {
    store.begin_load(Stamp::next(seq_counter));
    tracing::info!("loading directory collections");

    let result = load_all(api, token).await;
    let stamp = Stamp::next(seq_counter);
    match result {
        Ok(snapshot) => {
            tracing::info!(
                employees = snapshot.employees.len(),
                departments = snapshot.departments.len(),
                companies = snapshot.companies.len(),
                "directory loaded"
            );
            store.publish(snapshot, stamp);
            true
        }
        Err(error) => {
            tracing::warn!(class = ?error.class(), %error, "directory load failed");
            notifier.error(&error);
            store.fail(error, stamp);
            false
        }
    }
}
