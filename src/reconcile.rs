/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Local reconciliation after a mutation, without refetching.
//!
//! Every helper returns a new `Arc` and never touches the input
//! collection, so a changed pointer always means a changed
//! collection. On failure the previous `Arc` comes back unchanged
//! (`Arc::ptr_eq` holds) and nothing is partially removed.

use std::sync::Arc;

use crate::api::AuthToken;
use crate::api::DeleteMode;
use crate::api::DirectoryApi;
use crate::error::ConsoleError;
use crate::model::Record;
use crate::model::RecordId;

/// Copy of `collection` without any record whose id is `id`.
pub fn without_record<R: Record>(collection: &[R], id: RecordId) -> Arc<Vec<R>> {
    Arc::new(
        collection
            .iter()
            .filter(|r| r.id() != id)
            .cloned()
            .collect(),
    )
}

/// Copy of `collection` with `record` appended.
pub fn with_record<R: Record>(collection: &[R], record: R) -> Arc<Vec<R>> {
    let mut next = Vec::with_capacity(collection.len() + 1);
    next.extend_from_slice(collection);
    next.push(record);
    Arc::new(next)
}

/// Copy of `collection` with the record sharing `record`'s id swapped
/// in place. Returns `None` when no record has that id.
pub fn with_replaced<R: Record>(collection: &[R], record: R) -> Option<Arc<Vec<R>>> {
    let pos = collection.iter().position(|r| r.id() == record.id())?;
    let mut next = collection.to_vec();
    next[pos] = record;
    Some(Arc::new(next))
}

/// Collection to publish after a mutation plus what happened.
#[derive(Debug)]
pub struct MutationOutcome<R> {
    pub collection: Arc<Vec<R>>,
    pub result: Result<(), ConsoleError>,
}

impl<R> MutationOutcome<R> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Delete (soft or hard) record `id` on the server, then drop it
/// locally.
///
/// A soft delete also removes the record from the local view; the
/// server's list endpoint still returns inactive records, so they
/// reappear on the next full reload with their status flag cleared.
pub async fn apply_delete<A: DirectoryApi, R: Record>(
    api: &A,
    token: &AuthToken,
    collection: &Arc<Vec<R>>,
    id: RecordId,
    mode: DeleteMode,
) -> MutationOutcome<R> {
    match api.delete(token, R::KIND, id, mode).await {
        Ok(()) => {
            tracing::info!(kind = %R::KIND, id, %mode, "record removed");
            MutationOutcome {
                collection: without_record(collection, id),
                result: Ok(()),
            }
        }
        Err(err) => {
            tracing::warn!(kind = %R::KIND, id, %mode, %err, "delete failed");
            MutationOutcome {
                collection: Arc::clone(collection),
                result: Err(err),
            }
        }
    }
}

/// Create a record from `draft` and append the server's echo.
pub async fn apply_create<A: DirectoryApi, R: Record>(
    api: &A,
    token: &AuthToken,
    collection: &Arc<Vec<R>>,
    draft: &R::Draft,
) -> MutationOutcome<R> {
    match api.create::<R>(token, draft).await {
        Ok(record) => {
            tracing::info!(kind = %R::KIND, id = record.id(), "record created");
            MutationOutcome {
                collection: with_record(collection, record),
                result: Ok(()),
            }
        }
        Err(err) => {
            tracing::warn!(kind = %R::KIND, %err, "create failed");
            MutationOutcome {
                collection: Arc::clone(collection),
                result: Err(err),
            }
        }
    }
}

/// Refetch one record by id and swap it into the collection.
///
/// A record that is no longer in the collection is left out rather
/// than re-added.
pub async fn apply_refresh<A: DirectoryApi, R: Record>(
    api: &A,
    token: &AuthToken,
    collection: &Arc<Vec<R>>,
    id: RecordId,
) -> MutationOutcome<R> {
    match api.get_by_id::<R>(token, id).await {
        Ok(record) => MutationOutcome {
            collection: with_replaced(collection, record)
                .unwrap_or_else(|| Arc::clone(collection)),
            result: Ok(()),
        },
        Err(err) => {
            tracing::warn!(kind = %R::KIND, id, %err, "record refresh failed");
            MutationOutcome {
                collection: Arc::clone(collection),
                result: Err(err),
            }
        }
    }
}
