/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::api::DeleteMode;
use crate::model::RecordId;
use crate::model::ResourceKind;

/// Result of handling a key event: the network work, if any, that the
/// event loop must run next.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum KeyResult {
    /// Nothing to fetch; state already updated in place.
    None,
    /// Refetch all three collections.
    Reload,
    /// Run a name search on the active tab. Empty clears the filter.
    Search(String),
    /// A confirmed delete.
    Delete {
        kind: ResourceKind,
        id: RecordId,
        mode: DeleteMode,
    },
    /// Refetch one record by id.
    RefreshRecord { kind: ResourceKind, id: RecordId },
    /// Create a record on the active tab from a name.
    Create { kind: ResourceKind, name: String },
}

/// What the footer line is currently collecting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InputMode {
    Normal,
    Search(String),
    Basis(String),
    Create(String),
    Confirm(PendingDelete),
}

/// A delete waiting for `y`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingDelete {
    pub(crate) kind: ResourceKind,
    pub(crate) id: RecordId,
    pub(crate) mode: DeleteMode,
    pub(crate) label: String,
}

impl PendingDelete {
    pub(crate) fn prompt(&self) -> String {
        format!("{} {} \"{}\"?", self.mode, self.kind, self.label)
    }
}
