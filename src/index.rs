/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Id-to-record lookup used to resolve foreign keys for display.
//!
//! Invariants:
//! - An index is built from exactly one collection snapshot and
//!   remembers that snapshot's `Arc`. [`ReferenceIndex::is_built_from`]
//!   is how callers decide whether a rebuild is needed.
//! - Resolution never fails: a `None` key and a key with no match both
//!   resolve to [`UNASSIGNED`].
//! - When ids repeat, the first occurrence wins.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::model::Record;
use crate::model::RecordId;
use crate::store::EntityStore;

/// Label shown for a missing or dangling reference.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone)]
pub struct ReferenceIndex<R> {
    source: Arc<Vec<R>>,
    by_id: HashMap<RecordId, usize>,
    labels: Vec<String>,
}

/// Build an index over `collection` keyed by `id_fn`, labelled by
/// `label_fn`.
pub fn build_index<R>(
    collection: &Arc<Vec<R>>,
    id_fn: impl Fn(&R) -> RecordId,
    label_fn: impl Fn(&R) -> String,
) -> ReferenceIndex<R> {
    let mut by_id = HashMap::with_capacity(collection.len());
    let mut labels = Vec::with_capacity(collection.len());
    for (pos, record) in collection.iter().enumerate() {
        by_id.entry(id_fn(record)).or_insert(pos);
        labels.push(label_fn(record));
    }
    ReferenceIndex {
        source: Arc::clone(collection),
        by_id,
        labels,
    }
}

impl<R: Record> ReferenceIndex<R> {
    /// Index keyed by [`Record::id`] and labelled by [`Record::label`].
    pub fn for_records(collection: &Arc<Vec<R>>) -> Self {
        build_index(collection, R::id, R::label)
    }
}

impl<R> ReferenceIndex<R> {
    pub fn resolve(&self, id: Option<RecordId>) -> &str {
        id.and_then(|id| self.by_id.get(&id))
            .map(|&pos| self.labels[pos].as_str())
            .unwrap_or(UNASSIGNED)
    }

    pub fn record(&self, id: RecordId) -> Option<&R> {
        self.by_id.get(&id).map(|&pos| &self.source[pos])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn is_built_from(&self, collection: &Arc<Vec<R>>) -> bool {
        Arc::ptr_eq(&self.source, collection)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// The indices the list and detail panes resolve against.
///
/// Only constructed from a store that has published a full snapshot,
/// so the three indices always come from the same load or from
/// reconciliations applied on top of it.
#[derive(Debug, Clone)]
pub struct Indices {
    pub employees: ReferenceIndex<Employee>,
    pub departments: ReferenceIndex<Department>,
    pub companies: ReferenceIndex<Company>,
}

impl Indices {
    /// `None` until the store holds a published snapshot.
    pub fn from_store(store: &EntityStore) -> Option<Self> {
        if !store.has_snapshot() {
            return None;
        }
        Some(Self {
            employees: ReferenceIndex::for_records(store.employees()),
            departments: ReferenceIndex::for_records(store.departments()),
            companies: ReferenceIndex::for_records(store.companies()),
        })
    }

    /// Rebuild only the indices whose collection was replaced.
    /// Returns `true` if anything was rebuilt.
    pub fn sync(&mut self, store: &EntityStore) -> bool {
        let mut changed = false;
        if !self.employees.is_built_from(store.employees()) {
            self.employees = ReferenceIndex::for_records(store.employees());
            changed = true;
        }
        if !self.departments.is_built_from(store.departments()) {
            self.departments = ReferenceIndex::for_records(store.departments());
            changed = true;
        }
        if !self.companies.is_built_from(store.companies()) {
            self.companies = ReferenceIndex::for_records(store.companies());
            changed = true;
        }
        changed
    }

    pub fn department_of(&self, employee: &Employee) -> &str {
        self.departments.resolve(employee.department_id)
    }

    pub fn company_of(&self, employee: &Employee) -> &str {
        self.companies.resolve(employee.company_id)
    }

    pub fn company_of_department(&self, department: &Department) -> &str {
        self.companies.resolve(department.company_id)
    }
}
