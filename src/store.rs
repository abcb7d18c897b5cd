/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Canonical in-memory collections.
//!
//! Collections are held behind `Arc` and only ever replaced, never
//! edited in place. A changed `Arc` pointer is how indices and views
//! learn that a collection changed.

use std::sync::Arc;

use crate::error::ConsoleError;
use crate::fetch::LoadStatus;
use crate::fetch::Snapshot;
use crate::fetch::Stamp;
use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::model::Record;

/// Records that have a slot in the [`EntityStore`].
pub trait Stored: Record {
    fn slot(store: &EntityStore) -> &Arc<Vec<Self>>;
    fn slot_mut(store: &mut EntityStore) -> &mut Arc<Vec<Self>>;
}

impl Stored for Employee {
    fn slot(store: &EntityStore) -> &Arc<Vec<Self>> {
        &store.employees
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Arc<Vec<Self>> {
        &mut store.employees
    }
}

impl Stored for Department {
    fn slot(store: &EntityStore) -> &Arc<Vec<Self>> {
        &store.departments
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Arc<Vec<Self>> {
        &mut store.departments
    }
}

impl Stored for Company {
    fn slot(store: &EntityStore) -> &Arc<Vec<Self>> {
        &store.companies
    }
    fn slot_mut(store: &mut EntityStore) -> &mut Arc<Vec<Self>> {
        &mut store.companies
    }
}

#[derive(Debug)]
pub struct EntityStore {
    employees: Arc<Vec<Employee>>,
    departments: Arc<Vec<Department>>,
    companies: Arc<Vec<Company>>,
    status: LoadStatus,
    /// Number of snapshots published so far.
    generation: u64,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            employees: Arc::new(Vec::new()),
            departments: Arc::new(Vec::new()),
            companies: Arc::new(Vec::new()),
            status: LoadStatus::Unknown,
            generation: 0,
        }
    }

    pub fn collection<R: Stored>(&self) -> &Arc<Vec<R>> {
        R::slot(self)
    }

    pub fn employees(&self) -> &Arc<Vec<Employee>> {
        &self.employees
    }

    pub fn departments(&self) -> &Arc<Vec<Department>> {
        &self.departments
    }

    pub fn companies(&self) -> &Arc<Vec<Company>> {
        &self.companies
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once any snapshot has been published, even if a later
    /// reload failed.
    pub fn has_snapshot(&self) -> bool {
        self.generation > 0
    }

    pub(crate) fn begin_load(&mut self, stamp: Stamp) {
        self.status = LoadStatus::Loading { stamp };
    }

    /// Swap in all three collections at once.
    pub(crate) fn publish(&mut self, snapshot: Snapshot, stamp: Stamp) {
        self.employees = Arc::new(snapshot.employees);
        self.departments = Arc::new(snapshot.departments);
        self.companies = Arc::new(snapshot.companies);
        self.generation += 1;
        self.status = LoadStatus::Ready {
            stamp,
            generation: self.generation,
        };
    }

    pub(crate) fn fail(&mut self, error: ConsoleError, stamp: Stamp) {
        self.status = LoadStatus::Error { stamp, error };
    }

    /// Replace one collection with a reconciled copy.
    pub fn replace<R: Stored>(&mut self, collection: Arc<Vec<R>>) {
        *R::slot_mut(self) = collection;
    }
}
