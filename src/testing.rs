/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! In-memory [`DirectoryApi`] and record builders for tests.
//!
//! Records are held as JSON values so the fake serves every record
//! type through the same serde path the HTTP client uses.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::api::AuthToken;
use crate::api::DeleteMode;
use crate::api::DirectoryApi;
use crate::error::ConsoleError;
use crate::fetch::Snapshot;
use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::ResourceKind;
use crate::model::SalaryPreview;

pub(crate) fn token() -> AuthToken {
    AuthToken::new("test-token").unwrap()
}

pub(crate) fn company(id: RecordId, name: &str) -> Company {
    Company {
        id,
        company_name: name.to_string(),
        company_location: "Osijek".to_string(),
        bankruptcy: false,
    }
}

pub(crate) fn department(id: RecordId, name: &str, company_id: Option<RecordId>) -> Department {
    Department {
        id,
        department_name: name.to_string(),
        department_location: "Zagreb".to_string(),
        active: true,
        company_id,
    }
}

pub(crate) fn employee(
    id: RecordId,
    department_id: Option<RecordId>,
    company_id: Option<RecordId>,
) -> Employee {
    Employee {
        id,
        employee_name: format!("Name{}", id),
        employee_surname: format!("Surname{}", id),
        employee_salary: 1000.0 + id as f64,
        date_of_birth: None,
        beginning_of_work: None,
        employeed: true,
        department_id,
        company_id,
    }
}

/// Deterministic payroll figures for a gross basis.
pub(crate) fn preview(employee_id: RecordId, gross: f64) -> SalaryPreview {
    let pillar_1 = gross * 0.15;
    let pillar_2 = gross * 0.05;
    let tax_base = gross - pillar_1 - pillar_2;
    let tax = tax_base * 0.2;
    SalaryPreview {
        employee_id,
        gross_salary: gross,
        pension_pillar_1: pillar_1,
        pension_pillar_2: pillar_2,
        health_insurance: gross * 0.165,
        tax_base,
        total_tax_surtax: tax,
        net_salary: tax_base - tax,
    }
}

/// `employees` employees spread round-robin over `departments`
/// departments and `companies` companies, ids starting at 1.
pub(crate) fn sample_snapshot(employees: i64, departments: i64, companies: i64) -> Snapshot {
    let pick = |i: i64, n: i64| if n > 0 { Some((i - 1) % n + 1) } else { None };
    Snapshot {
        employees: (1..=employees)
            .map(|i| employee(i, pick(i, departments), pick(i, companies)))
            .collect(),
        departments: (1..=departments)
            .map(|i| department(i, &format!("Department {}", i), pick(i, companies)))
            .collect(),
        companies: (1..=companies)
            .map(|i| company(i, &format!("Company {}", i)))
            .collect(),
    }
}

#[derive(Default)]
struct FakeState {
    rows: HashMap<ResourceKind, Vec<Value>>,
    list_calls: usize,
    list_failures: HashMap<ResourceKind, ConsoleError>,
    delete_failure: Option<ConsoleError>,
    deletes: Vec<(ResourceKind, RecordId, DeleteMode)>,
    pay_requests: Vec<(RecordId, String)>,
    pay_failure: Option<ConsoleError>,
    pay_gates: HashMap<RecordId, oneshot::Receiver<()>>,
}

/// Scriptable in-memory directory server.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    state: Mutex<FakeState>,
}

fn to_rows<T: serde::Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect()
}

fn not_found(what: &str) -> ConsoleError {
    ConsoleError::ClientError {
        status: 404,
        message: what.to_string(),
    }
}

impl FakeDirectory {
    pub(crate) fn new(snapshot: Snapshot) -> Self {
        let mut state = FakeState::default();
        state
            .rows
            .insert(ResourceKind::Employee, to_rows(&snapshot.employees));
        state
            .rows
            .insert(ResourceKind::Department, to_rows(&snapshot.departments));
        state
            .rows
            .insert(ResourceKind::Company, to_rows(&snapshot.companies));
        Self {
            state: Mutex::new(state),
        }
    }

    fn records<R: Record>(&self) -> Vec<R> {
        let state = self.state.lock().unwrap();
        let rows = state.rows.get(&R::KIND).cloned().unwrap_or_default();
        serde_json::from_value(Value::Array(rows)).unwrap()
    }

    pub(crate) fn fail_list(&self, kind: ResourceKind, error: ConsoleError) {
        self.state.lock().unwrap().list_failures.insert(kind, error);
    }

    pub(crate) fn fail_deletes(&self, error: ConsoleError) {
        self.state.lock().unwrap().delete_failure = Some(error);
    }

    pub(crate) fn fail_pay(&self, error: ConsoleError) {
        self.state.lock().unwrap().pay_failure = Some(error);
    }

    /// Hold the next payroll reply for `employee_id` until the
    /// returned sender fires (or is dropped).
    pub(crate) fn gate_pay(&self, employee_id: RecordId) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state
            .lock()
            .unwrap()
            .pay_gates
            .insert(employee_id, rx);
        tx
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub(crate) fn deletes(&self) -> Vec<(ResourceKind, RecordId, DeleteMode)> {
        self.state.lock().unwrap().deletes.clone()
    }

    pub(crate) fn pay_requests(&self) -> Vec<(RecordId, String)> {
        self.state.lock().unwrap().pay_requests.clone()
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
    async fn list<R: Record>(&self, _token: &AuthToken) -> Result<Vec<R>, ConsoleError> {
        {
            let mut state = self.state.lock().unwrap();
            state.list_calls += 1;
            if let Some(err) = state.list_failures.get(&R::KIND) {
                return Err(err.clone());
            }
        }
        Ok(self.records())
    }

    async fn get_by_id<R: Record>(
        &self,
        _token: &AuthToken,
        id: RecordId,
    ) -> Result<R, ConsoleError> {
        self.records::<R>()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found("record not found"))
    }

    async fn search_by_name<R: Record>(
        &self,
        _token: &AuthToken,
        name: &str,
    ) -> Result<Vec<R>, ConsoleError> {
        let needle = name.to_lowercase();
        let hits: Vec<R> = self
            .records::<R>()
            .into_iter()
            .filter(|r| r.label().to_lowercase().contains(&needle))
            .collect();
        if hits.is_empty() {
            Err(not_found("no records match the given name"))
        } else {
            Ok(hits)
        }
    }

    async fn create<R: Record>(
        &self,
        _token: &AuthToken,
        draft: &R::Draft,
    ) -> Result<R, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        let rows = state.rows.entry(R::KIND).or_default();
        let next_id = rows
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1;
        let mut value = serde_json::to_value(draft).unwrap();
        value["id"] = Value::from(next_id);
        rows.push(value.clone());
        serde_json::from_value(value).map_err(|e| ConsoleError::MalformedResponse(e.to_string()))
    }

    async fn delete(
        &self,
        _token: &AuthToken,
        kind: ResourceKind,
        id: RecordId,
        mode: DeleteMode,
    ) -> Result<(), ConsoleError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.delete_failure {
            return Err(err.clone());
        }
        state.deletes.push((kind, id, mode));
        if let Some(rows) = state.rows.get_mut(&kind) {
            rows.retain(|r| r.get("id").and_then(Value::as_i64) != Some(id));
        }
        Ok(())
    }

    async fn calculate_pay(
        &self,
        _token: &AuthToken,
        employee_id: RecordId,
        gross_basis: &str,
    ) -> Result<SalaryPreview, ConsoleError> {
        let (gate, failure) = {
            let mut state = self.state.lock().unwrap();
            state
                .pay_requests
                .push((employee_id, gross_basis.to_string()));
            (
                state.pay_gates.remove(&employee_id),
                state.pay_failure.clone(),
            )
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = failure {
            return Err(err);
        }
        let gross: f64 = gross_basis
            .parse()
            .map_err(|_| ConsoleError::ClientError {
                status: 400,
                message: "invalid gross basis".into(),
            })?;
        Ok(preview(employee_id, gross))
    }
}
