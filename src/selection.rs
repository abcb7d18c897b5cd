/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Master/detail selection and the payroll preview derived from it.
//!
//! `Selection` is a reducer: [`Selection::reduce`] applies one
//! [`SelectionAction`] and returns the [`SelectionEffect`] the caller
//! must perform. The reducer itself never does I/O.
//!
//! Phases:
//!
//! ```text
//! Idle --Select--> Selected --(valid input)--> Computing{ticket}
//!                     ^                           |
//!                     +------- failure -----------+--- matching reply --> Ready
//! ```
//!
//! Invariants:
//! - `result` is `Some` only in `Ready`, and only for the
//!   `(employee id, input)` pair that was current when its request was
//!   issued.
//! - Every issued request carries a fresh ticket from a monotonically
//!   increasing counter. A reply is applied only if its ticket equals
//!   the ticket of the in-flight request; anything else is stale and
//!   dropped.
//! - Any change of selection or input clears `result` before the new
//!   request is issued.

use crate::error::ConsoleError;
use crate::model::Employee;
use crate::model::RecordId;
use crate::model::SalaryPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A record is chosen but no request is in flight (input invalid,
    /// or the last request failed).
    Selected,
    Computing {
        ticket: u64,
    },
    Ready,
}

/// A payroll preview request the caller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRequest {
    pub ticket: u64,
    pub employee_id: RecordId,
    pub basis: String,
}

#[derive(Debug)]
pub enum SelectionAction {
    Select(Employee),
    Clear,
    EditInput(String),
    Resolved {
        ticket: u64,
        result: Result<SalaryPreview, ConsoleError>,
    },
}

#[derive(Debug, PartialEq)]
pub enum SelectionEffect {
    None,
    Issue(PayrollRequest),
    Notify(ConsoleError),
}

/// `true` when `input` parses as a finite number greater than zero.
pub fn is_valid_basis(input: &str) -> bool {
    input
        .trim()
        .parse::<f64>()
        .map(|v| v.is_finite() && v > 0.0)
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct Selection {
    phase: Phase,
    selected: Option<Employee>,
    input: String,
    result: Option<SalaryPreview>,
    /// Last ticket handed out.
    tickets: u64,
}

impl Selection {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            phase: Phase::Idle,
            selected: None,
            input: input.into(),
            result: None,
            tickets: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<&Employee> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected.as_ref().map(|e| e.id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&SalaryPreview> {
        self.result.as_ref()
    }

    pub fn input_is_valid(&self) -> bool {
        is_valid_basis(&self.input)
    }

    pub fn reduce(&mut self, action: SelectionAction) -> SelectionEffect {
        match action {
            SelectionAction::Select(employee) => {
                if self.selected_id() == Some(employee.id) {
                    // Same record: keep the preview, adopt fresher fields.
                    self.selected = Some(employee);
                    return SelectionEffect::None;
                }
                self.selected = Some(employee);
                self.recompute()
            }
            SelectionAction::Clear => {
                self.selected = None;
                self.result = None;
                self.phase = Phase::Idle;
                SelectionEffect::None
            }
            SelectionAction::EditInput(input) => {
                let unchanged = input == self.input;
                self.input = input;
                if self.selected.is_none() {
                    return SelectionEffect::None;
                }
                if unchanged && matches!(self.phase, Phase::Computing { .. } | Phase::Ready) {
                    return SelectionEffect::None;
                }
                self.recompute()
            }
            SelectionAction::Resolved { ticket, result } => self.resolve(ticket, result),
        }
    }

    fn recompute(&mut self) -> SelectionEffect {
        self.result = None;
        self.phase = Phase::Selected;
        let Some(employee_id) = self.selected_id() else {
            self.phase = Phase::Idle;
            return SelectionEffect::None;
        };
        if !self.input_is_valid() {
            tracing::debug!(input = %self.input, "gross basis rejected, no request issued");
            return SelectionEffect::None;
        }
        self.tickets += 1;
        let ticket = self.tickets;
        self.phase = Phase::Computing { ticket };
        SelectionEffect::Issue(PayrollRequest {
            ticket,
            employee_id,
            basis: self.input.trim().to_string(),
        })
    }

    fn resolve(
        &mut self,
        ticket: u64,
        result: Result<SalaryPreview, ConsoleError>,
    ) -> SelectionEffect {
        if self.phase != (Phase::Computing { ticket }) {
            tracing::debug!(ticket, phase = ?self.phase, "dropping stale payroll reply");
            return SelectionEffect::None;
        }
        match result {
            Ok(preview) => {
                self.result = Some(preview);
                self.phase = Phase::Ready;
                SelectionEffect::None
            }
            Err(err) => {
                tracing::warn!(ticket, %err, "payroll preview failed");
                self.phase = Phase::Selected;
                SelectionEffect::Notify(err)
            }
        }
    }
}
