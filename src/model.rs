/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Wire records for the three directory collections.
//!
//! The server never joins across collections. An employee carries
//! `departmentId` and `companyId`, a department carries `companyId`,
//! and the console resolves those keys itself through
//! [`crate::index::ReferenceIndex`]. A foreign key may be `null` or
//! may name a record that no longer exists; both are legal.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier of a record, unique within its own collection only.
pub type RecordId = i64;

/// The three collection types served by the directory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Employee,
    Department,
    Company,
}

impl ResourceKind {
    /// Tab order in the console.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Employee,
        ResourceKind::Department,
        ResourceKind::Company,
    ];

    /// Path segment under the API base URL (`{base}/{segment}/get`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Employee => "employee",
            ResourceKind::Department => "department",
            ResourceKind::Company => "company",
        }
    }

    /// Plural title used for tabs and pane headers.
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Employee => "Employees",
            ResourceKind::Department => "Departments",
            ResourceKind::Company => "Companies",
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ResourceKind::Employee => ResourceKind::Department,
            ResourceKind::Department => ResourceKind::Company,
            ResourceKind::Company => ResourceKind::Employee,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Common surface of every collection record.
///
/// `Draft` is the create payload: the same record without its
/// server-assigned `id`.
pub trait Record: fmt::Debug + Clone + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    type Draft: Serialize + fmt::Debug + Send + Sync;

    fn id(&self) -> RecordId;

    /// Display label used when another collection references this
    /// record, and as the search/list title.
    fn label(&self) -> String;

    /// Status flag normalized so that `true` means "in good standing"
    /// (employed, active, not bankrupt).
    fn is_active(&self) -> bool;
}

/// A calendar date as the server emits it.
///
/// Jackson writes `java.util.Date` either as epoch milliseconds or as
/// an ISO string depending on its configuration, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Millis(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: RecordId,
    pub employee_name: String,
    pub employee_surname: String,
    #[serde(default)]
    pub employee_salary: f64,
    #[serde(default)]
    pub date_of_birth: Option<DateField>,
    #[serde(default)]
    pub beginning_of_work: Option<DateField>,
    /// Spelled as the server spells it.
    pub employeed: bool,
    #[serde(default)]
    pub department_id: Option<RecordId>,
    #[serde(default)]
    pub company_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub employee_name: String,
    pub employee_surname: String,
    pub employee_salary: f64,
    pub date_of_birth: Option<DateField>,
    pub beginning_of_work: Option<DateField>,
    pub employeed: bool,
    pub department_id: Option<RecordId>,
    pub company_id: Option<RecordId>,
}

impl Record for Employee {
    const KIND: ResourceKind = ResourceKind::Employee;
    type Draft = EmployeeDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.employee_name, self.employee_surname)
    }

    fn is_active(&self) -> bool {
        self.employeed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: RecordId,
    pub department_name: String,
    #[serde(default)]
    pub department_location: String,
    pub active: bool,
    #[serde(default)]
    pub company_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    pub department_name: String,
    pub department_location: String,
    pub active: bool,
    pub company_id: Option<RecordId>,
}

impl Record for Department {
    const KIND: ResourceKind = ResourceKind::Department;
    type Draft = DepartmentDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.department_name.clone()
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: RecordId,
    pub company_name: String,
    #[serde(default)]
    pub company_location: String,
    /// `true` once the company has been deactivated.
    pub bankruptcy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    pub company_name: String,
    pub company_location: String,
    pub bankruptcy: bool,
}

impl Record for Company {
    const KIND: ResourceKind = ResourceKind::Company;
    type Draft = CompanyDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> String {
        self.company_name.clone()
    }

    fn is_active(&self) -> bool {
        !self.bankruptcy
    }
}

/// Payroll preview for one employee at one gross basis.
///
/// Never persisted. Owned by [`crate::selection::Selection`] and
/// valid only for the `(employee_id, gross_basis)` pair that produced
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryPreview {
    pub employee_id: RecordId,
    pub gross_salary: f64,
    pub pension_pillar_1: f64,
    pub pension_pillar_2: f64,
    pub health_insurance: f64,
    pub tax_base: f64,
    pub total_tax_surtax: f64,
    pub net_salary: f64,
}

impl SalaryPreview {
    /// Sum of everything withheld between gross and net.
    pub fn total_deductions(&self) -> f64 {
        self.pension_pillar_1 + self.pension_pillar_2 + self.health_insurance + self.total_tax_surtax
    }
}

/// A decimal that may arrive string-encoded (`"1000.00"`) or as a
/// bare JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireDecimal {
    Text(String),
    Number(f64),
}

impl WireDecimal {
    fn to_f64(&self, field: &str) -> Result<f64, String> {
        match self {
            WireDecimal::Number(n) => Ok(*n),
            WireDecimal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("{}: {:?} is not a decimal ({})", field, s, e)),
        }
    }
}

/// `SalaryResponseDTO` as sent by `calculatePay`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SalaryResponse {
    pub(crate) employee_id: RecordId,
    pub(crate) gross_salary: WireDecimal,
    pub(crate) pension1_pillar: WireDecimal,
    pub(crate) pension2_pillar: WireDecimal,
    pub(crate) health_insurance: WireDecimal,
    pub(crate) tax_base: WireDecimal,
    pub(crate) total_tax_surtax: WireDecimal,
    pub(crate) net_salary: WireDecimal,
}

impl TryFrom<SalaryResponse> for SalaryPreview {
    type Error = String;

    fn try_from(dto: SalaryResponse) -> Result<Self, Self::Error> {
        Ok(SalaryPreview {
            employee_id: dto.employee_id,
            gross_salary: dto.gross_salary.to_f64("grossSalary")?,
            pension_pillar_1: dto.pension1_pillar.to_f64("pension1Pillar")?,
            pension_pillar_2: dto.pension2_pillar.to_f64("pension2Pillar")?,
            health_insurance: dto.health_insurance.to_f64("healthInsurance")?,
            tax_base: dto.tax_base.to_f64("taxBase")?,
            total_tax_surtax: dto.total_tax_surtax.to_f64("totalTaxSurtax")?,
            net_salary: dto.net_salary.to_f64("netSalary")?,
        })
    }
}
