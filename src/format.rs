/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use chrono::DateTime;
use chrono::NaiveDate;

use crate::model::DateField;
use crate::model::ResourceKind;

/// Render an amount as `"1234.50 EUR"`.
pub(crate) fn format_money(amount: f64) -> String {
    format!("{:.2} EUR", amount)
}

/// Render a server date as `dd.mm.yyyy`.
///
/// Epoch milliseconds are interpreted as UTC. Text is accepted as
/// RFC 3339 or as a leading `yyyy-mm-dd`; anything else is shown
/// verbatim.
pub(crate) fn format_date(date: &DateField) -> String {
    match date {
        DateField::Millis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| ms.to_string()),
        DateField::Text(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .or_else(|_| {
                NaiveDate::parse_from_str(text.get(..10).unwrap_or(text), "%Y-%m-%d")
                    .map(|d| d.format("%d.%m.%Y").to_string())
            })
            .unwrap_or_else(|_| text.clone()),
    }
}

pub(crate) fn format_optional_date(date: Option<&DateField>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Status word for a record's normalized active flag.
pub(crate) fn format_status(kind: ResourceKind, active: bool) -> &'static str {
    match (kind, active) {
        (ResourceKind::Employee, true) => "employed",
        (ResourceKind::Employee, false) => "not employed",
        (ResourceKind::Department, true) => "active",
        (ResourceKind::Department, false) => "inactive",
        (ResourceKind::Company, true) => "active",
        (ResourceKind::Company, false) => "bankrupt",
    }
}

/// Format elapsed time between two microsecond timestamps (e.g.
/// "just now", "5s ago", "3m 12s ago", "1h 7m ago").
pub(crate) fn format_relative_time(then_micros: u64, now_micros: u64) -> String {
    let total_secs = now_micros.saturating_sub(then_micros) / 1_000_000;
    if total_secs < 2 {
        "just now".to_string()
    } else if total_secs < 60 {
        format!("{}s ago", total_secs)
    } else if total_secs < 3600 {
        format!("{}m {}s ago", total_secs / 60, total_secs % 60)
    } else {
        format!("{}h {}m ago", total_secs / 3600, (total_secs % 3600) / 60)
    }
}
