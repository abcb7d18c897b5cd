/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

use crate::notify::NoticeKind;

/// All user-visible text in the console.
pub(crate) struct Labels {
    pub(crate) app_name: &'static str,

    pub(crate) separator: &'static str,
    pub(crate) selection_caret: &'static str,
    pub(crate) selected_marker: &'static str,
    pub(crate) loading: &'static str,
    pub(crate) no_records: &'static str,
    pub(crate) no_selection: &'static str,
    pub(crate) not_loaded: &'static str,
    pub(crate) no_token: &'static str,

    // Header
    pub(crate) page: &'static str,
    pub(crate) search: &'static str,
    pub(crate) loaded: &'static str,

    // Detail pane
    pub(crate) name: &'static str,
    pub(crate) location: &'static str,
    pub(crate) salary: &'static str,
    pub(crate) born: &'static str,
    pub(crate) started: &'static str,
    pub(crate) department: &'static str,
    pub(crate) company: &'static str,
    pub(crate) status: &'static str,
    pub(crate) employees: &'static str,
    pub(crate) departments: &'static str,

    // Payroll
    pub(crate) gross_basis: &'static str,
    pub(crate) gross: &'static str,
    pub(crate) pillar_1: &'static str,
    pub(crate) pillar_2: &'static str,
    pub(crate) health: &'static str,
    pub(crate) tax_base: &'static str,
    pub(crate) tax: &'static str,
    pub(crate) deductions: &'static str,
    pub(crate) net: &'static str,
    pub(crate) computing: &'static str,
    pub(crate) invalid_basis: &'static str,

    // Pane titles
    pub(crate) pane_details: &'static str,
    pub(crate) pane_payroll: &'static str,

    // Footer
    pub(crate) footer_help_text: &'static str,
    pub(crate) footer_search_prompt: &'static str,
    pub(crate) footer_basis_prompt: &'static str,
    pub(crate) footer_confirm: &'static str,
}

impl Labels {
    pub(crate) fn en() -> Self {
        Self {
            app_name: "directory",
            separator: " • ",
            selection_caret: "▸ ",
            selected_marker: "● ",
            loading: "loading…",
            no_records: "No records",
            no_selection: "Select an employee with Enter",
            not_loaded: "Directory not loaded",
            no_token: "no token",
            page: "page ",
            search: "search: ",
            loaded: "loaded ",
            name: "Name: ",
            location: "Location: ",
            salary: "Salary: ",
            born: "Born: ",
            started: "Started: ",
            department: "Department: ",
            company: "Company: ",
            status: "Status: ",
            employees: "Employees: ",
            departments: "Departments: ",
            gross_basis: "Gross basis: ",
            gross: "Gross: ",
            pillar_1: "Pension pillar I: ",
            pillar_2: "Pension pillar II: ",
            health: "Health insurance: ",
            tax_base: "Tax base: ",
            tax: "Tax and surtax: ",
            deductions: "Total deductions: ",
            net: "Net: ",
            computing: "computing…",
            invalid_basis: "enter a positive amount",
            pane_details: "Details",
            pane_payroll: "Payroll preview",
            footer_help_text: "q: quit | 1/2/3/Tab: tabs | j/k: move | n/p: page | Enter: select | b: basis | /: search | Esc: clear | c: create | d/D: deactivate/delete | r: reload | R: refresh record",
            footer_search_prompt: "search (Enter to run, Esc to cancel): ",
            footer_basis_prompt: "gross basis (Enter to apply, Esc to cancel): ",
            footer_confirm: " (y to confirm, any other key cancels)",
        }
    }
}

/// Semantic styles for the console.
///
/// Each field names a role, not a color.
pub(crate) struct ColorScheme {
    // UI chrome
    pub(crate) app_name: Style,
    pub(crate) border: Style,
    pub(crate) border_focused: Style,
    pub(crate) tab: Style,
    pub(crate) tab_active: Style,

    // Rows
    pub(crate) row: Style,
    pub(crate) row_cursor: Style,
    pub(crate) row_selected: Style,
    pub(crate) row_inactive: Style,

    // Notices
    pub(crate) error: Style,
    pub(crate) info: Style,
    pub(crate) success: Style,

    // Header stats
    pub(crate) stat_label: Style,
    pub(crate) stat_value: Style,
    pub(crate) stat_url: Style,

    // Detail pane
    pub(crate) detail_label: Style,
    pub(crate) detail_unassigned: Style,
    pub(crate) detail_status_ok: Style,
    pub(crate) detail_status_warn: Style,
    pub(crate) detail_money: Style,
    pub(crate) footer_help: Style,
    pub(crate) footer_prompt: Style,
}

impl ColorScheme {
    /// Nord color scheme (https://www.nordtheme.com/).
    pub(crate) fn nord() -> Self {
        // Polar Night
        let polar3 = Color::Rgb(76, 86, 106); // #4C566A
        // Snow Storm
        let snow0 = Color::Rgb(216, 222, 233); // #D8DEE9
        let snow2 = Color::Rgb(236, 239, 244); // #ECEFF4
        // Frost
        let frost_teal = Color::Rgb(143, 188, 187); // #8FBCBB
        let frost_cyan = Color::Rgb(136, 192, 208); // #88C0D0
        let frost_blue = Color::Rgb(129, 161, 193); // #81A1C1
        // Aurora
        let aurora_red = Color::Rgb(191, 97, 106); // #BF616A
        let aurora_orange = Color::Rgb(208, 135, 112); // #D08770
        let aurora_yellow = Color::Rgb(235, 203, 139); // #EBCB8B
        let aurora_green = Color::Rgb(163, 190, 140); // #A3BE8C
        let aurora_purple = Color::Rgb(180, 142, 173); // #B48EAD

        Self {
            app_name: Style::default().fg(frost_cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(polar3),
            border_focused: Style::default().fg(frost_cyan),
            tab: Style::default().fg(snow0),
            tab_active: Style::default()
                .fg(frost_cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            row: Style::default().fg(snow0),
            row_cursor: Style::default()
                .fg(snow2)
                .bg(polar3)
                .add_modifier(Modifier::BOLD),
            row_selected: Style::default().fg(aurora_purple),
            row_inactive: Style::default().fg(polar3),

            error: Style::default().fg(aurora_red),
            info: Style::default().fg(frost_blue),
            success: Style::default().fg(aurora_green),

            stat_label: Style::default().fg(snow0),
            stat_value: Style::default().fg(aurora_yellow),
            stat_url: Style::default().fg(polar3),

            detail_label: Style::default().fg(frost_teal),
            detail_unassigned: Style::default().fg(polar3).add_modifier(Modifier::ITALIC),
            detail_status_ok: Style::default().fg(aurora_green),
            detail_status_warn: Style::default().fg(aurora_orange),
            detail_money: Style::default().fg(snow2).add_modifier(Modifier::BOLD),
            footer_help: Style::default().fg(polar3),
            footer_prompt: Style::default().fg(aurora_yellow),
        }
    }

    pub(crate) fn notice_style(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Success => self.success,
            NoticeKind::Info => self.info,
            NoticeKind::Error => self.error,
        }
    }

    pub(crate) fn status_style(&self, active: bool) -> Style {
        if active {
            self.detail_status_ok
        } else {
            self.detail_status_warn
        }
    }
}

/// Complete visual presentation: colors plus text.
pub(crate) struct Theme {
    pub(crate) scheme: ColorScheme,
    pub(crate) labels: Labels,
}

impl Theme {
    pub(crate) fn nord() -> Self {
        Self {
            scheme: ColorScheme::nord(),
            labels: Labels::en(),
        }
    }
}
