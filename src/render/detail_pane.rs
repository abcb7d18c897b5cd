/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

use crate::api::DirectoryApi;
use crate::app::App;
use crate::format::format_money;
use crate::format::format_optional_date;
use crate::format::format_status;
use crate::index::Indices;
use crate::index::UNASSIGNED;
use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::model::Record;
use crate::model::SalaryPreview;
use crate::selection::Phase;
use crate::selection::Selection;
use crate::theme::ColorScheme;
use crate::theme::Labels;

/// Render the contextual details pane (right side).
///
/// On the employee tab this shows the selected employee and its
/// payroll preview; on the other tabs it describes the row under the
/// cursor. Before the first successful load only a placeholder is
/// shown.
pub(crate) fn render_detail_pane<A: DirectoryApi>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    app: &App<A>,
) {
    let scheme = &app.theme.scheme;
    let labels = &app.theme.labels;
    let Some(indices) = app.indices.as_ref() else {
        render_message(frame, area, labels.not_loaded, scheme.info, scheme, labels);
        return;
    };

    match app.tab {
        crate::model::ResourceKind::Employee => match app.selection.selected() {
            Some(employee) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(9), Constraint::Min(4)])
                    .split(area);
                let lines = employee_lines(employee, indices, scheme, labels);
                render_lines(frame, chunks[0], labels.pane_details, lines, scheme);
                render_payroll(frame, chunks[1], &app.selection, scheme, labels);
            }
            None => render_message(frame, area, labels.no_selection, scheme.info, scheme, labels),
        },
        crate::model::ResourceKind::Department => match app.views.departments.current() {
            Some(department) => {
                let staff = app
                    .store
                    .employees()
                    .iter()
                    .filter(|e| e.department_id == Some(department.id))
                    .count();
                let lines = department_lines(department, staff, indices, scheme, labels);
                render_lines(frame, area, labels.pane_details, lines, scheme);
            }
            None => render_message(frame, area, labels.no_records, scheme.info, scheme, labels),
        },
        crate::model::ResourceKind::Company => match app.views.companies.current() {
            Some(company) => {
                let departments = app
                    .store
                    .departments()
                    .iter()
                    .filter(|d| d.company_id == Some(company.id))
                    .count();
                let staff = app
                    .store
                    .employees()
                    .iter()
                    .filter(|e| e.company_id == Some(company.id))
                    .count();
                let lines = company_lines(company, departments, staff, scheme, labels);
                render_lines(frame, area, labels.pane_details, lines, scheme);
            }
            None => render_message(frame, area, labels.no_records, scheme.info, scheme, labels),
        },
    }
}

fn render_message(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    message: &str,
    style: Style,
    scheme: &ColorScheme,
    labels: &Labels,
) {
    let block = Block::default()
        .title(labels.pane_details)
        .borders(Borders::ALL)
        .border_style(scheme.border);
    let p = Paragraph::new(Span::styled(message, style)).block(block);
    frame.render_widget(p, area);
}

fn render_lines(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    scheme: &ColorScheme,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(scheme.border);
    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(p, area);
}

/// `label: value` line.
fn field<'a>(label: &'a str, value: String, value_style: Style, scheme: &ColorScheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, scheme.detail_label),
        Span::styled(value, value_style),
    ])
}

/// A resolved reference, dimmed when it fell back to the placeholder.
fn reference<'a>(label: &'a str, resolved: &str, scheme: &ColorScheme) -> Line<'a> {
    let style = if resolved == UNASSIGNED {
        scheme.detail_unassigned
    } else {
        Style::default()
    };
    field(label, resolved.to_string(), style, scheme)
}

fn employee_lines<'a>(
    employee: &Employee,
    indices: &Indices,
    scheme: &ColorScheme,
    labels: &'a Labels,
) -> Vec<Line<'a>> {
    vec![
        field(labels.name, employee.label(), Style::default(), scheme),
        reference(labels.department, indices.department_of(employee), scheme),
        reference(labels.company, indices.company_of(employee), scheme),
        field(
            labels.status,
            format_status(Employee::KIND, employee.is_active()).to_string(),
            scheme.status_style(employee.is_active()),
            scheme,
        ),
        field(
            labels.salary,
            format_money(employee.employee_salary),
            scheme.detail_money,
            scheme,
        ),
        field(
            labels.born,
            format_optional_date(employee.date_of_birth.as_ref()),
            Style::default(),
            scheme,
        ),
        field(
            labels.started,
            format_optional_date(employee.beginning_of_work.as_ref()),
            Style::default(),
            scheme,
        ),
    ]
}

fn department_lines<'a>(
    department: &Department,
    staff: usize,
    indices: &Indices,
    scheme: &ColorScheme,
    labels: &'a Labels,
) -> Vec<Line<'a>> {
    vec![
        field(labels.name, department.label(), Style::default(), scheme),
        field(
            labels.location,
            department.department_location.clone(),
            Style::default(),
            scheme,
        ),
        reference(labels.company, indices.company_of_department(department), scheme),
        field(
            labels.status,
            format_status(Department::KIND, department.is_active()).to_string(),
            scheme.status_style(department.is_active()),
            scheme,
        ),
        field(labels.employees, staff.to_string(), Style::default(), scheme),
    ]
}

fn company_lines<'a>(
    company: &Company,
    departments: usize,
    staff: usize,
    scheme: &ColorScheme,
    labels: &'a Labels,
) -> Vec<Line<'a>> {
    vec![
        field(labels.name, company.label(), Style::default(), scheme),
        field(
            labels.location,
            company.company_location.clone(),
            Style::default(),
            scheme,
        ),
        field(
            labels.status,
            format_status(Company::KIND, company.is_active()).to_string(),
            scheme.status_style(company.is_active()),
            scheme,
        ),
        field(labels.departments, departments.to_string(), Style::default(), scheme),
        field(labels.employees, staff.to_string(), Style::default(), scheme),
    ]
}

fn payroll_lines<'a>(
    preview: &SalaryPreview,
    scheme: &ColorScheme,
    labels: &'a Labels,
) -> Vec<Line<'a>> {
    let money = |label: &'a str, amount: f64| field(label, format_money(amount), Style::default(), scheme);
    vec![
        money(labels.gross, preview.gross_salary),
        money(labels.pillar_1, preview.pension_pillar_1),
        money(labels.pillar_2, preview.pension_pillar_2),
        money(labels.health, preview.health_insurance),
        money(labels.tax_base, preview.tax_base),
        money(labels.tax, preview.total_tax_surtax),
        money(labels.deductions, preview.total_deductions()),
        field(
            labels.net,
            format_money(preview.net_salary),
            scheme.detail_money,
            scheme,
        ),
    ]
}

fn render_payroll(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    selection: &Selection,
    scheme: &ColorScheme,
    labels: &Labels,
) {
    let basis_style = if selection.input_is_valid() {
        scheme.detail_money
    } else {
        scheme.error
    };
    let mut lines = vec![field(
        labels.gross_basis,
        selection.input().to_string(),
        basis_style,
        scheme,
    )];
    match (selection.phase(), selection.result()) {
        (Phase::Computing { .. }, _) => {
            lines.push(Line::from(Span::styled(labels.computing, scheme.info)));
        }
        (Phase::Ready, Some(preview)) => lines.extend(payroll_lines(preview, scheme, labels)),
        _ if !selection.input_is_valid() => {
            lines.push(Line::from(Span::styled(labels.invalid_basis, scheme.error)));
        }
        _ => {}
    }
    render_lines(frame, area, labels.pane_payroll, lines, scheme);
}
