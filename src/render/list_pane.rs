/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;

use crate::api::DirectoryApi;
use crate::app::App;
use crate::format::format_status;
use crate::index::Indices;
use crate::index::UNASSIGNED;
use crate::model::Company;
use crate::model::Department;
use crate::model::Employee;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::ResourceKind;
use crate::view::ViewState;

/// One-line description of a row, resolving foreign keys through
/// `indices` when they are available.
fn describe_employee(e: &Employee, indices: Option<&Indices>) -> String {
    let department = indices.map_or(UNASSIGNED, |i| i.department_of(e));
    let company = indices.map_or(UNASSIGNED, |i| i.company_of(e));
    format!("{}  ·  {}  ·  {}", e.label(), department, company)
}

fn describe_department(d: &Department, indices: Option<&Indices>) -> String {
    let company = indices.map_or(UNASSIGNED, |i| i.company_of_department(d));
    format!("{}  ·  {}  ·  {}", d.label(), d.department_location, company)
}

fn describe_company(c: &Company, _indices: Option<&Indices>) -> String {
    format!(
        "{}  ·  {}  ·  {}",
        c.label(),
        c.company_location,
        format_status(ResourceKind::Company, c.is_active())
    )
}

/// Render the record list for the active tab (left pane).
///
/// Style precedence: cursor row > selected employee > inactive > plain.
pub(crate) fn render_list_pane<A: DirectoryApi>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    app: &App<A>,
) {
    let indices = app.indices.as_ref();
    let selected = app.selection.selected_id();
    let (items, cursor) = match app.tab {
        ResourceKind::Employee => {
            list_items(app, &app.views.employees, selected, |e| describe_employee(e, indices))
        }
        ResourceKind::Department => list_items(app, &app.views.departments, None, |d| {
            describe_department(d, indices)
        }),
        ResourceKind::Company => {
            list_items(app, &app.views.companies, None, |c| describe_company(c, indices))
        }
    };

    let block = Block::default()
        .title(app.tab.title())
        .borders(Borders::ALL)
        .border_style(app.theme.scheme.border_focused);

    if items.is_empty() {
        let empty = List::new(vec![ListItem::new(Span::styled(
            app.theme.labels.no_records,
            app.theme.scheme.info,
        ))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default());
    let mut list_state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn list_items<'a, A: DirectoryApi, R: Record>(
    app: &App<A>,
    view: &'a ViewState<R>,
    selected: Option<RecordId>,
    describe: impl Fn(&R) -> String,
) -> (Vec<ListItem<'a>>, usize) {
    let scheme = &app.theme.scheme;
    let labels = &app.theme.labels;
    let cursor = view.cursor().pos();
    let items = view
        .window()
        .items
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let is_selected = selected == Some(record.id());
            let style = if row == cursor {
                scheme.row_cursor
            } else if is_selected {
                scheme.row_selected
            } else if !record.is_active() {
                scheme.row_inactive
            } else {
                scheme.row
            };
            let marker = if row == cursor {
                labels.selection_caret
            } else if is_selected {
                labels.selected_marker
            } else {
                "  "
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, describe(record)),
                style,
            )))
        })
        .collect();
    (items, cursor)
}
