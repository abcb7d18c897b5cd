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
use ratatui::widgets::Paragraph;

use crate::actions::InputMode;
use crate::api::DirectoryApi;
use crate::app::App;
use crate::fetch::LoadStatus;
use crate::fetch::now_micros;
use crate::format::format_relative_time;
use crate::model::ResourceKind;

/// Render the top status/header bar.
///
/// Line 1: app name • base URL • load status.
/// Line 2: tabs • page x/y • active search.
pub(crate) fn render_header<A: DirectoryApi>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    app: &App<A>,
) {
    let l = &app.theme.labels;
    let s = &app.theme.scheme;

    let mut line1 = vec![
        Span::styled(l.app_name, s.app_name),
        Span::styled(l.separator, s.stat_label),
        Span::styled(app.base_url.as_str(), s.stat_url),
        Span::styled(l.separator, s.stat_label),
    ];
    match app.store.status() {
        LoadStatus::Unknown => line1.push(Span::styled(l.not_loaded, s.info)),
        LoadStatus::Loading { .. } => line1.push(Span::styled(l.loading, s.stat_value)),
        LoadStatus::Ready { stamp, .. } => {
            line1.push(Span::styled(l.loaded, s.stat_label));
            line1.push(Span::styled(
                format_relative_time(stamp.ts_micros, now_micros()),
                s.stat_value,
            ));
        }
        LoadStatus::Error { error, .. } => {
            line1.push(Span::styled(format!("ERROR: {}", error), s.error));
        }
    }
    if app.token.is_none() {
        line1.push(Span::styled(l.separator, s.stat_label));
        line1.push(Span::styled(l.no_token, s.error));
    }

    let mut line2 = Vec::new();
    for (i, kind) in ResourceKind::ALL.iter().enumerate() {
        let style = if *kind == app.tab { s.tab_active } else { s.tab };
        line2.push(Span::styled(format!("{} {}", i + 1, kind.title()), style));
        line2.push(Span::styled("  ", Style::default()));
    }
    let (page, total, query) = match app.tab {
        ResourceKind::Employee => page_info(&app.views.employees),
        ResourceKind::Department => page_info(&app.views.departments),
        ResourceKind::Company => page_info(&app.views.companies),
    };
    line2.push(Span::styled(l.separator, s.stat_label));
    line2.push(Span::styled(l.page, s.stat_label));
    line2.push(Span::styled(format!("{}/{}", page, total), s.stat_value));
    if let Some(query) = query {
        line2.push(Span::styled(l.separator, s.stat_label));
        line2.push(Span::styled(l.search, s.stat_label));
        line2.push(Span::styled(format!("\"{}\"", query), s.stat_value));
    }

    let header = Paragraph::new(vec![Line::from(line1), Line::from(line2)]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(s.border),
    );
    frame.render_widget(header, area);
}

fn page_info<R>(view: &crate::view::ViewState<R>) -> (usize, usize, Option<String>) {
    (
        view.page(),
        view.total_pages(),
        view.filter().map(|f| f.query.clone()),
    )
}

/// Render the footer: the active prompt or latest notice, then the
/// key help line.
pub(crate) fn render_footer<A: DirectoryApi>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    app: &App<A>,
) {
    let l = &app.theme.labels;
    let s = &app.theme.scheme;

    let status = match &app.mode {
        InputMode::Search(buffer) => Line::from(vec![
            Span::styled(l.footer_search_prompt, s.footer_prompt),
            Span::raw(buffer.as_str()),
        ]),
        InputMode::Basis(buffer) => Line::from(vec![
            Span::styled(l.footer_basis_prompt, s.footer_prompt),
            Span::raw(buffer.as_str()),
        ]),
        InputMode::Create(buffer) => Line::from(vec![
            Span::styled(format!("new {} name: ", app.tab), s.footer_prompt),
            Span::raw(buffer.as_str()),
        ]),
        InputMode::Confirm(pending) => Line::from(vec![
            Span::styled(pending.prompt(), s.error),
            Span::styled(l.footer_confirm, s.footer_prompt),
        ]),
        InputMode::Normal => match app.notices.latest() {
            Some(notice) => Line::from(Span::styled(
                notice.message.as_str(),
                s.notice_style(notice.kind),
            )),
            None => Line::default(),
        },
    };

    let footer = Paragraph::new(vec![
        status,
        Line::from(Span::styled(l.footer_help_text, s.footer_help)),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(s.border),
    );
    frame.render_widget(footer, area);
}
