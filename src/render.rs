/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

// Render reads App state only; nothing here mutates it or issues
// requests.

pub mod detail_pane;
pub mod list_pane;
pub mod status_bar;

use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;

use self::detail_pane::render_detail_pane;
use self::list_pane::render_list_pane;
use self::status_bar::render_footer;
use self::status_bar::render_header;
use crate::api::DirectoryApi;
use crate::app::App;

/// Render a full frame of the console.
///
/// Splits the screen into header/body/footer regions and delegates to
/// the corresponding render helpers.
pub(crate) fn ui<A: DirectoryApi>(frame: &mut ratatui::Frame<'_>, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_body(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);
}

/// Split the body into the record list (left) and the detail pane
/// (right).
pub(crate) fn render_body<A: DirectoryApi>(
    frame: &mut ratatui::Frame<'_>,
    area: ratatui::layout::Rect,
    app: &App<A>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_list_pane(frame, chunks[0], app);
    render_detail_pane(frame, chunks[1], app);
}
