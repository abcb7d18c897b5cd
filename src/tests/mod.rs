/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Integration tests that exercise multiple modules together (App +
//! store + indices + views + selection). Per-module unit tests live
//! in each module's own `#[cfg(test)] mod tests` block.

use std::sync::Arc;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::api::DeleteMode;
use crate::app::Viewed;
use crate::index::UNASSIGNED;
use crate::model::Employee;
use crate::model::ResourceKind;
use crate::notify::NoticeKind;
use crate::render::ui;
use crate::selection::Phase;
use crate::testing::FakeDirectory;
use crate::testing::employee;
use crate::testing::sample_snapshot;
use crate::testing::token;

fn config(page_size: usize) -> ConsoleConfig {
    ConsoleConfig {
        token: Some(token()),
        page_size,
        ..ConsoleConfig::default()
    }
}

async fn loaded_app(api: FakeDirectory, page_size: usize) -> (App<FakeDirectory>, Arc<FakeDirectory>) {
    let api = Arc::new(api);
    let mut app = App::new(Arc::clone(&api), &config(page_size));
    assert!(app.reload().await);
    (app, api)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn press(app: &mut App<FakeDirectory>, keys: &str) {
    for c in keys.chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
}

/// Replace whatever the open prompt holds with `text` and submit it.
async fn submit_prompt(app: &mut App<FakeDirectory>, text: &str) {
    for _ in 0..32 {
        app.handle_key(key(KeyCode::Backspace)).await;
    }
    press(app, text).await;
    app.handle_key(key(KeyCode::Enter)).await;
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// Paging to the last page shows only the remainder.
#[tokio::test]
async fn paging_reaches_partial_last_page() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(11, 3, 2)), 4).await;
    assert_eq!(app.views.employees.total_pages(), 3);

    press(&mut app, "nn").await;
    let window = app.views.employees.window();
    assert_eq!(window.page, 3);
    assert_eq!(window.total_pages, 3);
    let ids: Vec<_> = window.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![9, 10, 11]);

    // Past the end is a no-op.
    press(&mut app, "n").await;
    assert_eq!(app.views.employees.page(), 3);
}

// Selecting an employee issues one payroll request at the default basis.
#[tokio::test]
async fn selecting_employee_requests_payroll_preview() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(11, 3, 2)), 4).await;

    press(&mut app, "njj").await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert_eq!(app.selection.selected_id(), Some(7));
    assert!(matches!(app.selection.phase(), Phase::Computing { .. }));

    assert!(app.next_payroll_reply().await);
    assert_eq!(app.selection.phase(), Phase::Ready);
    assert_eq!(api.pay_requests(), vec![(7, "1000.00".to_string())]);
    let preview = app.selection.result().unwrap();
    assert_eq!(preview.employee_id, 7);
    assert_eq!(preview.gross_salary, 1000.0);
}

// A reply for an older basis cannot overwrite a newer one.
#[tokio::test]
async fn stale_payroll_reply_is_dropped() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(4, 1, 1)), 4).await;
    let gate = api.gate_pay(1);

    app.handle_key(key(KeyCode::Enter)).await;
    press(&mut app, "b").await;
    submit_prompt(&mut app, "2000").await;

    // The second request completes while the first is held.
    assert!(app.next_payroll_reply().await);
    assert_eq!(app.selection.result().unwrap().gross_salary, 2000.0);

    drop(gate);
    assert!(app.next_payroll_reply().await);
    assert_eq!(app.selection.phase(), Phase::Ready);
    assert_eq!(app.selection.result().unwrap().gross_salary, 2000.0);
    assert_eq!(
        api.pay_requests(),
        vec![(1, "1000.00".to_string()), (1, "2000".to_string())]
    );
}

// Switching employees while the first preview is in flight shows only
// the second employee's figures.
#[tokio::test]
async fn switching_employee_discards_late_reply() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(4, 1, 1)), 4).await;
    let gate = api.gate_pay(1);

    app.handle_key(key(KeyCode::Enter)).await;
    press(&mut app, "j").await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert_eq!(app.selection.selected_id(), Some(2));
    assert!(app.selection.result().is_none());

    assert!(app.next_payroll_reply().await);
    assert_eq!(app.selection.result().unwrap().employee_id, 2);

    gate.send(()).unwrap();
    assert!(app.next_payroll_reply().await);
    assert_eq!(app.selection.phase(), Phase::Ready);
    assert_eq!(app.selection.result().unwrap().employee_id, 2);
}

// An invalid basis clears the preview without a request.
#[tokio::test]
async fn invalid_basis_issues_no_request() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(2, 1, 1)), 4).await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.next_payroll_reply().await);

    press(&mut app, "b").await;
    submit_prompt(&mut app, "-5").await;
    assert_eq!(app.selection.phase(), Phase::Selected);
    assert!(app.selection.result().is_none());
    assert_eq!(api.pay_requests().len(), 1);
}

// Deactivating the selected employee removes it locally and clears
// the selection.
#[tokio::test]
async fn deleting_selected_employee_clears_selection() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(11, 3, 2)), 4).await;
    press(&mut app, "njj").await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.next_payroll_reply().await);

    press(&mut app, "dy").await;
    assert_eq!(api.deletes(), vec![(ResourceKind::Employee, 7, DeleteMode::Soft)]);
    assert_eq!(app.selection.phase(), Phase::Idle);
    assert_eq!(app.store.employees().len(), 10);
    assert!(app.store.employees().iter().all(|e| e.id != 7));
    // A replaced source goes back to page 1.
    assert_eq!(app.views.employees.page(), 1);
    assert_eq!(app.views.employees.total_pages(), 3);
    assert_eq!(app.notices.latest().unwrap().kind, NoticeKind::Success);
    // No refetch after a successful mutation.
    assert_eq!(api.list_calls(), 3);
}

// Any key other than `y` cancels the confirmation.
#[tokio::test]
async fn delete_confirmation_can_be_cancelled() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(3, 1, 1)), 4).await;
    press(&mut app, "Dn").await;
    assert!(api.deletes().is_empty());
    assert_eq!(app.store.employees().len(), 3);
}

// A failed delete leaves the loaded collection untouched.
#[tokio::test]
async fn failed_delete_keeps_collection_identity() {
    let api = FakeDirectory::new(sample_snapshot(5, 2, 1));
    api.fail_deletes(ConsoleError::ServerError {
        status: 500,
        message: "boom".into(),
    });
    let (mut app, _api) = loaded_app(api, 4).await;
    press(&mut app, "2").await;
    let before = Arc::clone(app.store.departments());
    let index_before = app.indices.as_ref().unwrap().departments.len();

    press(&mut app, "Dy").await;
    assert!(Arc::ptr_eq(&before, app.store.departments()));
    assert_eq!(app.indices.as_ref().unwrap().departments.len(), index_before);
    assert_eq!(app.notices.latest().unwrap().kind, NoticeKind::Error);
}

// Hard-deleting a company leaves its departments pointing nowhere.
#[tokio::test]
async fn deleted_reference_resolves_to_fallback() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(4, 2, 2)), 4).await;
    let dept = app.store.departments()[0].clone();
    assert_eq!(dept.company_id, Some(1));
    assert_eq!(
        app.indices.as_ref().unwrap().company_of_department(&dept),
        "Company 1"
    );

    press(&mut app, "3Dy").await;
    assert_eq!(
        app.indices.as_ref().unwrap().company_of_department(&dept),
        UNASSIGNED
    );
}

// A foreign key that names no record resolves to the fallback.
#[tokio::test]
async fn dangling_foreign_key_resolves_to_fallback() {
    let mut snapshot = sample_snapshot(2, 1, 1);
    snapshot.employees.push(employee(3, Some(99), None));
    let (app, _api) = loaded_app(FakeDirectory::new(snapshot), 4).await;
    let indices = app.indices.as_ref().unwrap();
    let orphan = &app.store.employees()[2];
    assert_eq!(indices.department_of(orphan), UNASSIGNED);
    assert_eq!(indices.company_of(orphan), UNASSIGNED);
    assert_eq!(indices.department_of(&app.store.employees()[0]), "Department 1");
}

// A search with no matches shows an empty filter, not an error.
#[tokio::test]
async fn search_without_matches_is_empty_filter() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(5, 1, 1)), 4).await;
    press(&mut app, "/").await;
    submit_prompt(&mut app, "zzz").await;

    let filter = app.views.employees.filter().unwrap();
    assert_eq!(filter.query, "zzz");
    assert!(filter.results.is_empty());
    assert_eq!(app.views.employees.total_pages(), 1);
    assert_eq!(app.notices.latest().unwrap().kind, NoticeKind::Info);

    // Esc drops the filter.
    app.handle_key(key(KeyCode::Esc)).await;
    assert!(app.views.employees.filter().is_none());
    assert_eq!(app.views.employees.row_count(), 5);
}

// Search hits replace the list and reset to page 1.
#[tokio::test]
async fn search_hits_replace_list() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(12, 1, 1)), 4).await;
    press(&mut app, "n/").await;
    submit_prompt(&mut app, "name1").await;

    let view = &app.views.employees;
    assert_eq!(view.page(), 1);
    // Name1, Name10, Name11, Name12
    assert_eq!(view.row_count(), 4);
}

// Creating a record appends it, drops the active search and returns
// to page 1.
#[tokio::test]
async fn create_appends_and_resets_view() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(1, 1, 5)), 2).await;
    press(&mut app, "3/").await;
    submit_prompt(&mut app, "Company").await;
    press(&mut app, "n").await;
    assert_eq!(app.views.companies.page(), 2);

    press(&mut app, "c").await;
    submit_prompt(&mut app, "Acme").await;

    let companies = app.store.companies();
    assert_eq!(companies.len(), 6);
    assert_eq!(companies[5].id, 6);
    assert_eq!(companies[5].company_name, "Acme");
    assert!(app.views.companies.filter().is_none());
    assert_eq!(app.views.companies.page(), 1);
    assert_eq!(app.views.companies.total_pages(), 3);
    assert_eq!(app.notices.latest().unwrap().kind, NoticeKind::Success);
}

// An employee draft carries both name parts and a start date.
#[test]
fn employee_draft_has_required_fields() {
    let draft = Employee::draft_named("Ana Horvat").unwrap();
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["employeeName"], "Ana");
    assert_eq!(json["employeeSurname"], "Horvat");
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(json["beginningOfWork"], serde_json::Value::from(today));
    assert_eq!(json["employeed"], true);

    assert!(Employee::draft_named("Ana").is_none());
    assert!(Employee::draft_named("Ana   ").is_none());
}

// A one-word employee name is refused before any request.
#[tokio::test]
async fn single_word_employee_name_is_refused() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(3, 1, 1)), 4).await;
    let before = Arc::clone(app.store.employees());
    press(&mut app, "c").await;
    submit_prompt(&mut app, "Ana").await;

    assert!(Arc::ptr_eq(&before, app.store.employees()));
    let notice = app.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.message.contains("surname"));
}

// A failed payroll request leaves the selection without a preview and
// reports the failure.
#[tokio::test]
async fn failed_payroll_reports_error() {
    let api = FakeDirectory::new(sample_snapshot(3, 1, 1));
    api.fail_pay(ConsoleError::ServerError {
        status: 500,
        message: "payroll unavailable".into(),
    });
    let (mut app, api) = loaded_app(api, 4).await;

    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.next_payroll_reply().await);

    assert_eq!(api.pay_requests(), vec![(1, "1000.00".to_string())]);
    assert_eq!(app.selection.phase(), Phase::Selected);
    assert!(app.selection.result().is_none());
    let notice = app.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("payroll unavailable"));
}

// A full reload re-points the selection at the fresh record.
#[tokio::test]
async fn reload_keeps_surviving_selection() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(3, 1, 1)), 4).await;
    press(&mut app, "j").await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.next_payroll_reply().await);

    press(&mut app, "r").await;
    assert_eq!(api.list_calls(), 6);
    assert_eq!(app.selection.selected_id(), Some(2));
    assert_eq!(app.selection.phase(), Phase::Ready);
    assert_eq!(app.store.generation(), 2);
}

// One failed collection fails the whole reload.
#[tokio::test]
async fn partial_reload_failure_publishes_nothing() {
    let (mut app, api) = loaded_app(FakeDirectory::new(sample_snapshot(3, 1, 1)), 4).await;
    let before = Arc::clone(app.store.employees());
    api.fail_list(
        ResourceKind::Company,
        ConsoleError::Connectivity("refused".into()),
    );

    assert!(!app.reload().await);
    assert!(Arc::ptr_eq(&before, app.store.employees()));
    assert_eq!(app.store.generation(), 1);
    assert!(app.indices.is_some());
    assert_eq!(app.notices.len(), 1);
}

// Without a token nothing is fetched.
#[tokio::test]
async fn missing_token_blocks_loading() {
    let api = Arc::new(FakeDirectory::new(sample_snapshot(3, 1, 1)));
    let mut app = App::new(Arc::clone(&api), &ConsoleConfig::default());
    assert!(!app.reload().await);
    assert_eq!(api.list_calls(), 0);
    assert!(app.indices.is_none());
    assert_eq!(app.notices.latest().unwrap().kind, NoticeKind::Error);
}

// Ctrl-C quits from any mode.
#[tokio::test]
async fn ctrl_c_quits_from_prompt() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(1, 1, 1)), 4).await;
    press(&mut app, "/").await;
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        .await;
    assert!(app.should_quit());
}

// A loaded frame shows rows, resolved references and the payroll pane.
#[tokio::test]
async fn renders_loaded_console() {
    let (mut app, _api) = loaded_app(FakeDirectory::new(sample_snapshot(3, 2, 1)), 4).await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert!(app.next_payroll_reply().await);

    let mut terminal = Terminal::new(TestBackend::new(140, 32)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    let text = screen_text(&terminal);
    assert!(text.contains("Name1 Surname1"));
    assert!(text.contains("Department 1"));
    assert!(text.contains("Payroll preview"));
    assert!(text.contains("1000.00 EUR"));
    assert!(text.contains("1/1"));
}

// Before the first load the detail pane shows a placeholder.
#[tokio::test]
async fn renders_placeholder_before_load() {
    let api = Arc::new(FakeDirectory::new(sample_snapshot(1, 1, 1)));
    let app = App::new(api, &ConsoleConfig::default());
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    terminal.draw(|frame| ui(frame, &app)).unwrap();
    let text = screen_text(&terminal);
    assert!(text.contains("Directory not loaded"));
    assert!(text.contains("no token"));
}
