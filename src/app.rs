/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::actions::InputMode;
use crate::actions::KeyResult;
use crate::actions::PendingDelete;
use crate::api::AuthToken;
use crate::api::DeleteMode;
use crate::api::DirectoryApi;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::fetch::refresh_store;
use crate::index::Indices;
use crate::model::Company;
use crate::model::CompanyDraft;
use crate::model::DateField;
use crate::model::Department;
use crate::model::DepartmentDraft;
use crate::model::Employee;
use crate::model::EmployeeDraft;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::ResourceKind;
use crate::model::SalaryPreview;
use crate::notify;
use crate::notify::Notice;
use crate::notify::NoticeLog;
use crate::notify::Notifier;
use crate::reconcile::apply_create;
use crate::reconcile::apply_delete;
use crate::reconcile::apply_refresh;
use crate::reconcile::with_replaced;
use crate::reconcile::without_record;
use crate::render::ui;
use crate::selection::PayrollRequest;
use crate::selection::Selection;
use crate::selection::SelectionAction;
use crate::selection::SelectionEffect;
use crate::store::EntityStore;
use crate::store::Stored;
use crate::theme::Theme;
use crate::view::Cursor;
use crate::view::ViewState;

/// How many notices the status bar history keeps.
const NOTICE_HISTORY: usize = 16;

/// One view per resource tab.
pub(crate) struct Views {
    pub(crate) employees: ViewState<Employee>,
    pub(crate) departments: ViewState<Department>,
    pub(crate) companies: ViewState<Company>,
}

impl Views {
    fn new(store: &EntityStore, page_size: usize) -> Self {
        Self {
            employees: ViewState::new(Arc::clone(store.employees()), page_size),
            departments: ViewState::new(Arc::clone(store.departments()), page_size),
            companies: ViewState::new(Arc::clone(store.companies()), page_size),
        }
    }

    /// After a full reload: every replaced source goes back to page 1.
    fn sync_sources(&mut self, store: &EntityStore) {
        self.employees.sync_source(store.employees());
        self.departments.sync_source(store.departments());
        self.companies.sync_source(store.companies());
    }
}

/// A record type shown on its own tab.
pub(crate) trait Viewed: Stored {
    fn view(views: &Views) -> &ViewState<Self>;
    fn view_mut(views: &mut Views) -> &mut ViewState<Self>;
    /// Create payload for a record known only by name. Remaining
    /// fields take neutral defaults; the server validates. `None` when
    /// the name alone cannot make a valid record.
    fn draft_named(name: &str) -> Option<Self::Draft>;
}

impl Viewed for Employee {
    fn view(views: &Views) -> &ViewState<Self> {
        &views.employees
    }
    fn view_mut(views: &mut Views) -> &mut ViewState<Self> {
        &mut views.employees
    }
    /// `"First Last"`; the server requires both parts and a start
    /// date, which defaults to today.
    fn draft_named(name: &str) -> Option<EmployeeDraft> {
        let (first, last) = name.trim().split_once(' ')?;
        let (first, last) = (first.trim(), last.trim());
        if first.is_empty() || last.is_empty() {
            return None;
        }
        let today = chrono::Local::now().date_naive();
        Some(EmployeeDraft {
            employee_name: first.to_string(),
            employee_surname: last.to_string(),
            employee_salary: 0.0,
            date_of_birth: None,
            beginning_of_work: Some(DateField::Text(today.format("%Y-%m-%d").to_string())),
            employeed: true,
            department_id: None,
            company_id: None,
        })
    }
}

impl Viewed for Department {
    fn view(views: &Views) -> &ViewState<Self> {
        &views.departments
    }
    fn view_mut(views: &mut Views) -> &mut ViewState<Self> {
        &mut views.departments
    }
    fn draft_named(name: &str) -> Option<DepartmentDraft> {
        Some(DepartmentDraft {
            department_name: name.to_string(),
            department_location: String::new(),
            active: true,
            company_id: None,
        })
    }
}

impl Viewed for Company {
    fn view(views: &Views) -> &ViewState<Self> {
        &views.companies
    }
    fn view_mut(views: &mut Views) -> &mut ViewState<Self> {
        &mut views.companies
    }
    fn draft_named(name: &str) -> Option<CompanyDraft> {
        Some(CompanyDraft {
            company_name: name.to_string(),
            company_location: String::new(),
            bankruptcy: false,
        })
    }
}

/// A payroll reply travelling back from its request task.
#[derive(Debug)]
pub(crate) struct PayrollReply {
    pub(crate) ticket: u64,
    pub(crate) result: Result<SalaryPreview, ConsoleError>,
}

/// Outcome of a key press in a one-line text prompt.
enum TextInput {
    Editing(String),
    Submit(String),
    Cancel,
}

fn edit_text(key: KeyEvent, mut buffer: String) -> TextInput {
    match key.code {
        KeyCode::Enter => TextInput::Submit(buffer),
        KeyCode::Esc => TextInput::Cancel,
        KeyCode::Backspace => {
            buffer.pop();
            TextInput::Editing(buffer)
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            TextInput::Editing(buffer)
        }
        _ => TextInput::Editing(buffer),
    }
}

/// Runtime state for the directory console.
///
/// `App` owns the API handle, the entity store and the indices built
/// from it, one paged view per tab, and the employee selection with
/// its payroll preview. Payroll requests run as spawned tasks and
/// report back over `payroll_rx`; everything else is awaited inline
/// on the event loop.
pub struct App<A: DirectoryApi> {
    pub(crate) api: Arc<A>,
    /// Shown in the header.
    pub(crate) base_url: String,
    pub(crate) token: Option<AuthToken>,
    pub(crate) should_quit: bool,

    pub(crate) store: EntityStore,
    /// `None` until the first successful load.
    pub(crate) indices: Option<Indices>,
    pub(crate) views: Views,
    pub(crate) tab: ResourceKind,
    pub(crate) selection: Selection,
    pub(crate) mode: InputMode,

    pub(crate) notifier: Notifier,
    notice_rx: mpsc::UnboundedReceiver<Notice>,
    pub(crate) notices: NoticeLog,

    payroll_tx: mpsc::UnboundedSender<PayrollReply>,
    payroll_rx: mpsc::UnboundedReceiver<PayrollReply>,

    /// Monotonic sequence counter for load stamps.
    pub(crate) seq_counter: u64,
    pub(crate) theme: Theme,
}

impl<A: DirectoryApi> App<A> {
    pub fn new(api: Arc<A>, config: &ConsoleConfig) -> Self {
        let store = EntityStore::new();
        let views = Views::new(&store, config.page_size);
        let (notifier, notice_rx) = notify::channel();
        let (payroll_tx, payroll_rx) = mpsc::unbounded_channel();
        Self {
            api,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            should_quit: false,
            store,
            indices: None,
            views,
            tab: ResourceKind::Employee,
            selection: Selection::new(config.gross_basis.clone()),
            mode: InputMode::Normal,
            notifier,
            notice_rx,
            notices: NoticeLog::new(NOTICE_HISTORY),
            payroll_tx,
            payroll_rx,
            seq_counter: 0,
            theme: Theme::nord(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Refetch every collection. On success indices and views are
    /// rebuilt and the selection is re-pointed at the fresh record (or
    /// cleared if it vanished). Returns `true` when a snapshot was
    /// published.
    pub async fn reload(&mut self) -> bool {
        let published = refresh_store(
            &*self.api,
            self.token.as_ref(),
            &mut self.store,
            &self.notifier,
            &mut self.seq_counter,
        )
        .await;
        if published {
            // Every collection was replaced, so every index is rebuilt.
            self.indices = Indices::from_store(&self.store);
            self.views.sync_sources(&self.store);
            let selected = self.selection.selected_id();
            if let Some(id) = selected {
                match self.store.employees().iter().find(|e| e.id == id).cloned() {
                    Some(fresh) => self.dispatch(SelectionAction::Select(fresh)),
                    None => self.dispatch(SelectionAction::Clear),
                }
            }
        }
        self.drain_notices();
        published
    }

    /// Move queued notices into the history shown by the status bar.
    pub(crate) fn drain_notices(&mut self) {
        self.notices.drain_from(&mut self.notice_rx);
    }

    /// Apply a selection action and carry out the effect it asks for.
    pub(crate) fn dispatch(&mut self, action: SelectionAction) {
        match self.selection.reduce(action) {
            SelectionEffect::None => {}
            SelectionEffect::Issue(request) => self.issue_payroll(request),
            SelectionEffect::Notify(err) => self.notifier.error(&err),
        }
    }

    fn issue_payroll(&self, request: PayrollRequest) {
        let tx = self.payroll_tx.clone();
        let Some(token) = self.token.clone() else {
            let reply = PayrollReply {
                ticket: request.ticket,
                result: Err(ConsoleError::Unauthenticated),
            };
            if tx.send(reply).is_err() {
                tracing::debug!("payroll reply dropped, console closed");
            }
            return;
        };
        let api = Arc::clone(&self.api);
        tracing::debug!(
            ticket = request.ticket,
            employee_id = request.employee_id,
            basis = %request.basis,
            "payroll request issued"
        );
        tokio::spawn(async move {
            let result = api
                .calculate_pay(&token, request.employee_id, &request.basis)
                .await;
            let reply = PayrollReply {
                ticket: request.ticket,
                result,
            };
            if tx.send(reply).is_err() {
                tracing::debug!("payroll reply dropped, console closed");
            }
        });
    }

    pub(crate) fn apply_payroll_reply(&mut self, reply: PayrollReply) {
        self.dispatch(SelectionAction::Resolved {
            ticket: reply.ticket,
            result: reply.result,
        });
        self.drain_notices();
    }

    /// Wait for the next payroll reply and apply it.
    #[cfg(test)]
    pub(crate) async fn next_payroll_reply(&mut self) -> bool {
        match self.payroll_rx.recv().await {
            Some(reply) => {
                self.apply_payroll_reply(reply);
                true
            }
            None => false,
        }
    }

    fn require_token(&self) -> Option<AuthToken> {
        if self.token.is_none() {
            self.notifier.error(&ConsoleError::Unauthenticated);
        }
        self.token.clone()
    }

    /// Re-point indices and the `R` view at the store after a local
    /// reconciliation.
    fn sync_after_mutation<R: Viewed>(&mut self) {
        if let Some(indices) = &mut self.indices {
            indices.sync(&self.store);
        }
        let source = Arc::clone(self.store.collection::<R>());
        R::view_mut(&mut self.views).reconcile_source(&source);
    }

    /// Adopt the store's copy of the selected employee, if it is still
    /// there.
    fn refresh_selected(&mut self) {
        let Some(id) = self.selection.selected_id() else {
            return;
        };
        if let Some(fresh) = self.store.employees().iter().find(|e| e.id == id).cloned() {
            self.dispatch(SelectionAction::Select(fresh));
        }
    }

    pub(crate) async fn delete_record<R: Viewed>(&mut self, id: RecordId, mode: DeleteMode) {
        let Some(token) = self.require_token() else {
            return;
        };
        let current = Arc::clone(self.store.collection::<R>());
        let outcome = apply_delete(&*self.api, &token, &current, id, mode).await;
        match outcome.result {
            Ok(()) => {
                self.store.replace::<R>(outcome.collection);
                let view = R::view_mut(&mut self.views);
                let filtered = view.filter().map(|f| without_record(&f.results, id));
                if let Some(results) = filtered {
                    view.replace_filter_results(results);
                }
                self.sync_after_mutation::<R>();
                if R::KIND == ResourceKind::Employee && self.selection.selected_id() == Some(id) {
                    self.dispatch(SelectionAction::Clear);
                }
                let verb = match mode {
                    DeleteMode::Soft => "deactivated",
                    DeleteMode::Hard => "deleted",
                };
                self.notifier.success(format!("{} {} {}", R::KIND, id, verb));
            }
            Err(err) => self.notifier.error(&err),
        }
    }

    pub(crate) async fn refresh_record<R: Viewed>(&mut self, id: RecordId) {
        let Some(token) = self.require_token() else {
            return;
        };
        let current = Arc::clone(self.store.collection::<R>());
        let outcome = apply_refresh(&*self.api, &token, &current, id).await;
        match outcome.result {
            Ok(()) => {
                self.store.replace::<R>(outcome.collection);
                let fresh = self
                    .store
                    .collection::<R>()
                    .iter()
                    .find(|r| r.id() == id)
                    .cloned();
                if let Some(fresh) = fresh {
                    let view = R::view_mut(&mut self.views);
                    let filtered = view
                        .filter()
                        .and_then(|f| with_replaced(&f.results, fresh));
                    if let Some(results) = filtered {
                        view.replace_filter_results(results);
                    }
                }
                self.sync_after_mutation::<R>();
                self.refresh_selected();
                self.notifier.info(format!("{} {} refreshed", R::KIND, id));
            }
            Err(err) => self.notifier.error(&err),
        }
    }

    pub(crate) async fn create_record<R: Viewed>(&mut self, draft: R::Draft) {
        let Some(token) = self.require_token() else {
            return;
        };
        let current = Arc::clone(self.store.collection::<R>());
        let outcome = apply_create(&*self.api, &token, &current, &draft).await;
        match outcome.result {
            Ok(()) => {
                self.store.replace::<R>(outcome.collection);
                let created = self.store.collection::<R>().last().cloned();
                // The active query says nothing about the new record.
                R::view_mut(&mut self.views).clear_filter();
                self.sync_after_mutation::<R>();
                if let Some(created) = created {
                    self.notifier
                        .success(format!("{} {} created", R::KIND, created.label()));
                }
            }
            Err(err) => self.notifier.error(&err),
        }
    }

    async fn create_named<R: Viewed>(&mut self, name: &str) {
        match R::draft_named(name) {
            Some(draft) => self.create_record::<R>(draft).await,
            None => self
                .notifier
                .info(format!("{} needs a name and a surname", R::KIND)),
        }
    }

    /// Run a name search on the `R` tab. A blank query clears the
    /// filter; a 404 means no matches.
    pub(crate) async fn search<R: Viewed>(&mut self, query: String) {
        let query = query.trim().to_string();
        if query.is_empty() {
            R::view_mut(&mut self.views).clear_filter();
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };
        match self.api.search_by_name::<R>(&token, &query).await {
            Ok(hits) => {
                tracing::debug!(kind = %R::KIND, query = %query, hits = hits.len(), "search");
                R::view_mut(&mut self.views).set_filter(query, hits);
            }
            Err(ConsoleError::ClientError { status: 404, .. }) => {
                self.notifier.info(format!(
                    "no {} match \"{}\"",
                    R::KIND.title().to_lowercase(),
                    query
                ));
                R::view_mut(&mut self.views).set_filter(query, Vec::new());
            }
            Err(err) => self.notifier.error(&err),
        }
    }

    /// Row cursor of the active tab.
    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor {
        match self.tab {
            ResourceKind::Employee => self.views.employees.cursor_mut(),
            ResourceKind::Department => self.views.departments.cursor_mut(),
            ResourceKind::Company => self.views.companies.cursor_mut(),
        }
    }

    /// `(id, label)` of the row under the cursor on the active tab.
    pub(crate) fn current_row(&self) -> Option<(RecordId, String)> {
        fn row<R: Record>(record: Option<&R>) -> Option<(RecordId, String)> {
            record.map(|r| (r.id(), r.label()))
        }
        match self.tab {
            ResourceKind::Employee => row(self.views.employees.current()),
            ResourceKind::Department => row(self.views.departments.current()),
            ResourceKind::Company => row(self.views.companies.current()),
        }
    }

    fn change_page(&mut self, forward: bool) -> bool {
        let changed = match (self.tab, forward) {
            (ResourceKind::Employee, true) => self.views.employees.next_page(),
            (ResourceKind::Employee, false) => self.views.employees.prev_page(),
            (ResourceKind::Department, true) => self.views.departments.next_page(),
            (ResourceKind::Department, false) => self.views.departments.prev_page(),
            (ResourceKind::Company, true) => self.views.companies.next_page(),
            (ResourceKind::Company, false) => self.views.companies.prev_page(),
        };
        if changed && self.tab == ResourceKind::Employee {
            self.dispatch(SelectionAction::Clear);
        }
        changed
    }

    fn clear_filter(&mut self) -> bool {
        match self.tab {
            ResourceKind::Employee => self.views.employees.clear_filter(),
            ResourceKind::Department => self.views.departments.clear_filter(),
            ResourceKind::Company => self.views.companies.clear_filter(),
        }
    }

    fn current_query(&self) -> String {
        let query = match self.tab {
            ResourceKind::Employee => self.views.employees.filter().map(|f| &f.query),
            ResourceKind::Department => self.views.departments.filter().map(|f| &f.query),
            ResourceKind::Company => self.views.companies.filter().map(|f| &f.query),
        };
        query.cloned().unwrap_or_default()
    }

    /// Handle a single keypress and update in-memory UI state.
    ///
    /// Returns the network work the key asks for; the caller runs it
    /// with [`App::perform`].
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> KeyResult {
        if key.kind != KeyEventKind::Press {
            return KeyResult::None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return KeyResult::None;
        }
        match std::mem::replace(&mut self.mode, InputMode::Normal) {
            InputMode::Normal => self.on_normal_key(key),
            InputMode::Search(buffer) => match edit_text(key, buffer) {
                TextInput::Editing(buffer) => {
                    self.mode = InputMode::Search(buffer);
                    KeyResult::None
                }
                TextInput::Submit(query) => KeyResult::Search(query),
                TextInput::Cancel => KeyResult::None,
            },
            InputMode::Basis(buffer) => match edit_text(key, buffer) {
                TextInput::Editing(buffer) => {
                    self.mode = InputMode::Basis(buffer);
                    KeyResult::None
                }
                TextInput::Submit(basis) => {
                    self.dispatch(SelectionAction::EditInput(basis.trim().to_string()));
                    KeyResult::None
                }
                TextInput::Cancel => KeyResult::None,
            },
            InputMode::Create(buffer) => match edit_text(key, buffer) {
                TextInput::Editing(buffer) => {
                    self.mode = InputMode::Create(buffer);
                    KeyResult::None
                }
                TextInput::Submit(name) if !name.trim().is_empty() => KeyResult::Create {
                    kind: self.tab,
                    name: name.trim().to_string(),
                },
                TextInput::Submit(_) | TextInput::Cancel => KeyResult::None,
            },
            InputMode::Confirm(pending) => {
                if key.code == KeyCode::Char('y') {
                    KeyResult::Delete {
                        kind: pending.kind,
                        id: pending.id,
                        mode: pending.mode,
                    }
                } else {
                    self.notifier.info(format!("{} cancelled", pending.mode));
                    KeyResult::None
                }
            }
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                KeyResult::None
            }
            KeyCode::Char('1') => {
                self.tab = ResourceKind::Employee;
                KeyResult::None
            }
            KeyCode::Char('2') => {
                self.tab = ResourceKind::Department;
                KeyResult::None
            }
            KeyCode::Char('3') => {
                self.tab = ResourceKind::Company;
                KeyResult::None
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                KeyResult::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor_mut().move_up();
                KeyResult::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor_mut().move_down();
                KeyResult::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor_mut().home();
                KeyResult::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor_mut().end();
                KeyResult::None
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => {
                self.change_page(true);
                KeyResult::None
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => {
                self.change_page(false);
                KeyResult::None
            }
            KeyCode::Enter => {
                if self.tab == ResourceKind::Employee {
                    if let Some(employee) = self.views.employees.current().cloned() {
                        self.dispatch(SelectionAction::Select(employee));
                    }
                }
                KeyResult::None
            }
            KeyCode::Char('b') => {
                self.mode = InputMode::Basis(self.selection.input().to_string());
                KeyResult::None
            }
            KeyCode::Char('/') => {
                self.mode = InputMode::Search(self.current_query());
                KeyResult::None
            }
            KeyCode::Char('c') => {
                self.mode = InputMode::Create(String::new());
                KeyResult::None
            }
            KeyCode::Esc => {
                if !self.clear_filter() && self.tab == ResourceKind::Employee {
                    self.dispatch(SelectionAction::Clear);
                }
                KeyResult::None
            }
            KeyCode::Char(c @ ('d' | 'D')) => {
                let mode = if c == 'd' {
                    DeleteMode::Soft
                } else {
                    DeleteMode::Hard
                };
                if let Some((id, label)) = self.current_row() {
                    self.mode = InputMode::Confirm(PendingDelete {
                        kind: self.tab,
                        id,
                        mode,
                        label,
                    });
                }
                KeyResult::None
            }
            KeyCode::Char('r') => KeyResult::Reload,
            KeyCode::Char('R') => match self.current_row() {
                Some((id, _)) => KeyResult::RefreshRecord { kind: self.tab, id },
                None => KeyResult::None,
            },
            _ => KeyResult::None,
        }
    }

    /// Run the network work a key asked for.
    pub(crate) async fn perform(&mut self, result: KeyResult) {
        match result {
            KeyResult::None => {}
            KeyResult::Reload => {
                self.reload().await;
            }
            KeyResult::Search(query) => match self.tab {
                ResourceKind::Employee => self.search::<Employee>(query).await,
                ResourceKind::Department => self.search::<Department>(query).await,
                ResourceKind::Company => self.search::<Company>(query).await,
            },
            KeyResult::Delete { kind, id, mode } => match kind {
                ResourceKind::Employee => self.delete_record::<Employee>(id, mode).await,
                ResourceKind::Department => self.delete_record::<Department>(id, mode).await,
                ResourceKind::Company => self.delete_record::<Company>(id, mode).await,
            },
            KeyResult::RefreshRecord { kind, id } => match kind {
                ResourceKind::Employee => self.refresh_record::<Employee>(id).await,
                ResourceKind::Department => self.refresh_record::<Department>(id).await,
                ResourceKind::Company => self.refresh_record::<Company>(id).await,
            },
            KeyResult::Create { kind, name } => match kind {
                ResourceKind::Employee => self.create_named::<Employee>(&name).await,
                ResourceKind::Department => self.create_named::<Department>(&name).await,
                ResourceKind::Company => self.create_named::<Company>(&name).await,
            },
        }
        self.drain_notices();
    }

    /// `on_key` followed by `perform`.
    pub(crate) async fn handle_key(&mut self, key: KeyEvent) {
        let result = self.on_key(key);
        self.perform(result).await;
        self.drain_notices();
    }
}

/// Drive the main event loop for the console.
///
/// Redraws on every key, payroll reply, and once a second so the
/// "loaded ... ago" stamp stays current. Nothing is refetched on the
/// tick; reloads are explicit.
pub async fn run_app<A: DirectoryApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<A>,
) -> io::Result<()> {
    let mut redraw = tokio::time::interval(Duration::from_secs(1));
    let mut events = EventStream::new();

    loop {
        app.drain_notices();
        terminal.draw(|frame| ui(frame, &app))?;

        tokio::select! {
            _ = redraw.tick() => {}
            Some(reply) = app.payroll_rx.recv() => {
                app.apply_payroll_reply(reply);
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => app.handle_key(key).await,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => break,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
