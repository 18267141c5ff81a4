//! The employee manager as a model-view-update state machine.
//!
//! [`Session::handle`] applies an [`Event`] to the in-memory state and returns
//! the [`Effect`]s it needs performed. It never touches the network itself;
//! front ends run the effects and feed their completions back in as events.
//! Every successful write is followed by a full refresh of the list.

use std::{
    collections::{HashSet, VecDeque},
    future::Future,
    sync::Arc,
};

use tracing::{debug, info, warn};

use crate::core::{
    api::{ApiError, EmployeeApi},
    draft::{Draft, Field, Submission},
    model::{Employee, EmployeeId, NewEmployee},
    notice::Notices,
    store::{EmployeeStore, RefreshTicket},
    table::{Column, Page, PageNav, SortBy, TableView},
};

pub type ApiResult<T> = Result<T, Arc<ApiError>>;

#[derive(Debug, Clone)]
pub enum ApiCall {
    List(RefreshTicket),
    Create(NewEmployee),
    Update(Employee),
    Delete(EmployeeId),
}

#[derive(Debug, Clone)]
pub enum Effect {
    Call(ApiCall),
    /// Ask the user a yes/no question before deleting.
    ConfirmDelete(EmployeeId),
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Listed(RefreshTicket, ApiResult<Vec<Employee>>),
    Created(ApiResult<Employee>),
    Updated(ApiResult<Employee>),
    Deleted(EmployeeId, ApiResult<String>),
}

#[derive(Debug, Clone)]
pub enum Event {
    Mounted,
    RefreshRequested,
    FieldChanged(Field, String),
    EditRequested(Employee),
    CancelRequested,
    SubmitRequested,
    DeleteRequested(EmployeeId),
    DeleteConfirmed(EmployeeId),
    DeleteDeclined(EmployeeId),
    FilterChanged(String),
    SortToggled(Column),
    SortSet(Option<SortBy>),
    PageRequested(PageNav),
    PageSelected(usize),
    NoticeDismissed(u64),
    Completed(Outcome),
}

#[derive(Debug, Default)]
pub struct Session {
    store: EmployeeStore,
    draft: Draft,
    table: TableView,
    notices: Notices,
    /// The write currently awaiting a response, as it was sent.
    in_flight: Option<Submission>,
    /// Employees with an open delete prompt.
    pending_deletes: HashSet<EmployeeId>,
}

impl Session {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: TableView::new(page_size),
            ..Self::default()
        }
    }

    pub fn employees(&self) -> &[Employee] {
        self.store.employees()
    }

    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn page(&self) -> Page<'_> {
        self.table.page(self.store.employees())
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_delete_pending(&self, id: EmployeeId) -> bool {
        self.pending_deletes.contains(&id)
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Mounted | Event::RefreshRequested => vec![self.refresh()],
            Event::FieldChanged(field, value) => {
                self.draft.set_field(field, value);
                vec![]
            }
            Event::EditRequested(record) => {
                self.draft.start_edit(&record);
                vec![]
            }
            Event::CancelRequested => {
                self.draft.reset();
                vec![]
            }
            Event::SubmitRequested => self.submit(),
            Event::DeleteRequested(id) => {
                if !self.pending_deletes.insert(id) {
                    debug!("delete prompt for employee {id} is already open");
                    return vec![];
                }
                vec![Effect::ConfirmDelete(id)]
            }
            Event::DeleteConfirmed(id) => {
                if !self.pending_deletes.remove(&id) {
                    debug!("ignoring confirmation for employee {id} with no pending delete");
                    return vec![];
                }
                vec![Effect::Call(ApiCall::Delete(id))]
            }
            Event::DeleteDeclined(id) => {
                self.pending_deletes.remove(&id);
                vec![]
            }
            Event::FilterChanged(filter) => {
                self.table.set_filter(filter);
                vec![]
            }
            Event::SortToggled(column) => {
                self.table.toggle_sort(column);
                vec![]
            }
            Event::SortSet(sort) => {
                self.table.set_sort(sort);
                vec![]
            }
            Event::PageRequested(nav) => {
                self.table.navigate(nav, self.store.employees());
                vec![]
            }
            Event::PageSelected(index) => {
                self.table.go_to(index, self.store.employees());
                vec![]
            }
            Event::NoticeDismissed(id) => {
                self.notices.dismiss(id);
                vec![]
            }
            Event::Completed(outcome) => self.complete(outcome),
        }
    }

    fn refresh(&mut self) -> Effect {
        Effect::Call(ApiCall::List(self.store.begin_refresh()))
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.in_flight.is_some() {
            debug!("submit ignored, a write is already in flight");
            return vec![];
        }
        match self.draft.submission() {
            Err(error) => {
                debug!("draft rejected: {error}");
                self.draft.reject(error);
                vec![]
            }
            Ok(submission) => {
                let call = match &submission {
                    Submission::Create(employee) => ApiCall::Create(employee.clone()),
                    Submission::Update(employee) => ApiCall::Update(employee.clone()),
                };
                self.in_flight = Some(submission);
                vec![Effect::Call(call)]
            }
        }
    }

    /// Clears the form after a successful write, unless the user moved on to
    /// another row or kept typing while the request was out.
    fn finish_write(&mut self) {
        let sent = self.in_flight.take();
        if sent.is_some() && self.draft.submission().ok() == sent {
            self.draft.reset();
        } else {
            debug!("draft changed while the write was in flight, keeping it");
        }
    }

    fn complete(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Listed(ticket, Ok(employees)) => {
                let count = employees.len();
                if self.store.apply(ticket, employees) {
                    debug!("loaded {count} employees");
                    self.table.clamp(self.store.employees());
                } else {
                    debug!("discarding stale employee list");
                }
                vec![]
            }
            Outcome::Listed(ticket, Err(error)) => {
                if self.store.fail(ticket) {
                    warn!("failed to load employees: {error}");
                    self.notices
                        .error(format!("Could not load employees: {error}"));
                }
                vec![]
            }
            Outcome::Created(result) => {
                match result {
                    Ok(employee) => {
                        info!("created employee {}", employee.employee_id);
                        self.notices.info(format!(
                            "Data added successfully: {}",
                            describe(&employee)
                        ));
                        self.finish_write();
                        vec![self.refresh()]
                    }
                    Err(error) => {
                        self.in_flight = None;
                        warn!("failed to create employee: {error}");
                        self.notices
                            .error(format!("Could not add employee: {error}"));
                        vec![]
                    }
                }
            }
            Outcome::Updated(result) => {
                match result {
                    Ok(employee) => {
                        info!("updated employee {}", employee.employee_id);
                        self.notices.info(format!(
                            "Data updated successfully: {}",
                            describe(&employee)
                        ));
                        self.finish_write();
                        vec![self.refresh()]
                    }
                    Err(error) => {
                        self.in_flight = None;
                        warn!("failed to update employee: {error}");
                        self.notices
                            .error(format!("Could not update employee: {error}"));
                        vec![]
                    }
                }
            }
            Outcome::Deleted(id, Ok(confirmation)) => {
                info!("deleted employee {id}");
                let confirmation = confirmation.trim();
                if confirmation.is_empty() {
                    self.notices.info(format!("Employee {id} deleted"));
                } else {
                    self.notices
                        .info(format!("Employee {id} deleted: {confirmation}"));
                }
                if self.draft.employee_id() == Some(id) {
                    self.draft.reset();
                }
                vec![self.refresh()]
            }
            Outcome::Deleted(id, Err(error)) => {
                warn!("failed to delete employee {id}: {error}");
                self.notices
                    .error(format!("Could not delete employee {id}: {error}"));
                vec![]
            }
        }
    }
}

fn describe(employee: &Employee) -> String {
    serde_json::to_string(employee).unwrap_or_else(|_| format!("{employee:?}"))
}

/// Runs one API call and wraps its result as the completion event.
pub fn perform<A: EmployeeApi>(
    api: &A,
    call: ApiCall,
) -> impl Future<Output = Event> + Send + 'static {
    let api = api.clone();
    async move {
        let outcome = match call {
            ApiCall::List(ticket) => Outcome::Listed(ticket, api.list().await.map_err(Arc::new)),
            ApiCall::Create(employee) => {
                Outcome::Created(api.create(employee).await.map_err(Arc::new))
            }
            ApiCall::Update(employee) => {
                Outcome::Updated(api.update(employee).await.map_err(Arc::new))
            }
            ApiCall::Delete(id) => Outcome::Deleted(id, api.delete(id).await.map_err(Arc::new)),
        };
        Event::Completed(outcome)
    }
}

/// Feeds `event` to the session and performs every resulting effect in
/// order until none remain. `confirm` answers delete prompts.
pub async fn drive<A, F>(session: &mut Session, api: &A, event: Event, mut confirm: F)
where
    A: EmployeeApi,
    F: FnMut(EmployeeId) -> bool,
{
    let mut queue: VecDeque<Effect> = session.handle(event).into();
    while let Some(effect) = queue.pop_front() {
        let next = match effect {
            Effect::Call(call) => perform(api, call).await,
            Effect::ConfirmDelete(id) => {
                if confirm(id) {
                    Event::DeleteConfirmed(id)
                } else {
                    Event::DeleteDeclined(id)
                }
            }
        };
        queue.extend(session.handle(next));
    }
}
