//! The todo page component: task cache, error banner, form and submit state.
//!
//! # Design
//! Every network operation is split in two. `begin_*` updates presentation
//! state and returns the `HttpRequest` to execute (or `None` when the
//! operation stops locally); `finish_*` consumes whatever the transport
//! produced. The host decides when the response arrives, so several
//! operations can be outstanding at once. The blocking drivers
//! (`load_todos`, `add_todo`, ...) run both halves over a `Transport`.
//!
//! Failures never escape an operation: each one ends as a single banner
//! message plus a `tracing::error!` event.

use chrono::{DateTime, Utc};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{
    self, ListStatus, PageParts, RenderedList, RowAction, RowCommand, Stats, TodoForm,
};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

const MSG_TITLE_REQUIRED: &str = "Please enter a task title";
const MSG_LOAD_FAILED: &str = "Failed to load todos. Please try again.";
const MSG_ADD_REJECTED: &str = "Failed to add todo";
const MSG_ADD_FAILED: &str = "Failed to add task";
const MSG_UPDATE_FAILED: &str = "Failed to update task";
const MSG_DELETE_FAILED: &str = "Failed to delete task";

/// Outcome of executing a request: a response, or no response at all.
pub type Outcome = Result<HttpResponse, ApiError>;

/// Interactive yes/no question, answered by the user.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoApp {
    client: TodoClient,
    todos: Vec<Todo>,
    status: ListStatus,
    error: Option<String>,
    form: TodoForm,
    submitting: bool,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            status: ListStatus::Loading,
            error: None,
            form: TodoForm::default(),
            submitting: false,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    /// Current banner message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TodoForm {
        &mut self.form
    }

    /// True while a create request is outstanding; the submit control is
    /// disabled for that time.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    pub fn begin_load(&mut self) -> HttpRequest {
        self.error = None;
        self.status = ListStatus::Loading;
        self.client.build_list_todos()
    }

    pub fn finish_load(&mut self, outcome: Outcome) {
        match outcome.and_then(|response| self.client.parse_list_todos(response)) {
            Ok(todos) => {
                self.todos = todos;
                self.status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading todos");
                self.todos.clear();
                self.status = ListStatus::LoadFailed;
                self.show_error(MSG_LOAD_FAILED);
            }
        }
    }

    #[tracing::instrument(skip(self, transport))]
    pub fn load_todos(&mut self, transport: &impl Transport) {
        let request = self.begin_load();
        let outcome = transport.execute(request);
        self.finish_load(outcome);
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    /// Validates the input and marks the submit control busy. Returns `None`
    /// when nothing should be sent: a create is already in flight, or the
    /// title is blank.
    pub fn begin_add(&mut self, title: &str, description: &str) -> Option<HttpRequest> {
        if self.submitting {
            tracing::debug!("create already in flight, ignoring submit");
            return None;
        }

        let title = title.trim();
        if title.is_empty() {
            self.show_error(MSG_TITLE_REQUIRED);
            return None;
        }
        let description = description.trim();
        let input = CreateTodo {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };

        self.error = None;
        match self.client.build_create_todo(&input) {
            Ok(request) => {
                self.submitting = true;
                Some(request)
            }
            Err(e) => {
                tracing::error!(error = %e, "error adding todo");
                self.show_error(MSG_ADD_FAILED);
                None
            }
        }
    }

    pub fn finish_add(&mut self, outcome: Outcome) {
        self.submitting = false;
        match outcome.and_then(|response| self.client.parse_create_todo(response)) {
            Ok(todo) => {
                self.todos.insert(0, todo);
                self.status = ListStatus::Ready;
                self.form.reset();
            }
            Err(e) => {
                tracing::error!(error = %e, "error adding todo");
                let message = match e.server_message() {
                    Some(message) => message.to_string(),
                    None if e.is_server_reported() => MSG_ADD_REJECTED.to_string(),
                    None => MSG_ADD_FAILED.to_string(),
                };
                self.show_error(message);
            }
        }
    }

    #[tracing::instrument(skip(self, transport))]
    pub fn add_todo(&mut self, transport: &impl Transport, title: &str, description: &str) {
        if let Some(request) = self.begin_add(title, description) {
            let outcome = transport.execute(request);
            self.finish_add(outcome);
        }
    }

    /// Submits the current form contents.
    pub fn submit_form(&mut self, transport: &impl Transport) {
        let TodoForm { title, description } = self.form.clone();
        self.add_todo(transport, &title, &description);
    }

    // -----------------------------------------------------------------------
    // Toggle
    // -----------------------------------------------------------------------

    /// `None` when `id` is not in the cache.
    pub fn begin_toggle(&mut self, id: &TodoId) -> Option<HttpRequest> {
        let completed = self.find(id)?.completed;
        self.error = None;
        match self.client.build_update_todo(id, &UpdateTodo { completed: !completed }) {
            Ok(request) => Some(request),
            Err(e) => {
                tracing::error!(error = %e, %id, "error toggling todo");
                self.show_error(MSG_UPDATE_FAILED);
                None
            }
        }
    }

    /// Merges the fields the server returned into the cached record.
    pub fn finish_toggle(&mut self, id: &TodoId, outcome: Outcome) {
        match outcome.and_then(|response| self.client.parse_update_todo(response)) {
            Ok(patch) => {
                // The record may have been deleted while the update was out.
                if let Some(todo) = self.todos.iter_mut().find(|t| &t.id == id) {
                    todo.apply(patch);
                }
                self.status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "error toggling todo");
                self.show_error(MSG_UPDATE_FAILED);
            }
        }
    }

    #[tracing::instrument(skip(self, transport))]
    pub fn toggle_todo(&mut self, transport: &impl Transport, id: &TodoId) {
        if let Some(request) = self.begin_toggle(id) {
            let outcome = transport.execute(request);
            self.finish_toggle(id, outcome);
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// `None` when the user declines the confirmation.
    pub fn begin_delete(&mut self, id: &TodoId, confirm: &impl Confirm) -> Option<HttpRequest> {
        if !confirm.confirm(DELETE_PROMPT) {
            return None;
        }
        self.error = None;
        Some(self.client.build_delete_todo(id))
    }

    pub fn finish_delete(&mut self, id: &TodoId, outcome: Outcome) {
        match outcome.and_then(|response| self.client.parse_delete_todo(response)) {
            Ok(()) => {
                self.todos.retain(|t| &t.id != id);
                self.status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "error deleting todo");
                self.show_error(MSG_DELETE_FAILED);
            }
        }
    }

    #[tracing::instrument(skip(self, transport, confirm))]
    pub fn delete_todo(&mut self, transport: &impl Transport, confirm: &impl Confirm, id: &TodoId) {
        if let Some(request) = self.begin_delete(id, confirm) {
            let outcome = transport.execute(request);
            self.finish_delete(id, outcome);
        }
    }

    /// Runs the operation a row control was bound to.
    pub fn dispatch(&mut self, transport: &impl Transport, confirm: &impl Confirm, command: &RowCommand) {
        match command.action {
            RowAction::Toggle => self.toggle_todo(transport, &command.id),
            RowAction::Delete => self.delete_todo(transport, confirm, &command.id),
        }
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> Stats {
        Stats::from_todos(&self.todos)
    }

    pub fn render_todos(&self, now: DateTime<Utc>) -> Result<RenderedList, ApiError> {
        render::render_todos(&self.todos, self.status, now)
    }

    pub fn render_banner(&self) -> Result<String, ApiError> {
        render::render_banner(self.error())
    }

    pub fn render_page(&self, now: DateTime<Utc>) -> Result<String, ApiError> {
        let list = self.render_todos(now)?;
        render::render_page(PageParts {
            stats: self.stats(),
            banner: self.error(),
            form: &self.form,
            submitting: self.submitting,
            list: &list,
        })
    }
}
