//! Declarative rendering of the todo page.
//!
//! # Design
//! Everything here is a pure function of the data handed in: the task cache,
//! the banner, the form, and a `now` used for relative timestamps. Markup is
//! produced by askama templates (auto-escaped), and rows carry only
//! `data-row` / `data-action` attributes. The host routes clicks back through
//! the `RowBinding` table returned alongside the markup.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::types::{Todo, TodoId};

/// What a rendered row lets the user do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Delete,
}

impl RowAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RowAction::Toggle => "toggle",
            RowAction::Delete => "delete",
        }
    }

    /// Parses the `data-action` attribute value of a row control.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "toggle" => Some(RowAction::Toggle),
            "delete" => Some(RowAction::Delete),
            _ => None,
        }
    }
}

const ROW_ACTIONS: &[RowAction] = &[RowAction::Toggle, RowAction::Delete];

/// Binds one rendered row to the task it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBinding {
    pub row: usize,
    pub id: TodoId,
    pub actions: &'static [RowAction],
}

/// What the list area currently shows when it is not showing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Loading,
    Ready,
    LoadFailed,
}

/// A row event resolved to the task it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCommand {
    pub id: TodoId,
    pub action: RowAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedList {
    pub html: String,
    pub bindings: Vec<RowBinding>,
}

impl RenderedList {
    /// Looks up the `data-row` / `data-action` pair a click reported.
    pub fn resolve(&self, row: usize, action: RowAction) -> Option<RowCommand> {
        self.bindings
            .iter()
            .find(|b| b.row == row && b.actions.contains(&action))
            .map(|b| RowCommand {
                id: b.id.clone(),
                action,
            })
    }
}

/// The three header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

/// Contents of the add-task form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
}

impl TodoForm {
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// Short label for how long ago `at` was, relative to `now`.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(at);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.format("%b %-d").to_string()
    }
}

struct RowView {
    index: usize,
    completed: bool,
    title: String,
    description: String,
    created: String,
    completed_label: String,
}

impl RowView {
    fn new(index: usize, todo: &Todo, now: DateTime<Utc>) -> Self {
        Self {
            index,
            completed: todo.completed,
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            created: format_relative(todo.created_at, now),
            completed_label: todo
                .completed_at
                .map(|at| format_relative(at, now))
                .unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "todo_rows.html")]
struct RowsTemplate {
    rows: Vec<RowView>,
}

#[derive(Template)]
#[template(path = "placeholder.html")]
struct PlaceholderTemplate {
    loading: bool,
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

impl PlaceholderTemplate {
    fn for_status(status: ListStatus) -> Self {
        match status {
            ListStatus::Loading => Self {
                loading: true,
                icon: "",
                title: "",
                text: "Loading your tasks...",
            },
            ListStatus::LoadFailed => Self {
                loading: false,
                icon: "⚠️",
                title: "Unable to Load Tasks",
                text: "Please check your connection and try again.",
            },
            ListStatus::Ready => Self {
                loading: false,
                icon: "📝",
                title: "No Tasks Yet",
                text: "Create your first task to get started!",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "banner.html")]
struct BannerTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    stats: Stats,
    banner: &'a str,
    form: &'a TodoForm,
    submitting: bool,
    list: &'a str,
}

/// Renders the list area: a placeholder, or one row per task.
pub fn render_todos(
    todos: &[Todo],
    status: ListStatus,
    now: DateTime<Utc>,
) -> Result<RenderedList, ApiError> {
    if status != ListStatus::Ready || todos.is_empty() {
        return Ok(RenderedList {
            html: PlaceholderTemplate::for_status(status).render()?,
            bindings: Vec::new(),
        });
    }

    let rows = todos
        .iter()
        .enumerate()
        .map(|(index, todo)| RowView::new(index, todo, now))
        .collect();
    let bindings = todos
        .iter()
        .enumerate()
        .map(|(row, todo)| RowBinding {
            row,
            id: todo.id.clone(),
            actions: ROW_ACTIONS,
        })
        .collect();

    Ok(RenderedList {
        html: RowsTemplate { rows }.render()?,
        bindings,
    })
}

/// Renders the dismissible error banner; empty when there is no error.
pub fn render_banner(error: Option<&str>) -> Result<String, ApiError> {
    match error {
        Some(message) => Ok(BannerTemplate { message }.render()?),
        None => Ok(String::new()),
    }
}

/// Inputs for a full-page render.
#[derive(Debug, Clone, Copy)]
pub struct PageParts<'a> {
    pub stats: Stats,
    pub banner: Option<&'a str>,
    pub form: &'a TodoForm,
    pub submitting: bool,
    pub list: &'a RenderedList,
}

pub fn render_page(parts: PageParts<'_>) -> Result<String, ApiError> {
    let banner = render_banner(parts.banner)?;
    let page = PageTemplate {
        stats: parts.stats,
        banner: &banner,
        form: parts.form,
        submitting: parts.submitting,
        list: &parts.list.html,
    };
    Ok(page.render()?)
}
