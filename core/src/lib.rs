//! Client core for the single-page todo list.
//!
//! # Overview
//! Holds the page's task cache, error banner, form and submit state, talks to
//! the todo API through plain-data requests and responses (host-does-IO), and
//! renders the page to escaped HTML.
//!
//! # Design
//! - `TodoClient` is stateless: it builds `HttpRequest`s and parses
//!   `HttpResponse`s for the four API calls.
//! - `TodoApp` owns the cache. Each operation has a `begin_*` / `finish_*`
//!   pair around the network round-trip, plus a blocking driver over a
//!   `Transport`.
//! - Rendering is a pure function of `TodoApp` state and a clock reading.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod transport;
pub mod types;

pub use app::{Confirm, Outcome, TodoApp, DELETE_PROMPT};
pub use client::{TodoClient, DEFAULT_API_BASE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{ListStatus, RenderedList, RowAction, RowBinding, RowCommand, Stats, TodoForm};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateTodo, ErrorBody, Todo, TodoId, TodoPatch, UpdateTodo};
