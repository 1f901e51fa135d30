//! Typed client for the todo service's `/todos` resource.
//!
//! Every operation comes as a pair: `TodoClient::build_*` turns typed input
//! into an [`HttpRequest`], and `TodoClient::parse_*` turns the matching
//! [`HttpResponse`] into a [`Todo`] or an [`ApiError`]. Field-level 400
//! bodies surface as [`ApiError::Validation`], a 404 as [`ApiError::NotFound`].
//!
//! The DTOs in [`types`] mirror the server's JSON independently of the
//! `todo-server` crate. The live-HTTP tests in `tests/` fail if the two drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
