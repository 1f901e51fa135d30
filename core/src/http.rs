//! Plain-data request and response shapes exchanged with the todo server.
//!
//! `TodoClient` fills in an [`HttpRequest`] for each `/todos` call and reads
//! back an [`HttpResponse`] that the embedding application obtained with its
//! own HTTP stack. Nothing in this module opens a socket.

/// Verbs used by the todo API. `Put` and `Patch` both perform a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A call against the todo API, ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL: the client's base URL joined with `/todos` or `/todos/{id}`.
    pub path: String,
    /// Only `content-type: application/json` on requests that carry a body.
    pub headers: Vec<(String, String)>,
    /// Serialized `CreateTodo` or `UpdateTodo`; `None` for GET and DELETE.
    pub body: Option<String>,
}

/// What the server sent back. `body` is empty for a 204 from DELETE.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
