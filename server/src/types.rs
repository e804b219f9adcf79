//! Wire types for the todo API.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Body of `POST /todos`.
///
/// `title` is optional here so that a missing title reaches the store and is
/// reported as a validation failure instead of a decoding failure. An absent
/// or `null` `completed` means false.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /todos/{id}`. Absent and `null` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}
