//! Stateless request builder and response parser for the todo API.
//!
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the HTTP round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Banner, CreateTodo, ErrorBody, Health, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_banner(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/", self.base_url))
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/health", self.base_url))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.todos_url())
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.todo_url(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Post, self.todos_url(), to_json(input)?))
    }

    pub fn build_update_todo(&self, id: u64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Put, self.todo_url(id), to_json(input)?))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.todo_url(id))
    }

    pub fn parse_banner(&self, response: HttpResponse) -> Result<Banner, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    /// Returns the todo the server removed.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: u64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

fn to_json<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => Err(ApiError::Validation(body.error)),
            Err(_) => Err(ApiError::HttpError {
                status: 400,
                body: response.body.clone(),
            }),
        },
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
