//! In-memory todo collection.
//!
//! Todos are kept in insertion order. Ids come from a counter that only moves
//! forward, so an id is never handed out twice even after its todo is deleted.

use crate::error::StoreError;
use crate::types::{CreateTodo, Todo, UpdateTodo};

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    /// All todos in insertion order.
    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Appends a new todo. An absent or empty title is rejected and leaves
    /// both the collection and the id counter untouched.
    pub fn create(&mut self, input: CreateTodo) -> Result<Todo, StoreError> {
        let title = match input.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(StoreError::Validation),
        };
        let todo = Todo {
            id: self.next_id,
            title,
            completed: input.completed.unwrap_or(false),
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub fn get(&self, id: u64) -> Result<&Todo, StoreError> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// Replaces only the fields present in `fields`.
    pub fn update(&mut self, id: u64, fields: UpdateTodo) -> Result<&Todo, StoreError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = fields.title {
            todo.title = title;
        }
        if let Some(completed) = fields.completed {
            todo.completed = completed;
        }
        tracing::debug!(id, "todo updated");
        Ok(&*todo)
    }

    /// Removes the todo and returns it. Remaining todos keep their order.
    pub fn delete(&mut self, id: u64) -> Result<Todo, StoreError> {
        let idx = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = self.todos.remove(idx);
        tracing::debug!(id, "todo deleted");
        Ok(removed)
    }
}
