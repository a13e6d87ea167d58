use anyhow::Result;
use async_trait::async_trait;

use crate::domain::query::ListQuery;
use crate::domain::repository::{Page, TodoRepository};
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoUpdate};

/// The task operations exposed to the HTTP layer. Handlers only ever see
/// this trait, never the store directly.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: NewTodo) -> Result<Todo>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn list(&self, query: &ListQuery) -> Result<Page<Todo>>;
    async fn update(&self, id: TodoId, input: TodoUpdate) -> Result<Option<Todo>>;
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: NewTodo) -> Result<Todo> {
        let todo = Todo::create(input);
        self.repo.insert(&todo).await?;
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        self.repo.find(id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Todo>> {
        self.repo.list(query).await
    }

    async fn update(&self, id: TodoId, input: TodoUpdate) -> Result<Option<Todo>> {
        let Some(existing) = self.repo.find(id).await? else { return Ok(None) };
        // Read-then-replace without a version check: concurrent updates to
        // the same id race and the last write wins.
        let revised = existing.revise(input);
        self.repo.replace(&revised).await?;
        Ok(Some(revised))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        self.repo.remove(id).await
    }
}
