use async_trait::async_trait;

use super::query::ListQuery;
use super::todo::{Todo, TodoId};

/// One window of an ordered scan together with the size of the whole
/// unpaginated set. The total is computed before the window is applied, so it
/// is independent of offset and limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Contract of the backing store: a queryable collection of task records.
/// Implementations own the authoritative copies for the lifetime of the
/// process; nothing here promises durability.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn insert(&self, todo: &Todo) -> anyhow::Result<()>;
    async fn find(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self, query: &ListQuery) -> anyhow::Result<Page<Todo>>;
    /// Full replacement by id. Returns false when no record carries that id.
    async fn replace(&self, todo: &Todo) -> anyhow::Result<bool>;
    /// Hard delete. Returns false when no record carries that id.
    async fn remove(&self, id: TodoId) -> anyhow::Result<bool>;
}
