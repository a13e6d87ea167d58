use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    query::{ListQuery, SortField, SortOrder},
    repository::{Page, TodoRepository},
    todo::{Status, Todo, TodoId},
};

/// True for connection strings that select SQLite's in-memory engine.
pub fn is_in_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = if is_in_memory_url(database_url) {
            // An in-memory database lives inside a single connection; pin the
            // pool to one permanent connection or the data vanishes between
            // requests.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options.connect(database_url).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                due_date TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, todo: &Todo) -> Result<()> {
        sqlx::query(
            "INSERT INTO todos (id, description, due_date, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(todo.id.0.to_string())
        .bind(&todo.description)
        .bind(todo.due_date.map(format_timestamp))
        .bind(todo.status.as_str())
        .bind(format_timestamp(todo.created_at))
        .bind(format_timestamp(todo.updated_at))
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(
            "SELECT id, description, due_date, status, created_at, updated_at
             FROM todos WHERE id = ?1",
        )
        .bind(id.0.to_string())
        .fetch_optional(&*self.pool)
        .await?;
        row.map(row_to_todo).transpose()
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Todo>> {
        // Total of the whole set, taken before the window is applied.
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&*self.pool)
            .await?;

        let sql = format!(
            "SELECT id, description, due_date, status, created_at, updated_at
             FROM todos ORDER BY {} LIMIT ?1 OFFSET ?2",
            order_clause(&query.order),
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(query.limit))
            .bind(i64::from(query.offset))
            .fetch_all(&*self.pool)
            .await?;
        let items = rows.into_iter().map(row_to_todo).collect::<Result<Vec<_>>>()?;
        Ok(Page { items, total: total as u64 })
    }

    async fn replace(&self, todo: &Todo) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE todos
             SET description = ?2, due_date = ?3, status = ?4, created_at = ?5, updated_at = ?6
             WHERE id = ?1",
        )
        .bind(todo.id.0.to_string())
        .bind(&todo.description)
        .bind(todo.due_date.map(format_timestamp))
        .bind(todo.status.as_str())
        .bind(format_timestamp(todo.created_at))
        .bind(format_timestamp(todo.updated_at))
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// Column names come from a fixed whitelist, never from the request.
fn order_clause(order: &SortOrder) -> String {
    let column = match order.field {
        SortField::DueDate => "due_date",
        SortField::Description => "description",
        SortField::Status => "status",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    };
    format!("{} {}", column, order.direction.as_str())
}

// Fixed fractional width keeps lexicographic ORDER BY chronological.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id: String = row.get("id");
    let description: String = row.get("description");
    let due_date: Option<String> = row.get("due_date");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Todo {
        id: TodoId(Uuid::parse_str(&id)?),
        description,
        due_date: due_date.as_deref().map(parse_timestamp).transpose()?,
        status: Status::parse(&status).ok_or_else(|| anyhow!("unknown status `{status}` in store"))?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
