use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub Uuid);

impl Default for TodoId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

/// Lifecycle state of a task. Serialized with its screaming-case wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    New,
    InProgress,
    Done,
    Cancelled,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::New => "NEW",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
            Status::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Status::New),
            "IN_PROGRESS" => Some(Status::InProgress),
            "DONE" => Some(Status::Done),
            "CANCELLED" => Some(Status::Cancelled),
            _ => None,
        }
    }
}

/// The persisted task record. The store owns the authoritative copy; anything
/// handed out by queries is a request-scoped clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// Validated input for a wholesale replacement of a task's mutable fields.
/// This is also the only way a task moves between statuses; no transition
/// is restricted, reopening a DONE task is legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Status,
}

impl Todo {
    /// Build a brand-new task: fresh id, status forced to NEW, both
    /// timestamps stamped with the same instant.
    pub fn create(input: NewTodo) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::default(),
            description: input.description,
            due_date: input.due_date,
            status: Status::New,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replacement record for an update: id and created_at carry over from
    /// the original, updated_at is refreshed.
    pub fn revise(&self, update: TodoUpdate) -> Self {
        Self {
            id: self.id,
            description: update.description,
            due_date: update.due_date,
            status: update.status,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Derived, never stored: a task is finished once it reached a terminal
    /// status.
    pub fn finished(&self) -> bool {
        matches!(self.status, Status::Done | Status::Cancelled)
    }
}
