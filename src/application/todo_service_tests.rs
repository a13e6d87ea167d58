#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::query::{ListQuery, SortDirection, SortField, SortOrder};
    use crate::domain::repository::{Page, TodoRepository};
    use crate::domain::todo::{NewTodo, Status, Todo, TodoId, TodoUpdate};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::cmp;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        items: Arc<Mutex<HashMap<uuid::Uuid, Todo>>>,
    }

    fn compare(a: &Todo, b: &Todo, field: SortField) -> cmp::Ordering {
        match field {
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }

        async fn insert(&self, todo: &Todo) -> Result<()> {
            self.items.lock().unwrap().insert(todo.id.0, todo.clone());
            Ok(())
        }

        async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
            Ok(self.items.lock().unwrap().get(&id.0).cloned())
        }

        async fn list(&self, query: &ListQuery) -> Result<Page<Todo>> {
            let mut all: Vec<Todo> = self.items.lock().unwrap().values().cloned().collect();
            let total = all.len() as u64;
            all.sort_by(|a, b| compare(a, b, query.order.field));
            if query.order.direction == SortDirection::Descending {
                all.reverse();
            }
            let items = all
                .into_iter()
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .collect();
            Ok(Page { items, total })
        }

        async fn replace(&self, todo: &Todo) -> Result<bool> {
            let mut map = self.items.lock().unwrap();
            if !map.contains_key(&todo.id.0) {
                return Ok(false);
            }
            map.insert(todo.id.0, todo.clone());
            Ok(true)
        }

        async fn remove(&self, id: TodoId) -> Result<bool> {
            Ok(self.items.lock().unwrap().remove(&id.0).is_some())
        }
    }

    fn service() -> TodoServiceImpl<InMemoryRepo> {
        TodoServiceImpl::new(InMemoryRepo::default())
    }

    fn input(description: &str, due_in_days: Option<i64>) -> NewTodo {
        NewTodo {
            description: description.into(),
            due_date: due_in_days.map(|d| Utc::now() + Duration::days(d)),
        }
    }

    #[tokio::test]
    async fn create_stamps_new_status_and_stores_the_record() {
        let service = service();
        let created = service.create(input("write spec", None)).await.unwrap();
        assert_eq!(created.status, Status::New);
        assert_eq!(created.created_at, created.updated_at);
        let found = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let service = service();
        let a = service.create(input("a", None)).await.unwrap();
        let b = service.create(input("b", None)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_created_at() {
        let service = service();
        let created = service.create(input("draft", Some(3))).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let updated = service
            .update(
                created.id,
                TodoUpdate { description: "final".into(), due_date: None, status: Status::Done },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "final");
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let stored = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_of_missing_id_returns_none() {
        let service = service();
        let outcome = service
            .update(
                TodoId::default(),
                TodoUpdate { description: "x".into(), due_date: None, status: Status::New },
            )
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_record_exactly_once() {
        let service = service();
        let created = service.create(input("gone soon", None)).await.unwrap();
        assert!(service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
        assert!(!service.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_totals_ignore_the_window() {
        let service = service();
        for i in 0..7 {
            service.create(input(&format!("task-{i}"), Some(i))).await.unwrap();
        }
        let page = service
            .list(&ListQuery { offset: 5, limit: 3, order: SortOrder::default() })
            .await
            .unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].description, "task-5");
    }

    #[tokio::test]
    async fn list_defaults_order_by_due_date_ascending() {
        let service = service();
        for days in [4, 1, 3, 2] {
            service.create(input(&format!("due-{days}"), Some(days))).await.unwrap();
        }
        let page = service.list(&ListQuery::default()).await.unwrap();
        let order: Vec<&str> = page.items.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, ["due-1", "due-2", "due-3", "due-4"]);
    }

    #[tokio::test]
    async fn list_honors_requested_field_and_direction() {
        let service = service();
        for name in ["alpha", "charlie", "bravo"] {
            service.create(input(name, None)).await.unwrap();
        }
        let query = ListQuery {
            offset: 0,
            limit: 10,
            order: SortOrder { field: SortField::Description, direction: SortDirection::Descending },
        };
        let page = service.list(&query).await.unwrap();
        let order: Vec<&str> = page.items.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, ["charlie", "bravo", "alpha"]);
    }
}
