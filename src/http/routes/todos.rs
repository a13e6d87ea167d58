use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::todo_service::TodoService;
use crate::domain::query::ListQuery;
use crate::domain::todo::{NewTodo, Status, Todo, TodoId, TodoUpdate};
use crate::http::types::{ApiError, ProblemDetail};

/// Header carrying the size of the unpaginated result set.
const TOTAL_COUNT: &str = "x-total-count";

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route("/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

/// Read model for a task.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Unique id of the task.
    pub id: Uuid,
    /// What needs to be done.
    pub description: String,
    /// Deadline for finishing the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Current lifecycle state.
    pub status: Status,
    /// True once the task reached DONE or CANCELLED.
    pub finished: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        let finished = todo.finished();
        Self {
            id: todo.id.0,
            description: todo.description,
            due_date: todo.due_date,
            status: todo.status,
            finished,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Body of a successful create, referencing the new resource.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedTodo {
    pub id: Uuid,
}

/// Payload for creating a task.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoBody {
    /// What needs to be done. Required, must not be blank.
    pub description: Option<String>,
    /// Deadline for finishing the task.
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for replacing a task. Also the only way a task changes status.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoBody {
    /// What needs to be done. Required, must not be blank.
    pub description: Option<String>,
    /// Deadline for finishing the task.
    pub due_date: Option<DateTime<Utc>>,
    /// State the task should be in afterwards. Required.
    pub status: Option<Status>,
}

/// Query string controlling the list window and order.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct ListParams {
    /// How many records to skip before the window starts. Defaults to 0.
    #[serde(rename = "_offset")]
    offset: Option<u32>,
    /// Window size. Defaults to 10; values above 255 are capped.
    #[serde(rename = "_limit")]
    limit: Option<u16>,
    /// `field [ASC|DESC]` over dueDate, description, status, createdAt or
    /// updatedAt. Defaults to `dueDate ASC`.
    #[serde(rename = "_order")]
    order: Option<String>,
}

/// List tasks.
///
/// Returns one window of the ordered collection; the total record count is
/// reported in the `X-Total-Count` header independently of the window.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    params(ListParams),
    responses(
        (status = 200, description = "The requested window of tasks", body = [TodoResponse],
            headers(("X-Total-Count" = String, description = "Total number of records before pagination"))),
        (status = 400, description = "Invalid window or order parameters", body = ProblemDetail),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(%rejection, "query string rejected");
        ApiError::InvalidPayload
    })?;
    let query = ListQuery::new(params.offset, params.limit, params.order.as_deref())
        .map_err(|err| {
            tracing::debug!(%err, "order expression rejected");
            ApiError::InvalidPayload
        })?;

    let page = state.service.list(&query).await?;
    let items: Vec<TodoResponse> = page.items.into_iter().map(TodoResponse::from).collect();
    Ok(([(TOTAL_COUNT, page.total.to_string())], Json(items)))
}

/// Fetch a single task.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "Id of the wanted task")),
    responses(
        (status = 200, description = "The matching task", body = TodoResponse),
        (status = 400, description = "Malformed id", body = ProblemDetail),
        (status = 404, description = "No task carries that id", body = ProblemDetail),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let id = parse_id(&id)?;
    match state.service.get(id).await? {
        Some(todo) => Ok(Json(todo.into())),
        None => Err(ApiError::NotFound),
    }
}

/// Create a task.
///
/// The new task always starts in status NEW with both timestamps set to the
/// moment of creation.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body = CreateTodoBody,
    responses(
        (status = 201, description = "Task created", body = CreatedTodo,
            headers(("Location" = String, description = "Path of the new resource"))),
        (status = 400, description = "Missing or invalid payload", body = ProblemDetail),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<Option<CreateTodoBody>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validate_create(required_body(payload)?).map_err(invalid)?;
    let todo = state.service.create(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), todo.id.0);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedTodo { id: todo.id.0 }),
    ))
}

/// Replace a task.
///
/// Every mutable field is overwritten from the payload; this endpoint is also
/// how a task moves between statuses, with no transition restricted.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "Id of the task to replace")),
    request_body = UpdateTodoBody,
    responses(
        (status = 204, description = "Task replaced"),
        (status = 400, description = "Missing or invalid payload", body = ProblemDetail),
        (status = 404, description = "No task carries that id", body = ProblemDetail),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<Option<UpdateTodoBody>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let update = validate_update(required_body(payload)?).map_err(invalid)?;
    match state.service.update(id, update).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::WriteMissing),
    }
}

/// Delete a task permanently.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "Id of the task to delete")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Malformed id", body = ProblemDetail),
        (status = 404, description = "No task carries that id", body = ProblemDetail),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::WriteMissing)
    }
}

/// One failed payload rule; logged alongside the -2 problem response.
#[derive(Debug, PartialEq, Eq)]
struct Violation {
    field: &'static str,
    reason: &'static str,
}

fn validate_create(body: CreateTodoBody) -> Result<NewTodo, Vec<Violation>> {
    match checked_description(body.description) {
        Ok(description) => Ok(NewTodo { description, due_date: body.due_date }),
        Err(violation) => Err(vec![violation]),
    }
}

fn validate_update(body: UpdateTodoBody) -> Result<TodoUpdate, Vec<Violation>> {
    let mut violations = Vec::new();
    let description = match checked_description(body.description) {
        Ok(description) => Some(description),
        Err(violation) => {
            violations.push(violation);
            None
        }
    };
    if body.status.is_none() {
        violations.push(Violation { field: "status", reason: "is required" });
    }
    match (description, body.status) {
        (Some(description), Some(status)) => {
            Ok(TodoUpdate { description, due_date: body.due_date, status })
        }
        _ => Err(violations),
    }
}

fn checked_description(description: Option<String>) -> Result<String, Violation> {
    match description {
        Some(d) if !d.trim().is_empty() => Ok(d),
        Some(_) => Err(Violation { field: "description", reason: "must not be blank" }),
        None => Err(Violation { field: "description", reason: "is required" }),
    }
}

fn invalid(violations: Vec<Violation>) -> ApiError {
    tracing::debug!(?violations, "payload failed validation");
    ApiError::InvalidPayload
}

/// Unwraps an extracted body, treating an absent, malformed or literal-null
/// payload as a validation failure.
fn required_body<T>(payload: Result<Json<Option<T>>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(Some(body))) => Ok(body),
        Ok(Json(None)) => {
            tracing::debug!("null request body");
            Err(ApiError::InvalidPayload)
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "request body rejected");
            Err(ApiError::InvalidPayload)
        }
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    Uuid::parse_str(raw).map(TodoId).map_err(|_| ApiError::InvalidPayload)
}
