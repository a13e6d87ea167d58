//! Generated OpenAPI documents, one per API version group, served as raw
//! JSON under `/api-docs`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::domain::todo::Status;
use crate::http::routes::{todos, weather};
use crate::http::types::ProblemDetail;

/// The v1 surface: the weather forecast sample.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "1.0",
        description = "Sample endpoints demonstrating API versioning and generated documentation.",
    ),
    paths(weather::get_forecasts),
    components(schemas(weather::WeatherForecast, ProblemDetail)),
)]
pub struct V1Doc;

/// The v2 surface: the todo collection.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "2.0",
        description = "CRUD operations over the todo task collection.",
    ),
    paths(
        todos::list_todos,
        todos::get_todo,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
    ),
    components(schemas(
        todos::TodoResponse,
        todos::CreatedTodo,
        todos::CreateTodoBody,
        todos::UpdateTodoBody,
        Status,
        ProblemDetail,
    )),
)]
pub struct V2Doc;

pub fn router() -> Router {
    Router::new()
        .route("/api-docs/v1.json", get(|| async { Json(V1Doc::openapi()) }))
        .route("/api-docs/v2.json", get(|| async { Json(V2Doc::openapi()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_documents_the_weather_surface() {
        let doc = serde_json::to_value(V1Doc::openapi()).unwrap();
        assert_eq!(doc["info"]["version"], "1.0");
        assert!(doc["paths"]["/weatherforecast"]["get"].is_object());
    }

    #[test]
    fn v2_documents_every_todo_operation() {
        let doc = serde_json::to_value(V2Doc::openapi()).unwrap();
        assert_eq!(doc["info"]["version"], "2.0");
        assert!(doc["paths"]["/todos"]["get"].is_object());
        assert!(doc["paths"]["/todos"]["post"].is_object());
        assert!(doc["paths"]["/todos/{id}"]["get"].is_object());
        assert!(doc["paths"]["/todos/{id}"]["put"].is_object());
        assert!(doc["paths"]["/todos/{id}"]["delete"].is_object());
    }

    #[test]
    fn both_documents_register_the_problem_schema() {
        for doc in [V1Doc::openapi(), V2Doc::openapi()] {
            let doc = serde_json::to_value(doc).unwrap();
            assert!(doc["components"]["schemas"]["ProblemDetail"].is_object());
        }
    }
}
