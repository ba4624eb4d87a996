use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Registers DTO schemas with OpenAPI documentation
#[derive(OpenApi)]
#[openapi(components(schemas(Todo)))]
pub struct OpenApiSchemas;

/// DTO for a todo on the API, used both for submissions and responses.
/// [id] is absent on create requests and always present on responses.
#[derive(Debug, Deserialize, Serialize, Display, ToSchema)]
#[display("Todo {{ id: {id:?}, description: {description}, isComplete: {is_complete} }}")]
pub struct Todo {
    #[serde(default)]
    #[schema(example = "7f1d9bbd-5658-4aa7-9b66-e98fb3a4ec21")]
    pub id: Option<String>,
    #[schema(example = "Something to do")]
    pub description: String,
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

impl From<Todo> for domain::todo::Todo {
    fn from(value: Todo) -> Self {
        domain::todo::Todo {
            id: value.id,
            description: value.description,
            is_complete: value.is_complete,
        }
    }
}

impl From<domain::todo::Todo> for Todo {
    fn from(value: domain::todo::Todo) -> Self {
        Todo {
            id: value.id,
            description: value.description,
            is_complete: value.is_complete,
        }
    }
}
