use crate::domain::todo::driving_ports::CreateTodoError;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{BasicErrorResponse, GenericErrorResponse, Json};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(create_todo, update_todo, list_todos, get_todo, delete_todo),
    components(responses(BasicErrorResponse))
)]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;

/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Adds the five routes managing the "/todos" collection to the application router
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos",
            post(
                |State(app_state): AppState, Json(new_todo): Json<dto::Todo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos",
            put(
                |State(app_state): AppState, Json(submitted_todo): Json<dto::Todo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_todo(submitted_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            }),
        )
        .route(
            "/todos/:todo_id",
            get(
                |State(app_state): AppState, Path(todo_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    get_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            delete(
                |State(app_state): AppState, Path(todo_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::Todo,
    responses(
        (status = 201, description = "Todo successfully created", body = dto::Todo,
            headers(("Location" = String, description = "Path of the created todo"))),
        (status = 400, response = BasicErrorResponse),
    ),
)]
/// Creates a new todo. Rejects submissions that already carry an ID.
async fn create_todo(
    new_todo: dto::Todo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Response, ErrorResponse> {
    info!("REST request to create todo: {new_todo}");
    let todo_store = persistence::db_todo_driven_ports::DbTodoStore {};

    let create_result = todo_service
        .create_todo(&new_todo.into(), &mut *ext_cxn, &todo_store)
        .await;
    match create_result {
        Ok(created) => {
            let created_dto = dto::Todo::from(created);
            let location = format!("/todos/{}", created_dto.id.as_deref().unwrap_or_default());

            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(created_dto),
            )
                .into_response())
        }

        Err(CreateTodoError::IdAlreadyAssigned) => Err((
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse::new(
                "id_exists",
                "A new todo cannot already have an ID.",
            )),
        )
            .into()),

        Err(CreateTodoError::PortError(port_err)) => {
            error!("Todo create failure: {port_err}");
            Err(GenericErrorResponse(port_err).into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::Todo,
    responses(
        (status = 200, description = "Todo successfully updated", body = dto::Todo),
        (status = 201, description = "Submission had no ID, so a todo was created instead", body = dto::Todo),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Upserts the submitted todo by its ID. An ID-less submission falls back to create.
async fn update_todo(
    submitted_todo: dto::Todo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Response, ErrorResponse> {
    if submitted_todo.id.is_none() {
        return create_todo(submitted_todo, ext_cxn, todo_service).await;
    }

    info!("REST request to update todo: {submitted_todo}");
    let todo_store = persistence::db_todo_driven_ports::DbTodoStore {};

    let upsert_result = todo_service
        .upsert_todo(&submitted_todo.into(), &mut *ext_cxn, &todo_store)
        .await;
    match upsert_result {
        Ok(updated) => Ok((StatusCode::OK, Json(dto::Todo::from(updated))).into_response()),
        Err(upsert_err) => {
            error!("Todo update failure: {upsert_err}");
            Err(GenericErrorResponse(upsert_err).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every todo in the collection", body = Vec<dto::Todo>),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Retrieves all the todos in the collection
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    info!("REST request to get all todos");
    let todo_store = persistence::db_todo_driven_ports::DbTodoStore {};

    let list_result = todo_service.all_todos(&mut *ext_cxn, &todo_store).await;
    match list_result {
        Ok(todos) => Ok(Json(todos.into_iter().map(dto::Todo::from).collect())),
        Err(list_err) => {
            error!("Could not retrieve todos: {list_err}");
            Err(GenericErrorResponse(list_err).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = String, Path, description = "ID of the todo to retrieve")),
    responses(
        (status = 200, description = "The requested todo", body = dto::Todo),
        (status = 404, description = "No todo exists under the given ID"),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Retrieves a single todo by its ID
async fn get_todo(
    todo_id: String,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("REST request to get todo {todo_id}");
    let todo_store = persistence::db_todo_driven_ports::DbTodoStore {};

    let lookup_result = todo_service
        .todo_by_id(&todo_id, &mut *ext_cxn, &todo_store)
        .await;
    match lookup_result {
        Ok(Some(todo)) => Ok(Json(todo.into())),
        Ok(None) => Err(StatusCode::NOT_FOUND.into()),
        Err(lookup_err) => {
            error!("Failed to get todo {todo_id}: {lookup_err}");
            Err(GenericErrorResponse(lookup_err).into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = String, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "The todo is gone, whether or not it existed beforehand"),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Deletes a todo by its ID. Returns 200 even when the ID never existed.
async fn delete_todo(
    todo_id: String,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("REST request to delete todo {todo_id}");
    let todo_store = persistence::db_todo_driven_ports::DbTodoStore {};

    let delete_result = todo_service
        .delete_todo(&todo_id, &mut *ext_cxn, &todo_store)
        .await;
    match delete_result {
        Ok(()) => Ok(StatusCode::OK),
        Err(delete_err) => {
            error!("Failed to delete todo {todo_id}: {delete_err}");
            Err(GenericErrorResponse(delete_err).into())
        }
    }
}
