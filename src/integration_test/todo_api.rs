use super::test_util::prepare_db_and_test;
use crate::api::test_util::deserialize_body;
use crate::domain::todo::driven_ports::TodoStore;
use crate::persistence::db_todo_driven_ports::DbTodoStore;
use crate::routing_utils::BasicErrorResponse;
use crate::{SharedData, app_router, domain, dto, persistence};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn todo_crud_lifecycle() {
    prepare_db_and_test(|db| async move {
        let app = app_router(Arc::new(SharedData {
            ext_cxn: persistence::ExternalConnectivity::new(db),
        }));

        // Create a todo without an id
        let create_response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/todos",
                json!({ "description": "AAAAA", "isComplete": false }),
            ))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::CREATED, create_response.status());
        let location = create_response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let created: dto::Todo = deserialize_body(create_response.into_body()).await;
        let created_id = created.id.clone().expect("created todo should have an id");
        assert_eq!(Some(format!("/todos/{created_id}")), location);
        assert_eq!("AAAAA", created.description);
        assert!(!created.is_complete);

        // It can be fetched back with the same fields
        let get_response = app
            .clone()
            .oneshot(empty_request(Method::GET, &format!("/todos/{created_id}")))
            .await
            .expect("get request failed");
        assert_eq!(StatusCode::OK, get_response.status());
        let fetched: dto::Todo = deserialize_body(get_response.into_body()).await;
        assert_eq!(Some(created_id.clone()), fetched.id);
        assert_eq!("AAAAA", fetched.description);
        assert!(!fetched.is_complete);

        // The collection now holds exactly one record
        let list_response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/todos"))
            .await
            .expect("list request failed");
        assert_eq!(StatusCode::OK, list_response.status());
        let todos: Vec<dto::Todo> = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, todos.len());

        // Updating by id changes the record without growing the collection
        let update_response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/todos",
                json!({ "id": created_id, "description": "BBBBB", "isComplete": true }),
            ))
            .await
            .expect("update request failed");
        assert_eq!(StatusCode::OK, update_response.status());
        let updated: dto::Todo = deserialize_body(update_response.into_body()).await;
        assert_eq!("BBBBB", updated.description);
        assert!(updated.is_complete);

        let list_response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::Todo> = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, todos.len());
        assert_eq!("BBBBB", todos[0].description);

        // Delete it, then it's gone
        let delete_response = app
            .clone()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/todos/{created_id}"),
            ))
            .await
            .expect("delete request failed");
        assert_eq!(StatusCode::OK, delete_response.status());

        let get_response = app
            .clone()
            .oneshot(empty_request(Method::GET, &format!("/todos/{created_id}")))
            .await
            .expect("get request failed");
        assert_eq!(StatusCode::NOT_FOUND, get_response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn create_with_preset_id_is_rejected_without_side_effects() {
    prepare_db_and_test(|db| async move {
        let ext_cxn = persistence::ExternalConnectivity::new(db);
        let app = app_router(Arc::new(SharedData {
            ext_cxn: ext_cxn.clone(),
        }));

        // Seed a record directly through the store so the collection isn't empty
        let mut seed_cxn = ext_cxn.clone();
        DbTodoStore
            .save(
                &domain::todo::Todo {
                    id: None,
                    description: "AAAAA".to_owned(),
                    is_complete: false,
                },
                &mut seed_cxn,
            )
            .await
            .expect("seeding the collection failed");

        let create_response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/todos",
                json!({ "id": "preset-id", "description": "BBBBB", "isComplete": true }),
            ))
            .await
            .expect("create request failed");
        assert_eq!(StatusCode::BAD_REQUEST, create_response.status());
        let error_body: BasicErrorResponse = deserialize_body(create_response.into_body()).await;
        assert_eq!("id_exists", error_body.error_code);

        // Nothing was persisted by the rejected create
        let mut verify_cxn = ext_cxn.clone();
        let stored = DbTodoStore
            .find_all(&mut verify_cxn)
            .await
            .expect("reading the collection failed");
        assert_eq!(1, stored.len());
        assert_eq!("AAAAA", stored[0].description);

        // Emptying the collection resets the fixture state
        DbTodoStore
            .delete_all(&mut verify_cxn)
            .await
            .expect("emptying the collection failed");
        let list_response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::Todo> = deserialize_body(list_response.into_body()).await;
        assert!(todos.is_empty());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn idless_update_creates_and_delete_is_idempotent() {
    prepare_db_and_test(|db| async move {
        let app = app_router(Arc::new(SharedData {
            ext_cxn: persistence::ExternalConnectivity::new(db),
        }));

        // A PUT without an id behaves exactly like a create
        let update_response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/todos",
                json!({ "description": "AAAAA", "isComplete": false }),
            ))
            .await
            .expect("update request failed");
        assert_eq!(StatusCode::CREATED, update_response.status());
        let created: dto::Todo = deserialize_body(update_response.into_body()).await;
        assert!(created.id.is_some());

        // Deleting an id that never existed still reports success and changes nothing
        let delete_response = app
            .clone()
            .oneshot(empty_request(Method::DELETE, "/todos/never-existed"))
            .await
            .expect("delete request failed");
        assert_eq!(StatusCode::OK, delete_response.status());

        let list_response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/todos"))
            .await
            .expect("list request failed");
        let todos: Vec<dto::Todo> = deserialize_body(list_response.into_body()).await;
        assert_eq!(1, todos.len());
    });
}
