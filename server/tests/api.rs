use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_server::{build_router, AppState, Todo};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::in_memory().unwrap())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, title: &str) -> Todo {
    let body = json!({ "title": title }).to_string();
    let resp = send(app, json_request("POST", "/todos", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = send(&app(), empty_request("GET", "/todos")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_newest_first() {
    let app = app();
    let a = create(&app, "A").await;
    let b = create(&app, "B").await;
    let c = create(&app, "C").await;

    let resp = send(&app, empty_request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![c, b, a]);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let resp = send(&app(), json_request("POST", "/todos", r#"{"title":"Buy milk"}"#)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["completed"], false);
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_todo_with_completed_true() {
    let resp = send(
        &app(),
        json_request("POST", "/todos", r#"{"title":"Already done","completed":true}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert!(todo.completed);
}

#[tokio::test]
async fn create_todo_ignores_client_supplied_id() {
    let resp = send(
        &app(),
        json_request("POST", "/todos", r#"{"id":999,"title":"Mine"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_ne!(todo.id, 999);
}

#[tokio::test]
async fn create_todo_missing_title_returns_400() {
    let resp = send(&app(), json_request("POST", "/todos", r#"{"completed":true}"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "title": ["This field is required."] }));
}

#[tokio::test]
async fn create_todo_blank_title_returns_400() {
    let resp = send(&app(), json_request("POST", "/todos", r#"{"title":"  "}"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "title": ["This field may not be blank."] }));
}

#[tokio::test]
async fn create_todo_wrong_types_returns_400() {
    let resp = send(
        &app(),
        json_request("POST", "/todos", r#"{"title":1,"completed":"yes"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["title"], json!(["Not a valid string."]));
    assert_eq!(body["completed"], json!(["Must be a valid boolean."]));
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let resp = send(&app(), json_request("POST", "/todos", r#"{"title":"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("JSON parse error"));
}

#[tokio::test]
async fn create_todo_array_body_returns_400() {
    let resp = send(&app(), json_request("POST", "/todos", "[]")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({ "non_field_errors": ["Invalid data. Expected a dictionary, but got array."] })
    );
}

#[tokio::test]
async fn create_todo_without_json_content_type_returns_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body(r#"{"title":"Buy milk"}"#.to_string())
        .unwrap();
    let resp = send(&app(), request).await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = send(&app(), empty_request("GET", "/todos/1")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "detail": "No Todo matches the given query." }));
}

#[tokio::test]
async fn get_todo_non_integer_id_returns_404() {
    let resp = send(&app(), empty_request("GET", "/todos/not-a-number")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn writes_to_non_integer_id_return_404() {
    let app = app();
    create(&app, "untouched").await;

    for method in ["PUT", "PATCH"] {
        let resp = send(&app, json_request(method, "/todos/abc", r#"{"completed":true}"#)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method}");
        let body: Value = body_json(resp).await;
        assert_eq!(body, json!({ "detail": "No Todo matches the given query." }), "{method}");
    }

    let resp = send(&app, empty_request("DELETE", "/todos/abc")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert!(!todos[0].completed);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = send(&app(), json_request("PUT", "/todos/1", r#"{"title":"Nope"}"#)).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_todo_not_found() {
    let resp = send(&app(), json_request("PATCH", "/todos/1", r#"{"completed":true}"#)).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_blank_title_returns_400() {
    let app = app();
    let todo = create(&app, "Keep").await;

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{}", todo.id), r#"{"title":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, empty_request("GET", &format!("/todos/{}", todo.id))).await;
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, todo);
}

#[tokio::test]
async fn update_todo_wrong_type_returns_400() {
    let app = app();
    let todo = create(&app, "Typed").await;

    let resp = send(
        &app,
        json_request("PUT", &format!("/todos/{}", todo.id), r#"{"completed":1}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "completed": ["Must be a valid boolean."] }));
}

#[tokio::test]
async fn update_todo_cannot_change_created_at() {
    let app = app();
    let todo = create(&app, "Fixed").await;

    let resp = send(
        &app,
        json_request(
            "PATCH",
            &format!("/todos/{}", todo.id),
            r#"{"created_at":"2000-01-01T00:00:00Z","id":12345}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated, todo);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = send(&app(), empty_request("DELETE", "/todos/1")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- method handling ---

#[tokio::test]
async fn delete_collection_is_not_allowed() {
    let resp = send(&app(), empty_request("DELETE", "/todos")).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", r#"{"title":"buy milk"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.title, "buy milk");
    assert!(!created.completed);
    let id = created.id;

    // list should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);

    // patch only completed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/todos/{id}"),
            r#"{"completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "buy milk"); // unchanged
    assert_eq!(updated.created_at, created.created_at); // unchanged
    assert!(updated.completed);

    // put only title
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"title":"buy oat milk"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "buy oat milk");
    assert!(updated.completed); // unchanged from previous update

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete is empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
