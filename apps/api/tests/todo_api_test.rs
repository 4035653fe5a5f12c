//! # Todo API シナリオテスト
//!
//! `build_app` で組み立てた完全なルーター（Request ID / Trace レイヤー込み）に
//! 対して、作成 → 取得 → 更新 → 削除の一連の操作を検証する。
//!
//! リポジトリはインメモリの `MockTodoRepository` を使用する。
//! Readiness 用のプールは遅延接続のため、DB がなくても構築できる。

use std::{sync::Arc, time::Duration};

use axum::{
   Router,
   body::{Body, to_bytes},
   http::{Method, Request, StatusCode},
   response::Response,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use todoflow_api::{
   app_builder::build_app,
   config::CreateResponseMode,
   handler::{ReadinessState, TodoDto, TodoState},
};
use todoflow_infra::mock::MockTodoRepository;
use tower::ServiceExt;
use uuid::Uuid;

// --- テストヘルパー ---

fn test_app(repository: MockTodoRepository, create_response: CreateResponseMode) -> Router {
   let options = PgConnectOptions::new()
      .host("127.0.0.1")
      .port(1)
      .username("nobody")
      .database("nowhere");
   let pool = PgPoolOptions::new()
      .acquire_timeout(Duration::from_secs(1))
      .connect_lazy_with(options);

   build_app(
      Arc::new(TodoState {
         repository: Arc::new(repository),
         create_response,
      }),
      Arc::new(ReadinessState { pool }),
   )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
   let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
   app.clone()
      .oneshot(
         Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap(),
      )
      .await
      .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
   let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
   serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
   let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
   String::from_utf8(bytes.to_vec()).unwrap()
}

// --- シナリオ ---

#[tokio::test]
async fn test_作成したtodoが一覧とid指定で取得できる() {
   // Given
   let repository = MockTodoRepository::new();
   let app = test_app(repository.clone(), CreateResponseMode::Echo);

   // When
   let created = send(
      &app,
      Method::POST,
      "/todos",
      Some(json!({"content": "buy milk", "checked": false})),
   )
   .await;

   // Then
   assert_eq!(created.status(), StatusCode::OK);
   let created_body: Value = json_body(created).await;
   assert_eq!(
      created_body,
      json!({"content": "buy milk", "checked": false})
   );

   let list = send(&app, Method::GET, "/todos", None).await;
   assert_eq!(list.status(), StatusCode::OK);
   let todos: Vec<TodoDto> = json_body(list).await;
   assert_eq!(todos.len(), 1);
   assert_eq!(todos[0].content, "buy milk");
   assert!(!todos[0].checked);

   let id = *repository.snapshot()[0].id().as_uuid();
   assert_eq!(todos[0].id, id);
   let found = send(&app, Method::GET, &format!("/todos/{id}"), None).await;
   assert_eq!(found.status(), StatusCode::OK);
   let found: TodoDto = json_body(found).await;
   assert_eq!(found, todos[0]);
}

#[tokio::test]
async fn test_一覧は作成したすべてのtodoを含む() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Stored);
   let mut created_ids = Vec::new();
   for i in 0..5 {
      let response = send(
         &app,
         Method::POST,
         "/todos",
         Some(json!({"content": format!("todo-{i}"), "checked": i % 2 == 0})),
      )
      .await;
      let dto: TodoDto = json_body(response).await;
      created_ids.push(dto.id);
   }

   let list = send(&app, Method::GET, "/todos", None).await;

   let todos: Vec<TodoDto> = json_body(list).await;
   for id in created_ids {
      assert!(todos.iter().any(|t| t.id == id), "{id} が一覧に含まれること");
   }
}

#[tokio::test]
async fn test_更新後の取得で新しい内容が返る() {
   // Given
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Stored);
   let created: TodoDto = json_body(
      send(
         &app,
         Method::POST,
         "/todos",
         Some(json!({"content": "buy milk", "checked": false})),
      )
      .await,
   )
   .await;

   // When
   let updated = send(
      &app,
      Method::PATCH,
      &format!("/todos/{}", created.id),
      Some(json!({"content": "buy bread", "checked": true})),
   )
   .await;

   // Then
   assert_eq!(updated.status(), StatusCode::OK);
   let updated_body: Value = json_body(updated).await;
   assert_eq!(
      updated_body,
      json!({"content": "buy bread", "checked": true})
   );
   let found: TodoDto = json_body(
      send(&app, Method::GET, &format!("/todos/{}", created.id), None).await,
   )
   .await;
   assert_eq!(
      found,
      TodoDto {
         id:      created.id,
         content: "buy bread".to_string(),
         checked: true,
      }
   );
}

#[tokio::test]
async fn test_削除後の取得は404になる() {
   // Given
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Stored);
   let created: TodoDto = json_body(
      send(
         &app,
         Method::POST,
         "/todos",
         Some(json!({"content": "buy milk", "checked": false})),
      )
      .await,
   )
   .await;

   // When
   let deleted = send(&app, Method::DELETE, &format!("/todos/{}", created.id), None).await;

   // Then
   assert_eq!(deleted.status(), StatusCode::OK);
   assert_eq!(text_body(deleted).await, "Delete todo");
   let found = send(&app, Method::GET, &format!("/todos/{}", created.id), None).await;
   assert_eq!(found.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_不正なjsonは400になり一覧は変わらない() {
   let repository = MockTodoRepository::new();
   let app = test_app(repository.clone(), CreateResponseMode::Echo);

   let response = app
      .clone()
      .oneshot(
         Request::builder()
            .method(Method::POST)
            .uri("/todos")
            .body(Body::from("{\"content\": \"buy milk\""))
            .unwrap(),
      )
      .await
      .unwrap();

   assert_eq!(response.status(), StatusCode::BAD_REQUEST);
   assert!(!text_body(response).await.is_empty());
   assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn test_未登録のパスは404になる() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Echo);

   let response = send(&app, Method::GET, &format!("/todos/{}/x", Uuid::new_v4()), None).await;

   assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- ヘルスチェック ---

#[tokio::test]
async fn test_healthは200を返す() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Echo);

   let response = send(&app, Method::GET, "/health", None).await;

   assert_eq!(response.status(), StatusCode::OK);
   let body: Value = json_body(response).await;
   assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_dbに接続できない場合readyは503を返す() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Echo);

   let response = send(&app, Method::GET, "/health/ready", None).await;

   assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
   let body: Value = json_body(response).await;
   assert_eq!(
      body,
      json!({"status": "not_ready", "checks": {"database": "error"}})
   );
}

// --- Request ID ---

#[tokio::test]
async fn test_自動生成のx_request_idはuuid_v7形式である() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Echo);

   let response = send(&app, Method::GET, "/todos", None).await;

   let request_id = response
      .headers()
      .get("x-request-id")
      .expect("x-request-id ヘッダーが含まれること")
      .to_str()
      .unwrap();
   let uuid = Uuid::parse_str(request_id).unwrap();
   assert_eq!(uuid.get_version_num(), 7);
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
   let app = test_app(MockTodoRepository::new(), CreateResponseMode::Echo);
   let custom_id = "client-provided-request-id-123";

   let response = app
      .oneshot(
         Request::builder()
            .uri("/todos")
            .header("x-request-id", custom_id)
            .body(Body::empty())
            .unwrap(),
      )
      .await
      .unwrap();

   assert_eq!(
      response
         .headers()
         .get("x-request-id")
         .unwrap()
         .to_str()
         .unwrap(),
      custom_id
   );
}
