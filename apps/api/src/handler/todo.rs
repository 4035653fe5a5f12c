//! # Todo ハンドラ
//!
//! Todo の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /todos` - Todo 作成
//! - `GET /todos` - Todo 一覧（順序は未定義）
//! - `GET /todos/{todo_id}` - Todo 取得
//! - `PATCH /todos/{todo_id}` - Todo 更新
//! - `DELETE /todos/{todo_id}` - Todo 削除
//!
//! 作成・更新は受け取った `{content, checked}` をそのまま返す。
//! 作成のみ [`CreateResponseMode::Stored`] で採番済みの ID を含めて返せる。

use std::{fmt, sync::Arc};

use axum::{
   Json,
   extract::{Path, State},
   response::{IntoResponse, Response},
};
use serde::{
   Deserialize,
   Deserializer,
   Serialize,
   de::{self, MapAccess, Visitor},
};
use todoflow_domain::todo::{Todo, TodoFields, TodoId};
use todoflow_infra::repository::TodoRepository;
use uuid::Uuid;

use crate::{config::CreateResponseMode, error::ApiError, extract::JsonBody};

/// Todo API の共有状態
pub struct TodoState {
   pub repository:      Arc<dyn TodoRepository>,
   pub create_response: CreateResponseMode,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成・更新リクエスト
///
/// 作成・更新のレスポンスでもこの形をそのまま返す。
///
/// デコードは寛容に行う:
/// - 欠けたフィールドや `null` はゼロ値（`""` / `false`）
/// - フィールド名は大文字小文字を区別しない
/// - 未知のフィールドは無視
/// - ボディ全体が `null` ならすべてゼロ値
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoRequest {
   pub content: String,
   pub checked: bool,
}

impl<'de> Deserialize<'de> for TodoRequest {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      deserializer.deserialize_any(TodoRequestVisitor)
   }
}

struct TodoRequestVisitor;

impl<'de> Visitor<'de> for TodoRequestVisitor {
   type Value = TodoRequest;

   fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("a JSON object with content and checked")
   }

   fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
      Ok(TodoRequest::default())
   }

   fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
      let mut req = TodoRequest::default();
      while let Some(key) = map.next_key::<String>()? {
         if key.eq_ignore_ascii_case("content") {
            if let Some(content) = map.next_value::<Option<String>>()? {
               req.content = content;
            }
         } else if key.eq_ignore_ascii_case("checked") {
            if let Some(checked) = map.next_value::<Option<bool>>()? {
               req.checked = checked;
            }
         } else {
            map.next_value::<de::IgnoredAny>()?;
         }
      }
      Ok(req)
   }
}

impl From<TodoRequest> for TodoFields {
   fn from(req: TodoRequest) -> Self {
      TodoFields::new(req.content, req.checked)
   }
}

/// Todo DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDto {
   pub id:      Uuid,
   pub content: String,
   pub checked: bool,
}

impl From<Todo> for TodoDto {
   fn from(todo: Todo) -> Self {
      Self {
         id:      *todo.id().as_uuid(),
         content: todo.content().to_string(),
         checked: todo.checked(),
      }
   }
}

/// パスパラメータの ID をパースする
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
   TodoId::parse_str(raw)
      .map_err(|e| ApiError::BadRequest(format!("Todo ID の形式が不正です: {e}")))
}

// --- ハンドラ ---

/// POST /todos
///
/// Todo を作成する。ステータスは 200。
#[tracing::instrument(skip_all)]
pub async fn create_todo(
   State(state): State<Arc<TodoState>>,
   JsonBody(req): JsonBody<TodoRequest>,
) -> Result<Response, ApiError> {
   let fields = TodoFields::from(req.clone());
   let todo = state.repository.insert(&fields).await?;
   tracing::debug!(todo_id = %todo.id(), "Todo を作成しました");

   let response = match state.create_response {
      CreateResponseMode::Echo => Json(req).into_response(),
      CreateResponseMode::Stored => Json(TodoDto::from(todo)).into_response(),
   };
   Ok(response)
}

/// GET /todos
#[tracing::instrument(skip_all)]
pub async fn list_todos(
   State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TodoDto>>, ApiError> {
   let todos = state.repository.find_all().await?;

   Ok(Json(todos.into_iter().map(TodoDto::from).collect()))
}

/// GET /todos/{todo_id}
///
/// 該当する Todo がなければ 404 を返す。
#[tracing::instrument(skip_all, fields(%todo_id))]
pub async fn get_todo(
   State(state): State<Arc<TodoState>>,
   Path(todo_id): Path<String>,
) -> Result<Json<TodoDto>, ApiError> {
   let id = parse_todo_id(&todo_id)?;

   let todo = state
      .repository
      .find_by_id(&id)
      .await?
      .ok_or_else(|| ApiError::NotFound("Todo が見つかりません".to_string()))?;

   Ok(Json(TodoDto::from(todo)))
}

/// PATCH /todos/{todo_id}
///
/// 存在しない ID の場合も何も更新せずに 200 を返す。
#[tracing::instrument(skip_all, fields(%todo_id))]
pub async fn update_todo(
   State(state): State<Arc<TodoState>>,
   Path(todo_id): Path<String>,
   JsonBody(req): JsonBody<TodoRequest>,
) -> Result<Json<TodoRequest>, ApiError> {
   let id = parse_todo_id(&todo_id)?;

   let updated = state
      .repository
      .update(&id, &TodoFields::from(req.clone()))
      .await?;
   if !updated {
      tracing::debug!("更新対象の Todo が存在しません");
   }

   Ok(Json(req))
}

/// DELETE /todos/{todo_id}
///
/// 存在しない ID の場合も 200 を返す。
#[tracing::instrument(skip_all, fields(%todo_id))]
pub async fn delete_todo(
   State(state): State<Arc<TodoState>>,
   Path(todo_id): Path<String>,
) -> Result<&'static str, ApiError> {
   let id = parse_todo_id(&todo_id)?;

   let deleted = state.repository.delete(&id).await?;
   if !deleted {
      tracing::debug!("削除対象の Todo が存在しません");
   }

   Ok("Delete todo")
}
