//! # アプリケーション構築
//!
//! State を受け取りルーターを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use todoflow_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{
   ReadinessState,
   TodoState,
   create_todo,
   delete_todo,
   get_todo,
   health_check,
   list_todos,
   readiness_check,
   update_todo,
};

/// Todo API のルーター
pub fn todo_router(state: Arc<TodoState>) -> Router {
   Router::new()
      .route("/todos", get(list_todos).post(create_todo))
      .route(
         "/todos/{todo_id}",
         get(get_todo).patch(update_todo).delete(delete_todo),
      )
      .with_state(state)
}

/// ヘルスチェックと Todo API を束ね、ミドルウェアを適用する
pub fn build_app(todo_state: Arc<TodoState>, readiness_state: Arc<ReadinessState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
      )
      .merge(todo_router(todo_state))
      // レイヤーは下に書いたものが外側
      // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使用）
      // 2. TraceLayer: request_id を含むスパンを作成
      // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
