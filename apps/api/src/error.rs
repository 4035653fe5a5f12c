//! # API エラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | ボディ |
//! |----------|-------------|--------|
//! | InvalidBody | 400 | デコードエラーのメッセージ（`text/plain`） |
//! | UnreadableBody | 読み取り失敗時のステータス（413 など） | 失敗理由（`text/plain`） |
//! | BadRequest | 400 | Problem Details |
//! | NotFound | 404 | Problem Details |
//! | Database | 500 | Problem Details（detail は固定値） |
//!
//! リクエストボディのデコード失敗は、デコーダーのメッセージを
//! そのままプレーンテキストで返す。それ以外は RFC 9457 の
//! [`ErrorResponse`] を JSON で返す。

use axum::{
   Json,
   http::{StatusCode, header},
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todoflow_infra::InfraError;
use todoflow_shared::ErrorResponse;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// リクエストボディを JSON としてデコードできない
   #[error("{0}")]
   InvalidBody(String),

   /// リクエストボディを読み取れない（サイズ上限超過など）
   #[error("{message}")]
   UnreadableBody { status: StatusCode, message: String },

   /// 不正なリクエスト（パスパラメータの形式不正など）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let problem = match self {
         ApiError::InvalidBody(msg) => return plain_text(StatusCode::BAD_REQUEST, msg),
         ApiError::UnreadableBody { status, message } => return plain_text(status, message),
         ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg),
         ApiError::NotFound(msg) => ErrorResponse::not_found(msg),
         ApiError::Database(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "データベースエラー"
            );
            ErrorResponse::internal_error()
         }
      };

      let status =
         StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (
         status,
         [(header::CONTENT_TYPE, "application/problem+json")],
         Json(problem),
      )
         .into_response()
   }
}

fn plain_text(status: StatusCode, body: String) -> Response {
   (
      status,
      [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
      body,
   )
      .into_response()
}
