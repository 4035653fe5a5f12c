//! # リクエストボディ抽出
//!
//! axum 標準の `Json` は `Content-Type: application/json` を要求し、
//! 失敗時には独自のレスポンスを返す。[`JsonBody`] は Content-Type を問わず
//! ボディ先頭の JSON 値をデコードし、失敗時は [`ApiError::InvalidBody`]
//! （デコーダーのメッセージを含む 400）を返す。ボディ自体を読めない場合
//! （サイズ上限超過など）は [`ApiError::UnreadableBody`] で元のステータスを保つ。

use axum::{
   body::Bytes,
   extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON としてデコードされたリクエストボディ
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
   T: DeserializeOwned,
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let bytes = Bytes::from_request(req, state)
         .await
         .map_err(|e| ApiError::UnreadableBody {
            status:  e.status(),
            message: e.body_text(),
         })?;

      decode_first(&bytes).map(JsonBody)
   }
}

/// 先頭の JSON 値だけをデコードする
///
/// 1 つ目の値の後ろに続く内容は読まない。値が 1 つもなければ
/// EOF エラーになる。
fn decode_first<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
   let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<T>();
   match values.next() {
      Some(Ok(value)) => Ok(value),
      Some(Err(e)) => Err(ApiError::InvalidBody(e.to_string())),
      None => Err(ApiError::InvalidBody("EOF while parsing a value".to_string())),
   }
}
