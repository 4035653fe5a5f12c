//! # Problem Details
//!
//! API が返すエラーボディ（RFC 9457）。HTTP への変換は api クレートが行い、
//! このモジュールはデータ構造と種別ごとの既定値だけを持つ。
//!
//! | 種別 | `type` の末尾 | `status` |
//! |------|---------------|----------|
//! | 不正なリクエスト | `bad-request` | 400 |
//! | 未検出 | `not-found` | 404 |
//! | 内部エラー | `internal-error` | 500 |

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://todoflow.example.com/errors";

/// 内部エラー時にクライアントへ返す detail
const INTERNAL_ERROR_DETAIL: &str = "内部エラーが発生しました";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

/// 返却しうる問題の種別
#[derive(Debug, Clone, Copy)]
enum Problem {
   BadRequest,
   NotFound,
   InternalError,
}

impl Problem {
   fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::NotFound => "not-found",
         Self::InternalError => "internal-error",
      }
   }

   fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::NotFound => "Not Found",
         Self::InternalError => "Internal Server Error",
      }
   }

   fn status(self) -> u16 {
      match self {
         Self::BadRequest => 400,
         Self::NotFound => 404,
         Self::InternalError => 500,
      }
   }
}

impl ErrorResponse {
   fn of(problem: Problem, detail: impl Into<String>) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{}", problem.slug()),
         title:      problem.title().to_string(),
         status:     problem.status(),
         detail:     detail.into(),
      }
   }

   /// 400: パスパラメータの形式不正など
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::of(Problem::BadRequest, detail)
   }

   /// 404: 指定した ID の Todo が存在しない
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::of(Problem::NotFound, detail)
   }

   /// 500: ストレージ障害など。detail は固定文言
   pub fn internal_error() -> Self {
      Self::of(Problem::InternalError, INTERNAL_ERROR_DETAIL)
   }
}
