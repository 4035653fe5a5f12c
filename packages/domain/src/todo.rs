//! # Todo
//!
//! テキストの内容と完了フラグを持つタスク。
//!
//! ## ライフサイクル
//!
//! ```text
//! 作成（ID は DB が採番） → 更新（content / checked のみ） → 削除
//! ```
//!
//! `id` は作成後に変更されない。更新で変わるのは [`TodoFields`] の 2 項目だけなので、
//! 作成と更新の入力は同じ型で表現する。
//!
//! ## 使用例
//!
//! ```rust
//! use todoflow_domain::todo::{Todo, TodoFields, TodoId};
//! use uuid::Uuid;
//!
//! let fields = TodoFields::new("buy milk", false);
//! let todo = Todo::from_db(TodoId::from_uuid(Uuid::nil()), fields);
//!
//! assert_eq!(todo.content(), "buy milk");
//! assert!(!todo.checked());
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo の一意識別子
///
/// DB の `DEFAULT gen_random_uuid()` で採番されるため、アプリ側で新規生成する
/// コンストラクタは持たない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
   /// 既存の UUID から ID を作成する
   pub fn from_uuid(uuid: Uuid) -> Self {
      Self(uuid)
   }

   /// 文字列表現（パスパラメータなど）から ID をパースする
   pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
      Uuid::parse_str(s).map(Self)
   }

   /// 内部の UUID 参照を取得する
   pub fn as_uuid(&self) -> &Uuid {
      &self.0
   }
}

/// Todo の可変フィールド
///
/// 作成時の入力、更新時の入力の両方に使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
   pub content: String,
   pub checked: bool,
}

impl TodoFields {
   pub fn new(content: impl Into<String>, checked: bool) -> Self {
      Self {
         content: content.into(),
         checked,
      }
   }
}

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:     TodoId,
   fields: TodoFields,
}

impl Todo {
   /// 永続化済みの値から復元する
   pub fn from_db(id: TodoId, fields: TodoFields) -> Self {
      Self { id, fields }
   }

   pub fn id(&self) -> &TodoId {
      &self.id
   }

   pub fn content(&self) -> &str {
      &self.fields.content
   }

   pub fn checked(&self) -> bool {
      self.fields.checked
   }

   pub fn fields(&self) -> &TodoFields {
      &self.fields
   }

   /// フィールドを置き換えた新しいインスタンスを返す（ID は維持）
   pub fn with_fields(self, fields: TodoFields) -> Self {
      Self {
         id: self.id,
         fields,
      }
   }
}
