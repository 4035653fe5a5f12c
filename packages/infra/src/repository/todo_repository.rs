//! # TodoRepository
//!
//! `todo` テーブルに対する CRUD を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID は DB が採番**: INSERT は `RETURNING` で採番済みの行を読み戻す
//! - **存在しない ID への更新・削除は no-op**: 影響行数の有無を `bool` で返し、
//!   エラーにはしない
//! - **一覧の順序は未定義**: `ORDER BY` を付けない。呼び出し側は順序に依存しないこと
//! - **実行時クエリ**: `sqlx::query_as` + `FromRow` を使用する

use async_trait::async_trait;
use sqlx::PgPool;
use todoflow_domain::todo::{Todo, TodoFields, TodoId};
use uuid::Uuid;

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// Todo を挿入し、採番された ID を含む行を返す
   async fn insert(&self, fields: &TodoFields) -> Result<Todo, InfraError>;

   /// すべての Todo を取得する（順序は未定義）
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

   /// ID で Todo を検索する
   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

   /// content / checked を更新する
   ///
   /// 該当行があれば `true`、なければ何もせず `false` を返す。
   async fn update(&self, id: &TodoId, fields: &TodoFields) -> Result<bool, InfraError>;

   /// Todo を削除する
   ///
   /// 該当行があれば `true`、なければ何もせず `false` を返す。
   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError>;
}

/// `todo` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
   id:      Uuid,
   content: String,
   checked: bool,
}

impl From<TodoRow> for Todo {
   fn from(row: TodoRow) -> Self {
      Todo::from_db(
         TodoId::from_uuid(row.id),
         TodoFields::new(row.content, row.checked),
      )
   }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
   pool: PgPool,
}

impl PostgresTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
   async fn insert(&self, fields: &TodoFields) -> Result<Todo, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         INSERT INTO todo (content, checked)
         VALUES ($1, $2)
         RETURNING id, content, checked
         "#,
      )
      .bind(&fields.content)
      .bind(fields.checked)
      .fetch_one(&self.pool)
      .await?;

      Ok(row.into())
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, content, checked
         FROM todo
         "#,
      )
      .fetch_all(&self.pool)
      .await?;

      Ok(rows.into_iter().map(Todo::from).collect())
   }

   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, content, checked
         FROM todo
         WHERE id = $1
         "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      Ok(row.map(Todo::from))
   }

   async fn update(&self, id: &TodoId, fields: &TodoFields) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
         UPDATE todo
         SET content = $2, checked = $3
         WHERE id = $1
         "#,
      )
      .bind(id.as_uuid())
      .bind(&fields.content)
      .bind(fields.checked)
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
         DELETE FROM todo
         WHERE id = $1
         "#,
      )
      .bind(id.as_uuid())
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }
}
