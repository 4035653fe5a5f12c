//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todoflow_domain::todo::{Todo, TodoFields, TodoId};
use uuid::Uuid;

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

/// インメモリの TodoRepository
///
/// `Clone` したインスタンス同士は同じストアを共有するため、
/// ルーターに渡した後もテスト側から内容を検査できる。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
   todos: Arc<Mutex<Vec<Todo>>>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 事前データを投入する
   pub fn add_todo(&self, todo: Todo) {
      self.todos.lock().unwrap().push(todo);
   }

   /// 現在のストアの内容を取得する
   pub fn snapshot(&self) -> Vec<Todo> {
      self.todos.lock().unwrap().clone()
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn insert(&self, fields: &TodoFields) -> Result<Todo, InfraError> {
      let todo = Todo::from_db(TodoId::from_uuid(Uuid::new_v4()), fields.clone());
      self.todos.lock().unwrap().push(todo.clone());
      Ok(todo)
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      Ok(self.snapshot())
   }

   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      Ok(self
         .todos
         .lock()
         .unwrap()
         .iter()
         .find(|t| t.id() == id)
         .cloned())
   }

   async fn update(&self, id: &TodoId, fields: &TodoFields) -> Result<bool, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      let Some(pos) = todos.iter().position(|t| t.id() == id) else {
         return Ok(false);
      };
      let current = todos.remove(pos);
      todos.insert(pos, current.with_fields(fields.clone()));
      Ok(true)
   }

   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      let before = todos.len();
      todos.retain(|t| t.id() != id);
      Ok(todos.len() < before)
   }
}
