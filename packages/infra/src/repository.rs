//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由の注入**: ハンドラは `Arc<dyn TodoRepository>` に依存し、
//!   テストではインメモリ実装に差し替える
//! - **1 操作 1 SQL**: トランザクションをまたぐ処理は持たない

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
