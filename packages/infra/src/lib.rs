//! # TodoFlow インフラ層
//!
//! PostgreSQL との接続・永続化を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、起動時のスキーマ適用
//! - **リポジトリ実装**: Todo の CRUD を 1 操作 1 SQL で提供
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリのモックリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoflow_infra::{db, repository::{PostgresTodoRepository, TodoRepository}};
//!
//! let pool = db::create_pool(&settings).await?;
//! db::run_migrations(&pool).await?;
//! let repo = PostgresTodoRepository::new(pool);
//! let todos = repo.find_all().await?;
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
