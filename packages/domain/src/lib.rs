//! # TodoFlow ドメイン層
//!
//! Todo エンティティと、その識別子・可変フィールドを定義する。
//!
//! ## 設計方針
//!
//! - **インフラ非依存**: sqlx や axum に依存しない
//! - **ID は永続化層が採番**: `TodoId` は既存 UUID からの復元のみを公開する
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティ

pub mod todo;

pub use todo::{Todo, TodoFields, TodoId};
