//! # TodoFlow API サーバー
//!
//! Todo の CRUD を提供する HTTP サーバーのライブラリ部分。
//! バイナリ（`main.rs`）はインフラ初期化とサーバー起動のみを担当し、
//! ルーター構築やハンドラはこのクレートに置く。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとミドルウェアの組み立て
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`extract`] - リクエストボディの JSON 抽出
//! - [`handler`] - HTTP リクエストハンドラ
//!
//! ## 依存関係
//!
//! - `todoflow_domain`: Todo エンティティ
//! - `todoflow_infra`: 接続プール、リポジトリ
//! - `todoflow_shared`: トレーシング、Problem Details、ヘルスチェック型

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
