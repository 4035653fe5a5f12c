//! # TodoFlow API サーバー
//!
//! Todo の CRUD を提供する HTTP サーバー。
//!
//! ## 起動手順
//!
//! 1. カレントディレクトリの `.env` の読み込み（存在しない場合は起動しない）
//! 2. トレーシングの初期化
//! 3. 設定の読み込み
//! 4. 接続プールの作成とマイグレーション
//! 5. ルーターの構築とサーバー起動
//!
//! いずれかの手順が失敗した場合は非ゼロで終了する。
//!
//! ## 起動方法
//!
//! ```bash
//! cp .env.example .env
//! cargo run -p todoflow-api
//! ```

use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context as _;
use todoflow_api::{
   app_builder::build_app,
   config::{self, ApiConfig},
   handler::{ReadinessState, TodoState},
};
use todoflow_infra::{db, repository::PostgresTodoRepository};
use todoflow_shared::observability::{self, TracingConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む
   config::load_env_file(Path::new(".")).context(".env ファイルの読み込みに失敗しました")?;

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("todoflow-api");
   observability::init_tracing(&tracing_config);
   let _tracing_guard = tracing_config.app_span().entered();

   // 設定読み込み
   let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
   tracing::info!(
      "API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database)
      .await
      .context("データベース接続に失敗しました")?;
   tracing::info!("データベースに接続しました");

   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!("マイグレーションを適用しました");

   // 依存コンポーネントを初期化
   let todo_state = Arc::new(TodoState {
      repository:      Arc::new(PostgresTodoRepository::new(pool.clone())),
      create_response: config.create_response,
   });
   let readiness_state = Arc::new(ReadinessState { pool });

   let app = build_app(todo_state, readiness_state);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("バインドアドレスのパースに失敗しました")?;
   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
