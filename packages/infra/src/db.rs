//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、スキーマの適用、疎通確認を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 起動時に一度だけ作成し、全リクエストで共有する
//! - **接続情報は個別指定**: `POSTGRES_USER` などの値から [`PgConnectOptions`] を
//!   組み立てる（URL 文字列を経由しないため、パスワードのエスケープが不要）
//! - **SSL 無効**: 同一ネットワーク内の DB への接続を前提とする
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoflow_infra::db::{self, DatabaseSettings};
//!
//! let settings = DatabaseSettings {
//!     host:            "localhost".to_string(),
//!     port:            5432,
//!     user:            "postgres".to_string(),
//!     password:        "postgres".to_string(),
//!     database:        "todo".to_string(),
//!     max_connections: 10,
//! };
//! let pool = db::create_pool(&settings).await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::{fmt, time::Duration};

use sqlx::{
   PgPool,
   postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

use crate::error::InfraError;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// データベース接続設定
///
/// `Debug` 出力ではパスワードをマスクする。
#[derive(Clone)]
pub struct DatabaseSettings {
   pub host:            String,
   pub port:            u16,
   pub user:            String,
   pub password:        String,
   pub database:        String,
   /// 接続プールの最大接続数
   pub max_connections: u32,
}

impl DatabaseSettings {
   /// sqlx の接続オプションに変換する
   pub fn connect_options(&self) -> PgConnectOptions {
      PgConnectOptions::new()
         .host(&self.host)
         .port(self.port)
         .username(&self.user)
         .password(&self.password)
         .database(&self.database)
         .ssl_mode(PgSslMode::Disable)
   }
}

impl fmt::Debug for DatabaseSettings {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("DatabaseSettings")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("user", &self.user)
         .field("password", &"[REDACTED]")
         .field("database", &self.database)
         .field("max_connections", &self.max_connections)
         .finish()
   }
}

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// アプリケーション全体で共有する。最初の接続確立まで待機するため、
/// DB に到達できない場合はここでエラーになる。
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
   PgPoolOptions::new()
      .max_connections(settings.max_connections)
      .acquire_timeout(ACQUIRE_TIMEOUT)
      .connect_with(settings.connect_options())
      .await
}

/// データベースマイグレーションを実行する
///
/// `sqlx::migrate!()` マクロで埋め込まれたマイグレーションファイルを
/// 順番に適用する。適用済みのマイグレーションはスキップされ、
/// `CREATE TABLE IF NOT EXISTS` のため既存データも保持される。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
   sqlx::migrate!("../../migrations").run(pool).await
}

/// DB への疎通を `SELECT 1` で確認する
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
   sqlx::query("SELECT 1").execute(pool).await?;
   Ok(())
}
