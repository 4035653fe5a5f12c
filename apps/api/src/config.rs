//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|------------|
//! | `API_HOST` | No | `0.0.0.0` |
//! | `API_PORT` | No | `8000` |
//! | `POSTGRES_HOST` | No | `localhost` |
//! | `POSTGRES_PORT` | No | `5432` |
//! | `POSTGRES_USER` | **Yes** | - |
//! | `POSTGRES_PASSWORD` | **Yes** | - |
//! | `POSTGRES_DB` | **Yes** | - |
//! | `DATABASE_MAX_CONNECTIONS` | No | `10` |
//! | `TODO_CREATE_RESPONSE` | No | `echo` |
//!
//! 値が解釈できない場合は [`ConfigError`] を返し、起動を中止する。

use std::{env, path::Path, str::FromStr};

use thiserror::Error;
use todoflow_infra::db::DatabaseSettings;

/// 環境変数ファイル名
pub const ENV_FILE: &str = ".env";

/// `dir` 直下の `.env` を読み込み、プロセスの環境変数に反映する
///
/// 親ディレクトリは探索しない。ファイルが無ければエラー。
pub fn load_env_file(dir: &Path) -> Result<(), dotenvy::Error> {
   dotenvy::from_path(dir.join(ENV_FILE))
}

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が設定されていない
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   /// 環境変数の値が不正
   #[error("{name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// Todo 作成時のレスポンス形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateResponseMode {
   /// 受け取った `{content, checked}` をそのまま返す
   #[default]
   Echo,
   /// 保存された行を `{id, content, checked}` で返す
   Stored,
}

impl FromStr for CreateResponseMode {
   type Err = ();

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s.to_ascii_lowercase().as_str() {
         "echo" => Ok(Self::Echo),
         "stored" => Ok(Self::Stored),
         _ => Err(()),
      }
   }
}

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
   /// バインドアドレス
   pub host:            String,
   /// ポート番号
   pub port:            u16,
   /// データベース接続設定
   pub database:        DatabaseSettings,
   /// Todo 作成時のレスポンス形式
   pub create_response: CreateResponseMode,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// `lookup` は変数名に対応する値を返す。テストではプロセスの環境変数を
   /// 書き換えずに `HashMap` などを渡す。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

      Ok(Self {
         host:            lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port:            parse_or(&lookup, "API_PORT", 8000)?,
         database:        DatabaseSettings {
            host:            lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
            port:            parse_or(&lookup, "POSTGRES_PORT", 5432)?,
            user:            required("POSTGRES_USER")?,
            password:        required("POSTGRES_PASSWORD")?,
            database:        required("POSTGRES_DB")?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
         },
         create_response: parse_or(
            &lookup,
            "TODO_CREATE_RESPONSE",
            CreateResponseMode::default(),
         )?,
      })
   }
}

/// 値があればパースし、なければデフォルト値を使う
fn parse_or<T: FromStr>(
   lookup: &impl Fn(&str) -> Option<String>,
   name: &'static str,
   default: T,
) -> Result<T, ConfigError> {
   match lookup(name) {
      Some(value) => value
         .parse()
         .map_err(|_| ConfigError::Invalid { name, value }),
      None => Ok(default),
   }
}
