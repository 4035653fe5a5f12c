//! # Observability 基盤
//!
//! ログ出力の初期化と、HTTP リクエストごとのスパン生成を扱う。
//!
//! ## 構成
//!
//! ```text
//! TracingConfig ──init_tracing──▶ registry
//!                                 ├─ EnvFilter（RUST_LOG）
//!                                 ├─ fmt layer（LOG_FORMAT: json / pretty）
//!                                 └─ ErrorLayer（InfraError の SpanTrace 用）
//!
//! TracingConfig ──app_span──▶ "app" スパン（service フィールド付き）
//!                              └─ "request" スパン（make_request_span）
//! ```
//!
//! `init_tracing` 以降のフィーチャー依存部分は `observability` feature で有効になる。

use std::str::FromStr;

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 行 1 イベントの JSON
   Json,
   /// 開発用の人間向け出力
   #[default]
   Pretty,
}

impl FromStr for LogFormat {
   type Err = String;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s.trim().to_ascii_lowercase().as_str() {
         "json" => Ok(Self::Json),
         "pretty" => Ok(Self::Pretty),
         other => Err(other.to_string()),
      }
   }
}

impl LogFormat {
   /// `LOG_FORMAT` の値から出力形式を決める
   ///
   /// 未設定なら `Pretty`。解釈できない値も `Pretty` にするが、subscriber が
   /// まだ無いので警告は stderr に直接書く。
   pub fn resolve(value: Option<&str>) -> Self {
      match value.map(str::parse::<Self>) {
         None => Self::default(),
         Some(Ok(format)) => format,
         Some(Err(unknown)) => {
            eprintln!("WARNING: LOG_FORMAT={unknown:?} は不明な値です。pretty で出力します");
            Self::default()
         }
      }
   }

   pub fn from_env() -> Self {
      Self::resolve(std::env::var("LOG_FORMAT").ok().as_deref())
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// `app` スパンの `service` フィールドに入るサービス名
   pub service_name: String,
   pub log_format:   LogFormat,
}

impl TracingConfig {
   /// サービス名を指定し、出力形式は `LOG_FORMAT` から読む
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self {
         service_name: service_name.into(),
         log_format:   LogFormat::from_env(),
      }
   }

   /// プロセス全体を包む `app` スパンを作る
   ///
   /// 起動時に `entered()` しておくと、以降のすべてのログに `service` が付く。
   #[cfg(feature = "observability")]
   pub fn app_span(&self) -> tracing::Span {
      tracing::info_span!("app", service = %self.service_name)
   }
}

/// グローバル subscriber を登録する
///
/// フィルタは `RUST_LOG`、未設定時は `info,todoflow=debug`。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| "info,todoflow=debug".into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .init();
}

/// リクエスト ID ヘッダー名
#[cfg(feature = "observability")]
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v7 でリクエスト ID を生成する `MakeRequestId` 実装
///
/// `SetRequestIdLayer` と組み合わせて使用する。クライアントが
/// `x-request-id` を送ってきた場合はレイヤー側でそちらが優先される。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(
      &mut self,
      _request: &http::Request<B>,
   ) -> Option<tower_http::request_id::RequestId> {
      let id = uuid::Uuid::now_v7().to_string();
      http::HeaderValue::from_str(&id)
         .ok()
         .map(tower_http::request_id::RequestId::new)
   }
}

/// `TraceLayer` 用のリクエストスパンを生成する
///
/// `request_id` は `SetRequestIdLayer` が付与したヘッダーから取得する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}
