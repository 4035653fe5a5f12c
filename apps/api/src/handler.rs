//! # HTTP リクエストハンドラ
//!
//! 各ハンドラはサブモジュールに配置し、ここで re-export する。
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # ヘルスチェック
//!     └── todo.rs     # Todo CRUD
//! ```

pub mod health;
pub mod todo;

pub use health::{ReadinessState, health_check, readiness_check};
pub use todo::{
   TodoDto,
   TodoRequest,
   TodoState,
   create_todo,
   delete_todo,
   get_todo,
   list_todos,
   update_todo,
};
