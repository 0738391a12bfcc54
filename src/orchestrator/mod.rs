//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `session` - 选题会话
//! - 持有题目、选中状态、持久化存储
//! - 把界面事件转换为状态变化
//! - 调用提交流程
//!
//! ### `commands` - 交互命令
//! - 把终端输入解析为命令
//!
//! ### `app` - 终端应用
//! - 读取 stdin，把命令翻译为会话事件
//!
//! ## 层次关系
//!
//! ```text
//! app (终端输入)
//!     ↓
//! session (事件 → 状态转换)
//!     ↓
//! workflow::SubmissionPipeline (一次提交)
//!     ↓
//! clients::PaperClient (HTTP)
//! ```

pub mod app;
pub mod commands;
pub mod session;

pub use app::App;
pub use commands::{parse_command, Command, CommandError};
pub use session::{Event, EventOutcome, Session, SessionStats};
