//! # Paper Picker
//!
//! 从 Excel 题库中勾选题目并提交到组卷服务
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Storage）
//! - `models/` - 题目记录与工作簿解析，`RecordStore` 持有当前文件的全部题目
//! - `storage/` - 键值存储（文件 / 内存），保存已选题目
//!
//! ### ② 状态层（Selection）
//! - `SelectionState` - 已选索引集合、按题型统计、保存与恢复
//!
//! ### ③ 视图层（View）
//! - `QuestionView` - 核心把状态推送给界面的接口
//! - `TerminalView` / `RecordingView` - 终端实现与无界面实现
//!
//! ### ④ 流程层（Clients / Workflow）
//! - `PaperClient` - 组卷服务 HTTP 调用
//! - `SubmissionPipeline` - 校验 → 提交 → 解析响应
//!
//! ### ⑤ 编排层（Orchestration）
//! - `Session` - 事件分发，持有全部可变状态
//! - `App` - 终端交互循环

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod selection;
pub mod storage;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpTransport, PaperClient, PaperTransport, TransportResponse};
pub use config::Config;
pub use error::{AppError, AppResult, FormatError, StorageError, SubmitError, TransportError};
pub use models::{QuestionRecord, RecordStore};
pub use orchestrator::{App, Event, EventOutcome, Session};
pub use selection::{SelectionCounts, SelectionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{QuestionView, RecordingView, StatusLine, TerminalView, Tone, ViewItem};
pub use workflow::{SubmissionPhase, SubmissionPipeline, SubmissionResult, SubmissionStatus};
