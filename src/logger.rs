//! 日志初始化
//!
//! 过滤规则优先取 `RUST_LOG`，否则使用 `info`（详细模式为 `debug`）

use tracing_subscriber::EnvFilter;

/// 初始化全局日志，重复调用时忽略
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,paper_picker={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
