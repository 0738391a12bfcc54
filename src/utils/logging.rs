/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 组卷选题模式 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 组卷服务: {}", config.endpoint_url);
    if config.persist_selection {
        info!("💾 已选题目保存至: {}", config.state_file.display());
    } else {
        info!("💾 不保存已选题目");
    }
    info!("{}", "=".repeat(60));
}

/// 记录文件加载信息
///
/// # 参数
/// - `source`: 文件来源（路径）
/// - `size`: 字节数
pub fn log_file_received(source: &str, size: usize) {
    info!("📁 正在读取: {} ({} 字节)", source, size);
}

/// 记录本次会话的提交统计
///
/// # 参数
/// - `succeeded`: 成功次数
/// - `failed`: 失败次数
pub fn log_session_end(succeeded: usize, failed: usize) {
    info!("{}", "─".repeat(60));
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 提交成功: {}", succeeded);
    info!("❌ 提交失败: {}", failed);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
