use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use paper_picker::{logger, App, Config};

/// 从 Excel 题库中勾选题目并提交到组卷服务
#[derive(Debug, Parser)]
#[command(name = "paper-picker", version, about)]
struct Cli {
    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 组卷服务地址（覆盖配置）
    #[arg(long)]
    endpoint: Option<String>,

    /// 启动后立即加载的题库文件
    #[arg(long)]
    file: Option<PathBuf>,

    /// 已选题目的状态文件
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// 不保存已选题目
    #[arg(long)]
    no_persist: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint_url = endpoint;
    }
    if let Some(state_file) = cli.state_file {
        config.state_file = state_file;
    }
    if cli.no_persist {
        config.persist_selection = false;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run(cli.file).await?;

    Ok(())
}
