use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::orchestrator::commands::{parse_command, Command};
use crate::orchestrator::session::{Event, EventOutcome, Session};
use crate::utils::logging::{log_file_received, log_session_end, log_startup};
use crate::view::{QuestionView, StatusLine, TerminalView};

/// 应用主结构
pub struct App {
    session: Session,
    view: TerminalView,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let session = Session::from_config(&config).context("无法创建选题会话")?;

        Ok(Self {
            session,
            view: TerminalView::new(),
        })
    }

    /// 运行交互循环，直到输入 `quit` 或 stdin 关闭
    pub async fn run(&mut self, initial_file: Option<PathBuf>) -> Result<()> {
        if let Some(path) = initial_file {
            self.load_file(&path).await;
        }

        self.view.print_help();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush().context("无法写入终端")?;

            let Some(line) = lines.next_line().await.context("无法读取输入")? else {
                break;
            };

            match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => {}
                Err(e) => self.view.print_hint(&e.to_string()),
            }
        }

        let stats = self.session.stats();
        log_session_end(stats.succeeded, stats.failed);
        Ok(())
    }

    async fn execute(&mut self, command: Command) {
        match command {
            Command::Load(path) => self.load_file(&path).await,
            Command::Toggle(indices) => {
                for index in self.loaded_only(indices) {
                    let checked = !self.session.selection().is_selected(index);
                    self.toggle(index, checked).await;
                }
            }
            Command::Check(indices) => {
                for index in self.loaded_only(indices) {
                    self.toggle(index, true).await;
                }
            }
            Command::Uncheck(indices) => {
                for index in self.loaded_only(indices) {
                    self.toggle(index, false).await;
                }
            }
            Command::All => self.send(Event::SelectAll).await,
            Command::None => self.send(Event::SelectNone).await,
            Command::List => {
                if self.session.records().is_empty() {
                    self.view.print_hint("No questions loaded yet. Use `load <path>`.");
                } else {
                    self.session.render(&mut self.view);
                }
            }
            Command::Submit => {
                if !self.view.submit_enabled() {
                    self.view.print_hint("Load a question file before submitting.");
                    return;
                }
                self.send(Event::SubmitRequested).await;
            }
            Command::Help => self.view.print_help(),
            Command::Quit => {}
        }
    }

    /// 去掉超出当前题目数的题号，只提示一次
    fn loaded_only(&self, indices: Vec<usize>) -> Vec<usize> {
        let count = self.session.records().len();
        let (valid, missing): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&index| index < count);

        if !missing.is_empty() {
            self.view.print_hint(&format!(
                "Skipped {} question number(s): only {} question(s) are loaded.",
                missing.len(),
                count
            ));
        }
        valid
    }

    async fn toggle(&mut self, index: usize, checked: bool) {
        let outcome = self
            .session
            .dispatch(Event::ToggleIndex { index, checked }, &mut self.view)
            .await;

        if outcome == EventOutcome::Ignored {
            self.view
                .print_hint(&format!("There is no question {}.", index + 1));
        }
    }

    async fn send(&mut self, event: Event) {
        let outcome = self.session.dispatch(event, &mut self.view).await;
        if outcome == EventOutcome::Ignored {
            self.view.print_hint("Nothing to do: no questions are loaded.");
        }
    }

    /// 读取文件并交给会话；读取失败按文件错误显示
    async fn load_file(&mut self, path: &Path) {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                log_file_received(&path.display().to_string(), bytes.len());
                self.session
                    .dispatch(Event::FileLoaded(bytes), &mut self.view)
                    .await;
                if self.session.submit_enabled() {
                    info!("✓ 已加载 {} 道题目", self.session.records().len());
                }
            }
            Err(e) => {
                warn!("⚠️ 无法读取文件 {}: {}", path.display(), e);
                self.view.set_status(&StatusLine::error(format!(
                    "Error: cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }
}
