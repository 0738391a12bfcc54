//! 选题会话
//!
//! 持有题目、选中状态、持久化存储和提交流程。界面事件统一经 [`Session::dispatch`]
//! 进入，每种事件对应一个状态转换函数；视图由调用方注入

use tracing::{debug, error, info, warn};

use crate::clients::{HttpTransport, PaperClient};
use crate::config::Config;
use crate::error::{AppResult, SubmitError};
use crate::models::RecordStore;
use crate::selection::SelectionState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::view::{project, QuestionView, StatusLine, Tone};
use crate::workflow::{SubmissionPhase, SubmissionPipeline, SubmissionResult};

/// 界面事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 读取到了新文件的字节
    FileLoaded(Vec<u8>),
    ToggleIndex { index: usize, checked: bool },
    SelectAll,
    SelectNone,
    SubmitRequested,
}

/// 事件是否产生了效果
///
/// 控件不可用时（未加载文件、提交中）事件被忽略，不排队也不报错
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    Ignored,
}

/// 会话统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Session {
    records: RecordStore,
    selection: SelectionState,
    storage: Box<dyn KeyValueStore>,
    persist_selection: bool,
    /// 本次启动后尚未成功加载过文件：下一次加载恢复上次保存的选择
    resume_pending: bool,
    submit_enabled: bool,
    pipeline: SubmissionPipeline,
    last_result: Option<SubmissionResult>,
    stats: SessionStats,
}

impl Session {
    pub fn new(storage: Box<dyn KeyValueStore>, client: PaperClient, persist_selection: bool) -> Self {
        Self {
            records: RecordStore::new(),
            selection: SelectionState::new(),
            storage,
            persist_selection,
            resume_pending: true,
            submit_enabled: false,
            pipeline: SubmissionPipeline::new(client),
            last_result: None,
            stats: SessionStats::default(),
        }
    }

    /// 按配置创建：状态文件 + reqwest 客户端
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let storage: Box<dyn KeyValueStore> = if config.persist_selection {
            Box::new(FileStore::open(&config.state_file)?)
        } else {
            Box::new(MemoryStore::new())
        };

        let transport = HttpTransport::new().map_err(SubmitError::from)?;
        let client = PaperClient::new(config.endpoint_url.clone(), Box::new(transport));

        Ok(Self::new(storage, client, config.persist_selection))
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.pipeline.phase()
    }

    pub fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// 处理一个界面事件
    pub async fn dispatch(&mut self, event: Event, view: &mut dyn QuestionView) -> EventOutcome {
        match event {
            Event::FileLoaded(bytes) => self.on_file_loaded(&bytes, view),
            Event::ToggleIndex { index, checked } => self.on_toggle(index, checked, view),
            Event::SelectAll => self.on_select_all(view),
            Event::SelectNone => self.on_select_none(view),
            Event::SubmitRequested => self.on_submit(view).await,
        }
    }

    /// 重新渲染整个列表（不改变任何状态）
    pub fn render(&self, view: &mut dyn QuestionView) {
        view.render_items(&project(&self.records, &self.selection));
        self.refresh_counts(view);
    }

    fn on_file_loaded(&mut self, bytes: &[u8], view: &mut dyn QuestionView) -> EventOutcome {
        let loaded = self.records.load(bytes).map(|records| records.len());

        match loaded {
            Ok(count) => {
                self.sync_selection_after_load(count);
                self.submit_enabled = true;

                view.render_items(&project(&self.records, &self.selection));
                view.set_selection_area_visible(true);
                view.set_submit_enabled(true);
                view.set_status(&StatusLine::cleared());
                self.refresh_counts(view);
            }
            Err(e) => {
                error!("❌ 文件处理失败: {}", e);
                self.selection.select_none();
                self.submit_enabled = false;

                view.render_items(&[]);
                view.set_selection_area_visible(false);
                view.set_submit_enabled(false);
                view.set_status(&StatusLine::error(format!("Error: {}", e)));
                self.refresh_counts(view);
            }
        }

        EventOutcome::Applied
    }

    /// 新文件加载后的选中状态：
    /// - 启动后的第一次加载：恢复保存的选择，丢弃越界索引
    /// - 之后的加载：删除保存的选择，从空开始
    fn sync_selection_after_load(&mut self, record_count: usize) {
        self.selection.select_none();
        let resuming = std::mem::replace(&mut self.resume_pending, false);

        if !self.persist_selection {
            return;
        }

        if resuming {
            match self.selection.restore(&*self.storage, record_count) {
                Ok(()) => {
                    if !self.selection.is_empty() {
                        info!("♻️ 已恢复上次选择的 {} 道题目", self.selection.len());
                    }
                    self.save_selection();
                }
                Err(e) => {
                    warn!("⚠️ 无法恢复上次的选择: {}", e);
                    self.selection.select_none();
                    self.clear_saved_selection();
                }
            }
        } else {
            self.clear_saved_selection();
        }
    }

    fn on_toggle(&mut self, index: usize, checked: bool, view: &mut dyn QuestionView) -> EventOutcome {
        if !self.records.contains_index(index) {
            warn!(
                "⚠️ 忽略无效的题目索引 {} (共 {} 道题目)",
                index,
                self.records.len()
            );
            return EventOutcome::Ignored;
        }

        if self.selection.toggle(index, checked) {
            debug!("题目 {} → {}", index, if checked { "选中" } else { "取消" });
            self.save_selection();
        }
        self.refresh_counts(view);
        EventOutcome::Applied
    }

    fn on_select_all(&mut self, view: &mut dyn QuestionView) -> EventOutcome {
        if self.records.is_empty() {
            return EventOutcome::Ignored;
        }
        self.selection.select_all(0..self.records.len());
        self.save_selection();
        self.render(view);
        EventOutcome::Applied
    }

    fn on_select_none(&mut self, view: &mut dyn QuestionView) -> EventOutcome {
        if self.records.is_empty() {
            return EventOutcome::Ignored;
        }
        self.selection.select_none();
        self.save_selection();
        self.render(view);
        EventOutcome::Applied
    }

    async fn on_submit(&mut self, view: &mut dyn QuestionView) -> EventOutcome {
        if !self.submit_enabled || self.pipeline.is_busy() {
            debug!("提交按钮不可用，忽略本次提交");
            return EventOutcome::Ignored;
        }

        let result = self
            .pipeline
            .submit(&self.records, &self.selection, view)
            .await;

        if result.is_success() {
            self.stats.succeeded += 1;
            // 只删除保存的选择，界面上的勾选保持不变
            if self.persist_selection {
                self.clear_saved_selection();
            }
        } else if result.tone == Tone::Error {
            self.stats.failed += 1;
        }

        self.last_result = Some(result);
        EventOutcome::Applied
    }

    fn refresh_counts(&self, view: &mut dyn QuestionView) {
        view.render_counts(&self.selection.counts_by_type(&self.records));
    }

    /// 存储失败只记录日志，不影响界面
    fn save_selection(&mut self) {
        if !self.persist_selection {
            return;
        }
        if let Err(e) = self.selection.persist(&mut *self.storage) {
            warn!("⚠️ 无法保存已选题目: {}", e);
        }
    }

    fn clear_saved_selection(&mut self) {
        match SelectionState::clear_persisted(&mut *self.storage) {
            Ok(()) => debug!("已删除保存的选择"),
            Err(e) => warn!("⚠️ 无法删除保存的选择: {}", e),
        }
    }
}
