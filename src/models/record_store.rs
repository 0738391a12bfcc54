//! 题目记录存储
//!
//! 持有当前文件解析出的全部题目，每次加载整体替换

use tracing::{info, warn};

use crate::error::FormatError;
use crate::models::loaders::parse_workbook;
use crate::models::question::QuestionRecord;

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<QuestionRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接用已有记录构建（不做列校验）
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// 解析工作簿并替换当前记录
    ///
    /// 失败时存储被清空，不会保留上一次加载的记录
    pub fn load(&mut self, bytes: &[u8]) -> Result<&[QuestionRecord], FormatError> {
        match parse_workbook(bytes) {
            Ok(records) => {
                info!("✓ 成功解析 {} 道题目", records.len());
                self.records = records;
                Ok(&self.records)
            }
            Err(e) => {
                warn!("⚠️ 文件解析失败，已清空题目列表: {}", e);
                self.records.clear();
                Err(e)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 索引是否指向当前存储中的记录
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.records.len()
    }
}
