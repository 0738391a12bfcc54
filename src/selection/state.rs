//! 已选题目状态
//!
//! 索引按升序保存，提交顺序即原表中的行顺序

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::RecordStore;
use crate::storage::{KeyValueStore, SELECTION_KEY};

/// 按题型统计的已选数量
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCounts {
    pub total: usize,
    pub per_type: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某一题的选中状态，返回状态是否发生变化
    pub fn toggle(&mut self, index: usize, checked: bool) -> bool {
        if checked {
            self.selected.insert(index)
        } else {
            self.selected.remove(&index)
        }
    }

    pub fn select_all(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected.extend(indices);
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    pub fn current(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// 根据当前记录实时统计，不做缓存
    pub fn counts_by_type(&self, records: &RecordStore) -> SelectionCounts {
        let mut counts = SelectionCounts::default();
        for record in self.selected.iter().filter_map(|&index| records.get(index)) {
            counts.total += 1;
            *counts.per_type.entry(record.type_key()).or_insert(0) += 1;
        }
        counts
    }

    /// 以 `["0","2"]` 的形式写入存储
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let values: Vec<String> = self.selected.iter().map(|index| index.to_string()).collect();
        store.set(SELECTION_KEY, &serde_json::to_string(&values)?)?;
        debug!("已保存 {} 个选中索引", values.len());
        Ok(())
    }

    /// 从存储恢复，超出 `record_count` 的索引会被丢弃
    ///
    /// 存储中没有记录时结果为空集
    pub fn restore(
        &mut self,
        store: &dyn KeyValueStore,
        record_count: usize,
    ) -> Result<(), StorageError> {
        self.selected.clear();

        let Some(raw) = store.get(SELECTION_KEY)? else {
            return Ok(());
        };

        let values: Vec<Value> = serde_json::from_str(&raw)?;
        let mut dropped = 0usize;
        for value in values {
            match parse_index(&value) {
                Some(index) if index < record_count => {
                    self.selected.insert(index);
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                "⚠️ 已丢弃 {} 个无效的已选索引 (当前共 {} 道题目)",
                dropped, record_count
            );
        }
        debug!("已恢复 {} 个选中索引", self.selected.len());
        Ok(())
    }

    /// 删除存储中的已选记录（不是写入空列表）
    pub fn clear_persisted(store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.remove(SELECTION_KEY)
    }
}

fn parse_index(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    }
}
