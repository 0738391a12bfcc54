//! 持久化键值存储
//!
//! 相当于浏览器的 localStorage：同步读写，值为字符串

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::error::StorageError;

/// 已选题目索引的存储键
pub const SELECTION_KEY: &str = "selectedQuestions";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// 删除键，键不存在时不报错
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
