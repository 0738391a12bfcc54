use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 题干列名
pub const QUESTION_TEXT: &str = "QuestionText";
/// 题型列名
pub const QUESTION_TYPE: &str = "QuestionType";
/// 第一条记录必须包含的列
pub const REQUIRED_COLUMNS: [&str; 2] = [QUESTION_TEXT, QUESTION_TYPE];

/// 题干为空时的占位文本
pub const NO_TEXT_PLACEHOLDER: &str = "No question text found.";
/// 缺失题型时归入的类别
pub const UNKNOWN_TYPE: &str = "n/a";

/// 表格中的一行题目
///
/// 保留原表的全部列（按列顺序），提交时原样序列化为 JSON 对象
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord {
    fields: Map<String, Value>,
}

impl QuestionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// 是否同时包含 `QuestionText` 和 `QuestionType`
    pub fn has_required_columns(&self) -> bool {
        REQUIRED_COLUMNS
            .iter()
            .all(|column| self.fields.contains_key(*column))
    }

    /// 题干文本，缺失或为空时返回 `None`
    pub fn text(&self) -> Option<String> {
        self.get(QUESTION_TEXT)
            .map(display_value)
            .filter(|text| !text.trim().is_empty())
    }

    /// 列表中显示的题干，缺失时使用占位文本
    pub fn display_text(&self) -> String {
        self.text()
            .unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string())
    }

    /// 题型类别（小写），缺失或为空时为 `n/a`
    pub fn type_key(&self) -> String {
        self.get(QUESTION_TYPE)
            .map(display_value)
            .map(|raw| raw.trim().to_lowercase())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }

    /// 题型徽标文本
    pub fn badge(&self) -> String {
        self.type_key().to_uppercase()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
