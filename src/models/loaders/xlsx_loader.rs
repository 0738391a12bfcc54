//! 工作簿解析
//!
//! 只读取第一个工作表，第一行作为列名，其余每一行转换为一条 [`QuestionRecord`]

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::FormatError;
use crate::models::question::QuestionRecord;

/// 空列名的前缀
const EMPTY_HEADER: &str = "__EMPTY";

/// 从内存中的工作簿字节解析题目
///
/// - 单元格为空时该列不写入记录
/// - 整行为空时跳过
/// - 第一条记录必须包含必需列，否则返回 [`FormatError::MissingColumns`]
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<QuestionRecord>, FormatError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| FormatError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(FormatError::NoSheets)?
        .map_err(|e| FormatError::Unreadable(e.to_string()))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => build_headers(header_row),
        None => return Err(FormatError::MissingColumns),
    };

    let records: Vec<QuestionRecord> = rows
        .filter_map(|row| row_to_record(&headers, row))
        .collect();

    debug!("解析工作表: {} 列, {} 条记录", headers.len(), records.len());

    match records.first() {
        Some(first) if first.has_required_columns() => Ok(records),
        _ => Err(FormatError::MissingColumns),
    }
}

/// 生成列名：空列名依次为 `__EMPTY`、`__EMPTY_1`…，重复列名追加 `_1`、`_2`…
fn build_headers(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut empty_count = 0usize;

    row.iter()
        .map(|cell| {
            let raw = cell.to_string();
            if raw.is_empty() {
                let name = if empty_count == 0 {
                    EMPTY_HEADER.to_string()
                } else {
                    format!("{}_{}", EMPTY_HEADER, empty_count)
                };
                empty_count += 1;
                return name;
            }

            let count = seen.entry(raw.clone()).or_insert(0);
            let name = if *count == 0 {
                raw
            } else {
                format!("{}_{}", raw, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn row_to_record(headers: &[String], row: &[Data]) -> Option<QuestionRecord> {
    let fields: Map<String, Value> = headers
        .iter()
        .zip(row)
        .filter_map(|(header, cell)| cell_to_value(cell).map(|value| (header.clone(), value)))
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(QuestionRecord::from_fields(fields))
    }
}

/// 单元格转换为 JSON 值，空单元格返回 `None`
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => float_to_value(*f),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => float_to_value(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(e) => Some(Value::String(e.to_string())),
    }
}

/// 整数值的浮点数按整数输出，避免 `3` 被序列化为 `3.0`
fn float_to_value(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number)
    }
}
