//! 交互命令解析
//!
//! 题号对用户从 1 开始，解析后转换为从 0 开始的索引

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// 单个范围最多展开的题号数
pub const MAX_RANGE_LEN: usize = 1000;

/// `3` 或 `3-5`
static INDEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\s*-\s*(\d+))?$").expect("Invalid question number regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Toggle(Vec<usize>),
    Check(Vec<usize>),
    Uncheck(Vec<usize>),
    All,
    None,
    List,
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help` for the list)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid question number `{0}`")]
    InvalidIndex(String),
    #[error("range `{0}` is too large (at most 1000 questions at once)")]
    RangeTooLarge(String),
}

/// 解析一行输入，空行返回 `Ok(None)`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_lowercase().as_str() {
        "load" | "open" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("load"));
            }
            Command::Load(PathBuf::from(rest))
        }
        "toggle" | "t" => Command::Toggle(parse_indices("toggle", rest)?),
        "check" | "c" => Command::Check(parse_indices("check", rest)?),
        "uncheck" | "u" => Command::Uncheck(parse_indices("uncheck", rest)?),
        "all" => Command::All,
        "none" => Command::None,
        "list" | "ls" => Command::List,
        "submit" => Command::Submit,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// 解析 `1,3,5-7` 形式的题号列表
fn parse_indices(command: &'static str, input: &str) -> Result<Vec<usize>, CommandError> {
    if input.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }

    let mut indices = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let caps = INDEX_PATTERN
            .captures(part)
            .ok_or_else(|| CommandError::InvalidIndex(part.to_string()))?;

        let start = to_index(&caps[1])?;
        let end = match caps.get(2) {
            Some(m) => to_index(m.as_str())?,
            None => start,
        };

        if end < start {
            return Err(CommandError::InvalidIndex(part.to_string()));
        }
        if end - start >= MAX_RANGE_LEN {
            return Err(CommandError::RangeTooLarge(part.to_string()));
        }
        indices.extend(start..=end);
    }

    Ok(indices)
}

fn to_index(number: &str) -> Result<usize, CommandError> {
    number
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidIndex(number.to_string()))
}
