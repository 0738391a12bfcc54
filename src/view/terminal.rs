//! 终端视图
//!
//! 题目列表和状态栏输出到 stdout，日志走 stderr，互不干扰

use colored::{ColoredString, Colorize};

use crate::selection::SelectionCounts;
use crate::utils::logging::truncate_text;
use crate::view::{counter_text, QuestionView, StatusLine, Tone, ViewItem};

/// 列表中题干的最大显示长度
const MAX_TEXT_WIDTH: usize = 90;

#[derive(Debug, Default)]
pub struct TerminalView {
    submit_enabled: bool,
    selection_area_visible: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// 打印交互命令说明
    pub fn print_help(&self) {
        println!("{}", "Commands:".bright_white().bold());
        println!("  load <path>        load a spreadsheet (.xlsx, .xls, .ods)");
        println!("  toggle <n,m-k>     flip the checkbox of the given questions");
        println!("  check <n,m-k>      select the given questions");
        println!("  uncheck <n,m-k>    deselect the given questions");
        println!("  all | none         select or deselect every question");
        println!("  list               show the question list again");
        println!("  submit             send the selection to the paper generator");
        println!("  help | quit");
    }

    pub fn print_hint(&self, text: &str) {
        println!("  {}", text.bright_black());
    }
}

fn badge(item: &ViewItem) -> ColoredString {
    let label = format!("[{}]", item.badge);
    match item.type_key.as_str() {
        "mcq" => label.bright_blue().bold(),
        "short" => label.bright_cyan().bold(),
        "long" => label.bright_magenta().bold(),
        "n/a" => label.bright_black(),
        _ => label.bright_yellow().bold(),
    }
}

fn paint(status: &StatusLine) -> ColoredString {
    match status.tone {
        Tone::Neutral => status.text.normal(),
        Tone::Success => status.text.bright_green().bold(),
        Tone::Warning => status.text.truecolor(255, 165, 0).bold(),
        Tone::Error => status.text.bright_red().bold(),
    }
}

impl QuestionView for TerminalView {
    fn render_items(&mut self, items: &[ViewItem]) {
        if items.is_empty() {
            return;
        }
        println!();
        for item in items {
            let checkbox = if item.checked {
                "[x]".bright_green().bold()
            } else {
                "[ ]".normal()
            };
            println!(
                "  {} {:>3}. {} {}",
                checkbox,
                item.index + 1,
                truncate_text(&item.text, MAX_TEXT_WIDTH),
                badge(item)
            );
        }
    }

    fn render_counts(&mut self, counts: &SelectionCounts) {
        if !self.selection_area_visible {
            return;
        }
        let breakdown: Vec<String> = counts
            .per_type
            .iter()
            .map(|(kind, count)| format!("{}: {}", kind.to_uppercase(), count))
            .collect();

        if breakdown.is_empty() {
            println!("  {}", counter_text(counts).bright_white().bold());
        } else {
            println!(
                "  {} ({})",
                counter_text(counts).bright_white().bold(),
                breakdown.join(", ")
            );
        }
    }

    fn set_status(&mut self, status: &StatusLine) {
        if !status.is_empty() {
            println!("{}", paint(status));
        }
    }

    fn set_selection_area_visible(&mut self, visible: bool) {
        self.selection_area_visible = visible;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loader_visible(&mut self, visible: bool) {
        if visible {
            println!("{}", "⏳ ...".bright_black());
        }
    }
}
