//! # 美化输出工具
//!
//! 提供统一的终端输出样式。诊断信息走 `log`，这里只负责面向用户的结果。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `ftir/bands.rs` 的 Verdict
//! - 使用 `colored` crate

use crate::ftir::Verdict;

use colored::{ColoredString, Colorize};

/// 标题栏与分隔线宽度
const RULE_WIDTH: usize = 72;

fn tagged(tag: ColoredString, msg: &str) {
    println!("{} {}", tag, msg);
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    tagged("[OK]".green().bold(), msg);
}

/// 打印错误消息（stderr）
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    tagged("[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    tagged("[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    tagged("[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    tagged("[DONE]".green().bold(), msg);
}

/// 打印结论，颜色随结论类别变化
pub fn print_verdict(verdict: Verdict) {
    let text = verdict.to_string();
    let styled = match verdict {
        Verdict::GoWithAromatic | Verdict::GoOnly => text.green().bold(),
        Verdict::Sp2Only => text.cyan().bold(),
        Verdict::Indeterminate => text.yellow().bold(),
    };
    println!("{} {}", "Verdict:".bold(), styled);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
