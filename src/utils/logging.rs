//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::config::Config;
use crate::models::paper::{AssemblyReport, Shortfall};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n组卷日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 组卷模式");
    info!("📚 题库: {}", config.bank_file);
    info!("📋 模板: {} ({})", config.pattern_name, config.pattern_file);
    match &config.weightage_file {
        Some(path) => info!("⚖️ 权重表: {}", path),
        None => info!("⚖️ 未配置权重表，按模板直接抽题"),
    }
    if let Some(seed) = config.seed {
        info!("🎲 随机种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 输出组卷结果摘要
pub fn log_assembly_summary(report: &AssemblyReport, verbose: bool) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📊 试卷 {}: 共 {} 题 / {} 分 (模板总分 {})",
        report.paper.pattern_name,
        report.paper.len(),
        report.paper.selected_marks(),
        report.paper.total_marks
    );
    for summary in &report.sections {
        info!(
            "   分区 {}: {}/{}",
            summary.section, summary.selected, summary.required
        );
    }
    for shortfall in &report.shortfalls {
        warn!("⚠️ 缺口: {}", shortfall);
    }
    let missing: usize = report.shortfalls.iter().map(Shortfall::missing).sum();
    if missing > 0 {
        warn!("⚠️ 合计缺 {} 题", missing);
    }
    for warning in &report.warnings {
        warn!("⚠️ {}", warning);
    }
    if verbose {
        for question in &report.paper.questions {
            info!(
                "   {}. [{}] {}",
                question.sequence_number,
                question.section,
                truncate_text(&question.question_text, 60)
            );
        }
    }
    info!("{}", "─".repeat(60));
}

/// 将缺口和提示追加到日志文件
pub fn append_report(log_file_path: &str, report: &AssemblyReport) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    writeln!(
        file,
        "试卷 {} | 题目 {} | 分值 {}",
        report.paper.pattern_name,
        report.paper.len(),
        report.paper.selected_marks()
    )?;
    for shortfall in &report.shortfalls {
        writeln!(file, "缺口 | {}", shortfall)?;
    }
    for warning in &report.warnings {
        writeln!(file, "提示 | {}", warning)?;
    }

    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
