//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息
//! 2. **加载输入**：题库、试卷模板、单元权重表
//! 3. **组卷**：委托 `PaperAssembler`
//! 4. **输出**：记录缺口与提示，渲染并写出试卷文件
//!
//! 组卷器本身不做任何 I/O，文件读写都在这一层完成。

use crate::config::{Config, OutputFormat};
use crate::error::AppError;
use crate::models::paper::AssemblyReport;
use crate::models::{load_pattern_store, load_question_bank, load_weightage_plan};
use crate::orchestrator::PaperAssembler;
use crate::services::{JsonRenderer, PaperRenderer, PlainTextRenderer};
use crate::utils::logging::{append_report, init_log_file, log_assembly_summary, log_startup};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<AssemblyReport> {
        info!("\n📁 正在加载题库与模板...");
        let bank = load_question_bank(Path::new(&self.config.bank_file)).await?;
        let store = load_pattern_store(Path::new(&self.config.pattern_file)).await?;
        let pattern = store.get(&self.config.pattern_name)?;

        let plan = match &self.config.weightage_file {
            Some(path) => Some(load_weightage_plan(Path::new(path)).await?),
            None => None,
        };

        let assembler = match self.config.seed {
            Some(seed) => PaperAssembler::with_seed(seed),
            None => PaperAssembler::new(),
        };
        let report = assembler.assemble(&bank, pattern, plan.as_ref())?;

        log_assembly_summary(&report, self.config.verbose_logging);
        append_report(&self.config.output_log_file, &report)?;

        if !report.is_complete() {
            if !self.config.allow_partial {
                anyhow::bail!(
                    "试卷存在 {} 处题目缺口，未输出试卷文件",
                    report.shortfalls.len()
                );
            }
            warn!("⚠️ 试卷不完整，仍按现有题目输出");
        }

        let renderer = self.renderer();
        let bytes = renderer.render(&report.paper)?;
        let output = self.output_path(renderer.extension());
        fs::write(&output, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(output.display().to_string(), e))?;

        info!("✅ 试卷已保存至: {}", output.display());
        Ok(report)
    }

    fn renderer(&self) -> Box<dyn PaperRenderer> {
        match self.config.output_format {
            OutputFormat::Text => Box::new(PlainTextRenderer::new(&self.config.subject_name)),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }

    /// 输出路径，未带扩展名时补上渲染器的扩展名
    fn output_path(&self, extension: &str) -> PathBuf {
        let path = PathBuf::from(&self.config.output_file);
        if path.extension().is_none() {
            path.with_extension(extension)
        } else {
            path
        }
    }
}
