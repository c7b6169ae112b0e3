//! # Question Paper Assembly
//!
//! 按试卷模板和单元权重表，从题库中随机抽题组成试卷
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题库、试卷模板、权重表、试卷等数据结构
//! - `models/loaders` - 题库（CSV / JSON）与模板、权重表（TOML）的加载
//!
//! ### ② 业务能力层（Services）
//! - `PatternResolver` - 模板 + 权重表 → 有序抽题请求
//! - `QuestionSampler` - 执行单条抽题请求（无放回随机抽取）
//! - `PaperRenderer` - 把试卷渲染为文本 / JSON
//!
//! ### ③ 编排层（Orchestration）
//! - `PaperAssembler` - 整张试卷的抽题、去重、归组、编号、缺口统计
//! - `App` - 命令行入口，负责文件读写
//!
//! 组卷器无 I/O、无全局状态；随机源可注入，固定种子即可复现同一张试卷。

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{AppError, AppResult, AssemblyError, BankError, ConfigurationError};
pub use models::{
    AssemblyReport, ExamPattern, GeneratedPaper, PatternSection, QuestionBank, QuestionId,
    QuestionRecord, SamplingRequest, SelectedQuestion, Shortfall, UnitWeightage, WeightagePlan,
};
pub use orchestrator::{App, PaperAssembler};
pub use services::{PaperRenderer, PatternResolver, QuestionSampler};
