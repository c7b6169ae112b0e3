//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `paper_assembler` - 组卷器
//! - 调用模板解析服务得到抽题请求
//! - 逐条调用抽题服务，维护整张试卷的已选题集合
//! - 按模板分区归组、编号，汇总缺口与提示
//!
//! ### `app` - 命令行应用
//! - 加载题库、模板、权重表
//! - 调用组卷器，记录报告，渲染并写出试卷
//!
//! ## 层次关系
//!
//! ```text
//! app (文件读写、渲染)
//!     ↓
//! paper_assembler (处理整张试卷)
//!     ↓
//! services (能力层：resolve / sample / render)
//!     ↓
//! models (题库、模板、权重表、试卷)
//! ```

pub mod app;
pub mod paper_assembler;

// 重新导出主要类型
pub use app::App;
pub use paper_assembler::PaperAssembler;
