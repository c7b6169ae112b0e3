/// 输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// 解析输出格式，无法识别时返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库文件（.csv / .json）
    pub bank_file: String,
    /// 试卷模板库（TOML）
    pub pattern_file: String,
    /// 使用的模板名称
    pub pattern_name: String,
    /// 单元权重表（TOML），为空时按模板直接抽题
    pub weightage_file: Option<String>,
    /// 科目名称（试卷标题）
    pub subject_name: String,
    /// 试卷输出文件
    pub output_file: String,
    pub output_format: OutputFormat,
    /// 随机种子，设置后可复现同一张试卷
    pub seed: Option<u64>,
    /// 存在题目缺口时是否仍然输出试卷
    pub allow_partial: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_file: "question_bank.csv".to_string(),
            pattern_file: "patterns.toml".to_string(),
            pattern_name: "Pattern_1".to_string(),
            weightage_file: None,
            subject_name: "Question Paper".to_string(),
            output_file: "question_paper.txt".to_string(),
            output_format: OutputFormat::Text,
            seed: None,
            allow_partial: true,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bank_file: std::env::var("QP_BANK_FILE").unwrap_or(default.bank_file),
            pattern_file: std::env::var("QP_PATTERN_FILE").unwrap_or(default.pattern_file),
            pattern_name: std::env::var("QP_PATTERN_NAME").unwrap_or(default.pattern_name),
            weightage_file: std::env::var("QP_WEIGHTAGE_FILE").ok().filter(|v| !v.trim().is_empty()).or(default.weightage_file),
            subject_name: std::env::var("QP_SUBJECT_NAME").unwrap_or(default.subject_name),
            output_file: std::env::var("QP_OUTPUT_FILE").unwrap_or(default.output_file),
            output_format: std::env::var("QP_OUTPUT_FORMAT").ok().and_then(|v| OutputFormat::parse(&v)).unwrap_or(default.output_format),
            seed: std::env::var("QP_SEED").ok().and_then(|v| v.parse().ok()).or(default.seed),
            allow_partial: std::env::var("QP_ALLOW_PARTIAL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.allow_partial),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
