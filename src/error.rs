use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 试卷模板配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigurationError),
    /// 组卷失败
    #[error("组卷错误: {0}")]
    Assembly(#[from] AssemblyError),
    /// 题库数据错误
    #[error("题库错误: {0}")]
    Bank(#[from] BankError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 试卷模板配置错误
///
/// 属于配置问题而不是数据问题，直接中断本次组卷，不重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// 模板库中找不到指定名称的模板
    #[error("找不到试卷模板: {name}")]
    PatternNotFound { name: String },
    /// 模板没有任何分区
    #[error("试卷模板 {pattern} 没有任何分区")]
    NoSections { pattern: String },
    /// 分区参数非法
    #[error("试卷模板 {pattern} 的分区 {section} 参数非法: {reason}")]
    InvalidSection {
        pattern: String,
        section: String,
        reason: String,
    },
    /// 模板名称重复
    #[error("试卷模板名称重复: {name}")]
    DuplicatePattern { name: String },
}

/// 组卷错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// 所有抽题请求都没有抽到题目
    #[error("试卷 {pattern} 未抽到任何题目 (共 {requests} 个抽题请求)")]
    NothingSelected { pattern: String, requests: usize },
}

/// 题库加载错误
#[derive(Debug, Error)]
pub enum BankError {
    /// 缺少必需列
    #[error("题库缺少必需列 {missing:?}，实际列: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
    /// 不支持的文件格式
    #[error("不支持的题库文件格式: {path}")]
    UnsupportedFormat { path: String },
    /// CSV 解析失败
    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),
    /// JSON 解析失败
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON 题库不是对象数组
    #[error("JSON 题库必须是对象数组")]
    NotARowArray,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为配置类错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_wraps_into_app_error() {
        let err: AppError = ConfigurationError::NoSections {
            pattern: "Pattern_1".to_string(),
        }
        .into();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("Pattern_1"));
    }

    #[test]
    fn test_missing_columns_message_lists_found_columns() {
        let err = BankError::MissingColumns {
            missing: vec!["unit".to_string()],
            found: vec!["question".to_string(), "marks".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.contains("unit"));
        assert!(msg.contains("marks"));

        let wrapped: AppError = BankError::NotARowArray.into();
        assert!(!wrapped.is_configuration());
    }
}
