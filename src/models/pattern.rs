use crate::error::ConfigurationError;
use crate::models::section::SectionKey;
use serde::{Deserialize, Serialize};

/// 试卷分区定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSection {
    pub name: String,
    /// 本分区需要的题目数量
    pub required_count: usize,
    pub marks_per_question: u32,
    /// 允许从题库抽取的上限，0 表示不限制
    #[serde(default)]
    pub max_drawable: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PatternSection {
    pub fn new(name: impl Into<String>, required_count: usize, marks_per_question: u32) -> Self {
        Self {
            name: name.into(),
            required_count,
            marks_per_question,
            max_drawable: 0,
            note: None,
        }
    }

    pub fn with_max_drawable(mut self, max_drawable: usize) -> Self {
        self.max_drawable = max_drawable;
        self
    }

    pub fn key(&self) -> Option<SectionKey> {
        SectionKey::parse(&self.name)
    }
}

/// 试卷模板：有序的分区列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPattern {
    pub name: String,
    #[serde(default = "default_total_marks")]
    pub total_marks: u32,
    #[serde(default)]
    pub sections: Vec<PatternSection>,
}

fn default_total_marks() -> u32 {
    100
}

impl ExamPattern {
    pub fn new(name: impl Into<String>, total_marks: u32, sections: Vec<PatternSection>) -> Self {
        Self {
            name: name.into(),
            total_marks,
            sections,
        }
    }

    /// 校验模板结构，结构错误直接返回配置错误
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.sections.is_empty() {
            return Err(ConfigurationError::NoSections {
                pattern: self.name.clone(),
            });
        }

        for section in &self.sections {
            if section.marks_per_question == 0 {
                return Err(ConfigurationError::InvalidSection {
                    pattern: self.name.clone(),
                    section: section.name.clone(),
                    reason: "marks_per_question 必须大于 0".to_string(),
                });
            }
            if section.key().is_none() {
                return Err(ConfigurationError::InvalidSection {
                    pattern: self.name.clone(),
                    section: section.name.clone(),
                    reason: "分区名称不能为空".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 各分区满分之和
    ///
    /// 按 u64 饱和累加，超大配置值不会溢出
    pub fn planned_marks(&self) -> u64 {
        self.sections.iter().fold(0u64, |acc, s| {
            let required = u64::try_from(s.required_count).unwrap_or(u64::MAX);
            acc.saturating_add(required.saturating_mul(u64::from(s.marks_per_question)))
        })
    }

    /// 一致性提示（不影响组卷）
    pub fn consistency_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let planned = self.planned_marks();
        if planned != u64::from(self.total_marks) {
            warnings.push(format!(
                "模板 {} 各分区合计 {} 分，与总分 {} 不一致",
                self.name, planned, self.total_marks
            ));
        }

        for section in &self.sections {
            if section.max_drawable > 0 && section.required_count > section.max_drawable {
                warnings.push(format!(
                    "模板 {} 分区 {} 需要 {} 题，超过可抽上限 {}",
                    self.name, section.name, section.required_count, section.max_drawable
                ));
            }
        }

        warnings
    }
}
