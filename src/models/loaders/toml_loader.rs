use crate::error::ConfigurationError;
use crate::models::pattern::ExamPattern;
use crate::models::weightage::{UnitWeightage, WeightagePlan};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 权重存储默认初始化的单元范围
pub const DEFAULT_UNITS: std::ops::RangeInclusive<u32> = 1..=5;

/// 试卷模板库
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternStore {
    #[serde(default)]
    patterns: Vec<ExamPattern>,
}

impl PatternStore {
    /// 从 TOML 文本解析模板库，并校验每个模板
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let store: PatternStore = toml::from_str(content).context("无法解析试卷模板 TOML")?;
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for (index, pattern) in self.patterns.iter().enumerate() {
            if self.patterns[..index].iter().any(|p| p.name == pattern.name) {
                return Err(ConfigurationError::DuplicatePattern {
                    name: pattern.name.clone(),
                });
            }
            pattern.validate()?;
        }
        Ok(())
    }

    /// 按名称查找模板
    pub fn get(&self, name: &str) -> Result<&ExamPattern, ConfigurationError> {
        self.patterns
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigurationError::PatternNotFound {
                name: name.to_string(),
            })
    }

    /// 模板名称（按名称排序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct WeightageFile {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    units: Vec<WeightageRow>,
}

#[derive(Debug, Deserialize)]
struct WeightageRow {
    unit: u32,
    #[serde(default)]
    sec_a_count: usize,
    #[serde(default)]
    sec_b_count: usize,
    #[serde(default)]
    sec_c_count: usize,
}

/// 从 TOML 文本解析权重表，缺失的 1..=5 单元补零
pub fn parse_weightage_plan(content: &str) -> Result<WeightagePlan> {
    let file: WeightageFile = toml::from_str(content).context("无法解析权重表 TOML")?;

    let mut plan = WeightagePlan::new();
    for row in file.units {
        if row.unit == 0 {
            anyhow::bail!("权重表单元号必须从 1 开始");
        }
        plan.set_unit(
            row.unit,
            UnitWeightage::new(row.sec_a_count, row.sec_b_count, row.sec_c_count),
        );
    }
    plan.initialize_units(DEFAULT_UNITS);

    if let Some(subject) = file.subject {
        tracing::debug!("已加载科目 {} 的权重表", subject);
    }

    Ok(plan)
}

/// 从文件加载试卷模板库
pub async fn load_pattern_store(path: &Path) -> Result<PatternStore> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", path.display()))?;

    let store = PatternStore::from_toml_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", path.display()))?;

    if store.is_empty() {
        tracing::warn!("模板文件 {} 中没有任何试卷模板", path.display());
    } else {
        tracing::info!("成功加载 {} 个试卷模板: {}", store.len(), store.names().join(", "));
    }
    Ok(store)
}

/// 从文件加载权重表
pub async fn load_weightage_plan(path: &Path) -> Result<WeightagePlan> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", path.display()))?;

    parse_weightage_plan(&content).with_context(|| format!("无法解析TOML文件: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: &str = r#"
        [[patterns]]
        name = "Pattern_1"
        total_marks = 100

        [[patterns.sections]]
        name = "SecA"
        required_count = 10
        marks_per_question = 2
        max_drawable = 10

        [[patterns.sections]]
        name = "SecB"
        required_count = 5
        marks_per_question = 6
        note = "Answer all"

        [[patterns]]
        name = "Internal"
        total_marks = 50

        [[patterns.sections]]
        name = "Sec A"
        required_count = 5
        marks_per_question = 10
    "#;

    #[test]
    fn test_pattern_store_lookup() {
        let store = PatternStore::from_toml_str(PATTERNS).unwrap();
        assert_eq!(store.names(), vec!["Internal", "Pattern_1"]);

        let pattern = store.get("Pattern_1").unwrap();
        assert_eq!(pattern.sections.len(), 2);
        assert_eq!(pattern.sections[0].max_drawable, 10);
        assert_eq!(pattern.sections[1].max_drawable, 0);
        assert_eq!(pattern.sections[1].note.as_deref(), Some("Answer all"));

        assert_eq!(
            store.get("Missing").unwrap_err(),
            ConfigurationError::PatternNotFound {
                name: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_pattern_names_rejected() {
        let content = r#"
            [[patterns]]
            name = "P"
            [[patterns.sections]]
            name = "A"
            required_count = 1
            marks_per_question = 2

            [[patterns]]
            name = "P"
            [[patterns.sections]]
            name = "A"
            required_count = 1
            marks_per_question = 2
        "#;
        assert!(PatternStore::from_toml_str(content).is_err());
    }

    #[test]
    fn test_weightage_plan_is_initialized_to_five_units() {
        let content = r#"
            subject = "Operating Systems"

            [[units]]
            unit = 2
            sec_a_count = 3
            sec_c_count = 1
        "#;

        let plan = parse_weightage_plan(content).unwrap();
        assert_eq!(plan.units().count(), 5);
        assert_eq!(plan.get(2), Some(&UnitWeightage::new(3, 0, 1)));
        assert_eq!(plan.get(1), Some(&UnitWeightage::default()));
    }

    #[test]
    fn test_load_pattern_store_from_file() {
        let path = std::env::temp_dir().join(format!(
            "qp_patterns_{}_{}.toml",
            std::process::id(),
            "load_pattern_store"
        ));
        std::fs::write(&path, PATTERNS).unwrap();

        let store = tokio_test::block_on(load_pattern_store(&path)).unwrap();
        assert_eq!(store.len(), 2);

        let _ = std::fs::remove_file(&path);
    }
}
