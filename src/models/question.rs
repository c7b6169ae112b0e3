use crate::models::section::SectionKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 题目在题库中的行标识（加载顺序下标），一次组卷内保持不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub usize);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 题库中的一道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub text: String,
    /// 所属单元；缺失时不参与按单元抽题
    pub unit: Option<u32>,
    pub marks: Option<u32>,
    /// 原始分区值，如 "A" / "a" / "Sec A"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// 认知层级（K1..K6）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_level: Option<u8>,
}

impl QuestionRecord {
    pub fn section_key(&self) -> Option<SectionKey> {
        self.section.as_deref().and_then(SectionKey::parse)
    }
}

/// 一次加载得到的题库快照
///
/// 可选列（marks / section / k_level）缺失时只降低筛选精度，不报错。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
    has_marks_column: bool,
    has_section_column: bool,
    has_k_level_column: bool,
}

impl QuestionBank {
    /// 创建空题库，并声明哪些可选列存在
    pub fn new(has_marks_column: bool, has_section_column: bool, has_k_level_column: bool) -> Self {
        Self {
            records: Vec::new(),
            has_marks_column,
            has_section_column,
            has_k_level_column,
        }
    }

    /// 追加一道题，返回分配的标识
    pub fn push(
        &mut self,
        text: impl Into<String>,
        unit: Option<u32>,
        marks: Option<u32>,
        section: Option<String>,
        k_level: Option<u8>,
    ) -> QuestionId {
        let id = QuestionId(self.records.len());
        self.records.push(QuestionRecord {
            id,
            text: text.into(),
            unit,
            marks,
            section,
            k_level,
        });
        id
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn get(&self, id: QuestionId) -> Option<&QuestionRecord> {
        self.records.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_marks_column(&self) -> bool {
        self.has_marks_column
    }

    /// 一旦存在分区列，分区筛选即为权威：缺失分区值的题目不再匹配任何分区
    pub fn has_section_column(&self) -> bool {
        self.has_section_column
    }

    pub fn has_k_level_column(&self) -> bool {
        self.has_k_level_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut bank = QuestionBank::new(true, true, false);
        let first = bank.push("Define recursion.", Some(1), Some(2), Some("A".into()), None);
        let second = bank.push("Explain paging.", Some(2), Some(5), Some("B".into()), None);

        assert_eq!(first, QuestionId(0));
        assert_eq!(second, QuestionId(1));
        assert_eq!(bank.get(second).map(|q| q.text.as_str()), Some("Explain paging."));
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_section_key_of_record() {
        let mut bank = QuestionBank::new(true, true, false);
        let id = bank.push("Q", Some(1), Some(2), Some("a ".into()), None);
        let key = bank.get(id).and_then(QuestionRecord::section_key);
        assert_eq!(key, SectionKey::parse("Sec A"));
    }
}
