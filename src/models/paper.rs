use crate::models::question::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一条抽题请求：(单元, 分区, 分值, 数量)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingRequest {
    /// 对应模板中的分区下标，用于按模板顺序归组
    pub section_index: usize,
    /// None 表示不限单元
    pub unit: Option<u32>,
    /// None 表示不限分区
    pub section: Option<String>,
    pub marks: u32,
    pub count: usize,
}

impl fmt::Display for SamplingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self
            .unit
            .map(|u| format!("单元 {}", u))
            .unwrap_or_else(|| "任意单元".to_string());
        let section = self.section.as_deref().unwrap_or("任意分区");
        write!(f, "[{} | 分区 {} | {} 分 × {}]", unit, section, self.marks, self.count)
    }
}

/// 试卷中的一道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    /// 从 1 开始的连续题号
    pub sequence_number: usize,
    pub question_text: String,
    /// 模板中的分区名称
    pub section: String,
    pub marks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<u32>,
    pub source_id: QuestionId,
}

/// 组卷结果：按模板分区顺序排列并编号的题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPaper {
    pub pattern_name: String,
    pub total_marks: u32,
    pub questions: Vec<SelectedQuestion>,
}

impl GeneratedPaper {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 实际入选题目的分值合计
    pub fn selected_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// 按分区分组（保持出现顺序）
    pub fn sections(&self) -> Vec<(&str, Vec<&SelectedQuestion>)> {
        let mut groups: Vec<(&str, Vec<&SelectedQuestion>)> = Vec::new();
        for question in &self.questions {
            if let Some((name, items)) = groups.last_mut() {
                if *name == question.section.as_str() {
                    items.push(question);
                    continue;
                }
            }
            groups.push((question.section.as_str(), vec![question]));
        }
        groups
    }
}

/// 某条抽题请求的缺口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub section: String,
    pub unit: Option<u32>,
    pub requested: usize,
    pub got: usize,
}

impl Shortfall {
    pub fn missing(&self) -> usize {
        self.requested.saturating_sub(self.got)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(
                f,
                "分区 {} 单元 {}: 需要 {} 题，实际 {} 题",
                self.section, unit, self.requested, self.got
            ),
            None => write!(
                f,
                "分区 {}: 需要 {} 题，实际 {} 题",
                self.section, self.requested, self.got
            ),
        }
    }
}

/// 分区汇总：模板要求数量与实际入选数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section: String,
    pub required: usize,
    pub selected: usize,
}

/// 一次组卷的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub paper: GeneratedPaper,
    pub shortfalls: Vec<Shortfall>,
    pub warnings: Vec<String>,
    pub sections: Vec<SectionSummary>,
}

impl AssemblyReport {
    /// 是否完整满足所有抽题请求
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(seq: usize, section: &str, marks: u32) -> SelectedQuestion {
        SelectedQuestion {
            sequence_number: seq,
            question_text: format!("Q{}", seq),
            section: section.to_string(),
            marks,
            k_level: None,
            unit: Some(1),
            source_id: QuestionId(seq),
        }
    }

    #[test]
    fn test_sections_group_consecutive_questions() {
        let paper = GeneratedPaper {
            pattern_name: "P".to_string(),
            total_marks: 14,
            questions: vec![question(1, "A", 2), question(2, "A", 2), question(3, "B", 10)],
        };

        let groups = paper.sections();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "A");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "B");
        assert_eq!(paper.selected_marks(), 14);
    }

    #[test]
    fn test_shortfall_display() {
        let shortfall = Shortfall {
            section: "B".to_string(),
            unit: None,
            requested: 5,
            got: 2,
        };
        assert_eq!(shortfall.missing(), 3);
        assert_eq!(shortfall.to_string(), "分区 B: 需要 5 题，实际 2 题");
    }
}
