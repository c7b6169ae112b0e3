//! 试卷渲染服务
//!
//! 组卷引擎只产出 `GeneratedPaper`，具体文档格式由这里的渲染器负责

use crate::models::paper::GeneratedPaper;
use crate::models::section::SectionKey;
use anyhow::Result;

/// 试卷渲染器
pub trait PaperRenderer: Send + Sync {
    /// 渲染为可下载的字节内容
    fn render(&self, paper: &GeneratedPaper) -> Result<Vec<u8>>;

    /// 建议的文件扩展名
    fn extension(&self) -> &'static str;
}

/// 纯文本试卷
///
/// 版式：考号栏、科目标题、按分区的标题与连续题号，每题下方附 `(K2 | 5 Marks)`
pub struct PlainTextRenderer {
    subject_name: String,
}

impl PlainTextRenderer {
    pub fn new(subject_name: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
        }
    }
}

impl PaperRenderer for PlainTextRenderer {
    fn render(&self, paper: &GeneratedPaper) -> Result<Vec<u8>> {
        let mut out = String::new();
        out.push_str(&format!("{:>60}\n\n", "REG. NO : _______________________"));
        out.push_str(&format!("{}\n", self.subject_name));
        out.push_str(&format!(
            "{} | Max Marks: {}\n",
            paper.pattern_name, paper.total_marks
        ));

        for (section, questions) in paper.sections() {
            let marks = questions.first().map(|q| q.marks).unwrap_or_default();
            let heading = SectionKey::parse(section)
                .map(|key| key.to_string())
                .unwrap_or_else(|| section.to_uppercase());
            out.push_str(&format!("\nSECTION {}\n", heading));
            out.push_str(&format!(
                "Answer {} questions × {} marks\n\n",
                questions.len(),
                marks
            ));

            for question in questions {
                out.push_str(&format!(
                    "{}. {}\n",
                    question.sequence_number, question.question_text
                ));
                let meta = match question.k_level {
                    Some(k) => format!("K{} | {} Marks", k, question.marks),
                    None => format!("{} Marks", question.marks),
                };
                out.push_str(&format!("   ({})\n", meta));
            }
        }

        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// JSON 格式输出，供其它文档生成工具使用
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl PaperRenderer for JsonRenderer {
    fn render(&self, paper: &GeneratedPaper) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(paper)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
