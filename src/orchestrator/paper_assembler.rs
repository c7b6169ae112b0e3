//! 组卷器 - 编排层
//!
//! ## 职责
//!
//! 1. **解析模板**：调用 `PatternResolver` 得到有序抽题请求
//! 2. **逐条抽题**：调用 `QuestionSampler`，并维护整张试卷的已选题集合
//! 3. **归组编号**：按模板分区顺序归组，题号从 1 连续编排
//! 4. **缺口统计**：记录每条未满足的请求，缺口不会中断组卷
//!
//! 组卷过程无 I/O、无共享状态，可被多个调用方并发使用。

use crate::error::{AppResult, AssemblyError};
use crate::models::paper::{
    AssemblyReport, GeneratedPaper, SectionSummary, SelectedQuestion, Shortfall,
};
use crate::models::pattern::ExamPattern;
use crate::models::question::{QuestionBank, QuestionId, QuestionRecord};
use crate::models::weightage::WeightagePlan;
use crate::services::{PatternResolver, QuestionSampler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// 组卷器
#[derive(Debug, Clone, Default)]
pub struct PaperAssembler {
    resolver: PatternResolver,
    sampler: QuestionSampler,
    seed: Option<u64>,
}

impl PaperAssembler {
    /// 每次组卷使用新的随机种子
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定种子，同样的输入得到同样的试卷
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// 组卷
    ///
    /// # 返回
    /// - 模板没有分区时返回配置错误
    /// - 一道题都没抽到时返回组卷错误
    /// - 其余情况返回（可能不完整的）试卷和缺口报告
    pub fn assemble(
        &self,
        bank: &QuestionBank,
        pattern: &ExamPattern,
        plan: Option<&WeightagePlan>,
    ) -> AppResult<AssemblyReport> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.assemble_with_rng(bank, pattern, plan, &mut rng)
    }

    /// 使用调用方提供的随机源组卷
    pub fn assemble_with_rng<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        pattern: &ExamPattern,
        plan: Option<&WeightagePlan>,
        rng: &mut R,
    ) -> AppResult<AssemblyReport> {
        let resolution = self.resolver.resolve(pattern, plan)?;

        let mut warnings = pattern.consistency_warnings();
        warnings.extend(resolution.warnings);

        let mut excluded: HashSet<QuestionId> = HashSet::new();
        let mut buckets: Vec<Vec<&QuestionRecord>> = vec![Vec::new(); pattern.sections.len()];
        let mut shortfalls: Vec<(usize, Shortfall)> = resolution.unmatched;

        for request in &resolution.requests {
            let outcome = self.sampler.sample(bank, request, &excluded, rng);
            let got = outcome.selected.len();

            for record in outcome.selected {
                excluded.insert(record.id);
                buckets[request.section_index].push(record);
            }

            if outcome.shortfall > 0 {
                let shortfall = Shortfall {
                    section: pattern.sections[request.section_index].name.clone(),
                    unit: request.unit,
                    requested: request.count,
                    got,
                };
                warn!("⚠️ 题目不足 - {}", shortfall);
                shortfalls.push((request.section_index, shortfall));
            }
        }

        // 按模板分区顺序排列，同一分区内保持请求顺序
        shortfalls.sort_by_key(|(index, _)| *index);
        let shortfalls: Vec<Shortfall> = shortfalls.into_iter().map(|(_, s)| s).collect();

        let selected_total: usize = buckets.iter().map(Vec::len).sum();
        if selected_total == 0 {
            return Err(AssemblyError::NothingSelected {
                pattern: pattern.name.clone(),
                requests: resolution.requests.len(),
            }
            .into());
        }

        let sections: Vec<SectionSummary> = pattern
            .sections
            .iter()
            .zip(&buckets)
            .map(|(section, picked)| SectionSummary {
                section: section.name.clone(),
                required: section.required_count,
                selected: picked.len(),
            })
            .collect();

        let questions: Vec<SelectedQuestion> = pattern
            .sections
            .iter()
            .zip(buckets)
            .flat_map(|(section, picked)| {
                picked.into_iter().map(move |record| (section, record))
            })
            .enumerate()
            .map(|(index, (section, record))| SelectedQuestion {
                sequence_number: index + 1,
                question_text: record.text.clone(),
                section: section.name.clone(),
                marks: section.marks_per_question,
                k_level: record.k_level,
                unit: record.unit,
                source_id: record.id,
            })
            .collect();

        let paper = GeneratedPaper {
            pattern_name: pattern.name.clone(),
            total_marks: pattern.total_marks,
            questions,
        };

        info!(
            "✓ 组卷完成: 模板 {}，共 {} 题 / {} 分，缺口 {} 处，提示 {} 条",
            pattern.name,
            paper.len(),
            paper.selected_marks(),
            shortfalls.len(),
            warnings.len()
        );
        for summary in &sections {
            debug!(
                "分区 {}: 要求 {} 题，入选 {} 题",
                summary.section, summary.required, summary.selected
            );
        }

        Ok(AssemblyReport {
            paper,
            shortfalls,
            warnings,
            sections,
        })
    }
}
