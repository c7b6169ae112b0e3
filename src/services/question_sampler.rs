//! 抽题服务 - 业务能力层
//!
//! 只负责执行一条抽题请求，不关心整张试卷

use crate::models::paper::SamplingRequest;
use crate::models::question::{QuestionBank, QuestionId, QuestionRecord};
use crate::models::section::SectionKey;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// 单条请求的抽题结果
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome<'a> {
    pub selected: Vec<&'a QuestionRecord>,
    /// 请求数量与实际抽到数量之差
    pub shortfall: usize,
}

/// 抽题服务
///
/// 筛选顺序：单元 → 分区 → 分值，然后在未被排除的候选中无放回随机抽取。
/// 候选不足时不报错，由调用方决定如何处理缺口。
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionSampler;

impl QuestionSampler {
    pub fn new() -> Self {
        Self
    }

    /// 满足请求条件且未被排除的候选题
    pub fn candidates<'a>(
        &self,
        bank: &'a QuestionBank,
        request: &SamplingRequest,
        excluded: &HashSet<QuestionId>,
    ) -> Vec<&'a QuestionRecord> {
        // 题库没有分区列时忽略分区条件
        let section_key = request
            .section
            .as_deref()
            .and_then(SectionKey::parse)
            .filter(|_| bank.has_section_column());
        let check_marks = bank.has_marks_column();

        bank.records()
            .iter()
            .filter(|q| request.unit.map_or(true, |unit| q.unit == Some(unit)))
            .filter(|q| {
                section_key
                    .as_ref()
                    .map_or(true, |key| q.section_key().as_ref() == Some(key))
            })
            .filter(|q| !check_marks || q.marks == Some(request.marks))
            .filter(|q| !excluded.contains(&q.id))
            .collect()
    }

    /// 执行一条抽题请求
    ///
    /// # 参数
    /// - `excluded`: 本次组卷中已入选的题目，整张试卷范围内不可重复
    /// - `rng`: 随机源，测试时传入固定种子
    pub fn sample<'a, R: Rng + ?Sized>(
        &self,
        bank: &'a QuestionBank,
        request: &SamplingRequest,
        excluded: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> SampleOutcome<'a> {
        let candidates = self.candidates(bank, request, excluded);
        let amount = request.count.min(candidates.len());

        let selected: Vec<&QuestionRecord> =
            candidates.choose_multiple(rng, amount).copied().collect();

        debug!(
            "抽题 {}: 候选 {} 题，抽中 {} 题",
            request,
            candidates.len(),
            selected.len()
        );

        SampleOutcome {
            shortfall: request.count - selected.len(),
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(unit: Option<u32>, section: Option<&str>, marks: u32, count: usize) -> SamplingRequest {
        SamplingRequest {
            section_index: 0,
            unit,
            section: section.map(str::to_string),
            marks,
            count,
        }
    }

    fn bank() -> QuestionBank {
        let mut bank = QuestionBank::new(true, true, true);
        for i in 0..4 {
            bank.push(format!("U1 A {}", i), Some(1), Some(2), Some("A".into()), Some(1));
        }
        for i in 0..3 {
            bank.push(format!("U2 a {}", i), Some(2), Some(2), Some("a ".into()), Some(2));
        }
        bank.push("U1 B", Some(1), Some(5), Some("B".into()), None);
        bank.push("no section", Some(1), Some(2), None, None);
        bank.push("no unit", None, Some(2), Some("A".into()), None);
        bank
    }

    #[test]
    fn test_filters_by_unit_section_and_marks() {
        let bank = bank();
        let sampler = QuestionSampler::new();
        let excluded = HashSet::new();

        let unit_one = sampler.candidates(&bank, &request(Some(1), Some("Sec A"), 2, 10), &excluded);
        assert_eq!(unit_one.len(), 4);
        assert!(unit_one.iter().all(|q| q.unit == Some(1) && q.marks == Some(2)));

        // 不限单元：缺失单元的题目也可参与
        let any_unit = sampler.candidates(&bank, &request(None, Some("A"), 2, 10), &excluded);
        assert_eq!(any_unit.len(), 8);

        // 分值必须精确匹配
        let five = sampler.candidates(&bank, &request(Some(1), Some("A"), 5, 10), &excluded);
        assert!(five.is_empty());
    }

    #[test]
    fn test_section_is_ignored_when_bank_has_no_section_column() {
        let mut bank = QuestionBank::new(true, false, false);
        bank.push("q1", Some(1), Some(2), None, None);
        bank.push("q2", Some(1), Some(2), None, None);

        let found = QuestionSampler::new().candidates(
            &bank,
            &request(Some(1), Some("Sec B"), 2, 5),
            &HashSet::new(),
        );
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_marks_are_ignored_when_bank_has_no_marks_column() {
        let mut bank = QuestionBank::new(false, false, false);
        bank.push("q1", Some(1), None, None, None);

        let found =
            QuestionSampler::new().candidates(&bank, &request(Some(1), None, 10, 1), &HashSet::new());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_sample_respects_exclusions_and_reports_shortfall() {
        let bank = bank();
        let sampler = QuestionSampler::new();
        let mut rng = StdRng::seed_from_u64(7);
        let excluded: HashSet<QuestionId> = [QuestionId(0), QuestionId(1)].into_iter().collect();

        let outcome = sampler.sample(&bank, &request(Some(1), Some("A"), 2, 5), &excluded, &mut rng);

        assert_eq!(outcome.selected.len(), 2);
        assert_eq!(outcome.shortfall, 3);
        assert!(outcome.selected.iter().all(|q| !excluded.contains(&q.id)));
    }

    #[test]
    fn test_sample_without_replacement() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome =
            QuestionSampler::new().sample(&bank, &request(None, Some("A"), 2, 8), &HashSet::new(), &mut rng);

        let ids: HashSet<QuestionId> = outcome.selected.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(outcome.shortfall, 0);
    }

    #[test]
    fn test_same_seed_same_selection() {
        let bank = bank();
        let sampler = QuestionSampler::new();
        let req = request(None, Some("A"), 2, 3);

        let first: Vec<QuestionId> = sampler
            .sample(&bank, &req, &HashSet::new(), &mut StdRng::seed_from_u64(99))
            .selected
            .iter()
            .map(|q| q.id)
            .collect();
        let second: Vec<QuestionId> = sampler
            .sample(&bank, &req, &HashSet::new(), &mut StdRng::seed_from_u64(99))
            .selected
            .iter()
            .map(|q| q.id)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_bank_returns_full_shortfall() {
        let bank = QuestionBank::new(true, true, false);
        let outcome = QuestionSampler::new().sample(
            &bank,
            &request(Some(1), Some("A"), 2, 4),
            &HashSet::new(),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(outcome.selected.is_empty());
        assert_eq!(outcome.shortfall, 4);
    }
}
