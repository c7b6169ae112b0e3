use crate::models::section::SectionBucket;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个单元在三个标准分区中的目标题数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitWeightage {
    #[serde(default)]
    pub sec_a_count: usize,
    #[serde(default)]
    pub sec_b_count: usize,
    #[serde(default)]
    pub sec_c_count: usize,
}

impl UnitWeightage {
    pub fn new(sec_a_count: usize, sec_b_count: usize, sec_c_count: usize) -> Self {
        Self {
            sec_a_count,
            sec_b_count,
            sec_c_count,
        }
    }

    pub fn count(&self, bucket: SectionBucket) -> usize {
        match bucket {
            SectionBucket::A => self.sec_a_count,
            SectionBucket::B => self.sec_b_count,
            SectionBucket::C => self.sec_c_count,
        }
    }
}

/// 科目的单元权重表：单元号 → 各分区题数
///
/// 按单元号升序迭代，抽题顺序因此稳定。各单元之和不必等于模板要求，组卷时只做提示。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightagePlan {
    units: BTreeMap<u32, UnitWeightage>,
}

impl WeightagePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: u32, weightage: UnitWeightage) -> Self {
        self.set_unit(unit, weightage);
        self
    }

    pub fn set_unit(&mut self, unit: u32, weightage: UnitWeightage) {
        self.units.insert(unit, weightage);
    }

    /// 为缺失的单元补零行（权重存储层使用）
    pub fn initialize_units(&mut self, units: impl IntoIterator<Item = u32>) {
        for unit in units {
            self.units.entry(unit).or_default();
        }
    }

    pub fn units(&self) -> impl Iterator<Item = (u32, &UnitWeightage)> {
        self.units.iter().map(|(unit, w)| (*unit, w))
    }

    pub fn get(&self, unit: u32) -> Option<&UnitWeightage> {
        self.units.get(&unit)
    }

    /// 某分区在所有单元上的题数合计
    pub fn total_for(&self, bucket: SectionBucket) -> usize {
        self.units.values().map(|w| w.count(bucket)).sum()
    }
}
