//! 模板解析服务 - 业务能力层
//!
//! 把试卷模板和单元权重表合成为有序的抽题请求列表，不接触题库

use crate::error::ConfigurationError;
use crate::models::paper::{SamplingRequest, Shortfall};
use crate::models::pattern::ExamPattern;
use crate::models::section::SectionBucket;
use crate::models::weightage::WeightagePlan;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// 模板解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// 按模板分区顺序、分区内按单元升序排列
    pub requests: Vec<SamplingRequest>,
    pub warnings: Vec<String>,
    /// 无法参与抽题的分区，附带模板下标
    pub unmatched: Vec<(usize, Shortfall)>,
}

/// 模板解析服务
///
/// 职责：
/// - 有权重表时，按 (单元, 标准分区) 生成请求
/// - 没有权重表时，每个分区生成一条不限单元的请求
/// - 只在模板没有分区时报错，其余异常记为提示
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternResolver;

impl PatternResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        pattern: &ExamPattern,
        plan: Option<&WeightagePlan>,
    ) -> Result<Resolution, ConfigurationError> {
        if pattern.sections.is_empty() {
            return Err(ConfigurationError::NoSections {
                pattern: pattern.name.clone(),
            });
        }

        match plan {
            Some(plan) => Ok(self.resolve_weighted(pattern, plan)),
            None => Ok(self.resolve_flat(pattern)),
        }
    }

    /// 无权重表：每个分区一条不限单元的请求
    fn resolve_flat(&self, pattern: &ExamPattern) -> Resolution {
        let requests = pattern
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| section.required_count > 0)
            .map(|(index, section)| SamplingRequest {
                section_index: index,
                unit: None,
                section: Some(section.name.clone()),
                marks: section.marks_per_question,
                count: section.required_count,
            })
            .collect();

        Resolution {
            requests,
            ..Default::default()
        }
    }

    fn resolve_weighted(&self, pattern: &ExamPattern, plan: &WeightagePlan) -> Resolution {
        let mut resolution = Resolution::default();
        let mut seen: BTreeSet<SectionBucket> = BTreeSet::new();

        for (index, section) in pattern.sections.iter().enumerate() {
            let bucket = section.key().and_then(|key| key.bucket());

            let Some(bucket) = bucket.filter(|b| !seen.contains(b)) else {
                let message = match bucket {
                    Some(b) => format!("分区 {} 与前面的分区同属标准分区 {}，已跳过", section.name, b),
                    None => format!("分区 {} 无法映射到标准分区 A/B/C，已跳过", section.name),
                };
                warn!("{}", message);
                resolution.warnings.push(message);
                if section.required_count > 0 {
                    resolution.unmatched.push((
                        index,
                        Shortfall {
                            section: section.name.clone(),
                            unit: None,
                            requested: section.required_count,
                            got: 0,
                        },
                    ));
                }
                continue;
            };
            seen.insert(bucket);

            for (unit, weightage) in plan.units() {
                let count = weightage.count(bucket);
                if count == 0 {
                    continue;
                }
                let request = SamplingRequest {
                    section_index: index,
                    unit: Some(unit),
                    section: Some(section.name.clone()),
                    marks: section.marks_per_question,
                    count,
                };
                debug!("生成抽题请求: {}", request);
                resolution.requests.push(request);
            }

            let planned = plan.total_for(bucket);
            if planned != section.required_count {
                resolution.warnings.push(format!(
                    "权重表为分区 {} 分配 {} 题，模板要求 {} 题",
                    section.name, planned, section.required_count
                ));
            }
            if section.max_drawable > 0 && planned > section.max_drawable {
                resolution.warnings.push(format!(
                    "权重表为分区 {} 分配 {} 题，超过可抽上限 {}",
                    section.name, planned, section.max_drawable
                ));
            }
        }

        for bucket in SectionBucket::ALL {
            let planned = plan.total_for(bucket);
            if planned > 0 && !seen.contains(&bucket) {
                resolution.warnings.push(format!(
                    "权重表为分区 {} 分配了 {} 题，但模板 {} 中没有该分区",
                    bucket, planned, pattern.name
                ));
            }
        }

        resolution
    }
}
