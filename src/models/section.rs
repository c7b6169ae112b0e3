//! 分区名称归一化
//!
//! 模板里写 "Sec A"，题库里写 "a" 或 "A "，都要落到同一个分区键上。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 归一化后的分区键
///
/// 规则：去掉所有空白、转大写；若以 `SECTION` / `SEC` 开头且去掉前缀后仍有内容，则去掉前缀。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey(String);

impl SectionKey {
    /// 从原始分区名称构建分区键，空名称返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let squashed: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if squashed.is_empty() {
            return None;
        }

        // 只按第一个匹配的前缀剥离，"SECTION" 不会再被当成 "SEC" + "TION"
        let rest = ["SECTION", "SEC"]
            .iter()
            .find_map(|prefix| squashed.strip_prefix(prefix))
            .map(|rest| rest.trim_start_matches(['-', '_', '.', ':']))
            .filter(|rest| !rest.is_empty());

        match rest {
            Some(rest) => Some(Self(rest.to_string())),
            None => Some(Self(squashed)),
        }
    }

    /// 对应的标准分区（A/B/C），其它键返回 None
    pub fn bucket(&self) -> Option<SectionBucket> {
        match self.0.as_str() {
            "A" => Some(SectionBucket::A),
            "B" => Some(SectionBucket::B),
            "C" => Some(SectionBucket::C),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 标准分区，权重表按这三个分区给出每个单元的题数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionBucket {
    A,
    B,
    C,
}

impl SectionBucket {
    pub const ALL: [SectionBucket; 3] = [SectionBucket::A, SectionBucket::B, SectionBucket::C];

    pub fn name(self) -> &'static str {
        match self {
            SectionBucket::A => "A",
            SectionBucket::B => "B",
            SectionBucket::C => "C",
        }
    }
}

impl fmt::Display for SectionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
