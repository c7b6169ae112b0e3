//! 题库加载
//!
//! 列名只在加载时归一化一次（去首尾空白、小写、空格换下划线），再通过别名表映射到标准列名。

use crate::error::BankError;
use crate::models::question::QuestionBank;
use anyhow::{Context, Result};
use phf::phf_map;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;
use tracing::{debug, info, warn};

/// 一行题库数据：列名 → 单元格文本
pub type BankRow = BTreeMap<String, String>;

const QUESTION: &str = "question";
const UNIT: &str = "unit";
const MARKS: &str = "marks";
const SECTION: &str = "section";
const K_LEVEL: &str = "k_level";

/// 归一化后的列名 → 标准列名
static COLUMN_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "question" => QUESTION,
    "questions" => QUESTION,
    "question_text" => QUESTION,
    "unit" => UNIT,
    "unit_no" => UNIT,
    "marks" => MARKS,
    "mark" => MARKS,
    "section" => SECTION,
    "sec" => SECTION,
    "k_level" => K_LEVEL,
    "klevel" => K_LEVEL,
    "k_level_" => K_LEVEL,
    "k-level" => K_LEVEL,
};

/// 列名归一化
pub fn normalize_column(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// 映射到标准列名，未知列返回 None
pub fn canonical_column(raw: &str) -> Option<&'static str> {
    COLUMN_ALIASES.get(normalize_column(raw).as_str()).copied()
}

fn digits_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("数字正则合法"))
}

/// 解析正整数单元格，兼容 Excel 导出的 "5.0"
fn parse_positive(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let value = match cell.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            let float = cell.parse::<f64>().ok()?;
            if float.fract() != 0.0 || float < 0.0 || float > u32::MAX as f64 {
                return None;
            }
            float as u32
        }
    };
    (value > 0).then_some(value)
}

/// 解析认知层级："K2" / "k 3" / "2" → 数字部分
fn parse_k_level(cell: &str) -> Option<u8> {
    digits_pattern()
        .find(cell)
        .and_then(|m| m.as_str().parse::<u8>().ok())
}

fn non_empty(cell: Option<&String>) -> Option<String> {
    cell.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

/// 由列名和行数据构建题库
///
/// # 参数
/// - `columns`: 原始列名（任意大小写/空格）
/// - `rows`: 以原始列名为键的行数据
///
/// # 返回
/// 缺少 question 或 unit 列时返回 `BankError::MissingColumns`
pub fn bank_from_rows(
    columns: &[String],
    rows: impl IntoIterator<Item = BankRow>,
) -> Result<QuestionBank, BankError> {
    // 原始列名 → 标准列名，同一标准列以第一次出现为准
    let mut mapping: BTreeMap<String, &'static str> = BTreeMap::new();
    for column in columns {
        if let Some(canonical) = canonical_column(column) {
            if !mapping.values().any(|c| *c == canonical) {
                mapping.insert(column.clone(), canonical);
            }
        } else {
            debug!("忽略未知列: {}", column);
        }
    }

    let has = |name: &str| mapping.values().any(|c| *c == name);
    let missing: Vec<String> = [QUESTION, UNIT]
        .into_iter()
        .filter(|name| !has(*name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(BankError::MissingColumns {
            missing,
            found: columns.iter().map(|c| normalize_column(c)).collect(),
        });
    }

    let mut bank = QuestionBank::new(has(MARKS), has(SECTION), has(K_LEVEL));

    for (row_index, row) in rows.into_iter().enumerate() {
        let mut cells: BTreeMap<&'static str, String> = BTreeMap::new();
        for (column, value) in row {
            if let Some(canonical) = mapping.get(&column) {
                cells.insert(*canonical, value);
            }
        }

        let Some(text) = non_empty(cells.get(QUESTION)) else {
            warn!("跳过第 {} 行: 题干为空", row_index + 1);
            continue;
        };

        let unit = cells.get(UNIT).and_then(|c| parse_positive(c));
        if unit.is_none() {
            warn!("第 {} 行单元无效，不参与按单元抽题", row_index + 1);
        }
        let marks = cells.get(MARKS).and_then(|c| parse_positive(c));
        let section = non_empty(cells.get(SECTION));
        let k_level = cells.get(K_LEVEL).and_then(|c| parse_k_level(c));

        bank.push(text, unit, marks, section, k_level);
    }

    Ok(bank)
}

/// 解析 CSV 题库内容（首行为表头）
pub fn parse_csv_bank(content: &str) -> Result<QuestionBank, BankError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: BankRow = headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(|s| s.to_string()))
                    .collect();
                rows.push(row);
            }
            Err(e) => warn!("跳过第 {} 行: {}", index + 1, e),
        }
    }

    bank_from_rows(&headers, rows)
}

fn cell_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 解析 JSON 题库内容（对象数组）
///
/// 列名取自各行对象的键；空数组没有任何列，同样按缺少必需列报错
pub fn parse_json_bank(content: &str) -> Result<QuestionBank, BankError> {
    let value: JsonValue = serde_json::from_str(content)?;
    let JsonValue::Array(items) = value else {
        return Err(BankError::NotARowArray);
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let JsonValue::Object(object) = item else {
            return Err(BankError::NotARowArray);
        };
        let mut row = BankRow::new();
        for (key, value) in object {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            row.insert(key, cell_to_string(&value));
        }
        rows.push(row);
    }

    bank_from_rows(&columns, rows)
}

/// 从文件加载题库（.csv / .json）
pub async fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题库文件: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase);

    let bank = match extension.as_deref() {
        Some("csv") => parse_csv_bank(&content),
        Some("json") => parse_json_bank(&content),
        _ => Err(BankError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
    .with_context(|| format!("无法解析题库文件: {}", path.display()))?;

    info!(
        "成功加载 {} 道题目 (分值列: {}, 分区列: {}, K 层级列: {})",
        bank.len(),
        bank.has_marks_column(),
        bank.has_section_column(),
        bank.has_k_level_column()
    );

    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_normalization_and_aliases() {
        assert_eq!(normalize_column("  K Level "), "k_level");
        assert_eq!(canonical_column("Question"), Some(QUESTION));
        assert_eq!(canonical_column(" UNIT"), Some(UNIT));
        assert_eq!(canonical_column("KLevel"), Some(K_LEVEL));
        assert_eq!(canonical_column("Remarks"), None);
    }

    #[test]
    fn test_cell_parsing() {
        assert_eq!(parse_positive("5"), Some(5));
        assert_eq!(parse_positive(" 10.0 "), Some(10));
        assert_eq!(parse_positive("2.5"), None);
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive(""), None);
        assert_eq!(parse_k_level("K2"), Some(2));
        assert_eq!(parse_k_level("k 3"), Some(3));
        assert_eq!(parse_k_level("none"), None);
    }

    #[test]
    fn test_csv_with_optional_columns() {
        let content = "Question,Unit,Marks,Section,K Level\n\
                       Define a stack.,1,2,A,K1\n\
                       ,1,2,A,K1\n\
                       Explain paging.,2,5.0,b ,K3\n";

        let bank = parse_csv_bank(content).unwrap();
        assert_eq!(bank.len(), 2);
        assert!(bank.has_marks_column());
        assert!(bank.has_section_column());
        assert!(bank.has_k_level_column());

        let second = &bank.records()[1];
        assert_eq!(second.unit, Some(2));
        assert_eq!(second.marks, Some(5));
        assert_eq!(second.section.as_deref(), Some("b"));
        assert_eq!(second.k_level, Some(3));
    }

    #[test]
    fn test_csv_without_optional_columns() {
        let content = "question,unit\nWhat is an OS?,1\n";
        let bank = parse_csv_bank(content).unwrap();

        assert_eq!(bank.len(), 1);
        assert!(!bank.has_marks_column());
        assert!(!bank.has_section_column());
        assert_eq!(bank.records()[0].marks, None);
    }

    #[test]
    fn test_missing_required_column() {
        let content = "question,marks\nWhat is an OS?,2\n";
        let err = parse_csv_bank(content).unwrap_err();
        match err {
            BankError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["unit".to_string()]);
                assert_eq!(found, vec!["question".to_string(), "marks".to_string()]);
            }
            other => panic!("意外错误: {:?}", other),
        }
    }

    #[test]
    fn test_json_rows_with_numeric_cells() {
        let content = r#"[
            {"Question": "Define a process.", "Unit": 1, "Marks": 2, "Section": "A"},
            {"Question": "Explain deadlock.", "Unit": "2", "Marks": 10.0, "Section": null}
        ]"#;

        let bank = parse_json_bank(content).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.records()[1].marks, Some(10));
        assert_eq!(bank.records()[1].section, None);
        assert!(!bank.has_k_level_column());
    }

    #[test]
    fn test_json_must_be_array() {
        assert!(matches!(
            parse_json_bank(r#"{"question": "x"}"#),
            Err(BankError::NotARowArray)
        ));
    }

    #[test]
    fn test_empty_json_array_reports_missing_columns() {
        match parse_json_bank("[]") {
            Err(BankError::MissingColumns { missing, found }) => {
                assert_eq!(missing, vec!["question".to_string(), "unit".to_string()]);
                assert!(found.is_empty());
            }
            other => panic!("意外结果: {:?}", other.map(|b| b.len())),
        }
    }
}
