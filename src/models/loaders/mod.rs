pub mod bank_loader;
pub mod toml_loader;

pub use bank_loader::{bank_from_rows, load_question_bank, parse_csv_bank, parse_json_bank, BankRow};
pub use toml_loader::{load_pattern_store, load_weightage_plan, parse_weightage_plan, PatternStore};
