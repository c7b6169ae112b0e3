pub mod loaders;
pub mod paper;
pub mod pattern;
pub mod question;
pub mod section;
pub mod weightage;

pub use loaders::{load_pattern_store, load_question_bank, load_weightage_plan, PatternStore};
pub use paper::{
    AssemblyReport, GeneratedPaper, SamplingRequest, SectionSummary, SelectedQuestion, Shortfall,
};
pub use pattern::{ExamPattern, PatternSection};
pub use question::{QuestionBank, QuestionId, QuestionRecord};
pub use section::{SectionBucket, SectionKey};
pub use weightage::{UnitWeightage, WeightagePlan};
