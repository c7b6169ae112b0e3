pub mod paper_renderer;
pub mod pattern_resolver;
pub mod question_sampler;

pub use paper_renderer::{JsonRenderer, PaperRenderer, PlainTextRenderer};
pub use pattern_resolver::{PatternResolver, Resolution};
pub use question_sampler::{QuestionSampler, SampleOutcome};
