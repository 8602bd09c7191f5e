//! LLM-backed candidate ranking.

pub mod anthropic;
pub mod error;
pub mod prompt;

pub use anthropic::{AnthropicRanker, RankerSettings, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::RankerError;
pub use prompt::{
    build_prompt, fallback_selection, format_candidates, parse_selection, FALLBACK_ANALYSIS,
};
