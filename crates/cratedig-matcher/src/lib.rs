pub mod cancel;
pub mod catalog;
pub mod matcher;
pub mod ocr;
pub mod query;
pub mod scorer;

pub use cancel::{CancelFlag, Cancelled};
pub use catalog::Catalog;
pub use matcher::{MatchResult, Matcher, NoMatchReason};
pub use ocr::{CommandHints, HintExtractor, NoHints, ScopeError};
pub use query::{build_attempts, QueryAttempt};
pub use scorer::{score_candidate, ScoreBreakdown};
