//! Library layer for the insolvency tracker: matches public insolvency
//! announcements against a client registry.
//!
//! Company names are normalized, compared exactly, and otherwise scored with a
//! token-based similarity so spelling and legal-form variations still match.

pub mod config;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod records;
pub mod similarity;
pub mod source;

pub use config::{MatchConfig, DEFAULT_SCORE_CUTOFF, EXACT_MATCH_CONFIDENCE};
pub use error::{InsolvencyError, Result};
pub use matching::{
    find_matches, MatchKind, MatchOutcome, MatchRecord, MatchReport, MatchRow, MatchStats, Matcher,
};
pub use normalize::{normalize, normalize_opt};
pub use records::{AnnouncementRecord, ClientRecord};
pub use similarity::{hybrid_score, token_set_ratio, token_sort_ratio};
pub use source::{run_matching, AnnouncementSource, ClientRegistry, JsonFile};
