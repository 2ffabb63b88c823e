//! Announcement-to-client matching.
//!
//! Each announcement is decided on its own:
//! 1. Skip it if the company name normalizes to nothing
//! 2. Exact tier: every client whose normalized legal name equals the
//!    normalized announcement name (confidence 100); soft matching is skipped
//! 3. Soft tier: every client whose [`hybrid_score`] reaches the cutoff,
//!    with the score as confidence
//!
//! Records keep the order of the client snapshot. Nothing is shared between
//! announcements, so a batch can be split and matched in pieces.

use serde::{Deserialize, Serialize};

use crate::config::{MatchConfig, EXACT_MATCH_CONFIDENCE};
use crate::normalize::normalize;
use crate::records::{AnnouncementRecord, ClientRecord};
use crate::similarity::hybrid_score;

/// Type of match found.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Soft,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Soft => write!(f, "soft"),
        }
    }
}

/// One (announcement, client) hit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub kind: MatchKind,
    pub confidence: f64,
    pub client_id: i64,
    pub client_name: String,
    pub client_full_name: String,
    /// Normalized announcement company name.
    pub matched_company_name: String,
    pub announcement: AnnouncementRecord,
}

impl MatchRecord {
    fn new(
        kind: MatchKind,
        confidence: f64,
        client: &ClientRecord,
        matched_company_name: &str,
        announcement: &AnnouncementRecord,
    ) -> Self {
        Self {
            kind,
            confidence,
            client_id: client.id,
            client_name: client.name.clone(),
            client_full_name: client.full_name.clone(),
            matched_company_name: matched_company_name.to_string(),
            announcement: announcement.clone(),
        }
    }

    /// Flatten into a single row with the announcement fields inlined.
    pub fn to_row(&self) -> MatchRow {
        let a = &self.announcement;
        MatchRow {
            match_type: self.kind,
            confidence: self.confidence,
            client_id: self.client_id,
            client_name: self.client_name.clone(),
            client_full_name: self.client_full_name.clone(),
            matched_company_name: self.matched_company_name.clone(),
            publication_date: a.publication_date.clone(),
            case_number: a.case_number.clone(),
            court: a.court.clone(),
            company_name: a.company_name.clone(),
            registered_seat: a.registered_seat.clone(),
            register_entry: a.register_entry.clone(),
            scraped_at: a.scraped_at.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }
}

/// Row-shaped view of a [`MatchRecord`] for row-oriented storage.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub match_type: MatchKind,
    pub confidence: f64,
    pub client_id: i64,
    pub client_name: String,
    pub client_full_name: String,
    pub matched_company_name: String,
    pub publication_date: String,
    pub case_number: String,
    pub court: String,
    pub company_name: String,
    pub registered_seat: String,
    pub register_entry: String,
    pub scraped_at: String,
}

/// Decision for a single announcement.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// One or more clients share the normalized name.
    Exact(Vec<MatchRecord>),
    /// No exact hit, but these clients reached the cutoff.
    Soft(Vec<MatchRecord>),
    NoMatch,
}

impl MatchOutcome {
    pub fn kind(&self) -> Option<MatchKind> {
        match self {
            Self::Exact(_) => Some(MatchKind::Exact),
            Self::Soft(_) => Some(MatchKind::Soft),
            Self::NoMatch => None,
        }
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        match self {
            Self::Exact(records) | Self::Soft(records) => records,
            Self::NoMatch => Vec::new(),
        }
    }
}

/// Counters for one matching run.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub announcements_scanned: usize,
    /// Announcements without a usable company name.
    pub announcements_skipped: usize,
    pub exact_announcements: usize,
    pub soft_announcements: usize,
    pub exact_records: usize,
    pub soft_records: usize,
}

/// Result of matching a batch of announcements.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    /// In announcement order, then client order.
    pub matches: Vec<MatchRecord>,
    pub stats: MatchStats,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Copy of the matches ordered by confidence, highest first.
    ///
    /// Ties keep their original relative order.
    pub fn sorted_by_confidence(&self) -> Vec<MatchRecord> {
        let mut sorted = self.matches.clone();
        sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        sorted
    }
}

/// Matches announcements against a read-only client snapshot.
#[derive(Debug, Clone)]
pub struct Matcher {
    clients: Vec<ClientRecord>,
    config: MatchConfig,
}

impl Matcher {
    /// Take a snapshot of the registry.
    ///
    /// Legal names are normalized once here; already normalized names pass
    /// through unchanged.
    pub fn new(clients: Vec<ClientRecord>, config: MatchConfig) -> Self {
        let clients = clients
            .into_iter()
            .map(|mut client| {
                client.full_name = normalize(&client.full_name);
                client
            })
            .collect();
        Self { clients, config }
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Decide a single announcement.
    ///
    /// Returns [`MatchOutcome::NoMatch`] for announcements without a usable name.
    pub fn match_announcement(&self, announcement: &AnnouncementRecord) -> MatchOutcome {
        let company = normalize(&announcement.company_name);
        if company.is_empty() {
            return MatchOutcome::NoMatch;
        }
        self.match_normalized(&company, announcement)
    }

    /// Match a batch of announcements.
    ///
    /// An empty snapshot or an empty batch is reported and answered with an
    /// empty report.
    pub fn find_matches(&self, announcements: &[AnnouncementRecord]) -> MatchReport {
        if self.clients.is_empty() {
            tracing::error!("Cannot run matching: no client records loaded");
            return MatchReport::default();
        }
        if announcements.is_empty() {
            tracing::error!("Cannot run matching: no insolvency announcements loaded");
            return MatchReport::default();
        }

        tracing::info!(
            "Checking {} announcements against {} clients...",
            announcements.len(),
            self.clients.len()
        );

        let mut report = MatchReport::default();
        for announcement in announcements {
            report.stats.announcements_scanned += 1;

            let company = normalize(&announcement.company_name);
            if company.is_empty() {
                tracing::debug!(
                    "Skipping announcement {:?} without company name",
                    announcement.case_number
                );
                report.stats.announcements_skipped += 1;
                continue;
            }

            match self.match_normalized(&company, announcement) {
                MatchOutcome::Exact(records) => {
                    report.stats.exact_announcements += 1;
                    report.stats.exact_records += records.len();
                    report.matches.extend(records);
                }
                MatchOutcome::Soft(records) => {
                    report.stats.soft_announcements += 1;
                    report.stats.soft_records += records.len();
                    report.matches.extend(records);
                }
                MatchOutcome::NoMatch => {}
            }
        }

        tracing::info!(
            "Announcements checked. Exact hits: {}, soft hits: {}",
            report.stats.exact_announcements,
            report.stats.soft_announcements
        );

        report
    }

    fn match_normalized(&self, company: &str, announcement: &AnnouncementRecord) -> MatchOutcome {
        let exact: Vec<MatchRecord> = self
            .clients
            .iter()
            .filter(|client| client.full_name == company)
            .map(|client| {
                MatchRecord::new(
                    MatchKind::Exact,
                    EXACT_MATCH_CONFIDENCE,
                    client,
                    company,
                    announcement,
                )
            })
            .collect();
        if !exact.is_empty() {
            return MatchOutcome::Exact(exact);
        }

        let candidates = self.soft_candidates(company);
        if candidates.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let soft = candidates
            .into_iter()
            .map(|(index, score)| {
                MatchRecord::new(
                    MatchKind::Soft,
                    score,
                    &self.clients[index],
                    company,
                    announcement,
                )
            })
            .collect();
        MatchOutcome::Soft(soft)
    }

    /// Client indices at or above the cutoff with their scores, in client order.
    fn soft_candidates(&self, company: &str) -> Vec<(usize, f64)> {
        let mut candidates: Vec<(usize, f64)> = self
            .clients
            .iter()
            .enumerate()
            .filter(|(_, client)| !client.full_name.is_empty())
            .map(|(index, client)| (index, hybrid_score(company, &client.full_name)))
            .filter(|(_, score)| *score >= self.config.score_cutoff)
            .collect();

        if let Some(limit) = self.config.soft_match_limit {
            if candidates.len() > limit {
                // Stable sort: equal scores keep the earlier client
                candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
                candidates.truncate(limit);
                candidates.sort_by_key(|(index, _)| *index);
            }
        }

        candidates
    }
}

/// Match `announcements` against `clients` with the given soft-match cutoff.
///
/// Convenience wrapper around [`Matcher`] using the default configuration
/// otherwise.
pub fn find_matches(
    clients: &[ClientRecord],
    announcements: &[AnnouncementRecord],
    score_cutoff: f64,
) -> Vec<MatchRecord> {
    Matcher::new(clients.to_vec(), MatchConfig::with_cutoff(score_cutoff))
        .find_matches(announcements)
        .matches
}
