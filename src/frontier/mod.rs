//! The URL frontier: seen / to-visit / visited bookkeeping and admission.
//!
//! The frontier owns three sets:
//!
//! - `seen`: every URL ever admitted or rejected by the filter pipeline.
//!   Monotonically grows, never shrinks.
//! - `to_visit`: URLs admitted but not yet navigated.
//! - `visited`: URLs that have been navigated to, successfully or not.
//!
//! Invariants: `to_visit` and `visited` are disjoint at all times, and
//! `seen` is a superset of their union. The monotonic `seen` superset is
//! what lets refresh scans (re-extracting links from a page after in-page
//! interaction) admit only brand-new arrivals without re-queueing anything
//! already queued or visited.

use crate::url::{rejecting_rule, IgnoreRule, Origin, PageUrl};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Configurable half of the admission filter.
///
/// The structural checks (host, fragment, duplicate home page) always run;
/// these settings control the optional ones, plus the ordered ignore-rule
/// pipeline applied to every structurally valid candidate.
#[derive(Debug, Clone, Default)]
pub struct AdmissionPolicy {
    pub ignore_queries: bool,
    pub ignore_images: bool,
    pub ignore_rules: Vec<IgnoreRule>,
}

/// Why a candidate was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RejectReason {
    Unparseable,
    ForeignHost,
    Fragment,
    DuplicateHome,
    Query,
    Image,
    AlreadyVisited,
    AlreadySeen,
    IgnoreRule,
}

/// Outcome of one [`Frontier::add_urls`] call.
#[derive(Debug, Default)]
pub struct Admission {
    /// Newly admitted URLs, now queued in `to_visit`.
    pub admitted: Vec<PageUrl>,
    /// Rejection counts by reason.
    pub rejected: BTreeMap<RejectReason, usize>,
}

impl Admission {
    fn reject(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Read-only export of the frontier's three sets, used for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontierSnapshot {
    pub to_visit: Vec<String>,
    pub visited: Vec<String>,
    pub seen: Vec<String>,
}

/// The stateful URL frontier.
///
/// All three sets are instance fields constructed here; nothing is shared
/// between frontiers.
#[derive(Debug)]
pub struct Frontier {
    origin: Origin,
    policy: AdmissionPolicy,
    seen: BTreeSet<PageUrl>,
    to_visit: BTreeSet<PageUrl>,
    visited: BTreeSet<PageUrl>,
}

impl Frontier {
    pub fn new(origin: Origin, policy: AdmissionPolicy) -> Self {
        Self {
            origin,
            policy,
            seen: BTreeSet::new(),
            to_visit: BTreeSet::new(),
            visited: BTreeSet::new(),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Runs each candidate through the admission filter.
    ///
    /// Candidates are resolved against the crawl origin, then rejected in
    /// priority order: unparseable, foreign host, fragment, duplicate home
    /// page, query string (when configured), image extension (when
    /// configured), already visited, already seen. With `refresh` set, the
    /// `seen` test replaces the last two and is the primary filter: a
    /// refresh scan re-extracts links from a page that was scrolled or
    /// paginated in place, and only brand-new URLs may be admitted.
    ///
    /// Structurally valid survivors then run the ignore-rule pipeline (any
    /// firing rule rejects). Every parseable candidate lands in `seen`
    /// whether admitted or not; admitted URLs land in `to_visit` and are
    /// returned for logging. `visited` is never touched here.
    pub fn add_urls<I, S>(&mut self, candidates: I, refresh: bool) -> Admission
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = Admission::default();

        for raw in candidates {
            let url = match self.origin.resolve(raw.as_ref()) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Rejected unparseable candidate: {}", e);
                    outcome.reject(RejectReason::Unparseable);
                    continue;
                }
            };

            if let Some(reason) = self.rejection_for(&url, refresh) {
                self.seen.insert(url);
                outcome.reject(reason);
                continue;
            }

            if let Some(rule) = rejecting_rule(&self.policy.ignore_rules, &url) {
                tracing::debug!("Ignore rule '{}' rejected {}", rule, url);
                self.seen.insert(url);
                outcome.reject(RejectReason::IgnoreRule);
                continue;
            }

            self.seen.insert(url.clone());
            self.to_visit.insert(url.clone());
            outcome.admitted.push(url);
        }

        if !outcome.admitted.is_empty() {
            tracing::info!(
                "Admitted {} url(s), rejected {}",
                outcome.admitted.len(),
                outcome.rejected_total()
            );
        }

        outcome
    }

    fn rejection_for(&self, url: &PageUrl, refresh: bool) -> Option<RejectReason> {
        if !self.origin.is_same_host(url) {
            return Some(RejectReason::ForeignHost);
        }

        if url.has_fragment() {
            return Some(RejectReason::Fragment);
        }

        if url.path() == "/" && self.origin.start_path() == "/" {
            return Some(RejectReason::DuplicateHome);
        }

        if self.policy.ignore_queries && url.query().is_some() {
            return Some(RejectReason::Query);
        }

        if self.policy.ignore_images && url.is_image() {
            return Some(RejectReason::Image);
        }

        if refresh {
            // Refresh scan: anything already seen is out, whether queued,
            // visited, or previously rejected.
            if self.seen.contains(url) {
                return Some(RejectReason::AlreadySeen);
            }
        } else {
            if self.visited.contains(url) {
                return Some(RejectReason::AlreadyVisited);
            }
            if self.seen.contains(url) {
                return Some(RejectReason::AlreadySeen);
            }
        }

        None
    }

    /// Queues a URL directly, bypassing the admission filter.
    ///
    /// Used to enqueue start URLs, which the filter would otherwise turn
    /// away as duplicates of the home page. Visited URLs are still refused.
    pub fn seed(&mut self, url: PageUrl) {
        if self.visited.contains(&url) {
            return;
        }
        self.seen.insert(url.clone());
        self.to_visit.insert(url);
    }

    /// Removes and returns one queued URL.
    ///
    /// Pop order is deterministic: the lexicographically smallest serialized
    /// URL first. No FIFO fairness is guaranteed or implied.
    pub fn next(&mut self) -> Option<PageUrl> {
        self.to_visit.pop_first()
    }

    /// Records a URL as visited. Idempotent; also removes it from the queue
    /// so the disjointness invariant holds even for URLs that arrived
    /// through `restore`.
    pub fn mark_visited(&mut self, url: &PageUrl) {
        self.to_visit.remove(url);
        self.seen.insert(url.clone());
        self.visited.insert(url.clone());
    }

    pub fn is_visited(&self, url: &PageUrl) -> bool {
        self.visited.contains(url)
    }

    pub fn to_visit_len(&self) -> usize {
        self.to_visit.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// True once the queue has drained.
    pub fn is_drained(&self) -> bool {
        self.to_visit.is_empty()
    }

    /// Sorted flat export of every seen URL.
    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.iter().map(|u| u.as_str().to_string()).collect()
    }

    /// Read-only export for persistence. All three lists come out sorted.
    pub fn snapshot(&self) -> FrontierSnapshot {
        FrontierSnapshot {
            to_visit: self.to_visit.iter().map(|u| u.as_str().to_string()).collect(),
            visited: self.visited.iter().map(|u| u.as_str().to_string()).collect(),
            seen: self.seen.iter().map(|u| u.as_str().to_string()).collect(),
        }
    }

    /// Replaces the internal sets wholesale. Used only at session start for
    /// resume; the caller re-derives the origin before calling this.
    ///
    /// Entries that no longer parse are dropped with a warning, and `seen`
    /// is re-closed over the other two sets so the superset invariant holds
    /// even for snapshots written by older runs.
    pub fn restore(&mut self, snapshot: FrontierSnapshot) {
        self.to_visit = Self::parse_set(snapshot.to_visit);
        self.visited = Self::parse_set(snapshot.visited);
        self.seen = Self::parse_set(snapshot.seen);

        // to_visit and visited must stay disjoint; visited wins.
        for url in &self.visited {
            self.to_visit.remove(url);
        }

        self.seen.extend(self.to_visit.iter().cloned());
        self.seen.extend(self.visited.iter().cloned());
    }

    fn parse_set(urls: Vec<String>) -> BTreeSet<PageUrl> {
        urls.into_iter()
            .filter_map(|raw| match PageUrl::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Dropping unparseable snapshot entry: {}", e);
                    None
                }
            })
            .collect()
    }
}
