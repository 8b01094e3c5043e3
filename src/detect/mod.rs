//! Technology classification
//!
//! Maps a [`SignalSet`] to a [`TagSet`] through the fixed rule tables in
//! [`rules`]. Classification is a pure function of the signals: no filesystem
//! access, no state carried between calls.

pub mod rules;
pub mod tags;


use crate::scanner::{Signal, SignalKind, SignalSet};
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use lazy_static::lazy_static;
use rules::DetectionRule;
use serde::Serialize;
use std::collections::BTreeMap;

pub use tags::{GENERIC_TAG, TagSet};

lazy_static! {
    static ref DEFAULT_CLASSIFIER: Classifier =
        Classifier::new().expect("built-in detection rules compile");
}

/// Classify signals with the built-in rule tables
pub fn classify(signals: &SignalSet) -> TagSet {
    DEFAULT_CLASSIFIER.classify(signals)
}

/// Classify signals with the built-in rule tables, keeping the evidence per tag
pub fn classify_with_evidence(signals: &SignalSet) -> Classification {
    DEFAULT_CLASSIFIER.classify_with_evidence(signals)
}

/// Tags plus the first signal that contributed each one
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub tags: TagSet,
    pub evidence: BTreeMap<String, Signal>,
}

enum Matcher {
    Glob(GlobMatcher),
    PathSuffix(&'static str),
    Exact(&'static str),
}

impl Matcher {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Matcher::Glob(glob) => glob.is_match(value),
            Matcher::PathSuffix(suffix) => {
                value == *suffix
                    || value
                        .strip_suffix(suffix)
                        .is_some_and(|prefix| prefix.ends_with('/'))
            }
            Matcher::Exact(expected) => value == *expected,
        }
    }
}

struct CompiledRule {
    kind: SignalKind,
    matcher: Matcher,
    tags: &'static [&'static str],
}

/// Compiled rule table
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    /// Compile the built-in rule tables
    pub fn new() -> Result<Self> {
        Self::with_rules(rules::all_rules())
    }

    /// Compile an arbitrary ordered rule list
    pub fn with_rules<'a>(rules: impl IntoIterator<Item = &'a DetectionRule>) -> Result<Self> {
        let compiled = rules
            .into_iter()
            .map(|rule| {
                let matcher = match rule.kind {
                    SignalKind::File | SignalKind::Dependency => Matcher::Glob(
                        Glob::new(rule.pattern)
                            .with_context(|| format!("Invalid detection pattern: {}", rule.pattern))?
                            .compile_matcher(),
                    ),
                    SignalKind::Directory => Matcher::PathSuffix(rule.pattern),
                    SignalKind::Extension => Matcher::Exact(rule.pattern),
                };
                Ok(CompiledRule {
                    kind: rule.kind,
                    matcher,
                    tags: rule.tags,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules: compiled })
    }

    pub fn classify(&self, signals: &SignalSet) -> TagSet {
        self.classify_with_evidence(signals).tags
    }

    pub fn classify_with_evidence(&self, signals: &SignalSet) -> Classification {
        let mut tags = TagSet::new();
        let mut evidence = BTreeMap::new();

        for signal in signals.iter() {
            for tag in self.tags_for(&signal) {
                if tags.insert(tag) {
                    evidence.insert(tag.to_string(), signal.clone());
                }
            }
        }

        if tags.is_empty() {
            tracing::debug!("No technology recognized, falling back to '{}'", GENERIC_TAG);
            tags = TagSet::generic();
        }

        Classification { tags, evidence }
    }

    /// Tags contributed by a single signal
    pub fn tags_for(&self, signal: &Signal) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.kind == signal.kind && rule.matcher.is_match(&signal.value))
            .flat_map(|rule| rule.tags.iter().copied())
            .collect()
    }
}
