// Copyright (C) 2025 The numplan contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared compilation cache for the regular expressions carried in region
//! metadata, plus the anchored-match helpers the rest of the crate matches
//! through. Metadata patterns are matched as if implicitly anchored; the
//! helpers here make that explicit so callers never forget the anchor.

use std::sync::Arc;

use dashmap::DashMap;
use regex::{Captures, Match, Regex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Memoizes compiled patterns. Metadata records carry their patterns as
/// strings and regions are loaded lazily, so compilation happens on first
/// use and is shared between concurrent readers from then on.
pub struct RegexCache {
    cache: DashMap<String, Arc<Regex>>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            Ok(regex.value().clone())
        } else {
            let entry = self
                .cache
                .entry(pattern.to_string())
                .or_try_insert_with(|| Regex::new(pattern).map(Arc::new))?;
            Ok(entry.value().clone())
        }
    }
}

/// Whole-string and start-anchored matching over an unanchored `Regex`.
pub(crate) trait RegexExt {
    /// Matches iff the pattern consumes the entire input.
    fn full_match(&self, s: &str) -> bool;

    /// Finds a match starting at the first byte of the input, if any.
    fn find_at_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;

    /// Captures a match starting at the first byte of the input, if any.
    fn captures_at_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;

    fn matches_at_start(&self, s: &str) -> bool {
        self.find_at_start(s).is_some()
    }
}

impl RegexExt for Regex {
    fn full_match(&self, s: &str) -> bool {
        match self.find(s) {
            Some(matched) => matched.start() == 0 && matched.end() == s.len(),
            None => false,
        }
    }

    fn find_at_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        self.find(s).filter(|found| found.start() == 0)
    }

    fn captures_at_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        let captures = self.captures(s)?;
        if captures.get(0)?.start() != 0 {
            return None;
        }
        Some(captures)
    }
}
