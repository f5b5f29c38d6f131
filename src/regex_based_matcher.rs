// Copyright (C) 2009 The Libphonenumber Authors
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

use log::error;

use crate::interfaces::MatcherApi;
use crate::metadata::PhoneNumberDesc;
use crate::regexp_cache::{InvalidRegexError, RegexCache, RegexExt};

/// Descriptor matching backed by the `regex` crate with a shared
/// compilation cache. An invalid pattern in metadata is logged and treated
/// as a non-match; it never propagates.
pub struct RegexBasedMatcher {
    cache: RegexCache,
}

impl RegexBasedMatcher {
    pub fn new() -> Self {
        Self {
            cache: RegexCache::with_capacity(128),
        }
    }

    fn match_pattern(
        &self,
        number: &str,
        pattern: &str,
        allow_prefix_match: bool,
    ) -> Result<bool, InvalidRegexError> {
        let regexp = self.cache.get_regex(pattern)?;
        if allow_prefix_match {
            Ok(regexp.matches_at_start(number))
        } else {
            Ok(regexp.full_match(number))
        }
    }

    fn match_or_log(&self, number: &str, pattern: &str, allow_prefix_match: bool) -> bool {
        match self.match_pattern(number, pattern, allow_prefix_match) {
            Ok(res) => res,
            Err(err) => {
                error!("invalid regex in metadata: {pattern}: {err}");
                false
            }
        }
    }
}

impl Default for RegexBasedMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool {
        // An absent pattern means no numbers of this category exist; it
        // must never match anything.
        let Some(pattern) = number_desc.national_number_pattern.as_deref() else {
            return false;
        };
        self.match_or_log(number, pattern, allow_prefix_match)
    }

    fn match_number_desc(&self, number: &str, number_desc: &PhoneNumberDesc) -> bool {
        let Some(possible) = number_desc.possible_number_pattern.as_deref() else {
            return false;
        };
        if !self.match_or_log(number, possible, false) {
            return false;
        }
        self.match_national_number(number, number_desc, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(national: &str, possible: &str) -> PhoneNumberDesc {
        PhoneNumberDesc {
            national_number_pattern: Some(national.to_owned()),
            possible_number_pattern: Some(possible.to_owned()),
            example_number: None,
        }
    }

    #[test]
    fn matches_are_anchored() {
        let matcher = RegexBasedMatcher::new();
        let desc = desc(r"33\d{8}", r"\d{10}");
        assert!(matcher.match_number_desc("3312345678", &desc));
        // A trailing digit must break a full match.
        assert!(!matcher.match_number_desc("33123456789", &desc));
        assert!(matcher.match_national_number("33123456789", &desc, true));
    }

    #[test]
    fn absent_pattern_never_matches() {
        let matcher = RegexBasedMatcher::new();
        let empty = PhoneNumberDesc::default();
        assert!(!matcher.match_national_number("123", &empty, false));
        assert!(!matcher.match_number_desc("123", &empty));
    }

    #[test]
    fn both_halves_of_the_descriptor_must_hold() {
        let matcher = RegexBasedMatcher::new();
        let desc = desc(r"8\d{6}", r"\d{9}");
        // National pattern matches, possible sieve does not.
        assert!(!matcher.match_number_desc("8123456", &desc));
    }

    #[test]
    fn invalid_metadata_regex_degrades_to_no_match() {
        let matcher = RegexBasedMatcher::new();
        let desc = desc("(", r"\d+");
        assert!(!matcher.match_national_number("123", &desc, false));
    }
}
