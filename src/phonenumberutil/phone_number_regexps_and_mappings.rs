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

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::regexp_cache::RegexCache;

use super::helper_constants::{
    CAPTURE_UP_TO_SECOND_NUMBER_START, DIGITS, PLUS_CHARS, PLUS_SIGN, STAR_SIGN, VALID_ALPHA,
    VALID_ALPHA_INCL_UPPERCASE, VALID_PUNCTUATION,
};
use super::helper_functions::create_extn_pattern;

/// All patterns the engine needs, compiled once at construction, plus the
/// character maps used during normalization. Everything here is read-only
/// after `new()` returns.
pub(super) struct PhoneNumberRegExpsAndMappings {
    pub regexp_cache: RegexCache,

    /// The E.161 letter-to-keypad mapping combined with ASCII digits, used
    /// when normalizing vanity numbers. Keys are uppercase; input is
    /// case-folded before lookup.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Country calling codes whose mobile numbers are geographically
    /// assigned.
    pub geo_mobile_countries: HashSet<i32>,

    /// Matches the viable-phone-number shape: optional plus signs, at least
    /// three digits interleaved with permitted punctuation, then optional
    /// trailing punctuation, letters and digits. Anchored per use; an
    /// optional extension tail is appended where needed.
    pub valid_phone_number_pattern: Regex,

    /// All possible ways to write an extension, anchored to the end of the
    /// number, case-insensitively. The parsing variant additionally allows
    /// a bare comma as introducer.
    pub extn_pattern: Regex,

    /// At least three letters: the trigger for vanity-number
    /// normalization.
    pub valid_alpha_phone_pattern: Regex,

    /// One or more plus characters (ASCII or full-width) at the start.
    pub plus_chars_pattern: Regex,

    /// Runs of permitted punctuation, used as separators.
    pub separator_pattern: Regex,

    /// A single Unicode decimal digit, capturing.
    pub capturing_digit_pattern: Regex,

    /// Characters that may meaningfully start a phone number: digits and
    /// plus signs. Anything before the first of these is noise.
    pub valid_start_char_pattern: Regex,

    /// Valid characters preceding a marker that likely starts a second
    /// phone number; the part before the marker is captured.
    pub capture_up_to_second_number_start_pattern: Regex,

    /// Trailing characters to remove: anything that is not a letter, a
    /// digit in any script, or `#` (which may terminate an extension).
    pub unwanted_end_char_pattern: Regex,

    /// A `$N` group reference inside a format template. `\d` rather than
    /// `1` because some plans never use the first group in the national
    /// pattern.
    pub first_group_capturing_pattern: Regex,

    /// RFC3966 global-number-digits for the phone-context parameter.
    pub rfc3966_global_number_digits_pattern: Regex,
    /// RFC3966 domainname for the phone-context parameter.
    pub rfc3966_domainname_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn alpha_mappings() -> HashMap<char, char> {
        let mut alpha_map = HashMap::with_capacity(26);
        for (letters, digit) in [
            ("ABC", '2'),
            ("DEF", '3'),
            ("GHI", '4'),
            ("JKL", '5'),
            ("MNO", '6'),
            ("PQRS", '7'),
            ("TUV", '8'),
            ("WXYZ", '9'),
        ] {
            for letter in letters.chars() {
                alpha_map.insert(letter, digit);
            }
        }
        alpha_map
    }

    pub fn new() -> Self {
        let mut alpha_phone_mappings = Self::alpha_mappings();
        for d in '0'..='9' {
            alpha_phone_mappings.insert(d, d);
        }

        let mut geo_mobile_countries = HashSet::new();
        geo_mobile_countries.insert(52); // Mexico
        geo_mobile_countries.insert(54); // Argentina
        geo_mobile_countries.insert(55); // Brazil
        geo_mobile_countries.insert(62); // Indonesia: some prefixes only
        geo_mobile_countries.insert(86); // China

        let extn_patterns_for_parsing = create_extn_pattern(true);
        let valid_phone_number = format!(
            "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*",
            PLUS_CHARS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_ALPHA,
        );

        let alphanum = fast_cat::concat_str!(VALID_ALPHA_INCL_UPPERCASE, DIGITS);
        let rfc3966_visual_separator = r"[\-\.\(\)]?";
        let rfc3966_phone_digit = format!("({}|{})", DIGITS, rfc3966_visual_separator);
        let rfc3966_domainlabel = format!("[{}]+((\\-)*[{}])*", alphanum, alphanum);
        let rfc3966_toplabel = format!(
            "[{}]+((\\-)*[{}])*",
            VALID_ALPHA_INCL_UPPERCASE, alphanum
        );

        Self {
            regexp_cache: RegexCache::with_capacity(128),
            alpha_phone_mappings,
            geo_mobile_countries,
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                &valid_phone_number, &extn_patterns_for_parsing
            ))
            .unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_alpha_phone_pattern: Regex::new(
                "(?:.*?[A-Za-z\u{FF21}-\u{FF3A}\u{FF41}-\u{FF5A}]){3}.*",
            )
            .unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            capturing_digit_pattern: Regex::new(&format!("({})", DIGITS)).unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            capture_up_to_second_number_start_pattern: Regex::new(CAPTURE_UP_TO_SECOND_NUMBER_START)
                .unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            rfc3966_global_number_digits_pattern: Regex::new(&format!(
                "^\\{}{}*{}{}*$",
                PLUS_SIGN, &rfc3966_phone_digit, DIGITS, rfc3966_phone_digit
            ))
            .unwrap(),
            rfc3966_domainname_pattern: Regex::new(&format!(
                "^({}\\.)*{}\\.?$",
                rfc3966_domainlabel, rfc3966_toplabel
            ))
            .unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn check_regexps_are_compiling() {
        super::PhoneNumberRegExpsAndMappings::new();
    }
}
