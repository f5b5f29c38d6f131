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

//! The main entry point of the library.
//!
//! [`PhoneNumberUtil`] parses, validates, classifies and formats phone
//! numbers against per-region numbering-plan metadata. Construct one
//! instance per process (or per metadata configuration) and share it;
//! every operation is callable concurrently.

use std::collections::HashSet;
use std::sync::Arc;

use log::error;
use regex::Regex;

use crate::interfaces::{MatcherApi, MetadataSource};
use crate::metadata::{
    CountryCodeIndex, FileMetadataSource, MetadataStore, NumberFormat, PhoneMetadata, RegionMap,
    COUNTRY_CODE_TO_REGION_CODE, REGION_CODE_FOR_NON_GEO_ENTITY, UNKNOWN_REGION,
};
use crate::phonenumber::{CountryCodeSource, PhoneNumber};
use crate::regex_based_matcher::RegexBasedMatcher;
use crate::regexp_cache::RegexExt;

use super::enums::{MatchType, PhoneNumberFormat, PhoneNumberType, ValidationResult};
use super::errors::{ExtractNumberError, GetExampleNumberError, NotANumberError, ParseError};
use super::helper_constants::{
    DEFAULT_EXTN_PREFIX, MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
    MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, RFC3966_EXTN_PREFIX, RFC3966_ISDN_SUBADDRESS,
    RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
};
use super::helper_functions::{
    copy_core_fields_only, get_number_desc_by_type, get_supported_types_for_metadata,
    is_national_number_suffix_of_the_other, normalize_helper,
    prefix_number_with_country_calling_code,
};
use super::phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings;

// The categories tried, in order, once the general descriptor has
// accepted a number. Fixed-line and mobile close the ladder separately
// because they need the pattern-identity disambiguation below.
const TYPE_PRIORITY: [PhoneNumberType; 8] = [
    PhoneNumberType::PremiumRate,
    PhoneNumberType::TollFree,
    PhoneNumberType::SharedCost,
    PhoneNumberType::VoIP,
    PhoneNumberType::PersonalNumber,
    PhoneNumberType::Pager,
    PhoneNumberType::UAN,
    PhoneNumberType::VoiceMail,
];

/// The main struct for all phone number-related operations.
///
/// Owns the country-code index (read-only after construction), the lazy
/// metadata cache (append-only) and the compiled patterns (read-only).
pub struct PhoneNumberUtil {
    regexps: PhoneNumberRegExpsAndMappings,
    matcher: RegexBasedMatcher,
    index: CountryCodeIndex,
    store: MetadataStore,
}

impl PhoneNumberUtil {
    /// Creates an instance reading metadata files addressed as
    /// `<prefix>_<REGION>.json`.
    pub fn from_prefix(file_prefix: impl Into<std::path::PathBuf>) -> Self {
        Self::with_source(Box::new(FileMetadataSource::new(file_prefix)))
    }

    /// Creates an instance over any metadata source, with the vendored
    /// country-code index.
    pub fn with_source(source: Box<dyn MetadataSource>) -> Self {
        Self::with_source_and_region_map(source, COUNTRY_CODE_TO_REGION_CODE)
    }

    /// Creates an instance over any metadata source and a caller-supplied
    /// calling-code → region map. Intended for tests and embedders with
    /// reduced metadata sets.
    pub fn with_source_and_region_map(source: Box<dyn MetadataSource>, map: RegionMap) -> Self {
        Self {
            regexps: PhoneNumberRegExpsAndMappings::new(),
            matcher: RegexBasedMatcher::new(),
            index: CountryCodeIndex::from_map(map),
            store: MetadataStore::new(source),
        }
    }

    fn regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        match self.regexps.regexp_cache.get_regex(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                error!("invalid regex in metadata: {err}");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Metadata access
    // ------------------------------------------------------------------

    /// Metadata for a geographic region, or absent when the region is
    /// unsupported or its record cannot be materialized.
    pub fn metadata_for_region(&self, region_code: impl AsRef<str>) -> Option<Arc<PhoneMetadata>> {
        self.store.metadata_for_region(&self.index, region_code.as_ref())
    }

    /// Metadata for a non-geographical numbering plan such as +800.
    pub fn metadata_for_non_geographical_region(
        &self,
        country_code: i32,
    ) -> Option<Arc<PhoneMetadata>> {
        self.store
            .metadata_for_non_geographical_region(&self.index, country_code)
    }

    fn metadata_for_region_or_calling_code(
        &self,
        country_code: i32,
        region_code: &str,
    ) -> Option<Arc<PhoneMetadata>> {
        if region_code == REGION_CODE_FOR_NON_GEO_ENTITY {
            self.metadata_for_non_geographical_region(country_code)
        } else {
            self.store.metadata_for_region(&self.index, region_code)
        }
    }

    // ------------------------------------------------------------------
    // Country-code index queries
    // ------------------------------------------------------------------

    /// Gets the main region for a country calling code, or `"ZZ"`.
    pub fn get_region_code_for_country_code(&self, country_code: i32) -> &str {
        self.index.region_code_for_country_code(country_code)
    }

    /// All region codes sharing a country calling code, main region first.
    pub fn get_region_codes_for_country_calling_code(
        &self,
        country_code: i32,
    ) -> Option<impl ExactSizeIterator<Item = &str>> {
        self.index.region_codes_for_country_code(country_code)
    }

    /// The country calling code of a supported region.
    pub fn get_country_code_for_region(&self, region_code: impl AsRef<str>) -> Option<i32> {
        self.metadata_for_region(region_code)
            .map(|metadata| metadata.country_code)
    }

    pub fn get_supported_regions(&self) -> impl ExactSizeIterator<Item = &str> {
        self.index.supported_regions()
    }

    pub fn get_supported_calling_codes(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.index.supported_calling_codes()
    }

    /// Calling codes assigned to non-geographical networks (the `"001"`
    /// entries of the index).
    pub fn get_supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.global_network_calling_codes()
    }

    /// The number types for which this region's metadata has data.
    pub fn get_supported_types_for_region(
        &self,
        region_code: impl AsRef<str>,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.metadata_for_region(region_code)
            .map(|metadata| get_supported_types_for_metadata(&metadata))
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.metadata_for_non_geographical_region(country_code)
            .map(|metadata| get_supported_types_for_metadata(&metadata))
    }

    /// Whether a region participates in the North American Numbering Plan.
    pub fn is_nanpa_country(&self, region_code: impl AsRef<str>) -> bool {
        let region_code = region_code.as_ref();
        self.index
            .region_codes_for_country_code(NANPA_COUNTRY_CODE)
            .is_some_and(|mut regions| regions.any(|region| region == region_code))
    }

    // ------------------------------------------------------------------
    // Normalizer & extension stripper
    // ------------------------------------------------------------------

    /// Checks whether a string could syntactically be a phone number:
    /// at least three digits, optionally interleaved with permitted
    /// punctuation, letters and an extension tail. Cheap and total.
    pub fn is_viable_phone_number(&self, number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.len() >= MIN_LENGTH_FOR_NSN
            && self.regexps.valid_phone_number_pattern.full_match(number)
    }

    /// Normalizes a number candidate to plain ASCII digits.
    ///
    /// If the string carries three or more letters it is treated as a
    /// vanity number and every letter is replaced by its E.161 keypad
    /// digit; otherwise every non-digit is dropped and Unicode digits are
    /// folded to ASCII. Idempotent on its own output.
    pub fn normalize(&self, number: impl AsRef<str>) -> String {
        let mut number = number.as_ref().to_owned();
        self.normalize_in_place(&mut number);
        number
    }

    fn normalize_in_place(&self, number: &mut String) {
        if self.regexps.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.regexps.alpha_phone_mappings, true, number);
        } else {
            *number = self.normalize_digits_only(number.as_str());
        }
    }

    /// Keeps only decimal digits, folding every Unicode digit (full-width,
    /// Arabic-Indic, ...) to its ASCII equivalent.
    pub fn normalize_digits_only(&self, number: impl AsRef<str>) -> String {
        dec_from_char::normalize_decimals(number.as_ref())
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }

    /// Converts all alpha characters in a number to their E.161 digits,
    /// leaving other characters untouched. "1-800-FLOWERS" becomes
    /// "1-800-3569377".
    pub fn convert_alpha_characters_in_number(&self, number: impl AsRef<str>) -> String {
        let mut number = number.as_ref().to_owned();
        normalize_helper(&self.regexps.alpha_phone_mappings, false, &mut number);
        number
    }

    /// True iff the string is a viable number that still contains three or
    /// more letters once any extension is set aside.
    pub fn is_alpha_number(&self, number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        if !self.is_viable_phone_number(number) {
            return false;
        }
        let mut stripped = number.to_owned();
        self.maybe_strip_extension(&mut stripped);
        self.regexps.valid_alpha_phone_pattern.full_match(&stripped)
    }

    /// Strips a recognized extension tail off `number`, returning the
    /// extension digits. `number` is only modified when the tail matches
    /// and the remainder is itself still viable.
    pub fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let (match_start, extension) = {
            let captures = self.regexps.extn_pattern.captures(number)?;
            let match_start = captures.get(0)?.start();
            if !self.is_viable_phone_number(&number[..match_start]) {
                return None;
            }
            // The first non-empty capture group holds the extension digits.
            let extension = captures
                .iter()
                .skip(1)
                .flatten()
                .find(|group| !group.as_str().is_empty())
                .map(|group| group.as_str().to_owned());
            (match_start, extension?)
        };
        number.truncate(match_start);
        Some(extension)
    }

    /// Carves the likeliest phone-number substring out of free-form input:
    /// starts at the first digit or plus sign, drops unwanted trailing
    /// characters, and truncates anything that looks like a second number.
    pub fn extract_possible_number<'a>(
        &self,
        number: &'a str,
    ) -> Result<&'a str, ExtractNumberError> {
        let start = self
            .regexps
            .valid_start_char_pattern
            .find(number)
            .ok_or(ExtractNumberError::NoValidStartCharacter)?
            .start();
        let mut candidate = &number[start..];
        if let Some(trailing) = self.regexps.unwanted_end_char_pattern.find(candidate) {
            candidate = &candidate[..trailing.start()];
            if candidate.is_empty() {
                return Err(ExtractNumberError::NotANumber);
            }
        }
        if let Some(captures) = self
            .regexps
            .capture_up_to_second_number_start_pattern
            .captures(candidate)
        {
            if let Some(first_number) = captures.get(1) {
                candidate = first_number.as_str();
            }
        }
        Ok(candidate)
    }

    /// The national significant number: the leading-zero flag rendered
    /// back in front of the decimal national number.
    pub fn get_national_significant_number(&self, number: &PhoneNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(number.national_number());
        if number.italian_leading_zero() {
            fast_cat::concat_str!("0", national_number)
        } else {
            national_number.to_owned()
        }
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parses a string into a [`PhoneNumber`].
    ///
    /// `default_region` supplies the country calling code whenever the
    /// number is not written in international form; it may be `"ZZ"` when
    /// the number is guaranteed to start with a plus sign.
    pub fn parse(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse.as_ref(), default_region.as_ref(), false, true)
    }

    /// Like [`Self::parse`], but additionally records how the country code
    /// was established and any domestic carrier code that was stripped.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse.as_ref(), default_region.as_ref(), true, true)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseError> {
        if number_to_parse.len() > MAX_INPUT_STRING_LENGTH {
            return Err(NotANumberError::InputTooLong.into());
        }

        let mut national_number = self.build_national_number_for_parsing(number_to_parse)?;
        if !self.is_viable_phone_number(&national_number) {
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::default();
        if let Some(extension) = self.maybe_strip_extension(&mut national_number) {
            phone_number.set_extension(extension);
        }

        let mut country_metadata = self.metadata_for_region(default_region);
        let (extracted_country_code, mut normalized_national_number, country_code_source) =
            self.maybe_extract_country_code(&national_number, country_metadata.as_deref())?;
        phone_number.set_country_code_source(country_code_source);

        let country_code = if extracted_country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(extracted_country_code);
            if phone_number_region != default_region {
                country_metadata = self
                    .metadata_for_region_or_calling_code(extracted_country_code, phone_number_region);
            }
            extracted_country_code
        } else {
            // No international prefix and no embedded country code: the
            // default region supplies it. Without region checks a number
            // may legitimately stay country-code-less (e.g. for matching).
            match country_metadata.as_deref() {
                Some(metadata) => metadata.country_code,
                None if check_region => return Err(ParseError::InvalidCountryCode),
                None => 0,
            }
        };

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }

        if let Some(metadata) = country_metadata.as_deref() {
            let mut potential_national_number = normalized_national_number.clone();
            let carrier_code =
                self.maybe_strip_national_prefix_and_carrier_code(&mut potential_national_number, metadata);
            // Don't keep the strip when too few digits remain to form a
            // number at all.
            if potential_national_number.len() >= MIN_LENGTH_FOR_NSN {
                normalized_national_number = potential_national_number;
                if keep_raw_input {
                    if let Some(carrier_code) = carrier_code {
                        phone_number.set_preferred_domestic_carrier_code(carrier_code);
                    }
                }
            }
        }

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if normalized_national_number.len() > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLongNsn);
        }

        if normalized_national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
        }
        phone_number.set_country_code(country_code);
        phone_number.set_national_number(
            normalized_national_number
                .parse::<u64>()
                .map_err(NotANumberError::FailedToParseNumberAsInt)?,
        );
        Ok(phone_number)
    }

    /// Converts `number_to_parse` into a candidate for the extraction
    /// pipeline, honoring the RFC3966 `tel:` syntax when present.
    fn build_national_number_for_parsing(
        &self,
        number_to_parse: &str,
    ) -> Result<String, ParseError> {
        let mut national_number = String::with_capacity(number_to_parse.len());
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
            let phone_context = number_to_parse[phone_context_start..]
                .split(';')
                .next()
                .unwrap_or("");
            if !self.is_phone_context_valid(phone_context) {
                return Err(NotANumberError::InvalidPhoneContext.into());
            }
            // A global phone-context supplies the country code; a domain
            // name carries no number information.
            if phone_context.starts_with('+') {
                national_number.push_str(phone_context);
            }
            let before_context = &number_to_parse[..index_of_phone_context];
            let index_of_national_number = before_context
                .find(RFC3966_PREFIX)
                .map(|i| i + RFC3966_PREFIX.len())
                .unwrap_or(0);
            national_number.push_str(&before_context[index_of_national_number..]);
        } else {
            national_number.push_str(self.extract_possible_number(number_to_parse)?);
        }
        // An ISDN subaddress carries no number information either.
        if let Some(isub_index) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(isub_index);
        }
        Ok(national_number)
    }

    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        self.regexps
            .rfc3966_global_number_digits_pattern
            .is_match(phone_context)
            || self.regexps.rfc3966_domainname_pattern.is_match(phone_context)
    }

    /// Parsing with no default region only works for numbers written in
    /// international form.
    fn check_region_for_parsing(&self, number: &str, default_region: &str) -> bool {
        self.index.is_supported_region(default_region)
            || (!number.is_empty() && self.regexps.plus_chars_pattern.matches_at_start(number))
    }

    /// Tries to establish the country calling code of a normalized
    /// candidate. Returns the code (0 when the default region must supply
    /// it), the remaining normalized national number, and how the answer
    /// was obtained.
    fn maybe_extract_country_code(
        &self,
        number: &str,
        default_metadata: Option<&PhoneMetadata>,
    ) -> Result<(i32, String, CountryCodeSource), ParseError> {
        if number.is_empty() {
            return Err(ParseError::InvalidCountryCode);
        }
        let possible_idd_prefix = default_metadata.and_then(|m| m.international_prefix.as_deref());
        let (full_number, country_code_source) =
            self.maybe_strip_international_prefix_and_normalize(number, possible_idd_prefix);

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd);
            }
            if let Some((country_code, rest)) = self.extract_country_code(&full_number) {
                return Ok((country_code, rest.to_owned(), country_code_source));
            }
            // The number started with an international prefix, so it must
            // carry a known country code.
            return Err(ParseError::InvalidCountryCode);
        }

        if let Some(metadata) = default_metadata {
            // The number may still start with its country code even though
            // no international prefix announced it.
            let mut buf = itoa::Buffer::new();
            let country_code_str = buf.format(metadata.country_code);
            if let Some(rest) = full_number.strip_prefix(country_code_str) {
                let general_desc = &metadata.general_desc;
                let mut potential_national_number = rest.to_owned();
                self.maybe_strip_national_prefix_and_carrier_code(
                    &mut potential_national_number,
                    metadata,
                );
                // Strip the country code only when the number is invalid as
                // written but valid without it, or is too long as written.
                let matches_as_written =
                    self.matcher.match_national_number(&full_number, general_desc, false);
                let matches_without_code = self.matcher.match_national_number(
                    &potential_national_number,
                    general_desc,
                    false,
                );
                let too_long_as_written = match general_desc.possible_number_pattern.as_deref() {
                    Some(pattern) => {
                        self.test_number_length_against_pattern(pattern, &full_number)
                            == ValidationResult::TooLong
                    }
                    None => full_number.len() > MAX_LENGTH_FOR_NSN,
                };
                if (!matches_as_written && matches_without_code) || too_long_as_written {
                    return Ok((
                        metadata.country_code,
                        potential_national_number,
                        CountryCodeSource::FromNumberWithoutPlusSign,
                    ));
                }
            }
        }
        Ok((0, full_number, CountryCodeSource::FromDefaultCountry))
    }

    /// Strips a leading plus sign or international direct dialling prefix
    /// and normalizes what remains.
    fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &str,
        possible_idd_prefix: Option<&str>,
    ) -> (String, CountryCodeSource) {
        if number.is_empty() {
            return (String::new(), CountryCodeSource::FromDefaultCountry);
        }
        if let Some(plus) = self.regexps.plus_chars_pattern.find_at_start(number) {
            return (
                self.normalize(&number[plus.end()..]),
                CountryCodeSource::FromNumberWithPlusSign,
            );
        }
        let mut normalized = self.normalize(number);
        let Some(idd_prefix) = possible_idd_prefix else {
            return (normalized, CountryCodeSource::FromDefaultCountry);
        };
        let Some(idd_pattern) = self.regex(idd_prefix) else {
            return (normalized, CountryCodeSource::FromDefaultCountry);
        };
        if self.parse_prefix_as_idd(&idd_pattern, &mut normalized) {
            (normalized, CountryCodeSource::FromNumberWithIdd)
        } else {
            (normalized, CountryCodeSource::FromDefaultCountry)
        }
    }

    /// Strips `idd_pattern` off the start of `number` if it matches there
    /// and the first digit after it is not zero (country calling codes
    /// never begin with zero).
    fn parse_prefix_as_idd(&self, idd_pattern: &Regex, number: &mut String) -> bool {
        let Some(matched) = idd_pattern.find_at_start(number) else {
            return false;
        };
        let match_end = matched.end();
        if let Some(captures) = self.regexps.capturing_digit_pattern.captures(&number[match_end..]) {
            let digit = self.normalize_digits_only(captures.get(1).map_or("", |m| m.as_str()));
            if digit == "0" {
                return false;
            }
        }
        number.drain(..match_end);
        true
    }

    /// Reads up to three leading digits as a country calling code known to
    /// the index. The input must already be normalized.
    fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            return None;
        }
        for digits in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            if let Ok(potential_country_code) = full_number[..digits].parse::<i32>() {
                if self.index.has_country_code(potential_country_code) {
                    return Some((potential_country_code, &full_number[digits..]));
                }
            }
        }
        None
    }

    /// Strips any national prefix (and carrier selection code) off a
    /// normalized national number, keeping the strip only when the result
    /// is no less valid than the input. Returns the carrier code when one
    /// was captured.
    fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &mut String,
        metadata: &PhoneMetadata,
    ) -> Option<String> {
        if number.is_empty() {
            return None;
        }
        let possible_national_prefix = metadata
            .national_prefix_for_parsing
            .as_deref()
            .or(metadata.national_prefix.as_deref())?;
        let prefix_pattern =
            self.regex(&fast_cat::concat_str!("^(?:", possible_national_prefix, ")"))?;
        let captures = prefix_pattern.captures_at_start(number)?;

        let general_desc = &metadata.general_desc;
        let is_viable_original_number =
            self.matcher.match_national_number(number, general_desc, false);
        let num_of_groups = captures.len() - 1;
        let last_group_present = num_of_groups > 0 && captures.get(num_of_groups).is_some();

        match metadata.national_prefix_transform_rule.as_deref() {
            // Transform rules only apply when their referenced group took
            // part in the match.
            Some(transform_rule) if last_group_present => {
                let mut transformed_number = String::new();
                captures.expand(transform_rule, &mut transformed_number);
                transformed_number.push_str(&number[captures.get(0)?.end()..]);
                if is_viable_original_number
                    && !self
                        .matcher
                        .match_national_number(&transformed_number, general_desc, false)
                {
                    return None;
                }
                let carrier_code = if num_of_groups > 1 {
                    captures.get(1).map(|m| m.as_str().to_owned())
                } else {
                    None
                };
                *number = transformed_number;
                carrier_code
            }
            _ => {
                let stripped_number = number[captures.get(0)?.end()..].to_owned();
                if is_viable_original_number
                    && !self
                        .matcher
                        .match_national_number(&stripped_number, general_desc, false)
                {
                    return None;
                }
                let carrier_code = if last_group_present {
                    captures.get(1).map(|m| m.as_str().to_owned())
                } else {
                    None
                };
                *number = stripped_number;
                carrier_code
            }
        }
    }

    // ------------------------------------------------------------------
    // Classifier
    // ------------------------------------------------------------------

    /// The region a number belongs to, resolved deterministically: index
    /// order first, then leading digits, then the type test.
    pub fn get_region_code_for_number(&self, number: &PhoneNumber) -> Option<&str> {
        let country_code = number.country_code();
        let regions: Vec<&str> = self
            .index
            .region_codes_for_country_code(country_code)?
            .collect();
        if regions.len() == 1 {
            return Some(regions[0]);
        }
        let national_number = self.get_national_significant_number(number);
        for region_code in regions {
            let Some(metadata) = self.metadata_for_region_or_calling_code(country_code, region_code)
            else {
                continue;
            };
            if let Some(leading_digits) = metadata.leading_digits.as_deref() {
                if let Some(leading_digits_pattern) = self.regex(leading_digits) {
                    if leading_digits_pattern.matches_at_start(&national_number) {
                        return Some(region_code);
                    }
                }
            } else if self.get_number_type_helper(&national_number, &metadata)
                != PhoneNumberType::Unknown
            {
                return Some(region_code);
            }
        }
        None
    }

    /// Determines the type of a number, or `Unknown` when its region
    /// cannot be established or its patterns match nothing.
    pub fn get_number_type(&self, number: &PhoneNumber) -> PhoneNumberType {
        let Some(region_code) = self.get_region_code_for_number(number) else {
            return PhoneNumberType::Unknown;
        };
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_number = self.get_national_significant_number(number);
        self.get_number_type_helper(&national_number, &metadata)
    }

    /// The category ladder over a national significant number and its
    /// candidate metadata.
    pub(crate) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self
            .matcher
            .match_number_desc(national_number, &metadata.general_desc)
        {
            return PhoneNumberType::Unknown;
        }
        for number_type in TYPE_PRIORITY {
            let desc = get_number_desc_by_type(metadata, number_type);
            if self.matcher.match_number_desc(national_number, desc) {
                return number_type;
            }
        }
        if self
            .matcher
            .match_number_desc(national_number, &metadata.fixed_line)
        {
            if metadata.same_mobile_and_fixed_line_pattern {
                return PhoneNumberType::FixedLineOrMobile;
            }
            if self
                .matcher
                .match_number_desc(national_number, &metadata.mobile)
            {
                return PhoneNumberType::FixedLineOrMobile;
            }
            return PhoneNumberType::FixedLine;
        }
        if !metadata.same_mobile_and_fixed_line_pattern
            && self
                .matcher
                .match_number_desc(national_number, &metadata.mobile)
        {
            return PhoneNumberType::Mobile;
        }
        PhoneNumberType::Unknown
    }

    /// Whether a number is tied to a geographic area: fixed lines always,
    /// mobiles only in plans that assign them geographically.
    pub fn is_number_geographical(&self, number: &PhoneNumber) -> bool {
        let number_type = self.get_number_type(number);
        number_type == PhoneNumberType::FixedLine
            || number_type == PhoneNumberType::FixedLineOrMobile
            || (self
                .regexps
                .geo_mobile_countries
                .contains(&number.country_code())
                && number_type == PhoneNumberType::Mobile)
    }

    // ------------------------------------------------------------------
    // Validator
    // ------------------------------------------------------------------

    /// Full validation against the region's patterns.
    pub fn is_valid_number(&self, number: &PhoneNumber) -> bool {
        let Some(region_code) = self.get_region_code_for_number(number) else {
            return false;
        };
        self.is_valid_number_for_region(number, region_code)
    }

    /// Full validation pinned to a region: a number valid elsewhere is
    /// invalid here.
    pub fn is_valid_number_for_region(
        &self,
        number: &PhoneNumber,
        region_code: impl AsRef<str>,
    ) -> bool {
        let region_code = region_code.as_ref();
        let country_code = number.country_code();
        let Some(metadata) = self.metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if region_code != REGION_CODE_FOR_NON_GEO_ENTITY && metadata.country_code != country_code {
            return false;
        }
        let national_number = self.get_national_significant_number(number);
        if metadata.general_desc.national_number_pattern.is_none() {
            // Fall back to the ITU length range when the region's shape is
            // unknown.
            return (MIN_LENGTH_FOR_NSN..=MAX_LENGTH_FOR_NSN).contains(&national_number.len());
        }
        self.get_number_type_helper(&national_number, &metadata) != PhoneNumberType::Unknown
    }

    /// A fast plausibility check, less strict than [`Self::is_valid_number`].
    pub fn is_possible_number(&self, number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(number).is_possible()
    }

    /// Plausibility with a reason: the length-class sieve of the general
    /// descriptor, or the ITU length range when the sieve is absent.
    pub fn is_possible_number_with_reason(&self, number: &PhoneNumber) -> ValidationResult {
        let country_code = number.country_code();
        if !self.index.has_country_code(country_code) {
            return ValidationResult::InvalidCountryCode;
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let Some(metadata) = self.metadata_for_region_or_calling_code(country_code, region_code)
        else {
            // The code is indexed but its record is unavailable; nothing
            // can be said about the number's shape.
            return ValidationResult::InvalidCountryCode;
        };
        let national_number = self.get_national_significant_number(number);
        match metadata.general_desc.possible_number_pattern.as_deref() {
            Some(pattern) => self.test_number_length_against_pattern(pattern, &national_number),
            None => self.test_number_length_against_range(&national_number),
        }
    }

    fn test_number_length_against_pattern(
        &self,
        pattern: &str,
        national_number: &str,
    ) -> ValidationResult {
        let Some(regex) = self.regex(pattern) else {
            return self.test_number_length_against_range(national_number);
        };
        if regex.full_match(national_number) {
            ValidationResult::IsPossible
        } else if regex.matches_at_start(national_number) {
            ValidationResult::TooLong
        } else {
            ValidationResult::TooShort
        }
    }

    fn test_number_length_against_range(&self, national_number: &str) -> ValidationResult {
        if national_number.len() < MIN_LENGTH_FOR_NSN {
            ValidationResult::TooShort
        } else if national_number.len() > MAX_LENGTH_FOR_NSN {
            ValidationResult::TooLong
        } else {
            ValidationResult::IsPossible
        }
    }

    /// Whether the number can be dialled from outside its region.
    pub fn can_be_internationally_dialled(&self, number: &PhoneNumber) -> bool {
        let Some(region_code) = self.get_region_code_for_number(number) else {
            // Nothing known about the number; assume dialable.
            return true;
        };
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(number.country_code(), region_code)
        else {
            return true;
        };
        let national_number = self.get_national_significant_number(number);
        !self
            .matcher
            .match_number_desc(&national_number, &metadata.no_international_dialling)
    }

    // ------------------------------------------------------------------
    // Example numbers
    // ------------------------------------------------------------------

    /// A valid fixed-line example number for the region.
    pub fn get_example_number(
        &self,
        region_code: impl AsRef<str>,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    /// A valid example number of the given type for the region.
    pub fn get_example_number_for_type(
        &self,
        region_code: impl AsRef<str>,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let region_code = region_code.as_ref();
        let metadata = self
            .metadata_for_region(region_code)
            .ok_or(GetExampleNumberError::InvalidRegionCode)?;
        let desc = get_number_desc_by_type(&metadata, number_type);
        let example_number = desc
            .example_number
            .as_deref()
            .ok_or(GetExampleNumberError::NoExampleNumber)?;
        Ok(self.parse(example_number, region_code)?)
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    /// Formats a number in the requested format. Numbers whose calling
    /// code is unknown render as their bare national significant number.
    pub fn format(&self, number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        let country_calling_code = number.country_code();
        let national_significant_number = self.get_national_significant_number(number);
        if number_format == PhoneNumberFormat::E164 {
            // Early exit: E164 needs no formatting rules and no extension.
            let mut formatted_number = national_significant_number;
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return formatted_number;
        }
        if !self.index.has_country_code(country_calling_code) {
            return national_significant_number;
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number =
            self.format_nsn(&national_significant_number, &metadata, number_format);
        self.maybe_append_formatted_extension(
            number,
            &metadata,
            number_format,
            &mut formatted_number,
        );
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        formatted_number
    }

    fn format_nsn(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> String {
        // International formats only differ from national ones where an
        // intl list is materialized.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        let Some(chosen_format) =
            self.choose_formatting_pattern_for_number(available_formats, national_number)
        else {
            return national_number.to_owned();
        };
        self.format_nsn_using_pattern(
            national_number,
            chosen_format,
            number_format,
            metadata.national_prefix.as_deref(),
        )
    }

    fn choose_formatting_pattern_for_number<'a>(
        &self,
        available_formats: &'a [NumberFormat],
        national_number: &str,
    ) -> Option<&'a NumberFormat> {
        // Rules are tried in their declared sequence; the first whose
        // leading-digits prefix and full pattern both hold is chosen.
        for number_format in available_formats {
            if let Some(leading_digits) = number_format.leading_digits_patterns.first() {
                let Some(leading_digits_pattern) = self.regex(leading_digits) else {
                    continue;
                };
                if !leading_digits_pattern.matches_at_start(national_number) {
                    continue;
                }
            }
            let Some(pattern) = self.regex(&number_format.pattern) else {
                continue;
            };
            if pattern.full_match(national_number) {
                return Some(number_format);
            }
        }
        None
    }

    fn format_nsn_using_pattern(
        &self,
        national_number: &str,
        formatting_rule: &NumberFormat,
        number_format: PhoneNumberFormat,
        national_prefix: Option<&str>,
    ) -> String {
        let Some(pattern) = self.regex(&formatting_rule.pattern) else {
            return national_number.to_owned();
        };
        let mut number_format_rule = formatting_rule.format.clone();
        if number_format == PhoneNumberFormat::National {
            if let (Some(national_prefix), Some(formatting_rule)) = (
                national_prefix.filter(|p| !p.is_empty()),
                formatting_rule
                    .national_prefix_formatting_rule
                    .as_deref()
                    .filter(|r| !r.is_empty()),
            ) {
                // Substitute the first group reference with the national
                // prefix formatting rule, expanded in place.
                if let Some(first_group) = self
                    .regexps
                    .first_group_capturing_pattern
                    .find(&number_format_rule)
                {
                    let expanded = formatting_rule
                        .replace("$NP", national_prefix)
                        .replace("$FG", first_group.as_str());
                    number_format_rule.replace_range(first_group.range(), &expanded);
                }
            }
        }
        let mut formatted_number = pattern
            .replace(national_number, number_format_rule.as_str())
            .into_owned();
        if number_format == PhoneNumberFormat::RFC3966 {
            formatted_number = self
                .regexps
                .separator_pattern
                .replace_all(&formatted_number, "-")
                .into_owned();
        }
        formatted_number
    }

    fn maybe_append_formatted_extension(
        &self,
        number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        formatted_number: &mut String,
    ) {
        let Some(extension) = number.extension().filter(|e| !e.is_empty()) else {
            return;
        };
        if number_format == PhoneNumberFormat::RFC3966 {
            formatted_number.push_str(RFC3966_EXTN_PREFIX);
        } else if let Some(preferred_extn_prefix) = metadata.preferred_extn_prefix.as_deref() {
            formatted_number.push_str(preferred_extn_prefix);
        } else {
            formatted_number.push_str(DEFAULT_EXTN_PREFIX);
        }
        formatted_number.push_str(extension);
    }

    // ------------------------------------------------------------------
    // Number matching
    // ------------------------------------------------------------------

    /// Compares two numbers for identity over their core fields.
    pub fn is_number_match(
        &self,
        first_number: &PhoneNumber,
        second_number: &PhoneNumber,
    ) -> MatchType {
        let mut first_number = copy_core_fields_only(first_number);
        let second_number = copy_core_fields_only(second_number);
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }
        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number == second_number {
                return MatchType::ExactMatch;
            }
            if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                // A match of this sort can be the same number dialled with
                // and without its national prefix.
                return MatchType::ShortNsnMatch;
            }
            return MatchType::NoMatch;
        }
        // At least one side carries no country code; compare nationally.
        first_number.set_country_code(second_number_country_code);
        if first_number == second_number {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Compares a parsed number against a raw string.
    pub fn is_number_match_with_one_string(
        &self,
        first_number: &PhoneNumber,
        second_number: impl AsRef<str>,
    ) -> Result<MatchType, ParseError> {
        let second_number = second_number.as_ref();
        match self.parse(second_number, UNKNOWN_REGION) {
            Ok(second_number) => Ok(self.is_number_match(first_number, &second_number)),
            Err(ParseError::InvalidCountryCode) => {
                // The string has no country code of its own: borrow the
                // region of the parsed number, downgrading an exact match
                // accordingly.
                let region_code =
                    self.get_region_code_for_country_code(first_number.country_code());
                if region_code != UNKNOWN_REGION {
                    let second_number = self.parse(second_number, region_code)?;
                    let match_type = self.is_number_match(first_number, &second_number);
                    if match_type == MatchType::ExactMatch {
                        return Ok(MatchType::NsnMatch);
                    }
                    Ok(match_type)
                } else {
                    let second_number =
                        self.parse_helper(second_number, UNKNOWN_REGION, false, false)?;
                    Ok(self.is_number_match(first_number, &second_number))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Compares two raw strings.
    pub fn is_number_match_with_two_strings(
        &self,
        first_number: impl AsRef<str>,
        second_number: impl AsRef<str>,
    ) -> Result<MatchType, ParseError> {
        let (first_number, second_number) = (first_number.as_ref(), second_number.as_ref());
        match self.parse(first_number, UNKNOWN_REGION) {
            Ok(first_number) => self.is_number_match_with_one_string(&first_number, second_number),
            Err(ParseError::InvalidCountryCode) => match self.parse(second_number, UNKNOWN_REGION) {
                Ok(second_number) => {
                    self.is_number_match_with_one_string(&second_number, first_number)
                }
                Err(ParseError::InvalidCountryCode) => {
                    let first_number =
                        self.parse_helper(first_number, UNKNOWN_REGION, false, false)?;
                    let second_number =
                        self.parse_helper(second_number, UNKNOWN_REGION, false, false)?;
                    Ok(self.is_number_match(&first_number, &second_number))
                }
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}
