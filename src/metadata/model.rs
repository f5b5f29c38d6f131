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

//! The cooked, immutable form of per-region numbering-plan metadata.
//!
//! Records are produced by the loader (see [`super::loader`]) from their
//! on-disk representation and never change after publication. Patterns are
//! kept as strings here; compilation happens through the shared
//! [`crate::regexp_cache::RegexCache`] on first use.

/// Rules for one semantic category of number within a region (fixed-line,
/// mobile, toll-free, ...).
///
/// An absent pattern means no numbers of this category exist for the
/// region; the `"NA"` file sentinel cooks down to `None` so that nothing
/// ever has to evaluate a regex that cannot match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhoneNumberDesc {
    /// Anchored pattern the full national significant number must match.
    pub national_number_pattern: Option<String>,
    /// Cheaper length-class sieve, tried before the full pattern.
    pub possible_number_pattern: Option<String>,
    /// A sample national significant number of this category.
    pub example_number: Option<String>,
}

impl PhoneNumberDesc {
    /// Whether this category exists at all for the region.
    pub fn has_data(&self) -> bool {
        self.national_number_pattern.is_some()
            || self.possible_number_pattern.is_some()
            || self.example_number.is_some()
    }
}

/// One formatting rule: numbers whose NSN matches `pattern` (and whose
/// leading digits match, where given) render through `format`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberFormat {
    pub pattern: String,
    /// Template with `$1..$N` group references.
    pub format: String,
    /// Prefix alternatives evaluated in order; the first one decides.
    pub leading_digits_patterns: Vec<String>,
    pub national_prefix_formatting_rule: Option<String>,
    pub domestic_carrier_code_formatting_rule: Option<String>,
}

/// Numbering-plan metadata for a single region, or for a non-geographical
/// calling code (id `"001"`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhoneMetadata {
    /// ISO 3166-1 alpha-2 region code, or `"001"`.
    pub id: String,
    pub country_code: i32,

    pub international_prefix: Option<String>,
    pub preferred_international_prefix: Option<String>,
    pub national_prefix: Option<String>,
    pub preferred_extn_prefix: Option<String>,
    pub national_prefix_for_parsing: Option<String>,
    pub national_prefix_transform_rule: Option<String>,

    /// Authoritative shape of any number in this region.
    pub general_desc: PhoneNumberDesc,
    pub fixed_line: PhoneNumberDesc,
    pub mobile: PhoneNumberDesc,
    pub toll_free: PhoneNumberDesc,
    pub premium_rate: PhoneNumberDesc,
    pub shared_cost: PhoneNumberDesc,
    pub voip: PhoneNumberDesc,
    pub personal_number: PhoneNumberDesc,
    pub pager: PhoneNumberDesc,
    pub uan: PhoneNumberDesc,
    pub voicemail: PhoneNumberDesc,
    // Carried for file compatibility and auxiliary predicates; the type
    // classifier never consults these.
    pub emergency: PhoneNumberDesc,
    pub short_code: PhoneNumberDesc,
    pub standard_rate: PhoneNumberDesc,
    pub no_international_dialling: PhoneNumberDesc,

    pub number_format: Vec<NumberFormat>,
    pub intl_number_format: Vec<NumberFormat>,

    /// Within a list of regions sharing a calling code, exactly one region
    /// carries this flag.
    pub main_country_for_code: bool,
    /// Prefix pattern disambiguating regions that share a calling code.
    pub leading_digits: Option<String>,
    /// The region preserves a literal `0` at the start of the NSN distinct
    /// from any national prefix (e.g. Italy).
    pub leading_zero_possible: bool,
    /// Pattern-identity hint: fixed-line and mobile share one pattern.
    pub same_mobile_and_fixed_line_pattern: bool,
}
