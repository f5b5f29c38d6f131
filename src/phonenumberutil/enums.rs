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

use strum::EnumIter;

/// Defines the various standardized formats for representing phone numbers.
///
/// `International` and `National` formats align with the ITU-T E.123
/// recommendation, but use local conventions such as hyphens instead of
/// spaces for separators.
///
/// For example, a Swiss office number would be:
/// - **International**: `+41 44 668 1800`
/// - **National**: `044 668 1800`
/// - **E164**: `+41446681800` (international format without formatting)
/// - **RFC3966**: `tel:+41-44-668-1800` (hyphen-separated, "tel:" prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// E.164 format: `+` followed by the country code and the national
    /// significant number, with no separators.
    E164,
    /// International format with the country code and readable separators.
    International,
    /// National format as dialled within the number's own country, possibly
    /// with a national prefix.
    National,
    /// RFC 3966 "tel:" link format with hyphen separators.
    RFC3966,
}

/// Categorizes phone numbers based on their primary use.
///
/// Emergency, short-code, standard-rate and no-international-dialling
/// descriptors exist in the region metadata but are deliberately not part
/// of this taxonomy; a number matching only one of those classifies as
/// `Unknown`.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    /// Traditional landline numbers tied to a geographic location.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Used in regions (e.g. the USA) where fixed-line and mobile numbers
    /// cannot be told apart by the number alone.
    FixedLineOrMobile,
    /// Freephone lines, paid for by the recipient.
    TollFree,
    /// Lines charging a higher rate than normal calls.
    PremiumRate,
    /// Call cost shared between caller and recipient.
    SharedCost,
    /// Voice-over-IP numbers, including TSoIP.
    VoIP,
    /// A number associated with a person rather than a line, routed to
    /// wherever its owner configures.
    PersonalNumber,
    /// A pager number.
    Pager,
    /// "Universal Access Numbers" routing one company number to many
    /// destinations.
    UAN,
    /// Voicemail access numbers.
    VoiceMail,
    /// The number does not match any known pattern for its region.
    Unknown,
}

/// Describes the degree of similarity between two phone numbers.
///
/// The NOT_A_NUMBER outcome of the original API is surfaced as a
/// `ParseError` by the string-accepting match operations rather than as a
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// The two numbers are entirely different.
    NoMatch,
    /// One national significant number is a trailing portion of the other.
    /// For example, `2530000` is a short match for `6502530000`.
    ShortNsnMatch,
    /// The numbers share the same NSN but the country code is absent or
    /// different on one side.
    NsnMatch,
    /// Identical country code, NSN and extension.
    ExactMatch,
}

/// Possible outcomes when testing whether a phone number is possible, i.e.
/// whether its national significant number has a plausible shape for its
/// region, short of full validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// The number has a length that matches valid numbers for this region.
    IsPossible,
    /// The number has an invalid country calling code.
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    TooShort,
    /// The number is longer than all valid numbers for this region.
    TooLong,
}

impl ValidationResult {
    /// Whether the outcome counts as a possible number.
    pub fn is_possible(&self) -> bool {
        matches!(self, ValidationResult::IsPossible)
    }
}
