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

use strum::IntoEnumIterator;

use crate::metadata::{PhoneMetadata, PhoneNumberDesc};
use crate::phonenumber::PhoneNumber;

use super::enums::{PhoneNumberFormat, PhoneNumberType};
use super::helper_constants::{
    DIGITS, OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
    POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
};

/// Returns the description inside the metadata of the appropriate type.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// Returns the types for which data exists in the given metadata. Never
/// reports `FixedLineOrMobile` (a convenience type) or `Unknown` (the
/// non-type).
pub(super) fn get_supported_types_for_metadata(
    metadata: &PhoneMetadata,
) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| get_number_desc_by_type(metadata, *number_type).has_data())
        .collect()
}

/// A helper used by the formatter: prepends the country calling code in
/// the shape the target format requires.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    match number_format {
        PhoneNumberFormat::E164 => {
            let new_str =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, &formatted_number);
            *formatted_number = new_str;
        }
        PhoneNumberFormat::International => {
            let new_str =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, " ", &formatted_number);
            *formatted_number = new_str;
        }
        PhoneNumberFormat::RFC3966 => {
            let new_str = fast_cat::concat_str!(
                RFC3966_PREFIX,
                PLUS_SIGN,
                country_calling_code_str,
                "-",
                &formatted_number
            );
            *formatted_number = new_str;
        }
        PhoneNumberFormat::National => {}
    }
}

/// Returns true when one national number is the suffix of the other or
/// both are the same.
pub(super) fn is_national_number_suffix_of_the_other(
    first_number: &PhoneNumber,
    second_number: &PhoneNumber,
) -> bool {
    let mut buf = itoa::Buffer::new();
    let first_number_national_number = buf.format(first_number.national_number()).to_owned();
    let mut buf = itoa::Buffer::new();
    let second_number_national_number = buf.format(second_number.national_number());
    first_number_national_number.ends_with(second_number_national_number)
        || second_number_national_number.ends_with(&first_number_national_number)
}

/// Returns a new phone number containing only the fields needed to
/// uniquely identify it, rather than any fields capturing the context in
/// which it was parsed.
pub(crate) fn copy_core_fields_only(from_number: &PhoneNumber) -> PhoneNumber {
    let mut to_number = PhoneNumber::new(from_number.country_code(), from_number.national_number());
    if let Some(extension) = from_number.extension() {
        if !extension.is_empty() {
            to_number.set_extension(extension);
        }
    }
    to_number.set_italian_leading_zero(from_number.italian_leading_zero());
    to_number
}

/// Helper for constructing extension expressions: captures up to
/// `max_length` digits.
pub(super) fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    let max_length_str = buf.format(max_length);
    fast_cat::concat_str!("([", DIGITS, "]{1,", max_length_str, "})")
}

// Helper initialiser method to create the regular-expression pattern to
// match extensions. Note that the only capturing groups should be around
// the digits that are wanted as part of the extension, or else parsing
// will fail.
pub(super) fn create_extn_pattern(for_parsing: bool) -> String {
    // Extensions are capped at 7 digits to match what the number model can
    // carry; the bare North-American "- 123#" form is more ambiguous, so it
    // is capped lower still.
    let ext_limit_after_label = 7;
    let ext_limit_when_not_sure = 5;

    // Canonical equivalence is not an option here, so non-ASCII characters
    // like the accented o of "anexo" appear both precomposed and in the
    // decomposed form with a combining acute accent.

    // Labels that call the extension out explicitly.
    let explicit_ext_labels =
        "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|anexo)";
    // One-character symbols and less commonly used or more ambiguous
    // labels.
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";
    // When the extension is not separated clearly.
    let ambiguous_separator = "[- ]+";

    let rfc_extn = fast_cat::concat_str!(RFC3966_EXTN_PREFIX, &extn_digits(ext_limit_after_label));
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_label),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_label),
        OPTIONAL_EXT_SUFFIX
    );
    let american_style_extn_with_suffix = fast_cat::concat_str!(
        ambiguous_separator,
        &extn_digits(ext_limit_when_not_sure),
        "#"
    );

    // The first alternative covers RFC 3966 ";ext=". The second covers
    // explicit labels like "ext:". The third covers single-character labels
    // and the more ambiguous words. The fourth covers the American style
    // where the extension trails as "- 503#".
    let extension_pattern = fast_cat::concat_str!(
        &rfc_extn,
        "|",
        &explicit_extn,
        "|",
        &ambiguous_extn,
        "|",
        &american_style_extn_with_suffix
    );

    // When parsing we additionally accept a bare comma, commonly used for
    // auto-dialling the extension once connected. Not accepted when
    // matching numbers in text.
    if for_parsing {
        let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\\t]*";
        let auto_dialling_extn = fast_cat::concat_str!(
            possible_separators_number_ext_label_no_comma,
            "(?:,)+",
            POSSIBLE_CHARS_AFTER_EXT_LABEL,
            &extn_digits(ext_limit_after_label),
            OPTIONAL_EXT_SUFFIX
        );
        return fast_cat::concat_str!(&extension_pattern, "|", &auto_dialling_extn);
    }
    extension_pattern
}

// Full-width ASCII letters fold to their halfwidth equivalents before the
// mapping lookup, so "ＭＩＣＲＯＳＯＦＴ" normalizes like "MICROSOFT".
fn fold_fullwidth_alpha(c: char) -> char {
    match c {
        '\u{FF21}'..='\u{FF3A}' => char::from_u32(c as u32 - 0xFF21 + 'A' as u32).unwrap_or(c),
        '\u{FF41}'..='\u{FF5A}' => char::from_u32(c as u32 - 0xFF41 + 'a' as u32).unwrap_or(c),
        _ => c,
    }
}

/// Normalizes a string of characters representing a phone number by
/// replacing every character found in the accompanying map with the value
/// therein, and stripping all other characters if `remove_non_matches` is
/// true.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &mut String,
) {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        let folded = fold_fullwidth_alpha(phone_char).to_ascii_uppercase();
        if let Some(replacement) = normalization_replacements.get(&folded) {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // Neither replaced nor kept: the character is dropped.
    }
    *phone_number = normalized_number;
}
