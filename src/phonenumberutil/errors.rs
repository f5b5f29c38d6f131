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

use std::num::ParseIntError;

use thiserror::Error;

/// Failures surfaced while turning a string into a [`crate::PhoneNumber`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The number's country calling code could not be established, either
    /// because none was present and no valid default region was supplied, or
    /// because the extracted code is not in the country-code index.
    #[error("Invalid country code")]
    InvalidCountryCode,
    #[error("Not a number: {0}")]
    NotANumber(#[from] NotANumberError),
    /// The string started with an international direct dialling prefix, but
    /// after stripping it too few digits remained to contain a country code
    /// and a number.
    #[error("Too short after IDD")]
    TooShortAfterIdd,
    /// The national significant number is shorter than the minimum.
    #[error("Too short NSN")]
    TooShortNsn,
    /// The national significant number is longer than the maximum.
    #[error("Too long NSN")]
    TooLongNsn,
}

/// The reasons an input string fails the "looks like a phone number at all"
/// bar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotANumberError {
    #[error("Number did not match the valid phone number pattern")]
    NotMatchedValidNumberPattern,
    #[error("Invalid RFC3966 phone-context")]
    InvalidPhoneContext,
    #[error("Input exceeds the maximum parseable length")]
    InputTooLong,
    #[error("{0}")]
    FailedToParseNumberAsInt(#[from] ParseIntError),
    #[error("{0}")]
    FailedToExtractNumber(#[from] ExtractNumberError),
}

/// Failures of the pre-parse scan that carves a candidate number out of
/// free-form input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ExtractNumberError {
    #[error("No valid start character found")]
    NoValidStartCharacter,
    #[error("Invalid number")]
    NotANumber,
}

/// Failures when requesting an example number for a region or type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GetExampleNumberError {
    #[error("Parse error: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("No example number in the metadata")]
    NoExampleNumber,
    #[error("Invalid region code provided")]
    InvalidRegionCode,
}

impl From<ExtractNumberError> for ParseError {
    fn from(value: ExtractNumberError) -> Self {
        NotANumberError::FailedToExtractNumber(value).into()
    }
}
