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

use serde::{Deserialize, Serialize};

/// How the country calling code of a parsed number was established.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryCodeSource {
    /// The number began with a plus sign (or its full-width variant).
    FromNumberWithPlusSign,
    /// The number began with an international direct dialling prefix.
    FromNumberWithIdd,
    /// The number carried its country code without any prefix.
    FromNumberWithoutPlusSign,
    /// The code was inferred from the default region passed to the parser.
    #[default]
    FromDefaultCountry,
}

/// The neutral carrier of a parsed phone number.
///
/// Two instances are equal iff every attribute matches; in particular the
/// leading-zero flag is part of identity, so `+39 0236618300` and a
/// hypothetical `+39 236618300` never compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    country_code: i32,
    national_number: u64,
    /// A literal `0` prefixing the decimal rendering of the national
    /// number. Kept out of `national_number` because an integer cannot
    /// carry it.
    italian_leading_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    extension: Option<String>,
    country_code_source: CountryCodeSource,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new(country_code: i32, national_number: u64) -> Self {
        Self {
            country_code,
            national_number,
            ..Self::default()
        }
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = country_code;
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = national_number;
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    pub fn set_italian_leading_zero(&mut self, italian_leading_zero: bool) {
        self.italian_leading_zero = italian_leading_zero;
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = Some(extension.into());
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) {
        self.country_code_source = source;
    }

    pub fn preferred_domestic_carrier_code(&self) -> Option<&str> {
        self.preferred_domestic_carrier_code.as_deref()
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: impl Into<String>) {
        self.preferred_domestic_carrier_code = Some(carrier_code.into());
    }
}
