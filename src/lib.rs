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

//! Parsing, validation, classification and formatting of international
//! phone numbers against per-region numbering-plan metadata.
//!
//! The entry point is [`PhoneNumberUtil`]; construct one per process (or
//! per metadata configuration) and share it between threads.

mod interfaces;
pub mod metadata;
mod phonenumber;
mod phonenumberutil;
mod regex_based_matcher;
mod regexp_cache;

pub use interfaces::MetadataSource;
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{
    enums::{MatchType, PhoneNumberFormat, PhoneNumberType, ValidationResult},
    errors::{ExtractNumberError, GetExampleNumberError, NotANumberError, ParseError},
    phonenumberutil::PhoneNumberUtil,
    DEFAULT_METADATA_PREFIX, PHONE_NUMBER_UTIL,
};

mod tests;
