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

pub mod enums;
pub mod errors;
pub(crate) mod helper_constants;
mod helper_functions;
mod phone_number_regexps_and_mappings;
#[allow(clippy::module_inception)]
pub mod phonenumberutil;

use std::sync::LazyLock;

pub use enums::{MatchType, PhoneNumberFormat, PhoneNumberType, ValidationResult};

use crate::phonenumberutil::phonenumberutil::PhoneNumberUtil;

/// Where the process-wide instance looks for its metadata files.
pub const DEFAULT_METADATA_PREFIX: &str = "metadata/PhoneNumberMetadata";

/// Process-wide convenience instance over the default metadata prefix.
/// Prefer constructing a [`PhoneNumberUtil`] explicitly when the metadata
/// location is configurable.
pub static PHONE_NUMBER_UTIL: LazyLock<PhoneNumberUtil> =
    LazyLock::new(|| PhoneNumberUtil::from_prefix(DEFAULT_METADATA_PREFIX));
