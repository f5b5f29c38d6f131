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

//! Internal seams that isolate the underlying implementations of the
//! matcher and the metadata source, so either can be swapped without
//! touching the engine.

use crate::metadata::PhoneMetadata;
use crate::metadata::PhoneNumberDesc;

/// Phone-number matching API.
pub(crate) trait MatcherApi: Send + Sync {
    /// Returns whether the given national number (a string containing only
    /// decimal digits) matches the national number pattern defined in the
    /// given [`PhoneNumberDesc`].
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool;

    /// Returns whether the number satisfies the descriptor in full: the
    /// possible-number sieve and the national pattern, both anchored.
    fn match_number_desc(&self, number: &str, number_desc: &PhoneNumberDesc) -> bool;
}

/// Where materialized metadata records come from. The store consults a
/// source exactly once per key and memoizes whatever it answers.
///
/// `key` is either an ISO 3166-1 alpha-2 region code or the decimal string
/// of a non-geographical country calling code.
pub trait MetadataSource: Send + Sync {
    /// Materialize the record for `key`, or report it unavailable. This
    /// must not panic; any read or parse failure is an absence.
    fn load(&self, key: &str) -> Option<PhoneMetadata>;
}
