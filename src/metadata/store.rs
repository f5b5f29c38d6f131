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

use std::sync::Arc;

use dashmap::DashMap;
use log::warn;

use crate::interfaces::MetadataSource;

use super::country_codes::CountryCodeIndex;
use super::model::PhoneMetadata;

/// Lazy, memoizing façade over a [`MetadataSource`].
///
/// Each key is consulted at most once; the answer, including absence, is
/// cached for the life of the process. Entries are immutable after
/// publication, so concurrent readers only contend on the first touch of
/// a key.
pub struct MetadataStore {
    source: Box<dyn MetadataSource>,
    cache: DashMap<String, Option<Arc<PhoneMetadata>>>,
}

impl MetadataStore {
    pub fn new(source: Box<dyn MetadataSource>) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    /// Metadata for a geographic region. Unsupported regions are answered
    /// without touching the source.
    pub fn metadata_for_region(
        &self,
        index: &CountryCodeIndex,
        region_code: &str,
    ) -> Option<Arc<PhoneMetadata>> {
        if !index.is_supported_region(region_code) {
            return None;
        }
        self.load_cached(region_code)
    }

    /// Metadata for a non-geographical numbering plan, keyed by its
    /// country calling code.
    pub fn metadata_for_non_geographical_region(
        &self,
        index: &CountryCodeIndex,
        country_code: i32,
    ) -> Option<Arc<PhoneMetadata>> {
        if !index.is_non_geographical_code(country_code) {
            return None;
        }
        let mut buf = itoa::Buffer::new();
        self.load_cached(buf.format(country_code))
    }

    fn load_cached(&self, key: &str) -> Option<Arc<PhoneMetadata>> {
        if let Some(cached) = self.cache.get(key) {
            return cached.value().clone();
        }
        let entry = self.cache.entry(key.to_owned()).or_insert_with(|| {
            let loaded = self.source.load(key).map(Arc::new);
            if loaded.is_none() {
                warn!("no metadata available for key {key}");
            }
            loaded
        });
        entry.value().clone()
    }
}
