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

//! Per-region numbering-plan metadata: the record model, the country-code
//! index, the file loader and the lazy store.

mod country_codes;
pub mod loader;
mod model;
mod store;

pub use country_codes::{
    CountryCodeIndex, RegionMap, COUNTRY_CODE_TO_REGION_CODE, REGION_CODE_FOR_NON_GEO_ENTITY,
    UNKNOWN_REGION,
};
pub use loader::{FileMetadataSource, InMemoryMetadataSource, RegionRecord};
pub use model::{NumberFormat, PhoneMetadata, PhoneNumberDesc};
pub use store::MetadataStore;
