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

//! On-disk record model and the file-backed metadata source.
//!
//! Files are self-describing JSON records, one region per file, addressed
//! as `<prefix>_<REGION>.json` for geographic regions and
//! `<prefix>_<CC>.json` for non-geographical calling codes. The raw record
//! layer round-trips byte-for-byte semantics (including the `"NA"`
//! sentinel); cooking converts sentinels to absence so the engine never
//! evaluates a pattern that cannot match.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::interfaces::MetadataSource;

use super::model::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

/// The file sentinel meaning "no numbers of this category exist".
pub const NO_NUMBERS_SENTINEL: &str = "NA";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_number_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_number_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_number: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatRecord {
    pub pattern: String,
    pub format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leading_digits_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_prefix_formatting_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domestic_carrier_code_formatting_rule: Option<String>,
}

/// The declarative record exactly as it sits in a metadata file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionRecord {
    pub id: String,
    pub country_code: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub international_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_international_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_extn_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_prefix_for_parsing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_prefix_transform_rule: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_desc: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_line: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_free: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_rate: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_cost: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voip: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_number: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uan: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voicemail: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_code: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_rate: Option<DescRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_international_dialling: Option<DescRecord>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub number_format: Vec<FormatRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intl_number_format: Vec<FormatRecord>,

    pub main_country_for_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_digits: Option<String>,
    pub leading_zero_possible: bool,
    pub same_mobile_and_fixed_line_pattern: bool,
}

fn cook_pattern(pattern: Option<String>) -> Option<String> {
    pattern.filter(|p| p != NO_NUMBERS_SENTINEL)
}

fn cook_desc(record: Option<DescRecord>) -> PhoneNumberDesc {
    let Some(record) = record else {
        return PhoneNumberDesc::default();
    };
    PhoneNumberDesc {
        national_number_pattern: cook_pattern(record.national_number_pattern),
        possible_number_pattern: cook_pattern(record.possible_number_pattern),
        example_number: record.example_number,
    }
}

fn cook_format(record: FormatRecord) -> NumberFormat {
    NumberFormat {
        pattern: record.pattern,
        format: record.format,
        leading_digits_patterns: record.leading_digits_patterns,
        national_prefix_formatting_rule: record.national_prefix_formatting_rule,
        domestic_carrier_code_formatting_rule: record.domestic_carrier_code_formatting_rule,
    }
}

impl RegionRecord {
    /// Convert the file form into the immutable runtime form.
    pub fn cook(self) -> PhoneMetadata {
        PhoneMetadata {
            id: self.id,
            country_code: self.country_code,
            international_prefix: self.international_prefix,
            preferred_international_prefix: self.preferred_international_prefix,
            national_prefix: self.national_prefix,
            preferred_extn_prefix: self.preferred_extn_prefix,
            national_prefix_for_parsing: self.national_prefix_for_parsing,
            national_prefix_transform_rule: self.national_prefix_transform_rule,
            general_desc: cook_desc(self.general_desc),
            fixed_line: cook_desc(self.fixed_line),
            mobile: cook_desc(self.mobile),
            toll_free: cook_desc(self.toll_free),
            premium_rate: cook_desc(self.premium_rate),
            shared_cost: cook_desc(self.shared_cost),
            voip: cook_desc(self.voip),
            personal_number: cook_desc(self.personal_number),
            pager: cook_desc(self.pager),
            uan: cook_desc(self.uan),
            voicemail: cook_desc(self.voicemail),
            emergency: cook_desc(self.emergency),
            short_code: cook_desc(self.short_code),
            standard_rate: cook_desc(self.standard_rate),
            no_international_dialling: cook_desc(self.no_international_dialling),
            number_format: self.number_format.into_iter().map(cook_format).collect(),
            intl_number_format: self
                .intl_number_format
                .into_iter()
                .map(cook_format)
                .collect(),
            main_country_for_code: self.main_country_for_code,
            leading_digits: self.leading_digits,
            leading_zero_possible: self.leading_zero_possible,
            same_mobile_and_fixed_line_pattern: self.same_mobile_and_fixed_line_pattern,
        }
    }
}

fn uncook_desc(desc: &PhoneNumberDesc) -> Option<DescRecord> {
    if !desc.has_data() {
        return None;
    }
    let sentinel = || Some(NO_NUMBERS_SENTINEL.to_owned());
    Some(DescRecord {
        national_number_pattern: desc.national_number_pattern.clone().or_else(sentinel),
        possible_number_pattern: desc.possible_number_pattern.clone().or_else(sentinel),
        example_number: desc.example_number.clone(),
    })
}

fn uncook_format(format: &NumberFormat) -> FormatRecord {
    FormatRecord {
        pattern: format.pattern.clone(),
        format: format.format.clone(),
        leading_digits_patterns: format.leading_digits_patterns.clone(),
        national_prefix_formatting_rule: format.national_prefix_formatting_rule.clone(),
        domestic_carrier_code_formatting_rule: format
            .domestic_carrier_code_formatting_rule
            .clone(),
    }
}

impl From<&PhoneMetadata> for RegionRecord {
    fn from(metadata: &PhoneMetadata) -> Self {
        RegionRecord {
            id: metadata.id.clone(),
            country_code: metadata.country_code,
            international_prefix: metadata.international_prefix.clone(),
            preferred_international_prefix: metadata.preferred_international_prefix.clone(),
            national_prefix: metadata.national_prefix.clone(),
            preferred_extn_prefix: metadata.preferred_extn_prefix.clone(),
            national_prefix_for_parsing: metadata.national_prefix_for_parsing.clone(),
            national_prefix_transform_rule: metadata.national_prefix_transform_rule.clone(),
            general_desc: uncook_desc(&metadata.general_desc),
            fixed_line: uncook_desc(&metadata.fixed_line),
            mobile: uncook_desc(&metadata.mobile),
            toll_free: uncook_desc(&metadata.toll_free),
            premium_rate: uncook_desc(&metadata.premium_rate),
            shared_cost: uncook_desc(&metadata.shared_cost),
            voip: uncook_desc(&metadata.voip),
            personal_number: uncook_desc(&metadata.personal_number),
            pager: uncook_desc(&metadata.pager),
            uan: uncook_desc(&metadata.uan),
            voicemail: uncook_desc(&metadata.voicemail),
            emergency: uncook_desc(&metadata.emergency),
            short_code: uncook_desc(&metadata.short_code),
            standard_rate: uncook_desc(&metadata.standard_rate),
            no_international_dialling: uncook_desc(&metadata.no_international_dialling),
            number_format: metadata.number_format.iter().map(uncook_format).collect(),
            intl_number_format: metadata
                .intl_number_format
                .iter()
                .map(uncook_format)
                .collect(),
            main_country_for_code: metadata.main_country_for_code,
            leading_digits: metadata.leading_digits.clone(),
            leading_zero_possible: metadata.leading_zero_possible,
            same_mobile_and_fixed_line_pattern: metadata.same_mobile_and_fixed_line_pattern,
        }
    }
}

/// File-backed source reading `<prefix>_<KEY>.json` on first touch.
pub struct FileMetadataSource {
    file_prefix: PathBuf,
}

impl FileMetadataSource {
    pub fn new(file_prefix: impl Into<PathBuf>) -> Self {
        Self {
            file_prefix: file_prefix.into(),
        }
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        let mut path = self.file_prefix.as_os_str().to_owned();
        path.push("_");
        path.push(key);
        path.push(".json");
        PathBuf::from(path)
    }
}

impl MetadataSource for FileMetadataSource {
    fn load(&self, key: &str) -> Option<PhoneMetadata> {
        let path = self.path_for_key(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("could not read metadata file {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str::<RegionRecord>(&contents) {
            Ok(record) => Some(record.cook()),
            Err(err) => {
                warn!("malformed metadata record {}: {}", path.display(), err);
                None
            }
        }
    }
}

/// Pre-materialized source for tests and embedders that carry their
/// metadata in memory.
#[derive(Default)]
pub struct InMemoryMetadataSource {
    records: HashMap<String, PhoneMetadata>,
}

impl InMemoryMetadataSource {
    pub fn new(records: impl IntoIterator<Item = PhoneMetadata>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|metadata| {
                    let key = if metadata.id == super::REGION_CODE_FOR_NON_GEO_ENTITY {
                        metadata.country_code.to_string()
                    } else {
                        metadata.id.clone()
                    };
                    (key, metadata)
                })
                .collect(),
        }
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn load(&self, key: &str) -> Option<PhoneMetadata> {
        self.records.get(key).cloned()
    }
}
