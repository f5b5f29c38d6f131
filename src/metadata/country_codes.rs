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

//! The static country-calling-code index.
//!
//! The vendored table maps every country calling code to its region codes
//! in priority order; the head of each list is the main region for the
//! code. `"001"` entries are non-geographical numbering plans (universal
//! freephone, shared-cost services, satellite networks and the like).

use std::collections::{HashMap, HashSet};

/// Region code designating an unknown region.
pub const UNKNOWN_REGION: &str = "ZZ";

/// Region code reserved for non-geographical entities, e.g. the universal
/// international freephone service (+800).
pub const REGION_CODE_FOR_NON_GEO_ENTITY: &str = "001";

/// A borrowed calling-code → region-codes mapping; the vendored table
/// below is the production instance, tests substitute their own.
pub type RegionMap = &'static [(i32, &'static [&'static str])];

/// Calling code to region codes, head of each list first in priority.
/// Derived from the ITU assignments; regenerated alongside the metadata.
pub const COUNTRY_CODE_TO_REGION_CODE: RegionMap = &[
    (1, &[
        "US", "AG", "AI", "AS", "BB", "BM", "BS", "CA", "DM", "DO", "GD", "GU", "JM", "KN", "KY",
        "LC", "MP", "MS", "PR", "SX", "TC", "TT", "VC", "VG", "VI",
    ]),
    (7, &["RU", "KZ"]),
    (20, &["EG"]),
    (27, &["ZA"]),
    (30, &["GR"]),
    (31, &["NL"]),
    (32, &["BE"]),
    (33, &["FR"]),
    (34, &["ES"]),
    (36, &["HU"]),
    (39, &["IT", "VA"]),
    (40, &["RO"]),
    (41, &["CH"]),
    (43, &["AT"]),
    (44, &["GB", "GG", "IM", "JE"]),
    (45, &["DK"]),
    (46, &["SE"]),
    (47, &["NO", "SJ"]),
    (48, &["PL"]),
    (49, &["DE"]),
    (51, &["PE"]),
    (52, &["MX"]),
    (53, &["CU"]),
    (54, &["AR"]),
    (55, &["BR"]),
    (56, &["CL"]),
    (57, &["CO"]),
    (58, &["VE"]),
    (60, &["MY"]),
    (61, &["AU", "CC", "CX"]),
    (62, &["ID"]),
    (63, &["PH"]),
    (64, &["NZ"]),
    (65, &["SG"]),
    (66, &["TH"]),
    (81, &["JP"]),
    (82, &["KR"]),
    (84, &["VN"]),
    (86, &["CN"]),
    (90, &["TR"]),
    (91, &["IN"]),
    (92, &["PK"]),
    (93, &["AF"]),
    (94, &["LK"]),
    (95, &["MM"]),
    (98, &["IR"]),
    (211, &["SS"]),
    (212, &["MA", "EH"]),
    (213, &["DZ"]),
    (216, &["TN"]),
    (218, &["LY"]),
    (220, &["GM"]),
    (221, &["SN"]),
    (222, &["MR"]),
    (223, &["ML"]),
    (224, &["GN"]),
    (225, &["CI"]),
    (226, &["BF"]),
    (227, &["NE"]),
    (228, &["TG"]),
    (229, &["BJ"]),
    (230, &["MU"]),
    (231, &["LR"]),
    (232, &["SL"]),
    (233, &["GH"]),
    (234, &["NG"]),
    (235, &["TD"]),
    (236, &["CF"]),
    (237, &["CM"]),
    (238, &["CV"]),
    (239, &["ST"]),
    (240, &["GQ"]),
    (241, &["GA"]),
    (242, &["CG"]),
    (243, &["CD"]),
    (244, &["AO"]),
    (245, &["GW"]),
    (246, &["IO"]),
    (247, &["AC"]),
    (248, &["SC"]),
    (249, &["SD"]),
    (250, &["RW"]),
    (251, &["ET"]),
    (252, &["SO"]),
    (253, &["DJ"]),
    (254, &["KE"]),
    (255, &["TZ"]),
    (256, &["UG"]),
    (257, &["BI"]),
    (258, &["MZ"]),
    (260, &["ZM"]),
    (261, &["MG"]),
    (262, &["RE", "YT"]),
    (263, &["ZW"]),
    (264, &["NA"]),
    (265, &["MW"]),
    (266, &["LS"]),
    (267, &["BW"]),
    (268, &["SZ"]),
    (269, &["KM"]),
    (290, &["SH", "TA"]),
    (291, &["ER"]),
    (297, &["AW"]),
    (298, &["FO"]),
    (299, &["GL"]),
    (350, &["GI"]),
    (351, &["PT"]),
    (352, &["LU"]),
    (353, &["IE"]),
    (354, &["IS"]),
    (355, &["AL"]),
    (356, &["MT"]),
    (357, &["CY"]),
    (358, &["FI", "AX"]),
    (359, &["BG"]),
    (370, &["LT"]),
    (371, &["LV"]),
    (372, &["EE"]),
    (373, &["MD"]),
    (374, &["AM"]),
    (375, &["BY"]),
    (376, &["AD"]),
    (377, &["MC"]),
    (378, &["SM"]),
    (380, &["UA"]),
    (381, &["RS"]),
    (382, &["ME"]),
    (383, &["XK"]),
    (385, &["HR"]),
    (386, &["SI"]),
    (387, &["BA"]),
    (389, &["MK"]),
    (420, &["CZ"]),
    (421, &["SK"]),
    (423, &["LI"]),
    (500, &["FK"]),
    (501, &["BZ"]),
    (502, &["GT"]),
    (503, &["SV"]),
    (504, &["HN"]),
    (505, &["NI"]),
    (506, &["CR"]),
    (507, &["PA"]),
    (508, &["PM"]),
    (509, &["HT"]),
    (590, &["GP", "BL", "MF"]),
    (591, &["BO"]),
    (592, &["GY"]),
    (593, &["EC"]),
    (594, &["GF"]),
    (595, &["PY"]),
    (596, &["MQ"]),
    (597, &["SR"]),
    (598, &["UY"]),
    (599, &["CW", "BQ"]),
    (670, &["TL"]),
    (672, &["NF"]),
    (673, &["BN"]),
    (674, &["NR"]),
    (675, &["PG"]),
    (676, &["TO"]),
    (677, &["SB"]),
    (678, &["VU"]),
    (679, &["FJ"]),
    (680, &["PW"]),
    (681, &["WF"]),
    (682, &["CK"]),
    (683, &["NU"]),
    (685, &["WS"]),
    (686, &["KI"]),
    (687, &["NC"]),
    (688, &["TV"]),
    (689, &["PF"]),
    (690, &["TK"]),
    (691, &["FM"]),
    (692, &["MH"]),
    (800, &["001"]),
    (808, &["001"]),
    (850, &["KP"]),
    (852, &["HK"]),
    (853, &["MO"]),
    (855, &["KH"]),
    (856, &["LA"]),
    (870, &["001"]),
    (878, &["001"]),
    (880, &["BD"]),
    (881, &["001"]),
    (882, &["001"]),
    (883, &["001"]),
    (886, &["TW"]),
    (888, &["001"]),
    (960, &["MV"]),
    (961, &["LB"]),
    (962, &["JO"]),
    (963, &["SY"]),
    (964, &["IQ"]),
    (965, &["KW"]),
    (966, &["SA"]),
    (967, &["YE"]),
    (968, &["OM"]),
    (970, &["PS"]),
    (971, &["AE"]),
    (972, &["IL"]),
    (973, &["BH"]),
    (974, &["QA"]),
    (975, &["BT"]),
    (976, &["MN"]),
    (977, &["NP"]),
    (979, &["001"]),
    (992, &["TJ"]),
    (993, &["TM"]),
    (994, &["AZ"]),
    (995, &["GE"]),
    (996, &["KG"]),
    (998, &["UZ"]),
];

/// Bidirectional lookup over a region map, built once at construction and
/// read-only afterwards.
pub struct CountryCodeIndex {
    country_calling_code_to_region_codes: HashMap<i32, Vec<String>>,
    supported_regions: HashSet<String>,
    non_geographical_codes: HashSet<i32>,
}

impl CountryCodeIndex {
    pub fn new() -> Self {
        Self::from_map(COUNTRY_CODE_TO_REGION_CODE)
    }

    pub fn from_map(map: RegionMap) -> Self {
        let mut country_calling_code_to_region_codes =
            HashMap::with_capacity(map.len());
        let mut supported_regions = HashSet::with_capacity(map.len());
        let mut non_geographical_codes = HashSet::new();

        for (calling_code, regions) in map {
            let regions: Vec<String> = regions.iter().map(|r| (*r).to_owned()).collect();
            for region in &regions {
                if region == REGION_CODE_FOR_NON_GEO_ENTITY {
                    non_geographical_codes.insert(*calling_code);
                } else {
                    supported_regions.insert(region.clone());
                }
            }
            country_calling_code_to_region_codes.insert(*calling_code, regions);
        }

        Self {
            country_calling_code_to_region_codes,
            supported_regions,
            non_geographical_codes,
        }
    }

    /// The first region in the list for this code, or `"ZZ"`.
    pub fn region_code_for_country_code(&self, country_code: i32) -> &str {
        self.country_calling_code_to_region_codes
            .get(&country_code)
            .and_then(|regions| regions.first())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_REGION)
    }

    pub fn region_codes_for_country_code(
        &self,
        country_code: i32,
    ) -> Option<impl ExactSizeIterator<Item = &str>> {
        self.country_calling_code_to_region_codes
            .get(&country_code)
            .map(|regions| regions.iter().map(String::as_str))
    }

    pub fn has_country_code(&self, country_code: i32) -> bool {
        self.country_calling_code_to_region_codes
            .contains_key(&country_code)
    }

    pub fn is_supported_region(&self, region_code: &str) -> bool {
        self.supported_regions.contains(region_code)
    }

    pub fn is_non_geographical_code(&self, country_code: i32) -> bool {
        self.non_geographical_codes.contains(&country_code)
    }

    pub fn supported_regions(&self) -> impl ExactSizeIterator<Item = &str> {
        self.supported_regions.iter().map(String::as_str)
    }

    pub fn supported_calling_codes(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.country_calling_code_to_region_codes.keys().copied()
    }

    pub fn global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.non_geographical_codes.iter().copied()
    }
}

impl Default for CountryCodeIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_of_list_is_the_main_region() {
        let index = CountryCodeIndex::new();
        assert_eq!(index.region_code_for_country_code(1), "US");
        assert_eq!(index.region_code_for_country_code(44), "GB");
        assert_eq!(index.region_code_for_country_code(262), "RE");
    }

    #[test]
    fn unknown_code_yields_zz() {
        let index = CountryCodeIndex::new();
        assert_eq!(index.region_code_for_country_code(999), UNKNOWN_REGION);
        assert!(!index.has_country_code(999));
    }

    #[test]
    fn non_geographical_codes_resolve_to_001() {
        let index = CountryCodeIndex::new();
        assert_eq!(
            index.region_code_for_country_code(800),
            REGION_CODE_FOR_NON_GEO_ENTITY
        );
        assert!(index.is_non_geographical_code(800));
        // 001 is never a supported geographic region.
        assert!(!index.is_supported_region(REGION_CODE_FOR_NON_GEO_ENTITY));
    }

    #[test]
    fn every_region_maps_back_to_its_calling_code() {
        let index = CountryCodeIndex::new();
        for (calling_code, regions) in COUNTRY_CODE_TO_REGION_CODE {
            let listed: Vec<&str> = index
                .region_codes_for_country_code(*calling_code)
                .expect("vendored code must be indexed")
                .collect();
            assert_eq!(&listed[..], *regions);
        }
    }
}
