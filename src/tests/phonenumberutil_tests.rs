use crate::metadata::{
    FileMetadataSource, InMemoryMetadataSource, PhoneMetadata, PhoneNumberDesc, RegionMap,
    RegionRecord, UNKNOWN_REGION,
};
use crate::{
    CountryCodeSource, MatchType, NotANumberError, ParseError, PhoneNumber, PhoneNumberFormat,
    PhoneNumberType, PhoneNumberUtil, ValidationResult,
};

use super::region_code::RegionCode;
use super::test_metadata::{desc, get_phone_util, TEST_REGION_MAP};

// ----------------------------------------------------------------------
// Normalizer & viability
// ----------------------------------------------------------------------

#[test]
fn is_viable_phone_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_viable_phone_number("1-800-MICROSOFT"));
    assert!(phone_util.is_viable_phone_number("+41 44 668 1800"));
    assert!(phone_util.is_viable_phone_number("1\u{00A0}234"));
    assert!(!phone_util.is_viable_phone_number("12"));
    assert!(!phone_util.is_viable_phone_number(""));
    // An invalid control character makes the whole string non-viable.
    assert!(!phone_util.is_viable_phone_number("+44\u{0096}2087654321"));
}

#[test]
fn viable_numbers_contain_at_least_three_digits() {
    let phone_util = get_phone_util();
    for input in ["1-800-MICROSOFT", "+41 44 668 1800", "011 44 7912345678"] {
        assert!(phone_util.is_viable_phone_number(input));
        assert!(input.len() >= 3);
        assert!(phone_util.normalize_digits_only(input).len() >= 3);
    }
}

#[test]
fn normalize_replaces_alpha_characters() {
    let phone_util = get_phone_util();
    assert_eq!(phone_util.normalize("1-800-MICROSOFT"), "1800642767638");
    // Full-width letters fold before the keypad lookup.
    assert_eq!(
        phone_util.normalize("1-800-\u{FF2D}\u{FF29}\u{FF23}\u{FF32}\u{FF2F}"),
        "180064276"
    );
    // Fewer than three letters: the digits-only path strips them instead.
    assert_eq!(phone_util.normalize("1-800-ab-1234"), "18001234");
    // Only digits remain, so the result carries no letters at all.
    assert!(phone_util
        .normalize("1-800-MICROSOFT")
        .chars()
        .all(|c| c.is_ascii_digit()));
}

#[test]
fn normalize_digits_only_folds_unicode_digits() {
    let phone_util = get_phone_util();
    // Full-width digits.
    assert_eq!(
        phone_util.normalize_digits_only("\u{FF11}\u{FF12}\u{FF13}"),
        "123"
    );
    // Arabic-Indic digits.
    assert_eq!(phone_util.normalize_digits_only("١٢٣"), "123");
    // Extended Arabic-Indic digits.
    assert_eq!(phone_util.normalize_digits_only("۱۲۳"), "123");
    assert_eq!(phone_util.normalize_digits_only("034-56&+a#234"), "03456234");
}

#[test]
fn normalize_digits_only_is_idempotent() {
    let phone_util = get_phone_util();
    for input in ["\u{FF11}2٣4", "+1 (650) 253-0000", "1-800-MICROSOFT", ""] {
        let once = phone_util.normalize_digits_only(input);
        assert_eq!(phone_util.normalize_digits_only(&once), once);
    }
}

#[test]
fn convert_alpha_characters_in_number_keeps_separators() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.convert_alpha_characters_in_number("1-800-FLOWERS"),
        "1-800-3569377"
    );
}

#[test]
fn is_alpha_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_alpha_number("1800 six-flags"));
    assert!(phone_util.is_alpha_number("1800 six-flags ext. 1234"));
    assert!(!phone_util.is_alpha_number("1800 123-1234"));
    // Two letters are not enough.
    assert!(!phone_util.is_alpha_number("1800 ix-flags"));
    assert!(!phone_util.is_alpha_number("ab"));
}

// ----------------------------------------------------------------------
// Extension stripping
// ----------------------------------------------------------------------

#[test]
fn maybe_strip_extension() {
    let phone_util = get_phone_util();

    let mut number = "1234567 ext. 89".to_owned();
    assert_eq!(
        phone_util.maybe_strip_extension(&mut number).as_deref(),
        Some("89")
    );
    assert_eq!(number, "1234567");

    let mut number = "1234567;ext=89".to_owned();
    assert_eq!(
        phone_util.maybe_strip_extension(&mut number).as_deref(),
        Some("89")
    );
    assert_eq!(number, "1234567");

    let mut number = "1234567-89#".to_owned();
    assert_eq!(
        phone_util.maybe_strip_extension(&mut number).as_deref(),
        Some("89")
    );
    assert_eq!(number, "1234567");

    // No extension tail: the number is left untouched.
    let mut number = "1234567".to_owned();
    assert_eq!(phone_util.maybe_strip_extension(&mut number), None);
    assert_eq!(number, "1234567");

    // The remainder must stay viable for the tail to count as extension.
    let mut number = "12 ext. 34".to_owned();
    assert_eq!(phone_util.maybe_strip_extension(&mut number), None);
    assert_eq!(number, "12 ext. 34");
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.extract_possible_number("Tel:0800-345-600").unwrap(),
        "0800-345-600"
    );
    assert_eq!(
        phone_util.extract_possible_number("030-456-234 .").unwrap(),
        "030-456-234"
    );
    // Extraction starts at the first digit; a second extension marks the
    // start of another number.
    assert_eq!(
        phone_util
            .extract_possible_number("(530) 583-6985 x302/x2303")
            .unwrap(),
        "530) 583-6985 x302"
    );
    assert!(phone_util.extract_possible_number("Num").is_err());
}

// ----------------------------------------------------------------------
// Parsing
// ----------------------------------------------------------------------

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 1);
    assert_eq!(number.national_number(), 6502530000);
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromDefaultCountry
    );

    let number = phone_util.parse("(650) 253-0000", RegionCode::us()).unwrap();
    assert_eq!(number.national_number(), 6502530000);
}

#[test]
fn parse_with_plus_sign() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+1 650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 1);
    assert_eq!(number.national_number(), 6502530000);
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromNumberWithPlusSign
    );

    // Full-width plus sign.
    let number = phone_util
        .parse("\u{FF0B}1 650 253 0000", RegionCode::us())
        .unwrap();
    assert_eq!(number.national_number(), 6502530000);

    // A foreign number parses against any default region when written
    // internationally.
    let number = phone_util.parse("+44 7912 345 678", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 44);
    assert_eq!(number.national_number(), 7912345678);
}

#[test]
fn parse_with_idd() {
    let phone_util = get_phone_util();
    let number = phone_util
        .parse("011 44 7912345678", RegionCode::us())
        .unwrap();
    assert_eq!(number.country_code(), 44);
    assert_eq!(number.national_number(), 7912345678);
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromNumberWithIdd
    );
}

#[test]
fn parse_number_carrying_its_own_country_code() {
    let phone_util = get_phone_util();
    // "1 650 253 0000" as dialled domestically carries the NANPA code.
    let number = phone_util.parse("1 650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 1);
    assert_eq!(number.national_number(), 6502530000);
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromNumberWithoutPlusSign
    );
}

#[test]
fn parse_strips_national_prefix() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("07912 345 678", RegionCode::gb()).unwrap();
    assert_eq!(number.country_code(), 44);
    assert_eq!(number.national_number(), 7912345678);
    assert!(!number.italian_leading_zero());

    let number = phone_util.parse("030 123456", RegionCode::de()).unwrap();
    assert_eq!(number.national_number(), 30123456);
}

#[test]
fn parse_applies_transform_rule() {
    let phone_util = get_phone_util();
    // The Argentinian mobile token: 0343 15 555 1212 is +54 9 343 555 1212.
    let number = phone_util
        .parse("0343 15 555 1212", RegionCode::ar())
        .unwrap();
    assert_eq!(number.country_code(), 54);
    assert_eq!(number.national_number(), 93435551212);

    let same_number = phone_util
        .parse("+54 9 343 555 1212", RegionCode::ar())
        .unwrap();
    assert_eq!(number.national_number(), same_number.national_number());
}

#[test]
fn parse_preserves_italian_leading_zero() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+39 0236618300", RegionCode::it()).unwrap();
    assert_eq!(number.country_code(), 39);
    assert_eq!(number.national_number(), 236618300);
    assert!(number.italian_leading_zero());
    assert_eq!(
        phone_util.get_national_significant_number(&number),
        "0236618300"
    );
}

#[test]
fn parse_extracts_extension() {
    let phone_util = get_phone_util();
    let number = phone_util
        .parse("(650) 253-0000 ext. 234", RegionCode::us())
        .unwrap();
    assert_eq!(number.national_number(), 6502530000);
    assert_eq!(number.extension(), Some("234"));

    let number = phone_util
        .parse("+1 6502530000;ext=234", RegionCode::us())
        .unwrap();
    assert_eq!(number.extension(), Some("234"));

    // Commas auto-dial an extension once connected.
    let number = phone_util
        .parse("6502530000,,1234", RegionCode::us())
        .unwrap();
    assert_eq!(number.extension(), Some("1234"));
}

#[test]
fn parse_rfc3966_input() {
    let phone_util = get_phone_util();
    let number = phone_util
        .parse("tel:253-0000;phone-context=+1650", RegionCode::us())
        .unwrap();
    assert_eq!(number.national_number(), 6502530000);

    let number = phone_util
        .parse("tel:+1-650-253-0000;isub=12345", RegionCode::us())
        .unwrap();
    assert_eq!(number.national_number(), 6502530000);

    assert_eq!(
        phone_util.parse("tel:1234;phone-context=+", RegionCode::us()),
        Err(ParseError::NotANumber(NotANumberError::InvalidPhoneContext))
    );
}

#[test]
fn parse_and_keep_raw_input_records_carrier_code() {
    let phone_util = get_phone_util();
    // 0343 15: national prefix with a captured carrier selection group.
    let number = phone_util
        .parse_and_keep_raw_input("0343 15 555 1212", RegionCode::ar())
        .unwrap();
    assert_eq!(number.national_number(), 93435551212);
    // The transform path only records a carrier with two capture groups,
    // and this pattern has one, so no carrier code survives here.
    assert_eq!(number.preferred_domestic_carrier_code(), None);

    let plain = phone_util.parse("0343 15 555 1212", RegionCode::ar()).unwrap();
    assert_eq!(plain.preferred_domestic_carrier_code(), None);
}

#[test]
fn parse_failures() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.parse("12", RegionCode::us()),
        Err(ParseError::NotANumber(
            NotANumberError::NotMatchedValidNumberPattern
        ))
    );
    assert!(matches!(
        phone_util.parse("this is not a number", RegionCode::us()),
        Err(ParseError::NotANumber(_))
    ));
    // No default region and no plus sign.
    assert_eq!(
        phone_util.parse("123 456 7890", RegionCode::zz()),
        Err(ParseError::InvalidCountryCode)
    );
    // Country codes never start with zero.
    assert_eq!(
        phone_util.parse("+0 1234567", RegionCode::us()),
        Err(ParseError::InvalidCountryCode)
    );
    assert_eq!(
        phone_util.parse("011", RegionCode::us()),
        Err(ParseError::TooShortAfterIdd)
    );
    assert_eq!(
        phone_util.parse("+44 30", RegionCode::gb()),
        Err(ParseError::TooShortNsn)
    );
    assert_eq!(
        phone_util.parse("+1 2345678901234567", RegionCode::us()),
        Err(ParseError::TooLongNsn)
    );
    let too_long_input = "1".repeat(300);
    assert_eq!(
        phone_util.parse(&too_long_input, RegionCode::us()),
        Err(ParseError::NotANumber(NotANumberError::InputTooLong))
    );
}

// ----------------------------------------------------------------------
// Classifier
// ----------------------------------------------------------------------

#[test]
fn get_region_code_for_number_resolves_nanpa() {
    let phone_util = get_phone_util();
    let us_number = PhoneNumber::new(1, 6502530000);
    assert_eq!(
        phone_util.get_region_code_for_number(&us_number),
        Some(RegionCode::us())
    );
    let bs_number = PhoneNumber::new(1, 2423651234);
    assert_eq!(
        phone_util.get_region_code_for_number(&bs_number),
        Some(RegionCode::bs())
    );
}

#[test]
fn get_region_code_for_number_uses_leading_digits() {
    let phone_util = get_phone_util();
    let yt_number = PhoneNumber::new(262, 269601234);
    assert_eq!(
        phone_util.get_region_code_for_number(&yt_number),
        Some(RegionCode::yt())
    );
    let re_number = PhoneNumber::new(262, 262161234);
    assert_eq!(
        phone_util.get_region_code_for_number(&re_number),
        Some(RegionCode::re())
    );
}

#[test]
fn get_region_code_for_number_handles_unknown_and_non_geo() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.get_region_code_for_number(&PhoneNumber::new(999, 123456789)),
        None
    );
    assert_eq!(
        phone_util.get_region_code_for_number(&PhoneNumber::new(800, 12345678)),
        Some(RegionCode::un001())
    );
}

#[test]
fn number_type_ladder_priority() {
    let phone_util = get_phone_util();
    let classify =
        |national_number| phone_util.get_number_type(&PhoneNumber::new(44, national_number));
    assert_eq!(classify(9012345678), PhoneNumberType::PremiumRate);
    assert_eq!(classify(8012345678), PhoneNumberType::TollFree);
    assert_eq!(classify(8431234567), PhoneNumberType::SharedCost);
    assert_eq!(classify(5612345678), PhoneNumberType::VoIP);
    assert_eq!(classify(7012345678), PhoneNumberType::PersonalNumber);
    assert_eq!(classify(7612345678), PhoneNumberType::Pager);
    assert_eq!(classify(5512345678), PhoneNumberType::UAN);
    assert_eq!(classify(7912345678), PhoneNumberType::Mobile);
    assert_eq!(classify(1212345678), PhoneNumberType::FixedLine);
}

#[test]
fn number_type_fixed_line_or_mobile_when_patterns_identical() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.get_number_type(&PhoneNumber::new(1, 6502530000)),
        PhoneNumberType::FixedLineOrMobile
    );
    assert_eq!(
        phone_util.get_number_type(&PhoneNumber::new(1, 8004567890)),
        PhoneNumberType::TollFree
    );
}

#[test]
fn number_type_ignores_emergency_category() {
    let phone_util = get_phone_util();
    // Brazilian short-number metadata: toll-free short codes classify,
    // emergency numbers do not surface in the public taxonomy.
    let metadata = PhoneMetadata {
        id: "BR".to_owned(),
        country_code: 0,
        same_mobile_and_fixed_line_pattern: true,
        general_desc: desc(r"1\d{2,4}", r"\d{3,5}"),
        toll_free: desc(r"1(?:00|81)", r"\d{3}"),
        emergency: desc(r"190|911", r"\d{3}"),
        ..PhoneMetadata::default()
    };
    assert_eq!(
        phone_util.get_number_type_helper("181", &metadata),
        PhoneNumberType::TollFree
    );
    assert_eq!(
        phone_util.get_number_type_helper("190", &metadata),
        PhoneNumberType::Unknown
    );
}

#[test]
fn na_sentinel_never_matches() {
    let phone_util = get_phone_util();
    // A desc whose patterns were the NA sentinel cooks to absent patterns
    // and must not classify anything.
    let metadata = PhoneMetadata {
        id: "XX".to_owned(),
        country_code: 0,
        general_desc: desc(r"\d{3}", r"\d{3}"),
        toll_free: PhoneNumberDesc::default(),
        ..PhoneMetadata::default()
    };
    assert_eq!(
        phone_util.get_number_type_helper("123", &metadata),
        PhoneNumberType::Unknown
    );
    assert_eq!(
        phone_util.get_number_type_helper("NA", &metadata),
        PhoneNumberType::Unknown
    );
}

#[test]
fn is_number_geographical() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_number_geographical(&PhoneNumber::new(1, 6502530000)));
    assert!(!phone_util.is_number_geographical(&PhoneNumber::new(1, 8004567890)));
    // Argentinian mobiles are geographically assigned.
    assert!(phone_util.is_number_geographical(&PhoneNumber::new(54, 91123456789)));
}

// ----------------------------------------------------------------------
// Validator
// ----------------------------------------------------------------------

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number(&PhoneNumber::new(1, 6502530000)));
    assert!(phone_util.is_valid_number(&PhoneNumber::new(44, 7912345678)));
    assert!(phone_util.is_valid_number(&PhoneNumber::new(800, 12345678)));
    assert!(phone_util.is_valid_number(&PhoneNumber::new(54, 91123456789)));

    let mut italian_number = PhoneNumber::new(39, 236618300);
    italian_number.set_italian_leading_zero(true);
    assert!(phone_util.is_valid_number(&italian_number));
    // Without its leading zero the same digits are not a valid number.
    assert!(!phone_util.is_valid_number(&PhoneNumber::new(39, 236618300)));

    assert!(!phone_util.is_valid_number(&PhoneNumber::new(1, 2530000)));
    assert!(!phone_util.is_valid_number(&PhoneNumber::new(999, 123456789)));
}

#[test]
fn is_valid_number_for_region_pins_the_region() {
    let phone_util = get_phone_util();
    let us_number = PhoneNumber::new(1, 6502530000);
    assert!(phone_util.is_valid_number_for_region(&us_number, RegionCode::us()));
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::bs()));
    // Country code mismatch fails regardless of patterns.
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::gb()));
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::zz()));
    // Non-geographical numbers validate through the "001" region.
    let toll_free = PhoneNumber::new(800, 12345678);
    assert!(phone_util.is_valid_number_for_region(&toll_free, RegionCode::un001()));
}

#[test]
fn is_valid_number_falls_back_to_itu_range_without_general_pattern() {
    const MAP: RegionMap = &[(41, &["CH"])];
    let metadata = PhoneMetadata {
        id: "CH".to_owned(),
        country_code: 41,
        ..PhoneMetadata::default()
    };
    let phone_util = PhoneNumberUtil::with_source_and_region_map(
        Box::new(InMemoryMetadataSource::new([metadata])),
        MAP,
    );
    assert!(phone_util.is_valid_number_for_region(&PhoneNumber::new(41, 446681800), "CH"));
    assert!(!phone_util.is_valid_number_for_region(&PhoneNumber::new(41, 12), "CH"));
    assert!(
        !phone_util.is_valid_number_for_region(&PhoneNumber::new(41, 4466818001234567), "CH")
    );
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, 6502530000)),
        ValidationResult::IsPossible
    );
    assert_eq!(
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(999, 123456789)),
        ValidationResult::InvalidCountryCode
    );
    assert_eq!(
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, 253000)),
        ValidationResult::TooShort
    );
    assert_eq!(
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, 65025300000)),
        ValidationResult::TooLong
    );
}

#[test]
fn possible_is_weaker_than_valid() {
    let phone_util = get_phone_util();
    // A 7-digit US number has a possible length but no valid pattern.
    let local_number = PhoneNumber::new(1, 2530000);
    assert!(phone_util.is_possible_number(&local_number));
    assert!(!phone_util.is_valid_number(&local_number));
}

#[test]
fn every_valid_example_number_is_possible() {
    let phone_util = get_phone_util();
    let mut regions: Vec<String> = phone_util
        .get_supported_regions()
        .map(str::to_owned)
        .collect();
    regions.sort();
    for region in regions {
        let Some(types) = phone_util.get_supported_types_for_region(&region) else {
            continue;
        };
        for number_type in types {
            let Ok(example) = phone_util.get_example_number_for_type(&region, number_type) else {
                continue;
            };
            assert!(
                phone_util.is_valid_number(&example),
                "example for {region}/{number_type:?} should be valid"
            );
            assert!(
                phone_util.is_possible_number(&example),
                "valid implies possible for {region}/{number_type:?}"
            );
        }
    }
}

#[test]
fn can_be_internationally_dialled() {
    let phone_util = get_phone_util();
    // US 800 numbers are marked no-international-dialling.
    assert!(!phone_util.can_be_internationally_dialled(&PhoneNumber::new(1, 8002530000)));
    assert!(phone_util.can_be_internationally_dialled(&PhoneNumber::new(1, 6502530000)));
    // Regions without the descriptor dial everywhere.
    assert!(phone_util.can_be_internationally_dialled(&PhoneNumber::new(44, 7912345678)));
}

// ----------------------------------------------------------------------
// Country-code index
// ----------------------------------------------------------------------

#[test]
fn region_and_calling_code_queries() {
    let phone_util = get_phone_util();
    assert_eq!(phone_util.get_region_code_for_country_code(1), RegionCode::us());
    assert_eq!(phone_util.get_region_code_for_country_code(44), RegionCode::gb());
    assert_eq!(
        phone_util.get_region_code_for_country_code(800),
        RegionCode::un001()
    );
    assert_eq!(
        phone_util.get_region_code_for_country_code(999),
        RegionCode::zz()
    );

    assert_eq!(phone_util.get_country_code_for_region(RegionCode::us()), Some(1));
    assert_eq!(phone_util.get_country_code_for_region(RegionCode::yt()), Some(262));
    assert_eq!(phone_util.get_country_code_for_region(RegionCode::zz()), None);
    assert_eq!(phone_util.get_country_code_for_region(RegionCode::un001()), None);

    let nanpa_regions: Vec<&str> = phone_util
        .get_region_codes_for_country_calling_code(1)
        .unwrap()
        .collect();
    assert_eq!(nanpa_regions, ["US", "BS"]);
}

#[test]
fn supported_region_invariants() {
    let phone_util = get_phone_util();
    for region in phone_util.get_supported_regions() {
        let country_code = phone_util
            .get_country_code_for_region(region)
            .expect("supported regions must have a country code");
        let regions: Vec<&str> = phone_util
            .get_region_codes_for_country_calling_code(country_code)
            .expect("the code must be indexed")
            .collect();
        assert!(regions.contains(&region));
    }
}

#[test]
fn shared_calling_codes_have_exactly_one_main_region() {
    let phone_util = get_phone_util();
    for (country_code, regions) in TEST_REGION_MAP {
        if regions.len() == 1 {
            continue;
        }
        let main_count = regions
            .iter()
            .filter_map(|region| phone_util.metadata_for_region(region))
            .filter(|metadata| metadata.main_country_for_code)
            .count();
        assert_eq!(main_count, 1, "calling code {country_code}");
    }
}

#[test]
fn is_nanpa_country() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::gb()));
    assert!(!phone_util.is_nanpa_country(RegionCode::zz()));
}

#[test]
fn supported_types_queries() {
    let phone_util = get_phone_util();
    let us_types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .unwrap();
    assert!(us_types.contains(&PhoneNumberType::FixedLine));
    assert!(us_types.contains(&PhoneNumberType::TollFree));
    assert!(!us_types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!us_types.contains(&PhoneNumberType::Unknown));

    let toll_free_types = phone_util.get_supported_types_for_non_geo_entity(800).unwrap();
    assert_eq!(
        toll_free_types,
        [PhoneNumberType::TollFree].into_iter().collect()
    );
    let premium_types = phone_util.get_supported_types_for_non_geo_entity(979).unwrap();
    assert_eq!(
        premium_types,
        [PhoneNumberType::PremiumRate].into_iter().collect()
    );
    assert!(phone_util.get_supported_types_for_non_geo_entity(999).is_none());
    assert!(phone_util
        .get_supported_types_for_region(RegionCode::zz())
        .is_none());
}

// ----------------------------------------------------------------------
// Non-geographical numbering plans
// ----------------------------------------------------------------------

#[test]
fn non_geographical_plans_validate_through_001() {
    let phone_util = get_phone_util();
    assert_ne!(phone_util.get_region_code_for_country_code(800), RegionCode::zz());
    assert!(phone_util.metadata_for_non_geographical_region(800).is_some());
    assert!(phone_util.metadata_for_non_geographical_region(44).is_none());
    assert!(phone_util.metadata_for_region(RegionCode::un001()).is_none());

    let number = phone_util.parse("+800 1234 5678", RegionCode::zz()).unwrap();
    assert_eq!(number.country_code(), 800);
    assert!(phone_util.is_valid_number(&number));
    assert_eq!(
        phone_util.get_number_type(&number),
        PhoneNumberType::TollFree
    );

    let premium = phone_util.parse("+979 123 456 789", RegionCode::zz()).unwrap();
    assert_eq!(
        phone_util.get_number_type(&premium),
        PhoneNumberType::PremiumRate
    );
    assert!(!phone_util.is_number_geographical(&premium));
}

// ----------------------------------------------------------------------
// Formatting
// ----------------------------------------------------------------------

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(1, 6502530000);
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::E164),
        "+16502530000"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "(650) 253-0000"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::International),
        "+1 650 253 0000"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::RFC3966),
        "tel:+1-650-253-0000"
    );
    // Short numbers fall through to the first matching rule.
    assert_eq!(
        phone_util.format(&PhoneNumber::new(1, 2530000), PhoneNumberFormat::National),
        "253 0000"
    );
}

#[test]
fn format_applies_national_prefix_rule() {
    let phone_util = get_phone_util();
    let mobile = PhoneNumber::new(44, 7912345678);
    assert_eq!(
        phone_util.format(&mobile, PhoneNumberFormat::National),
        "07912 345 678"
    );
    assert_eq!(
        phone_util.format(&mobile, PhoneNumberFormat::International),
        "+44 7912 345 678"
    );
    let fixed = PhoneNumber::new(44, 1212345678);
    assert_eq!(
        phone_util.format(&fixed, PhoneNumberFormat::National),
        "(012) 1234 5678"
    );
}

#[test]
fn format_keeps_italian_leading_zero() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new(39, 236618300);
    number.set_italian_leading_zero(true);
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "02 3661 8300"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::E164),
        "+390236618300"
    );
}

#[test]
fn format_appends_extension() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new(1, 6502530000);
    number.set_extension("1234");
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "(650) 253-0000 ext. 1234"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::RFC3966),
        "tel:+1-650-253-0000;ext=1234"
    );
    // E164 never carries the extension.
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::E164),
        "+16502530000"
    );
}

#[test]
fn format_non_geographical_and_unknown() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(800, 12345678);
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::International),
        "+800 1234 5678"
    );
    // An unknown calling code degrades to the bare NSN.
    assert_eq!(
        phone_util.format(&PhoneNumber::new(999, 123456789), PhoneNumberFormat::National),
        "123456789"
    );
}

// ----------------------------------------------------------------------
// Example numbers
// ----------------------------------------------------------------------

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();
    let example = phone_util.get_example_number(RegionCode::us()).unwrap();
    assert_eq!(example.country_code(), 1);
    assert!(phone_util.is_valid_number(&example));

    let gb_mobile = phone_util
        .get_example_number_for_type(RegionCode::gb(), PhoneNumberType::Mobile)
        .unwrap();
    assert_eq!(gb_mobile.national_number(), 7912345678);

    assert!(phone_util.get_example_number(RegionCode::zz()).is_err());
    assert!(phone_util
        .get_example_number_for_type(RegionCode::gb(), PhoneNumberType::VoiceMail)
        .is_err());
}

// ----------------------------------------------------------------------
// Number matching
// ----------------------------------------------------------------------

#[test]
fn is_number_match() {
    let phone_util = get_phone_util();
    let first = phone_util.parse("+1 650-253 0000", RegionCode::us()).unwrap();
    let second = phone_util.parse("+16502530000", RegionCode::zz()).unwrap();
    assert_eq!(
        phone_util.is_number_match(&first, &second),
        MatchType::ExactMatch
    );

    let other = phone_util.parse("+44 7912 345 678", RegionCode::zz()).unwrap();
    assert_eq!(phone_util.is_number_match(&first, &other), MatchType::NoMatch);

    // Same calling code, one NSN a suffix of the other.
    let short = PhoneNumber::new(1, 2530000);
    assert_eq!(
        phone_util.is_number_match(&first, &short),
        MatchType::ShortNsnMatch
    );

    // Differing extensions block the match.
    let mut with_ext = first.clone();
    with_ext.set_extension("123");
    let mut other_ext = first.clone();
    other_ext.set_extension("456");
    assert_eq!(
        phone_util.is_number_match(&with_ext, &other_ext),
        MatchType::NoMatch
    );
}

#[test]
fn is_number_match_with_strings() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util
            .is_number_match_with_two_strings("+1 650 253 0000", "+16502530000")
            .unwrap(),
        MatchType::ExactMatch
    );
    // No country code on either side: a national-level match.
    assert_eq!(
        phone_util
            .is_number_match_with_two_strings("650 253 0000", "650-253-0000")
            .unwrap(),
        MatchType::NsnMatch
    );

    let first = phone_util.parse("+1 6502530000", RegionCode::us()).unwrap();
    // The second side borrows the first's region; exact downgrades to NSN.
    assert_eq!(
        phone_util
            .is_number_match_with_one_string(&first, "650 253 0000")
            .unwrap(),
        MatchType::NsnMatch
    );
    assert_eq!(
        phone_util
            .is_number_match_with_one_string(&first, "253 0000")
            .unwrap(),
        MatchType::ShortNsnMatch
    );
    assert!(phone_util
        .is_number_match_with_two_strings("asdfasdf", "+16502530000")
        .is_err());
}

// ----------------------------------------------------------------------
// File-backed metadata
// ----------------------------------------------------------------------

#[test]
fn file_backed_source_end_to_end() {
    let dir = std::env::temp_dir().join("numplan-integration-test");
    std::fs::create_dir_all(&dir).unwrap();
    let prefix = dir.join("PhoneNumberMetadata");

    // Materialize only the US record; every other region stays absent.
    let us_metadata = super::test_metadata::test_metadata()
        .into_iter()
        .find(|m| m.id == "US")
        .unwrap();
    let record = RegionRecord::from(&us_metadata);
    std::fs::write(
        dir.join("PhoneNumberMetadata_US.json"),
        serde_json::to_string_pretty(&record).unwrap(),
    )
    .unwrap();

    let phone_util = PhoneNumberUtil::with_source_and_region_map(
        Box::new(FileMetadataSource::new(&prefix)),
        TEST_REGION_MAP,
    );

    let number = phone_util.parse("+1 650 253 0000", UNKNOWN_REGION).unwrap();
    assert!(phone_util.is_valid_number_for_region(&number, RegionCode::us()));

    // GB is indexed but has no file: lookups degrade, nothing panics.
    assert!(phone_util.metadata_for_region(RegionCode::gb()).is_none());
    let gb_number = PhoneNumber::new(44, 7912345678);
    assert!(!phone_util.is_valid_number(&gb_number));
    assert_eq!(
        phone_util.get_number_type(&gb_number),
        PhoneNumberType::Unknown
    );
}
