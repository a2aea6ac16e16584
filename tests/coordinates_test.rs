use airscrape_normalize::{dms_to_decimal, NormalizeError};

// Infobox coordinates of the fixture airports, with their decimal values
const COORDINATES: &[(&str, f64)] = &[
    ("17°20′56″S", -17.348888888888887),
    ("145°30′44″W", -145.51222222222222),
    ("52°18′29″N", 52.308055555555555),
    ("4°45′50″E", 4.763888888888889),
    ("22°48′36″S", -22.810000000000002),
    ("43°15′02″W", -43.25055555555556),
    ("22°54′37″S", -22.910277777777775),
    ("43°09′47″W", -43.16305555555555),
    ("49°00′35″N", 49.00972222222222),
    ("2°32′52″E", 2.5477777777777777),
    ("12°01′19″S", -12.021944444444445),
    ("77°06′52″W", -77.11444444444444),
    ("17°33′24″S", -17.55666666666667),
    ("149°36′41″W", -149.61138888888888),
];

#[test]
fn converts_fixture_coordinates_exactly() {
    for (dms, expected) in COORDINATES {
        let actual = dms_to_decimal(dms).unwrap();
        assert_eq!(
            actual, *expected,
            "{dms} was not properly converted, expected {expected} and got {actual}"
        );
    }
}

#[test]
fn conversion_is_deterministic() {
    for (dms, _) in COORDINATES {
        assert_eq!(dms_to_decimal(dms).unwrap(), dms_to_decimal(dms).unwrap());
    }
}

#[test]
fn sign_matches_hemisphere() {
    for (dms, _) in COORDINATES {
        let value = dms_to_decimal(dms).unwrap();
        let negative = dms.ends_with('S') || dms.ends_with('W');
        assert_eq!(value < 0.0, negative, "{dms}");
    }
}

#[test]
fn malformed_strings_propagate_parse_errors() {
    let err = dms_to_decimal("seventeen south").unwrap_err();
    assert!(matches!(err, NormalizeError::Parse { .. }));
    assert!(err.to_string().contains("seventeen south"));
}
