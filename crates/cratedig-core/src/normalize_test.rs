use super::*;

fn row(artist: &str, title: &str) -> InventoryRow {
    InventoryRow {
        row_number: 7,
        artist: artist.to_owned(),
        title: title.to_owned(),
        ..InventoryRow::default()
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// -----------------------------------------------------------------------
// canonical_artist
// -----------------------------------------------------------------------

#[test]
fn canonical_artist_moves_leading_the() {
    assert_eq!(canonical_artist("The Beatles"), "Beatles, The");
}

#[test]
fn canonical_artist_leaves_other_names() {
    assert_eq!(canonical_artist("Beach Boys"), "Beach Boys");
    assert_eq!(canonical_artist("Theatre of Hate"), "Theatre of Hate");
}

#[test]
fn canonical_artist_is_case_sensitive() {
    assert_eq!(canonical_artist("the cure"), "the cure");
    assert_eq!(canonical_artist("THE CLASH"), "THE CLASH");
}

#[test]
fn canonical_artist_only_moves_one_article() {
    assert_eq!(canonical_artist("The The"), "The, The");
    assert_eq!(canonical_artist("The The Band"), "The Band, The");
}

#[test]
fn canonical_artist_is_idempotent() {
    for name in ["The Beatles", "The The", "The The Band", "Queen", "  The Who  "] {
        let once = canonical_artist(name);
        assert_eq!(canonical_artist(&once), once, "not idempotent for {name:?}");
    }
}

#[test]
fn canonical_artist_trims_and_ignores_bare_article() {
    assert_eq!(canonical_artist("  The Who "), "Who, The");
    assert_eq!(canonical_artist("The "), "The");
}

// -----------------------------------------------------------------------
// parse_price / clean_price
// -----------------------------------------------------------------------

#[test]
fn parse_price_strips_symbols_and_separators() {
    assert_eq!(parse_price("$25,000.00"), Some(dec("25000.00")));
    assert_eq!(parse_price("  5.25 USD"), Some(dec("5.25")));
    assert_eq!(parse_price("€12"), Some(dec("12")));
    assert_eq!(parse_price("5."), Some(dec("5")));
}

#[test]
fn parse_price_rejects_non_numeric() {
    assert_eq!(parse_price(""), None);
    assert_eq!(parse_price("n/a"), None);
    assert_eq!(parse_price("$.-"), None);
    assert_eq!(parse_price("USD"), None);
}

#[test]
fn parse_price_ignores_dots_in_currency_words() {
    assert_eq!(parse_price("Rs. 500"), Some(dec("500")));
    assert_eq!(parse_price("approx. 20"), Some(dec("20")));
    assert_eq!(parse_price("Fr. 12.50"), Some(dec("12.50")));
    assert_eq!(parse_price("12 USD"), Some(dec("12")));
}

#[test]
fn parse_price_takes_low_end_of_range() {
    assert_eq!(parse_price("10 - 12"), Some(dec("10")));
    assert_eq!(parse_price("$10-$12"), Some(dec("10")));
    assert_eq!(parse_price("-15"), Some(dec("15")));
}

#[test]
fn parse_price_stops_at_first_numeric_run() {
    assert_eq!(parse_price("1.2.3"), Some(dec("1.2")));
    assert_eq!(parse_price("2 for 30"), Some(dec("2")));
}

#[test]
fn clean_price_defaults_to_floor() {
    assert_eq!(clean_price("call me", DEFAULT_PRICE_FLOOR), dec("2.50"));
    assert_eq!(clean_price("", DEFAULT_PRICE_FLOOR), dec("2.50"));
    assert_eq!(clean_price("$9.99", DEFAULT_PRICE_FLOOR), dec("9.99"));
    assert_eq!(clean_price("10 - 12", DEFAULT_PRICE_FLOOR), dec("10"));
}

// -----------------------------------------------------------------------
// sanitize_catalog
// -----------------------------------------------------------------------

#[test]
fn sanitize_catalog_drops_years() {
    assert_eq!(sanitize_catalog("1969"), None);
    assert_eq!(sanitize_catalog(" 19-72 "), None);
    assert_eq!(sanitize_catalog("2024"), None);
}

#[test]
fn sanitize_catalog_keeps_real_numbers() {
    assert_eq!(sanitize_catalog(" PCS 7088 "), Some("PCS 7088".to_owned()));
    assert_eq!(sanitize_catalog("1234"), Some("1234".to_owned()));
    assert_eq!(sanitize_catalog("2099"), Some("2099".to_owned()));
    assert_eq!(sanitize_catalog("   "), None);
}

// -----------------------------------------------------------------------
// normalize_row
// -----------------------------------------------------------------------

#[test]
fn normalize_row_rejects_blank_artist() {
    let err = normalize_row(&row("   ", "Abbey Road"), None, DEFAULT_PRICE_FLOOR).unwrap_err();
    assert_eq!(
        err,
        CoreError::MalformedRow {
            row: 7,
            missing: "artist"
        }
    );
}

#[test]
fn normalize_row_rejects_blank_title_and_artist() {
    let err = normalize_row(&row("", ""), None, DEFAULT_PRICE_FLOOR).unwrap_err();
    assert!(matches!(
        err,
        CoreError::MalformedRow {
            missing: "artist and title",
            ..
        }
    ));
}

#[test]
fn normalize_row_builds_query() {
    let mut input = row("The Beatles", " Abbey Road ");
    input.reference_price = "$25,000.00".to_owned();
    input.country = Some("UK".to_owned());
    input.catalog_number = Some("PCS 7088".to_owned());

    let normalized = normalize_row(&input, None, DEFAULT_PRICE_FLOOR).unwrap();
    assert_eq!(normalized.query.canonical_artist, "Beatles, The");
    assert_eq!(normalized.query.title, "Abbey Road");
    assert_eq!(normalized.query.country.as_deref(), Some("UK"));
    assert_eq!(normalized.query.catalog.as_deref(), Some("PCS 7088"));
    assert_eq!(normalized.reference_price, dec("25000.00"));
    assert!(normalized.reference_price_parsed);
}

#[test]
fn normalize_row_uses_floor_for_bad_price() {
    let mut input = row("Queen", "Jazz");
    input.reference_price = "ask".to_owned();
    let normalized = normalize_row(&input, None, DEFAULT_PRICE_FLOOR).unwrap();
    assert_eq!(normalized.reference_price, DEFAULT_PRICE_FLOOR);
    assert!(!normalized.reference_price_parsed);
}

#[test]
fn normalize_row_prefers_sheet_hint_over_extracted() {
    let mut input = row("Queen", "Jazz");
    input.ocr_hint = Some("EMA 788".to_owned());
    let normalized = normalize_row(&input, Some("ZZZ 1"), DEFAULT_PRICE_FLOOR).unwrap();
    assert_eq!(normalized.query.catalog_hint.as_deref(), Some("EMA 788"));
    assert_eq!(normalized.query.catalog.as_deref(), Some("EMA 788"));
}

#[test]
fn normalize_row_sheet_catalog_wins_for_filter() {
    let mut input = row("Queen", "Jazz");
    input.catalog_number = Some("6E-166".to_owned());
    let normalized = normalize_row(&input, Some("EMA 788"), DEFAULT_PRICE_FLOOR).unwrap();
    assert_eq!(normalized.query.catalog.as_deref(), Some("6E-166"));
    assert_eq!(normalized.query.catalog_hint.as_deref(), Some("EMA 788"));
}

#[test]
fn normalize_row_drops_year_like_hint() {
    let input = row("Queen", "Jazz");
    let normalized = normalize_row(&input, Some("1978"), DEFAULT_PRICE_FLOOR).unwrap();
    assert!(normalized.query.catalog_hint.is_none());
    assert!(normalized.query.catalog.is_none());
}
