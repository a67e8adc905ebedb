use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use cratedig_core::{normalize_row, ReleaseFormat, Track};

use super::*;
use crate::pricing::PricingStrategy;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn inventory(price: &str, photo: Option<&str>) -> InventoryRow {
    InventoryRow {
        row_number: 1,
        artist: "The Beatles".to_owned(),
        title: "Abbey Road".to_owned(),
        reference_price: price.to_owned(),
        center_label_photo: photo.map(str::to_owned),
        media_condition: "VG+".to_owned(),
        sleeve_condition: "VG".to_owned(),
        ..InventoryRow::default()
    }
}

fn abbey_road() -> CandidateRelease {
    CandidateRelease {
        release_id: 24047,
        artist: "The Beatles".to_owned(),
        composers: vec![],
        title: "Abbey Road".to_owned(),
        labels: vec!["Apple Records".to_owned()],
        catalog_numbers: vec!["PCS 7088".to_owned()],
        year: Some(1969),
        country: Some("UK".to_owned()),
        genres: vec!["Rock".to_owned()],
        styles: vec!["Psychedelic Rock".to_owned()],
        formats: vec![ReleaseFormat {
            name: "Vinyl".to_owned(),
            quantity: Some(2),
            descriptions: vec!["LP".to_owned(), "Album".to_owned()],
        }],
        images: vec!["https://img.discogs.test/abbey.jpg".to_owned()],
        tracklist: vec![Track {
            position: "A1".to_owned(),
            title: "Come Together".to_owned(),
            duration: "4:20".to_owned(),
        }],
        barcodes: vec!["5099969945120".to_owned()],
        suggested_prices: BTreeMap::new(),
    }
}

fn normalized(row: &InventoryRow) -> NormalizedRow {
    normalize_row(row, None, DEFAULT_PRICE_FLOOR).unwrap()
}

#[test]
fn derives_weight_price_signage_and_text() {
    let row = inventory("$25,000.00", None);
    let attrs = derive_attributes(
        &row,
        &normalized(&row),
        &abbey_road(),
        &ListingOptions::default(),
    );

    assert_eq!(attrs.weight_grams, 500);
    assert_eq!(attrs.weight_lb, dec("1.102"));
    assert_eq!(attrs.price.final_price, dec("25000.00"));
    assert_eq!(attrs.price.strategy, PricingStrategy::Reference);
    assert_eq!(attrs.signage, "Rock");
    assert_eq!(attrs.full_title, "Beatles, The – Abbey Road (1969, Apple Records)");
    assert!(attrs.description_html.contains("<b>Artist:</b> Beatles, The<br>"));
    assert!(attrs
        .seo_description
        .starts_with("Vintage vinyl record: Beatles, The - Abbey Road - 1969 - Rock."));
}

#[test]
fn higher_suggestion_for_condition_wins() {
    let row = inventory("8", None);
    let mut release = abbey_road();
    release
        .suggested_prices
        .insert("Very Good Plus (VG+)".to_owned(), dec("31.90"));

    let attrs = derive_attributes(&row, &normalized(&row), &release, &ListingOptions::default());
    assert_eq!(attrs.price.suggested, Some(dec("31.90")));
    assert_eq!(attrs.price.final_price, dec("32.00"));
    assert_eq!(attrs.price.strategy, PricingStrategy::DiscogsSuggestion);
}

#[test]
fn unparsed_price_falls_to_floor() {
    let row = inventory("ask me", None);
    let attrs = derive_attributes(
        &row,
        &normalized(&row),
        &abbey_road(),
        &ListingOptions::default(),
    );
    assert_eq!(attrs.price.final_price, dec("2.50"));
    assert_eq!(attrs.price.strategy, PricingStrategy::Floor);
}

#[test]
fn builds_single_row_with_cover_image() {
    let row = inventory("$25,000.00", None);
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let listing = builder.build(&row, &normalized(&row), &abbey_road());

    assert_eq!(listing.rows.len(), 1);
    let primary = &listing.rows[0];
    assert_eq!(primary.handle, "beatles-the-abbey-road-1969");
    assert_eq!(primary.price, "25000.00");
    assert_eq!(primary.weight_grams, 500);
    assert_eq!(primary.variant_weight_lb, "1.102");
    assert_eq!(primary.vendor, "Apple Records");
    assert_eq!(primary.sku, "24047");
    assert_eq!(primary.barcode, "5099969945120");
    assert_eq!(primary.image_url, "https://img.discogs.test/abbey.jpg");
    assert_eq!(primary.image_position, Some(1));
    assert_eq!(primary.album_cover_condition, "VG");
    assert_eq!(primary.shop_signage, "Rock");
    assert_eq!(primary.shop_artist, "Beatles, The");
    assert_eq!(primary.condition, "Media: VG+; Sleeve: VG");
    assert_eq!(primary.uses_stock_photo, "TRUE");
    assert_eq!(primary.pricing_strategy, "REF");
    assert_eq!(primary.pricing_notes, "REF - Spreadsheet reference");
}

#[test]
fn sheet_notes_and_date_reach_metafields() {
    let mut row = inventory("12", None);
    row.condition_description = Some("Seam split on spine".to_owned());
    row.inventory_date = Some("3/14/2024".to_owned());
    let options = ListingOptions {
        today: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ..ListingOptions::default()
    };
    let mut builder = ListingBuilder::new(options);
    let listing = builder.build(&row, &normalized(&row), &abbey_road());
    let primary = &listing.rows[0];
    assert_eq!(primary.condition_description, "Seam split on spine");
    assert_eq!(primary.inventory_date, "2024-03-14");

    let undated = inventory("12", None);
    let listing = builder.build(&undated, &normalized(&undated), &abbey_road());
    assert_eq!(listing.rows[0].inventory_date, "2024-05-01");
    assert_eq!(listing.rows[0].condition_description, "");
}

#[test]
fn orchestral_release_shelves_under_composer() {
    let mut row = inventory("12", None);
    row.artist = "London Symphony Orchestra".to_owned();
    let mut release = abbey_road();
    release.composers = vec!["Gustav Holst".to_owned()];
    let attrs = derive_attributes(&row, &normalized(&row), &release, &ListingOptions::default());
    assert_eq!(attrs.shop_artist, "Gustav Holst");
}

#[test]
fn suggestion_is_recorded_in_pricing_notes() {
    let row = inventory("8", None);
    let mut release = abbey_road();
    release
        .suggested_prices
        .insert("Very Good Plus (VG+)".to_owned(), dec("31.90"));
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let listing = builder.build(&row, &normalized(&row), &release);
    assert_eq!(listing.rows[0].pricing_strategy, "DSUG");
    assert_eq!(
        listing.rows[0].pricing_notes,
        "DSUG - Discogs suggestion for condition; suggested 31.90"
    );
}

#[test]
fn center_label_photo_adds_second_row_with_same_handle() {
    let row = inventory("12", Some("photos/abbey-label.jpg"));
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let listing = builder.build(&row, &normalized(&row), &abbey_road());

    assert_eq!(listing.rows.len(), 2);
    let (primary, label) = (&listing.rows[0], &listing.rows[1]);
    assert_eq!(primary.handle, label.handle);
    assert_eq!(primary.title, label.title);
    assert_eq!(primary.image_position, Some(1));
    assert_eq!(label.image_position, Some(2));
    assert_eq!(label.image_url, "photos/abbey-label.jpg");
    assert_eq!(
        label.image_alt,
        "Beatles, The – Abbey Road (1969, Apple Records) - Center Label"
    );
    assert_eq!(label.price, primary.price);
}

#[test]
fn blank_photo_path_is_ignored() {
    let row = inventory("12", Some("   "));
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let listing = builder.build(&row, &normalized(&row), &abbey_road());
    assert_eq!(listing.rows.len(), 1);
}

#[test]
fn missing_cover_leaves_image_fields_empty() {
    let row = inventory("12", None);
    let mut release = abbey_road();
    release.images.clear();
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let listing = builder.build(&row, &normalized(&row), &release);

    let primary = &listing.rows[0];
    assert_eq!(primary.image_url, "");
    assert_eq!(primary.image_position, None);
    assert_eq!(primary.uses_stock_photo, "FALSE");
}

#[test]
fn repeated_item_in_batch_gets_suffixed_handle() {
    let row = inventory("12", None);
    let norm = normalized(&row);
    let mut builder = ListingBuilder::new(ListingOptions::default());
    let first = builder.build(&row, &norm, &abbey_road());
    let second = builder.build(&row, &norm, &abbey_road());
    assert_eq!(first.handle, "beatles-the-abbey-road-1969");
    assert_eq!(second.handle, "beatles-the-abbey-road-1969-2");
}
