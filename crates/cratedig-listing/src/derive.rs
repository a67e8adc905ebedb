//! Derived listing attributes and the row builder.

use chrono::{Local, NaiveDate};
use cratedig_core::{CandidateRelease, InventoryRow, NormalizedRow, DEFAULT_PRICE_FLOOR};
use rust_decimal::Decimal;

use crate::handle::{base_handle, HandleRegistry};
use crate::metafield::{condition_summary, inventory_date, shop_artist};
use crate::pricing::{decide_price, suggested_price, PriceDecision};
use crate::row::{flag, OutputRow};
use crate::signage::release_signage;
use crate::text::{
    description_html, format_description, full_title, seo_description, seo_title, tags,
    DescriptionParts,
};
use crate::weight::{disc_count, grams_to_pounds, weight_grams};

/// Store-level settings that feed the listing text and price floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    pub store_name: String,
    pub price_floor: Decimal,
    /// Inventory date for rows whose sheet cell is blank or unreadable.
    pub today: NaiveDate,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            store_name: "Unusual Finds".to_owned(),
            price_floor: DEFAULT_PRICE_FLOOR,
            today: Local::now().date_naive(),
        }
    }
}

/// Everything computed for one matched item before it becomes rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAttributes {
    pub weight_grams: u32,
    pub weight_lb: Decimal,
    pub price: PriceDecision,
    pub signage: String,
    pub format_description: String,
    pub full_title: String,
    pub seo_title: String,
    pub seo_description: String,
    pub tags: String,
    pub description_html: String,
    pub shop_artist: String,
    pub condition: String,
    pub inventory_date: String,
}

/// Computes weight, price, signage, text, and metafield values for a
/// matched row.
///
/// The display artist is the canonical artist from normalization; it is
/// not transformed again here.
#[must_use]
pub fn derive_attributes(
    row: &InventoryRow,
    normalized: &NormalizedRow,
    release: &CandidateRelease,
    options: &ListingOptions,
) -> DerivedAttributes {
    let artist = normalized.query.canonical_artist.as_str();
    let title = normalized.query.title.as_str();

    let grams = weight_grams(disc_count(release));

    let suggested = suggested_price(&row.media_condition, &release.suggested_prices);
    let price = decide_price(
        normalized.reference_price,
        normalized.reference_price_parsed,
        suggested,
        options.price_floor,
    );

    let format = format_description(release);
    let full = full_title(artist, title, release.year, release.primary_label());
    let web_url = release.web_url();
    let body = description_html(&DescriptionParts {
        artist,
        title,
        label: release.primary_label(),
        year: release.year,
        format: &format,
        genre: release.primary_genre(),
        media_condition: &row.media_condition,
        sleeve_condition: &row.sleeve_condition,
        catalog_url: &web_url,
        tracks: &release.tracklist,
    });

    DerivedAttributes {
        weight_grams: grams,
        weight_lb: grams_to_pounds(grams),
        price,
        signage: release_signage(release),
        seo_title: seo_title(&full, &options.store_name),
        seo_description: seo_description(
            artist,
            title,
            release.year,
            release.primary_genre(),
            &options.store_name,
        ),
        tags: tags(release, &format),
        format_description: format,
        full_title: full,
        description_html: body,
        shop_artist: shop_artist(artist, &release.composers),
        condition: condition_summary(&row.media_condition, &row.sleeve_condition),
        inventory_date: inventory_date(row.inventory_date.as_deref(), options.today),
    }
}

/// Rows and attributes produced for one matched item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub handle: String,
    pub attributes: DerivedAttributes,
    /// Primary cover row first, then the center-label row when present.
    pub rows: Vec<OutputRow>,
}

/// Builds destination rows for one batch, keeping handles unique across it.
#[derive(Debug, Default)]
pub struct ListingBuilder {
    options: ListingOptions,
    handles: HandleRegistry,
}

impl ListingBuilder {
    #[must_use]
    pub fn new(options: ListingOptions) -> Self {
        Self {
            options,
            handles: HandleRegistry::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn build(
        &mut self,
        row: &InventoryRow,
        normalized: &NormalizedRow,
        release: &CandidateRelease,
    ) -> Listing {
        let attributes = derive_attributes(row, normalized, release, &self.options);
        let base = base_handle(
            &normalized.query.canonical_artist,
            &normalized.query.title,
            release.year,
        );
        let handle = self.handles.claim(&base, release.release_id);

        let cover = release.cover_image().unwrap_or_default();
        let mut primary = OutputRow::with_constants();
        primary.title.clone_from(&attributes.full_title);
        primary.handle.clone_from(&handle);
        primary.description.clone_from(&attributes.description_html);
        primary.vendor = release.primary_label().unwrap_or_default().to_owned();
        primary.tags.clone_from(&attributes.tags);
        primary.price = format!("{:.2}", attributes.price.final_price);
        primary.sku = release.release_id.to_string();
        primary.barcode = release.barcodes.first().cloned().unwrap_or_default();
        primary.weight_grams = attributes.weight_grams;
        primary.variant_image_url = cover.to_owned();
        primary.seo_title.clone_from(&attributes.seo_title);
        primary.seo_description.clone_from(&attributes.seo_description);
        primary.album_cover_condition = row.sleeve_condition.trim().to_owned();
        primary.shop_signage.clone_from(&attributes.signage);
        primary.shop_artist.clone_from(&attributes.shop_artist);
        primary.condition.clone_from(&attributes.condition);
        primary.condition_description = row
            .condition_description
            .as_deref()
            .unwrap_or_default()
            .to_owned();
        primary.inventory_date.clone_from(&attributes.inventory_date);
        primary.uses_stock_photo = flag(!cover.is_empty());
        primary.variant_weight_lb = attributes.weight_lb.to_string();
        primary.pricing_strategy = attributes.price.strategy.code();
        primary.pricing_notes = attributes.price.notes();
        if !cover.is_empty() {
            primary.image_url = cover.to_owned();
            primary.image_position = Some(1);
            primary.image_alt.clone_from(&attributes.full_title);
        }

        let mut rows = vec![];
        let label_photo = row
            .center_label_photo
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let label_row = label_photo.map(|photo| {
            let alt = format!("{} - Center Label", attributes.full_title);
            primary.with_image(photo, 2, &alt)
        });
        rows.push(primary);
        rows.extend(label_row);

        tracing::debug!(
            row = row.row_number,
            release_id = release.release_id,
            %handle,
            strategy = %attributes.price.strategy,
            price = %attributes.price.final_price,
            signage = %attributes.signage,
            "listing built"
        );

        Listing {
            handle,
            attributes,
            rows,
        }
    }
}

#[cfg(test)]
#[path = "derive_test.rs"]
mod tests;
