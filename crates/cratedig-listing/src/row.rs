//! Destination product-import rows.

use serde::Serialize;

pub const PRODUCT_TYPE: &str = "Vinyl Record";
pub const PRODUCT_CATEGORY: &str = "Media > Music & Sound Recordings > Records & LPs";
pub const COLLECTION: &str = "Vinyl Albums";
pub const ALBUM_CONDITION: &str = "Used";
const OPTION1_NAME: &str = "Title";
const OPTION1_VALUE: &str = "Default Title";
const STATUS: &str = "active";
const INVENTORY_TRACKER: &str = "shopify";
const FULFILLMENT_SERVICE: &str = "manual";
const WEIGHT_UNIT: &str = "g";
const TRUE: &str = "TRUE";
const FALSE: &str = "FALSE";

/// Destination spelling of a boolean cell.
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// Header row, in column order. Must stay in step with [`OutputRow`]'s
/// serialized field names.
pub const OUTPUT_COLUMNS: [&str; 43] = [
    "Title",
    "URL handle",
    "Description",
    "Vendor",
    "Product category",
    "Type",
    "Collection",
    "Tags",
    "Published on online store",
    "Status",
    "Option1 name",
    "Option1 value",
    "Price",
    "Compare-at price",
    "Cost per item",
    "Charge tax",
    "SKU",
    "Barcode",
    "Inventory tracker",
    "Inventory quantity",
    "Continue selling when out of stock",
    "Weight value (grams)",
    "Weight unit for display",
    "Requires shipping",
    "Fulfillment service",
    "Product image URL",
    "Image position",
    "Image alt text",
    "Variant image URL",
    "Gift card",
    "SEO title",
    "SEO description",
    "Metafield: custom.album_cover_condition [single_line_text_field]",
    "Metafield: custom.album_condition [single_line_text_field]",
    "Metafield: custom.shop_signage [single_line_text_field]",
    "Metafield: custom.shop_artist [single_line_text_field]",
    "Metafield: custom.condition [single_line_text_field]",
    "Metafield: custom.condition_description [multi_line_text_field]",
    "Metafield: custom.inventory_date [date]",
    "Metafield: custom.uses_stock_photo [boolean]",
    "Variant Weight (lb)",
    "Pricing Strategy Used",
    "Pricing Notes",
];

/// One product-import record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL handle")]
    pub handle: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Product category")]
    pub product_category: &'static str,
    #[serde(rename = "Type")]
    pub product_type: &'static str,
    #[serde(rename = "Collection")]
    pub collection: &'static str,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Published on online store")]
    pub published: &'static str,
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "Option1 name")]
    pub option1_name: &'static str,
    #[serde(rename = "Option1 value")]
    pub option1_value: &'static str,
    /// Two decimals, e.g. `"17.50"`.
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Compare-at price")]
    pub compare_at_price: String,
    #[serde(rename = "Cost per item")]
    pub cost_per_item: String,
    #[serde(rename = "Charge tax")]
    pub charge_tax: &'static str,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Barcode")]
    pub barcode: String,
    #[serde(rename = "Inventory tracker")]
    pub inventory_tracker: &'static str,
    #[serde(rename = "Inventory quantity")]
    pub inventory_quantity: u32,
    #[serde(rename = "Continue selling when out of stock")]
    pub continue_selling: &'static str,
    #[serde(rename = "Weight value (grams)")]
    pub weight_grams: u32,
    #[serde(rename = "Weight unit for display")]
    pub weight_unit: &'static str,
    #[serde(rename = "Requires shipping")]
    pub requires_shipping: &'static str,
    #[serde(rename = "Fulfillment service")]
    pub fulfillment_service: &'static str,
    #[serde(rename = "Product image URL")]
    pub image_url: String,
    /// Empty when the row carries no image.
    #[serde(rename = "Image position")]
    pub image_position: Option<u32>,
    #[serde(rename = "Image alt text")]
    pub image_alt: String,
    #[serde(rename = "Variant image URL")]
    pub variant_image_url: String,
    #[serde(rename = "Gift card")]
    pub gift_card: &'static str,
    #[serde(rename = "SEO title")]
    pub seo_title: String,
    #[serde(rename = "SEO description")]
    pub seo_description: String,
    #[serde(rename = "Metafield: custom.album_cover_condition [single_line_text_field]")]
    pub album_cover_condition: String,
    #[serde(rename = "Metafield: custom.album_condition [single_line_text_field]")]
    pub album_condition: &'static str,
    #[serde(rename = "Metafield: custom.shop_signage [single_line_text_field]")]
    pub shop_signage: String,
    #[serde(rename = "Metafield: custom.shop_artist [single_line_text_field]")]
    pub shop_artist: String,
    /// `"Media: VG+; Sleeve: VG"`.
    #[serde(rename = "Metafield: custom.condition [single_line_text_field]")]
    pub condition: String,
    #[serde(rename = "Metafield: custom.condition_description [multi_line_text_field]")]
    pub condition_description: String,
    /// `YYYY-MM-DD`.
    #[serde(rename = "Metafield: custom.inventory_date [date]")]
    pub inventory_date: String,
    /// `TRUE` when the primary image is the catalog's stock cover.
    #[serde(rename = "Metafield: custom.uses_stock_photo [boolean]")]
    pub uses_stock_photo: &'static str,
    #[serde(rename = "Variant Weight (lb)")]
    pub variant_weight_lb: String,
    #[serde(rename = "Pricing Strategy Used")]
    pub pricing_strategy: &'static str,
    #[serde(rename = "Pricing Notes")]
    pub pricing_notes: String,
}

impl OutputRow {
    /// A row with every fixed destination value filled in and the
    /// computed fields left empty.
    #[must_use]
    pub fn with_constants() -> Self {
        Self {
            title: String::new(),
            handle: String::new(),
            description: String::new(),
            vendor: String::new(),
            product_category: PRODUCT_CATEGORY,
            product_type: PRODUCT_TYPE,
            collection: COLLECTION,
            tags: String::new(),
            published: TRUE,
            status: STATUS,
            option1_name: OPTION1_NAME,
            option1_value: OPTION1_VALUE,
            price: String::new(),
            compare_at_price: String::new(),
            cost_per_item: String::new(),
            charge_tax: TRUE,
            sku: String::new(),
            barcode: String::new(),
            inventory_tracker: INVENTORY_TRACKER,
            inventory_quantity: 1,
            continue_selling: FALSE,
            weight_grams: 0,
            weight_unit: WEIGHT_UNIT,
            requires_shipping: TRUE,
            fulfillment_service: FULFILLMENT_SERVICE,
            image_url: String::new(),
            image_position: None,
            image_alt: String::new(),
            variant_image_url: String::new(),
            gift_card: FALSE,
            seo_title: String::new(),
            seo_description: String::new(),
            album_cover_condition: String::new(),
            album_condition: ALBUM_CONDITION,
            shop_signage: String::new(),
            shop_artist: String::new(),
            condition: String::new(),
            condition_description: String::new(),
            inventory_date: String::new(),
            uses_stock_photo: FALSE,
            variant_weight_lb: String::new(),
            pricing_strategy: "",
            pricing_notes: String::new(),
        }
    }

    /// Copy of this row pointing at another image.
    #[must_use]
    pub fn with_image(&self, url: &str, position: u32, alt: &str) -> Self {
        Self {
            image_url: url.to_owned(),
            image_position: Some(position),
            image_alt: alt.to_owned(),
            ..self.clone()
        }
    }
}
