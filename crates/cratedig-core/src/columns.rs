//! Logical-field to header-alias mapping for inventory spreadsheets.
//!
//! Spreadsheet headers drift between exports ("Reference Price" vs "Price",
//! "Catalog" vs "Cat #"). A [`ColumnMap`] lists the accepted aliases for every
//! logical field; it is resolved against the actual header row exactly once,
//! producing [`ResolvedColumns`] which then extracts [`InventoryRow`]s by
//! index.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::inventory::InventoryRow;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Artist,
    Title,
    ReferencePrice,
    Country,
    Catalog,
    Label,
    Format,
    CenterLabelPhoto,
    MediaCondition,
    SleeveCondition,
    OcrHint,
    ConditionDescription,
    InventoryDate,
}

impl LogicalField {
    pub const ALL: [LogicalField; 13] = [
        LogicalField::Artist,
        LogicalField::Title,
        LogicalField::ReferencePrice,
        LogicalField::Country,
        LogicalField::Catalog,
        LogicalField::Label,
        LogicalField::Format,
        LogicalField::CenterLabelPhoto,
        LogicalField::MediaCondition,
        LogicalField::SleeveCondition,
        LogicalField::OcrHint,
        LogicalField::ConditionDescription,
        LogicalField::InventoryDate,
    ];

    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, LogicalField::Artist | LogicalField::Title)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalField::Artist => "artist",
            LogicalField::Title => "title",
            LogicalField::ReferencePrice => "reference_price",
            LogicalField::Country => "country",
            LogicalField::Catalog => "catalog",
            LogicalField::Label => "label",
            LogicalField::Format => "format",
            LogicalField::CenterLabelPhoto => "center_label_photo",
            LogicalField::MediaCondition => "media_condition",
            LogicalField::SleeveCondition => "sleeve_condition",
            LogicalField::OcrHint => "ocr_hint",
            LogicalField::ConditionDescription => "condition_description",
            LogicalField::InventoryDate => "inventory_date",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::Artist => &["Artist", "Artist Name"],
            LogicalField::Title => &["Title", "Album", "Album Title"],
            LogicalField::ReferencePrice => &["Reference Price", "Price", "Ref Price"],
            LogicalField::Country => &["Country"],
            LogicalField::Catalog => &["Catalog", "Catalog Number", "Catalog #", "Cat #", "Catno"],
            LogicalField::Label => &["Label", "Record Label"],
            LogicalField::Format => &["Format", "Type"],
            LogicalField::CenterLabelPhoto => &["Center label photo", "Center Label Image"],
            LogicalField::MediaCondition => &["Media Condition"],
            LogicalField::SleeveCondition => &["Sleeve Condition"],
            LogicalField::OcrHint => &["Ocr_Catalog", "OCR Hint", "Label_Catalog_Number"],
            LogicalField::ConditionDescription => &["Condition Description", "Notes"],
            LogicalField::InventoryDate => &["Inventory Date", "inventory_date"],
        }
    }
}

impl std::fmt::Display for LogicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted header aliases per logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub columns: BTreeMap<LogicalField, Vec<String>>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        let columns = LogicalField::ALL
            .iter()
            .map(|field| {
                let aliases = field
                    .default_aliases()
                    .iter()
                    .map(|a| (*a).to_string())
                    .collect();
                (*field, aliases)
            })
            .collect();
        Self { columns }
    }
}

impl ColumnMap {
    /// Resolve the map against a header row.
    ///
    /// Matching is trimmed and case-insensitive; for each field the first
    /// alias present in the headers wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingColumn`] when a required field (artist,
    /// title) has no matching header.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ResolvedColumns, ConfigError> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, h)| (h.as_ref().trim().to_lowercase(), idx))
            .collect();

        let mut resolved = HashMap::new();
        for field in LogicalField::ALL {
            let aliases = self.columns.get(&field).map(Vec::as_slice).unwrap_or_default();
            let hit = aliases
                .iter()
                .find_map(|alias| positions.get(&alias.trim().to_lowercase()).copied());
            match hit {
                Some(idx) => {
                    resolved.insert(field, idx);
                }
                None if field.is_required() => {
                    return Err(ConfigError::MissingColumn {
                        field: field.to_string(),
                        aliases: aliases.join(", "),
                    });
                }
                None => {}
            }
        }

        Ok(ResolvedColumns { positions: resolved })
    }
}

/// Header positions for one input sheet.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    positions: HashMap<LogicalField, usize>,
}

impl ResolvedColumns {
    #[must_use]
    pub fn has(&self, field: LogicalField) -> bool {
        self.positions.contains_key(&field)
    }

    /// Zero-based header position a field resolved to.
    #[must_use]
    pub fn header_index(&self, field: LogicalField) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    fn get<'a, S: AsRef<str>>(&self, fields: &'a [S], field: LogicalField) -> Option<&'a str> {
        self.positions
            .get(&field)
            .and_then(|idx| fields.get(*idx))
            .map(|v| v.as_ref().trim())
    }

    fn optional<S: AsRef<str>>(&self, fields: &[S], field: LogicalField) -> Option<String> {
        self.get(fields, field)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    fn text<S: AsRef<str>>(&self, fields: &[S], field: LogicalField) -> String {
        self.get(fields, field).unwrap_or_default().to_owned()
    }

    /// Build an [`InventoryRow`] from one record's raw fields.
    ///
    /// `row_number` is the 1-based data row index, kept for reporting.
    #[must_use]
    pub fn extract<S: AsRef<str>>(&self, row_number: usize, fields: &[S]) -> InventoryRow {
        InventoryRow {
            row_number,
            artist: self.text(fields, LogicalField::Artist),
            title: self.text(fields, LogicalField::Title),
            reference_price: self.text(fields, LogicalField::ReferencePrice),
            country: self.optional(fields, LogicalField::Country),
            catalog_number: self.optional(fields, LogicalField::Catalog),
            label: self.optional(fields, LogicalField::Label),
            format_hint: self.optional(fields, LogicalField::Format),
            center_label_photo: self.optional(fields, LogicalField::CenterLabelPhoto),
            media_condition: self.text(fields, LogicalField::MediaCondition),
            sleeve_condition: self.text(fields, LogicalField::SleeveCondition),
            ocr_hint: self.optional(fields, LogicalField::OcrHint),
            condition_description: self.optional(fields, LogicalField::ConditionDescription),
            inventory_date: self.optional(fields, LogicalField::InventoryDate),
        }
    }
}

/// Load and validate a column map from a YAML file.
///
/// Fields absent from the file keep their built-in aliases.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_column_map(path: &Path) -> Result<ColumnMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ColumnsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let overrides: ColumnMap = serde_yaml::from_str(&content)?;
    let mut map = ColumnMap::default();
    map.columns.extend(overrides.columns);

    validate_column_map(&map)?;

    Ok(map)
}

fn validate_column_map(map: &ColumnMap) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, LogicalField> = HashMap::new();

    for (field, aliases) in &map.columns {
        if aliases.iter().all(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "field '{field}' must list at least one non-empty alias"
            )));
        }

        for alias in aliases {
            let key = alias.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = seen.insert(key, *field) {
                if previous != *field {
                    return Err(ConfigError::Validation(format!(
                        "alias '{alias}' is listed under both '{previous}' and '{field}'"
                    )));
                }
            }
        }
    }

    Ok(())
}
