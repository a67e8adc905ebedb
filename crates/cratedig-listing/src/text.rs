//! Deterministic listing text: titles, SEO fields, tags, and body HTML.
//!
//! Nothing here reads the clock or a random source; identical inputs give
//! byte-identical output.

use std::collections::BTreeSet;

use cratedig_core::{CandidateRelease, Track};

const DESCRIPTION_FOOTER_HTML: &str = "<p>Every record is inspected, researched, and \
photographed before listing, and ships in a heavy-duty protective sleeve. \
The first image is a stock photo of the release for reference.</p>";

/// Minimal HTML escaping for text placed inside element content or
/// double-quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format names and descriptions in catalog order, without repeats:
/// `"Vinyl, LP, Album, Stereo"`.
#[must_use]
pub fn format_description(release: &CandidateRelease) -> String {
    let mut seen = BTreeSet::new();
    release
        .formats
        .iter()
        .flat_map(|f| std::iter::once(&f.name).chain(f.descriptions.iter()))
        .map(|part| part.trim())
        .filter(|part| !part.is_empty() && seen.insert(part.to_owned()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"<artist> – <title> (<year>, <label>)"`; the parenthetical shrinks or
/// disappears with missing parts.
#[must_use]
pub fn full_title(artist: &str, title: &str, year: Option<i32>, label: Option<&str>) -> String {
    let base = format!("{artist} – {title}");
    match (year, label) {
        (Some(year), Some(label)) => format!("{base} ({year}, {label})"),
        (Some(year), None) => format!("{base} ({year})"),
        (None, Some(label)) => format!("{base} ({label})"),
        (None, None) => base,
    }
}

#[must_use]
pub fn seo_title(full_title: &str, store: &str) -> String {
    format!("{full_title} | Vinyl Record | {store}")
}

#[must_use]
pub fn seo_description(
    artist: &str,
    title: &str,
    year: Option<i32>,
    genre: Option<&str>,
    store: &str,
) -> String {
    let mut parts = vec![format!("Vintage vinyl record: {artist} - {title}")];
    if let Some(year) = year {
        parts.push(year.to_string());
    }
    if let Some(genre) = genre {
        parts.push(genre.to_owned());
    }
    format!("{}. Available at {store}.", parts.join(" - "))
}

/// Sorted, de-duplicated, comma-joined tag list.
///
/// Shopify splits tags on commas, so commas inside a value are dropped.
#[must_use]
pub fn tags(release: &CandidateRelease, format_description: &str) -> String {
    let mut tags: BTreeSet<String> = BTreeSet::new();
    let mut add = |tag: &str| {
        let cleaned = tag.replace(',', "");
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            tags.insert(cleaned.to_owned());
        }
    };

    add("Vinyl");
    add("Vinyl Record");
    if let Some(genre) = release.primary_genre() {
        add(genre);
        add(&format!("{genre} Vinyl"));
    }
    for style in &release.styles {
        add(style);
    }
    if let Some(year) = release.year {
        add(&year.to_string());
    }
    if let Some(label) = release.primary_label() {
        add(label);
    }
    add(format_description);

    tags.into_iter().collect::<Vec<_>>().join(", ")
}

fn track_line(track: &Track) -> String {
    let mut line = String::new();
    if !track.position.is_empty() {
        line.push_str(&escape_html(&track.position));
        line.push(' ');
    }
    line.push_str(&escape_html(&track.title));
    if !track.duration.is_empty() {
        line.push_str(&format!(" ({})", escape_html(&track.duration)));
    }
    format!("<li>{line}</li>")
}

/// `<ol>` of `position title (duration)`; empty for an empty tracklist.
#[must_use]
pub fn tracklist_html(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return String::new();
    }
    let mut lines = vec!["<h3>Tracklist</h3>".to_owned(), "<ol>".to_owned()];
    lines.extend(tracks.iter().map(track_line));
    lines.push("</ol>".to_owned());
    lines.join("\n")
}

/// Inputs for [`description_html`].
#[derive(Debug, Clone, Copy)]
pub struct DescriptionParts<'a> {
    pub artist: &'a str,
    pub title: &'a str,
    pub label: Option<&'a str>,
    pub year: Option<i32>,
    pub format: &'a str,
    pub genre: Option<&'a str>,
    pub media_condition: &'a str,
    pub sleeve_condition: &'a str,
    pub catalog_url: &'a str,
    pub tracks: &'a [Track],
}

/// Product body HTML.
#[must_use]
pub fn description_html(parts: &DescriptionParts<'_>) -> String {
    let field = |name: &str, value: &str| format!("<b>{name}:</b> {}<br>", escape_html(value));

    let mut lines = vec![
        field("Artist", parts.artist),
        field("Album Title", parts.title),
    ];
    if let Some(label) = parts.label {
        lines.push(field("Label", label));
    }
    if let Some(year) = parts.year {
        lines.push(field("Year", &year.to_string()));
    }
    if !parts.format.is_empty() {
        lines.push(field("Format", parts.format));
    }
    if let Some(genre) = parts.genre {
        lines.push(field("Genre", genre));
    }
    if !parts.media_condition.trim().is_empty() {
        lines.push(field("Media Condition", parts.media_condition.trim()));
    }
    if !parts.sleeve_condition.trim().is_empty() {
        lines.push(field("Sleeve Condition", parts.sleeve_condition.trim()));
    }
    if !parts.catalog_url.is_empty() {
        let url = escape_html(parts.catalog_url);
        lines.push(format!(
            "<b>Discogs Link:</b> <a href=\"{url}\" target=\"_blank\">{url}</a><br>"
        ));
    }
    let tracklist = tracklist_html(parts.tracks);
    if !tracklist.is_empty() {
        lines.push("<br>".to_owned());
        lines.push(tracklist);
    }
    lines.push("<br>".to_owned());
    lines.push(DESCRIPTION_FOOTER_HTML.to_owned());
    lines.join("\n")
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
