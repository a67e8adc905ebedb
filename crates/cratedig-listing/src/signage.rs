//! In-store signage bucket from genres and styles.
//!
//! Genres and styles are joined into one lowercase text. Groups are scanned
//! in priority order against it and the first keyword hit wins, even when a
//! later group matches the release more obviously.

use cratedig_core::CandidateRelease;

struct SignageGroup {
    bucket: &'static str,
    keywords: &'static [&'static str],
}

const GROUPS: &[SignageGroup] = &[
    SignageGroup {
        bucket: "Stage and Sound",
        keywords: &["stage & screen", "stage and sound", "soundtrack", "musical"],
    },
    SignageGroup {
        bucket: "Christmas",
        keywords: &["christmas", "holiday", "xmas"],
    },
    SignageGroup {
        bucket: "Gospel",
        keywords: &["gospel"],
    },
    SignageGroup {
        bucket: "Religious",
        keywords: &["religious"],
    },
    SignageGroup {
        bucket: "Bluegrass",
        keywords: &["bluegrass"],
    },
    SignageGroup {
        bucket: "Country",
        keywords: &["country", "honky tonk", "nashville sound"],
    },
    SignageGroup {
        bucket: "Metal",
        keywords: &["metal"],
    },
    SignageGroup {
        bucket: "Reggae",
        keywords: &["reggae", "rocksteady", "dancehall", "ska"],
    },
    SignageGroup {
        bucket: "Latin",
        keywords: &["latin"],
    },
    SignageGroup {
        bucket: "Folk",
        keywords: &["folk"],
    },
    SignageGroup {
        bucket: "Pop",
        keywords: &["pop"],
    },
    SignageGroup {
        bucket: "Disco",
        keywords: &["disco"],
    },
    SignageGroup {
        bucket: "Children's",
        keywords: &["children's", "children", "kids"],
    },
    SignageGroup {
        bucket: "Comedy",
        keywords: &["comedy"],
    },
    SignageGroup {
        bucket: "New Age",
        keywords: &["new age"],
    },
    SignageGroup {
        bucket: "Spoken Word",
        keywords: &["spoken word"],
    },
    SignageGroup {
        bucket: "Rock",
        keywords: &["rock"],
    },
    SignageGroup {
        bucket: "Jazz",
        keywords: &["jazz"],
    },
    SignageGroup {
        bucket: "Blues",
        keywords: &["blues"],
    },
    SignageGroup {
        bucket: "Soul/Funk",
        keywords: &["soul", "funk"],
    },
    SignageGroup {
        bucket: "Classical",
        keywords: &["classical"],
    },
    SignageGroup {
        bucket: "Electronic",
        keywords: &["electronic"],
    },
    SignageGroup {
        bucket: "Hip-Hop/Rap",
        keywords: &["hip hop", "hip-hop", "rap"],
    },
];

/// First matching bucket, or the release's raw first genre when nothing
/// matches (empty when it has none).
#[must_use]
pub fn signage_bucket(genres: &[String], styles: &[String]) -> String {
    let text = genres
        .iter()
        .chain(styles)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
        .to_lowercase();

    GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|k| text.contains(k)))
        .map_or_else(
            || genres.first().cloned().unwrap_or_default(),
            |group| group.bucket.to_owned(),
        )
}

/// [`signage_bucket`] for a fetched release.
#[must_use]
pub fn release_signage(release: &CandidateRelease) -> String {
    signage_bucket(&release.genres, &release.styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn soundtrack_beats_rock() {
        assert_eq!(
            signage_bucket(&strings(&["Soundtrack", "Rock"]), &[]),
            "Stage and Sound"
        );
        assert_eq!(
            signage_bucket(&strings(&["Rock", "Stage & Screen"]), &strings(&["Soundtrack"])),
            "Stage and Sound"
        );
    }

    #[test]
    fn rock_genre_is_rock_unless_an_earlier_style_hits() {
        assert_eq!(signage_bucket(&strings(&["Rock"]), &strings(&["Pop Rock"])), "Pop");
        assert_eq!(
            signage_bucket(&strings(&["Rock"]), &strings(&["Psychedelic Rock"])),
            "Rock"
        );
    }

    #[test]
    fn earlier_group_wins_over_obvious_genre() {
        // A Christmas album by a jazz act still lands in Christmas.
        assert_eq!(
            signage_bucket(&strings(&["Jazz"]), &strings(&["Holiday", "Swing"])),
            "Christmas"
        );
    }

    #[test]
    fn folk_world_country_genre_lands_in_country() {
        let genre = strings(&["Folk, World, & Country"]);
        assert_eq!(signage_bucket(&genre, &[]), "Country");
        assert_eq!(signage_bucket(&genre, &strings(&["Folk Rock"])), "Country");
        assert_eq!(signage_bucket(&strings(&["Folk"]), &[]), "Folk");
    }

    #[test]
    fn earlier_style_keyword_overrides_later_genre() {
        assert_eq!(
            signage_bucket(&strings(&["Electronic"]), &strings(&["Jazz-Funk"])),
            "Jazz"
        );
        assert_eq!(
            signage_bucket(&strings(&["Jazz"]), &strings(&["Soul-Jazz", "Hard Bop"])),
            "Jazz"
        );
        assert_eq!(
            signage_bucket(&strings(&["Electronic"]), &strings(&["Synth-pop"])),
            "Pop"
        );
        assert_eq!(
            signage_bucket(&strings(&["Rock"]), &strings(&["Heavy Metal"])),
            "Metal"
        );
    }

    #[test]
    fn broad_genres_resolve_without_styles() {
        assert_eq!(signage_bucket(&strings(&["Funk / Soul"]), &[]), "Soul/Funk");
        assert_eq!(signage_bucket(&strings(&["Hip Hop"]), &[]), "Hip-Hop/Rap");
        assert_eq!(signage_bucket(&strings(&["Classical"]), &[]), "Classical");
    }

    #[test]
    fn unmatched_genre_is_returned_raw() {
        assert_eq!(
            signage_bucket(&strings(&["Non-Music", "Brass & Military"]), &[]),
            "Non-Music"
        );
        assert_eq!(signage_bucket(&[], &[]), "");
    }
}
