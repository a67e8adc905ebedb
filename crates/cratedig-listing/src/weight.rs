//! Shipping weight from disc count.

use cratedig_core::CandidateRelease;
use rust_decimal::{Decimal, RoundingStrategy};

const FIRST_DISC_GRAMS: u32 = 300;
const EXTRA_DISC_GRAMS: u32 = 200;
/// Grams per avoirdupois pound (453.59237).
const GRAMS_PER_POUND: Decimal = Decimal::from_parts(45_359_237, 0, 0, false, 5);

/// Total discs across all formats; a missing or non-positive quantity counts
/// as one, and the total is never below one.
#[must_use]
pub fn disc_count(release: &CandidateRelease) -> u32 {
    release
        .formats
        .iter()
        .map(|f| f.quantity.filter(|q| *q > 0).unwrap_or(1))
        .sum::<u32>()
        .max(1)
}

/// 1 → 300, 2 → 500, 3 → 700, n → 300 + 200 × (n − 1).
#[must_use]
pub fn weight_grams(discs: u32) -> u32 {
    let discs = discs.max(1);
    FIRST_DISC_GRAMS.saturating_add(EXTRA_DISC_GRAMS.saturating_mul(discs - 1))
}

/// Grams to pounds, three decimals.
#[must_use]
pub fn grams_to_pounds(grams: u32) -> Decimal {
    (Decimal::from(grams) / GRAMS_PER_POUND)
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratedig_core::ReleaseFormat;

    fn format(quantity: Option<u32>) -> ReleaseFormat {
        ReleaseFormat {
            name: "Vinyl".to_owned(),
            quantity,
            descriptions: vec![],
        }
    }

    #[test]
    fn weight_table_matches_disc_count() {
        let expected = [300, 500, 700, 900, 1100];
        for (n, grams) in (1..=5).zip(expected) {
            assert_eq!(weight_grams(n), grams, "discs = {n}");
        }
        assert_eq!(weight_grams(0), 300);
    }

    #[test]
    fn disc_count_sums_formats_with_defaults() {
        let release = CandidateRelease {
            formats: vec![format(Some(2)), format(None), format(Some(0))],
            ..CandidateRelease::default()
        };
        assert_eq!(disc_count(&release), 4);
        assert_eq!(disc_count(&CandidateRelease::default()), 1);
    }

    #[test]
    fn pounds_are_rounded_to_three_places() {
        assert_eq!(grams_to_pounds(300), Decimal::new(661, 3));
        assert_eq!(grams_to_pounds(500), Decimal::new(1102, 3));
    }
}
