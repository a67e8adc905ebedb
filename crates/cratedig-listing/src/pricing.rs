//! Final price: reference price, overridden by a higher condition-based
//! suggestion, rounded to the nearest quarter, never below the floor.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Grading ladder, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    Mint,
    NearMint,
    VeryGoodPlus,
    VeryGood,
    GoodPlus,
    Good,
    FairPoor,
}

impl Grade {
    pub const LADDER: [Grade; 7] = [
        Grade::Mint,
        Grade::NearMint,
        Grade::VeryGoodPlus,
        Grade::VeryGood,
        Grade::GoodPlus,
        Grade::Good,
        Grade::FairPoor,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Grade::Mint => "M",
            Grade::NearMint => "NM",
            Grade::VeryGoodPlus => "VG+",
            Grade::VeryGood => "VG",
            Grade::GoodPlus => "G+",
            Grade::Good => "G",
            Grade::FairPoor => "F/P",
        }
    }

    /// Parses sheet shorthand (`"VG+"`, `"NM"`) as well as Discogs labels
    /// (`"Very Good Plus (VG+)"`, `"Near Mint (NM or M-)"`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Grade> {
        let t = text.trim().to_lowercase();
        let exact = match t.as_str() {
            "m" | "mint" => Some(Grade::Mint),
            "nm" | "m-" | "near mint" => Some(Grade::NearMint),
            "vg+" | "ex" | "excellent" => Some(Grade::VeryGoodPlus),
            "vg" | "very good" => Some(Grade::VeryGood),
            "g+" | "good plus" => Some(Grade::GoodPlus),
            "g" | "good" => Some(Grade::Good),
            "f" | "p" | "f/p" | "fair" | "poor" => Some(Grade::FairPoor),
            _ => None,
        };
        if exact.is_some() {
            return exact;
        }

        if t.contains("mint (m)") && !t.contains("near") {
            Some(Grade::Mint)
        } else if t.contains("near mint") || t.contains("m-") {
            Some(Grade::NearMint)
        } else if t.contains("vg+") || t.contains("very good plus") || t.contains("excellent") {
            Some(Grade::VeryGoodPlus)
        } else if t.contains("very good") {
            Some(Grade::VeryGood)
        } else if t.contains("good plus") || t.contains("g+") {
            Some(Grade::GoodPlus)
        } else if t.starts_with("good") {
            Some(Grade::Good)
        } else if t.contains("fair") || t.contains("poor") {
            Some(Grade::FairPoor)
        } else {
            None
        }
    }
}

/// Picks the suggestion for `media_condition`: the exact rung, else the
/// nearest lower rung less 10 %, else the nearest higher rung less 10 %.
#[must_use]
pub fn suggested_price(
    media_condition: &str,
    suggestions: &BTreeMap<String, Decimal>,
) -> Option<Decimal> {
    let wanted = Grade::parse(media_condition)?;
    let by_grade: BTreeMap<Grade, Decimal> = suggestions
        .iter()
        .filter_map(|(key, value)| Grade::parse(key).map(|g| (g, *value)))
        .collect();
    if let Some(exact) = by_grade.get(&wanted) {
        return Some(*exact);
    }

    let discount = Decimal::new(9, 1);
    let lower = by_grade.range(wanted..).next().map(|(_, v)| *v);
    let higher = by_grade.range(..wanted).next_back().map(|(_, v)| *v);
    lower.or(higher).map(|v| (v * discount).round_dp(2))
}

/// Where the final price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingStrategy {
    Reference,
    DiscogsSuggestion,
    Floor,
}

impl PricingStrategy {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            PricingStrategy::Reference => "REF",
            PricingStrategy::DiscogsSuggestion => "DSUG",
            PricingStrategy::Floor => "FLR",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDecision {
    pub final_price: Decimal,
    pub strategy: PricingStrategy,
    pub suggested: Option<Decimal>,
}

impl PriceDecision {
    /// Plain-ASCII note for the pricing column, e.g.
    /// `"DSUG - Discogs suggestion for condition; suggested 31.90"`.
    #[must_use]
    pub fn notes(&self) -> String {
        let source = match self.strategy {
            PricingStrategy::Reference => "Spreadsheet reference",
            PricingStrategy::DiscogsSuggestion => "Discogs suggestion for condition",
            PricingStrategy::Floor => "Price floor",
        };
        match self.suggested {
            Some(suggested) => format!("{} - {source}; suggested {suggested:.2}", self.strategy),
            None => format!("{} - {source}", self.strategy),
        }
    }
}

/// Rounds to the nearest 0.25, halves away from zero.
#[must_use]
pub fn round_to_quarter(value: Decimal) -> Decimal {
    let quarters = (value * Decimal::from(4))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (quarters / Decimal::from(4)).round_dp(2)
}

/// Applies override-if-higher, quarter rounding, then the floor.
///
/// `reference` is already the floor when the sheet price did not parse;
/// `reference_parsed` tells the two cases apart for the strategy code.
#[must_use]
pub fn decide_price(
    reference: Decimal,
    reference_parsed: bool,
    suggested: Option<Decimal>,
    floor: Decimal,
) -> PriceDecision {
    let (base, mut strategy) = match suggested {
        Some(s) if s > reference => (s, PricingStrategy::DiscogsSuggestion),
        _ if reference_parsed => (reference, PricingStrategy::Reference),
        _ => (reference, PricingStrategy::Floor),
    };

    let rounded = round_to_quarter(base);
    let final_price = if rounded < floor {
        strategy = PricingStrategy::Floor;
        floor
    } else {
        rounded
    };

    PriceDecision {
        final_price,
        strategy,
        suggested,
    }
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
