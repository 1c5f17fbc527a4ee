//! Cards and the deck they are drawn from
//!
//! A [`Card`] is what a voter plays: either a numeric story-point value or the
//! joker ("cannot estimate"). The [`Deck`] is the ordered set of denominations
//! a finalized estimate snaps to.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default planning-poker denominations
pub const DEFAULT_DENOMINATIONS: [u32; 5] = [1, 2, 4, 8, 16];

/// A card played by a single voter
///
/// # Example
///
/// ```
/// use poker_domain::estimation::Card;
///
/// let card = Card::from_parts(8, false).unwrap();
/// assert_eq!(card, Card::Points(8));
///
/// assert!(Card::from_parts(5, true).is_err());
/// assert_eq!(Card::from_parts(0, true).unwrap(), Card::Joker);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    /// A numeric estimate
    Points(u32),
    /// Abstention; counts toward quorum, ignored by the numeric math
    Joker,
}

impl Card {
    /// Build a card from the stored `(points, is_joker)` pair.
    ///
    /// Jokers must carry 0 points; numeric cards at least 1. Whether the value
    /// is a deck denomination is not checked here.
    pub fn from_parts(points: u32, is_joker: bool) -> Result<Self, DomainError> {
        match (is_joker, points) {
            (true, 0) => Ok(Card::Joker),
            (true, points) => Err(DomainError::JokerWithPoints { points }),
            (false, 0) => Err(DomainError::MissingPoints),
            (false, points) => Ok(Card::Points(points)),
        }
    }

    /// Stored points value (0 for jokers)
    pub fn points(&self) -> u32 {
        match self {
            Card::Points(p) => *p,
            Card::Joker => 0,
        }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::Joker)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Points(p) => write!(f, "{}", p),
            Card::Joker => write!(f, "J"),
        }
    }
}

/// Ordered set of allowed story-point denominations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Deck(Vec<u32>);

impl Deck {
    /// Create a deck; values must be positive and strictly ascending.
    pub fn new(values: Vec<u32>) -> Result<Self, DomainError> {
        if values.is_empty() {
            return Err(DomainError::EmptyDeck);
        }
        if values.contains(&0) {
            return Err(DomainError::ZeroCard);
        }
        if let Some(pair) = values.windows(2).find(|w| w[1] <= w[0]) {
            return Err(DomainError::UnorderedDeck {
                previous: pair[0],
                next: pair[1],
            });
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    /// Whether `points` is one of this deck's denominations
    pub fn contains(&self, points: u32) -> bool {
        self.0.binary_search(&points).is_ok()
    }

    /// Denomination closest to `average`.
    ///
    /// Scans in ascending order and only moves on a strictly smaller distance,
    /// so ties resolve to the lower card (6.0 between 4 and 8 yields 4).
    pub fn nearest(&self, average: f64) -> u32 {
        let mut best = self.0[0];
        let mut best_distance = (f64::from(best) - average).abs();
        for &value in &self.0[1..] {
            let distance = (f64::from(value) - average).abs();
            if distance < best_distance {
                best = value;
                best_distance = distance;
            }
        }
        best
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self(DEFAULT_DENOMINATIONS.to_vec())
    }
}

impl TryFrom<Vec<u32>> for Deck {
    type Error = DomainError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Deck> for Vec<u32> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_parts() {
        assert_eq!(Card::from_parts(4, false), Ok(Card::Points(4)));
        assert_eq!(Card::from_parts(0, true), Ok(Card::Joker));
        assert_eq!(
            Card::from_parts(5, true),
            Err(DomainError::JokerWithPoints { points: 5 })
        );
        assert_eq!(Card::from_parts(0, false), Err(DomainError::MissingPoints));
    }

    #[test]
    fn test_non_denomination_points_are_accepted() {
        // 5 is not a deck value but the store only enforces >= 1
        assert_eq!(Card::from_parts(5, false), Ok(Card::Points(5)));
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::Points(16).to_string(), "16");
        assert_eq!(Card::Joker.to_string(), "J");
        assert_eq!(Card::Joker.points(), 0);
    }

    #[test]
    fn test_deck_validation() {
        assert_eq!(Deck::new(vec![]), Err(DomainError::EmptyDeck));
        assert_eq!(Deck::new(vec![0, 1]), Err(DomainError::ZeroCard));
        assert_eq!(
            Deck::new(vec![1, 4, 2]),
            Err(DomainError::UnorderedDeck {
                previous: 4,
                next: 2
            })
        );
        assert!(Deck::new(vec![1, 3, 5, 8]).is_ok());
    }

    #[test]
    fn test_nearest_denomination() {
        let deck = Deck::default();
        assert_eq!(deck.nearest(10.0 / 3.0), 4);
        assert_eq!(deck.nearest(1.4), 1);
        assert_eq!(deck.nearest(12.5), 16);
        assert_eq!(deck.nearest(100.0), 16);
    }

    #[test]
    fn test_nearest_tie_prefers_lower_card() {
        let deck = Deck::default();
        for _ in 0..10 {
            assert_eq!(deck.nearest(6.0), 4);
        }
        assert_eq!(deck.nearest(3.0), 2);
        assert_eq!(deck.nearest(1.5), 1);
    }

    #[test]
    fn test_deck_contains() {
        let deck = Deck::default();
        assert!(deck.contains(8));
        assert!(!deck.contains(5));
    }

    #[test]
    fn test_deck_deserialize_rejects_unordered() {
        let ok: Deck = serde_json::from_str("[1,2,4]").unwrap();
        assert_eq!(ok.values(), &[1, 2, 4]);
        assert!(serde_json::from_str::<Deck>("[4,2]").is_err());
    }
}
