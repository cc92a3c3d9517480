//! Hand evaluation: map five to seven cards to a totally ordered strength.
//!
//! The table core only compares strengths and prints category names; it
//! never looks inside the ranking. Evaluation picks the best five-card
//! hand by enumerating combinations, which is at most 21 hands for a
//! full board and cheap at table scale.

use std::fmt;

use crate::game::entities::{Card, Value};

/// Hand categories in ascending strength.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Total strength of a hand: category first, then tiebreak values in
/// category order (quads before kicker, pairs high before low, and so
/// on). Derived ordering compares exactly that way.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HandStrength {
    pub rank: Rank,
    pub values: Vec<Value>,
}

/// Evaluate 5 to 7 cards to the strength of their best five-card hand.
#[must_use]
pub fn eval(cards: &[Card]) -> HandStrength {
    assert!(
        (5..=7).contains(&cards.len()),
        "eval takes 5 to 7 cards, got {}",
        cards.len()
    );
    let n = cards.len();
    let mut best = eval_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for a in 0..n - 4 {
        for b in (a + 1)..n - 3 {
            for c in (b + 1)..n - 2 {
                for d in (c + 1)..n - 1 {
                    for e in (d + 1)..n {
                        let strength =
                            eval_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if strength > best {
                            best = strength;
                        }
                    }
                }
            }
        }
    }
    best
}

/// Indices of every maximal strength, in ascending order. More than one
/// index means an exact tie.
#[must_use]
pub fn argmax(strengths: &[HandStrength]) -> Vec<usize> {
    let Some(best) = strengths.iter().max() else {
        return Vec::new();
    };
    strengths
        .iter()
        .enumerate()
        .filter(|(_, strength)| *strength == best)
        .map(|(i, _)| i)
        .collect()
}

fn eval_five(cards: &[Card; 5]) -> HandStrength {
    let mut values: Vec<Value> = cards.iter().map(|card| card.0).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|card| card.1 == cards[0].1);
    let straight_high = straight_high(&values);

    // Value groups as (count, value), largest group first, ties broken
    // by the higher value.
    let mut groups: Vec<(usize, Value)> = Vec::with_capacity(5);
    for &value in &values {
        match groups.iter_mut().find(|(_, grouped)| *grouped == value) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, value)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));

    if let Some(high) = straight_high {
        let rank = if is_flush {
            Rank::StraightFlush
        } else {
            Rank::Straight
        };
        return HandStrength {
            rank,
            values: vec![high],
        };
    }

    match groups.as_slice() {
        [(4, quad), (1, kicker)] => HandStrength {
            rank: Rank::FourOfAKind,
            values: vec![*quad, *kicker],
        },
        [(3, trips), (2, pair)] => HandStrength {
            rank: Rank::FullHouse,
            values: vec![*trips, *pair],
        },
        _ if is_flush => HandStrength {
            rank: Rank::Flush,
            values,
        },
        [(3, trips), (1, high), (1, low)] => HandStrength {
            rank: Rank::ThreeOfAKind,
            values: vec![*trips, *high, *low],
        },
        [(2, high_pair), (2, low_pair), (1, kicker)] => HandStrength {
            rank: Rank::TwoPair,
            values: vec![*high_pair, *low_pair, *kicker],
        },
        [(2, pair), (1, k1), (1, k2), (1, k3)] => HandStrength {
            rank: Rank::OnePair,
            values: vec![*pair, *k1, *k2, *k3],
        },
        _ => HandStrength {
            rank: Rank::HighCard,
            values,
        },
    }
}

/// High card of a five-card straight, or `None`. Expects the values
/// sorted descending. The wheel (A-5-4-3-2) counts as a five-high
/// straight.
fn straight_high(values: &[Value]) -> Option<Value> {
    let strengths: Vec<u8> = values.iter().map(|value| value.strength()).collect();
    if strengths.windows(2).all(|pair| pair[0] == pair[1] + 1) {
        return Some(values[0]);
    }
    if strengths == [14, 5, 4, 3, 2] {
        return Some(Value::Five);
    }
    None
}
