//! Property-based tests for hand evaluation using proptest.
//!
//! These tests check that evaluation is deterministic, that seven-card
//! evaluation really is the best five-card hand inside, and that the
//! category ordering holds across randomly generated inputs.

use std::collections::BTreeSet;

use holdem_table::eval::{HandStrength, Rank, argmax, eval};
use holdem_table::{Card, Suit, Value};
use proptest::prelude::*;

// Strategy to generate a valid card
fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..Value::ALL.len(), 0usize..Suit::ALL.len())
        .prop_map(|(value_idx, suit_idx)| Card(Value::ALL[value_idx], Suit::ALL[suit_idx]))
}

// Strategy to generate exactly `count` unique cards
fn unique_cards_strategy(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), count..=count).prop_filter(
        "Cards must be unique",
        |cards| {
            let set: BTreeSet<_> = cards.iter().collect();
            set.len() == cards.len()
        },
    )
}

proptest! {
    #[test]
    fn test_eval_deterministic(cards in unique_cards_strategy(7)) {
        prop_assert_eq!(eval(&cards), eval(&cards));
    }

    #[test]
    fn test_eval_reports_one_to_five_values(cards in unique_cards_strategy(5)) {
        let strength = eval(&cards);
        prop_assert!(
            (1..=5).contains(&strength.values.len()),
            "tiebreak values should hold 1 to 5 entries, got {:?}",
            strength
        );
    }

    #[test]
    fn test_seven_card_eval_is_best_five_card_subset(cards in unique_cards_strategy(7)) {
        let best = eval(&cards);
        let mut best_subset: Option<HandStrength> = None;

        // Leaving out every pair of cards walks all 21 subsets.
        for skip_a in 0..cards.len() {
            for skip_b in (skip_a + 1)..cards.len() {
                let five: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|&(idx, _)| idx != skip_a && idx != skip_b)
                    .map(|(_, &card)| card)
                    .collect();
                let strength = eval(&five);
                prop_assert!(strength <= best, "a subset should never beat the full hand");
                if best_subset.as_ref().is_none_or(|seen| strength > *seen) {
                    best_subset = Some(strength);
                }
            }
        }

        prop_assert_eq!(Some(best), best_subset);
    }

    #[test]
    fn test_extra_cards_never_weaken_a_hand(cards in unique_cards_strategy(7)) {
        let five = eval(&cards[..5]);
        let six = eval(&cards[..6]);
        let seven = eval(&cards);

        prop_assert!(five <= six);
        prop_assert!(six <= seven);
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in unique_cards_strategy(5)) {
        let strength = eval(&cards);
        let winners = argmax(&[strength.clone(), strength.clone(), strength]);
        prop_assert_eq!(winners, vec![0, 1, 2]);
    }

    #[test]
    fn test_argmax_winners_beat_the_rest(
        hands in prop::collection::vec(unique_cards_strategy(5), 2..=9)
    ) {
        let evaluated: Vec<HandStrength> = hands.iter().map(|hand| eval(hand)).collect();
        let winners = argmax(&evaluated);

        prop_assert!(!winners.is_empty(), "argmax should name at least one winner");
        prop_assert!(winners.windows(2).all(|pair| pair[0] < pair[1]),
            "winner indices should be strictly ascending");

        let best = &evaluated[winners[0]];
        for (idx, strength) in evaluated.iter().enumerate() {
            if winners.contains(&idx) {
                prop_assert_eq!(strength, best, "every winner should tie the best hand");
            } else {
                prop_assert!(strength < best, "every loser should rank below the best hand");
            }
        }
    }
}

// Category ordering checks across randomized suits and values

proptest! {
    #[test]
    fn test_royal_flush_beats_four_of_a_kind(suit_idx in 0usize..4) {
        let suit = Suit::ALL[suit_idx];
        let royal_flush = vec![
            Card(Value::Ace, suit),
            Card(Value::King, suit),
            Card(Value::Queen, suit),
            Card(Value::Jack, suit),
            Card(Value::Ten, suit),
        ];
        let four_of_a_kind = vec![
            Card(Value::Nine, Suit::Clubs),
            Card(Value::Nine, Suit::Diamonds),
            Card(Value::Nine, Suit::Hearts),
            Card(Value::Nine, Suit::Spades),
            Card(Value::Eight, Suit::Clubs),
        ];

        let winners = argmax(&[eval(&royal_flush), eval(&four_of_a_kind)]);
        prop_assert_eq!(winners, vec![0]);
    }

    #[test]
    fn test_four_of_a_kind_beats_full_house(quad_idx in 0usize..13, trip_idx in 0usize..13) {
        prop_assume!(quad_idx != trip_idx);
        let quad = Value::ALL[quad_idx];
        let trip = Value::ALL[trip_idx];

        let four_of_a_kind = vec![
            Card(quad, Suit::Clubs),
            Card(quad, Suit::Diamonds),
            Card(quad, Suit::Hearts),
            Card(quad, Suit::Spades),
            Card(trip, Suit::Clubs),
        ];
        let full_house = vec![
            Card(trip, Suit::Clubs),
            Card(trip, Suit::Diamonds),
            Card(trip, Suit::Hearts),
            Card(quad, Suit::Clubs),
            Card(quad, Suit::Diamonds),
        ];

        let quads = eval(&four_of_a_kind);
        let boat = eval(&full_house);
        prop_assert_eq!(quads.rank, Rank::FourOfAKind);
        prop_assert_eq!(boat.rank, Rank::FullHouse);
        prop_assert!(quads > boat);
    }

    #[test]
    fn test_full_house_beats_flush(suit_idx in 0usize..4) {
        let suit = Suit::ALL[suit_idx];
        let full_house = vec![
            Card(Value::Eight, Suit::Clubs),
            Card(Value::Eight, Suit::Diamonds),
            Card(Value::Eight, Suit::Hearts),
            Card(Value::Five, Suit::Clubs),
            Card(Value::Five, Suit::Diamonds),
        ];
        // 2-4-7-T-K of one suit, high but never a straight.
        let flush = vec![
            Card(Value::Two, suit),
            Card(Value::Four, suit),
            Card(Value::Seven, suit),
            Card(Value::Ten, suit),
            Card(Value::King, suit),
        ];

        prop_assert!(eval(&full_house) > eval(&flush));
    }

    #[test]
    fn test_flush_beats_straight(suit_idx in 0usize..4) {
        let suit = Suit::ALL[suit_idx];
        let flush = vec![
            Card(Value::Two, suit),
            Card(Value::Four, suit),
            Card(Value::Seven, suit),
            Card(Value::Ten, suit),
            Card(Value::King, suit),
        ];
        let straight = vec![
            Card(Value::Five, Suit::Clubs),
            Card(Value::Six, Suit::Diamonds),
            Card(Value::Seven, Suit::Hearts),
            Card(Value::Eight, Suit::Spades),
            Card(Value::Nine, Suit::Clubs),
        ];

        prop_assert!(eval(&flush) > eval(&straight));
    }

    #[test]
    fn test_straight_beats_three_of_a_kind(start_idx in 0usize..9) {
        // Straights from 6-high up to ace-high, suits mixed so no flush.
        let straight: Vec<Card> = (0..5)
            .map(|offset| Card(Value::ALL[start_idx + offset], Suit::ALL[offset % 4]))
            .collect();
        let three_of_a_kind = vec![
            Card(Value::Ace, Suit::Clubs),
            Card(Value::Ace, Suit::Diamonds),
            Card(Value::Ace, Suit::Hearts),
            Card(Value::Three, Suit::Spades),
            Card(Value::Two, Suit::Clubs),
        ];

        let run = eval(&straight);
        prop_assert_eq!(run.rank, Rank::Straight);
        prop_assert!(run > eval(&three_of_a_kind));
    }

    #[test]
    fn test_higher_pair_wins(hi_idx in 3usize..13, lo_idx in 3usize..13) {
        prop_assume!(hi_idx != lo_idx);
        let (hi_idx, lo_idx) = (hi_idx.max(lo_idx), hi_idx.min(lo_idx));

        // Kickers sit below Five so they never collide with the pairs.
        let pair_of = |value: Value| {
            vec![
                Card(value, Suit::Clubs),
                Card(value, Suit::Diamonds),
                Card(Value::Two, Suit::Hearts),
                Card(Value::Three, Suit::Spades),
                Card(Value::Four, Suit::Clubs),
            ]
        };

        let hi = eval(&pair_of(Value::ALL[hi_idx]));
        let lo = eval(&pair_of(Value::ALL[lo_idx]));
        prop_assert_eq!(hi.rank, Rank::OnePair);
        prop_assert_eq!(lo.rank, Rank::OnePair);
        prop_assert!(hi > lo);
    }
}
