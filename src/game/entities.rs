use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Clubs => "c",
            Self::Diamonds => "d",
            Self::Hearts => "h",
            Self::Spades => "s",
        };
        write!(f, "{repr}")
    }
}

/// Card values in ascending strength. Aces are always high; the ace-low
/// straight is handled by the evaluator, not here.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Value {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Numeric strength from 2 (two) to 14 (ace), used for straight math.
    #[must_use]
    pub const fn strength(self) -> u8 {
        self as u8 + 2
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "T",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        };
        write!(f, "{repr}")
    }
}

/// A card is a value and a suit, displayed in short form ("Ah", "Tc").
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// An ordered run of cards dealt from the tail. A table starts with an
/// empty deck; a full shuffled replacement arrives at every preflop.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build all 52 cards and shuffle them uniformly in place.
    #[must_use]
    pub fn shuffled() -> Self {
        let mut cards = Vec::with_capacity(constants::DECK_SIZE);
        for value in Value::ALL {
            for suit in Suit::ALL {
                cards.push(Card(value, suit));
            }
        }
        cards.shuffle(&mut rand::rng());
        Self { cards }
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Type alias for whole chips. Bets and stacks are whole chips; the type
/// keeps them from ever going negative.
pub type Chips = u32;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// Opaque identity assigned by whatever is in front of the table (an
/// avatar id, a session id). The table stores and compares it verbatim.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The action a seat has recorded this betting round. A seat with no
/// recorded action is still waiting to act.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Call,
    Raise,
    Fold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Call => "call",
            Self::Raise => "raise",
            Self::Fold => "fold",
        };
        write!(f, "{repr}")
    }
}

/// The two ways to put chips in the pot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BetKind {
    Call,
    Raise,
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Call => "call",
            Self::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

impl From<BetKind> for Action {
    fn from(value: BetKind) -> Self {
        match value {
            BetKind::Call => Self::Call,
            BetKind::Raise => Self::Raise,
        }
    }
}

/// Table lifecycle phase.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Queued,
    Active,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::Queued => "queued",
            Self::Active => "active",
            Self::End => "end",
        };
        write!(f, "{repr}")
    }
}

/// Per-hand round within an active table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Intermission,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Round {
    /// Rounds in which seats act and chips move.
    #[must_use]
    pub const fn is_betting(self) -> bool {
        matches!(self, Self::Preflop | Self::Flop | Self::Turn | Self::River)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Intermission => "intermission",
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub seat_idx: SeatIndex,
    pub money: Chips,
    /// Chips committed this hand. Already counted in the pot.
    pub bet: Chips,
    pub action: Option<Action>,
    pub hand: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: String, seat_idx: SeatIndex, money: Chips) -> Self {
        Self {
            id,
            name,
            seat_idx,
            money,
            bet: 0,
            action: None,
            hand: Vec::with_capacity(constants::HOLE_CARDS),
        }
    }

    /// A live seat holds cards this hand. Folding surrenders them, and a
    /// seat taken mid-hand never received any.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Surrender the hand. Chips already committed stay in the pot.
    pub fn fold(&mut self) {
        self.hand.clear();
        self.bet = 0;
        self.action = Some(Action::Fold);
    }

    /// Hand-boundary reset. Money carries over between hands.
    pub fn reset_for_hand(&mut self) {
        self.bet = 0;
        self.action = None;
        self.hand.clear();
    }
}

/// Fixed-size seat registry. Seats are never reordered; a seat either
/// holds a player or is empty.
#[derive(Clone, Debug)]
pub struct Seats {
    seats: [Option<Player>; constants::MAX_SEATS],
}

impl Default for Seats {
    fn default() -> Self {
        Self {
            seats: std::array::from_fn(|_| None),
        }
    }
}

impl Seats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_some()).count()
    }

    #[must_use]
    pub fn get(&self, seat_idx: SeatIndex) -> Option<&Player> {
        self.seats.get(seat_idx).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn get_mut(&mut self, seat_idx: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat_idx).and_then(Option::as_mut)
    }

    /// Find which seat an identity occupies, if any.
    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.iter_occupied()
            .find(|player| player.id == *id)
            .map(|player| player.seat_idx)
    }

    /// Place a player at the seat stored on their record. The caller has
    /// already verified the seat is empty.
    pub fn occupy(&mut self, player: Player) {
        let seat_idx = player.seat_idx;
        self.seats[seat_idx] = Some(player);
    }

    pub fn clear(&mut self, seat_idx: SeatIndex) -> Option<Player> {
        self.seats.get_mut(seat_idx).and_then(Option::take)
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter_map(Option::as_ref)
    }

    pub fn iter_occupied_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.iter_mut().filter_map(Option::as_mut)
    }

    pub fn occupied_seats(&self) -> impl Iterator<Item = SeatIndex> + '_ {
        self.iter_occupied().map(|player| player.seat_idx)
    }

    pub fn live_seats(&self) -> impl Iterator<Item = SeatIndex> + '_ {
        self.iter_occupied()
            .filter(|player| player.is_live())
            .map(|player| player.seat_idx)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_seats().count()
    }
}
