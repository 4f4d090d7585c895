//! Blackjack rules and the per-session hand state.

use std::fmt;

use rand::{seq::SliceRandom, Rng};

use super::Settlement;

/// Dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u32 = 17;

const BLACKJACK: u32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// A playing card, `rank` 1 (ace) through 13 (king).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Face value with aces counted high.
    pub fn value(self) -> u32 {
        match self.rank {
            1 => 11,
            11..=13 => 10,
            rank => rank as u32,
        }
    }

    fn rank_label(self) -> String {
        match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            rank => rank.to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rank_label(), self.suit.symbol())
    }
}

/// Total of a hand, demoting aces from 11 to 1 one at a time while above 21.
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut total: u32 = hand.iter().map(|card| card.value()).sum();
    let mut aces = hand.iter().filter(|card| card.rank == 1).count();

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Formats a hand as backtick-quoted cards.
pub fn format_hand(hand: &[Card]) -> String {
    hand.iter()
        .map(|card| format!("`{}`", card))
        .collect::<Vec<_>>()
        .join("  ")
}

/// A deck of 52 unique cards drawn from the top.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|suit| (1..=13).map(move |rank| Card::new(rank, *suit)))
            .collect();
        cards.shuffle(rng);

        Self { cards }
    }

    /// Deck whose next draws are `cards` in order.
    #[cfg(test)]
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut cards = cards;
        cards.reverse();
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player's opening two cards already exceed 21
    InitialBust,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    Push,
    DealerHigher,
}

impl Outcome {
    pub fn title(self) -> &'static str {
        match self {
            Outcome::InitialBust => "Bust!",
            Outcome::PlayerBust => "Bust! You lose.",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::PlayerHigher => "You win!",
            Outcome::Push => "It's a draw!",
            Outcome::DealerHigher => "You lose!",
        }
    }

    /// Gold movement for a finished hand.
    ///
    /// Wins pay one and a half times the bet rounded half to even. A push moves no gold but
    /// is recorded as a loss.
    pub fn settlement(self, bet: i64) -> Settlement {
        match self {
            Outcome::DealerBust | Outcome::PlayerHigher => {
                Settlement::win((bet as f64 * 1.5).round_ties_even() as i64)
            }
            Outcome::Push => Settlement {
                gold_delta: 0,
                won: false,
            },
            Outcome::InitialBust | Outcome::PlayerBust | Outcome::DealerHigher => {
                Settlement::loss(bet)
            }
        }
    }
}

/// State of one blackjack game.
#[derive(Debug, Clone)]
pub struct BlackjackHand {
    deck: Deck,
    pub player: Vec<Card>,
    pub dealer: Vec<Card>,
    pub bet: i64,
    outcome: Option<Outcome>,
}

impl BlackjackHand {
    /// Deals two cards each from a fresh shuffled deck.
    pub fn deal<R: Rng + ?Sized>(bet: i64, rng: &mut R) -> Self {
        Self::from_deck(bet, Deck::shuffled(rng))
    }

    /// Deals from `deck`: player, player, dealer, dealer.
    pub fn from_deck(bet: i64, mut deck: Deck) -> Self {
        let player = deck.draw().into_iter().chain(deck.draw()).collect();
        let dealer = deck.draw().into_iter().chain(deck.draw()).collect();
        let mut hand = Self {
            deck,
            player,
            dealer,
            bet,
            outcome: None,
        };

        if hand.player_value() > BLACKJACK {
            hand.outcome = Some(Outcome::InitialBust);
        }

        hand
    }

    pub fn player_value(&self) -> u32 {
        hand_value(&self.player)
    }

    pub fn dealer_value(&self) -> u32 {
        hand_value(&self.dealer)
    }

    /// The dealer's face-up card.
    pub fn dealer_shows(&self) -> Option<Card> {
        self.dealer.first().copied()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Draws one card for the player.
    ///
    /// # Returns
    /// - `Some(Outcome::PlayerBust)` - The draw took the player over 21
    /// - `None` - Game continues, or was already resolved
    pub fn hit(&mut self) -> Option<Outcome> {
        if self.is_resolved() {
            return None;
        }

        if let Some(card) = self.deck.draw() {
            self.player.push(card);
        }
        if self.player_value() > BLACKJACK {
            self.outcome = Some(Outcome::PlayerBust);
        }

        self.outcome
    }

    /// Plays out the dealer and resolves the game.
    ///
    /// # Returns
    /// - `Some(Outcome)` - Result of the game
    /// - `None` - Game was already resolved
    pub fn stand(&mut self) -> Option<Outcome> {
        if self.is_resolved() {
            return None;
        }

        while self.dealer_value() < DEALER_STANDS_ON {
            match self.deck.draw() {
                Some(card) => self.dealer.push(card),
                None => break,
            }
        }

        let player = self.player_value();
        let dealer = self.dealer_value();
        let outcome = if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if player > dealer {
            Outcome::PlayerHigher
        } else if dealer > player {
            Outcome::DealerHigher
        } else {
            Outcome::Push
        };
        self.outcome = Some(outcome);

        self.outcome
    }
}
