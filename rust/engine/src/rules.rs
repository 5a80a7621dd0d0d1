use serde::{Deserialize, Serialize};

use crate::hand::HandScore;

/// The dealer draws while below this total and stands on every 17, soft or hard.
pub const DEALER_STAND_TOTAL: u8 = 17;

/// Verdict of a settled round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player opened with a natural, dealer did not
    PlayerBlackjack,
    /// Dealer opened with a natural, player did not
    DealerBlackjack,
    /// Both opened with a natural
    Push,
    /// Player went over 21 while hitting
    PlayerBust,
    /// Dealer went over 21 while drawing
    DealerBust,
    /// Higher total, no bust
    PlayerWins,
    DealerWins,
    /// Equal totals after the dealer stood
    Tie,
}

/// Who took the round, for aggregation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Dealer,
    Nobody,
}

impl Outcome {
    pub fn winner(self) -> Winner {
        match self {
            Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::PlayerWins => Winner::Player,
            Outcome::DealerBlackjack | Outcome::PlayerBust | Outcome::DealerWins => Winner::Dealer,
            Outcome::Push | Outcome::Tie => Winner::Nobody,
        }
    }

    /// Result line shown to the player once the round is settled.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerBlackjack => "Blackjack! Player wins!",
            Outcome::DealerBlackjack => "Dealer has blackjack! Dealer wins!",
            Outcome::Push => "Both have blackjack! It's a tie!",
            Outcome::PlayerBust => "Player busts! Dealer wins!",
            Outcome::DealerBust => "Dealer busts! Player wins!",
            Outcome::PlayerWins => "Player wins!",
            Outcome::DealerWins => "Dealer wins!",
            Outcome::Tie => "It's a tie!",
        }
    }

    /// True for the outcomes decided by the opening deal alone.
    pub fn is_opening(self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjack | Outcome::DealerBlackjack | Outcome::Push
        )
    }
}

/// Fixed dealer policy: draw below 17, stand on any 17 including soft 17.
pub fn dealer_should_draw(dealer: &HandScore) -> bool {
    dealer.total < DEALER_STAND_TOTAL
}

/// Checks the two-card opening hands for naturals.
///
/// Returns `None` when neither side has blackjack and play continues.
pub fn resolve_opening(player: &HandScore, dealer: &HandScore) -> Option<Outcome> {
    match (player.is_blackjack, dealer.is_blackjack) {
        (true, true) => Some(Outcome::Push),
        (true, false) => Some(Outcome::PlayerBlackjack),
        (false, true) => Some(Outcome::DealerBlackjack),
        (false, false) => None,
    }
}

/// Compares two final hands.
///
/// Total over every score pair: a busted player loses no matter what the
/// dealer holds, then a busted dealer loses, then the higher total wins.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::Card;
/// use blackjack_engine::hand::score;
/// use blackjack_engine::rules::{resolve, Outcome};
///
/// let hand = |labels: &[&str]| {
///     let cards: Vec<Card> = labels.iter().map(|s| s.parse().unwrap()).collect();
///     score(&cards)
/// };
/// assert_eq!(resolve(&hand(&["10S", "7H"]), &hand(&["6C", "KD", "5S"])), Outcome::DealerWins);
/// assert_eq!(resolve(&hand(&["10S", "9H"]), &hand(&["10C", "6D", "8S"])), Outcome::DealerBust);
/// ```
pub fn resolve(player: &HandScore, dealer: &HandScore) -> Outcome {
    if player.is_bust {
        return Outcome::PlayerBust;
    }
    if dealer.is_bust {
        return Outcome::DealerBust;
    }
    match player.total.cmp(&dealer.total) {
        std::cmp::Ordering::Greater => Outcome::PlayerWins,
        std::cmp::Ordering::Less => Outcome::DealerWins,
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}
