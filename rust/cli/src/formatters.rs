//! Card, hand, and round formatters for terminal display.
//!
//! Pure functions that turn engine values into terminal text. Suits use
//! Unicode symbols with an ASCII fallback for terminals that cannot render
//! them.
//!
//! ## Unicode vs ASCII Fallback
//!
//! On Windows the module checks for modern terminal environments (WT_SESSION,
//! TERM_PROGRAM, VSCODE_INJECTION); Unix-like systems are assumed to render
//! Unicode.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! assert!(format_hand(&[ace_spades]).starts_with("[A"));
//! ```

use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::engine::RoundView;

/// Face-down card placeholder.
pub const HIDDEN_CARD: &str = "??";

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// # Returns
///
/// `true` if Unicode symbols are supported, `false` for ASCII fallback
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as a string using Unicode symbols with ASCII fallback.
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Card as rank label plus suit, e.g. "10♥" or "10h".
///
/// # Example
///
/// ```rust
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// # use blackjack_cli::formatters::format_card;
///
/// let ten_hearts = Card::new(Rank::Ten, Suit::Hearts);
/// let formatted = format_card(&ten_hearts);
/// assert!(formatted == "10♥" || formatted == "10h");
/// ```
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Format a hand in bracket notation, "[A♠ K♥]" or "[]" if empty.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Like [`format_hand`], with face-down cards shown as [`HIDDEN_CARD`].
pub fn format_concealed_hand(cards: &[Option<Card>]) -> String {
    let formatted: Vec<String> = cards
        .iter()
        .map(|c| match c {
            Some(card) => format_card(card),
            None => HIDDEN_CARD.to_string(),
        })
        .collect();
    format!("[{}]", formatted.join(" "))
}

/// Renders a round snapshot as the lines a player would see at the table.
///
/// The dealer total is printed only once the hole card is revealed, and the
/// result line only once the round is settled.
pub fn format_view(view: &RoundView) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    lines.push(format!("Round: {}", view.round_id));
    lines.push(format!(
        "Player: {} ({})",
        format_hand(&view.player_cards),
        view.player_score
    ));
    let dealer = format_concealed_hand(&view.dealer_cards);
    lines.push(match view.dealer_score {
        Some(score) => format!("Dealer: {} ({})", dealer, score),
        None => format!("Dealer: {}", dealer),
    });
    if let Some(message) = &view.message {
        lines.push(format!("Result: {}", message));
    }
    if let Some(fault) = &view.fault {
        lines.push(format!("Halted: {}", fault));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_engine::cards::Rank;
    use blackjack_engine::game::{RoundId, RoundState};

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");

        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn test_format_hand_empty() {
        assert_eq!(format_hand(&[]), "[]");
    }

    #[test]
    fn test_format_concealed_hand_hides_hole_card() {
        let king = Card::new(Rank::King, Suit::Diamonds);
        let formatted = format_concealed_hand(&[None, Some(king)]);
        assert!(formatted.starts_with("[?? K"));
    }

    #[test]
    fn test_format_view_omits_concealed_dealer_total() {
        let view = RoundView {
            round_id: RoundId(3),
            state: RoundState::PlayerTurn,
            player_cards: vec![
                Card::new(Rank::Ten, Suit::Spades),
                Card::new(Rank::Seven, Suit::Spades),
            ],
            dealer_cards: vec![None, Some(Card::new(Rank::King, Suit::Diamonds))],
            dealer_concealed: true,
            player_score: 17,
            dealer_score: None,
            outcome: None,
            message: None,
            fault: None,
        };
        let lines = format_view(&view);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Round: #3");
        assert!(lines[1].ends_with("(17)"));
        assert!(!lines[2].contains('('));
    }
}
