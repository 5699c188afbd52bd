//! Players and their colours.

use crate::map::Rgb;
use serde::{Deserialize, Serialize};

/// Most players a game supports.
pub const MAX_PLAYERS: usize = 7;

/// Actions each player gets at the start of their turn.
pub const ACTIONS_PER_TURN: u8 = 1;

/// Player colours, assigned in seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    /// Seat 1.
    Red,
    /// Seat 2.
    Blue,
    /// Seat 3.
    Green,
    /// Seat 4.
    White,
    /// Seat 5.
    Teal,
    /// Seat 6.
    Purple,
    /// Seat 7.
    Yellow,
}

impl PlayerColor {
    /// Colours in seat order.
    pub const SEATS: [Self; MAX_PLAYERS] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::White,
        Self::Teal,
        Self::Purple,
        Self::Yellow,
    ];

    /// Display colour.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Red => Rgb::new(255, 0, 0),
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Green => Rgb::new(0, 255, 0),
            Self::White => Rgb::new(255, 255, 255),
            Self::Teal => Rgb::new(0, 255, 255),
            Self::Purple => Rgb::new(255, 0, 255),
            Self::Yellow => Rgb::new(255, 255, 0),
        }
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat number, starting at 1.
    pub number: u8,
    /// Display name.
    pub name: String,
    /// Colour of the player's units.
    pub color: PlayerColor,
    /// Actions left this turn.
    pub actions: u8,
}

impl Player {
    /// Create the player for a seat, or `None` if the seat does not exist.
    #[must_use]
    pub fn seat(number: u8) -> Option<Self> {
        let color = PlayerColor::SEATS.get(usize::from(number).checked_sub(1)?)?;
        Some(Self {
            number,
            name: format!("Player {number}"),
            color: *color,
            actions: ACTIONS_PER_TURN,
        })
    }

    /// Whether the player can still act this turn.
    #[must_use]
    pub const fn can_act(&self) -> bool {
        self.actions > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats() {
        let p = Player::seat(1).unwrap();
        assert_eq!(p.name, "Player 1");
        assert_eq!(p.color, PlayerColor::Red);
        assert!(p.can_act());
        assert_eq!(Player::seat(7).unwrap().color, PlayerColor::Yellow);
        assert!(Player::seat(0).is_none());
        assert!(Player::seat(8).is_none());
    }

    #[test]
    fn test_colors_distinct() {
        for (i, a) in PlayerColor::SEATS.iter().enumerate() {
            for b in &PlayerColor::SEATS[i + 1..] {
                assert_ne!(a.rgb(), b.rgb());
            }
        }
    }
}
