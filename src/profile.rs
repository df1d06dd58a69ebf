//! Player profile and ticket gating
//!
//! The backend owns the durable balance; this is the client-side view used
//! to gate play and to echo updates back over HTTP. Running out of tickets
//! blocks a new round but is never an error the session can crash on.

use serde::{Deserialize, Serialize};

/// Raised when a round is requested with an empty ticket balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoTickets;

impl std::fmt::Display for NoTickets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no more tickets available")
    }
}

impl std::error::Error for NoTickets {}

/// Client-side view of one player's balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub points: i64,
    pub tickets: u32,
}

impl Profile {
    pub fn new(username: impl Into<String>, points: i64, tickets: u32) -> Self {
        Self {
            username: username.into(),
            points,
            tickets,
        }
    }

    /// Consume one ticket to start a round. Returns the remaining balance,
    /// which the caller reports to the backend via `updateTickets`.
    pub fn spend_ticket(&mut self) -> Result<u32, NoTickets> {
        if self.tickets == 0 {
            return Err(NoTickets);
        }
        self.tickets -= 1;
        Ok(self.tickets)
    }

    /// Fold a finished round's score into the local points balance
    pub fn apply_game_result(&mut self, score: u32) {
        self.points += i64::from(score);
    }

    /// Whether the Play button should be enabled
    pub fn can_play(&self) -> bool {
        self.tickets > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_ticket_then_rejected() {
        let mut profile = Profile::new("alice", 0, 1);
        assert!(profile.can_play());
        assert_eq!(profile.spend_ticket(), Ok(0));
        assert_eq!(profile.tickets, 0);
        assert!(!profile.can_play());
        assert_eq!(profile.spend_ticket(), Err(NoTickets));
        assert_eq!(profile.tickets, 0);
    }

    #[test]
    fn test_game_result_adds_points() {
        let mut profile = Profile::new("bob", 40, 3);
        profile.apply_game_result(12);
        assert_eq!(profile.points, 52);
    }
}
