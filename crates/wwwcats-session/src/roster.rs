//! Lobby membership: the ordered player list and the spectator set.

use serde::Serialize;

/// Who is in the lobby.
///
/// `players` is in server-assigned turn order and is replaced verbatim on
/// every `players` message. `spectators` is a set, kept in arrival order for
/// display. A name is never in both: whichever message placed it last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<String>,
    spectators: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn spectators(&self) -> &[String] {
        &self.spectators
    }

    /// Replaces the player order wholesale.
    pub fn set_players(&mut self, players: Vec<String>) {
        self.spectators.retain(|s| !players.contains(s));
        self.players = players;
    }

    /// Replaces the spectator set wholesale.
    pub fn set_spectators(&mut self, spectators: Vec<String>) {
        self.players.retain(|p| !spectators.contains(p));
        self.spectators.clear();
        for name in spectators {
            if !self.spectators.contains(&name) {
                self.spectators.push(name);
            }
        }
    }

    /// Adds `name` to the spectators (a join or a downgrade).
    ///
    /// Returns `false` if they were already spectating.
    pub fn add_spectator(&mut self, name: &str) -> bool {
        self.players.retain(|p| p != name);
        if self.spectators.iter().any(|s| s == name) {
            return false;
        }
        self.spectators.push(name.to_string());
        true
    }

    /// Removes `name` from the spectators (a part or an upgrade).
    ///
    /// Players are left alone; the next `players` message places them.
    pub fn remove_spectator(&mut self, name: &str) -> bool {
        let before = self.spectators.len();
        self.spectators.retain(|s| s != name);
        self.spectators.len() != before
    }

    /// The turn-order position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p == name)
    }

    pub fn is_player(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Players other than `me`, in turn order.
    pub fn opponents(&self, me: &str) -> Vec<String> {
        self.players.iter().filter(|p| *p != me).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.players.clear();
        self.spectators.clear();
    }
}
