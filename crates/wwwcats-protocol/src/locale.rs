//! Localization keys.
//!
//! The server never sends display text, only keys. A key is a fixed prefix
//! plus a token from the message (`bcast` + `starting` -> `bcast_starting`);
//! error codes are used bare. The string table itself belongs to the host
//! application behind the [`Locale`] trait. [`English`] is a built-in table
//! for terminals and tests.

use std::fmt;

/// The families of localized strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    Message,
    Bcast,
    Card,
    Question,
    Title,
}

impl KeyPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message_",
            Self::Bcast => "bcast_",
            Self::Card => "card_",
            Self::Question => "question_",
            Self::Title => "title_",
        }
    }
}

/// A key into the string table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleKey(String);

impl LocaleKey {
    /// `prefix` followed by `token`.
    pub fn new(prefix: KeyPrefix, token: &str) -> Self {
        Self(format!("{}{token}", prefix.as_str()))
    }

    /// The bare key used for `err` codes and local errors.
    pub fn error(code: &str) -> Self {
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A string table.
pub trait Locale: Send + Sync {
    /// Looks up the text for `key`.
    fn lookup(&self, key: &LocaleKey) -> Option<&str>;

    /// The text for `key`, or the key itself when the table lacks it.
    fn text(&self, key: &LocaleKey) -> String {
        self.lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn lookup(&self, key: &LocaleKey) -> Option<&str> {
        let text = match key.as_str() {
            "username_exists" => "Somebody in that lobby already has that name.",
            "illegal_move" => "The server refused that move.",
            "bad_version" => "This client is out of date with the server.",
            "one_word" => "Names and lobbies must be a single word.",
            "already_connecting" => "Already connecting, hang on.",
            "unknown_error" => "The server ended the session.",

            "message_spectating" => "You are spectating. Type /join to play.",
            "message_spectating_started" => {
                "A game is in progress. You are spectating."
            }

            "bcast_starting" => "The game is starting!",
            "bcast_min_players" => "At least two players are needed to start.",
            "bcast_max_players" => "Too many players. The limit is six.",
            "bcast_high_players" => "Six players. This could take a while.",
            "bcast_no_nope" => "There is nothing to nope.",

            "card_defuse" => "Defuse",
            "card_nope" => "Nope",
            "card_skip" => "Skip",
            "card_attack" => "Attack",
            "card_see3" => "See the Future",
            "card_shuffle" => "Shuffle",
            "card_favour" => "Favour",
            "card_random1" => "Taco Cat",
            "card_random2" => "Hairy Potato Cat",
            "card_random3" => "Rainbow Cat",
            "card_random4" => "Beard Cat",
            "card_random5" => "Cattermelon",
            "card_exploding" => "Exploding Cat",

            "question_favour_who" => "Who should do you a favour?",
            "question_favour_what" => "Pick a card to give away.",
            "question_random_who" => "Who do you want to take a random card from?",
            "question_steal_who" => "Who do you want to steal from?",
            "question_steal_what" => "Which card do you want to steal?",
            "question_defuse_pos" => {
                "Where should the exploding cat go back? (0 is the top)"
            }

            "title_your_turn" => "Your turn!",
            _ => return None,
        };
        Some(text)
    }
}
