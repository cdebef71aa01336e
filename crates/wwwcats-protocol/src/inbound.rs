//! Inbound messages: everything the server can tell the client.

use crate::table::{Opcode, OpcodeTable};
use crate::token::Tokens;
use crate::{Card, ProtocolError, QuestionKind};

/// A parsed server message.
///
/// Player names are plain strings; the protocol guarantees they contain no
/// spaces, and an empty token is never accepted as a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `version <n>`: the server's protocol revision, as sent.
    ///
    /// Kept as the raw token (empty if missing): anything other than the
    /// compiled revision is fatal, including text that is not a number.
    Version(String),
    /// `err [code]`: fatal; the session ends. The code may be missing.
    Error { code: Option<String> },

    // -- Roster --
    Joins(String),
    Parts(String),
    Upgrades(String),
    Downgrades(String),
    Spectators(Vec<String>),
    Players(Vec<String>),

    // -- Log and info panel --
    Chat { name: String, text: String },
    /// Show the info panel with `message_<key>`.
    Message { key: String },
    ClearMessage,
    /// Log the localized `bcast_<key>` text.
    Broadcast { key: String },

    // -- Cards and turns --
    Hand(Vec<Card>),
    DrawPile(bool),
    CardsLeft(u32),
    NowPlaying(String),
    Drew(Card),
    DrewOther(String),
    Exploded(String),
    Wins(String),
    Defusing,
    Played { name: String, card: Card },
    PlayedMultiple { name: String, count: u32, card: Card },
    NoDiscard,
    Seen(Vec<Card>),

    // -- Questions --
    Question { kind: QuestionKind, arg: Option<String> },
    QuestionCancel,

    /// Narration of a favour, random take, or steal between two players.
    Exchange(Exchange),

    Lock,
    Unlock,
}

/// Card movements between players, reported after the server resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// `asker` asked `target` for a favour.
    Favoured { asker: String, target: String },
    /// `target` gave `asker` a card.
    FavourComplete { asker: String, target: String },
    /// We received `card` from `from` as a favour.
    FavourReceived { from: String, card: Card },
    /// We gave `card` to `to` as a favour.
    FavourGave { to: String, card: Card },
    /// `taker` took a random card from `target`.
    Randomed { taker: String, target: String },
    /// `taker` tried to take a random card but `target` had none.
    RandomEmpty { taker: String, target: String },
    /// We took `card` at random from `from`.
    RandomReceived { from: String, card: Card },
    /// `to` took `card` at random from us.
    RandomGave { to: String, card: Card },
    /// `thief` asked `target` for a card type they did not hold.
    StealFailed { thief: String, target: String, card: Option<Card> },
    /// `thief` took a named card from `target`.
    StealSucceeded { thief: String, target: String, card: Option<Card> },
}

impl ServerMessage {
    /// Parses one raw message against `table`.
    pub fn parse(
        raw: &str,
        table: &OpcodeTable,
    ) -> Result<Self, ProtocolError> {
        let tokens = Tokens::new(raw);
        if tokens.is_empty() {
            return Err(ProtocolError::Empty);
        }
        let opcode = table.lookup(tokens.opcode()).ok_or_else(|| {
            ProtocolError::UnknownOpcode(tokens.opcode().to_string())
        })?;
        let args = Args { tokens: &tokens, opcode };

        let msg = match opcode {
            Opcode::Version => {
                Self::Version(tokens.get(1).unwrap_or("").to_string())
            }
            Opcode::Err => Self::Error {
                code: tokens.get(1).map(str::to_string),
            },
            Opcode::Joins => Self::Joins(args.name(1)?),
            Opcode::Parts => Self::Parts(args.name(1)?),
            Opcode::Upgrades => Self::Upgrades(args.name(1)?),
            Opcode::Downgrades => Self::Downgrades(args.name(1)?),
            Opcode::Spectators => Self::Spectators(args.names()),
            Opcode::Players => Self::Players(args.names()),
            Opcode::Chat => Self::Chat {
                name: args.name(1)?,
                text: tokens.remainder(2).to_string(),
            },
            Opcode::Message => Self::Message {
                key: args.rest(1)?,
            },
            Opcode::ClearMessage => Self::ClearMessage,
            Opcode::Bcast => Self::Broadcast {
                key: args.rest(1)?,
            },
            Opcode::Hand => Self::Hand(args.cards()),
            Opcode::DrawPile => match args.word(1)? {
                "yes" => Self::DrawPile(true),
                "no" => Self::DrawPile(false),
                other => return Err(args.invalid(other)),
            },
            Opcode::CardsLeft => {
                let value = args.word(1)?;
                Self::CardsLeft(value.parse().map_err(|_| args.invalid(value))?)
            }
            Opcode::NowPlaying => Self::NowPlaying(args.name(1)?),
            Opcode::Drew => Self::Drew(args.card(1)?),
            Opcode::DrewOther => Self::DrewOther(args.name(1)?),
            Opcode::Exploded => Self::Exploded(args.name(1)?),
            Opcode::Wins => Self::Wins(args.name(1)?),
            Opcode::Defusing => Self::Defusing,
            Opcode::Played => Self::Played {
                name: args.name(1)?,
                card: args.card(2)?,
            },
            Opcode::PlayedMultiple => {
                let value = args.word(2)?;
                Self::PlayedMultiple {
                    name: args.name(1)?,
                    count: value.parse().map_err(|_| args.invalid(value))?,
                    card: args.card(3)?,
                }
            }
            Opcode::NoDiscard => Self::NoDiscard,
            Opcode::Seen => Self::Seen(args.cards()),
            Opcode::Question => Self::Question {
                kind: QuestionKind::from_token(args.word(1)?),
                arg: tokens.get(2).map(str::to_string),
            },
            Opcode::QuestionCancel => Self::QuestionCancel,
            Opcode::Favoured => Self::Exchange(Exchange::Favoured {
                asker: args.name(1)?,
                target: args.name(2)?,
            }),
            Opcode::FavourComplete => Self::Exchange(Exchange::FavourComplete {
                asker: args.name(1)?,
                target: args.name(2)?,
            }),
            Opcode::FavourRecv => Self::Exchange(Exchange::FavourReceived {
                from: args.name(1)?,
                card: args.card(2)?,
            }),
            Opcode::FavourGave => Self::Exchange(Exchange::FavourGave {
                to: args.name(1)?,
                card: args.card(2)?,
            }),
            Opcode::Randomed => Self::Exchange(Exchange::Randomed {
                taker: args.name(1)?,
                target: args.name(2)?,
            }),
            Opcode::RandomN => Self::Exchange(Exchange::RandomEmpty {
                taker: args.name(1)?,
                target: args.name(2)?,
            }),
            Opcode::RandomRecv => Self::Exchange(Exchange::RandomReceived {
                from: args.name(1)?,
                card: args.card(2)?,
            }),
            Opcode::RandomGave => Self::Exchange(Exchange::RandomGave {
                to: args.name(1)?,
                card: args.card(2)?,
            }),
            Opcode::StealN => Self::Exchange(Exchange::StealFailed {
                thief: args.name(1)?,
                target: args.name(2)?,
                card: tokens.get(3).map(Card::from),
            }),
            Opcode::StealY => Self::Exchange(Exchange::StealSucceeded {
                thief: args.name(1)?,
                target: args.name(2)?,
                card: tokens.get(3).map(Card::from),
            }),
            Opcode::Lock => Self::Lock,
            Opcode::Unlock => Self::Unlock,
        };
        Ok(msg)
    }
}

/// Positional argument accessors that report errors against the opcode.
struct Args<'t, 'a> {
    tokens: &'t Tokens<'a>,
    opcode: Opcode,
}

impl<'a> Args<'_, 'a> {
    fn word(&self, position: usize) -> Result<&'a str, ProtocolError> {
        self.tokens
            .get(position)
            .ok_or(ProtocolError::MissingArgument {
                opcode: self.opcode.as_str(),
                position,
            })
    }

    fn name(&self, position: usize) -> Result<String, ProtocolError> {
        self.word(position).map(str::to_string)
    }

    fn card(&self, position: usize) -> Result<Card, ProtocolError> {
        self.word(position).map(Card::from)
    }

    fn rest(&self, position: usize) -> Result<String, ProtocolError> {
        let rest = self.tokens.remainder(position);
        if rest.is_empty() {
            return Err(ProtocolError::MissingArgument {
                opcode: self.opcode.as_str(),
                position,
            });
        }
        Ok(rest.to_string())
    }

    fn names(&self) -> Vec<String> {
        self.tokens.words().map(str::to_string).collect()
    }

    fn cards(&self) -> Vec<Card> {
        self.tokens.words().map(Card::from).collect()
    }

    fn invalid(&self, value: &str) -> ProtocolError {
        ProtocolError::InvalidArgument {
            opcode: self.opcode.as_str(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<ServerMessage, ProtocolError> {
        ServerMessage::parse(raw, OpcodeTable::current())
    }

    #[test]
    fn test_parse_version_and_err() {
        assert_eq!(parse("version 3"), Ok(ServerMessage::Version("3".into())));
        assert_eq!(
            parse("err username_exists"),
            Ok(ServerMessage::Error {
                code: Some("username_exists".into())
            })
        );
        // Unreadable revisions still parse; deciding they are fatal is the
        // caller's job.
        assert_eq!(
            parse("version 4.0"),
            Ok(ServerMessage::Version("4.0".into()))
        );
        assert_eq!(parse("version"), Ok(ServerMessage::Version(String::new())));
        assert_eq!(parse("err"), Ok(ServerMessage::Error { code: None }));
    }

    #[test]
    fn test_parse_roster_lists_in_order() {
        assert_eq!(
            parse("players carol alice bob"),
            Ok(ServerMessage::Players(vec![
                "carol".into(),
                "alice".into(),
                "bob".into()
            ]))
        );
        // The server writes an empty list as a bare opcode.
        assert_eq!(parse("spectators"), Ok(ServerMessage::Spectators(vec![])));
    }

    #[test]
    fn test_parse_chat_keeps_free_text_verbatim() {
        assert_eq!(
            parse("chat bob nope  nope nope"),
            Ok(ServerMessage::Chat {
                name: "bob".into(),
                text: "nope  nope nope".into()
            })
        );
        assert_eq!(
            parse("chat bob"),
            Ok(ServerMessage::Chat {
                name: "bob".into(),
                text: String::new()
            })
        );
    }

    #[test]
    fn test_parse_message_and_bcast_keys() {
        assert_eq!(
            parse("message spectating_started"),
            Ok(ServerMessage::Message {
                key: "spectating_started".into()
            })
        );
        assert_eq!(
            parse("bcast min_players"),
            Ok(ServerMessage::Broadcast {
                key: "min_players".into()
            })
        );
        assert!(matches!(
            parse("bcast"),
            Err(ProtocolError::MissingArgument { opcode: "bcast", position: 1 })
        ));
    }

    #[test]
    fn test_parse_hand_and_empty_hand() {
        assert_eq!(
            parse("hand defuse nope random2"),
            Ok(ServerMessage::Hand(vec![
                Card::from("defuse"),
                Card::from("nope"),
                Card::from("random2")
            ]))
        );
        assert_eq!(parse("hand"), Ok(ServerMessage::Hand(vec![])));
    }

    #[test]
    fn test_parse_draw_pile_flag() {
        assert_eq!(parse("draw_pile yes"), Ok(ServerMessage::DrawPile(true)));
        assert_eq!(parse("draw_pile no"), Ok(ServerMessage::DrawPile(false)));
        assert!(parse("draw_pile maybe").is_err());
    }

    #[test]
    fn test_parse_played_multiple() {
        assert_eq!(
            parse("played_multiple alice 3 random4"),
            Ok(ServerMessage::PlayedMultiple {
                name: "alice".into(),
                count: 3,
                card: Card::from("random4")
            })
        );
    }

    #[test]
    fn test_parse_question_with_and_without_arg() {
        assert_eq!(
            parse("q favour_what alice"),
            Ok(ServerMessage::Question {
                kind: QuestionKind::FavourWhat,
                arg: Some("alice".into())
            })
        );
        assert_eq!(
            parse("q steal_what"),
            Ok(ServerMessage::Question {
                kind: QuestionKind::StealWhat,
                arg: None
            })
        );
        assert!(parse("q").is_err());
    }

    #[test]
    fn test_parse_steal_narration_with_optional_card() {
        assert_eq!(
            parse("steal_y alice bob defuse"),
            Ok(ServerMessage::Exchange(Exchange::StealSucceeded {
                thief: "alice".into(),
                target: "bob".into(),
                card: Some(Card::from("defuse"))
            }))
        );
        assert_eq!(
            parse("steal_n alice bob"),
            Ok(ServerMessage::Exchange(Exchange::StealFailed {
                thief: "alice".into(),
                target: "bob".into(),
                card: None
            }))
        );
    }

    #[test]
    fn test_parse_favour_narration() {
        assert_eq!(
            parse("favour_recv bob skip"),
            Ok(ServerMessage::Exchange(Exchange::FavourReceived {
                from: "bob".into(),
                card: Card::from("skip")
            }))
        );
    }

    #[test]
    fn test_parse_unknown_opcode() {
        assert_eq!(
            parse("teleport alice"),
            Err(ProtocolError::UnknownOpcode("teleport".into()))
        );
        assert_eq!(parse(""), Err(ProtocolError::Empty));
    }

    #[test]
    fn test_parse_missing_name_is_an_error() {
        // An empty token is never a valid player name.
        assert!(matches!(
            parse("now_playing "),
            Err(ProtocolError::MissingArgument { opcode: "now_playing", position: 1 })
        ));
    }
}
