//! Inbound dispatch: one server message in, session updates and events out.
//!
//! Each message is processed to completion before the next is read. Most
//! messages update the session and report what changed; a few end it. The
//! dispatcher never fails: malformed and unknown messages are logged and
//! skipped.

use std::sync::Arc;

use wwwcats_protocol::{
    Card, English, Exchange, KeyPrefix, Locale, LocaleKey, PROTOCOL_VERSION,
    ProtocolError, ServerMessage, TextCodec,
};
use wwwcats_session::{Combo, Session};

use crate::presentation::{Aspect, CloseReason, Event, Presentation, Reveal};

/// String-table key for an `err` that carries no code.
const UNKNOWN_ERROR: &str = "unknown_error";

/// What the loop should do after a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close(CloseReason),
}

/// Applies server messages to a [`Session`].
pub struct Dispatcher {
    codec: TextCodec,
    locale: Arc<dyn Locale>,
}

impl Dispatcher {
    pub fn new(locale: Arc<dyn Locale>) -> Self {
        Self {
            codec: TextCodec::new(),
            locale,
        }
    }

    /// The codec in use (switched by the `version` greeting).
    pub fn codec(&self) -> TextCodec {
        self.codec
    }

    pub fn locale(&self) -> &dyn Locale {
        self.locale.as_ref()
    }

    /// Decodes and applies one raw message.
    pub fn handle_raw(
        &mut self,
        session: &mut Session,
        raw: &str,
        out: &mut impl Presentation,
    ) -> Flow {
        match self.codec.decode(raw) {
            Ok(msg) => self.handle(session, msg, out),
            Err(ProtocolError::UnknownOpcode(opcode)) => {
                tracing::warn!(%opcode, raw, "unknown opcode ignored");
                Flow::Continue
            }
            Err(e) => {
                tracing::warn!(error = %e, raw, "malformed message ignored");
                Flow::Continue
            }
        }
    }

    /// Applies one decoded message.
    pub fn handle(
        &mut self,
        session: &mut Session,
        msg: ServerMessage,
        out: &mut impl Presentation,
    ) -> Flow {
        match msg {
            ServerMessage::Version(token) => {
                return self.negotiate(token);
            }
            ServerMessage::Error { code } => {
                let key =
                    LocaleKey::error(code.as_deref().unwrap_or(UNKNOWN_ERROR));
                let message = self.locale.text(&key);
                tracing::warn!(code = ?code, "server error");
                return Flow::Close(CloseReason::ServerError { code, message });
            }

            // -- Roster --
            ServerMessage::Joins(name) => {
                if name == session.identity().name() {
                    if session.acknowledge_join() {
                        out.notify(session, Event::Entered);
                    } else {
                        tracing::debug!("repeat join acknowledgement ignored");
                    }
                } else {
                    session.roster.add_spectator(&name);
                    self.log(session, out, format!("{name} joined as a spectator."));
                    out.notify(session, Event::Changed(Aspect::Roster));
                }
            }
            ServerMessage::Parts(name) => {
                session.roster.remove_spectator(&name);
                self.log(session, out, format!("{name} left the game."));
                out.notify(session, Event::Changed(Aspect::Roster));
            }
            ServerMessage::Upgrades(name) => {
                session.roster.remove_spectator(&name);
                self.log(session, out, format!("{name} is now playing."));
                out.notify(session, Event::Changed(Aspect::Roster));
            }
            ServerMessage::Downgrades(name) => {
                session.roster.add_spectator(&name);
                self.log(session, out, format!("{name} is now spectating."));
                out.notify(session, Event::Changed(Aspect::Roster));
            }
            ServerMessage::Spectators(names) => {
                session.roster.set_spectators(names);
                out.notify(session, Event::Changed(Aspect::Roster));
            }
            ServerMessage::Players(names) => {
                session.roster.set_players(names);
                out.notify(session, Event::Changed(Aspect::Roster));
            }

            // -- Log and info panel --
            ServerMessage::Chat { name, text } => {
                out.notify(session, Event::Chat { name, text });
            }
            ServerMessage::Message { key } => {
                let text =
                    self.locale.text(&LocaleKey::new(KeyPrefix::Message, &key));
                session.table.info_message = Some(key);
                out.notify(session, Event::Info(Some(text)));
            }
            ServerMessage::ClearMessage => {
                session.table.info_message = None;
                out.notify(session, Event::Info(None));
            }
            ServerMessage::Broadcast { key } => {
                let text =
                    self.locale.text(&LocaleKey::new(KeyPrefix::Bcast, &key));
                self.log(session, out, text);
            }

            // -- Cards and turns --
            ServerMessage::Hand(cards) => {
                session.hand.replace(cards);
                out.notify(session, Event::Changed(Aspect::Hand));
            }
            ServerMessage::DrawPile(present) => {
                session.table.draw_pile = present;
                out.notify(session, Event::Changed(Aspect::Table));
            }
            ServerMessage::CardsLeft(count) => {
                session.table.cards_left = Some(count);
                out.notify(session, Event::Changed(Aspect::Table));
            }
            ServerMessage::NowPlaying(name) => {
                self.log(session, out, format!("It is {name}'s turn."));
                session.set_now_playing(name);
                out.notify(session, Event::Changed(Aspect::Turn));
                if session.is_our_turn() {
                    out.notify(session, Event::Attention);
                }
            }
            ServerMessage::Drew(card) => {
                let line = format!("You drew {}.", self.card_name(&card));
                self.log(session, out, line);
                out.notify(session, Event::Reveal(Reveal::Cards(vec![card])));
            }
            ServerMessage::DrewOther(name) => {
                self.log(session, out, format!("{name} drew a card."));
                out.notify(session, Event::Reveal(Reveal::FaceDown));
            }
            ServerMessage::Exploded(name) => {
                self.log(session, out, format!("{name} exploded!"));
                let card = Card::from("exploding");
                out.notify(session, Event::Reveal(Reveal::Cards(vec![card])));
            }
            ServerMessage::Wins(name) => {
                session.clear_turn();
                self.log(session, out, format!("{name} wins!"));
                out.notify(session, Event::Changed(Aspect::Turn));
            }
            ServerMessage::Defusing => {
                session.gate.defusing = true;
                self.log(
                    session,
                    out,
                    "You drew an exploding cat! Play a defuse card.".into(),
                );
                out.notify(session, Event::Changed(Aspect::Gate));
            }
            ServerMessage::Played { name, card } => {
                let line = format!("{name} played {}.", self.card_name(&card));
                self.log(session, out, line);
                session.table.discard = Some(card);
                out.notify(session, Event::Changed(Aspect::Table));
            }
            ServerMessage::PlayedMultiple { name, count, card } => {
                let line =
                    format!("{name} played {count} x {}.", self.card_name(&card));
                self.log(session, out, line);
                session.table.discard = Some(card.clone());
                out.notify(session, Event::Changed(Aspect::Table));

                let shown = count.min(u32::from(Combo::MAX)) as usize;
                out.notify(session, Event::Reveal(Reveal::Cards(vec![card; shown])));
            }
            ServerMessage::NoDiscard => {
                session.table.discard = None;
                out.notify(session, Event::Changed(Aspect::Table));
            }
            ServerMessage::Seen(cards) => {
                let names: Vec<String> =
                    cards.iter().map(|c| self.card_name(c)).collect();
                let line = format!("The next cards are: {}.", names.join(", "));
                self.log(session, out, line);
                out.notify(session, Event::Reveal(Reveal::Cards(cards)));
            }

            // -- Questions --
            ServerMessage::Question { kind, arg } => {
                session.ask(kind.clone(), arg);
                let prompt = self
                    .locale
                    .text(&LocaleKey::new(KeyPrefix::Question, kind.as_str()));
                if let Some(choices) = session.choices() {
                    out.notify(
                        session,
                        Event::Question {
                            kind,
                            prompt,
                            choices,
                        },
                    );
                }
            }
            ServerMessage::QuestionCancel => {
                if session.cancel_question().is_some() {
                    out.notify(session, Event::QuestionCleared);
                } else {
                    tracing::debug!("q_cancel with no pending question");
                }
            }

            ServerMessage::Exchange(exchange) => {
                let line = self.narrate(&exchange);
                self.log(session, out, line);
            }

            ServerMessage::Lock => {
                session.gate.locked = true;
                out.notify(session, Event::Changed(Aspect::Gate));
            }
            ServerMessage::Unlock => {
                session.gate.locked = false;
                out.notify(session, Event::Changed(Aspect::Gate));
            }
        }
        Flow::Continue
    }

    /// Handles `version <n>`: switch tables or give up.
    ///
    /// A token that is not a revision number at all is a mismatch too.
    fn negotiate(&mut self, token: String) -> Flow {
        let codec = token
            .parse::<u32>()
            .ok()
            .and_then(|version| TextCodec::for_version(version).ok());
        match codec {
            Some(codec) if codec.is_current() => {
                tracing::debug!(
                    version = codec.version(),
                    "server protocol version accepted"
                );
                self.codec = codec;
                Flow::Continue
            }
            _ => {
                tracing::warn!(
                    server = %token,
                    client = PROTOCOL_VERSION,
                    "protocol version mismatch"
                );
                Flow::Close(CloseReason::VersionMismatch {
                    server: token,
                    client: PROTOCOL_VERSION,
                })
            }
        }
    }

    fn log(&self, session: &Session, out: &mut impl Presentation, line: String) {
        out.notify(session, Event::Log(line));
    }

    fn card_name(&self, card: &Card) -> String {
        self.locale
            .text(&LocaleKey::new(KeyPrefix::Card, card.as_str()))
    }

    fn narrate(&self, exchange: &Exchange) -> String {
        match exchange {
            Exchange::Favoured { asker, target } => {
                format!("{asker} asked {target} for a favour.")
            }
            Exchange::FavourComplete { asker, target } => {
                format!("{target} gave {asker} a card.")
            }
            Exchange::FavourReceived { from, card } => {
                format!("{from} gave you {}.", self.card_name(card))
            }
            Exchange::FavourGave { to, card } => {
                format!("You gave {to} {}.", self.card_name(card))
            }
            Exchange::Randomed { taker, target } => {
                format!("{taker} took a random card from {target}.")
            }
            Exchange::RandomEmpty { taker, target } => {
                format!("{taker} tried to take a card from {target}, who had none.")
            }
            Exchange::RandomReceived { from, card } => {
                format!("You took {} from {from}.", self.card_name(card))
            }
            Exchange::RandomGave { to, card } => {
                format!("{to} took your {}.", self.card_name(card))
            }
            Exchange::StealFailed {
                thief,
                target,
                card: Some(card),
            } => format!(
                "{thief} tried to steal {} from {target}, who had none.",
                self.card_name(card)
            ),
            Exchange::StealFailed { thief, target, card: None } => {
                format!("{thief} tried to steal from {target} and failed.")
            }
            Exchange::StealSucceeded {
                thief,
                target,
                card: Some(card),
            } => format!(
                "{thief} stole {} from {target}.",
                self.card_name(card)
            ),
            Exchange::StealSucceeded { thief, target, card: None } => {
                format!("{thief} stole a card from {target}.")
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(English))
    }
}
