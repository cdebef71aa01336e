//! Versioned opcode tables.
//!
//! The protocol has been revised several times, each revision adding or
//! renaming opcodes. Rather than one handler set per revision, the client
//! keeps one [`Opcode`] enum (what a message *means*) and a table per
//! revision that binds wire tokens to those meanings. The server's `version`
//! greeting selects the table; an unknown revision is fatal.

/// The protocol revision this client is built against.
pub const PROTOCOL_VERSION: u32 = 3;

/// The meaning of an inbound message, independent of its wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Version,
    Err,
    Joins,
    Parts,
    Upgrades,
    Downgrades,
    Spectators,
    Players,
    Chat,
    Message,
    ClearMessage,
    Bcast,
    Hand,
    DrawPile,
    CardsLeft,
    NowPlaying,
    Drew,
    DrewOther,
    Exploded,
    Wins,
    Defusing,
    Played,
    PlayedMultiple,
    NoDiscard,
    Question,
    QuestionCancel,
    Seen,
    Favoured,
    FavourComplete,
    FavourRecv,
    FavourGave,
    Randomed,
    RandomN,
    RandomRecv,
    RandomGave,
    StealN,
    StealY,
    Lock,
    Unlock,
}

impl Opcode {
    /// The canonical (current revision) spelling, used in errors and logs.
    pub fn as_str(self) -> &'static str {
        OpcodeTable::current()
            .bindings
            .iter()
            .chain(UNIVERSAL)
            .find(|(_, op)| *op == self)
            .map(|(token, _)| *token)
            .unwrap_or("?")
    }
}

/// Opcodes every revision understands. `version` must be readable before
/// we know which table applies, and `err` must always terminate.
const UNIVERSAL: &[(&str, Opcode)] =
    &[("version", Opcode::Version), ("err", Opcode::Err)];

const REVISION_3: &[(&str, Opcode)] = &[
    ("joins", Opcode::Joins),
    ("parts", Opcode::Parts),
    ("upgrades", Opcode::Upgrades),
    ("downgrades", Opcode::Downgrades),
    ("spectators", Opcode::Spectators),
    ("players", Opcode::Players),
    ("chat", Opcode::Chat),
    ("message", Opcode::Message),
    ("clear_message", Opcode::ClearMessage),
    ("bcast", Opcode::Bcast),
    ("hand", Opcode::Hand),
    ("draw_pile", Opcode::DrawPile),
    ("cards_left", Opcode::CardsLeft),
    ("now_playing", Opcode::NowPlaying),
    ("drew", Opcode::Drew),
    ("drew_other", Opcode::DrewOther),
    ("exploded", Opcode::Exploded),
    ("wins", Opcode::Wins),
    ("defusing", Opcode::Defusing),
    ("played", Opcode::Played),
    ("played_multiple", Opcode::PlayedMultiple),
    ("no_discard", Opcode::NoDiscard),
    ("q", Opcode::Question),
    ("q_cancel", Opcode::QuestionCancel),
    ("seen", Opcode::Seen),
    ("favoured", Opcode::Favoured),
    ("favour_complete", Opcode::FavourComplete),
    ("favour_recv", Opcode::FavourRecv),
    ("favour_gave", Opcode::FavourGave),
    ("randomed", Opcode::Randomed),
    ("random_n", Opcode::RandomN),
    ("random_recv", Opcode::RandomRecv),
    ("random_gave", Opcode::RandomGave),
    ("steal_n", Opcode::StealN),
    ("steal_y", Opcode::StealY),
    ("lock", Opcode::Lock),
    ("unlock", Opcode::Unlock),
];

/// Every revision this client can speak, oldest first.
static TABLES: &[OpcodeTable] = &[OpcodeTable {
    version: PROTOCOL_VERSION,
    bindings: REVISION_3,
}];

/// Wire token -> [`Opcode`] bindings for one protocol revision.
#[derive(Debug)]
pub struct OpcodeTable {
    version: u32,
    bindings: &'static [(&'static str, Opcode)],
}

impl OpcodeTable {
    /// The table for [`PROTOCOL_VERSION`].
    pub fn current() -> &'static Self {
        // TABLES always contains PROTOCOL_VERSION; see the test below.
        TABLES
            .iter()
            .find(|t| t.version == PROTOCOL_VERSION)
            .unwrap_or(&TABLES[TABLES.len() - 1])
    }

    /// The table for `version`, if this client speaks it.
    pub fn for_version(version: u32) -> Option<&'static Self> {
        TABLES.iter().find(|t| t.version == version)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Looks up a wire token.
    pub fn lookup(&self, token: &str) -> Option<Opcode> {
        UNIVERSAL
            .iter()
            .chain(self.bindings)
            .find(|(t, _)| *t == token)
            .map(|(_, op)| *op)
    }
}
