//! Play gating: the flags and combo selector that decide which card plays
//! are legal right now.
//!
//! A single-card play is legal only if all of these hold:
//!
//! ```text
//! !locked
//! && (our turn || card is the counter `nope`)
//! && (!defusing || card is `defuse`)
//! && card is not a random card
//! ```
//!
//! A combo play (multiplier 2 or 3) keeps the first three rules, drops the
//! random-card rule (combos are what random cards are for), and also needs
//! that many copies of the card in hand.

use serde::Serialize;
use wwwcats_protocol::Card;

use crate::SessionError;

/// Server-imposed restrictions on card play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GateFlags {
    /// Set by `lock` while an exchange we started is in progress.
    pub locked: bool,
    /// Set by `defusing` after we drew an exploding card.
    pub defusing: bool,
}

/// The combo multiplier selected locally.
///
/// `1` plays one card. `2` and `3` play that many copies as one action.
/// `0` means nothing is selected: card clicks do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Combo(u8);

impl Combo {
    pub const OFF: Self = Self(0);
    pub const SINGLE: Self = Self(1);
    pub const MAX: u8 = 3;

    /// # Errors
    /// Returns [`SessionError::InvalidCombo`] above [`Combo::MAX`].
    pub fn new(multiplier: u8) -> Result<Self, SessionError> {
        if multiplier > Self::MAX {
            return Err(SessionError::InvalidCombo(multiplier));
        }
        Ok(Self(multiplier))
    }

    pub fn multiplier(self) -> u8 {
        self.0
    }

    /// Returns `true` for multipliers above one.
    pub fn is_combo(self) -> bool {
        self.0 > 1
    }
}

impl Default for Combo {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Rules shared by single and combo plays.
pub(crate) fn check_common(
    flags: GateFlags,
    our_turn: bool,
    card: &Card,
) -> Result<(), SessionError> {
    if flags.locked {
        return Err(SessionError::Locked);
    }
    if !our_turn && !card.is_counter() {
        return Err(SessionError::NotYourTurn);
    }
    if flags.defusing && !card.is_defuse() {
        return Err(SessionError::DefuseOnly);
    }
    Ok(())
}

/// Full check for a single-card play.
pub(crate) fn check_single(
    flags: GateFlags,
    our_turn: bool,
    card: &Card,
) -> Result<(), SessionError> {
    check_common(flags, our_turn, card)?;
    if card.is_random() {
        return Err(SessionError::NotPlayable(card.clone()));
    }
    Ok(())
}

/// Full check for a combo play of `combo` copies of `card`.
pub(crate) fn check_combo(
    flags: GateFlags,
    our_turn: bool,
    card: &Card,
    combo: Combo,
    held: usize,
) -> Result<(), SessionError> {
    check_common(flags, our_turn, card)?;
    if held < usize::from(combo.multiplier()) {
        return Err(SessionError::InsufficientCombo {
            card: card.clone(),
            needed: combo.multiplier(),
            held,
        });
    }
    Ok(())
}
