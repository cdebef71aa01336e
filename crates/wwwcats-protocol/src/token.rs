//! Tokenizer: splits one inbound message into space-separated tokens.
//!
//! The protocol separates tokens with exactly one ASCII space. Most opcodes
//! only need the tokens, but a few (`chat`, `bcast`, `message`) end with free
//! text that may itself contain spaces, runs of spaces, or nothing at all.
//! For those, [`Tokens::remainder`] slices the original message instead of
//! gluing tokens back together, so the text arrives byte-for-byte as sent.

/// One inbound message, split into tokens but still holding the raw text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    raw: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// Splits `raw` on single spaces.
    ///
    /// Consecutive spaces produce empty tokens; callers that read lists of
    /// names or cards skip those.
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            tokens: raw.split(' ').collect(),
        }
    }

    /// The raw message.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The first token. Empty only when the message itself is empty.
    pub fn opcode(&self) -> &'a str {
        // `split` always yields at least one item.
        self.tokens[0]
    }

    /// The token at `index` (0 is the opcode), if present and non-empty.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied().filter(|t| !t.is_empty())
    }

    /// All tokens after the opcode, including empty ones.
    pub fn args(&self) -> &[&'a str] {
        &self.tokens[1..]
    }

    /// Non-empty tokens after the opcode.
    pub fn words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args().iter().copied().filter(|t| !t.is_empty())
    }

    /// Number of tokens, opcode included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the message is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The raw text after the first `consumed` tokens and their separators.
    ///
    /// `remainder(2)` on `"chat bob hi  there"` is `"hi  there"`. If the
    /// message is shorter than the prefix, the remainder is empty.
    pub fn remainder(&self, consumed: usize) -> &'a str {
        let prefix: usize = self
            .tokens
            .iter()
            .take(consumed)
            .map(|t| t.len() + 1)
            .sum();
        self.raw.get(prefix..).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_on_single_spaces() {
        let t = Tokens::new("players alice bob carol");
        assert_eq!(t.opcode(), "players");
        assert_eq!(t.args(), ["alice", "bob", "carol"]);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_opcode_only_message_has_no_args() {
        let t = Tokens::new("defusing");
        assert_eq!(t.opcode(), "defusing");
        assert!(t.args().is_empty());
        assert_eq!(t.get(1), None);
        assert_eq!(t.remainder(1), "");
    }

    #[test]
    fn test_remainder_preserves_inner_spacing() {
        // Re-joining tokens would collapse the double space.
        let t = Tokens::new("chat bob hi  there ");
        assert_eq!(t.remainder(2), "hi  there ");
        assert_eq!(t.remainder(1), "bob hi  there ");
    }

    #[test]
    fn test_remainder_past_end_is_empty() {
        let t = Tokens::new("chat bob");
        assert_eq!(t.remainder(2), "");
        assert_eq!(t.remainder(5), "");
    }

    #[test]
    fn test_remainder_handles_multibyte_text() {
        let t = Tokens::new("chat zoë ¡hola, señor!");
        assert_eq!(t.get(1), Some("zoë"));
        assert_eq!(t.remainder(2), "¡hola, señor!");
    }

    #[test]
    fn test_get_skips_empty_tokens() {
        let t = Tokens::new("joins  bob");
        assert_eq!(t.get(1), None);
        assert_eq!(t.get(2), Some("bob"));
        assert_eq!(t.words().collect::<Vec<_>>(), ["bob"]);
    }

    #[test]
    fn test_empty_message() {
        let t = Tokens::new("");
        assert!(t.is_empty());
        assert_eq!(t.opcode(), "");
    }
}
