//! Tokenises SPDX license expressions into words and parentheses.
//!
//! Words are maximal runs of characters that are neither whitespace nor a
//! parenthesis, so identifiers such as `GPL-2.0-or-later`, `LicenseRef-1` or
//! `DocumentRef-spdx-tool-1.2:LicenseRef-MIT-Style-2` survive as a single
//! token. Keywords (`AND`, `OR`, `WITH`) are not special at this level: they
//! are ordinary words that [`TokenKind::keyword`] recognises case
//! insensitively. The lexer never fails; every input ends in
//! [`TokenKind::End`].

use std::fmt;

/// A lexical token together with the byte offset where it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// What was recognised.
    pub kind: TokenKind,
    /// Byte offset of the first character of the token. For
    /// [`TokenKind::End`] this is the length of the input.
    pub start: usize,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Word(word) => format!("'{word}'"),
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::End => "<end>".to_string(),
        }
    }
}

/// The kinds of token an expression is made of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier or keyword, exactly as written.
    Word(String),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// No more input.
    End,
}

impl TokenKind {
    /// Return the operator keyword this token spells, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use spdx_expr::{Keyword, TokenKind};
    ///
    /// assert_eq!(TokenKind::Word("With".into()).keyword(), Some(Keyword::With));
    /// assert_eq!(TokenKind::Word("MIT".into()).keyword(), None);
    /// assert_eq!(TokenKind::LeftParen.keyword(), None);
    /// ```
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Self::Word(word) => Keyword::from_word(word),
            Self::LeftParen | Self::RightParen | Self::End => None,
        }
    }
}

/// Reserved operator words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `AND`, combining two expressions into a conjunction.
    And,
    /// `OR`, combining two expressions into a disjunction.
    Or,
    /// `WITH`, attaching an exception to a license.
    With,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else if word.eq_ignore_ascii_case("with") {
            Some(Self::With)
        } else {
            None
        }
    }

    /// Return the keyword in its conventional upper-case spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::With => "WITH",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lazy tokeniser over an expression string.
///
/// Once the input is exhausted [`Lexer::next_token`] keeps returning
/// [`TokenKind::End`], while the [`Iterator`] implementation yields the end
/// token exactly once. To start over, create a new lexer.
///
/// # Examples
///
/// ```
/// use spdx_expr::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("(MIT)").map(|token| token.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::LeftParen,
///         TokenKind::Word("MIT".into()),
///         TokenKind::RightParen,
///         TokenKind::End,
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// Produce the next token, or [`TokenKind::End`] when nothing is left.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.bump_char() else {
            return Token {
                kind: TokenKind::End,
                start: self.input.len(),
            };
        };
        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            _ => self.lex_word(start),
        };
        Token { kind, start }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|s| s.chars().next())
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    // The first character has already been consumed.
    fn lex_word(&mut self, start: usize) -> TokenKind {
        while let Some(ch) = self.peek_char() {
            if is_word_char(ch) {
                self.bump_char();
            } else {
                break;
            }
        }
        let word = self.input.get(start..self.pos).unwrap_or_default();
        TokenKind::Word(word.to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::End {
            self.finished = true;
        }
        Some(token)
    }
}

/// Tokenise the whole input, including the trailing end token.
///
/// # Examples
///
/// ```
/// use spdx_expr::{TokenKind, tokenize};
///
/// let tokens = tokenize("   ");
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].kind, TokenKind::End);
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|token| token.kind).collect()
    }

    fn word(text: &str) -> TokenKind {
        TokenKind::Word(text.to_string())
    }

    #[test]
    fn splits_parentheses_from_adjacent_words() {
        assert_eq!(
            kinds("(MIT)"),
            vec![
                TokenKind::LeftParen,
                word("MIT"),
                TokenKind::RightParen,
                TokenKind::End
            ]
        );
    }

    #[test]
    fn records_byte_offsets() {
        let starts: Vec<_> = tokenize("MIT OR (Apache-2.0)")
            .into_iter()
            .map(|token| token.start)
            .collect();
        assert_eq!(starts, vec![0, 4, 7, 8, 18, 19]);
    }

    #[rstest]
    #[case("GPL-2.0-or-later")]
    #[case("Apache-2.0")]
    #[case("LicenseRef-1")]
    #[case("GPL-2.0+")]
    #[case("DocumentRef-spdx-tool-1.2:LicenseRef-MIT-Style-2")]
    fn keeps_identifier_punctuation_in_one_word(#[case] input: &str) {
        assert_eq!(kinds(input), vec![word(input), TokenKind::End]);
    }

    #[test]
    fn skips_mixed_whitespace() {
        assert_eq!(
            kinds("\tMIT \n AND\r\nBSD-3-Clause  "),
            vec![word("MIT"), word("AND"), word("BSD-3-Clause"), TokenKind::End]
        );
    }

    #[test]
    fn treats_non_ascii_as_word_characters() {
        assert_eq!(kinds("Licença\u{a0}MIT"), vec![word("Licença"), word("MIT"), TokenKind::End]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn empty_input_yields_only_end(#[case] input: &str) {
        let tokens = tokenize(input);
        assert_eq!(
            tokens,
            vec![Token {
                kind: TokenKind::End,
                start: input.len()
            }]
        );
    }

    #[test]
    fn next_token_repeats_end_after_exhaustion() {
        let mut lexer = Lexer::new("MIT");
        assert_eq!(lexer.next_token().kind, word("MIT"));
        assert_eq!(lexer.next_token().kind, TokenKind::End);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
    }

    #[test]
    fn iterator_yields_end_once() {
        let mut lexer = Lexer::new("MIT");
        assert!(lexer.next().is_some());
        assert_eq!(lexer.next().map(|token| token.kind), Some(TokenKind::End));
        assert!(lexer.next().is_none());
    }

    #[rstest]
    #[case("and", Some(Keyword::And))]
    #[case("AnD", Some(Keyword::And))]
    #[case("OR", Some(Keyword::Or))]
    #[case("with", Some(Keyword::With))]
    #[case("WITHOUT", None)]
    #[case("Apache-2.0", None)]
    fn recognises_keywords_case_insensitively(
        #[case] text: &str,
        #[case] expected: Option<Keyword>,
    ) {
        assert_eq!(word(text).keyword(), expected);
    }

    #[test]
    fn describes_tokens_for_diagnostics() {
        let tokens = tokenize("MIT )");
        let described: Vec<_> = tokens.iter().map(Token::describe).collect();
        assert_eq!(described, vec!["'MIT'", "')'", "<end>"]);
    }
}
