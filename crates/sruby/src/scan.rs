use peeking_take_while::PeekableExt;

use std::{iter::Peekable, str::CharIndices};

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Extracts identifier-like tokens from Ruby source.
///
/// This is not a lexer: it only finds the text that would be interned as
/// names. Recognized tokens are plain and constant identifiers (with an
/// optional `?` or `!` suffix), `@ivar`, `@@cvar`, `$gvar`, and the `&&` and
/// `||` operators. Comments, string literals and numbers are skipped.
pub struct Scanner<'a> {
    src: &'a str,
    idx: usize,
    tokens: Vec<&'a str>,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            idx: 0,
            tokens: Vec::with_capacity(src.len() / 4),
            chars: src.char_indices().peekable(),
        }
    }

    pub fn scan(mut self) -> Vec<&'a str> {
        while let Some((idx, c)) = self.chars.next() {
            self.idx = idx;
            match c {
                c if c.is_whitespace() => continue,
                c if c.is_ascii_digit() => self.skip_number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.handle_word(),
                '#' => self.skip_comment(),
                '"' | '\'' | '`' => self.skip_string(c),
                '@' => {
                    self.chars.next_if(|&(_, c)| c == '@');
                    self.handle_sigil();
                }
                '$' => self.handle_sigil(),
                '&' => self.try_double('&'),
                '|' => self.try_double('|'),
                _ => {}
            }
        }
        self.tokens
    }

    fn try_double(&mut self, c: char) {
        if let Some((end, _)) = self.chars.next_if(|&(_, next)| next == c) {
            self.tokens.push(&self.src[self.idx..end + 1]);
        }
    }

    fn handle_sigil(&mut self) {
        if self.eat_word().is_some() {
            self.push_word();
        }
    }

    fn handle_word(&mut self) {
        self.eat_word();
        self.push_word();
    }

    fn push_word(&mut self) {
        let mut end = self.offset();
        let bytes = self.src.as_bytes();
        // `foo!=` and `foo?=` leave the suffix to the operator.
        if matches!(bytes.get(end), Some(b'?' | b'!')) && bytes.get(end + 1) != Some(&b'=') {
            self.chars.next();
            end += 1;
        }
        self.tokens.push(&self.src[self.idx..end]);
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(idx, _)| idx)
    }

    fn eat_word(&mut self) -> Option<usize> {
        self.chars
            .peeking_take_while(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
            .last()
            .map(|(end, _)| end)
    }

    fn skip_number(&mut self) {
        self.chars
            .peeking_take_while(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
            .for_each(drop);
    }

    fn skip_comment(&mut self) {
        self.chars
            .peeking_take_while(|&(_, c)| c != '\n')
            .for_each(drop);
    }

    fn skip_string(&mut self, quote: char) {
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => {
                    self.chars.next();
                }
                c if c == quote => return,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<&str> {
        Scanner::new(src).scan()
    }

    #[test]
    fn scans_identifiers() {
        assert_eq!(
            scan("def initialize(name)\n  @name = name\nend"),
            ["def", "initialize", "name", "@name", "name", "end"]
        );
    }

    #[test]
    fn scans_sigils_and_suffixes() {
        assert_eq!(
            scan("@@count $stdout empty? save! Foo::Bar"),
            ["@@count", "$stdout", "empty?", "save!", "Foo", "Bar"]
        );
    }

    #[test]
    fn scans_boolean_operators() {
        assert_eq!(scan("a && b || c & d"), ["a", "&&", "b", "||", "c", "d"]);
    }

    #[test]
    fn suffix_before_eq_is_an_operator() {
        assert_eq!(scan("a!=b"), ["a", "b"]);
    }

    #[test]
    fn skips_comments_strings_and_numbers() {
        assert_eq!(
            scan("x = 42 # the answer\ny = \"not \\\" a name\" + 'nor this' + 1.5e3"),
            ["x", "y"]
        );
    }

    #[test]
    fn scans_at_end_of_input() {
        assert_eq!(scan("to_s"), ["to_s"]);
        assert_eq!(scan("nil?"), ["nil?"]);
        assert!(scan("").is_empty());
        assert!(scan("@ $ 123").is_empty());
    }
}
