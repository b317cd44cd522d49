//! Single-pass argument scanner.
//!
//! The scanner walks a borrowed argument list once, classifying each token as
//! a long option, a short option or a positional. While paused on an option
//! token the caller may ask for the following token as that option's value.

use thiserror::Error;

/// Misuse of the scanner by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("take_value called while not positioned on an option token")]
    NotOnOption,

    #[error("value already taken for option at index {0}")]
    ValueAlreadyTaken(usize),
}

/// A classified argument token, borrowing from the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `--name`, with the two leading dashes stripped.
    Long(&'a str),
    /// `-x`, only the first character after the dash. A lone `-` is
    /// `Short('\0')`.
    Short(char),
    /// Anything else, verbatim.
    Positional(&'a str),
}

impl<'a> Token<'a> {
    /// Whether this token is a long or short option.
    pub fn is_option(&self) -> bool {
        !matches!(self, Token::Positional(_))
    }
}

/// Classify a single argument.
///
/// `--` followed by anything (including nothing) is a long option. A single
/// dash is a short option named after the character that follows it; the
/// rest of the token is ignored, so `-abc` is `-a`. A lone `-` has no
/// character to name it and comes out as `Short('\0')`. Everything else,
/// including `""`, is positional.
pub fn classify_arg(arg: &str) -> Token<'_> {
    if let Some(name) = arg.strip_prefix("--") {
        return Token::Long(name);
    }
    if let Some(rest) = arg.strip_prefix('-') {
        return Token::Short(rest.chars().next().unwrap_or('\0'));
    }
    Token::Positional(arg)
}

/// Split a long option name on its first `=`.
///
/// `out=file.txt` gives `("out", Some("file.txt"))`, `out=` gives
/// `("out", Some(""))` and `out` gives `("out", None)`.
pub fn split_inline_value(name: &str) -> (&str, Option<&str>) {
    match name.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (name, None),
    }
}

/// What the scanner is paused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Current {
    Start,
    OnOption { index: usize, value_taken: bool },
    Positional,
    Done,
}

/// Iterator over classified tokens with value lookahead.
///
/// ```
/// use bork::{Scanner, Token};
///
/// let args = ["--dostuff", "value1", "-h"];
/// let mut scanner = Scanner::new(&args);
/// while let Some(token) = scanner.next_token() {
///     match token {
///         Token::Long("dostuff") => {
///             assert_eq!(scanner.take_value(), Ok(Some("value1")));
///         }
///         Token::Short('h') => {}
///         other => panic!("unexpected {:?}", other),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a, S> {
    args: &'a [S],
    cursor: usize,
    current: Current,
}

/// Start a fresh scan over `args`.
pub fn scan<S: AsRef<str>>(args: &[S]) -> Scanner<'_, S> {
    Scanner::new(args)
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    pub fn new(args: &'a [S]) -> Self {
        Self {
            args,
            cursor: 0,
            current: Current::Start,
        }
    }

    /// Index of the next token to be visited.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Tokens not yet classified or consumed.
    pub fn remaining(&self) -> &'a [S] {
        &self.args[self.cursor..]
    }

    /// Classify the next token and advance past it.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let args = self.args;
        let Some(arg) = args.get(self.cursor) else {
            self.current = Current::Done;
            return None;
        };

        let index = self.cursor;
        self.cursor += 1;

        let token = classify_arg(arg.as_ref());
        self.current = if token.is_option() {
            Current::OnOption {
                index,
                value_taken: false,
            }
        } else {
            Current::Positional
        };
        Some(token)
    }

    /// Take the following token as the current option's value.
    ///
    /// Returns `Ok(None)` without advancing when there is no following
    /// token or it starts with `-`.
    pub fn take_value(&mut self) -> Result<Option<&'a str>, ScanError> {
        let index = match self.current {
            Current::OnOption {
                value_taken: true,
                index,
            } => return Err(ScanError::ValueAlreadyTaken(index)),
            Current::OnOption { index, .. } => index,
            _ => return Err(ScanError::NotOnOption),
        };

        let args = self.args;
        let Some(next) = args.get(self.cursor).map(|s| s.as_ref()) else {
            return Ok(None);
        };
        if next.starts_with('-') {
            return Ok(None);
        }

        self.cursor += 1;
        self.current = Current::OnOption {
            index,
            value_taken: true,
        };
        Ok(Some(next))
    }
}

impl<'a, S: AsRef<str>> Iterator for Scanner<'a, S> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
