use std::{fmt, num::NonZeroUsize, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated identifier prefix containing only uppercase alphabetic
/// characters ([A-Z]+).
///
/// The prefix is configured per extraction request (for example `REQ`) and
/// is matched case-sensitively against cell content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Prefix(NonEmptyString);

impl Prefix {
    /// Creates a new `Prefix` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrefixError` if the string is empty or contains
    /// characters other than uppercase letters (A-Z).
    pub fn new(s: String) -> Result<Self, InvalidPrefixError> {
        let non_empty =
            NonEmptyString::new(s.clone()).map_err(|_| InvalidPrefixError(s.clone()))?;

        if !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidPrefixError(s));
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Prefix {
    type Error = InvalidPrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Prefix {
    type Error = InvalidPrefixError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Prefix {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Prefix {
    type Err = InvalidPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl serde::Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a string doesn't match the required pattern [A-Z]+.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid prefix '{0}': must be non-empty and contain only uppercase letters (A-Z)")]
pub struct InvalidPrefixError(String);

/// An externally-assigned requirement identifier recognized in cell content.
///
/// Format: `{PREFIX}-{ID}`, where `PREFIX` is an uppercase alphabetic string
/// (e.g. `REQ`) and `ID` is a positive non-zero integer. The digit width as
/// written in the source is preserved, so `REQ-007` round-trips as `REQ-007`
/// rather than `REQ-7`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReqId {
    prefix: Prefix,
    number: NonZeroUsize,
    digits: usize,
}

impl ReqId {
    /// Create an identifier from pre-validated parts.
    ///
    /// The display width is the natural width of `number`.
    #[must_use]
    pub fn new(prefix: Prefix, number: NonZeroUsize) -> Self {
        let digits = number.to_string().len();
        Self {
            prefix,
            number,
            digits,
        }
    }

    /// Returns the prefix component as a string.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Returns the numeric component.
    #[must_use]
    pub const fn number(&self) -> NonZeroUsize {
        self.number
    }

    /// Recognizes a leading identifier token in `content`.
    ///
    /// The token is the configured prefix (matched case-sensitively),
    /// optionally a hyphen or space separator, and one or more digits,
    /// optionally followed by a colon. On match, returns the identifier and
    /// the remaining content with the token, any trailing colon, and leading
    /// whitespace removed. Only the leading position is considered, so with
    /// several candidates the leftmost wins.
    ///
    /// A zero id is not a valid identifier; `REQ-0` is left in the content.
    #[must_use]
    pub fn strip_leading<'a>(prefix: &Prefix, content: &'a str) -> Option<(Self, &'a str)> {
        let rest = content.strip_prefix(prefix.as_str())?;
        let rest = rest.strip_prefix(['-', ' ']).unwrap_or(rest);

        let digits = rest
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }

        let number: NonZeroUsize = rest[..digits].parse().ok()?;

        // The identifier must end at a word boundary; `REQ-7a` is prose, not
        // an identifier.
        let remainder = &rest[digits..];
        match remainder.bytes().next() {
            None => {}
            Some(b) if b == b':' || b.is_ascii_whitespace() => {}
            Some(_) => return None,
        }

        let remainder = remainder.strip_prefix(':').unwrap_or(remainder).trim_start();

        let id = Self {
            prefix: prefix.clone(),
            number,
            digits,
        };
        Some((id, remainder))
    }
}

impl fmt::Display for ReqId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{:0width$}", self.prefix, self.number, width = self.digits)
    }
}

/// Errors that can occur when parsing an identifier from a string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Malformed identifier structure.
    #[error("Invalid identifier format: {0}")]
    Syntax(String),

    /// Invalid numeric component (non-numeric or zero).
    #[error("Invalid id in identifier '{0}': expected a non-zero integer, got {1}")]
    Number(String, String),

    /// Invalid prefix component (not uppercase alphabetic).
    #[error(transparent)]
    Prefix(#[from] InvalidPrefixError),
}

impl FromStr for ReqId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alpha = s.bytes().take_while(u8::is_ascii_uppercase).count();
        if alpha == 0 {
            return Err(Error::Syntax(s.to_string()));
        }

        let prefix = Prefix::new(s[..alpha].to_string())?;

        let rest = &s[alpha..];
        let rest = rest.strip_prefix(['-', ' ']).unwrap_or(rest);
        if rest.is_empty() {
            return Err(Error::Syntax(s.to_string()));
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Number(s.to_string(), rest.to_string()));
        }

        let number: NonZeroUsize = rest
            .parse()
            .map_err(|_| Error::Number(s.to_string(), rest.to_string()))?;

        Ok(Self {
            prefix,
            number,
            digits: rest.len(),
        })
    }
}

impl TryFrom<&str> for ReqId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}
