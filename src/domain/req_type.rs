use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

/// The fixed vocabulary of requirement classifications.
///
/// This is the single shared definition used by the classifier and by every
/// consumer of the wire format; adding a tag is a one-place change. The wire
/// and display names are the short forms the presentation layer expects
/// (`Req`, `HL`, `Def`, `Fig`, `TBD`, `N/A`, `Int`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReqType {
    /// An ordinary requirement statement (the default).
    #[default]
    Req,
    /// A headline introducing a group of requirements.
    Headline,
    /// A term definition.
    Definition,
    /// A figure or diagram reference.
    Figure,
    /// A placeholder still to be determined.
    Tbd,
    /// Explicitly marked as not applicable.
    NotApplicable,
    /// An interface description.
    Interface,
}

/// Position of a cell within its row, as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPosition {
    /// The first cell of the row.
    First,
    /// Any later cell.
    Subsequent,
}

/// A leading classification marker: either bracketed (`[Headline] …`) or
/// colon-suffixed (`Def: …`).
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[(?<bracketed>[^\]]+)\]|(?<worded>[A-Za-z/]+):)\s*")
        .expect("marker pattern is valid")
});

impl ReqType {
    /// Every member of the vocabulary, in presentation order.
    pub const ALL: [Self; 7] = [
        Self::Req,
        Self::Headline,
        Self::Definition,
        Self::Figure,
        Self::Tbd,
        Self::NotApplicable,
        Self::Interface,
    ];

    /// Returns the short name used on the wire and in displays.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Req => "Req",
            Self::Headline => "HL",
            Self::Definition => "Def",
            Self::Figure => "Fig",
            Self::Tbd => "TBD",
            Self::NotApplicable => "N/A",
            Self::Interface => "Int",
        }
    }

    /// Classifies normalized cell text, returning the type and the content
    /// with any recognized marker stripped.
    ///
    /// A leading explicit marker naming a vocabulary word or its short form
    /// (case-insensitive) overrides the default. Markers are only recognized
    /// in the first cell of a row; everything else, including unrecognized
    /// markers, falls back to [`ReqType::Req`] with the content unchanged.
    /// Classification never fails.
    #[must_use]
    pub fn classify(content: &str, position: CellPosition) -> (Self, &str) {
        if position != CellPosition::First {
            return (Self::Req, content);
        }

        if let Some(captures) = MARKER.captures(content) {
            let name = captures
                .name("bracketed")
                .or_else(|| captures.name("worded"))
                .map(|m| m.as_str());
            if let Some(req_type) = name.and_then(|name| name.trim().parse().ok()) {
                let rest = captures
                    .get(0)
                    .map_or(content, |marker| &content[marker.end()..]);
                return (req_type, rest);
            }
        }

        (Self::Req, content)
    }
}

impl fmt::Display for ReqType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no member of the vocabulary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown requirement type '{0}'")]
pub struct UnknownTypeError(String);

impl FromStr for ReqType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "req" | "requirement" => Ok(Self::Req),
            "hl" | "headline" => Ok(Self::Headline),
            "def" | "definition" => Ok(Self::Definition),
            "fig" | "figure" => Ok(Self::Figure),
            "tbd" => Ok(Self::Tbd),
            "n/a" | "na" | "not applicable" | "notapplicable" => Ok(Self::NotApplicable),
            "int" | "interface" => Ok(Self::Interface),
            _ => Err(UnknownTypeError(s.to_string())),
        }
    }
}

impl serde::Serialize for ReqType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ReqType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Req", ReqType::Req)]
    #[test_case("requirement", ReqType::Req)]
    #[test_case("HL", ReqType::Headline)]
    #[test_case("headline", ReqType::Headline)]
    #[test_case("Def", ReqType::Definition)]
    #[test_case("FIG", ReqType::Figure)]
    #[test_case("tbd", ReqType::Tbd)]
    #[test_case("N/A", ReqType::NotApplicable)]
    #[test_case("not applicable", ReqType::NotApplicable)]
    #[test_case("Int", ReqType::Interface)]
    #[test_case("interface", ReqType::Interface)]
    fn from_str_accepts(input: &str, expected: ReqType) {
        assert_eq!(input.parse::<ReqType>().unwrap(), expected);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("widget".parse::<ReqType>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for req_type in ReqType::ALL {
            assert_eq!(req_type.as_str().parse::<ReqType>().unwrap(), req_type);
        }
    }

    #[test_case("[HL] User management", ReqType::Headline, "User management"; "bracketed short")]
    #[test_case("[Headline] User management", ReqType::Headline, "User management"; "bracketed full")]
    #[test_case("[ TBD ] open point", ReqType::Tbd, "open point"; "bracketed padded")]
    #[test_case("Def: latency is round-trip time", ReqType::Definition, "latency is round-trip time"; "worded")]
    #[test_case("N/A: legacy hardware", ReqType::NotApplicable, "legacy hardware"; "worded with slash")]
    #[test_case("int: CAN bus frames", ReqType::Interface, "CAN bus frames"; "worded case insensitive")]
    fn classify_recognizes_markers(content: &str, expected: ReqType, rest: &str) {
        let (req_type, remainder) = ReqType::classify(content, CellPosition::First);
        assert_eq!(req_type, expected);
        assert_eq!(remainder, rest);
    }

    #[test_case("The system shall log errors"; "plain statement")]
    #[test_case("[widget] unknown marker"; "unknown bracketed")]
    #[test_case("Note: not a vocabulary word"; "unknown worded")]
    #[test_case("See [HL] mid-sentence"; "marker not leading")]
    fn classify_defaults_to_req(content: &str) {
        let (req_type, remainder) = ReqType::classify(content, CellPosition::First);
        assert_eq!(req_type, ReqType::Req);
        assert_eq!(remainder, content);
    }

    #[test]
    fn classify_ignores_markers_outside_first_cell() {
        let (req_type, remainder) = ReqType::classify("[HL] later cell", CellPosition::Subsequent);
        assert_eq!(req_type, ReqType::Req);
        assert_eq!(remainder, "[HL] later cell");
    }

    #[test]
    fn classify_marker_only_leaves_empty_content() {
        let (req_type, remainder) = ReqType::classify("[TBD]", CellPosition::First);
        assert_eq!(req_type, ReqType::Tbd);
        assert_eq!(remainder, "");
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&ReqType::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        assert_eq!(
            serde_json::from_str::<ReqType>("\"HL\"").unwrap(),
            ReqType::Headline
        );
    }
}
