use std::num::NonZeroUsize;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use super::{ReqId, ReqType, req_id};

/// A single extracted requirement.
///
/// Records are created by the extraction engine, returned to the caller, and
/// owned thereafter by whatever collaborator persists or displays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Externally-assigned identifier recognized in the cell content, if
    /// any. Left empty for the caller to assign otherwise.
    pub id: Option<ReqId>,
    /// Normalized, tag-free requirement text. Never empty.
    pub content: NonEmptyString,
    /// Classification of the requirement.
    pub req_type: ReqType,
    /// Positional section grouping the record with its neighbours.
    pub section: NonZeroUsize,
    /// Identifier of the source page this record came from (lookup only,
    /// never ownership).
    pub source_page_id: String,
}

/// The ordered outcome of extracting one source document.
///
/// Record order is identical to the table-then-row order encountered in the
/// raw markup; it is the only ordering signal available to downstream
/// consumers and is preserved end to end, including through serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Wire", try_from = "Wire")]
pub struct ExtractionResult {
    page_id: String,
    title: String,
    records: Vec<Requirement>,
    skipped_rows: usize,
}

impl ExtractionResult {
    /// Assembles a result from its parts.
    #[must_use]
    pub const fn new(
        page_id: String,
        title: String,
        records: Vec<Requirement>,
        skipped_rows: usize,
    ) -> Self {
        Self {
            page_id,
            title,
            records,
            skipped_rows,
        }
    }

    /// The identifier of the source page.
    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// The title of the source page.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The extracted records, in document order.
    #[must_use]
    pub fn records(&self) -> &[Requirement] {
        &self.records
    }

    /// Number of table rows that were skipped with a diagnostic rather than
    /// emitted. Not part of the wire format.
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Consumes the result, returning its records in document order.
    #[must_use]
    pub fn into_records(self) -> Vec<Requirement> {
        self.records
    }
}

/// The wire representation expected by the presentation collaborator.
///
/// Field names are the abbreviations `pid`/`c`/`t`/`s`/`eid` for page id,
/// content, type, section, and external identifier.
#[derive(Debug, Serialize, Deserialize)]
struct Wire {
    pid: String,
    title: String,
    requirements: Vec<WireRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireRecord {
    c: String,
    t: ReqType,
    s: usize,
    eid: Option<String>,
}

impl From<ExtractionResult> for Wire {
    fn from(result: ExtractionResult) -> Self {
        let requirements = result
            .records
            .into_iter()
            .map(|record| WireRecord {
                c: record.content.to_string(),
                t: record.req_type,
                s: record.section.get(),
                eid: record.id.map(|id| id.to_string()),
            })
            .collect();

        Self {
            pid: result.page_id,
            title: result.title,
            requirements,
        }
    }
}

/// Errors that can occur when decoding a wire-format extraction result.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A record carried empty content.
    #[error("record content must not be empty")]
    EmptyContent,
    /// A record carried a section number below one.
    #[error("section numbers start at one")]
    ZeroSection,
    /// A record carried a malformed external identifier.
    #[error(transparent)]
    Id(#[from] req_id::Error),
}

impl TryFrom<Wire> for ExtractionResult {
    type Error = WireError;

    fn try_from(wire: Wire) -> Result<Self, Self::Error> {
        let records = wire
            .requirements
            .into_iter()
            .map(|record| {
                let content =
                    NonEmptyString::new(record.c).map_err(|_| WireError::EmptyContent)?;
                let section = NonZeroUsize::new(record.s).ok_or(WireError::ZeroSection)?;
                let id = record.eid.as_deref().map(str::parse).transpose()?;

                Ok(Requirement {
                    id,
                    content,
                    req_type: record.t,
                    section,
                    source_page_id: wire.pid.clone(),
                })
            })
            .collect::<Result<_, Self::Error>>()?;

        // The wire format carries no diagnostics, so the skip counter is
        // reset on the way back in.
        Ok(Self {
            page_id: wire.pid,
            title: wire.title,
            records,
            skipped_rows: 0,
        })
    }
}
