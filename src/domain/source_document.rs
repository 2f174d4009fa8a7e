/// A wiki page body handed to the engine by the document-fetch collaborator.
///
/// The document is immutable once constructed and owned by the extraction
/// request for the duration of processing; the engine keeps no reference to
/// it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Opaque page identifier assigned by the originating system.
    pub page_id: String,
    /// Page title, echoed into the extraction result.
    pub title: String,
    /// The full document body as raw markup.
    pub raw_markup: String,
}

impl SourceDocument {
    /// Creates a document from its parts.
    #[must_use]
    pub fn new(
        page_id: impl Into<String>,
        title: impl Into<String>,
        raw_markup: impl Into<String>,
    ) -> Self {
        Self {
            page_id: page_id.into(),
            title: title.into(),
            raw_markup: raw_markup.into(),
        }
    }
}
