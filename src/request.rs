//! The JSON boundary between the engine and its transport.
//!
//! The (external) HTTP layer hands over a request object and expects the
//! wire-format result back. Everything structural about the request is
//! validated here, before any markup parsing begins; everything after that
//! point degrades gracefully instead of failing.

use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::{
    domain::{ExtractionResult, Options, Prefix, SourceDocument},
    extract::Engine,
};

/// An extraction request as received from the transport layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The full page body as raw markup.
    raw_markup: String,
    /// Opaque page identifier, echoed into the result.
    #[serde(default)]
    page_id: String,
    /// Page title, echoed into the result.
    #[serde(default)]
    page_title: String,
    /// Identifier prefix to recognize in cell content.
    #[serde(default)]
    id_prefix: Option<Prefix>,
    /// Rows per section; defaults to ten.
    #[serde(default)]
    section_batch_size: Option<NonZeroUsize>,
}

impl Request {
    /// Parses a request from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the input is not a JSON object
    /// with a textual `rawMarkup` field, when `idPrefix` is not a valid
    /// prefix, or when `sectionBatchSize` is not a positive integer.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(input)?)
    }

    /// Runs the extraction described by this request.
    ///
    /// Never fails: once a request has parsed, the engine always produces a
    /// result, empty if need be.
    #[must_use]
    pub fn process(self) -> ExtractionResult {
        let options = Options::new(
            self.id_prefix,
            self.section_batch_size
                .unwrap_or(Options::DEFAULT_SECTION_BATCH),
        );
        let document = SourceDocument::new(self.page_id, self.page_title, self.raw_markup);

        Engine::new(options).extract(&document)
    }
}

/// Errors surfaced to the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request was structurally invalid; extraction never started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

/// Parses a JSON request and returns the wire-format JSON response.
///
/// This is the whole engine surface as one function, for transports that
/// deal purely in text.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the request does not parse; see
/// [`Request::from_json`].
///
/// # Panics
///
/// Panics if the result cannot be serialized, which cannot happen for the
/// types involved.
pub fn handle_json(input: &str) -> Result<String, Error> {
    let result = Request::from_json(input)?.process();
    Ok(serde_json::to_string(&result).expect("serializing an extraction result never fails"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_request_round_trip() {
        let input = r#"{
            "rawMarkup": "<table><tr><td>REQ-7: retries on timeout</td></tr></table>",
            "pageId": "98765",
            "pageTitle": "System Requirements",
            "idPrefix": "REQ",
            "sectionBatchSize": 10
        }"#;

        let result = Request::from_json(input).unwrap().process();
        assert_eq!(result.page_id(), "98765");
        assert_eq!(result.title(), "System Requirements");
        assert_eq!(result.records().len(), 1);
        assert_eq!(result.records()[0].id.as_ref().unwrap().to_string(), "REQ-7");
    }

    #[test]
    fn missing_raw_markup_is_invalid_input() {
        let input = r#"{ "pageId": "98765", "pageTitle": "System Requirements" }"#;
        assert!(matches!(
            Request::from_json(input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn non_textual_raw_markup_is_invalid_input() {
        let input = r#"{ "rawMarkup": 42 }"#;
        assert!(matches!(
            Request::from_json(input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_batch_size_is_invalid_input() {
        let input = r#"{ "rawMarkup": "<table></table>", "sectionBatchSize": 0 }"#;
        assert!(matches!(
            Request::from_json(input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_prefix_is_invalid_input() {
        let input = r#"{ "rawMarkup": "<table></table>", "idPrefix": "req" }"#;
        assert!(matches!(
            Request::from_json(input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn markup_without_tables_is_a_valid_empty_result() {
        let input = r#"{ "rawMarkup": "<p>prose only</p>", "pageId": "1" }"#;
        let result = Request::from_json(input).unwrap().process();
        assert!(result.records().is_empty());
    }

    #[test]
    fn handle_json_emits_the_wire_format() {
        let input = r#"{
            "rawMarkup": "<table><tr><td>System shall log errors</td></tr></table>",
            "pageId": "98765",
            "pageTitle": "System Requirements"
        }"#;

        let output = handle_json(input).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pid": "98765",
                "title": "System Requirements",
                "requirements": [
                    { "c": "System shall log errors", "t": "Req", "s": 1, "eid": null },
                ],
            })
        );
    }
}
