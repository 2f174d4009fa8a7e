//! Minimal cell-content cleaning.

/// Returns the plain text of a raw cell block.
///
/// Strips every markup tag — any substring delimited by `<` and the next
/// `>`, including self-closing and attribute-bearing forms — and trims
/// leading and trailing whitespace. A `<` with no closing `>` is not a tag
/// and is kept verbatim. No entity decoding or rich-text semantics are
/// applied; this is a cleaning pass, not a renderer.
#[must_use]
pub fn plain_text(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => {
                text.push_str(&rest[lt..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    text.trim().to_string()
}
