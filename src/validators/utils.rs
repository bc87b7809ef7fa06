use crate::types::{Reflection, Signature, Source, ValidationError};

/// Inline reference markup recognized in comment text.
const LINK_MARKER: &str = "{@link";

/// Returns the source location a reflection-level error is attributed to.
pub fn reflection_source(reflection: &Reflection) -> Option<Source> {
    reflection.sources.first().cloned()
}

/// Returns the source location a signature-level error is attributed to,
/// falling back to the owning reflection when the signature carries none.
pub fn signature_source(signature: &Signature, owner: &Reflection) -> Option<Source> {
    signature
        .sources
        .first()
        .or_else(|| owner.sources.first())
        .cloned()
}

/// Builds a validation error from a message and an optional location.
pub fn error_at(message: String, source: Option<Source>) -> ValidationError {
    ValidationError { message, source }
}

/// Extracts the targets of every `{@link <target> ...}` occurrence in a
/// text, in order. Identical targets occurring more than once are returned
/// once per occurrence.
pub fn extract_inline_links(text: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = text;

    while let Some(position) = rest.find(LINK_MARKER) {
        let after = &rest[position + LINK_MARKER.len()..];

        // Require whitespace after the marker so `{@linkcode ...}` and
        // similar variants are not misread.
        if !after.starts_with(|c: char| c.is_whitespace()) {
            rest = after;
            continue;
        }

        let Some(end) = after.find('}') else {
            break;
        };

        // The target is the first word of the braced body; anything after
        // it is display text.
        if let Some(target) = after[..end].split_whitespace().next() {
            targets.push(target.to_string());
        }

        rest = &after[end + 1..];
    }

    targets
}
