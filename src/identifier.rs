use crate::types::{Identifier, MemberMarker, MemberRef};

/// Prefix of absolute module references.
pub const MODULE_PREFIX: &str = "module:";

/// Marker of event members.
const EVENT_MARKER: &str = "#event:";

/// Classification of a raw reference string before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReference {
    /// An `http(s)://` link -- never resolved, never reported as broken.
    ExternalLink,
    /// List-marker punctuation or other non-reference prose fragment.
    Fragment,
    /// A reference to be resolved against the model.
    Reference(Identifier),
}

/// Classifies and parses a raw reference string.
///
/// External links and one-character fragments are skipped before parsing;
/// everything else parses into an identifier. Malformed-looking text is not
/// rejected here -- it simply fails resolution later, since many such
/// references are intentionally loose prose fragments.
pub fn parse_reference(raw: &str) -> ParsedReference {
    let text = raw.trim();

    if text.len() <= 1 {
        return ParsedReference::Fragment;
    }

    if is_external_link(text) {
        return ParsedReference::ExternalLink;
    }

    ParsedReference::Reference(parse(text))
}

/// Whether a reference points outside the model entirely.
pub fn is_external_link(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Parses a raw reference string into a structured identifier.
///
/// Recognized shapes, in precedence order:
/// - `module:<path>~<TypeName>` -- absolute module prefix; without
///   `~<TypeName>` the identifier refers to the module itself.
/// - `~<TypeName>` -- type in the referencing reflection's own module. A
///   bare name with no marker is treated the same way.
/// - `#<name>` / `.<name>` / `#event:<name>` -- instance, static, or event
///   member of the preceding type (or of the enclosing container when no
///   type is given).
/// - trailing `:<LABEL>` on instance/static members -- overload label.
pub fn parse(raw: &str) -> Identifier {
    let mut rest = raw.trim();
    let mut module_path = None;

    if let Some(stripped) = rest.strip_prefix(MODULE_PREFIX) {
        // The module path runs to `~` or to a member marker. Dots inside the
        // path are path characters, not the static marker.
        let end = stripped.find(['~', '#']).unwrap_or(stripped.len());
        let (path, after) = stripped.split_at(end);
        module_path = Some(path.to_string());
        rest = after.strip_prefix('~').unwrap_or(after);
    } else if let Some(after) = rest.strip_prefix('~') {
        rest = after;
    }

    let (type_part, member) = if let Some(position) = rest.find(EVENT_MARKER) {
        // Events carry no overload labels; everything after the marker is
        // the event name.
        let name = &rest[position + EVENT_MARKER.len()..];
        (
            &rest[..position],
            Some(MemberRef {
                name: name.to_string(),
                marker: MemberMarker::Event,
                label: None,
            }),
        )
    } else if let Some(position) = rest.find('#') {
        let (name, label) = split_label(&rest[position + 1..]);
        (
            &rest[..position],
            Some(MemberRef {
                name,
                marker: MemberMarker::Instance,
                label,
            }),
        )
    } else if let Some(position) = rest.find('.') {
        let (name, label) = split_label(&rest[position + 1..]);
        (
            &rest[..position],
            Some(MemberRef {
                name,
                marker: MemberMarker::Static,
                label,
            }),
        )
    } else {
        (rest, None)
    };

    let type_name = if type_part.is_empty() {
        None
    } else {
        Some(type_part.to_string())
    };

    Identifier {
        module_path,
        type_name,
        member,
    }
}

/// Splits an optional trailing `:<LABEL>` off a member name.
fn split_label(text: &str) -> (String, Option<String>) {
    match text.split_once(':') {
        Some((name, label)) if !label.is_empty() => (name.to_string(), Some(label.to_string())),
        Some((name, _)) => (name.to_string(), None),
        None => (text.to_string(), None),
    }
}
