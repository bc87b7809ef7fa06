use tracing::debug;

use crate::identifier::{self, ParsedReference};
use crate::model::Project;
use crate::resolution::ReferenceResolver;
use crate::types::ValidationError;
use crate::validators::utils::{error_at, extract_inline_links, reflection_source};

/// Checks that every inline `{@link ...}` reference in comment text
/// resolves to a reflection.
///
/// Failures are reported once per syntactic occurrence: identical
/// identifiers inside the same comment yield one error each, never
/// deduplicated, since each occurrence has its own rendered location.
pub fn validate(
    project: &Project,
    resolver: &ReferenceResolver<'_>,
    on_error: &mut dyn FnMut(ValidationError),
) {
    let mut reported = 0usize;

    for reflection in project.reflections() {
        if !project.is_own(reflection) {
            continue;
        }

        let Some(comment) = &reflection.comment else {
            continue;
        };

        let mut texts: Vec<&str> = vec![comment.summary.as_str()];
        for tag in &comment.tags {
            for item in &tag.content {
                texts.push(item.as_str());
            }
        }

        for text in texts {
            for target in extract_inline_links(text) {
                let ident = match identifier::parse_reference(&target) {
                    ParsedReference::ExternalLink | ParsedReference::Fragment => continue,
                    ParsedReference::Reference(ident) => ident,
                };

                if resolver.resolve(&ident, reflection.id).is_none() {
                    reported += 1;
                    on_error(error_at(
                        format!("Target doclet for \"{}\" identifier is not found", target),
                        reflection_source(reflection),
                    ));
                }
            }
        }
    }

    debug!(errors = reported, "inline link validation finished");
}
