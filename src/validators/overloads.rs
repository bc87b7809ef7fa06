use tracing::debug;

use crate::model::Project;
use crate::types::{ReflectionKind, ValidationError};
use crate::validators::utils::{error_at, signature_source};

/// Checks that every signature of an overloaded method or function carries
/// an explicit `@label` tag for disambiguation.
pub fn validate(project: &Project, on_error: &mut dyn FnMut(ValidationError)) {
    let mut reported = 0usize;

    for reflection in
        project.reflections_by_kind(&[ReflectionKind::Method, ReflectionKind::Function])
    {
        if !project.is_own(reflection) {
            continue;
        }

        if reflection.signatures.len() <= 1 {
            continue;
        }

        for signature in &reflection.signatures {
            let has_label = signature
                .comment
                .as_ref()
                .is_some_and(|comment| comment.get_tag("label").is_some());

            if has_label {
                continue;
            }

            reported += 1;
            on_error(error_at(
                "Missing \"@label\" tag for overloaded signature".to_string(),
                signature_source(signature, reflection),
            ));
        }
    }

    debug!(errors = reported, "overload label validation finished");
}
