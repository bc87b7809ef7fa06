/// Reference resolution module.
///
/// Resolves parsed identifiers against the reflection index, applying
/// absolute, module-relative, and container-relative precedence rules.
mod resolver;

pub use resolver::{ReferenceResolver, Resolution};
