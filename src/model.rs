use std::fs;
use std::path::Path;

use glob::Pattern;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{DocrefError, Result};
use crate::types::*;

/// A fully materialized reflection model, borrowed read-only by the index
/// and validators for the duration of a validation pass.
///
/// Reflections live in a flat arena addressed by `ReflectionId`; parent
/// links are weak back references into the same arena. The model is
/// immutable after construction and rebuilt fresh for each snapshot.
#[derive(Debug, Clone)]
pub struct Project {
    reflections: Vec<Reflection>,
    children: Vec<Vec<ReflectionId>>,
    packages: Vec<String>,
}

/// On-disk shape of a serialized reflection model.
#[derive(Debug, Deserialize)]
struct ProjectFile {
    /// Glob patterns naming source files of the project's own packages.
    #[serde(default)]
    packages: Vec<String>,
    reflections: Vec<Reflection>,
}

impl Project {
    /// Builds a project from an arena of reflections.
    ///
    /// Fails if a reflection's id does not match its arena position, a
    /// parent id is out of range or self-referential, or a non-module
    /// reflection has no parent. These are contract violations on the part
    /// of the model generator, not documentation errors.
    pub fn new(reflections: Vec<Reflection>, packages: Vec<String>) -> Result<Self> {
        for (position, reflection) in reflections.iter().enumerate() {
            if reflection.id.index() != position {
                return Err(DocrefError::Model {
                    message: format!(
                        "reflection '{}' has id {} but arena position {}",
                        reflection.name, reflection.id.0, position
                    ),
                });
            }

            match reflection.parent {
                Some(parent) if parent.index() >= reflections.len() || parent == reflection.id => {
                    return Err(DocrefError::Model {
                        message: format!(
                            "reflection '{}' has invalid parent id {}",
                            reflection.name, parent.0
                        ),
                    });
                }
                None if reflection.kind != ReflectionKind::Module => {
                    return Err(DocrefError::Model {
                        message: format!(
                            "{} reflection '{}' has no parent",
                            reflection.kind.as_str(),
                            reflection.name
                        ),
                    });
                }
                _ => {}
            }
        }

        let mut children: Vec<Vec<ReflectionId>> = vec![Vec::new(); reflections.len()];
        for reflection in &reflections {
            if let Some(parent) = reflection.parent {
                children[parent.index()].push(reflection.id);
            }
        }

        debug!(reflections = reflections.len(), "reflection model loaded");

        Ok(Self {
            reflections,
            children,
            packages,
        })
    }

    /// Deserializes a project from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ProjectFile = serde_json::from_str(json)?;
        Self::new(file.reflections, file.packages)
    }

    /// Loads a project from a serialized model file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of reflections in the model.
    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    /// Returns the reflection with the given id.
    ///
    /// Ids handed out by this project are always in range; passing an id
    /// from a different project panics.
    pub fn get(&self, id: ReflectionId) -> &Reflection {
        &self.reflections[id.index()]
    }

    /// Iterates over all reflections in declaration order.
    pub fn reflections(&self) -> impl Iterator<Item = &Reflection> {
        self.reflections.iter()
    }

    /// Returns all reflections matching any of the given kinds, in
    /// declaration order. An empty kind list matches nothing.
    pub fn reflections_by_kind(&self, kinds: &[ReflectionKind]) -> Vec<&Reflection> {
        self.reflections
            .iter()
            .filter(|reflection| kinds.contains(&reflection.kind))
            .collect()
    }

    /// Direct children of a reflection, in declaration order.
    pub fn children(&self, id: ReflectionId) -> &[ReflectionId] {
        &self.children[id.index()]
    }

    /// Walks parent links to the module enclosing a reflection (or the
    /// reflection itself, if it is a module).
    pub fn module_of(&self, id: ReflectionId) -> Option<ReflectionId> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            let reflection = self.get(current_id);
            if reflection.kind == ReflectionKind::Module {
                return Some(current_id);
            }
            current = reflection.parent;
        }
        None
    }

    /// Returns the container enclosing a reflection: the reflection itself
    /// if it is a class or interface, else its nearest container ancestor,
    /// falling back to the enclosing module for module-level reflections.
    pub fn container_of(&self, id: ReflectionId) -> Option<ReflectionId> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            let reflection = self.get(current_id);
            if reflection.kind.is_container() {
                return Some(current_id);
            }
            current = reflection.parent;
        }
        self.module_of(id)
    }

    /// Whether a reflection belongs to the project's own packages.
    ///
    /// Reflections pulled in from dependency declarations are filtered out
    /// of every validation pass. A reflection with no sources is considered
    /// the project's own; with sources, at least one must match a package
    /// pattern. An empty pattern list accepts everything.
    pub fn is_own(&self, reflection: &Reflection) -> bool {
        if self.packages.is_empty() || reflection.sources.is_empty() {
            return true;
        }

        reflection
            .sources
            .iter()
            .any(|source| matches_any_package(&source.file_name, &self.packages))
    }
}

/// Checks a source file name against the package glob patterns.
fn matches_any_package(file_name: &str, patterns: &[String]) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    for pattern_str in patterns {
        if let Ok(pattern) = Pattern::new(pattern_str) {
            if pattern.matches_with(file_name, match_opts) {
                return true;
            }
        }
    }

    false
}
