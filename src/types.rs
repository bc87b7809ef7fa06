use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of reflections in the documentation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionKind {
    Module,
    Class,
    Interface,
    Method,
    Property,
    Function,
    Event,
    Accessor,
}

#[allow(clippy::should_implement_trait)]
impl ReflectionKind {
    /// Returns the string representation of this reflection kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionKind::Module => "module",
            ReflectionKind::Class => "class",
            ReflectionKind::Interface => "interface",
            ReflectionKind::Method => "method",
            ReflectionKind::Property => "property",
            ReflectionKind::Function => "function",
            ReflectionKind::Event => "event",
            ReflectionKind::Accessor => "accessor",
        }
    }

    /// Parses a string into a `ReflectionKind`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<ReflectionKind> {
        match s {
            "module" => Some(ReflectionKind::Module),
            "class" => Some(ReflectionKind::Class),
            "interface" => Some(ReflectionKind::Interface),
            "method" => Some(ReflectionKind::Method),
            "property" => Some(ReflectionKind::Property),
            "function" => Some(ReflectionKind::Function),
            "event" => Some(ReflectionKind::Event),
            "accessor" => Some(ReflectionKind::Accessor),
            _ => None,
        }
    }

    /// Whether reflections of this kind can own members (classes and interfaces).
    pub fn is_container(&self) -> bool {
        matches!(self, ReflectionKind::Class | ReflectionKind::Interface)
    }

    /// Whether reflections of this kind are addressable members of a container.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            ReflectionKind::Method | ReflectionKind::Property | ReflectionKind::Accessor
        )
    }
}

/// Identifies a reflection by its position in the project arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReflectionId(pub u32);

impl ReflectionId {
    /// Returns the arena index of this id.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A source location attributed to a reflection or signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub file_name: String,
    pub line: u32,
}

/// One tag of a documentation comment (`@see`, `@fires`, `@label`, ...).
///
/// The tag name is stored without the leading `@`. Content items are the
/// individual text entries following the tag, one per line of tag content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTag {
    pub name: String,
    #[serde(default)]
    pub content: Vec<String>,
}

/// A structured documentation comment: summary text plus block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<CommentTag>,
}

impl Comment {
    /// Returns the first tag with the given name, if any.
    pub fn get_tag(&self, name: &str) -> Option<&CommentTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Returns all tags with the given name, in declaration order.
    pub fn get_tags<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CommentTag> + 'a {
        self.tags.iter().filter(move |tag| tag.name == name)
    }
}

/// One call-shape of a method or function.
///
/// Overloaded members share a single reflection carrying one signature per
/// overload; each signature has its own comment (and `@label` tag) and
/// source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// A node in the documentation model representing one documented entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: ReflectionId,
    pub kind: ReflectionKind,
    pub name: String,
    /// Owning container or module. Every non-module reflection has one.
    #[serde(default)]
    pub parent: Option<ReflectionId>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub is_static: bool,
    /// Qualified reference to the origin of an inherited member, if any.
    #[serde(default)]
    pub inherited_from: Option<String>,
    /// Supertype references (base classes, interfaces, mixins) in
    /// declaration order, written in the identifier grammar.
    #[serde(default)]
    pub extends: Vec<String>,
}

/// The member-kind marker of a parsed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberMarker {
    /// `#name` -- instance property, method, or accessor.
    Instance,
    /// `.name` -- static member.
    Static,
    /// `#event:name` -- event declared on the type.
    Event,
}

/// The member part of a parsed reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub name: String,
    pub marker: MemberMarker,
    /// Overload label following `:`, disambiguating among signatures.
    #[serde(default)]
    pub label: Option<String>,
}

/// A parsed cross-reference string.
///
/// An identifier is a query, not an entity: resolution maps it to zero, one,
/// or many reflections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// `/`-separated module path from an absolute `module:` prefix.
    #[serde(default)]
    pub module_path: Option<String>,
    /// Exported class/interface/function name within the module.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub member: Option<MemberRef>,
}

impl Identifier {
    /// Builds a container-relative event reference (`#event:<name>`).
    pub fn event(name: &str) -> Identifier {
        Identifier {
            module_path: None,
            type_name: None,
            member: Some(MemberRef {
                name: name.to_string(),
                marker: MemberMarker::Event,
                label: None,
            }),
        }
    }

    /// Whether this identifier carries an absolute `module:` prefix.
    pub fn is_absolute(&self) -> bool {
        self.module_path.is_some()
    }
}

/// A single validation failure reported through the error callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub message: String,
    pub source: Option<Source>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{} ({}:{}).", self.message, source.file_name, source.line),
            None => write!(f, "{}.", self.message),
        }
    }
}
