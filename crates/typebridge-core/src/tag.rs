//! Declarative metadata tags attached to symbols, fields, and methods
//!
//! Tags are parsed once (by the loader or a builder) and immutable afterward.
//! A [`TagSet`] resolves tags strictly from the element it belongs to; there
//! is no base-class or parent-scope search.

/// A single metadata instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Human-facing title.
    Title(String),

    /// Human-facing description.
    Description(String),

    /// Serialization groups the element belongs to.
    Groups(Vec<String>),

    /// Force the element into the projection, and mark it required.
    Visible,

    /// Unconditionally suppress the element from projection.
    Hidden,

    /// The projected field may be `undefined` on the client.
    Undefined,

    /// Translation key used as the human-facing field label.
    Label(String),

    /// Explicit type text override for the projected declaration.
    TypeName(String),

    /// Marks a schema as request-shaped: all its fields project by default
    /// and it is hydrated from the request body.
    RequestModel,

    /// Marks a schema as an API controller.
    Controller {
        title: Option<String>,
        description: Option<String>,
    },

    /// Exposure metadata for a controller method.
    ApiMethod {
        title: Option<String>,
        description: Option<String>,
        request: Option<String>,
        response: Option<String>,
    },

    /// Route binding: path template plus HTTP verbs.
    Route { path: String, verbs: Vec<String> },

    /// Structural validation constraint.
    Constraint(Constraint),

    /// Named transformation step applied during hydration.
    Mutator(String),

    /// Named custom validator applied during hydration.
    Validator(String),
}

/// Discriminant for [`Tag`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Title,
    Description,
    Groups,
    Visible,
    Hidden,
    Undefined,
    Label,
    TypeName,
    RequestModel,
    Controller,
    ApiMethod,
    Route,
    Constraint,
    Mutator,
    Validator,
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Title(_) => TagKind::Title,
            Tag::Description(_) => TagKind::Description,
            Tag::Groups(_) => TagKind::Groups,
            Tag::Visible => TagKind::Visible,
            Tag::Hidden => TagKind::Hidden,
            Tag::Undefined => TagKind::Undefined,
            Tag::Label(_) => TagKind::Label,
            Tag::TypeName(_) => TagKind::TypeName,
            Tag::RequestModel => TagKind::RequestModel,
            Tag::Controller { .. } => TagKind::Controller,
            Tag::ApiMethod { .. } => TagKind::ApiMethod,
            Tag::Route { .. } => TagKind::Route,
            Tag::Constraint(_) => TagKind::Constraint,
            Tag::Mutator(_) => TagKind::Mutator,
            Tag::Validator(_) => TagKind::Validator,
        }
    }
}

/// A structural validation rule with an optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub rule: Rule,
    pub message: Option<String>,
}

impl Constraint {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    pub fn with_message(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: Some(message.into()),
        }
    }
}

/// Structural validation rule kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present and non-blank.
    NotBlank,

    /// Value must be one of a fixed set of string options.
    Choice(Vec<String>),

    /// Value must match a case value of the named enum schema.
    EnumChoice(String),

    /// Numeric value must fall within the given bounds.
    Range { min: Option<f64>, max: Option<f64> },

    /// String length must fall within the given bounds.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
}

/// An ordered collection of tags attached to one element.
///
/// Declaring order among tags of the same kind is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// First tag of the given kind, if any.
    pub fn get(&self, kind: TagKind) -> Option<&Tag> {
        self.tags.iter().find(|t| t.kind() == kind)
    }

    /// All tags of the given kind, in declaration order.
    pub fn get_all(&self, kind: TagKind) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.kind() == kind).collect()
    }

    pub fn has(&self, kind: TagKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// All constraint rules, in declaration order.
    pub fn constraints(&self) -> Vec<&Constraint> {
        self.tags
            .iter()
            .filter_map(|t| match t {
                Tag::Constraint(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Groups from the first `Groups` tag, if any.
    pub fn groups(&self) -> Option<&[String]> {
        match self.get(TagKind::Groups) {
            Some(Tag::Groups(g)) => Some(g),
            _ => None,
        }
    }

    /// True if a `NotBlank` constraint is attached.
    pub fn requires_value(&self) -> bool {
        self.constraints().iter().any(|c| c.rule == Rule::NotBlank)
    }

    /// Type text override from a `TypeName` tag, if any.
    pub fn type_override(&self) -> Option<&str> {
        match self.get(TagKind::TypeName) {
            Some(Tag::TypeName(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Translation key from a `Label` tag, if any.
    pub fn label(&self) -> Option<&str> {
        match self.get(TagKind::Label) {
            Some(Tag::Label(k)) => Some(k.as_str()),
            _ => None,
        }
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}
