//! GraphQL query documents

use std::fmt;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// A literal argument value inside a query document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryArgument {
    /// Integer literal
    Int(i64),
    /// String literal, escaped on render
    String(String),
    /// Boolean literal
    Bool(bool),
    /// Bare enum value (e.g. `PUBLISHED`)
    Enum(String),
    /// List literal
    List(Vec<QueryArgument>),
}

impl fmt::Display for QueryArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{}", Value::String(value.clone())),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Enum(value) => f.write_str(value),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for QueryArgument {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for QueryArgument {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryArgument {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for QueryArgument {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One field of a selection set, with optional arguments and sub-fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryField {
    name: String,
    arguments: Vec<(String, QueryArgument)>,
    fields: Vec<QueryField>,
}

impl QueryField {
    /// Creates a leaf field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<QueryArgument>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Adds a nested field.
    #[must_use]
    pub fn field(mut self, field: Self) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds several leaf fields by name.
    #[must_use]
    pub fn leaves<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Self::new));
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (index, (name, value)) in self.arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            f.write_str(")")?;
        }
        if !self.fields.is_empty() {
            f.write_str(" {")?;
            for field in &self.fields {
                write!(f, " {field}")?;
            }
            f.write_str(" }")?;
        }
        Ok(())
    }
}

/// A non-empty, duplicate-free, ordered set of root fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySet {
    fields: Vec<QueryField>,
}

impl QuerySet {
    /// Creates a set holding one root field.
    #[must_use]
    pub fn new(first: QueryField) -> Self {
        Self {
            fields: vec![first],
        }
    }

    /// Builds a set from any number of root fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyQuerySet` when `fields` is empty.
    pub fn from_fields(fields: impl IntoIterator<Item = QueryField>) -> DomainResult<Self> {
        let mut iter = fields.into_iter();
        let first = iter.next().ok_or(DomainError::EmptyQuerySet)?;
        let mut set = Self::new(first);
        for field in iter {
            set.insert(field);
        }
        Ok(set)
    }

    /// Adds a root field unless an identical one is present.
    pub fn insert(&mut self, field: QueryField) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, field: QueryField) -> Self {
        self.insert(field);
        self
    }

    /// Number of root fields.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: a query set holds at least one field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Renders the combined query document.
    #[must_use]
    pub fn document(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for field in &self.fields {
            write!(f, " {field}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_categories_document() {
        let set = QuerySet::new(QueryField::new("rootCategories").leaves(["id", "name"]));
        assert_eq!(set.document(), "{ rootCategories { id name } }");
    }

    #[test]
    fn test_arguments_and_nesting() {
        let field = QueryField::new("node")
            .arg("id", "Q2F0ZWdvcnktMQ==")
            .field(
                QueryField::new("subcategories")
                    .field(QueryField::new("nodes").leaves(["id", "name"])),
            );

        assert_eq!(
            field.to_string(),
            r#"node(id: "Q2F0ZWdvcnktMQ==") { subcategories { nodes { id name } } }"#
        );
    }

    #[test]
    fn test_argument_rendering() {
        assert_eq!(QueryArgument::Int(3).to_string(), "3");
        assert_eq!(QueryArgument::from("a \"b\"").to_string(), r#""a \"b\"""#);
        assert_eq!(QueryArgument::Enum("LIVE".into()).to_string(), "LIVE");
        assert_eq!(
            QueryArgument::List(vec![QueryArgument::Int(1), QueryArgument::Int(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let set = QuerySet::from_fields([
            QueryField::new("me").leaves(["id"]),
            QueryField::new("rootCategories").leaves(["id"]),
            QueryField::new("me").leaves(["id"]),
        ])
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.document(), "{ me { id } rootCategories { id } }");
    }

    #[test]
    fn test_empty_set_rejected() {
        let result = QuerySet::from_fields(Vec::new());
        assert_eq!(result, Err(DomainError::EmptyQuerySet));
    }
}
