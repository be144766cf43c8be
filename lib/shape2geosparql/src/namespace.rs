use crate::error::ConversionError;
use oxrdf::NamedNode;
use std::fmt;

/// The two IRI prefixes of a generated graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NamespaceRole {
    /// Prefix of the feature and geometry IRIs.
    Data,
    /// Prefix of the attribute predicates.
    Schema,
}

impl NamespaceRole {
    #[inline]
    const fn path_segment(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Schema => "ontology",
        }
    }

    /// The prefix name used when serializing.
    #[inline]
    pub const fn prefix_name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for NamespaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix_name())
    }
}

/// The namespace used when the caller does not provide one.
///
/// ```
/// use shape2geosparql::{NamespaceRole, default_namespace};
///
/// assert_eq!(
///     default_namespace("roads", NamespaceRole::Data),
///     "http://www.example.org/shape2geosparql/roads/data/"
/// );
/// assert_eq!(
///     default_namespace("roads", NamespaceRole::Schema),
///     "http://www.example.org/shape2geosparql/roads/ontology/"
/// );
/// ```
pub fn default_namespace(basename: &str, role: NamespaceRole) -> String {
    format!(
        "http://www.example.org/shape2geosparql/{basename}/{}/",
        role.path_segment()
    )
}

/// The data and schema namespaces of one conversion.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Namespaces {
    data: NamedNode,
    schema: NamedNode,
}

impl Namespaces {
    /// Validates both namespaces.
    pub fn new(
        data: impl Into<String>,
        schema: impl Into<String>,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            data: parse_namespace(data.into())?,
            schema: parse_namespace(schema.into())?,
        })
    }

    /// Uses the given namespaces, falling back to [`default_namespace`] for `basename`.
    pub fn resolve(
        data: Option<&str>,
        schema: Option<&str>,
        basename: &str,
    ) -> Result<Self, ConversionError> {
        Self::new(
            data.map_or_else(
                || default_namespace(basename, NamespaceRole::Data),
                Into::into,
            ),
            schema.map_or_else(
                || default_namespace(basename, NamespaceRole::Schema),
                Into::into,
            ),
        )
    }

    /// The prefix of the feature and geometry IRIs.
    #[inline]
    pub fn data(&self) -> &str {
        self.data.as_str()
    }

    /// The prefix of the attribute predicates.
    #[inline]
    pub fn schema(&self) -> &str {
        self.schema.as_str()
    }

    /// The namespace of the given role.
    #[inline]
    pub fn get(&self, role: NamespaceRole) -> &str {
        match role {
            NamespaceRole::Data => self.data(),
            NamespaceRole::Schema => self.schema(),
        }
    }

    /// `data_ns + index`
    pub fn feature_iri(&self, index: u64) -> NamedNode {
        // Appending ASCII digits keeps a valid IRI valid
        NamedNode::new_unchecked(format!("{}{index}", self.data()))
    }

    /// `data_ns + index + "_geom"`
    pub fn geometry_iri(&self, index: u64) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{index}_geom", self.data()))
    }

    /// The predicate of an attribute field: `schema_ns + lowercase(name)`.
    pub fn field_predicate(&self, name: &str) -> Result<NamedNode, ConversionError> {
        NamedNode::new(format!("{}{}", self.schema(), name.to_lowercase())).map_err(|error| {
            ConversionError::InvalidFieldName {
                field: name.into(),
                error,
            }
        })
    }
}

pub(crate) fn parse_namespace(namespace: String) -> Result<NamedNode, ConversionError> {
    NamedNode::new(namespace.as_str())
        .map_err(|error| ConversionError::InvalidNamespace { namespace, error })
}
