use crate::crs::SpatialReference;
use oxrdf::Literal;
use oxrdf::vocab::xsd;
use std::borrow::Cow;

/// One record of a vector dataset: attribute values and a geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Position of the feature in the dataset iteration order.
    pub index: u64,
    /// Attribute values, in the dataset column order.
    pub fields: Vec<(String, FieldValue)>,
    /// The feature geometry, `None` for records without shape.
    pub geometry: Option<Geometry>,
}

/// The value of an attribute field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An integer, serialized as `xsd:integer`.
    Integer(i64),
    /// A floating point number, serialized as `xsd:double`.
    Float(f64),
    /// A text value, serialized as a plain literal.
    String(String),
    /// A logical value, serialized as `xsd:boolean`.
    Boolean(bool),
    /// A calendar date in the `YYYY-MM-DD` form.
    Date(String),
    /// A blank value.
    Null,
}

impl FieldValue {
    /// The RDF literal of this value.
    ///
    /// The datatype follows the native type: `xsd:integer`, `xsd:double`, `xsd:boolean`, `xsd:date`
    /// or a plain string. Null values become the empty plain literal.
    pub fn to_literal(&self) -> Literal {
        match self {
            Self::Integer(value) => Literal::from(*value),
            Self::Float(value) => Literal::from(*value),
            Self::String(value) => Literal::new_simple_literal(value),
            Self::Boolean(value) => Literal::from(*value),
            Self::Date(value) => Literal::new_typed_literal(value, xsd::DATE),
            Self::Null => Literal::new_simple_literal(""),
        }
    }
}

impl From<i64> for FieldValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for FieldValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FieldValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A geometry with its coordinate reference system.
///
/// Coordinates are stored as a 2D [`geo_types::Geometry`].
/// Its type name is derived from the shape unless the reader provides the native one.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: geo_types::Geometry<f64>,
    spatial_reference: Option<SpatialReference>,
    native_type: Option<String>,
}

impl Geometry {
    /// A geometry with the given coordinates, in `spatial_reference` if known.
    #[inline]
    pub fn new(
        shape: impl Into<geo_types::Geometry<f64>>,
        spatial_reference: Option<SpatialReference>,
    ) -> Self {
        Self {
            shape: shape.into(),
            spatial_reference,
            native_type: None,
        }
    }

    /// Overrides the type name derived from the shape with the one reported by the dataset.
    #[inline]
    #[must_use]
    pub fn with_native_type(mut self, type_name: impl Into<String>) -> Self {
        self.native_type = Some(type_name.into());
        self
    }

    /// The coordinates.
    #[inline]
    pub fn shape(&self) -> &geo_types::Geometry<f64> {
        &self.shape
    }

    /// Consumes the geometry and returns its coordinates.
    #[inline]
    pub fn into_shape(self) -> geo_types::Geometry<f64> {
        self.shape
    }

    /// The reference system of the coordinates, if known.
    #[inline]
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    /// Declares the reference system of the coordinates without changing them.
    #[inline]
    #[must_use]
    pub fn with_spatial_reference(mut self, spatial_reference: SpatialReference) -> Self {
        self.spatial_reference = Some(spatial_reference);
        self
    }

    /// Replaces the coordinates, keeping the native type name.
    #[must_use]
    pub(crate) fn with_shape(
        self,
        shape: geo_types::Geometry<f64>,
        spatial_reference: SpatialReference,
    ) -> Self {
        Self {
            shape,
            spatial_reference: Some(spatial_reference),
            native_type: self.native_type,
        }
    }

    /// The geometry type name, like `Point` or `MultiPolygon`.
    pub fn type_name(&self) -> Cow<'_, str> {
        if let Some(native_type) = &self.native_type {
            return native_type.as_str().into();
        }
        match &self.shape {
            geo_types::Geometry::Point(_) => "Point",
            geo_types::Geometry::Line(_) => "Line",
            geo_types::Geometry::LineString(_) => "LineString",
            geo_types::Geometry::Polygon(_) | geo_types::Geometry::Rect(_) => "Polygon",
            geo_types::Geometry::MultiPoint(_) => "MultiPoint",
            geo_types::Geometry::MultiLineString(_) => "MultiLineString",
            geo_types::Geometry::MultiPolygon(_) => "MultiPolygon",
            geo_types::Geometry::GeometryCollection(_) => "GeometryCollection",
            geo_types::Geometry::Triangle(_) => "Triangle",
        }
        .into()
    }
}
