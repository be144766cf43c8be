use crate::error::ConversionError;
use crate::vocab::sf;
use oxrdf::NamedNodeRef;
use std::fmt;
use std::str::FromStr;

/// A [Simple Features](http://www.opengis.net/ont/sf) geometry class.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SimpleFeaturesClass {
    /// `sf:Curve`
    Curve,
    /// `sf:GeometryCollection`
    GeometryCollection,
    /// `sf:Line`, a line string with exactly two points
    Line,
    /// `sf:LinearRing`, a closed line string
    LinearRing,
    /// `sf:LineString`
    LineString,
    /// `sf:MultiCurve`
    MultiCurve,
    /// `sf:MultiLineString`
    MultiLineString,
    /// `sf:MultiPoint`
    MultiPoint,
    /// `sf:MultiPolygon`
    MultiPolygon,
    /// `sf:MultiSurface`
    MultiSurface,
    /// `sf:Point`
    Point,
    /// `sf:Polygon`
    Polygon,
    /// `sf:PolyhedralSurface`
    PolyhedralSurface,
    /// `sf:Surface`
    Surface,
    /// `sf:TIN`, a triangulated irregular network
    Tin,
    /// `sf:Triangle`
    Triangle,
}

impl SimpleFeaturesClass {
    /// All the classes, in alphabetical order.
    pub const ALL: [Self; 16] = [
        Self::Curve,
        Self::GeometryCollection,
        Self::Line,
        Self::LinearRing,
        Self::LineString,
        Self::MultiCurve,
        Self::MultiLineString,
        Self::MultiPoint,
        Self::MultiPolygon,
        Self::MultiSurface,
        Self::Point,
        Self::Polygon,
        Self::PolyhedralSurface,
        Self::Surface,
        Self::Tin,
        Self::Triangle,
    ];

    /// The class IRI in the `sf:` namespace.
    ///
    /// ```
    /// use shape2geosparql::SimpleFeaturesClass;
    ///
    /// assert_eq!(
    ///     SimpleFeaturesClass::MultiPolygon.iri().as_str(),
    ///     "http://www.opengis.net/ont/sf#MultiPolygon"
    /// );
    /// ```
    #[inline]
    pub const fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Curve => sf::CURVE,
            Self::GeometryCollection => sf::GEOMETRY_COLLECTION,
            Self::Line => sf::LINE,
            Self::LinearRing => sf::LINEAR_RING,
            Self::LineString => sf::LINE_STRING,
            Self::MultiCurve => sf::MULTI_CURVE,
            Self::MultiLineString => sf::MULTI_LINE_STRING,
            Self::MultiPoint => sf::MULTI_POINT,
            Self::MultiPolygon => sf::MULTI_POLYGON,
            Self::MultiSurface => sf::MULTI_SURFACE,
            Self::Point => sf::POINT,
            Self::Polygon => sf::POLYGON,
            Self::PolyhedralSurface => sf::POLYHEDRAL_SURFACE,
            Self::Surface => sf::SURFACE,
            Self::Tin => sf::TIN,
            Self::Triangle => sf::TRIANGLE,
        }
    }

    /// The geometry type name as used by the Simple Features standard.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Curve => "Curve",
            Self::GeometryCollection => "GeometryCollection",
            Self::Line => "Line",
            Self::LinearRing => "LinearRing",
            Self::LineString => "LineString",
            Self::MultiCurve => "MultiCurve",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPoint => "MultiPoint",
            Self::MultiPolygon => "MultiPolygon",
            Self::MultiSurface => "MultiSurface",
            Self::Point => "Point",
            Self::Polygon => "Polygon",
            Self::PolyhedralSurface => "PolyhedralSurface",
            Self::Surface => "Surface",
            Self::Tin => "TIN",
            Self::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for SimpleFeaturesClass {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimpleFeaturesClass {
    type Err = ConversionError;

    /// Case-insensitive lookup of a geometry type name.
    fn from_str(type_name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(type_name))
            .ok_or_else(|| ConversionError::UnknownGeometryType(type_name.to_owned()))
    }
}

/// Maps a native geometry type name to its Simple Features class.
///
/// The lookup is case-insensitive.
///
/// ```
/// use shape2geosparql::{classify, SimpleFeaturesClass};
///
/// assert_eq!(classify("POINT")?, SimpleFeaturesClass::Point);
/// assert!(classify("CircularString").is_err());
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[inline]
pub fn classify(type_name: &str) -> Result<SimpleFeaturesClass, ConversionError> {
    type_name.parse()
}
