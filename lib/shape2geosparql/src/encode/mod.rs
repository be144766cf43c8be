//! Serialization of geometries into RDF literals.

mod gml;
mod wkt;

use crate::error::ConversionError;
use crate::feature::Geometry;
use crate::vocab::{geo, s2g, w3geo};
use oxrdf::{Literal, NamedNodeRef};

pub use self::gml::to_gml;
pub use self::wkt::Wkt;

/// Selects the geometry serializations to produce.
///
/// ```
/// use shape2geosparql::EncodingOptions;
///
/// let options = EncodingOptions {
///     include_gml: true,
///     ..EncodingOptions::default()
/// };
/// assert!(options.include_wkt && options.include_gml);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EncodingOptions {
    /// Adds `w3geo:long` and `w3geo:lat` to points.
    pub include_wgs84_point: bool,
    /// Adds a `geo:asWKT` literal.
    pub include_wkt: bool,
    /// Adds a `geo:asGML` literal.
    pub include_gml: bool,
    /// Adds a GeoJSON literal.
    pub include_geojson: bool,
}

impl Default for EncodingOptions {
    #[inline]
    fn default() -> Self {
        Self {
            include_wgs84_point: true,
            include_wkt: true,
            include_gml: false,
            include_geojson: true,
        }
    }
}

/// Serializes a geometry into (predicate, literal) pairs according to `options`.
///
/// The geometry is expected to be already in WGS 84, no reprojection is done here.
///
/// ```
/// use geo_types::point;
/// use oxrdf::Literal;
/// use shape2geosparql::vocab::{geo, w3geo};
/// use shape2geosparql::{encode, EncodingOptions, Geometry, SpatialReference};
///
/// let geometry = Geometry::new(point!(x: 10., y: 20.), Some(SpatialReference::WGS84));
/// let literals = encode(&geometry, &EncodingOptions::default())?;
/// assert!(literals.contains(&(w3geo::LONG, Literal::from(10.))));
/// assert!(literals.contains(&(
///     geo::AS_WKT,
///     Literal::new_typed_literal("POINT (10 20)", geo::WKT_LITERAL)
/// )));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn encode(
    geometry: &Geometry,
    options: &EncodingOptions,
) -> Result<Vec<(NamedNodeRef<'static>, Literal)>, ConversionError> {
    let shape = geometry.shape();
    let mut literals = Vec::new();
    if options.include_wgs84_point {
        if let geo_types::Geometry::Point(point) = shape {
            literals.push((w3geo::LONG, Literal::from(point.x())));
            literals.push((w3geo::LAT, Literal::from(point.y())));
        }
    }
    if options.include_wkt {
        literals.push((
            geo::AS_WKT,
            Literal::new_typed_literal(Wkt(shape).to_string(), geo::WKT_LITERAL),
        ));
    }
    if options.include_gml {
        let srs_name = geometry.spatial_reference().map(ToString::to_string);
        let gml = to_gml(shape, srs_name.as_deref()).map_err(ConversionError::Gml)?;
        literals.push((geo::AS_GML, Literal::new_typed_literal(gml, geo::GML_LITERAL)));
    }
    if options.include_geojson {
        let geojson = geojson::Geometry::new(geojson::Value::from(shape));
        literals.push((
            s2g::AS_GEO_JSON,
            Literal::new_typed_literal(geojson.to_string(), s2g::GEO_JSON_LITERAL),
        ));
    }
    Ok(literals)
}
