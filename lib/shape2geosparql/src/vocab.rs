//! Provides ready to use [`NamedNodeRef`]s for the vocabularies used in the generated graphs.

pub mod geo {
    //! [GeoSPARQL](https://opengeospatial.github.io/ogc-geosparql/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The namespace of the GeoSPARQL ontology.
    pub const NAMESPACE: &str = "http://www.opengis.net/ont/geosparql#";

    /// Links a feature to one of its geometries.
    pub const HAS_GEOMETRY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#hasGeometry");
    /// Links a geometry to its WKT serialization.
    pub const AS_WKT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#asWKT");
    /// Links a geometry to its GML serialization.
    pub const AS_GML: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#asGML");
    /// The datatype of WKT literals.
    pub const WKT_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral");
    /// The datatype of GML literals.
    pub const GML_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#gmlLiteral");
}

pub mod sf {
    //! [Simple Features](http://www.opengis.net/ont/sf) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The namespace of the Simple Features ontology.
    pub const NAMESPACE: &str = "http://www.opengis.net/ont/sf#";

    /// The `sf:Feature` class.
    pub const FEATURE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Feature");
    /// The `sf:Geometry` class.
    pub const GEOMETRY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Geometry");
    /// The `sf:Curve` class.
    pub const CURVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Curve");
    /// The `sf:GeometryCollection` class.
    pub const GEOMETRY_COLLECTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#GeometryCollection");
    /// The `sf:Line` class.
    pub const LINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Line");
    /// The `sf:LinearRing` class.
    pub const LINEAR_RING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#LinearRing");
    /// The `sf:LineString` class.
    pub const LINE_STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#LineString");
    /// The `sf:MultiCurve` class.
    pub const MULTI_CURVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#MultiCurve");
    /// The `sf:MultiLineString` class.
    pub const MULTI_LINE_STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#MultiLineString");
    /// The `sf:MultiPoint` class.
    pub const MULTI_POINT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#MultiPoint");
    /// The `sf:MultiPolygon` class.
    pub const MULTI_POLYGON: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#MultiPolygon");
    /// The `sf:MultiSurface` class.
    pub const MULTI_SURFACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#MultiSurface");
    /// The `sf:Point` class.
    pub const POINT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Point");
    /// The `sf:Polygon` class.
    pub const POLYGON: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Polygon");
    /// The `sf:PolyhedralSurface` class.
    pub const POLYHEDRAL_SURFACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#PolyhedralSurface");
    /// The `sf:Surface` class.
    pub const SURFACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Surface");
    /// The `sf:TIN` class.
    pub const TIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#TIN");
    /// The `sf:Triangle` class.
    pub const TRIANGLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/sf#Triangle");
}

pub mod w3geo {
    //! [W3C Basic Geo (WGS84 lat/long)](http://www.w3.org/2003/01/geo/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The namespace of the W3C Basic Geo vocabulary.
    pub const NAMESPACE: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";

    /// The WGS84 latitude of a point.
    pub const LAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#lat");
    /// The WGS84 longitude of a point.
    pub const LONG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#long");
}

pub mod s2g {
    //! Project specific terms.
    //!
    //! GeoJSON serializations live here and not in the GeoSPARQL namespace
    //! since they are not part of the GeoSPARQL 1.0 vocabulary.
    use oxrdf::NamedNodeRef;

    /// The namespace of the project ontology.
    pub const NAMESPACE: &str = "http://github.com/nvitucci/shape2geosparql/ontology#";

    /// Links a geometry to its GeoJSON serialization.
    pub const AS_GEO_JSON: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://github.com/nvitucci/shape2geosparql/ontology#asGeoJson");
    /// The datatype of GeoJSON literals.
    pub const GEO_JSON_LITERAL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://github.com/nvitucci/shape2geosparql/ontology#geoJsonLiteral",
    );
}
