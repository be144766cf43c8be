#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use geo_types::point;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, NamedNode, NamedNodeRef, TermRef, TripleRef};
use oxrdfio::RdfFormat;
use shape2geosparql::vocab::{geo, s2g, sf, w3geo};
use shape2geosparql::{
    ConversionError, Converter, DatasetError, EncodingOptions, Feature, Geometry,
    SpatialReference, VectorDataset, serialize_graph,
};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

const WGS84_PRJ: &str = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
const WEB_MERCATOR_PRJ: &str = r#"PROJCS["WGS_1984_Web_Mercator_Auxiliary_Sphere",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Mercator_Auxiliary_Sphere"],PARAMETER["False_Easting",0.0],PARAMETER["False_Northing",0.0],UNIT["Meter",1.0]]"#;
const NAD83_PRJ: &str = r#"GEOGCS["GCS_North_American_1983",DATUM["D_North_American_1983",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
const LOCAL_GRID_PRJ: &str = r#"PROJCS["Local grid",GEOGCS["Local"],PROJECTION["Local"],UNIT["Meter",1.0]]"#;
const MONTE_MARIO_PRJ: &str = r#"PROJCS["Monte Mario / Italy zone 1",GEOGCS["Monte Mario",DATUM["Monte_Mario",SPHEROID["International 1924",6378388,297]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],UNIT["metre",1],AUTHORITY["EPSG","3003"]]"#;

enum Shape {
    Null,
    Point(f64, f64),
    MultiPoint(Vec<(f64, f64)>),
    PolyLine(Vec<Vec<(f64, f64)>>),
    Polygon(Vec<Vec<(f64, f64)>>),
}

impl Shape {
    fn shape_type(&self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Point(..) => 1,
            Self::PolyLine(_) => 3,
            Self::Polygon(_) => 5,
            Self::MultiPoint(_) => 8,
        }
    }

    fn content(&self) -> Vec<u8> {
        let mut content = self.shape_type().to_le_bytes().to_vec();
        match self {
            Self::Null => (),
            Self::Point(x, y) => push_coords(&mut content, &[(*x, *y)]),
            Self::MultiPoint(points) => {
                content.extend_from_slice(&[0; 32]);
                content.extend_from_slice(&count(points.len()).to_le_bytes());
                push_coords(&mut content, points);
            }
            Self::PolyLine(parts) | Self::Polygon(parts) => {
                content.extend_from_slice(&[0; 32]);
                content.extend_from_slice(&count(parts.len()).to_le_bytes());
                let point_count = parts.iter().map(Vec::len).sum::<usize>();
                content.extend_from_slice(&count(point_count).to_le_bytes());
                let mut start = 0;
                for part in parts {
                    content.extend_from_slice(&count(start).to_le_bytes());
                    start += part.len();
                }
                for part in parts {
                    push_coords(&mut content, part);
                }
            }
        }
        content
    }
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap()
}

fn push_coords(content: &mut Vec<u8>, coords: &[(f64, f64)]) {
    for (x, y) in coords {
        content.extend_from_slice(&x.to_le_bytes());
        content.extend_from_slice(&y.to_le_bytes());
    }
}

struct Field {
    name: &'static str,
    kind: u8,
    len: u8,
    decimals: u8,
}

impl Field {
    const fn new(name: &'static str, kind: u8, len: u8, decimals: u8) -> Self {
        Self {
            name,
            kind,
            len,
            decimals,
        }
    }
}

/// Writes a Shapefile in a temporary directory
struct TestShapefile {
    fields: Vec<Field>,
    records: Vec<(Shape, Vec<&'static str>)>,
    prj: Option<&'static str>,
}

impl TestShapefile {
    fn new(fields: Vec<Field>, prj: Option<&'static str>) -> Self {
        Self {
            fields,
            records: Vec::new(),
            prj,
        }
    }

    fn with_record(mut self, shape: Shape, values: Vec<&'static str>) -> Self {
        self.records.push((shape, values));
        self
    }

    fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let shp_path = dir.join(format!("{name}.shp"));
        let shape_type = self
            .records
            .iter()
            .map(|(shape, _)| shape.shape_type())
            .find(|t| *t != 0)
            .unwrap_or(0);

        let mut shp = Vec::new();
        let mut shx = Vec::new();
        for (i, (shape, _)) in self.records.iter().enumerate() {
            let content = shape.content();
            let offset = 100 + shp.len();
            shx.extend_from_slice(&count(offset / 2).to_be_bytes());
            shx.extend_from_slice(&count(content.len() / 2).to_be_bytes());
            shp.extend_from_slice(&count(i + 1).to_be_bytes());
            shp.extend_from_slice(&count(content.len() / 2).to_be_bytes());
            shp.extend_from_slice(&content);
        }
        fs::write(&shp_path, [file_header(shape_type, shp.len()), shp].concat()).unwrap();
        fs::write(
            shp_path.with_extension("shx"),
            [file_header(shape_type, shx.len()), shx].concat(),
        )
        .unwrap();
        fs::write(shp_path.with_extension("dbf"), self.dbf()).unwrap();
        if let Some(prj) = self.prj {
            fs::write(shp_path.with_extension("prj"), prj).unwrap();
        }
        shp_path
    }

    fn dbf(&self) -> Vec<u8> {
        let header_len = 32 + 32 * self.fields.len() + 1;
        let record_len = 1 + self.fields.iter().map(|f| usize::from(f.len)).sum::<usize>();
        let mut dbf = vec![3, 124, 1, 1];
        dbf.extend_from_slice(&u32::try_from(self.records.len()).unwrap().to_le_bytes());
        dbf.extend_from_slice(&u16::try_from(header_len).unwrap().to_le_bytes());
        dbf.extend_from_slice(&u16::try_from(record_len).unwrap().to_le_bytes());
        dbf.resize(32, 0);
        for field in &self.fields {
            let mut descriptor = [0; 32];
            descriptor[..field.name.len()].copy_from_slice(field.name.as_bytes());
            descriptor[11] = field.kind;
            descriptor[16] = field.len;
            descriptor[17] = field.decimals;
            dbf.extend_from_slice(&descriptor);
        }
        dbf.push(0x0D);
        for (_, values) in &self.records {
            dbf.push(b' ');
            for (field, value) in self.fields.iter().zip(values) {
                let len = usize::from(field.len);
                let value = if field.kind == b'C' {
                    format!("{value:<len$}")
                } else {
                    format!("{value:>len$}")
                };
                assert_eq!(value.len(), len, "{value} does not fit in {}", field.name);
                dbf.extend_from_slice(value.as_bytes());
            }
        }
        dbf.push(0x1A);
        dbf
    }
}

fn file_header(shape_type: i32, content_len: usize) -> Vec<u8> {
    let mut header = 9994_i32.to_be_bytes().to_vec();
    header.resize(24, 0);
    header.extend_from_slice(&count((100 + content_len) / 2).to_be_bytes());
    header.extend_from_slice(&1000_i32.to_le_bytes());
    header.extend_from_slice(&shape_type.to_le_bytes());
    header.resize(100, 0);
    header
}

fn named_point(prj: Option<&'static str>, name: &'static str, x: f64, y: f64) -> TestShapefile {
    TestShapefile::new(vec![Field::new("NAME", b'C', 10, 0)], prj)
        .with_record(Shape::Point(x, y), vec![name])
}

fn node(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

fn object<'a>(
    graph: &'a Graph,
    subject: &'a NamedNode,
    predicate: NamedNodeRef<'a>,
) -> Option<TermRef<'a>> {
    graph.object_for_subject_predicate(subject, predicate)
}

fn float_object(graph: &Graph, subject: &NamedNode, predicate: NamedNodeRef<'_>) -> f64 {
    let Some(TermRef::Literal(literal)) = object(graph, subject, predicate) else {
        panic!("no literal for {predicate}");
    };
    assert_eq!(literal.datatype(), xsd::DOUBLE);
    literal.value().parse().unwrap()
}

#[test]
fn single_point() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    let graph = Converter::new().convert_path(&path)?.graph;

    let data = "http://www.example.org/shape2geosparql/places/data/";
    let schema = "http://www.example.org/shape2geosparql/places/ontology/";
    let feature = node(&format!("{data}0"));
    let geometry = node(&format!("{data}0_geom"));
    let name = node(&format!("{schema}name"));
    let a = Literal::new_simple_literal("A");
    let long = Literal::from(10.);
    let lat = Literal::from(20.);
    let wkt = Literal::new_typed_literal("POINT (10 20)", geo::WKT_LITERAL);
    let expected = [
        TripleRef::new(&feature, rdf::TYPE, sf::FEATURE),
        TripleRef::new(&feature, &name, &a),
        TripleRef::new(&feature, geo::HAS_GEOMETRY, &geometry),
        TripleRef::new(&geometry, rdf::TYPE, sf::GEOMETRY),
        TripleRef::new(&geometry, rdf::TYPE, sf::POINT),
        TripleRef::new(&geometry, w3geo::LONG, &long),
        TripleRef::new(&geometry, w3geo::LAT, &lat),
        TripleRef::new(&geometry, geo::AS_WKT, &wkt),
    ];
    for triple in expected {
        assert!(graph.contains(triple), "{triple} is missing");
    }
    // The GeoJSON literal is the only other triple
    assert_eq!(graph.len(), expected.len() + 1);
    let Some(TermRef::Literal(geojson)) = object(&graph, &geometry, s2g::AS_GEO_JSON) else {
        panic!("no GeoJSON literal");
    };
    assert_eq!(geojson.datatype(), s2g::GEO_JSON_LITERAL);
    assert_eq!(
        geojson.value().parse::<geojson::GeoJson>()?,
        geojson::GeoJson::Geometry(geojson::Geometry::new(geojson::Value::Point(vec![
            10., 20.
        ])))
    );
    Ok(())
}

#[test]
fn serialization_is_deterministic() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = TestShapefile::new(
        vec![
            Field::new("NAME", b'C', 10, 0),
            Field::new("POP", b'N', 9, 0),
        ],
        Some(WGS84_PRJ),
    )
    .with_record(Shape::Point(12.5, 41.9), vec!["Rome", "2873000"])
    .with_record(Shape::Point(9.19, 45.46), vec!["Milan", "1352000"])
    .with_record(Shape::Point(14.25, 40.83), vec!["Naples", "959000"])
    .write(dir.path(), "cities");
    let converter = Converter::new();
    let namespaces = converter.namespaces("cities")?;
    for format in [RdfFormat::NTriples, RdfFormat::Turtle, RdfFormat::RdfXml] {
        let first = serialize_graph(
            &converter.convert_path(&path)?.graph,
            format,
            &namespaces,
            Vec::new(),
        )?;
        let second = serialize_graph(
            &converter.convert_path(&path)?.graph,
            format,
            &namespaces,
            Vec::new(),
        )?;
        assert_eq!(first, second, "{format} output changed");
    }
    Ok(())
}

#[test]
fn ntriples_output() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    let output = String::from_utf8(serialize_graph(
        &graph,
        RdfFormat::NTriples,
        &converter.namespaces("places")?,
        Vec::new(),
    )?)?;
    assert_eq!(output.lines().count(), 9);
    assert!(output.contains(
        "<http://example.com/d/0_geom> <http://www.opengis.net/ont/geosparql#asWKT> \"POINT (10 20)\"^^<http://www.opengis.net/ont/geosparql#wktLiteral> .\n"
    ));
    assert!(output.contains(
        "<http://example.com/d/0> <http://www.example.org/shape2geosparql/places/ontology/name> \"A\" .\n"
    ));
    Ok(())
}

#[test]
fn turtle_prefixes() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    let conversion = Converter::new().convert_path(&path)?;
    assert_eq!(
        conversion.namespaces.data(),
        "http://www.example.org/shape2geosparql/places/data/"
    );
    let output = String::from_utf8(conversion.serialize(RdfFormat::Turtle, Vec::new())?)?;
    assert!(output.contains("@prefix geo: <http://www.opengis.net/ont/geosparql#> ."));
    assert!(output.contains("@prefix data: <http://www.example.org/shape2geosparql/places/data/> ."));
    assert!(output.contains("sf:Point"));
    Ok(())
}

#[test]
fn namespaces_follow_the_dataset_name() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "rivers");
    let conversion = Converter::new()
        .with_schema_namespace("http://example.com/s#")?
        .convert_path(&path)?;
    assert_eq!(
        conversion.namespaces.data(),
        "http://www.example.org/shape2geosparql/rivers/data/"
    );
    assert_eq!(conversion.namespaces.schema(), "http://example.com/s#");
    assert!(conversion.graph.contains(TripleRef::new(
        &node("http://www.example.org/shape2geosparql/rivers/data/0"),
        &node("http://example.com/s#name"),
        &Literal::new_simple_literal("A")
    )));
    Ok(())
}

#[test]
fn missing_index_file() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    fs::remove_file(path.with_extension("shx"))?;
    let error = Converter::new().convert_path(&path).unwrap_err();
    assert!(
        matches!(&error, ConversionError::MissingFile { extension: "shx", .. }),
        "{error}"
    );
    Ok(())
}

#[test]
fn missing_prj_file() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(None, "A", 10., 20.).write(dir.path(), "places");
    assert!(matches!(
        Converter::new().convert_path(&path),
        Err(ConversionError::MissingFile {
            extension: "prj",
            ..
        })
    ));
    assert!(matches!(
        Converter::new().without_prj().convert_path(&path),
        Err(ConversionError::MissingSpatialReference { index: 0 })
    ));
    let graph = Converter::new()
        .without_prj()
        .with_source_spatial_reference(SpatialReference::WGS84)
        .convert_path(&path)?.graph;
    assert_eq!(graph.len(), 9);
    Ok(())
}

#[test]
fn web_mercator_is_reprojected() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WEB_MERCATOR_PRJ), "Rome", 1_391_493.63, 5_146_011.68)
        .write(dir.path(), "places");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    let geometry = node("http://example.com/d/0_geom");
    assert!((float_object(&graph, &geometry, w3geo::LONG) - 12.5).abs() < 1e-4);
    assert!((float_object(&graph, &geometry, w3geo::LAT) - 41.9).abs() < 1e-4);
    let Some(TermRef::Literal(wkt)) = object(&graph, &geometry, geo::AS_WKT) else {
        panic!("no WKT literal");
    };
    let parsed = wkt::Wkt::<f64>::from_str(wkt.value())?;
    let parsed: geo_types::Geometry<f64> = parsed.try_into()?;
    let geo_types::Geometry::Point(point) = parsed else {
        panic!("{} is not a point", wkt.value());
    };
    assert!((point.x() - 12.5).abs() < 1e-4 && (point.y() - 41.9).abs() < 1e-4);
    Ok(())
}

#[test]
fn national_grid_is_reprojected() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    // Colosseum, Rome
    let path = named_point(Some(MONTE_MARIO_PRJ), "A", 1_789_745., 4_643_567.)
        .write(dir.path(), "places");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    let geometry = node("http://example.com/d/0_geom");
    let long = float_object(&graph, &geometry, w3geo::LONG);
    let lat = float_object(&graph, &geometry, w3geo::LAT);
    assert!((long - 12.4922).abs() < 5e-3, "{long}");
    assert!((lat - 41.8902).abs() < 5e-3, "{lat}");
    Ok(())
}

#[test]
fn prj_without_authority_is_reprojected() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(NAD83_PRJ), "A", -77.0365, 38.8977).write(dir.path(), "places");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    let geometry = node("http://example.com/d/0_geom");
    assert!((float_object(&graph, &geometry, w3geo::LONG) + 77.0365).abs() < 1e-6);
    assert!((float_object(&graph, &geometry, w3geo::LAT) - 38.8977).abs() < 1e-6);
    Ok(())
}

#[test]
fn unsupported_reference_system() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(LOCAL_GRID_PRJ), "A", 1_500_000., 5_000_000.)
        .write(dir.path(), "places");
    let error = Converter::new().convert_path(&path).unwrap_err();
    assert!(
        matches!(&error, ConversionError::UnsupportedTransform { from, .. } if from.epsg().is_none()),
        "{error}"
    );
    Ok(())
}

#[test]
fn code_page_file() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "XXXXXX", 37.62, 55.75).write(dir.path(), "places");
    // "Москва" in Windows-1251
    let dbf_path = path.with_extension("dbf");
    let mut dbf = fs::read(&dbf_path)?;
    let start = dbf
        .windows(6)
        .position(|w| w == b"XXXXXX")
        .ok_or("no placeholder")?;
    dbf[start..start + 6].copy_from_slice(b"\xCC\xEE\xF1\xEA\xE2\xE0");
    fs::write(&dbf_path, &dbf)?;
    fs::write(path.with_extension("cpg"), "1251")?;

    let graph = Converter::new().convert_path(&path)?.graph;
    assert!(graph.contains(TripleRef::new(
        &node("http://www.example.org/shape2geosparql/places/data/0"),
        &node("http://www.example.org/shape2geosparql/places/ontology/name"),
        &Literal::new_simple_literal("Москва")
    )));
    Ok(())
}

#[test]
fn polygon_with_hole() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let shell = vec![(0., 0.), (0., 10.), (10., 10.), (10., 0.), (0., 0.)];
    let hole = vec![(2., 2.), (4., 2.), (4., 4.), (2., 4.), (2., 2.)];
    let path = TestShapefile::new(vec![Field::new("ID", b'N', 4, 0)], Some(WGS84_PRJ))
        .with_record(Shape::Polygon(vec![shell, hole]), vec!["1"])
        .write(dir.path(), "parcels");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    let feature = node("http://example.com/d/0");
    let geometry = node("http://example.com/d/0_geom");
    assert!(graph.contains(TripleRef::new(&geometry, rdf::TYPE, sf::POLYGON)));
    assert!(graph.contains(TripleRef::new(
        &geometry,
        geo::AS_WKT,
        &Literal::new_typed_literal(
            "POLYGON ((0 0,0 10,10 10,10 0,0 0),(2 2,4 2,4 4,2 4,2 2))",
            geo::WKT_LITERAL
        )
    )));
    // Only points get coordinates
    assert!(object(&graph, &geometry, w3geo::LONG).is_none());
    assert!(graph.contains(TripleRef::new(
        &feature,
        &node("http://www.example.org/shape2geosparql/parcels/ontology/id"),
        &Literal::from(1_i64)
    )));
    Ok(())
}

#[test]
fn multi_part_geometries() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = TestShapefile::new(Vec::new(), Some(WGS84_PRJ))
        .with_record(
            Shape::PolyLine(vec![vec![(0., 0.), (1., 1.)], vec![(2., 2.), (3., 3.)]]),
            Vec::new(),
        )
        .with_record(Shape::PolyLine(vec![vec![(0., 0.), (1., 1.)]]), Vec::new())
        .write(dir.path(), "roads");
    let converter = Converter::new().with_data_namespace("http://example.com/d/")?;
    let graph = converter.convert_path(&path)?.graph;
    assert!(graph.contains(TripleRef::new(
        &node("http://example.com/d/0_geom"),
        rdf::TYPE,
        sf::MULTI_LINE_STRING
    )));
    assert!(graph.contains(TripleRef::new(
        &node("http://example.com/d/1_geom"),
        rdf::TYPE,
        sf::LINE_STRING
    )));

    let path = TestShapefile::new(Vec::new(), Some(WGS84_PRJ))
        .with_record(Shape::MultiPoint(vec![(1., 2.), (3., 4.)]), Vec::new())
        .write(dir.path(), "stops");
    let graph = converter.convert_path(&path)?.graph;
    assert!(graph.contains(TripleRef::new(
        &node("http://example.com/d/0_geom"),
        geo::AS_WKT,
        &Literal::new_typed_literal("MULTIPOINT (1 2,3 4)", geo::WKT_LITERAL)
    )));
    Ok(())
}

#[test]
fn attribute_types() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = TestShapefile::new(
        vec![
            Field::new("Label", b'C', 8, 0),
            Field::new("Count", b'N', 6, 0),
            Field::new("Ratio", b'N', 8, 3),
            Field::new("Open", b'L', 1, 0),
            Field::new("Since", b'D', 8, 0),
            Field::new("Note", b'C', 4, 0),
        ],
        Some(WGS84_PRJ),
    )
    .with_record(
        Shape::Point(1., 2.),
        vec!["x", "-12", "0.250", "T", "20190301", ""],
    )
    .write(dir.path(), "shops");
    let converter = Converter::new().with_schema_namespace("http://example.com/s#")?;
    let graph = converter.convert_path(&path)?.graph;
    let feature = node("http://www.example.org/shape2geosparql/shops/data/0");
    let expected = [
        ("label", Literal::new_simple_literal("x")),
        ("count", Literal::from(-12_i64)),
        ("ratio", Literal::from(0.25)),
        ("open", Literal::from(true)),
        ("since", Literal::new_typed_literal("2019-03-01", xsd::DATE)),
        ("note", Literal::new_simple_literal("")),
    ];
    for (name, value) in expected {
        let predicate = node(&format!("http://example.com/s#{name}"));
        assert!(
            graph.contains(TripleRef::new(&feature, &predicate, &value)),
            "{predicate} {value} is missing"
        );
    }
    Ok(())
}

#[test]
fn gml_and_options() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    let graph = Converter::new()
        .with_data_namespace("http://example.com/d/")?
        .with_options(EncodingOptions {
            include_wgs84_point: false,
            include_wkt: false,
            include_gml: true,
            include_geojson: false,
        })
        .convert_path(&path)?.graph;
    let geometry = node("http://example.com/d/0_geom");
    assert_eq!(graph.len(), 6);
    assert!(graph.contains(TripleRef::new(
        &geometry,
        geo::AS_GML,
        &Literal::new_typed_literal(
            "<gml:Point srsName=\"EPSG:4326\"><gml:coordinates>10,20</gml:coordinates></gml:Point>",
            geo::GML_LITERAL
        )
    )));
    Ok(())
}

#[test]
fn null_shape_fails() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.)
        .with_record(Shape::Null, vec!["B"])
        .write(dir.path(), "places");
    assert!(matches!(
        Converter::new().convert_path(&path),
        Err(ConversionError::MissingGeometry { index: 1 })
    ));
    Ok(())
}

#[test]
fn record_count_mismatch() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = named_point(Some(WGS84_PRJ), "A", 10., 20.).write(dir.path(), "places");
    let other = named_point(Some(WGS84_PRJ), "A", 10., 20.)
        .with_record(Shape::Point(1., 1.), vec!["B"])
        .write(dir.path(), "other");
    fs::copy(other.with_extension("dbf"), path.with_extension("dbf"))?;
    let error = Converter::new().convert_path(&path).unwrap_err();
    assert!(matches!(error, ConversionError::DatasetOpen(_)), "{error}");

    // Without index, the mismatch is found while reading
    fs::remove_file(path.with_extension("shx"))?;
    let dataset = shape2geosparql::ShapefileDataset::open(&path)?;
    let results = dataset.into_features().collect::<Vec<_>>();
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Ok(_)));
    assert!(matches!(results[1], Err(_)));
    Ok(())
}

#[test]
fn invalid_field_name() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = TestShapefile::new(vec![Field::new("A B", b'C', 4, 0)], Some(WGS84_PRJ))
        .with_record(Shape::Point(1., 2.), vec!["x"])
        .write(dir.path(), "places");
    assert!(matches!(
        Converter::new().convert_path(&path),
        Err(ConversionError::InvalidFieldName { field, .. }) if field == "A B"
    ));
    Ok(())
}

struct CurvedDataset(SpatialReference);

impl VectorDataset for CurvedDataset {
    type Features = std::vec::IntoIter<Result<Feature, DatasetError>>;

    fn name(&self) -> &str {
        "curves"
    }

    fn feature_count(&self) -> u64 {
        1
    }

    fn spatial_reference(&self) -> Option<&SpatialReference> {
        Some(&self.0)
    }

    fn into_features(self) -> Self::Features {
        let geometry = Geometry::new(point!(x: 0., y: 0.), None).with_native_type("CircularString");
        vec![Ok(Feature {
            index: 0,
            fields: Vec::new(),
            geometry: Some(geometry),
        })]
        .into_iter()
    }
}

#[test]
fn unknown_geometry_type() {
    let error = Converter::new()
        .convert(CurvedDataset(SpatialReference::WGS84))
        .unwrap_err();
    assert!(
        matches!(&error, ConversionError::UnknownGeometryType(name) if name == "CircularString"),
        "{error}"
    );
}
