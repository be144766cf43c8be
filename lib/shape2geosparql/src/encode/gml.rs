use geo_types::{Coord, Geometry, LineString, Polygon};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io;

/// Serializes a geometry as a GML 2 fragment.
///
/// `srs_name` is written on the root element if set.
pub fn to_gml(geometry: &Geometry<f64>, srs_name: Option<&str>) -> io::Result<String> {
    let mut writer = GmlWriter {
        writer: Writer::new(Vec::new()),
    };
    writer.write_geometry(geometry, srs_name)?;
    String::from_utf8(writer.writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

struct GmlWriter {
    writer: Writer<Vec<u8>>,
}

impl GmlWriter {
    fn write_geometry(&mut self, geometry: &Geometry<f64>, srs_name: Option<&str>) -> io::Result<()> {
        match geometry {
            Geometry::Point(point) => self.write_leaf("gml:Point", srs_name, &[point.0]),
            Geometry::Line(line) => {
                self.write_leaf("gml:LineString", srs_name, &[line.start, line.end])
            }
            Geometry::LineString(line_string) => {
                self.write_leaf("gml:LineString", srs_name, &line_string.0)
            }
            Geometry::Polygon(polygon) => self.write_polygon(polygon, srs_name),
            Geometry::Rect(rect) => self.write_polygon(&rect.to_polygon(), srs_name),
            Geometry::Triangle(triangle) => self.write_polygon(&triangle.to_polygon(), srs_name),
            Geometry::MultiPoint(multi_point) => {
                self.start("gml:MultiPoint", srs_name)?;
                for point in multi_point {
                    self.start("gml:pointMember", None)?;
                    self.write_leaf("gml:Point", None, &[point.0])?;
                    self.end("gml:pointMember")?;
                }
                self.end("gml:MultiPoint")
            }
            Geometry::MultiLineString(multi_line_string) => {
                self.start("gml:MultiLineString", srs_name)?;
                for line_string in multi_line_string {
                    self.start("gml:lineStringMember", None)?;
                    self.write_leaf("gml:LineString", None, &line_string.0)?;
                    self.end("gml:lineStringMember")?;
                }
                self.end("gml:MultiLineString")
            }
            Geometry::MultiPolygon(multi_polygon) => {
                self.start("gml:MultiPolygon", srs_name)?;
                for polygon in multi_polygon {
                    self.start("gml:polygonMember", None)?;
                    self.write_polygon(polygon, None)?;
                    self.end("gml:polygonMember")?;
                }
                self.end("gml:MultiPolygon")
            }
            Geometry::GeometryCollection(collection) => {
                self.start("gml:MultiGeometry", srs_name)?;
                for member in collection {
                    self.start("gml:geometryMember", None)?;
                    self.write_geometry(member, None)?;
                    self.end("gml:geometryMember")?;
                }
                self.end("gml:MultiGeometry")
            }
        }
    }

    fn write_polygon(&mut self, polygon: &Polygon<f64>, srs_name: Option<&str>) -> io::Result<()> {
        self.start("gml:Polygon", srs_name)?;
        self.write_ring("gml:outerBoundaryIs", polygon.exterior())?;
        for interior in polygon.interiors() {
            self.write_ring("gml:innerBoundaryIs", interior)?;
        }
        self.end("gml:Polygon")
    }

    fn write_ring(&mut self, boundary: &str, ring: &LineString<f64>) -> io::Result<()> {
        self.start(boundary, None)?;
        self.write_leaf("gml:LinearRing", None, &ring.0)?;
        self.end(boundary)
    }

    fn write_leaf(
        &mut self,
        name: &str,
        srs_name: Option<&str>,
        coords: &[Coord<f64>],
    ) -> io::Result<()> {
        self.start(name, srs_name)?;
        self.start("gml:coordinates", None)?;
        let text = coords
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.write(Event::Text(BytesText::new(&text)))?;
        self.end("gml:coordinates")?;
        self.end(name)
    }

    fn start(&mut self, name: &str, srs_name: Option<&str>) -> io::Result<()> {
        let mut start = BytesStart::new(name);
        if let Some(srs_name) = srs_name {
            start.push_attribute(("srsName", srs_name));
        }
        self.write(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> io::Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn write(&mut self, event: Event<'_>) -> io::Result<()> {
        self.writer.write_event(event).map_err(io::Error::other)
    }
}
