use geo_types::{Coord, Geometry, LineString, Polygon};
use std::fmt;

/// Displays a geometry as OGC Well-Known Text.
///
/// The layout is the one of OGR: a space between the tag and the coordinates,
/// no space after commas and the shortest representation of each number.
///
/// ```
/// use geo_types::{line_string, point};
/// use shape2geosparql::Wkt;
///
/// assert_eq!(Wkt(&point!(x: 10., y: 20.).into()).to_string(), "POINT (10 20)");
/// assert_eq!(
///     Wkt(&line_string![(x: 0., y: 0.), (x: 1.5, y: -1.)].into()).to_string(),
///     "LINESTRING (0 0,1.5 -1)"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Wkt<'a>(pub &'a Geometry<f64>);

impl fmt::Display for Wkt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_geometry(self.0, f)
    }
}

fn write_geometry(geometry: &Geometry<f64>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match geometry {
        Geometry::Point(point) => {
            f.write_str("POINT (")?;
            write_coord(point.0, f)?;
            f.write_str(")")
        }
        Geometry::Line(line) => {
            f.write_str("LINESTRING ")?;
            write_coords(&[line.start, line.end], f)
        }
        Geometry::LineString(line_string) => {
            f.write_str("LINESTRING ")?;
            write_line_string(line_string, f)
        }
        Geometry::Polygon(polygon) => {
            f.write_str("POLYGON ")?;
            write_polygon(polygon, f)
        }
        Geometry::Rect(rect) => {
            f.write_str("POLYGON ")?;
            write_polygon(&rect.to_polygon(), f)
        }
        Geometry::Triangle(triangle) => {
            let [a, b, c] = triangle.to_array();
            f.write_str("TRIANGLE (")?;
            write_coords(&[a, b, c, a], f)?;
            f.write_str(")")
        }
        Geometry::MultiPoint(multi_point) => {
            f.write_str("MULTIPOINT ")?;
            let coords = multi_point.iter().map(|p| p.0).collect::<Vec<_>>();
            write_coords(&coords, f)
        }
        Geometry::MultiLineString(multi_line_string) => {
            f.write_str("MULTILINESTRING ")?;
            write_list(&multi_line_string.0, f, write_line_string)
        }
        Geometry::MultiPolygon(multi_polygon) => {
            f.write_str("MULTIPOLYGON ")?;
            write_list(&multi_polygon.0, f, write_polygon)
        }
        Geometry::GeometryCollection(collection) => {
            f.write_str("GEOMETRYCOLLECTION ")?;
            write_list(&collection.0, f, write_geometry)
        }
    }
}

fn write_polygon(polygon: &Polygon<f64>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if polygon.exterior().0.is_empty() {
        return f.write_str("EMPTY");
    }
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .cloned()
        .collect::<Vec<_>>();
    write_list(&rings, f, write_line_string)
}

fn write_line_string(line_string: &LineString<f64>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_coords(&line_string.0, f)
}

fn write_list<T>(
    items: &[T],
    f: &mut fmt::Formatter<'_>,
    write_item: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write_item(item, f)?;
    }
    f.write_str(")")
}

fn write_coords(coords: &[Coord<f64>], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_list(coords, f, |coord, f| write_coord(*coord, f))
}

fn write_coord(coord: Coord<f64>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", coord.x, coord.y)
}
