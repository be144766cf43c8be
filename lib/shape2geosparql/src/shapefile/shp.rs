//! The `.shp` geometry file and its `.shx` index.

use crate::error::DatasetError;
use geo::{Contains, Winding};
use geo_types::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use std::io::Read;
use std::path::{Path, PathBuf};

const FILE_CODE: i32 = 9994;
const HEADER_LEN: u64 = 100;
const RECORD_HEADER_LEN: u64 = 8;
const INDEX_RECORD_LEN: u64 = 8;
const BOUNDING_BOX_LEN: usize = 32;

// Shape types
const NULL_SHAPE: i32 = 0;
const POINT: i32 = 1;
const POLYLINE: i32 = 3;
const POLYGON: i32 = 5;
const MULTIPOINT: i32 = 8;
const POINT_Z: i32 = 11;
const POLYLINE_Z: i32 = 13;
const POLYGON_Z: i32 = 15;
const MULTIPOINT_Z: i32 = 18;
const POINT_M: i32 = 21;
const POLYLINE_M: i32 = 23;
const POLYGON_M: i32 = 25;
const MULTIPOINT_M: i32 = 28;
const MULTIPATCH: i32 = 31;

/// Reads the records of a `.shp` file one by one.
pub(super) struct ShpReader<R> {
    reader: R,
    path: PathBuf,
    position: u64,
    file_len: u64,
}

impl<R: Read> ShpReader<R> {
    pub fn new(mut reader: R, path: PathBuf) -> Result<Self, DatasetError> {
        let mut header = [0; HEADER_LEN as usize];
        reader
            .read_exact(&mut header)
            .map_err(|e| DatasetError::io(&path, e))?;
        let file_len = read_file_header(&header).map_err(|e| {
            DatasetError::msg(format!("{}: {e}", path.display()))
        })?;
        Ok(Self {
            reader,
            path,
            position: HEADER_LEN,
            file_len,
        })
    }

    /// If the file has records left according to its header.
    pub fn has_remaining(&self) -> bool {
        self.position < self.file_len
    }

    /// Reads the next record: `Ok(None)` at the end of the file, `Ok(Some(None))` for a null shape.
    pub fn next_shape(&mut self) -> Result<Option<Option<Geometry<f64>>>, DatasetError> {
        if !self.has_remaining() {
            return Ok(None);
        }
        let mut header = [0; RECORD_HEADER_LEN as usize];
        self.reader
            .read_exact(&mut header)
            .map_err(|e| DatasetError::io(&self.path, e))?;
        let [n0, n1, n2, n3, l0, l1, l2, l3] = header;
        let number = i32::from_be_bytes([n0, n1, n2, n3]);
        let content_len = u64::try_from(i32::from_be_bytes([l0, l1, l2, l3]))
            .map_err(|_| self.error(format!("record {number} has a negative length")))?
            * 2;
        if self.position + RECORD_HEADER_LEN + content_len > self.file_len {
            return Err(self.error(format!("record {number} goes past the end of the file")));
        }
        let mut content = Vec::new();
        (&mut self.reader)
            .take(content_len)
            .read_to_end(&mut content)
            .map_err(|e| DatasetError::io(&self.path, e))?;
        if content.len() as u64 != content_len {
            return Err(self.error(format!("record {number} is truncated")));
        }
        self.position += RECORD_HEADER_LEN + content_len;
        parse_shape(&content)
            .map(Some)
            .map_err(|e| self.error(format!("record {number}: {e}")))
    }

    fn error(&self, message: String) -> DatasetError {
        DatasetError::msg(format!("{}: {message}", self.path.display()))
    }
}

/// The number of records listed by a `.shx` index.
pub(super) fn read_index_len(mut reader: impl Read, path: &Path) -> Result<u64, DatasetError> {
    let mut header = [0; HEADER_LEN as usize];
    reader
        .read_exact(&mut header)
        .map_err(|e| DatasetError::io(path, e))?;
    let file_len = read_file_header(&header)
        .map_err(|e| DatasetError::msg(format!("{}: {e}", path.display())))?;
    Ok(file_len.saturating_sub(HEADER_LEN) / INDEX_RECORD_LEN)
}

/// Validates the common header of `.shp` and `.shx` files and returns the file length in bytes.
fn read_file_header(header: &[u8; HEADER_LEN as usize]) -> Result<u64, String> {
    let mut cursor = ByteCursor::new(header);
    let file_code = cursor.i32_be()?;
    if file_code != FILE_CODE {
        return Err(format!("invalid file code {file_code}, this is not a Shapefile"));
    }
    cursor.skip(20)?;
    let file_len = u64::try_from(cursor.i32_be()?)
        .map_err(|_| "negative file length".to_owned())?
        * 2;
    let version = cursor.i32_le()?;
    if version != 1000 {
        return Err(format!("unsupported Shapefile version {version}"));
    }
    Ok(file_len)
}

fn parse_shape(content: &[u8]) -> Result<Option<Geometry<f64>>, String> {
    let mut cursor = ByteCursor::new(content);
    Ok(Some(match cursor.i32_le()? {
        NULL_SHAPE => return Ok(None),
        POINT | POINT_Z | POINT_M => Point(cursor.coord()?).into(),
        MULTIPOINT | MULTIPOINT_Z | MULTIPOINT_M => {
            cursor.skip(BOUNDING_BOX_LEN)?;
            let count = cursor.count()?;
            let points = (0..count)
                .map(|_| cursor.coord().map(Point))
                .collect::<Result<Vec<_>, _>>()?;
            MultiPoint::new(points).into()
        }
        POLYLINE | POLYLINE_Z | POLYLINE_M => {
            let mut lines = cursor.parts()?;
            if lines.len() == 1 {
                lines.swap_remove(0).into()
            } else {
                MultiLineString::new(lines).into()
            }
        }
        POLYGON | POLYGON_Z | POLYGON_M => {
            let mut polygons = assemble_polygons(cursor.parts()?);
            if polygons.len() == 1 {
                polygons.swap_remove(0).into()
            } else {
                MultiPolygon::new(polygons).into()
            }
        }
        MULTIPATCH => return Err("MultiPatch shapes are not supported".into()),
        shape_type => return Err(format!("unknown shape type {shape_type}")),
    }))
}

/// Groups polygon rings: clockwise rings are shells, the other ones are holes of the shell
/// containing them.
///
/// A hole outside of every shell becomes a polygon of its own.
pub(super) fn assemble_polygons(rings: Vec<LineString<f64>>) -> Vec<Polygon<f64>> {
    let (shells, holes): (Vec<_>, Vec<_>) = rings.into_iter().partition(|ring| ring.is_cw());
    let mut polygons = shells
        .into_iter()
        .map(|shell| (Polygon::new(shell, Vec::new()), Vec::new()))
        .collect::<Vec<_>>();
    let mut orphans = Vec::new();
    for hole in holes {
        match polygons
            .iter_mut()
            .find(|(shell, _)| shell.contains(&hole))
        {
            Some((_, interiors)) => interiors.push(hole),
            None => orphans.push(Polygon::new(hole, Vec::new())),
        }
    }
    polygons
        .into_iter()
        .map(|(shell, interiors)| Polygon::new(shell.into_inner().0, interiors))
        .chain(orphans)
        .collect()
}

/// Little helper to read a shape record.
struct ByteCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], String> {
        let (head, tail) = self
            .bytes
            .split_first_chunk::<N>()
            .ok_or_else(|| "unexpected end of record".to_owned())?;
        self.bytes = tail;
        Ok(*head)
    }

    fn skip(&mut self, len: usize) -> Result<(), String> {
        self.bytes = self
            .bytes
            .get(len..)
            .ok_or_else(|| "unexpected end of record".to_owned())?;
        Ok(())
    }

    fn i32_be(&mut self) -> Result<i32, String> {
        self.take().map(i32::from_be_bytes)
    }

    fn i32_le(&mut self) -> Result<i32, String> {
        self.take().map(i32::from_le_bytes)
    }

    fn f64_le(&mut self) -> Result<f64, String> {
        self.take().map(f64::from_le_bytes)
    }

    fn count(&mut self) -> Result<usize, String> {
        let count = self.i32_le()?;
        usize::try_from(count).map_err(|_| format!("invalid count {count}"))
    }

    fn coord(&mut self) -> Result<Coord<f64>, String> {
        Ok(Coord {
            x: self.f64_le()?,
            y: self.f64_le()?,
        })
    }

    /// The parts of a PolyLine or Polygon record, Z and M values are ignored.
    fn parts(&mut self) -> Result<Vec<LineString<f64>>, String> {
        self.skip(BOUNDING_BOX_LEN)?;
        let part_count = self.count()?;
        let point_count = self.count()?;
        let starts = (0..part_count)
            .map(|_| self.count())
            .collect::<Result<Vec<_>, _>>()?;
        let coords = (0..point_count)
            .map(|_| self.coord())
            .collect::<Result<Vec<_>, _>>()?;
        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(point_count);
                coords
                    .get(start..end)
                    .map(|part| LineString::new(part.to_vec()))
                    .ok_or_else(|| format!("invalid part bounds {start}..{end}"))
            })
            .collect()
    }
}
