//! Reader for ESRI Shapefiles.
//!
//! A Shapefile is a set of files sharing the same base name:
//! * `.shp` with the geometries,
//! * `.shx` with the index of the geometry records,
//! * `.dbf` with the attribute table,
//! * `.prj` with the WKT definition of the coordinate reference system (optional),
//! * `.cpg` with the code page of the attribute table (optional).

mod dbf;
mod shp;

use self::dbf::{DbfReader, encoding_from_cpg};
use self::shp::{ShpReader, read_index_len};
use crate::crs::SpatialReference;
use crate::dataset::VectorDataset;
use crate::error::DatasetError;
use crate::feature::{Feature, Geometry};
use encoding_rs::Encoding;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// A Shapefile opened for reading.
///
/// Geometries are 2D, Z and M values are dropped.
/// Every geometry carries the reference system of the `.prj` file, if any.
///
/// ```no_run
/// use shape2geosparql::{ShapefileDataset, VectorDataset};
///
/// let dataset = ShapefileDataset::open("roads.shp")?;
/// println!("{} features", dataset.feature_count());
/// for feature in dataset.into_features() {
///     println!("{:?}", feature?.fields);
/// }
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct ShapefileDataset<R = BufReader<File>> {
    name: String,
    spatial_reference: Option<SpatialReference>,
    shp: ShpReader<R>,
    dbf: DbfReader<R>,
}

impl ShapefileDataset {
    /// Opens the Shapefile whose `.shp` file is at `path`.
    ///
    /// The `.dbf` file is required. The `.shx` file is only used to check the record count.
    /// The `.prj` and `.cpg` files are read if they exist. Without `.cpg` file the code page
    /// comes from the `.dbf` header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let shp_file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let dbf_path = path.with_extension("dbf");
        let dbf_file = File::open(&dbf_path).map_err(|e| DatasetError::io(&dbf_path, e))?;
        let prj_path = path.with_extension("prj");
        let spatial_reference = if prj_path.exists() {
            let wkt =
                fs::read_to_string(&prj_path).map_err(|e| DatasetError::io(&prj_path, e))?;
            Some(SpatialReference::from_wkt(wkt.trim()))
        } else {
            None
        };
        let cpg_path = path.with_extension("cpg");
        let encoding = if cpg_path.exists() {
            let label =
                fs::read_to_string(&cpg_path).map_err(|e| DatasetError::io(&cpg_path, e))?;
            let encoding = encoding_from_cpg(&label);
            if encoding.is_none() {
                warn!(
                    path = %cpg_path.display(),
                    code_page = label.trim(),
                    "unknown code page, using the .dbf header"
                );
            }
            encoding
        } else {
            None
        };
        let dataset = Self::from_readers(
            name,
            BufReader::new(shp_file),
            BufReader::new(dbf_file),
            spatial_reference,
            encoding,
        )?;

        let shx_path = path.with_extension("shx");
        if shx_path.exists() {
            let shx_file = File::open(&shx_path).map_err(|e| DatasetError::io(&shx_path, e))?;
            let indexed = read_index_len(BufReader::new(shx_file), &shx_path)?;
            if indexed != dataset.feature_count() {
                return Err(DatasetError::msg(format!(
                    "{} lists {indexed} shapes but {} has {} attribute records",
                    shx_path.display(),
                    dbf_path.display(),
                    dataset.feature_count()
                )));
            }
        }
        Ok(dataset)
    }
}

impl<R: Read> ShapefileDataset<R> {
    /// Reads a Shapefile from already opened `.shp` and `.dbf` streams.
    ///
    /// `encoding` is the code page of the `.dbf` text values, it is read from the `.dbf` header if `None`.
    pub fn from_readers(
        name: impl Into<String>,
        shp: R,
        dbf: R,
        spatial_reference: Option<SpatialReference>,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        let shp = ShpReader::new(shp, format!("{name}.shp").into())?;
        let dbf = DbfReader::new(dbf, format!("{name}.dbf").into(), encoding)?;
        debug!(
            dataset = %name,
            features = dbf.record_count(),
            fields = dbf.fields().len(),
            encoding = dbf.encoding().map_or("unknown", Encoding::name),
            has_spatial_reference = spatial_reference.is_some(),
            "opened Shapefile"
        );
        Ok(Self {
            name,
            spatial_reference,
            shp,
            dbf,
        })
    }
}

impl<R: Read> VectorDataset for ShapefileDataset<R> {
    type Features = ShapefileFeatures<R>;

    fn name(&self) -> &str {
        &self.name
    }

    fn feature_count(&self) -> u64 {
        self.dbf.record_count()
    }

    fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    fn into_features(self) -> ShapefileFeatures<R> {
        ShapefileFeatures {
            spatial_reference: self.spatial_reference,
            shp: self.shp,
            dbf: self.dbf,
            index: 0,
            done: false,
        }
    }
}

/// Iterator over the features of a [`ShapefileDataset`].
///
/// It stops after the first error.
pub struct ShapefileFeatures<R = BufReader<File>> {
    spatial_reference: Option<SpatialReference>,
    shp: ShpReader<R>,
    dbf: DbfReader<R>,
    index: u64,
    done: bool,
}

impl<R: Read> ShapefileFeatures<R> {
    fn read_next(&mut self) -> Result<Option<Feature>, DatasetError> {
        let Some(fields) = self.dbf.next_record()? else {
            if self.shp.has_remaining() {
                return Err(DatasetError::msg(format!(
                    "the geometry file has more shapes than the {} attribute records",
                    self.index
                )));
            }
            return Ok(None);
        };
        let shape = self.shp.next_shape()?.ok_or_else(|| {
            DatasetError::msg(format!(
                "the geometry file ends after {} shapes but there are more attribute records",
                self.index
            ))
        })?;
        let feature = Feature {
            index: self.index,
            fields,
            geometry: shape.map(|shape| Geometry::new(shape, self.spatial_reference.clone())),
        };
        self.index += 1;
        Ok(Some(feature))
    }
}

impl<R: Read> Iterator for ShapefileFeatures<R> {
    type Item = Result<Feature, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_next().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}
