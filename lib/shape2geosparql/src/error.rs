use crate::crs::SpatialReference;
use oxrdf::IriParseError;
use std::io;
use std::path::PathBuf;

/// An error raised while converting a dataset into a graph.
///
/// Every variant aborts the whole conversion: no partial graph is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A companion file of the dataset is missing.
    #[error("Missing .{extension} file: {} does not exist", path.display())]
    MissingFile {
        /// The extension of the missing companion file, without the leading dot.
        extension: &'static str,
        /// The path that was looked up.
        path: PathBuf,
    },
    /// The dataset could not be opened or decoded.
    #[error(transparent)]
    DatasetOpen(#[from] DatasetError),
    /// A feature does not have any geometry.
    #[error("The feature {index} has no geometry")]
    MissingGeometry {
        /// The index of the faulty feature.
        index: u64,
    },
    /// A geometry (or its dataset) has no coordinate reference system.
    #[error("The geometry of feature {index} has no spatial reference, reprojection to WGS84 is undefined")]
    MissingSpatialReference {
        /// The index of the faulty feature.
        index: u64,
    },
    /// The reprojection engine does not know how to go from `from` to `to`.
    #[error("No transformation is available from {from} to {to}")]
    UnsupportedTransform {
        /// The reference system of the input geometry.
        from: SpatialReference,
        /// The requested reference system.
        to: SpatialReference,
    },
    /// A coordinate could not be reprojected.
    #[error("The coordinate ({x}, {y}) could not be reprojected from {from}")]
    Reprojection {
        /// The reference system of the input geometry.
        from: SpatialReference,
        /// The X value of the faulty coordinate.
        x: f64,
        /// The Y value of the faulty coordinate.
        y: f64,
    },
    /// The geometry type name is not a known Simple Features type.
    #[error("Unknown geometry type '{0}'")]
    UnknownGeometryType(String),
    /// A namespace given by the caller is not a valid IRI.
    #[error("The namespace '{namespace}' is not a valid IRI: {error}")]
    InvalidNamespace {
        /// The invalid namespace.
        namespace: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
    /// A field name does not produce a valid predicate IRI.
    #[error("The field '{field}' does not give a valid predicate IRI: {error}")]
    InvalidFieldName {
        /// The field name, as found in the dataset.
        field: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
    /// The GML serialization of a geometry failed.
    #[error("Error while writing a GML literal: {0}")]
    Gml(#[source] io::Error),
    /// The serialization of the graph failed.
    #[error(transparent)]
    Serialization(#[from] io::Error),
}

/// An error raised by a dataset reader while opening or reading a dataset.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct DatasetError(#[from] DatasetErrorKind);

impl DatasetError {
    pub(crate) fn msg(msg: impl Into<String>) -> Self {
        Self(DatasetErrorKind::Msg(msg.into()))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self(DatasetErrorKind::Io {
            path: path.into(),
            error,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum DatasetErrorKind {
    #[error("Error while reading {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("{0}")]
    Msg(String),
}
