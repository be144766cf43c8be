#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod builder;
mod classify;
mod convert;
mod crs;
mod dataset;
mod encode;
mod error;
mod feature;
mod namespace;
mod reproject;
mod shapefile;
pub mod vocab;

pub use crate::builder::build;
pub use crate::classify::{SimpleFeaturesClass, classify};
pub use crate::convert::{Conversion, Converter, serialize_graph};
pub use crate::crs::{SpatialReference, SpatialReferenceParseError};
pub use crate::dataset::{VectorDataset, check_files};
pub use crate::encode::{EncodingOptions, Wkt, encode, to_gml};
pub use crate::error::{ConversionError, DatasetError};
pub use crate::feature::{Feature, FieldValue, Geometry};
pub use crate::namespace::{NamespaceRole, Namespaces, default_namespace};
pub use crate::reproject::{
    BuiltinReprojector, CoordinateTransform, Normalizer, Reprojector, apply_transform,
};
pub use crate::shapefile::{ShapefileDataset, ShapefileFeatures};
