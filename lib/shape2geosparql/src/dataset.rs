use crate::crs::SpatialReference;
use crate::error::{ConversionError, DatasetError};
use crate::feature::Feature;
use std::path::Path;

/// A vector dataset: one feature set sharing a coordinate reference system.
///
/// The features are consumed once, in the dataset order.
pub trait VectorDataset {
    /// The iterator over the dataset features.
    type Features: Iterator<Item = Result<Feature, DatasetError>>;

    /// The dataset base name, used to derive the default namespaces.
    fn name(&self) -> &str;

    /// The number of features, as advertised by the dataset header.
    fn feature_count(&self) -> u64;

    /// The reference system of the geometries, if the dataset declares one.
    fn spatial_reference(&self) -> Option<&SpatialReference>;

    /// Consumes the dataset into its features.
    fn into_features(self) -> Self::Features;
}

/// Checks that the Shapefile at `path` and its companion files exist.
///
/// The `.shx` and `.dbf` files are always required, the `.prj` file only if `require_prj` is set.
///
/// ```no_run
/// use shape2geosparql::check_files;
///
/// check_files("roads.shp".as_ref(), true)?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn check_files(path: &Path, require_prj: bool) -> Result<(), ConversionError> {
    if !path.exists() {
        return Err(ConversionError::MissingFile {
            extension: "shp",
            path: path.into(),
        });
    }
    let mut companions = vec!["shx", "dbf"];
    if require_prj {
        companions.push("prj");
    }
    for extension in companions {
        let companion = path.with_extension(extension);
        if !companion.exists() {
            return Err(ConversionError::MissingFile {
                extension,
                path: companion,
            });
        }
    }
    Ok(())
}
