//! Coordinate reprojection.
//!
//! The [`Reprojector`] trait is the seam to the reprojection engine.
//! [`BuiltinReprojector`] relies on the PROJ.4 port of [`proj4rs`].
//! The [`Normalizer`] brings every geometry of a dataset to WGS 84 before it is encoded.

use crate::crs::{SpatialReference, is_geographic};
use crate::error::ConversionError;
use crate::feature::Geometry;
use geo::MapCoords;
use geo_types::Coord;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::debug;

/// Transformation of single coordinates between two reference systems.
pub trait CoordinateTransform {
    /// Transforms one coordinate, returns `None` if it is outside of the domain of the transform.
    fn transform(&self, coord: Coord<f64>) -> Option<Coord<f64>>;
}

/// Builds [`CoordinateTransform`]s between reference systems.
pub trait Reprojector {
    /// Builds the transform from `source` to `target`.
    ///
    /// Fails with [`ConversionError::UnsupportedTransform`] if no such transform exists.
    fn build_transform(
        &self,
        source: &SpatialReference,
        target: &SpatialReference,
    ) -> Result<Box<dyn CoordinateTransform>, ConversionError>;
}

/// Applies a transform to every coordinate of a geometry, keeping its topology.
pub fn apply_transform(
    transform: &dyn CoordinateTransform,
    geometry: Geometry,
    target: &SpatialReference,
) -> Result<Geometry, ConversionError> {
    let source = geometry
        .spatial_reference()
        .cloned()
        .unwrap_or_else(|| target.clone());
    let shape = geometry
        .shape()
        .try_map_coords(|coord| {
            transform
                .transform(coord)
                .filter(|c| c.x.is_finite() && c.y.is_finite())
                .ok_or(coord)
        })
        .map_err(|coord| ConversionError::Reprojection {
            from: source,
            x: coord.x,
            y: coord.y,
        })?;
    Ok(geometry.with_shape(shape, target.clone()))
}

/// Brings geometries to a target reference system, WGS 84 by default.
///
/// The transform is only built when a geometry is not already in the target system,
/// and it is reused while the following geometries share the same source system.
pub struct Normalizer<'a> {
    reprojector: &'a dyn Reprojector,
    target: SpatialReference,
    cached: Option<(SpatialReference, Box<dyn CoordinateTransform>)>,
}

impl<'a> Normalizer<'a> {
    /// Normalizes to WGS84 with the given engine.
    pub fn new(reprojector: &'a dyn Reprojector) -> Self {
        Self {
            reprojector,
            target: SpatialReference::WGS84,
            cached: None,
        }
    }

    /// Reprojects to `target` instead of WGS84.
    #[must_use]
    pub fn with_target(mut self, target: SpatialReference) -> Self {
        self.target = target;
        self.cached = None;
        self
    }

    /// Returns the geometry expressed in the target reference system.
    ///
    /// `index` is the feature index, used in error messages.
    pub fn normalize(
        &mut self,
        geometry: Geometry,
        index: u64,
    ) -> Result<Geometry, ConversionError> {
        let source = geometry
            .spatial_reference()
            .ok_or(ConversionError::MissingSpatialReference { index })?;
        if source.is_equivalent(&self.target) {
            return Ok(geometry);
        }
        let transform = match &mut self.cached {
            Some((cached_source, transform)) if cached_source == source => transform,
            cached => {
                debug!(from = %source, to = %self.target, "building coordinate transform");
                let transform = self.reprojector.build_transform(source, &self.target)?;
                &mut cached.insert((source.clone(), transform)).1
            }
        };
        apply_transform(transform.as_ref(), geometry, &self.target)
    }
}

/// Reprojection engine backed by [`proj4rs`].
///
/// Source and target reference systems are resolved with [`SpatialReference::proj4_definition`],
/// i.e. from their EPSG code or from their WKT definition.
/// Reference systems that can't be resolved fail with [`ConversionError::UnsupportedTransform`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinReprojector;

impl Reprojector for BuiltinReprojector {
    fn build_transform(
        &self,
        source: &SpatialReference,
        target: &SpatialReference,
    ) -> Result<Box<dyn CoordinateTransform>, ConversionError> {
        if source.is_equivalent(target) {
            return Ok(Box::new(Identity));
        }
        let unsupported = || ConversionError::UnsupportedTransform {
            from: source.clone(),
            to: target.clone(),
        };
        let source_definition = source.proj4_definition().ok_or_else(unsupported)?;
        let target_definition = target.proj4_definition().ok_or_else(unsupported)?;
        if source_definition == target_definition {
            return Ok(Box::new(Identity));
        }
        let projection = |definition: &str| {
            Proj::from_proj_string(definition).map_err(|error| {
                debug!(definition, ?error, "unsupported PROJ.4 definition");
                unsupported()
            })
        };
        Ok(Box::new(Proj4Transform {
            source: projection(&*source_definition)?,
            target: projection(&*target_definition)?,
            source_is_geographic: is_geographic(&source_definition),
            target_is_geographic: is_geographic(&target_definition),
        }))
    }
}

struct Identity;

impl CoordinateTransform for Identity {
    #[inline]
    fn transform(&self, coord: Coord<f64>) -> Option<Coord<f64>> {
        Some(coord)
    }
}

/// A [`proj4rs`] transform, with geographic coordinates in degrees on both sides.
struct Proj4Transform {
    source: Proj,
    target: Proj,
    source_is_geographic: bool,
    target_is_geographic: bool,
}

impl CoordinateTransform for Proj4Transform {
    fn transform(&self, coord: Coord<f64>) -> Option<Coord<f64>> {
        let mut point = if self.source_is_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.)
        } else {
            (coord.x, coord.y, 0.)
        };
        transform(&self.source, &self.target, &mut point).ok()?;
        let (x, y, _) = point;
        Some(if self.target_is_geographic {
            Coord {
                x: x.to_degrees(),
                y: y.to_degrees(),
            }
        } else {
            Coord { x, y }
        })
    }
}
