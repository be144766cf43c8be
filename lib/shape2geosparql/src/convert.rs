use crate::builder::build;
use crate::classify::classify;
use crate::crs::SpatialReference;
use crate::dataset::{VectorDataset, check_files};
use crate::encode::{EncodingOptions, encode};
use crate::error::ConversionError;
use crate::namespace::{NamespaceRole, Namespaces, parse_namespace};
use crate::reproject::{BuiltinReprojector, Normalizer, Reprojector};
use crate::shapefile::ShapefileDataset;
use crate::vocab::{geo, s2g, sf, w3geo};
use oxrdf::{Graph, NamedNode};
use oxrdfio::{RdfFormat, RdfSerializer};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Converts vector datasets into GeoSPARQL graphs.
///
/// ```
/// use geo_types::point;
/// use shape2geosparql::{Converter, DatasetError, Feature, Geometry, SpatialReference, VectorDataset};
///
/// struct OnePoint(SpatialReference);
///
/// impl VectorDataset for OnePoint {
///     type Features = std::vec::IntoIter<Result<Feature, DatasetError>>;
///
///     fn name(&self) -> &str {
///         "places"
///     }
///
///     fn feature_count(&self) -> u64 {
///         1
///     }
///
///     fn spatial_reference(&self) -> Option<&SpatialReference> {
///         Some(&self.0)
///     }
///
///     fn into_features(self) -> Self::Features {
///         vec![Ok(Feature {
///             index: 0,
///             fields: vec![("name".into(), "A".into())],
///             geometry: Some(Geometry::new(point!(x: 10., y: 20.), Some(self.0))),
///         })]
///         .into_iter()
///     }
/// }
///
/// let conversion = Converter::new().convert(OnePoint(SpatialReference::WGS84))?;
/// assert_eq!(conversion.graph.len(), 9);
/// assert_eq!(
///     conversion.namespaces.data(),
///     "http://www.example.org/shape2geosparql/places/data/"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct Converter {
    data_namespace: Option<NamedNode>,
    schema_namespace: Option<NamedNode>,
    options: EncodingOptions,
    reprojector: Box<dyn Reprojector>,
    source_spatial_reference: Option<SpatialReference>,
    require_prj: bool,
}

impl Default for Converter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// A converter with the default namespaces, the default [`EncodingOptions`]
    /// and the [`BuiltinReprojector`].
    pub fn new() -> Self {
        Self {
            data_namespace: None,
            schema_namespace: None,
            options: EncodingOptions::default(),
            reprojector: Box::new(BuiltinReprojector),
            source_spatial_reference: None,
            require_prj: true,
        }
    }

    /// Sets the prefix of the feature and geometry IRIs.
    pub fn with_data_namespace(
        mut self,
        namespace: impl Into<String>,
    ) -> Result<Self, ConversionError> {
        self.data_namespace = Some(parse_namespace(namespace.into())?);
        Ok(self)
    }

    /// Sets the prefix of the attribute predicates.
    pub fn with_schema_namespace(
        mut self,
        namespace: impl Into<String>,
    ) -> Result<Self, ConversionError> {
        self.schema_namespace = Some(parse_namespace(namespace.into())?);
        Ok(self)
    }

    /// Selects the serializations added to each geometry.
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: EncodingOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the [`BuiltinReprojector`].
    #[inline]
    #[must_use]
    pub fn with_reprojector(mut self, reprojector: impl Reprojector + 'static) -> Self {
        self.reprojector = Box::new(reprojector);
        self
    }

    /// Uses `spatial_reference` for every geometry instead of the one declared by the dataset.
    #[inline]
    #[must_use]
    pub fn with_source_spatial_reference(mut self, spatial_reference: SpatialReference) -> Self {
        self.source_spatial_reference = Some(spatial_reference);
        self
    }

    /// Allows [`convert_path`](Self::convert_path) to read Shapefiles without `.prj` file.
    ///
    /// The geometries then need a reference system given by
    /// [`with_source_spatial_reference`](Self::with_source_spatial_reference).
    #[inline]
    #[must_use]
    pub fn without_prj(mut self) -> Self {
        self.require_prj = false;
        self
    }

    /// The namespaces used for a dataset named `basename`.
    pub fn namespaces(&self, basename: &str) -> Result<Namespaces, ConversionError> {
        Namespaces::resolve(
            self.data_namespace.as_ref().map(NamedNode::as_str),
            self.schema_namespace.as_ref().map(NamedNode::as_str),
            basename,
        )
    }

    /// Converts every feature of the dataset.
    ///
    /// The returned [`Conversion`] carries the namespaces resolved from the dataset name.
    /// The first error aborts the conversion.
    pub fn convert(&self, dataset: impl VectorDataset) -> Result<Conversion, ConversionError> {
        let namespaces = self.namespaces(dataset.name())?;
        let native_spatial_reference = self
            .source_spatial_reference
            .clone()
            .or_else(|| dataset.spatial_reference().cloned());
        info!(
            dataset = dataset.name(),
            features = dataset.feature_count(),
            data_namespace = namespaces.data(),
            "converting dataset"
        );
        let mut normalizer = Normalizer::new(self.reprojector.as_ref());
        let mut graph = Graph::new();
        let mut feature_count = 0_u64;
        for feature in dataset.into_features() {
            let mut feature = feature?;
            let index = feature.index;
            let mut geometry = feature
                .geometry
                .take()
                .ok_or(ConversionError::MissingGeometry { index })?;
            if let Some(spatial_reference) = &native_spatial_reference {
                if self.source_spatial_reference.is_some()
                    || geometry.spatial_reference().is_none()
                {
                    geometry = geometry.with_spatial_reference(spatial_reference.clone());
                }
            }
            let class = classify(&geometry.type_name())?;
            let geometry = normalizer.normalize(geometry, index)?;
            let literals = encode(&geometry, &self.options)?;
            let triples = build(&feature, &namespaces, class, &literals)?;
            debug!(index, class = %class, triples = triples.len(), "converted feature");
            graph.extend(triples);
            feature_count += 1;
        }
        info!(
            features = feature_count,
            triples = graph.len(),
            "conversion done"
        );
        Ok(Conversion { graph, namespaces })
    }

    /// Checks the companion files of the Shapefile at `path`, opens it and converts it.
    ///
    /// ```no_run
    /// use shape2geosparql::Converter;
    ///
    /// let conversion = Converter::new()
    ///     .with_data_namespace("http://example.com/roads/")?
    ///     .convert_path("roads.shp")?;
    /// assert!(!conversion.graph.is_empty());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn convert_path(&self, path: impl AsRef<Path>) -> Result<Conversion, ConversionError> {
        let path = path.as_ref();
        check_files(path, self.require_prj)?;
        self.convert(ShapefileDataset::open(path)?)
    }
}

/// The output of [`Converter::convert`].
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The triples of every feature.
    pub graph: Graph,
    /// The namespaces the feature, geometry and predicate IRIs are built from.
    pub namespaces: Namespaces,
}

impl Conversion {
    /// Writes the graph with [`serialize_graph`], declaring the namespaces of the conversion.
    pub fn serialize<W: Write>(&self, format: RdfFormat, writer: W) -> Result<W, ConversionError> {
        serialize_graph(&self.graph, format, &self.namespaces, writer)
    }
}

/// Writes a graph in the given format.
///
/// The triples are sorted so that the output only depends on the graph content.
/// Prefixes are declared for the data and schema namespaces and the vocabularies
/// if the format supports them.
///
/// ```
/// use oxrdf::{Graph, NamedNodeRef, TripleRef};
/// use oxrdf::vocab::rdf;
/// use oxrdfio::RdfFormat;
/// use shape2geosparql::vocab::sf;
/// use shape2geosparql::{Namespaces, serialize_graph};
///
/// let namespaces = Namespaces::new("http://example.com/data/", "http://example.com/schema/")?;
/// let mut graph = Graph::new();
/// graph.insert(TripleRef::new(
///     NamedNodeRef::new("http://example.com/data/0")?,
///     rdf::TYPE,
///     sf::FEATURE,
/// ));
/// assert_eq!(
///     serialize_graph(&graph, RdfFormat::NTriples, &namespaces, Vec::new())?,
///     b"<http://example.com/data/0> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.opengis.net/ont/sf#Feature> .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn serialize_graph<W: Write>(
    graph: &Graph,
    format: RdfFormat,
    namespaces: &Namespaces,
    writer: W,
) -> Result<W, ConversionError> {
    let prefixes = [
        (
            NamespaceRole::Data.prefix_name(),
            namespaces.get(NamespaceRole::Data),
        ),
        (
            NamespaceRole::Schema.prefix_name(),
            namespaces.get(NamespaceRole::Schema),
        ),
        ("geo", geo::NAMESPACE),
        ("sf", sf::NAMESPACE),
        ("w3geo", w3geo::NAMESPACE),
        ("s2g", s2g::NAMESPACE),
    ];
    let mut serializer = RdfSerializer::from_format(format);
    for (name, iri) in prefixes {
        serializer =
            serializer
                .with_prefix(name, iri)
                .map_err(|error| ConversionError::InvalidNamespace {
                    namespace: iri.into(),
                    error,
                })?;
    }
    let mut triples = graph.iter().collect::<Vec<_>>();
    triples.sort_by_cached_key(ToString::to_string);
    let mut serializer = serializer.for_writer(writer);
    for triple in triples {
        serializer.serialize_triple(triple)?;
    }
    Ok(serializer.finish()?)
}
