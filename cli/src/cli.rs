use clap::{Parser, ValueHint};
use shape2geosparql::SpatialReference;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "shape2geosparql")]
/// Converts an ESRI Shapefile into a GeoSPARQL RDF graph
pub struct Args {
    /// The .shp file to convert
    ///
    /// The .shx, .dbf and .prj files with the same base name must be next to it.
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// File to write the RDF output to
    ///
    /// If not present, the output is written to stdout.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// The RDF format of the output
    ///
    /// It can be an extension like "nt" or "ttl", a MIME type like "text/turtle" or a name like "turtle".
    /// If not present, it is guessed from the output file extension and defaults to N-Triples.
    #[arg(short, long)]
    pub format: Option<String>,
    /// Prefix of the feature and geometry IRIs
    ///
    /// Defaults to http://www.example.org/shape2geosparql/<basename>/data/
    #[arg(long, value_hint = ValueHint::Url)]
    pub data_namespace: Option<String>,
    /// Prefix of the attribute predicates
    ///
    /// Defaults to http://www.example.org/shape2geosparql/<basename>/ontology/
    #[arg(long, value_hint = ValueHint::Url)]
    pub schema_namespace: Option<String>,
    /// Do not add w3geo:long and w3geo:lat to points
    #[arg(long)]
    pub no_wgs84: bool,
    /// Do not add geo:asWKT literals
    #[arg(long)]
    pub no_wkt: bool,
    /// Add geo:asGML literals
    #[arg(long)]
    pub gml: bool,
    /// Do not add GeoJSON literals
    #[arg(long)]
    pub no_geojson: bool,
    /// Do not require a .prj file
    ///
    /// The reference system must then be given with --source-srs.
    #[arg(long)]
    pub ignore_prj: bool,
    /// Reference system of the input geometries, as EPSG:<code> or WKT
    ///
    /// It replaces the one declared in the .prj file.
    #[arg(long)]
    pub source_srs: Option<SpatialReference>,
}
