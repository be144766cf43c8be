use crate::cli::Args;
use anyhow::{Context, bail};
use clap::Parser;
use oxrdfio::RdfFormat;
use shape2geosparql::{Converter, EncodingOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write, stderr, stdout};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(stderr)
        .init();

    let args = Args::parse();
    let format = if let Some(format) = &args.format {
        rdf_format_from_name(format)?
    } else if let Some(output) = &args.output {
        rdf_format_from_path(output)?
    } else {
        RdfFormat::NTriples
    };

    let mut converter = Converter::new().with_options(EncodingOptions {
        include_wgs84_point: !args.no_wgs84,
        include_wkt: !args.no_wkt,
        include_gml: args.gml,
        include_geojson: !args.no_geojson,
    });
    if let Some(namespace) = args.data_namespace {
        converter = converter
            .with_data_namespace(namespace)
            .context("Invalid --data-namespace")?;
    }
    if let Some(namespace) = args.schema_namespace {
        converter = converter
            .with_schema_namespace(namespace)
            .context("Invalid --schema-namespace")?;
    }
    if let Some(spatial_reference) = args.source_srs {
        converter = converter.with_source_spatial_reference(spatial_reference);
    }
    if args.ignore_prj {
        converter = converter.without_prj();
    }

    let conversion = converter
        .convert_path(&args.input)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if let Some(output) = &args.output {
        close_file_writer(conversion.serialize(
            format,
            BufWriter::new(
                File::create(output)
                    .with_context(|| format!("Failed to create {}", output.display()))?,
            ),
        )?)?;
        info!(output = %output.display(), triples = conversion.graph.len(), %format, "graph written");
    } else {
        conversion.serialize(format, stdout().lock())?.flush()?;
    }
    Ok(())
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        bail!(
            "The file {} has no extension to guess a format from, please set the --format option",
            path.display()
        )
    };
    RdfFormat::from_extension(ext).with_context(|| format!("The file extension '{ext}' is unknown"))
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    match name.to_ascii_lowercase().as_str() {
        "turtle" => Ok(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Ok(RdfFormat::NTriples),
        "rdfxml" | "rdf/xml" => Ok(RdfFormat::RdfXml),
        "nquads" | "n-quads" => Ok(RdfFormat::NQuads),
        _ => bail!("The file format '{name}' is unknown"),
    }
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}
