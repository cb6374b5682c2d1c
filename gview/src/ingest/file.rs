use std::path::Path;

use futures::stream;

use crate::error::GviewError;
use crate::ingest::{GroupStream, Ingestor, LayerGroup, SourceRef};

/// Reads feature groups from local files, choosing the decoder by the file extension.
///
/// Supported extensions are `geojson` and `json` (with the `geojson` feature). Files of other
/// formats, and URL sources, are reported as [`GviewError::Format`]. A GeoJSON file is read when
/// the stream is first polled and produces one group.
#[derive(Debug, Default, Copy, Clone)]
pub struct FileIngestor;

impl Ingestor for FileIngestor {
    fn ingest<'a>(&'a self, source: &'a SourceRef) -> GroupStream<'a> {
        Box::pin(stream::once(async move { read_source(source) }))
    }
}

fn read_source(source: &SourceRef) -> Result<LayerGroup, GviewError> {
    let SourceRef::Path(path) = source else {
        return Err(GviewError::Format(format!(
            "{source} cannot be loaded: only local files are supported"
        )));
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    log::info!("Loading {extension} file {}", path.display());

    match extension.as_str() {
        "geojson" | "json" => read_geojson(path, source),
        other => Err(GviewError::Format(format!(
            "unsupported file type '{other}' of {source}"
        ))),
    }
}

#[cfg(feature = "geojson")]
fn read_geojson(path: &Path, source: &SourceRef) -> Result<LayerGroup, GviewError> {
    let text = std::fs::read_to_string(path)?;
    super::geojson::decode_geojson(source.file_name(), source.key(), &text)
}

#[cfg(not(feature = "geojson"))]
fn read_geojson(_path: &Path, source: &SourceRef) -> Result<LayerGroup, GviewError> {
    Err(GviewError::Format(format!(
        "{source} cannot be loaded: GeoJSON support is disabled"
    )))
}
