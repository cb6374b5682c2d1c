//! Loading layers from external sources.
//!
//! An [`Ingestor`] turns a [`SourceRef`] into a stream of feature groups. Every group becomes one
//! feature layer. Groups are added to the map as soon as the stream produces them, so an error in
//! the middle of a source does not affect the groups and sources loaded before it.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[cfg(target_arch = "wasm32")]
use futures::stream::LocalBoxStream;
#[cfg(not(target_arch = "wasm32"))]
use futures::stream::BoxStream;
use futures::StreamExt;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::config::GviewConfig;
use crate::error::GviewError;
use crate::layer::{Feature, GeoLayer, LayerId};
use crate::map::{LayerAction, Map};

mod file;
#[cfg(feature = "geojson")]
mod geojson;

pub use file::FileIngestor;
#[cfg(feature = "geojson")]
pub use self::geojson::decode_geojson;

/// Location of a source of layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceRef {
    /// Local file.
    Path(PathBuf),
    /// Remote resource.
    Url(String),
}

impl SourceRef {
    /// String identifying the source. Layers loaded from it use this as their source key.
    pub fn key(&self) -> String {
        match self {
            SourceRef::Path(path) => path.display().to_string(),
            SourceRef::Url(url) => url.clone(),
        }
    }

    /// Last segment of the path or URL.
    pub fn file_name(&self) -> String {
        match self {
            SourceRef::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            SourceRef::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(url)
                .to_string(),
        }
    }
}

/// Strings starting with `http://` or `https://` are URLs, anything else is a path.
impl From<&str> for SourceRef {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            SourceRef::Url(value.to_string())
        } else {
            SourceRef::Path(PathBuf::from(value))
        }
    }
}

impl From<&Path> for SourceRef {
    fn from(value: &Path) -> Self {
        SourceRef::Path(value.to_path_buf())
    }
}

impl Display for SourceRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Named group of features read from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    /// Name of the layer created from the group.
    pub name: String,
    /// Source key of the layer created from the group.
    pub source_key: String,
    /// Features of the group.
    pub features: Vec<Feature>,
}

impl LayerGroup {
    /// Creates a feature layer from the group.
    pub fn into_layer(self) -> Result<GeoLayer, GviewError> {
        GeoLayer::features(self.name, self.source_key, self.features)
    }
}

/// Groups of a source, produced one by one.
#[cfg(not(target_arch = "wasm32"))]
pub type GroupStream<'a> = BoxStream<'a, Result<LayerGroup, GviewError>>;
/// Groups of a source, produced one by one.
#[cfg(target_arch = "wasm32")]
pub type GroupStream<'a> = LocalBoxStream<'a, Result<LayerGroup, GviewError>>;

/// Reads groups of features from a source.
pub trait Ingestor: MaybeSend + MaybeSync {
    /// Returns the groups of the source. Nothing is read until the stream is polled.
    ///
    /// An error item ends the source: groups produced before it are kept, nothing after it is
    /// read. A source that cannot be opened or parsed at all yields a single error.
    fn ingest<'a>(&'a self, source: &'a SourceRef) -> GroupStream<'a>;
}

/// Adds a layer for the group unless a layer with the same source key is already in the map.
/// Returns the id of the added layer.
pub fn commit_group(map: &mut Map, group: LayerGroup) -> Option<LayerId> {
    let name = group.name.clone();
    let layer = match group.into_layer() {
        Ok(layer) => layer,
        Err(err) => {
            log::warn!("Skipping layer {name}: {err}");
            return None;
        }
    };

    let id = layer.id();
    match map.dispatch(LayerAction::AddUnique(layer)) {
        Ok(true) => Some(id),
        Ok(false) => None,
        Err(err) => {
            log::warn!("Failed to add layer {name}: {err}");
            None
        }
    }
}

/// Ingests the sources one after another and adds every group to the map as soon as it is
/// produced. Errors are logged and end only the source they come from. Returns ids of the added
/// layers.
pub async fn load_sources(
    map: &mut Map,
    ingestor: &dyn Ingestor,
    sources: &[SourceRef],
) -> Vec<LayerId> {
    let mut added = vec![];
    for source in sources {
        let mut groups = ingestor.ingest(source);
        while let Some(group) = groups.next().await {
            match group {
                Ok(group) => added.extend(commit_group(map, group)),
                Err(err) => {
                    log::warn!("Failed to load {source}: {err}");
                    break;
                }
            }
        }
    }

    added
}

/// Layers requested in the query string of the viewer URL.
///
/// `xyz=<host/path/{z}/{x}/{y}.png>` adds a tile source, `file=<path>` loads a file. Both can be
/// repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionParams {
    /// Tile URL templates without the scheme.
    pub xyz: Vec<String>,
    /// File sources.
    pub files: Vec<String>,
}

impl SessionParams {
    /// Parses a query string, with or without the leading `?`. Unknown parameters are ignored.
    ///
    /// ```
    /// use gview::ingest::SessionParams;
    ///
    /// let params = SessionParams::parse(
    ///     "?xyz=tile.openstreetmap.org/%7Bz%7D/%7Bx%7D/%7By%7D.png&file=parks.geojson",
    /// );
    /// assert_eq!(params.xyz, vec!["tile.openstreetmap.org/{z}/{x}/{y}.png"]);
    /// assert_eq!(params.files, vec!["parks.geojson"]);
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "xyz" => params.xyz.push(value.into_owned()),
                "file" => params.files.push(value.into_owned()),
                other => log::debug!("Ignoring query parameter {other}"),
            }
        }

        params
    }

    /// Returns true if no layers are requested.
    pub fn is_empty(&self) -> bool {
        self.xyz.is_empty() && self.files.is_empty()
    }
}

/// Adds the layers requested by the session parameters to the map: a tile source for every `xyz`
/// value, then the layers of every `file`. Returns ids of the added layers.
pub async fn bootstrap(
    map: &mut Map,
    ingestor: &dyn Ingestor,
    params: &SessionParams,
    config: &GviewConfig,
) -> Vec<LayerId> {
    let mut added = vec![];
    for xyz in &params.xyz {
        let layer = match GeoLayer::tile_source(
            xyz.as_str(),
            format!("https://{xyz}"),
            config.xyz_min_zoom,
            config.xyz_max_zoom,
        ) {
            Ok(layer) => layer,
            Err(err) => {
                log::warn!("Skipping tile source {xyz}: {err}");
                continue;
            }
        };

        let id = layer.id();
        if let Ok(true) = map.dispatch(LayerAction::AddUnique(layer)) {
            added.push(id);
        }
    }

    let sources: Vec<SourceRef> = params
        .files
        .iter()
        .map(|f| SourceRef::from(f.as_str()))
        .collect();
    added.extend(load_sources(map, ingestor, &sources).await);

    log::info!("Session started with {} layers", added.len());
    added
}
