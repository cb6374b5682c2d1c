use std::collections::HashMap;

use crate::error::GviewError;

/// Raster tile source addressed by an XYZ URL template, e.g.
/// `https://tile.example.org/{z}/{x}/{y}.png`.
///
/// Tile sources cover the whole world, so they have no bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    url_template: String,
    min_zoom: u32,
    max_zoom: u32,
}

impl TileSource {
    /// Creates a new tile source.
    ///
    /// Fails with [`GviewError::Construction`] if `max_zoom < min_zoom` or the template cannot be
    /// formatted.
    pub fn new(
        url_template: impl Into<String>,
        min_zoom: u32,
        max_zoom: u32,
    ) -> Result<Self, GviewError> {
        if max_zoom < min_zoom {
            return Err(GviewError::Construction(format!(
                "max zoom {max_zoom} is less than min zoom {min_zoom}"
            )));
        }

        let source = Self {
            url_template: url_template.into(),
            min_zoom,
            max_zoom,
        };
        source
            .tile_url(0, 0, min_zoom)
            .map_err(|err| GviewError::Construction(err.to_string()))?;

        Ok(source)
    }

    /// URL template of the source.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Lowest zoom level tiles are available for.
    pub fn min_zoom(&self) -> u32 {
        self.min_zoom
    }

    /// Highest zoom level tiles are available for.
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Returns true if tiles are available at zoom level `z`.
    pub fn covers_zoom(&self, z: u32) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&z)
    }

    /// URL of the tile with the given index. `{x}`, `{y}` and `{z}` placeholders of the template
    /// are replaced with the index values.
    pub fn tile_url(&self, x: u32, y: u32, z: u32) -> Result<String, GviewError> {
        let vars = HashMap::from([
            ("x".to_string(), x),
            ("y".to_string(), y),
            ("z".to_string(), z),
        ]);
        strfmt::strfmt(&self.url_template, &vars).map_err(|err| {
            GviewError::Format(format!("invalid url template {}: {err}", self.url_template))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn tile_url_substitution() {
        let source = TileSource::new("https://tiles.example.org/{z}/{x}/{y}.png", 0, 19)
            .expect("invalid source");
        assert_eq!(
            source.tile_url(3, 5, 4).expect("format failed"),
            "https://tiles.example.org/4/3/5.png"
        );
        assert!(source.covers_zoom(0));
        assert!(source.covers_zoom(19));
        assert!(!source.covers_zoom(20));
    }

    #[test]
    fn invalid_sources() {
        assert_matches!(
            TileSource::new("https://a/{z}/{x}/{y}", 5, 4),
            Err(GviewError::Construction(_))
        );
        assert_matches!(
            TileSource::new("https://a/{zoom}/{x}/{y}", 0, 4),
            Err(GviewError::Construction(_))
        );
    }

    #[test]
    fn template_without_placeholders() {
        let source = TileSource::new("https://a/static.png", 2, 2).expect("invalid source");
        assert_eq!(source.tile_url(1, 1, 2).expect("format failed"), "https://a/static.png");
    }
}
