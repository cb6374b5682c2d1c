//! This example loads layers the same way the viewer does on startup, and prints the resulting
//! layer list and the view that shows the top-most feature layer.
//!
//! Run it with a query string of the viewer URL:
//!
//! ```shell
//! cargo run --example load_geojson -- "xyz=tile.openstreetmap.org/{z}/{x}/{y}.png&file=./gview/examples/data/cities.geojson"
//! ```

use anyhow::{anyhow, Result};
use gview::ingest::{bootstrap, FileIngestor, SessionParams};
use gview::layer::GeoLayer;
use gview::render::LayerRenderer;
use gview::style::Style;
use gview::{GviewConfig, LayerType, Map};

struct PrintRenderer;

impl LayerRenderer for PrintRenderer {
    fn draw(&mut self, layer: &GeoLayer, style: &Style) {
        match layer.feature_set() {
            Some(set) => {
                let fill = style
                    .as_feature()
                    .and_then(|s| s.fill_color.as_ref())
                    .map(|getter| {
                        set.features()
                            .iter()
                            .map(|f| getter.evaluate(f).to_hex())
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();
                println!(
                    "{}: {} features, opacity {}, fill {fill:?}",
                    layer.name(),
                    set.len(),
                    style.opacity()
                );
            }
            None => println!("{}: tiles, opacity {}", layer.name(), style.opacity()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(query) = std::env::args().nth(1) else {
        return Err(anyhow!(
            "This example must be run with one argument - \
            query string with xyz= and file= parameters"
        ));
    };

    let config = match std::env::var("GVIEW_CONFIG") {
        Ok(path) => GviewConfig::from_json_file(path)?,
        Err(_) => GviewConfig::default(),
    };

    let params = SessionParams::parse(&query);
    let mut map = Map::new(&config);
    let added = tokio_test::block_on(bootstrap(&mut map, &FileIngestor, &params, &config));
    log::info!("Added {} of requested layers", added.len());

    println!("Layers, bottom first:");
    map.layers().render(&mut PrintRenderer);

    let focus = map
        .layers()
        .iter()
        .find(|(layer, _, _)| layer.layer_type() == LayerType::Feature)
        .map(|(layer, _, _)| layer.id());
    if let Some(id) = focus {
        map.focus_layer(id);
    }

    let view = map.view();
    println!(
        "View: center ({:.4}, {:.4}), zoom {}, pitch {}",
        view.longitude, view.latitude, view.zoom, view.pitch
    );

    Ok(())
}
