//! End-to-end rendering tests: antipode maps and decay frames written to
//! disk and decoded again.

use antipode_common::ClassificationGrid;
use renderer::color::{CONTINENT_YELLOW, OCEAN_MASK};
use renderer::decay_chart::{population_colors, PURPLE};
use renderer::{
    Coastlines, DecayChartRenderer, DecayChartStyle, Figure, FigureConfig, MapRenderer, PopulationPanel,
    RenderOptions, SeriesPoint, TextRenderer,
};
use test_utils::{decay, synthetic_classification, temp_test_dir};

// ============================================================================
// Helper functions
// ============================================================================

fn synthetic_grid() -> ClassificationGrid {
    let (lons, lats, codes) = synthetic_classification(5.0);
    ClassificationGrid::new(lons, lats, codes).unwrap()
}

fn small_map_renderer(coastlines: Option<Coastlines>) -> MapRenderer {
    MapRenderer::new(FigureConfig::new(3.2, 2.4, 100.0), TextRenderer::none(), coastlines)
}

fn count_color(figure: &Figure, rgba: [u8; 4]) -> usize {
    figure.image().pixels().filter(|p| p.0 == rgba).count()
}

fn small_chart_style() -> DecayChartStyle {
    DecayChartStyle {
        lattice_columns: 10,
        row_width_inches: 4.0,
        row_height_inches: 2.0,
        dpi: 50.0,
    }
}

fn series(population: usize, steps: usize) -> Vec<SeriesPoint> {
    let mut parents = population;
    (0..=steps)
        .map(|step| {
            let point = SeriesPoint {
                elapsed: step as f64,
                parents,
                daughters: population - parents,
            };
            parents /= 2;
            point
        })
        .collect()
}

// ============================================================================
// Antipode map tests
// ============================================================================

#[test]
fn test_robinson_map_saved_with_dpi() {
    let dir = temp_test_dir();
    let path = dir.path().join("maps").join("robinson.png");
    let options = RenderOptions {
        output_path: Some(path.clone()),
        ..Default::default()
    };

    let figure = small_map_renderer(None)
        .render_robinson(&synthetic_grid(), &options)
        .unwrap();
    assert!(path.exists());

    let bytes = std::fs::read(&path).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    // Cropped to content plus 10 px of padding on each side
    assert!(decoded.width() <= figure.width() + 20);
    assert!(decoded.height() <= figure.height() + 20);
    assert!(bytes.windows(4).any(|w| w == b"pHYs"));
}

#[test]
fn test_recentered_map_still_shows_continents() {
    let options = RenderOptions {
        recenter: true,
        ..Default::default()
    };
    let figure = small_map_renderer(None)
        .render_robinson(&synthetic_grid(), &options)
        .unwrap();
    assert!(count_color(&figure, CONTINENT_YELLOW.to_array()) > 0);
    assert!(count_color(&figure, OCEAN_MASK.to_array()) > 0);
}

#[test]
fn test_perspective_with_coastlines() {
    let geojson = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": [[-100.0, 30.0], [-80.0, 45.0], [-60.0, 50.0]]
            }
        }]
    }"#;
    let coastlines = Coastlines::from_geojson_str(geojson).unwrap();
    let figure = small_map_renderer(Some(coastlines))
        .render_perspective(&synthetic_grid(), &RenderOptions::default())
        .unwrap();
    assert_eq!(figure.width(), 320);
    assert!(figure.to_png().is_ok());
}

// ============================================================================
// Decay frame tests
// ============================================================================

#[test]
fn test_default_style_matches_classroom_lattice() {
    let style = DecayChartStyle::default();
    assert_eq!(style.lattice_columns, decay::LATTICE_COLUMNS);
    assert_eq!(decay::POPULATION.div_ceil(style.lattice_columns), decay::LATTICE_ROWS);
    assert_eq!(style.dpi, 100.0);
}

#[test]
fn test_decay_frame_size_per_population() {
    let renderer = DecayChartRenderer::new(small_chart_style(), TextRenderer::none());
    let decayed = vec![false; 100];
    let history = series(100, 0);
    let (parent, daughter) = population_colors(0, 1);
    let panel = PopulationPanel {
        decayed: &decayed,
        history: &history,
        trails: &[],
        parent_color: parent,
        daughter_color: daughter,
        max_elapsed: 6.0,
    };

    let single = renderer.render_frame(&[panel.clone()]).unwrap();
    assert_eq!((single.width(), single.height()), (200, 100));

    let dual = renderer.render_frame(&[panel.clone(), panel]).unwrap();
    assert_eq!((dual.width(), dual.height()), (200, 200));
}

#[test]
fn test_decayed_units_change_color() {
    let renderer = DecayChartRenderer::new(small_chart_style(), TextRenderer::none());
    let history = series(100, 6);
    let trails = vec![series(100, 6)];
    let (parent, daughter) = population_colors(0, 1);

    let fresh = vec![false; 100];
    let spent = vec![true; 100];
    let frame = |decayed: &[bool]| {
        renderer
            .render_frame(&[PopulationPanel {
                decayed,
                history: &history,
                trails: &trails,
                parent_color: parent,
                daughter_color: daughter,
                max_elapsed: 6.0,
            }])
            .unwrap()
    };

    let purple = PURPLE.to_array();
    let before = count_color(&frame(&fresh), purple);
    let after = count_color(&frame(&spent), purple);
    assert!(before > after, "purple pixels {} -> {}", before, after);
}

#[test]
fn test_decay_frame_saved() {
    let dir = temp_test_dir();
    let path = dir.path().join("Decay1-00.png");
    let renderer = DecayChartRenderer::new(small_chart_style(), TextRenderer::none());
    let decayed = vec![false; 50];
    let history = series(50, 0);
    let (parent, daughter) = population_colors(1, 2);
    let figure = renderer
        .render_frame(&[PopulationPanel {
            decayed: &decayed,
            history: &history,
            trails: &[],
            parent_color: parent,
            daughter_color: daughter,
            max_elapsed: 12.0,
        }])
        .unwrap();
    figure.save_png(&path).unwrap();
    assert!(image::open(&path).is_ok());
}
