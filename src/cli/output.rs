//! Output formatting utilities for CLI.

// Survey averages use intentional casts
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::fmt::Write as _;
use thermogo::{Coord, ElevationBand, GameMap, Layer, ResourceSite, Route};

/// JSON-serializable map summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonMapSummary {
    /// Terrain seed.
    pub(super) seed: u32,
    /// Width in tiles.
    pub(super) width: u16,
    /// Height in tiles.
    pub(super) height: u16,
    /// Share of tiles above sea level (0.0-1.0).
    pub(super) land_fraction: f64,
    /// Connected land regions.
    pub(super) land_regions: usize,
    /// Connected sea regions.
    pub(super) sea_regions: usize,
    /// Tile count per elevation band.
    pub(super) bands: Vec<JsonBandCount>,
    /// Resource deposits.
    pub(super) resources: Vec<JsonResource>,
}

/// Tile count of one elevation band.
#[derive(Debug, Serialize)]
pub(super) struct JsonBandCount {
    /// Band name.
    band: &'static str,
    /// Number of tiles.
    tiles: usize,
}

/// One resource deposit.
#[derive(Debug, Serialize)]
pub(super) struct JsonResource {
    /// Tile of the deposit.
    at: Coord,
    /// Noise value that put it there.
    density: f64,
}

impl JsonMapSummary {
    /// Summarize a generated map.
    pub(super) fn from_map(map: &GameMap, sites: &[ResourceSite]) -> Self {
        Self {
            seed: map.config().seed,
            width: map.width(),
            height: map.height(),
            land_fraction: map.land_fraction(),
            land_regions: map.region_count(Layer::Land),
            sea_regions: map.region_count(Layer::Sea),
            bands: band_counts(map)
                .into_iter()
                .map(|(band, tiles)| JsonBandCount {
                    band: band.name(),
                    tiles,
                })
                .collect(),
            resources: sites
                .iter()
                .map(|s| JsonResource {
                    at: s.coord,
                    density: s.density,
                })
                .collect(),
        }
    }
}

/// Count tiles per elevation band, in band order.
pub(super) fn band_counts(map: &GameMap) -> Vec<(ElevationBand, usize)> {
    ElevationBand::ALL
        .iter()
        .map(|&band| (band, map.tiles().iter().filter(|t| t.band() == band).count()))
        .collect()
}

/// Format the statistics printed under a text map.
pub(super) fn format_map_stats(map: &GameMap, sites: &[ResourceSite]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Seed {} | {}x{} | land {:.1}% | {} land regions | {} sea regions | {} resource sites",
        map.config().seed,
        map.width(),
        map.height(),
        map.land_fraction() * 100.0,
        map.region_count(Layer::Land),
        map.region_count(Layer::Sea),
        sites.len()
    );
    output
}

/// JSON-serializable route.
#[derive(Debug, Serialize)]
pub(super) struct JsonRoute {
    /// Start tile.
    from: Coord,
    /// Goal tile.
    to: Coord,
    /// Terrain searched.
    movement: Layer,
    /// Whether a route exists.
    reachable: bool,
    /// Total cost (null if unreachable).
    cost: Option<f64>,
    /// Great-circle length in kilometres (null if unreachable).
    distance_km: Option<f64>,
    /// Tiles from start to goal inclusive.
    steps: Vec<Coord>,
}

impl JsonRoute {
    /// Create from a search result on `map`.
    pub(super) fn new(
        map: &GameMap,
        from: Coord,
        to: Coord,
        movement: Layer,
        route: Option<&Route>,
    ) -> Self {
        Self {
            from,
            to,
            movement,
            reachable: route.is_some(),
            cost: route.map(|r| r.cost),
            distance_km: route.map(|r| map.route_distance_km(r)),
            steps: route.map(|r| r.steps.clone()).unwrap_or_default(),
        }
    }
}

/// Format a route as human-readable text.
pub(super) fn format_route_text(
    map: &GameMap,
    from: Coord,
    to: Coord,
    movement: Layer,
    route: Option<&Route>,
) -> String {
    let mut output = String::new();
    match route {
        Some(route) => {
            let _ = writeln!(
                output,
                "{movement} route {from} -> {to}: {} moves, cost {:.3}, {:.0} km",
                route.moves(),
                route.cost,
                map.route_distance_km(route)
            );
            let steps: Vec<String> = route.steps.iter().map(ToString::to_string).collect();
            let _ = writeln!(output, "  {}", steps.join(" "));
        }
        None => {
            let _ = writeln!(output, "{movement} route {from} -> {to}: unreachable");
        }
    }
    output
}

/// Survey results for one seed.
#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct SurveyRow {
    /// Terrain seed.
    pub(super) seed: u32,
    /// Share of land tiles.
    pub(super) land_fraction: f64,
    /// Number of resource sites.
    pub(super) resource_sites: usize,
    /// Connected land regions.
    pub(super) land_regions: usize,
    /// Connected sea regions.
    pub(super) sea_regions: usize,
}

impl SurveyRow {
    /// Measure one generated map.
    pub(super) fn measure(map: &GameMap, sites: &[ResourceSite]) -> Self {
        Self {
            seed: map.config().seed,
            land_fraction: map.land_fraction(),
            resource_sites: sites.len(),
            land_regions: map.region_count(Layer::Land),
            sea_regions: map.region_count(Layer::Sea),
        }
    }
}

/// Aggregate survey statistics.
#[derive(Debug, Default)]
pub(super) struct SurveyStats {
    /// Per-seed rows.
    pub(super) rows: Vec<SurveyRow>,
    /// Seeds that failed to generate.
    pub(super) failures: u64,
}

impl SurveyStats {
    /// Merge stats from another accumulator.
    pub(super) fn merge(&mut self, other: Self) {
        self.rows.extend(other.rows);
        self.failures += other.failures;
    }

    /// Sort rows by seed.
    pub(super) fn sort(&mut self) {
        self.rows.sort_by_key(|r| r.seed);
    }

    /// Mean land fraction over all rows.
    pub(super) fn mean_land_fraction(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.land_fraction).sum::<f64>() / self.rows.len() as f64
    }

    /// Mean land region count over all rows.
    pub(super) fn mean_land_regions(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.land_regions as f64).sum::<f64>() / self.rows.len() as f64
    }
}

/// JSON-serializable survey result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSurvey<'a> {
    /// Maps generated.
    maps: usize,
    /// Seeds that failed.
    failures: u64,
    /// Mean land fraction.
    mean_land_fraction: f64,
    /// Mean land region count.
    mean_land_regions: f64,
    /// Per-seed rows.
    seeds: &'a [SurveyRow],
}

impl<'a> JsonSurvey<'a> {
    /// Create from stats.
    pub(super) fn from_stats(stats: &'a SurveyStats) -> Self {
        Self {
            maps: stats.rows.len(),
            failures: stats.failures,
            mean_land_fraction: stats.mean_land_fraction(),
            mean_land_regions: stats.mean_land_regions(),
            seeds: &stats.rows,
        }
    }
}

/// Format survey stats as human-readable text.
pub(super) fn format_survey_text(stats: &SurveyStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Survey Results ({} maps)", stats.rows.len());
    output.push_str("========================================\n\n");
    output.push_str("  seed      land%   sites   land-regions   sea-regions\n");
    for row in &stats.rows {
        let _ = writeln!(
            output,
            "  {:<8} {:>6.1} {:>7} {:>14} {:>13}",
            row.seed,
            row.land_fraction * 100.0,
            row.resource_sites,
            row.land_regions,
            row.sea_regions
        );
    }
    let _ = writeln!(
        output,
        "\nMean land: {:.1}%  Mean land regions: {:.1}",
        stats.mean_land_fraction() * 100.0,
        stats.mean_land_regions()
    );
    if stats.failures > 0 {
        let _ = writeln!(output, "Failed seeds: {}", stats.failures);
    }
    output
}

/// Format survey stats as CSV.
pub(super) fn format_survey_csv(stats: &SurveyStats) -> String {
    let mut output = String::new();

    output.push_str("seed,land_fraction,resource_sites,land_regions,sea_regions\n");
    for row in &stats.rows {
        let _ = writeln!(
            output,
            "{},{:.4},{},{},{}",
            row.seed, row.land_fraction, row.resource_sites, row.land_regions, row.sea_regions
        );
    }
    output
}
