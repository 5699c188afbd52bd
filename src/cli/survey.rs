//! Survey command implementation.

use super::output::{JsonSurvey, SurveyRow, SurveyStats, format_survey_csv, format_survey_text};
use super::{CliError, SurveyFormat, WorldArgs};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use thermogo::generate_map;
use tracing::warn;

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if the base configuration is invalid or output fails.
pub(crate) fn execute(
    world: &WorldArgs,
    seeds: u32,
    start_seed: Option<u32>,
    threads: Option<usize>,
    format: SurveyFormat,
    progress: bool,
) -> Result<(), CliError> {
    let base = world.resolve()?;
    let start_seed = start_seed.unwrap_or(base.seed);

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok();
    }

    let pb = progress.then(|| {
        let pb = ProgressBar::new(u64::from(seeds));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} maps ({per_sec})")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let start = Instant::now();

    // Each worker fills its own accumulator; merged once at the end
    let mut stats = (0..seeds)
        .into_par_iter()
        .fold(SurveyStats::default, |mut local, i| {
            let mut config = base;
            config.seed = start_seed.wrapping_add(i);
            match generate_map(&config) {
                Ok((map, sites)) => local.rows.push(SurveyRow::measure(&map, &sites)),
                Err(e) => {
                    warn!(seed = config.seed, error = %e, "map generation failed");
                    local.failures += 1;
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SurveyStats::default, |mut a, b| {
            a.merge(b);
            a
        });
    stats.sort();

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        SurveyFormat::Text => {
            println!();
            print!("{}", format_survey_text(&stats));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        SurveyFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSurvey::from_stats(&stats))?;
            println!("{json}");
        }
        SurveyFormat::Csv => {
            print!("{}", format_survey_csv(&stats));
        }
    }

    Ok(())
}
