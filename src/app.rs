//! CLI flow
//!
//! config -> client settings -> model -> planned runs -> reports / saves.
//! The model constructor and the report writer are passed in so the whole
//! flow runs without a network or a terminal.

use crate::analyzer::{ClientSettings, VisionModel};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{self, LocationVariant, RunOptions, RunOutcome};
use crate::progress;
use crate::report;
use std::io::Write;

/// Run the analysis described by `cli`
///
/// Reports and the comparison digest go to `out`; progress and per-run
/// errors go to stderr.
///
/// # Returns
/// * `Ok(true)` - every run succeeded and every requested save was written
/// * `Ok(false)` - at least one run or save failed; the others still ran
/// * `Err(_)` - nothing was analyzed (credentials, client setup, `out` write)
pub fn run<M, F, W>(cli: &Cli, config: &Config, connect: F, out: &mut W) -> Result<bool>
where
    M: VisionModel,
    F: FnOnce(ClientSettings) -> Result<M>,
    W: Write,
{
    // Credentials are checked before any image is touched
    let settings = config.client_settings()?;
    let model = connect(settings)?;

    let runs = pipeline::plan_runs(&RunOptions {
        image_path: cli.image.clone(),
        location: cli.effective_location().map(String::from),
        mode: cli.mode,
        compare: cli.compare,
        no_location: cli.no_location,
    });

    eprintln!("🪨 rock-ai - geological analysis ({} mode)\n", cli.mode);

    let outcomes = pipeline::execute(&model, runs, config.max_image_size, |index, total, run| {
        let label = match run.variant {
            LocationVariant::Single => match run.request.location() {
                Some(loc) => format!("Analyzing {} (location: {})", run.request.image_path.display(), loc),
                None => format!("Analyzing {}", run.request.image_path.display()),
            },
            LocationVariant::WithLocation => "WITH LOCATION CONTEXT".to_string(),
            LocationVariant::WithoutLocation => "WITHOUT LOCATION CONTEXT".to_string(),
        };
        progress::step(index + 1, total, &label);
    });

    let timestamp = config
        .timestamped_output
        .then(|| chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());

    let mut all_ok = true;
    for outcome in &outcomes {
        if !report_outcome(cli, outcome, timestamp.as_deref(), out)? {
            all_ok = false;
        }
    }

    if let [with, without] = outcomes.as_slice() {
        if let (Ok(with), Ok(without)) = (&with.result, &without.result) {
            writeln!(out, "\n{}", report::compare_results(with, without))?;
        }
    }

    Ok(all_ok)
}

/// Print one outcome and save it if asked. A failed save is reported and
/// does not affect the other outcomes.
fn report_outcome<W: Write>(cli: &Cli, outcome: &RunOutcome, timestamp: Option<&str>, out: &mut W) -> Result<bool> {
    let result = match &outcome.result {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(false);
        }
    };

    progress::done(&format!("{} specimens identified", result.rocks.len()));
    writeln!(out, "\n{}", report::render_report(result, outcome.variant.title()))?;

    if !cli.save {
        return Ok(true);
    }

    let file_name = report::output_file_name(&outcome.request.image_path, outcome.variant, timestamp);
    match report::save_result(result, &cli.output_dir, &file_name) {
        Ok(path) => {
            progress::done(&format!("Results saved to: {}", path.display()));
            Ok(true)
        }
        Err(e) => {
            eprintln!("Error: failed to save {}: {}", file_name, e);
            Ok(false)
        }
    }
}
