use log::info;
use serde::Serialize;
use std::env;
use std::path::Path;
use waveguide_loss::config::load_config;
use waveguide_loss::image::io::{save_grayscale_f32, save_grayscale_u8, write_json_file};
use waveguide_loss::{LossReport, WaveguideAnalyzer, LOSS_COEFF};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut analyzer = WaveguideAnalyzer::new();
    let image = analyzer.load_image(&config.input)?;
    info!(
        "loaded {} ({}x{})",
        config.input.display(),
        image.width(),
        image.height()
    );

    let report = analyzer.calculate_loss(&config.loss_request())?;

    if let Some(path) = &config.output.signal_crop_image {
        save_grayscale_f32(&analyzer.signal_crop(&report)?, path)?;
        println!("Saved signal crop to {}", path.display());
    }
    if let Some(path) = &config.output.overview_image {
        let overview = analyzer.overview(&report.position, config.params.y_span_full)?;
        save_grayscale_u8(&overview, path)?;
        println!("Saved overview crop to {}", path.display());
    }

    let summary = LossSummary::new(&config.input, &report);
    write_json_file(&config.output.report_json, &summary)?;

    println!(
        "Propagation loss: {:.2} dB/cm (slope={:.5}, r2={:.4}, n={})",
        report.loss_db_per_cm, report.fit.slope, report.fit.r_squared, report.fit.n_samples
    );
    println!("Saved report to {}", config.output.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: measure_loss <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LossSummary<'a> {
    input: &'a Path,
    loss_coeff: f64,
    fitted_line: Vec<f64>,
    #[serde(flatten)]
    report: &'a LossReport,
}

impl<'a> LossSummary<'a> {
    fn new(input: &'a Path, report: &'a LossReport) -> Self {
        Self {
            input,
            loss_coeff: LOSS_COEFF,
            fitted_line: report.fitted_line(),
            report,
        }
    }
}
