//! # fit 子命令实现
//!
//! 检测峰后在每个峰附近做 Gauss / Lorentz 峰形估计。
//!
//! ## 依赖关系
//! - 使用 `cli/peaks.rs` 定义的 FitArgs
//! - 使用 `ftir/detector`, `ftir/fit.rs`, `ftir/export.rs`

use super::load_spectrum;
use crate::cli::peaks::FitArgs;
use crate::error::{FtirError, Result};
use crate::ftir::{detect_peaks, export, fit_peaks};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FitRow {
    #[tabled(rename = "Peak (cm-1)")]
    peak: String,
    #[tabled(rename = "Model")]
    kind: String,
    #[tabled(rename = "Position")]
    pos: String,
    #[tabled(rename = "Height")]
    height: String,
    #[tabled(rename = "FWHM (cm-1)")]
    fwhm: String,
    #[tabled(rename = "Area")]
    area: String,
}

/// 执行峰形估计
pub fn execute(args: FitArgs) -> Result<()> {
    output::print_header("FTIR Peak Shape Fitting");

    if !args.window.is_finite() || args.window <= 0.0 {
        return Err(FtirError::InvalidArgument(format!(
            "fit window must be a positive number, got {}",
            args.window
        )));
    }

    let config = args.detect.to_config()?;
    let spectrum = load_spectrum(&args.input, &args.preprocess, args.detect.baseline)?;
    output::print_success(&format!(
        "Loaded spectrum: {} ({} points)",
        spectrum.name,
        spectrum.len()
    ));

    let peaks = detect_peaks(&spectrum.samples, &config);
    if peaks.is_empty() {
        output::print_warning("No peaks detected, nothing to fit");
        return Ok(());
    }
    output::print_info(&format!(
        "Fitting {} peaks ({} mode, window {:.1} cm-1)",
        peaks.len(),
        config.mode,
        args.window
    ));

    let fits = fit_peaks(&spectrum.samples, &peaks, args.window);
    let skipped = fits.iter().filter(|f| f.is_none()).count();

    let rows: Vec<FitRow> = peaks
        .iter()
        .zip(&fits)
        .filter_map(|(p, f)| f.map(|f| (p, f)))
        .map(|(p, f)| FitRow {
            peak: format!("{:.1}", p.x),
            kind: f.kind.to_string(),
            pos: format!("{:.2}", f.pos),
            height: format!("{:.4}", f.height),
            fwhm: format!("{:.2}", f.fwhm),
            area: format!("{:.4}", f.area),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Fit Results ({} peaks)", rows.len()));
        println!("{}", Table::new(&rows));
    }
    if skipped > 0 {
        output::print_skip(&format!(
            "{} peaks have fewer than {} points in the window",
            skipped,
            crate::ftir::fit::MIN_WINDOW_SAMPLES
        ));
    }

    if let Some(ref path) = args.output {
        export::fits_to_csv(&peaks, &fits, path)?;
        output::print_success(&format!("Fits saved to '{}'", path.display()));
    }

    Ok(())
}
