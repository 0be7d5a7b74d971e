//! # peaks 子命令实现
//!
//! 检测峰，匹配目标吸收带并给出结论。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 并行处理（rayon）
//! - 可选逐峰峰形估计
//! - 导出峰列表 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/peaks.rs` 定义的 PeaksArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `ftir/` 模块进行检测、匹配与拟合

use super::load_spectrum;
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::common::{DisplayArgs, PreprocessArgs};
use crate::cli::peaks::PeaksArgs;
use crate::error::{FtirError, Result};
use crate::ftir::{
    decide_verdict, detect_peaks, export, fit_peaks, match_bands, top_picks, BandMatch,
    DetectorConfig, Verdict, BANDS,
};
use crate::models::{FitResult, Peak, Spectrum};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 单条光谱的分析结果
pub struct PeakReport {
    pub peaks: Vec<Peak>,
    pub fits: Option<Vec<Option<FitResult>>>,
    pub matches: Vec<BandMatch>,
    pub verdict: Verdict,
}

/// 检测 → （可选）拟合 → 吸收带匹配 → 结论
pub fn analyze(
    spectrum: &Spectrum,
    config: &DetectorConfig,
    fit_window: Option<f64>,
) -> PeakReport {
    let peaks = detect_peaks(&spectrum.samples, config);
    let fits = fit_window.map(|w| fit_peaks(&spectrum.samples, &peaks, w));
    let matches = match_bands(&peaks, &BANDS);
    let verdict = decide_verdict(&matches);

    log::info!(
        "{}: {} peaks ({} mode), verdict {:?}",
        spectrum.name,
        peaks.len(),
        config.mode,
        verdict
    );

    PeakReport {
        peaks,
        fits,
        matches,
        verdict,
    }
}

/// 执行峰检测
pub fn execute(args: PeaksArgs) -> Result<()> {
    output::print_header("FTIR Peak Detection");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(FtirError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &PeaksArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let config = args.detect.to_config()?;
    let spectrum = load_spectrum(&args.input, &args.preprocess, args.detect.baseline)?;
    let (x_min, x_max) = spectrum.x_extent();
    output::print_success(&format!(
        "Loaded spectrum: {} ({} points, {:.1}-{:.1} cm-1)",
        spectrum.name,
        spectrum.len(),
        x_min,
        x_max
    ));

    let fit_window = args.fit.then_some(args.fit_window);
    let report = analyze(&spectrum, &config, fit_window);

    output::print_success(&format!(
        "Detected {} peaks ({} mode)",
        report.peaks.len(),
        config.mode
    ));

    print_top_picks(&report, &args.display, &config);
    print_band_table(&report.matches);

    output::print_separator();
    output::print_verdict(report.verdict);

    if let Some(ref path) = args.output {
        export::peaks_to_csv(&report.peaks, report.fits.as_deref(), path)?;
        output::print_success(&format!("Peaks saved to '{}'", path.display()));
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &PeaksArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .skip_stem_suffix(OUTPUT_SUFFIX);

    let files = collector.collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} spectrum files", files.len()));

    let output_dir = args.output.clone().unwrap_or_else(|| args.input.clone());
    fs::create_dir_all(&output_dir).map_err(|e| FtirError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let config = Arc::new(BatchPeaksConfig {
        output_dir,
        detector: args.detect.to_config()?,
        preprocess: args.preprocess.clone(),
        baseline: args.detect.baseline,
        fit_window: args.fit.then_some(args.fit_window),
        overwrite: args.overwrite,
    });

    output::print_info(&format!("Detection mode: {}", config.detector.mode));

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_batch_file(file, &config))?;

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量处理配置
struct BatchPeaksConfig {
    output_dir: PathBuf,
    detector: DetectorConfig,
    preprocess: PreprocessArgs,
    baseline: bool,
    fit_window: Option<f64>,
    overwrite: bool,
}

/// 批量输出文件名主干后缀；收集输入时跳过带此后缀的文件
const OUTPUT_SUFFIX: &str = "_peaks";

/// 批量模式输出文件名：`<stem>_peaks.csv`
fn batch_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{}{}.csv", stem, OUTPUT_SUFFIX))
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &Arc<BatchPeaksConfig>) -> ProcessResult {
    let output_file = batch_output_path(input, &config.output_dir);

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match process_one(input, &output_file, config) {
        Ok(report) => ProcessResult::Success(format!(
            "{} -> {} ({} peaks, {:?})",
            input.display(),
            output_file.display(),
            report.peaks.len(),
            report.verdict
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn process_one(input: &Path, output: &Path, config: &BatchPeaksConfig) -> Result<PeakReport> {
    let spectrum = load_spectrum(input, &config.preprocess, config.baseline)?;
    let report = analyze(&spectrum, &config.detector, config.fit_window);
    export::peaks_to_csv(&report.peaks, report.fits.as_deref(), output)?;
    Ok(report)
}

/// 打印主要峰表格
fn print_top_picks(report: &PeakReport, display: &DisplayArgs, config: &DetectorConfig) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PeakRow {
        #[tabled(rename = "x (cm-1)")]
        x: String,
        #[tabled(rename = "Prominence")]
        prominence: String,
        #[tabled(rename = "Width (cm-1)")]
        width: String,
        #[tabled(rename = "Band")]
        band: String,
        #[tabled(rename = "Fit")]
        fit: String,
    }

    let picks = top_picks(
        &report.peaks,
        &BANDS,
        display.top_picks,
        config.mode,
        display.top_n,
    );

    let fit_of = |i: usize| -> String {
        match report.fits.as_ref().and_then(|fits| fits.get(i).copied().flatten()) {
            Some(f) => format!("{} FWHM {:.1}", f.kind, f.fwhm),
            None => "-".to_string(),
        }
    };

    let rows: Vec<PeakRow> = picks
        .into_iter()
        .map(|(i, p)| PeakRow {
            x: format!("{:.1}", p.x),
            prominence: format!("{:.3}", p.prominence),
            width: format!("{:.1}", p.width),
            band: BANDS
                .iter()
                .find(|b| b.contains(p.x))
                .map_or_else(|| "-".to_string(), |b| b.name.to_string()),
            fit: fit_of(i),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No peaks detected");
        return;
    }

    output::print_header(&format!("Main Peaks ({} of {})", rows.len(), report.peaks.len()));
    println!("{}", Table::new(&rows));
}

/// 打印吸收带匹配表格
fn print_band_table(matches: &[BandMatch]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct BandRow {
        #[tabled(rename = "Band")]
        name: String,
        #[tabled(rename = "Range (cm-1)")]
        range: String,
        #[tabled(rename = "Class")]
        class: String,
        #[tabled(rename = "Peak (cm-1)")]
        peak: String,
        #[tabled(rename = "Prominence")]
        prominence: String,
    }

    let rows: Vec<BandRow> = matches
        .iter()
        .map(|m| BandRow {
            name: m.band.name.to_string(),
            range: format!("{:.0}-{:.0}", m.band.range.0, m.band.range.1),
            class: m.band.class.to_string(),
            peak: m
                .hit
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| format!("{:.1}", p.x)),
            prominence: m
                .hit
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| format!("{:.3}", p.prominence)),
        })
        .collect();

    output::print_header("Target Bands");
    println!("{}", Table::new(&rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftir::DetectionMode;
    use crate::models::Sample;

    fn gauss(x: f64, center: f64, height: f64, fwhm: f64) -> f64 {
        let sigma = fwhm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());
        height * (-0.5 * ((x - center) / sigma).powi(2)).exp()
    }

    fn go_like_spectrum() -> Spectrum {
        let samples = (0..=1000)
            .map(|i| {
                let x = 1000.0 + i as f64;
                Sample::new(x, gauss(x, 1725.0, 1.0, 20.0) + gauss(x, 1600.0, 0.6, 20.0))
            })
            .collect();
        Spectrum::new("go", samples)
    }

    #[test]
    fn test_analyze_go_with_aromatic() {
        let config = DetectorConfig::new(DetectionMode::Robust);
        let report = analyze(&go_like_spectrum(), &config, Some(crate::ftir::DEFAULT_FIT_WINDOW));

        assert_eq!(report.peaks.len(), 2);
        assert_eq!(report.verdict, Verdict::GoWithAromatic);
        let fits = report.fits.unwrap();
        assert_eq!(fits.len(), 2);
        assert!(fits.iter().all(|f| f.is_some()));
    }

    #[test]
    fn test_batch_output_path() {
        let path = batch_output_path(Path::new("/data/run1/go_01.csv"), Path::new("/out"));
        assert_eq!(path, PathBuf::from("/out/go_01_peaks.csv"));
    }

    #[test]
    fn test_rerun_does_not_collect_own_outputs() {
        let dir = std::env::temp_dir().join(format!("ftirkit_{}_rerun", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("go.csv");
        fs::write(&input, "1000,0.1\n1001,0.2\n").unwrap();
        fs::write(batch_output_path(&input, &dir), "x,y\n1000,0.1\n").unwrap();

        let files = FileCollector::new(dir.clone())
            .with_pattern("*.csv,*.txt,*.dat,*.xy")
            .unwrap()
            .skip_stem_suffix(OUTPUT_SUFFIX)
            .collect();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(files, vec![input]);
    }
}
