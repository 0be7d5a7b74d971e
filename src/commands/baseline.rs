//! # baseline 子命令实现
//!
//! 二次多项式基线校正，默认排除全部目标吸收带。
//!
//! ## 依赖关系
//! - 使用 `cli/baseline.rs` 定义的 BaselineArgs
//! - 使用 `signal/baseline.rs`, `ftir/bands.rs`, `ftir/export.rs`

use super::load_spectrum;
use crate::cli::baseline::BaselineArgs;
use crate::cli::common::{guess_format_from_extension, parse_ranges, SpectrumFormat};
use crate::error::Result;
use crate::ftir::bands::{band_ranges, BANDS};
use crate::ftir::export;
use crate::signal::correct_baseline;
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 默认输出路径：`<stem>_baseline.csv`，与输入同目录
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("spectrum");
    input.with_file_name(format!("{}_baseline.csv", stem))
}

/// 执行基线校正
pub fn execute(args: BaselineArgs) -> Result<()> {
    output::print_header("Quadratic Baseline Correction");

    let mut exclusions = if args.no_exclude_bands {
        Vec::new()
    } else {
        band_ranges(&BANDS)
    };
    if let Some(ref extra) = args.exclude {
        exclusions.extend(parse_ranges(extra)?);
    }

    let spectrum = load_spectrum(&args.input, &args.preprocess, false)?;
    output::print_success(&format!(
        "Loaded spectrum: {} ({} points)",
        spectrum.name,
        spectrum.len()
    ));
    output::print_info(&format!("Excluding {} ranges from the fit", exclusions.len()));

    let correction = correct_baseline(&spectrum.samples, &exclusions);
    let [a, b, c] = correction.coeffs;
    output::print_info(&format!(
        "Baseline: y = {:.6e} + {:.6e}·x + {:.6e}·x² ({} points fitted)",
        a, b, c, correction.fitted_points
    ));

    let corrected = spectrum.with_samples(correction.corrected.clone());
    let path = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&path));

    match format {
        SpectrumFormat::Csv => export::spectrum_to_csv(&corrected, &path)?,
        SpectrumFormat::Xy => export::spectrum_to_xy(&corrected, "quadratic baseline removed", &path)?,
    }
    output::print_success(&format!("Corrected spectrum saved to '{}'", path.display()));

    if let Some(ref details) = args.details {
        export::baseline_to_csv(&spectrum, &correction, details)?;
        output::print_success(&format!("Baseline details saved to '{}'", details.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/go.txt")),
            PathBuf::from("data/go_baseline.csv")
        );
    }
}
