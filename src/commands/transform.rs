//! # transform 子命令实现
//!
//! 预处理后可选基线校正与残差信号，结果写出为 CSV 或 XY。
//!
//! ## 依赖关系
//! - 使用 `cli/transform.rs` 定义的 TransformArgs
//! - 使用 `signal/smoothing.rs`, `ftir/export.rs`

use super::load_spectrum;
use crate::cli::common::{guess_format_from_extension, SpectrumFormat};
use crate::cli::transform::TransformArgs;
use crate::error::{FtirError, Result};
use crate::ftir::export;
use crate::signal::smoothing::residual_signal;
use crate::utils::output;

/// 处理步骤描述，写入 XY 文件头
fn describe(args: &TransformArgs) -> String {
    let pre = &args.preprocess;
    let mut steps = Vec::new();
    if pre.normalize {
        steps.push("normalize".to_string());
    }
    if pre.invert_x {
        steps.push("invert-x".to_string());
    }
    if pre.smooth > 0 {
        steps.push(format!("savitzky-golay level {}", pre.smooth));
    }
    if args.baseline {
        steps.push("baseline".to_string());
    }
    if let Some(w) = args.residual_window() {
        steps.push(format!("residual window {}", w));
    }
    if steps.is_empty() {
        "none".to_string()
    } else {
        steps.join(", ")
    }
}

/// 执行光谱变换
pub fn execute(args: TransformArgs) -> Result<()> {
    output::print_header("Spectrum Transform");

    let residual = args.residual_window();
    if let Some(w) = residual {
        if !w.is_finite() || w <= 0.0 {
            return Err(FtirError::InvalidArgument(format!(
                "residual window must be a positive number, got {}",
                w
            )));
        }
    }

    let mut spectrum = load_spectrum(&args.input, &args.preprocess, args.baseline)?;
    output::print_success(&format!(
        "Loaded spectrum: {} ({} points)",
        spectrum.name,
        spectrum.len()
    ));

    if let Some(w) = residual {
        spectrum = spectrum.with_samples(residual_signal(&spectrum.samples, w));
    }

    let description = describe(&args);
    output::print_info(&format!("Processing: {}", description));

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));
    match format {
        SpectrumFormat::Csv => export::spectrum_to_csv(&spectrum, &args.output)?,
        SpectrumFormat::Xy => export::spectrum_to_xy(&spectrum, &description, &args.output)?,
    }

    output::print_success(&format!("Spectrum saved to '{}'", args.output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::PreprocessArgs;
    use std::path::PathBuf;

    #[test]
    fn test_describe_steps() {
        let args = TransformArgs {
            input: PathBuf::from("in.csv"),
            output: PathBuf::from("out.xy"),
            format: None,
            residual: Some(None),
            baseline: false,
            preprocess: PreprocessArgs {
                normalize: true,
                invert_x: false,
                smooth: 2,
            },
        };
        assert_eq!(
            describe(&args),
            "normalize, savitzky-golay level 2, residual window 100"
        );
    }
}
