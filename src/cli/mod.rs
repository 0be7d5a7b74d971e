//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `peaks`: 峰检测、吸收带匹配与结论（支持目录批量）
//! - `fit`: 检测后逐峰 Gauss / Lorentz 估计
//! - `baseline`: 二次多项式基线校正
//! - `transform`: 归一化 / 反转 x / 平滑 / 残差信号
//! - `bands`: 打印目标吸收带目录
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, peaks, baseline, transform

pub mod baseline;
pub mod common;
pub mod peaks;
pub mod transform;

use clap::{Parser, Subcommand};

/// ftirkit - FTIR 光谱分析工具
#[derive(Parser)]
#[command(name = "ftirkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "FTIR spectrum analysis: baseline, peak detection, band matching and peak fitting", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Detect peaks, match target bands and print a verdict (file or directory)
    Peaks(peaks::PeaksArgs),

    /// Detect peaks and estimate a Gaussian or Lorentzian shape for each
    Fit(peaks::FitArgs),

    /// Quadratic baseline correction with band exclusion
    Baseline(baseline::BaselineArgs),

    /// Normalize, invert x, smooth or compute the residual signal
    Transform(transform::TransformArgs),

    /// Print the catalog of target bands
    Bands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_peaks_with_overrides() {
        let cli = Cli::try_parse_from([
            "ftirkit",
            "peaks",
            "sample.csv",
            "--mode",
            "robust",
            "--range",
            "400-4000",
            "--min-prominence",
            "0.05",
            "--smooth",
            "4",
            "--fit",
        ])
        .unwrap();

        let Commands::Peaks(args) = cli.command else {
            panic!("expected peaks subcommand");
        };
        assert!(args.fit);
        assert_eq!(args.preprocess.smooth, 4);
        let config = args.detect.to_config().unwrap();
        assert_eq!(config.mode, crate::ftir::DetectionMode::Robust);
        assert_eq!(config.x_range, Some((400.0, 4000.0)));
        assert_eq!(config.min_prominence, Some(0.05));
    }

    #[test]
    fn test_parse_negative_curvature() {
        let cli = Cli::try_parse_from(["ftirkit", "fit", "s.csv", "--curvature", "-0.01"]).unwrap();
        let Commands::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.detect.curvature, Some(-0.01));
    }

    #[test]
    fn test_residual_default_window() {
        let cli = Cli::try_parse_from(["ftirkit", "transform", "s.csv", "-o", "out.xy", "--residual"])
            .unwrap();
        let Commands::Transform(args) = cli.command else {
            panic!("expected transform subcommand");
        };
        assert_eq!(
            args.residual_window(),
            Some(crate::signal::smoothing::DEFAULT_RESIDUAL_WINDOW)
        );

        let cli = Cli::try_parse_from([
            "ftirkit", "transform", "s.csv", "-o", "out.xy", "--residual", "40",
        ])
        .unwrap();
        let Commands::Transform(args) = cli.command else {
            panic!("expected transform subcommand");
        };
        assert_eq!(args.residual_window(), Some(40.0));
    }
}
