//! # peaks / fit 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/peaks.rs`, `commands/fit.rs`

use super::common::{DetectArgs, DisplayArgs, PreprocessArgs};
use crate::ftir::DEFAULT_FIT_WINDOW;

use clap::Args;
use std::path::PathBuf;

/// peaks 子命令参数
#[derive(Args, Debug)]
pub struct PeaksArgs {
    /// Input: spectrum file or directory containing spectrum files
    pub input: PathBuf,

    /// Output: peak CSV path (single mode) or directory (batch mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Add a Gaussian/Lorentzian shape estimate for each peak
    #[arg(long, default_value_t = false)]
    pub fit: bool,

    /// Fit window width in cm-1 (centered on the peak)
    #[arg(long, default_value_t = DEFAULT_FIT_WINDOW)]
    pub fit_window: f64,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    #[command(flatten)]
    pub detect: DetectArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.csv,*.txt")
    #[arg(long, default_value = "*.csv,*.txt,*.dat,*.xy")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0, env = "FTIRKIT_JOBS")]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// fit 子命令参数
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Input spectrum file
    pub input: PathBuf,

    /// Output CSV file for the fit results
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fit window width in cm-1 (centered on the peak)
    #[arg(short, long, default_value_t = DEFAULT_FIT_WINDOW)]
    pub window: f64,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    #[command(flatten)]
    pub detect: DetectArgs,
}
