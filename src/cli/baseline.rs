//! # baseline 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/baseline.rs`

use super::common::{PreprocessArgs, SpectrumFormat};

use clap::Args;
use std::path::PathBuf;

/// baseline 子命令参数
#[derive(Args, Debug)]
pub struct BaselineArgs {
    /// Input spectrum file
    pub input: PathBuf,

    /// Output file for the corrected spectrum (default: <stem>_baseline.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<SpectrumFormat>,

    /// Fit through all points instead of excluding the target bands
    #[arg(long, default_value_t = false)]
    pub no_exclude_bands: bool,

    /// Additional exclusion ranges in cm-1 (e.g., "2300-2400,1900-2000")
    #[arg(long)]
    pub exclude: Option<String>,

    /// Also write x, y, baseline and corrected columns (CSV) to this file
    #[arg(long)]
    pub details: Option<PathBuf>,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}
