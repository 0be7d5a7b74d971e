//! # transform 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/transform.rs`

use super::common::{PreprocessArgs, SpectrumFormat};
use crate::signal::smoothing::DEFAULT_RESIDUAL_WINDOW;

use clap::Args;
use std::path::PathBuf;

/// transform 子命令参数
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Input spectrum file
    pub input: PathBuf,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<SpectrumFormat>,

    /// Replace y by y - moving average over this window in cm-1 (default 100)
    #[arg(long, num_args = 0..=1)]
    pub residual: Option<Option<f64>>,

    /// Apply quadratic baseline correction (target bands excluded)
    #[arg(long, default_value_t = false)]
    pub baseline: bool,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

impl TransformArgs {
    /// 残差窗口；只给出 `--residual` 时取默认窗口
    pub fn residual_window(&self) -> Option<f64> {
        self.residual
            .map(|w| w.unwrap_or(DEFAULT_RESIDUAL_WINDOW))
    }
}
