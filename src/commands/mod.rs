//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! 每个命令显式传递“当前光谱”：读取 → 预处理 → （可选）基线校正 → 检测 → 拟合，
//! 每一步都返回新的 `Spectrum`，不存在全局状态。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `signal/`, `ftir/`, `utils/`
//! - 子模块: peaks, fit, baseline, transform, bands

pub mod bands;
pub mod baseline;
pub mod fit;
pub mod peaks;
pub mod transform;

use crate::cli::common::PreprocessArgs;
use crate::cli::Commands;
use crate::error::Result;
use crate::ftir::bands::{band_ranges, BANDS};
use crate::models::Spectrum;
use crate::parsers;
use crate::signal::correct_baseline;

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Peaks(args) => peaks::execute(args),
        Commands::Fit(args) => fit::execute(args),
        Commands::Baseline(args) => baseline::execute(args),
        Commands::Transform(args) => transform::execute(args),
        Commands::Bands => bands::execute(),
    }
}

/// 读取光谱并依次执行预处理与（可选）基线校正
pub fn load_spectrum(path: &Path, preprocess: &PreprocessArgs, baseline: bool) -> Result<Spectrum> {
    let raw = parsers::parse_spectrum_file(path)?;
    let spectrum = preprocess.to_preprocess().apply(&raw);
    Ok(if baseline {
        apply_band_baseline(&spectrum)
    } else {
        spectrum
    })
}

/// 以目标吸收带为排除区间做基线校正
pub fn apply_band_baseline(spectrum: &Spectrum) -> Spectrum {
    let correction = correct_baseline(&spectrum.samples, &band_ranges(&BANDS));
    log::info!(
        "Baseline removed using {} of {} points",
        correction.fitted_points,
        spectrum.len()
    );
    spectrum.with_samples(correction.corrected)
}
