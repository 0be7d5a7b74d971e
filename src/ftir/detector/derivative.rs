//! # 导数 + 匹配滤波检测器
//!
//! 与稳健检测器共用谷底搜索与突出度/宽度定义，但候选峰还需要：
//! - 过零点处曲率低于阈值（默认 -0.002）
//! - 匹配滤波响应不低于阈值（默认 0.25，目标 FWHM 默认 18）
//!
//! 非极大值抑制按 x 距离进行（默认 `max(6, 0.6·FWHM)`）。
//!
//! ## 依赖关系
//! - 被 `ftir/detector/mod.rs` 分派
//! - 使用 `signal/smoothing.rs`, `signal/derivative.rs`, `signal/matched.rs`

use super::{
    is_zero_crossing, mean_prominence, prepare, suppress, walk_valleys, Candidate,
    DetectorConfig,
};
use crate::models::spectrum::Sample;
use crate::models::Peak;
use crate::signal::derivative::{derivative1, derivative2};
use crate::signal::matched::{matched_filter, normalize01};
use crate::signal::smoothing::smooth_by_x;

use log::debug;

/// 默认预平滑窗口 (cm⁻¹)
pub const DEFAULT_PRE_SMOOTH: f64 = 12.0;

/// 默认目标 FWHM (cm⁻¹)
pub const DEFAULT_TARGET_FWHM: f64 = 18.0;

/// 默认曲率阈值
pub const DEFAULT_CURVATURE: f64 = -0.002;

/// 默认匹配滤波响应阈值
pub const DEFAULT_MF_THRESHOLD: f64 = 0.25;

/// 默认最小宽度 (cm⁻¹)
pub const DEFAULT_MIN_WIDTH: f64 = 6.0;

/// 自动突出度阈值 = 该系数 × 候选突出度均值
pub const AUTO_PROMINENCE_FACTOR: f64 = 0.5;

/// 自动突出度阈值下限
pub const MIN_AUTO_PROMINENCE: f64 = 0.006;

/// 导数 + 匹配滤波检测
pub fn detect(samples: &[Sample], config: &DetectorConfig) -> Vec<Peak> {
    let Some(data) = prepare(samples, config.x_range) else {
        return Vec::new();
    };
    let (x, y, mask) = (&data.x, &data.y, &data.mask);
    let n = y.len();

    let pre_smooth = config.pre_smooth.unwrap_or(DEFAULT_PRE_SMOOTH);
    let ys = smooth_by_x(x, y, pre_smooth);

    let yn = normalize01(&ys);
    let dy = derivative1(x, &yn);
    let d2 = derivative2(x, &yn);

    let fwhm = config.target_fwhm.unwrap_or(DEFAULT_TARGET_FWHM);
    let mf = matched_filter(x, &yn, fwhm);

    let curvature = config.curvature_threshold.unwrap_or(DEFAULT_CURVATURE);
    let mf_threshold = config.mf_threshold.unwrap_or(DEFAULT_MF_THRESHOLD);
    let min_width = config.min_width.unwrap_or(DEFAULT_MIN_WIDTH);

    let mut candidates = Vec::new();
    for i in 1..n - 1 {
        if !mask[i] || !is_zero_crossing(&dy, i) {
            continue;
        }
        if d2[i] >= curvature || mf[i] < mf_threshold {
            continue;
        }
        let (prominence, width) = walk_valleys(x, &yn, i);
        if width >= min_width {
            candidates.push(Candidate {
                x: x[i],
                y: ys[i],
                prominence,
                width,
                index: i,
            });
        }
    }

    let min_prominence = config.min_prominence.unwrap_or_else(|| {
        MIN_AUTO_PROMINENCE.max(AUTO_PROMINENCE_FACTOR * mean_prominence(&candidates))
    });
    let min_separation = config
        .min_separation
        .unwrap_or_else(|| (6.0_f64).max(0.6 * fwhm));

    debug!(
        "deriv: n={} pre_smooth={} fwhm={} candidates={} min_prom={:.4} min_sep={:.2}",
        n,
        pre_smooth,
        fwhm,
        candidates.len(),
        min_prominence,
        min_separation
    );

    let filtered: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.prominence >= min_prominence)
        .collect();

    suppress(filtered, |kept, cand| {
        (kept.x - cand.x).abs() >= min_separation
    })
}
