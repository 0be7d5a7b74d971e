//! # 峰检测器
//!
//! 两种可互换的检测策略，输出相同的 `Peak` 结构，下游与检测器无关：
//! - `robust`: 基于突出度/宽度，x 距离平滑 + 一阶导数过零
//! - `derivative`: 导数 + 匹配滤波，对小而窄的峰敏感
//!
//! 调用方传入的数值覆盖项先经过 `DetectorConfig::sanitized`，
//! 非有限或越界的值被丢弃并回落到默认值，不会进入数值计算。
//!
//! ## 依赖关系
//! - 被 `commands/peaks.rs`, `commands/fit.rs` 调用
//! - 使用 `signal/` 的平滑、导数、匹配滤波
//! - 使用 `models/` 的 Sample, Peak

pub mod derivative;
pub mod robust;

use crate::models::spectrum::{is_sorted_by_x, sort_by_x, Sample};
use crate::models::Peak;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// 检测所需的最少点数
pub const MIN_SAMPLES: usize = 5;

/// 检测模式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionMode {
    /// Robust (prominence / width)
    Robust,
    /// Derivatives + matched filter (small-peak sensitive)
    #[default]
    Deriv,
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::Robust => write!(f, "robust"),
            DetectionMode::Deriv => write!(f, "deriv"),
        }
    }
}

/// 检测参数。`None` 表示使用该模式的自动/默认值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorConfig {
    pub mode: DetectionMode,
    /// 分析的 x 范围（闭区间）；默认整条光谱
    pub x_range: Option<(f64, f64)>,
    /// 最小突出度（归一化）
    pub min_prominence: Option<f64>,
    /// 峰之间最小下标距离（robust）
    pub min_distance: Option<usize>,
    /// 最小宽度 (cm⁻¹)
    pub min_width: Option<f64>,
    /// 每峰点数，决定平滑窗口（robust）
    pub points_per_peak: Option<f64>,
    /// 匹配滤波目标 FWHM（deriv）
    pub target_fwhm: Option<f64>,
    /// 预平滑窗口 (cm⁻¹, deriv)
    pub pre_smooth: Option<f64>,
    /// 曲率阈值（deriv，负值）
    pub curvature_threshold: Option<f64>,
    /// 匹配滤波响应阈值（deriv）
    pub mf_threshold: Option<f64>,
    /// 峰之间最小 x 间隔 (cm⁻¹, deriv)
    pub min_separation: Option<f64>,
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

impl DetectorConfig {
    pub fn new(mode: DetectionMode) -> Self {
        DetectorConfig {
            mode,
            ..Default::default()
        }
    }

    /// 丢弃非法覆盖项
    pub fn sanitized(&self) -> Self {
        DetectorConfig {
            mode: self.mode,
            x_range: self
                .x_range
                .filter(|(lo, hi)| lo.is_finite() && hi.is_finite() && hi > lo),
            min_prominence: positive(self.min_prominence),
            min_distance: self.min_distance.filter(|d| *d > 0),
            min_width: positive(self.min_width),
            points_per_peak: self.points_per_peak.filter(|p| p.is_finite() && *p > 3.0),
            target_fwhm: self.target_fwhm.filter(|f| f.is_finite() && *f > 2.0),
            pre_smooth: positive(self.pre_smooth),
            curvature_threshold: finite(self.curvature_threshold),
            mf_threshold: finite(self.mf_threshold),
            min_separation: positive(self.min_separation),
        }
    }
}

/// 按模式分派检测
pub fn detect_peaks(samples: &[Sample], config: &DetectorConfig) -> Vec<Peak> {
    let config = config.sanitized();
    match config.mode {
        DetectionMode::Robust => robust::detect(samples, &config),
        DetectionMode::Deriv => derivative::detect(samples, &config),
    }
}

// ─────────────────────────────────────────────────────────────
// 两种检测器共用的步骤
// ─────────────────────────────────────────────────────────────

/// 排序后的输入及分析范围掩码
struct Prepared {
    x: Vec<f64>,
    y: Vec<f64>,
    mask: Vec<bool>,
}

/// 排序、拆分并计算范围掩码；点数不足时返回 None
fn prepare(samples: &[Sample], x_range: Option<(f64, f64)>) -> Option<Prepared> {
    if samples.len() < MIN_SAMPLES {
        return None;
    }

    let samples: Cow<'_, [Sample]> = if is_sorted_by_x(samples) {
        Cow::Borrowed(samples)
    } else {
        Cow::Owned(sort_by_x(samples))
    };

    let x: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let y: Vec<f64> = samples.iter().map(|s| s.y).collect();

    let (lo, hi) = x_range.unwrap_or_else(|| {
        let lo = x.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    });
    let mask: Vec<bool> = x.iter().map(|&v| v >= lo && v <= hi).collect();

    if mask.iter().filter(|m| **m).count() < MIN_SAMPLES {
        return None;
    }

    Some(Prepared { x, y, mask })
}

/// 候选峰
#[derive(Debug, Clone)]
struct Candidate {
    x: f64,
    y: f64,
    prominence: f64,
    width: f64,
    index: usize,
}

impl Candidate {
    fn into_peak(self) -> Peak {
        Peak {
            x: self.x,
            y: self.y,
            prominence: self.prominence,
            width: self.width,
            index: self.index,
        }
    }
}

/// 一阶导数由正转非正
fn is_zero_crossing(dy: &[f64], i: usize) -> bool {
    dy[i - 1] > 0.0 && dy[i] <= 0.0
}

/// 从峰 i 向两侧走到谷底，返回 (突出度, 宽度)
fn walk_valleys(x: &[f64], yn: &[f64], i: usize) -> (f64, f64) {
    let n = yn.len();
    let mut l = i - 1;
    let mut r = i + 1;
    while l > 0 && yn[l - 1] <= yn[l] {
        l -= 1;
    }
    while r < n - 1 && yn[r + 1] <= yn[r] {
        r += 1;
    }
    let base = yn[l].max(yn[r]);
    (yn[i] - base, (x[r] - x[l]).abs())
}

fn mean_prominence(candidates: &[Candidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.prominence).sum::<f64>() / candidates.len() as f64
}

/// 非极大值抑制：按突出度降序贪心保留，`far_enough(kept, cand)` 对所有已保留峰成立才保留。
/// 结果按 x 升序。
fn suppress<F>(mut candidates: Vec<Candidate>, far_enough: F) -> Vec<Peak>
where
    F: Fn(&Candidate, &Candidate) -> bool,
{
    candidates.sort_by(|a, b| b.prominence.total_cmp(&a.prominence));

    let mut kept: Vec<Candidate> = Vec::new();
    for cand in candidates {
        if kept.iter().all(|k| far_enough(k, &cand)) {
            kept.push(cand);
        }
    }

    kept.sort_by(|a, b| a.x.total_cmp(&b.x));
    kept.into_iter().map(Candidate::into_peak).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Sample;

    /// 高斯峰，FWHM 换算为 σ
    pub fn gauss(x: f64, center: f64, height: f64, fwhm: f64) -> f64 {
        let sigma = fwhm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());
        height * (-0.5 * ((x - center) / sigma).powi(2)).exp()
    }

    /// 均匀网格上的合成光谱
    pub fn synth<F: Fn(f64) -> f64>(x0: f64, x1: f64, step: f64, f: F) -> Vec<Sample> {
        let n = ((x1 - x0) / step).round() as usize;
        (0..=n)
            .map(|i| {
                let x = x0 + step * i as f64;
                Sample::new(x, f(x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_rejects_invalid_overrides() {
        let config = DetectorConfig {
            mode: DetectionMode::Robust,
            x_range: Some((4000.0, 400.0)),
            min_prominence: Some(f64::NAN),
            min_distance: Some(0),
            min_width: Some(-3.0),
            points_per_peak: Some(2.0),
            target_fwhm: Some(f64::INFINITY),
            pre_smooth: Some(0.0),
            curvature_threshold: Some(-0.01),
            mf_threshold: Some(f64::NAN),
            min_separation: Some(12.0),
        }
        .sanitized();

        assert_eq!(config.x_range, None);
        assert_eq!(config.min_prominence, None);
        assert_eq!(config.min_distance, None);
        assert_eq!(config.min_width, None);
        assert_eq!(config.points_per_peak, None);
        assert_eq!(config.target_fwhm, None);
        assert_eq!(config.pre_smooth, None);
        assert_eq!(config.curvature_threshold, Some(-0.01));
        assert_eq!(config.mf_threshold, None);
        assert_eq!(config.min_separation, Some(12.0));
    }

    #[test]
    fn test_too_few_samples() {
        let samples: Vec<Sample> = (0..4).map(|i| Sample::new(i as f64, 1.0)).collect();
        for mode in [DetectionMode::Robust, DetectionMode::Deriv] {
            assert!(detect_peaks(&samples, &DetectorConfig::new(mode)).is_empty());
        }
    }

    #[test]
    fn test_walk_valleys() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let yn = vec![0.2, 0.1, 0.5, 1.0, 0.6, 0.3, 0.4];
        let (prom, width) = walk_valleys(&x, &yn, 3);
        assert!((prom - 0.7).abs() < 1e-12);
        assert_eq!(width, 4.0);
    }

    #[test]
    fn test_suppress_keeps_most_prominent() {
        let c = |x: f64, prominence: f64, index: usize| Candidate {
            x,
            y: 0.0,
            prominence,
            width: 10.0,
            index,
        };
        let peaks = suppress(
            vec![c(10.0, 0.2, 10), c(12.0, 0.5, 12), c(30.0, 0.1, 30)],
            |k, p| k.index.abs_diff(p.index) >= 5,
        );
        let xs: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![12.0, 30.0]);
    }
}
