//! # 稳健检测器（突出度/宽度）
//!
//! ## 算法概述
//! 1. 分析范围内相邻点间距的中位数作为典型步长
//! 2. 平滑窗口 = 每峰点数 × 步长（每峰点数默认 `max(7, ⌊n·0.002⌋)`）
//! 3. x 距离平滑后归一化到 [0, 1]
//! 4. 一阶导数由正转非正处为候选峰
//! 5. 向两侧走到谷底，计算突出度与宽度
//! 6. 按突出度/宽度阈值过滤，再按下标距离做非极大值抑制
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
use crate::signal::derivative::derivative1;
use crate::signal::matched::normalize01;
use crate::signal::smoothing::smooth_by_x;

use log::debug;

/// 自动突出度阈值 = 该系数 × 候选突出度均值
pub const AUTO_PROMINENCE_FACTOR: f64 = 0.6;

/// 自动突出度阈值下限
pub const MIN_AUTO_PROMINENCE: f64 = 0.008;

/// 默认最小宽度 (cm⁻¹)
pub const DEFAULT_MIN_WIDTH: f64 = 8.0;

/// 中位数（空序列为 0）
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let m = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[m]
    } else {
        0.5 * (sorted[m - 1] + sorted[m])
    }
}

/// 稳健检测
pub fn detect(samples: &[Sample], config: &DetectorConfig) -> Vec<Peak> {
    let Some(data) = prepare(samples, config.x_range) else {
        return Vec::new();
    };
    let (x, y, mask) = (&data.x, &data.y, &data.mask);
    let n = y.len();

    let gaps: Vec<f64> = (1..n)
        .filter(|&i| mask[i] && mask[i - 1])
        .map(|i| (x[i] - x[i - 1]).abs())
        .collect();
    let dx_median = median(&gaps).max(1e-9);

    let points_per_peak = config
        .points_per_peak
        .unwrap_or_else(|| (7.0_f64).max((n as f64 * 0.002).floor()));
    let window = points_per_peak * dx_median;

    let ys = smooth_by_x(x, y, window);
    let yn = normalize01(&ys);
    let dy = derivative1(x, &yn);

    let mut candidates = Vec::new();
    for i in 1..n - 1 {
        if !mask[i] || !is_zero_crossing(&dy, i) {
            continue;
        }
        let (prominence, width) = walk_valleys(x, &yn, i);
        candidates.push(Candidate {
            x: x[i],
            y: ys[i],
            prominence,
            width,
            index: i,
        });
    }

    let min_prominence = config.min_prominence.unwrap_or_else(|| {
        MIN_AUTO_PROMINENCE.max(AUTO_PROMINENCE_FACTOR * mean_prominence(&candidates))
    });
    let min_distance = config
        .min_distance
        .unwrap_or_else(|| 5.max(points_per_peak.floor() as usize));
    let min_width = config.min_width.unwrap_or(DEFAULT_MIN_WIDTH);

    debug!(
        "robust: n={} dx_median={:.4} window={:.3} candidates={} min_prom={:.4} min_dist={} min_width={}",
        n,
        dx_median,
        window,
        candidates.len(),
        min_prominence,
        min_distance,
        min_width
    );

    let filtered: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.prominence >= min_prominence && c.width >= min_width)
        .collect();

    suppress(filtered, |kept, cand| {
        kept.index.abs_diff(cand.index) >= min_distance
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{gauss, synth};
    use super::*;
    use crate::ftir::detector::{detect_peaks, DetectionMode};

    fn robust() -> DetectorConfig {
        DetectorConfig::new(DetectionMode::Robust)
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_single_gaussian_bump() {
        let samples = synth(1000.0, 2000.0, 1.0, |x| gauss(x, 1500.0, 1.0, 20.0));
        let peaks = detect_peaks(&samples, &robust());

        assert_eq!(peaks.len(), 1, "peaks: {:?}", peaks);
        let p = &peaks[0];
        assert!((p.x - 1500.0).abs() <= 1.0, "x = {}", p.x);
        assert!((p.prominence - 1.0).abs() < 0.02, "prom = {}", p.prominence);
        assert_eq!(samples[p.index].x, p.x);
    }

    #[test]
    fn test_unsorted_input_is_sorted_internally() {
        let mut samples = synth(1000.0, 2000.0, 1.0, |x| gauss(x, 1500.0, 1.0, 20.0));
        samples.reverse();
        let peaks = detect_peaks(&samples, &robust());
        assert_eq!(peaks.len(), 1);
        assert!((peaks[0].x - 1500.0).abs() <= 1.0);
    }

    #[test]
    fn test_two_peaks_sorted_by_x() {
        let samples = synth(1000.0, 2000.0, 1.0, |x| {
            gauss(x, 1700.0, 0.6, 20.0) + gauss(x, 1200.0, 1.0, 25.0)
        });
        let peaks = detect_peaks(&samples, &robust());
        assert_eq!(peaks.len(), 2);
        assert!((peaks[0].x - 1200.0).abs() <= 1.0);
        assert!((peaks[1].x - 1700.0).abs() <= 1.0);
    }

    #[test]
    fn test_x_range_excludes_peak() {
        let samples = synth(1000.0, 2000.0, 1.0, |x| gauss(x, 1500.0, 1.0, 20.0));
        let config = DetectorConfig {
            x_range: Some((1600.0, 2000.0)),
            ..robust()
        };
        assert!(detect_peaks(&samples, &config).is_empty());
    }

    #[test]
    fn test_min_width_override_filters() {
        let samples = synth(1000.0, 2000.0, 1.0, |x| gauss(x, 1500.0, 1.0, 20.0));
        let config = DetectorConfig {
            min_width: Some(5000.0),
            ..robust()
        };
        assert!(detect_peaks(&samples, &config).is_empty());
    }

    #[test]
    fn test_repeated_detection_is_identical() {
        let samples = synth(400.0, 4000.0, 1.93, |x| {
            gauss(x, 1720.0, 0.4, 30.0)
                + gauss(x, 3400.0, 1.0, 250.0)
                + 0.01 * (x / 37.0).sin()
        });
        let first = detect_peaks(&samples, &robust());
        let second = detect_peaks(&samples, &robust());
        assert_eq!(first, second);
    }
}
