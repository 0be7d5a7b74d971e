//! # 二次多项式基线校正
//!
//! 对不落在任何排除区间（通常是已知吸收带）内的点做 `y = a + b·x + c·x²`
//! 最小二乘拟合，返回校正后的光谱、基线曲线以及系数。
//!
//! 回归在中心化、缩放后的坐标 `t = (x - m) / s` 上求解，再换算回原始 x 的系数：
//! 波数量级 (10³) 的 x⁴ 累加会让原始正规方程严重病态。
//!
//! ## 依赖关系
//! - 被 `commands/baseline.rs`, `commands/mod.rs` 调用
//! - 使用 `signal/linalg.rs` 的二次正规方程

use crate::models::spectrum::Sample;
use crate::signal::linalg::{eval_quadratic, QuadraticSums};

use log::debug;
use serde::Serialize;

/// 排除后至少保留的点数，不足时用全部点拟合
pub const MIN_FIT_POINTS: usize = 20;

/// 奇异判据
const MIN_DET: f64 = 1e-14;

/// 基线校正结果
#[derive(Debug, Clone, Serialize)]
pub struct BaselineCorrection {
    /// y - baseline(x)
    pub corrected: Vec<Sample>,
    /// 基线在每个 x 处的取值
    pub baseline: Vec<f64>,
    /// [a, b, c]，对应 a + b·x + c·x²
    pub coeffs: [f64; 3],
    /// 参与拟合的点数
    pub fitted_points: usize,
}

/// x 是否落在任一闭区间内
pub fn in_any_range(x: f64, ranges: &[(f64, f64)]) -> bool {
    ranges.iter().any(|&(lo, hi)| x >= lo && x <= hi)
}

/// 二次多项式最小二乘拟合；奇异时返回全零系数
pub fn poly_fit2(points: &[(f64, f64)]) -> [f64; 3] {
    if points.is_empty() {
        return [0.0; 3];
    }

    let n = points.len() as f64;
    let mean = points.iter().map(|p| p.0).sum::<f64>() / n;
    let scale = points
        .iter()
        .map(|p| (p.0 - mean).abs())
        .fold(0.0_f64, f64::max);
    let scale = if scale > 0.0 { scale } else { 1.0 };

    let mut sums = QuadraticSums::new();
    for &(x, y) in points {
        sums.add((x - mean) / scale, y);
    }

    let Some([p, q, r]) = sums.solve(MIN_DET) else {
        debug!("baseline regression is singular ({} points)", points.len());
        return [0.0; 3];
    };

    // p + q·t + r·t², t = (x - m)/s  →  a + b·x + c·x²
    let c = r / (scale * scale);
    let b = q / scale - 2.0 * c * mean;
    let a = p - q * mean / scale + c * mean * mean;
    [a, b, c]
}

/// 基线校正
pub fn correct_baseline(samples: &[Sample], exclusions: &[(f64, f64)]) -> BaselineCorrection {
    let kept: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| !in_any_range(s.x, exclusions))
        .map(|s| (s.x, s.y))
        .collect();

    let used: Vec<(f64, f64)> = if kept.len() >= MIN_FIT_POINTS {
        kept
    } else {
        debug!(
            "only {} points outside exclusions, fitting all {} points",
            kept.len(),
            samples.len()
        );
        samples.iter().map(|s| (s.x, s.y)).collect()
    };

    let coeffs = poly_fit2(&used);
    debug!(
        "baseline coefficients a={:.6e} b={:.6e} c={:.6e}",
        coeffs[0], coeffs[1], coeffs[2]
    );

    let baseline: Vec<f64> = samples
        .iter()
        .map(|s| eval_quadratic(&coeffs, s.x))
        .collect();
    let corrected = samples
        .iter()
        .zip(&baseline)
        .map(|(s, b)| Sample::new(s.x, s.y - b))
        .collect();

    BaselineCorrection {
        corrected,
        baseline,
        coeffs,
        fitted_points: used.len(),
    }
}
