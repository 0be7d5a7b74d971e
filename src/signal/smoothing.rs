//! # 平滑
//!
//! - `smooth_by_x`: 按 x 距离取窗口的滑动平均，适用于非均匀采样
//! - `savitzky_golay`: 按点数取窗口的局部二次回归
//! - `residual_signal`: 原始信号减去宽窗口平滑，只保留尖锐特征
//!
//! ## 依赖关系
//! - 被 `models/spectrum.rs`, `ftir/detector` 使用
//! - 使用 `signal/linalg.rs` 的二次正规方程

use crate::models::spectrum::{xs, ys, zip_samples, Sample};
use crate::signal::linalg::QuadraticSums;

/// Savitzky–Golay 允许的最大窗口
pub const SG_MAX_WINDOW: usize = 51;

/// Savitzky–Golay 奇异判据
const SG_MIN_DET: f64 = 1e-12;

/// 残差信号默认窗口 (cm⁻¹)
pub const DEFAULT_RESIDUAL_WINDOW: f64 = 100.0;

/// x 距离窗口滑动平均
///
/// `out[i]` 为所有满足 `|x[j] - x[i]| <= window/2` 的 `y[j]` 的均值。
/// 要求 `x` 已升序；从 `i` 向两侧扫描，遇到第一个窗口外的点即停止。
pub fn smooth_by_x(x: &[f64], y: &[f64], window: f64) -> Vec<f64> {
    let n = y.len();
    let half = window / 2.0;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let x0 = x[i] - half;
        let x1 = x[i] + half;
        let mut sum = 0.0;
        let mut count = 0usize;

        for j in (0..=i).rev() {
            if x[j] < x0 {
                break;
            }
            sum += y[j];
            count += 1;
        }
        for j in i + 1..n {
            if x[j] > x1 {
                break;
            }
            sum += y[j];
            count += 1;
        }

        out.push(if count > 0 { sum / count as f64 } else { y[i] });
    }

    out
}

/// Savitzky–Golay 二次平滑
///
/// `window` 必须为奇数且在 `3..=51` 内，否则原样返回。
/// 边缘处窗口截断为可用的点。
pub fn savitzky_golay(y: &[f64], window: usize) -> Vec<f64> {
    if window < 3 || window % 2 == 0 || window > SG_MAX_WINDOW {
        return y.to_vec();
    }

    let n = y.len();
    let half = (window - 1) / 2;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let i0 = i.saturating_sub(half);
        let i1 = (i + half).min(n - 1);

        let mut sums = QuadraticSums::new();
        for (j, &yj) in y.iter().enumerate().take(i1 + 1).skip(i0) {
            sums.add(j as f64 - i as f64, yj);
        }

        // 奇异时退化为窗口均值
        let value = match sums.solve(SG_MIN_DET) {
            Some([a, _, _]) => a,
            None => sums.ty[0] / sums.count(),
        };
        out.push(value);
    }

    out
}

/// 残差信号：y - smooth_by_x(y, window)
pub fn residual_signal(samples: &[Sample], window: f64) -> Vec<Sample> {
    let x = xs(samples);
    let y = ys(samples);
    let smooth = smooth_by_x(&x, &y, window);
    let resid: Vec<f64> = y.iter().zip(&smooth).map(|(yi, si)| yi - si).collect();
    zip_samples(&x, &resid)
}
