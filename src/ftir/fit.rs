//! # 单峰峰形估计（Gauss / Lorentz）
//!
//! 在峰附近截取窗口（默认 40 cm⁻¹，即 ±20），由窗口最大值与半高交点得到
//! 位置、高度、FWHM 的初值，分别给出闭式的 Gauss 与 Lorentz 参数，
//! 选残差平方和较小的模型。一次性、非迭代、完全确定。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs`, `commands/peaks.rs` 调用
//! - 使用 `models/` 的 Sample, Peak, FitResult
//! - 使用 `signal/matched.rs` 的 FWHM/σ 换算与高斯核

use crate::models::spectrum::Sample;
use crate::models::{FitResult, Peak, ShapeKind};
use crate::signal::matched::{fwhm_to_sigma, gaussian_kernel};

use std::f64::consts::PI;

/// 默认拟合窗口宽度 (cm⁻¹)
pub const DEFAULT_FIT_WINDOW: f64 = 40.0;

/// 窗口内至少需要的点数
pub const MIN_WINDOW_SAMPLES: usize = 7;

/// 宽度参数下限
const MIN_WIDTH: f64 = 1e-6;

/// 初值：位置、高度、FWHM
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakGuess {
    pub pos: f64,
    pub height: f64,
    pub fwhm: f64,
}

/// 由窗口数据估计初值
///
/// 高度取窗口最大值（并列取首个），FWHM 取从左、从右各自第一个达到半高的点之间的距离。
pub fn initial_guess(xs: &[f64], ys: &[f64]) -> PeakGuess {
    let (i_max, height) = ys
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        });
    let pos = xs[i_max];
    let half = height * 0.5;

    let left = xs
        .iter()
        .zip(ys)
        .find(|(_, y)| **y >= half)
        .map_or(pos, |(&x, _)| x);
    let right = xs
        .iter()
        .zip(ys)
        .rev()
        .find(|(_, y)| **y >= half)
        .map_or(pos, |(&x, _)| x);

    PeakGuess {
        pos,
        height,
        fwhm: (right - left).max(MIN_WIDTH),
    }
}

/// 闭式 Gauss 参数
pub fn gaussian_from_guess(guess: &PeakGuess) -> FitResult {
    let sigma = fwhm_to_sigma(guess.fwhm).max(MIN_WIDTH);
    FitResult {
        kind: ShapeKind::Gauss,
        pos: guess.pos,
        height: guess.height,
        fwhm: 2.0 * (2.0 * std::f64::consts::LN_2).sqrt() * sigma,
        area: guess.height * sigma * (2.0 * PI).sqrt(),
    }
}

/// 闭式 Lorentz 参数
pub fn lorentz_from_guess(guess: &PeakGuess) -> FitResult {
    let gamma = (guess.fwhm / 2.0).max(MIN_WIDTH);
    FitResult {
        kind: ShapeKind::Lorentz,
        pos: guess.pos,
        height: guess.height,
        fwhm: 2.0 * gamma,
        area: PI * guess.height * gamma,
    }
}

/// 模型在 x 处的取值
pub fn evaluate(fit: &FitResult, x: f64) -> f64 {
    match fit.kind {
        ShapeKind::Gauss => fit.height * gaussian_kernel(x, fit.pos, fwhm_to_sigma(fit.fwhm)),
        ShapeKind::Lorentz => {
            let gamma = fit.fwhm / 2.0;
            let z = (x - fit.pos) / gamma;
            fit.height / (1.0 + z * z)
        }
    }
}

/// 残差平方和
pub fn sse(fit: &FitResult, xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let r = y - evaluate(fit, x);
            r * r
        })
        .sum()
}

/// 拟合单个峰；窗口内点数不足时返回 None
pub fn fit_peak(samples: &[Sample], peak: &Peak, window: f64) -> Option<FitResult> {
    let x0 = peak.x - window / 2.0;
    let x1 = peak.x + window / 2.0;

    let (xs, ys): (Vec<f64>, Vec<f64>) = samples
        .iter()
        .filter(|s| s.x >= x0 && s.x <= x1)
        .map(|s| (s.x, s.y))
        .unzip();

    if xs.len() < MIN_WINDOW_SAMPLES {
        return None;
    }

    let guess = initial_guess(&xs, &ys);
    let gauss = gaussian_from_guess(&guess);
    let lorentz = lorentz_from_guess(&guess);

    if sse(&gauss, &xs, &ys) <= sse(&lorentz, &xs, &ys) {
        Some(gauss)
    } else {
        Some(lorentz)
    }
}

/// 批量拟合，结果与输入峰一一对应
pub fn fit_peaks(samples: &[Sample], peaks: &[Peak], window: f64) -> Vec<Option<FitResult>> {
    let window = if window.is_finite() && window > 0.0 {
        window
    } else {
        DEFAULT_FIT_WINDOW
    };
    peaks.iter().map(|p| fit_peak(samples, p, window)).collect()
}
