//! # 高斯匹配滤波
//!
//! 在每个点上以 ±3σ 窗口做高斯核加权平均，σ 由目标 FWHM 换算，
//! 再将响应 min-max 归一化到 [0, 1]。宽度与目标 FWHM 相当的特征被保留，
//! 宽缓的基线趋势被压低，用于发现导数过零检测难以识别的小峰。
//!
//! ## 依赖关系
//! - 被 `ftir/detector/derivative.rs` 使用
//! - 无外部模块依赖

/// 每侧最多扫描的邻点数，限制最坏情况开销
pub const MAX_NEIGHBORS: usize = 400;

/// FWHM → σ 的换算因子 2√(2 ln 2)
pub fn fwhm_to_sigma(fwhm: f64) -> f64 {
    fwhm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt())
}

/// 高斯核
pub fn gaussian_kernel(x: f64, center: f64, sigma: f64) -> f64 {
    let z = (x - center) / sigma;
    (-0.5 * z * z).exp()
}

/// min-max 归一化到 [0, 1]，跨度下限 1e-12
pub fn normalize01(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(1e-12);
    values.iter().map(|v| (v - min) / span).collect()
}

/// 匹配滤波响应（已归一化）
pub fn matched_filter(x: &[f64], y: &[f64], fwhm: f64) -> Vec<f64> {
    let n = y.len();
    let sigma = fwhm_to_sigma(fwhm);
    let span = 3.0 * sigma;
    let mut resp = vec![0.0; n];

    for i in 0..n {
        let x0 = x[i] - span;
        let x1 = x[i] + span;
        let j0 = i.saturating_sub(MAX_NEIGHBORS);
        let j1 = (i + MAX_NEIGHBORS).min(n);

        let mut sum = 0.0;
        let mut weight = 0.0;
        for j in j0..j1 {
            if x[j] < x0 || x[j] > x1 {
                continue;
            }
            let k = gaussian_kernel(x[j], x[i], sigma);
            sum += y[j] * k;
            weight += k;
        }
        resp[i] = if weight > 0.0 { sum / weight } else { 0.0 };
    }

    normalize01(&resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fwhm_sigma() {
        assert!((fwhm_to_sigma(2.354820045) - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_response_range_and_peak_location() {
        let x: Vec<f64> = (0..400).map(|i| 1000.0 + i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&v| gaussian_kernel(v, 1200.0, fwhm_to_sigma(18.0)))
            .collect();
        let resp = matched_filter(&x, &y, 18.0);

        assert_eq!(resp.len(), x.len());
        assert!(resp.iter().all(|&r| (0.0..=1.0).contains(&r)));

        let imax = resp
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(x[imax], 1200.0);
    }

    #[test]
    fn test_constant_input_is_finite() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let resp = matched_filter(&x, &[1.0; 10], 5.0);
        assert!(resp.iter().all(|r| *r == 0.0));
    }

    #[test]
    fn test_neighbor_scan_is_capped() {
        // 2000 点全部落在 ±3σ 内，但每侧只扫描 MAX_NEIGHBORS 个点
        let n = 2000;
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
        let mut y = vec![0.0; n];
        y[0] = 1.0;
        assert!(3.0 * fwhm_to_sigma(20.0) > x[n - 1] - x[0]);

        let resp = matched_filter(&x, &y, 20.0);

        assert_eq!(resp.len(), n);
        assert!(resp.iter().all(|&r| (0.0..=1.0).contains(&r)));
        assert_eq!(resp[0], 1.0);
        assert!(resp[MAX_NEIGHBORS] > 0.0);
        assert_eq!(resp[MAX_NEIGHBORS + 1], 0.0);
        assert_eq!(resp[n - 1], 0.0);
    }
}
