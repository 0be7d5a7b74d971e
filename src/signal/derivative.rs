//! # 非均匀网格上的离散导数
//!
//! ## 依赖关系
//! - 被 `ftir/detector` 使用
//! - 无外部模块依赖

/// 防止重复 x 导致除零
pub const EPS: f64 = 1e-12;

/// 一阶导数（后向差分），`dy[0] = 0`
pub fn derivative1(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = y.len();
    let mut dy = vec![0.0; n];
    for i in 1..n {
        let dx = (x[i] - x[i - 1]).max(EPS);
        dy[i] = (y[i] - y[i - 1]) / dx;
    }
    dy
}

/// 二阶导数（中心差分，除以两侧间距的平均），两端为 0
pub fn derivative2(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = y.len();
    let mut d2 = vec![0.0; n];
    for i in 1..n.saturating_sub(1) {
        let dx1 = (x[i] - x[i - 1]).max(EPS);
        let dx2 = (x[i + 1] - x[i]).max(EPS);
        let left = (y[i] - y[i - 1]) / dx1;
        let right = (y[i + 1] - y[i]) / dx2;
        d2[i] = (right - left) / (0.5 * (dx1 + dx2));
    }
    d2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivative1_non_uniform() {
        let x = vec![0.0, 1.0, 3.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let dy = derivative1(&x, &y);
        assert_eq!(dy[0], 0.0);
        for v in &dy[1..] {
            assert!((v - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_derivative2_of_parabola() {
        let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        let d2 = derivative2(&x, &y);
        assert_eq!(d2[0], 0.0);
        assert_eq!(d2[9], 0.0);
        for v in &d2[1..9] {
            assert!((v - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_duplicate_x_is_finite() {
        let x = vec![1.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        assert!(derivative1(&x, &y).iter().all(|v| v.is_finite()));
        assert!(derivative2(&x, &y).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_short_inputs() {
        assert!(derivative1(&[], &[]).is_empty());
        assert_eq!(derivative2(&[1.0], &[1.0]), vec![0.0]);
    }
}
