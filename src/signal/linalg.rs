//! # 二次最小二乘求解
//!
//! Savitzky–Golay 平滑与基线校正共用的二次多项式正规方程：
//!
//! ```text
//! | S0 S1 S2 |   | a |   | Ty0 |
//! | S1 S2 S3 | · | b | = | Ty1 |
//! | S2 S3 S4 |   | c |   | Ty2 |
//! ```
//!
//! 其中 `Sk = Σ tᵏ`，`Tyk = Σ y·tᵏ`。使用显式 3×3 逆矩阵求解，
//! 行列式低于调用方给定阈值时视为奇异。
//!
//! ## 依赖关系
//! - 被 `signal/smoothing.rs`, `signal/baseline.rs` 使用
//! - 无外部模块依赖

/// 二次回归的累加矩
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticSums {
    /// S0..S4
    pub s: [f64; 5],
    /// Ty0..Ty2
    pub ty: [f64; 3],
}

impl QuadraticSums {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个点 (t, y)
    pub fn add(&mut self, t: f64, y: f64) {
        let t2 = t * t;
        self.s[0] += 1.0;
        self.s[1] += t;
        self.s[2] += t2;
        self.s[3] += t2 * t;
        self.s[4] += t2 * t2;
        self.ty[0] += y;
        self.ty[1] += y * t;
        self.ty[2] += y * t2;
    }

    /// 点数
    pub fn count(&self) -> f64 {
        self.s[0]
    }

    /// 正规方程系数矩阵
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let s = &self.s;
        [[s[0], s[1], s[2]], [s[1], s[2], s[3]], [s[2], s[3], s[4]]]
    }

    /// 求解 [a, b, c]；奇异时返回 None
    pub fn solve(&self, min_det: f64) -> Option<[f64; 3]> {
        solve3(&self.matrix(), &self.ty, min_det)
    }
}

/// 3×3 行列式
pub fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// 显式逆矩阵求解 A·v = b
pub fn solve3(m: &[[f64; 3]; 3], b: &[f64; 3], min_det: f64) -> Option<[f64; 3]> {
    let det = det3(m);
    if !det.is_finite() || det.abs() < min_det {
        return None;
    }

    let [[a00, a01, a02], [a10, a11, a12], [a20, a21, a22]] = *m;
    let inv = [
        [
            (a11 * a22 - a12 * a21) / det,
            (a02 * a21 - a01 * a22) / det,
            (a01 * a12 - a02 * a11) / det,
        ],
        [
            (a12 * a20 - a10 * a22) / det,
            (a00 * a22 - a02 * a20) / det,
            (a02 * a10 - a00 * a12) / det,
        ],
        [
            (a10 * a21 - a11 * a20) / det,
            (a01 * a20 - a00 * a21) / det,
            (a00 * a11 - a01 * a10) / det,
        ],
    ];

    Some([
        inv[0][0] * b[0] + inv[0][1] * b[1] + inv[0][2] * b[2],
        inv[1][0] * b[0] + inv[1][1] * b[1] + inv[1][2] * b[2],
        inv[2][0] * b[0] + inv[2][1] * b[1] + inv[2][2] * b[2],
    ])
}

/// 计算 a + b·t + c·t²
pub fn eval_quadratic(coeffs: &[f64; 3], t: f64) -> f64 {
    coeffs[0] + coeffs[1] * t + coeffs[2] * t * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_quadratic_recovered() {
        let mut sums = QuadraticSums::new();
        for i in -3..=3 {
            let t = i as f64;
            sums.add(t, 1.5 - 0.25 * t + 0.75 * t * t);
        }
        let c = sums.solve(1e-12).unwrap();
        assert!((c[0] - 1.5).abs() < 1e-10);
        assert!((c[1] + 0.25).abs() < 1e-10);
        assert!((c[2] - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_singular_system() {
        // 两个点无法确定二次曲线
        let mut sums = QuadraticSums::new();
        sums.add(0.0, 1.0);
        sums.add(1.0, 2.0);
        assert!(sums.solve(1e-12).is_none());
    }
}
