//! # 光谱数据模型
//!
//! 定义一维光谱 (波数, 强度) 的统一表示以及预处理步骤。
//!
//! 光谱一旦构造就不再原地修改：任何变换（归一化、反转 x、平滑、基线校正）
//! 都返回新的 `Spectrum`，由调用方显式替换“当前光谱”。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `signal/`, `ftir/`, `commands/` 使用
//! - 使用 `signal/smoothing.rs` 的 Savitzky–Golay 平滑

use crate::signal::smoothing;

use serde::{Deserialize, Serialize};

/// 单个采样点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 波数 (cm⁻¹)
    pub x: f64,
    /// 强度（任意单位）
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Sample { x, y }
    }
}

/// 光谱
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spectrum {
    /// 光谱名称（通常取自文件名）
    pub name: String,

    /// 采样点序列
    pub samples: Vec<Sample>,
}

impl Spectrum {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Spectrum {
            name: name.into(),
            samples,
        }
    }

    /// 用新的采样序列替换，保留名称
    pub fn with_samples(&self, samples: Vec<Sample>) -> Self {
        Spectrum {
            name: self.name.clone(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// x 范围 (min, max)
    pub fn x_extent(&self) -> (f64, f64) {
        extent(self.samples.iter().map(|s| s.x))
    }
}

/// 拆分出 x 序列
pub fn xs(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.x).collect()
}

/// 拆分出 y 序列
pub fn ys(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.y).collect()
}

/// 由 x、y 序列重新组合
pub fn zip_samples(x: &[f64], y: &[f64]) -> Vec<Sample> {
    x.iter().zip(y).map(|(&x, &y)| Sample { x, y }).collect()
}

/// 稳定排序（相同 x 保持原有顺序）
pub fn sort_by_x(samples: &[Sample]) -> Vec<Sample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    sorted
}

/// 判断是否已按 x 非降序排列
pub fn is_sorted_by_x(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].x <= w[1].x)
}

/// 序列的 (min, max)；空序列返回 (+inf, -inf)
pub fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// y 线性缩放到 [0, 1]；常数序列时跨度按 1 处理
pub fn normalize_y(samples: &[Sample]) -> Vec<Sample> {
    let (min_y, max_y) = extent(samples.iter().map(|s| s.y));
    let span = if max_y - min_y != 0.0 { max_y - min_y } else { 1.0 };
    samples
        .iter()
        .map(|s| Sample::new(s.x, (s.y - min_y) / span))
        .collect()
}

/// x 轴镜像 (x' = max + min - x)，并重新排序
pub fn invert_x(samples: &[Sample]) -> Vec<Sample> {
    let (min_x, max_x) = extent(samples.iter().map(|s| s.x));
    let mirrored: Vec<Sample> = samples
        .iter()
        .map(|s| Sample::new(max_x + min_x - s.x, s.y))
        .collect();
    sort_by_x(&mirrored)
}

/// 显示前预处理选项
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocess {
    /// y 归一化到 [0, 1]
    pub normalize: bool,
    /// 反转 x 轴
    pub invert_x: bool,
    /// 平滑等级（0 = 不平滑）
    pub smooth_level: usize,
}

impl Preprocess {
    /// 平滑等级对应的 Savitzky–Golay 窗口（奇数）
    pub fn smoothing_window(&self) -> usize {
        2 * (self.smooth_level / 2) + 3
    }

    /// 依次执行：归一化 → 反转/排序 → 平滑
    pub fn apply(&self, spectrum: &Spectrum) -> Spectrum {
        let mut data = spectrum.samples.clone();

        if self.normalize {
            data = normalize_y(&data);
        }

        data = if self.invert_x {
            invert_x(&data)
        } else {
            sort_by_x(&data)
        };

        if self.smooth_level > 0 && data.len() > 5 {
            let y = ys(&data);
            let smoothed = smoothing::savitzky_golay(&y, self.smoothing_window());
            data = zip_samples(&xs(&data), &smoothed);
        }

        spectrum.with_samples(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(points: &[(f64, f64)]) -> Spectrum {
        Spectrum::new(
            "test",
            points.iter().map(|&(x, y)| Sample::new(x, y)).collect(),
        )
    }

    #[test]
    fn test_normalize_y() {
        let s = spectrum(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let n = normalize_y(&s.samples);
        assert_eq!(ys(&n), vec![0.0, 0.5, 1.0]);

        // 常数序列不应产生 NaN
        let flat = spectrum(&[(1.0, 3.0), (2.0, 3.0)]);
        let n = normalize_y(&flat.samples);
        assert_eq!(ys(&n), vec![0.0, 0.0]);
    }

    #[test]
    fn test_invert_x_mirrors_and_sorts() {
        let s = spectrum(&[(400.0, 1.0), (500.0, 2.0), (1000.0, 3.0)]);
        let inv = invert_x(&s.samples);
        assert_eq!(xs(&inv), vec![400.0, 900.0, 1000.0]);
        assert_eq!(ys(&inv), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_preprocess_sorts_unsorted_input() {
        let s = spectrum(&[(3.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        let out = Preprocess::default().apply(&s);
        assert!(is_sorted_by_x(&out.samples));
        assert_eq!(out.name, "test");
    }

    #[test]
    fn test_smoothing_window_is_odd() {
        for level in 0..10 {
            let p = Preprocess {
                smooth_level: level,
                ..Default::default()
            };
            assert_eq!(p.smoothing_window() % 2, 1);
        }
    }
}
