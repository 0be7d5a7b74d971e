//! # 峰与峰形拟合结果数据模型
//!
//! ## 依赖关系
//! - 被 `ftir/detector`, `ftir/bands.rs`, `ftir/fit.rs`, `ftir/export.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;

/// 检测到的吸收峰
///
/// 每次检测都会重新生成，跨次运行不具有身份。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// 峰位 (cm⁻¹)
    pub x: f64,
    /// 峰位处的平滑后强度（归一化之前）
    pub y: f64,
    /// 突出度，基于 [0, 1] 归一化强度
    pub prominence: f64,
    /// 左右谷之间的 x 距离 (cm⁻¹)
    pub width: f64,
    /// 在检测所用序列中的下标
    pub index: usize,
}

/// 峰形模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Gauss,
    Lorentz,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Gauss => write!(f, "Gauss"),
            ShapeKind::Lorentz => write!(f, "Lorentz"),
        }
    }
}

/// 单峰拟合结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// 选中的峰形
    pub kind: ShapeKind,
    /// 峰位 (cm⁻¹)
    pub pos: f64,
    /// 峰高
    pub height: f64,
    /// 半高全宽 (cm⁻¹)
    pub fwhm: f64,
    /// 积分面积
    pub area: f64,
}
