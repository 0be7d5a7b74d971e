//! # 信号处理模块
//!
//! 与领域无关的一维数值处理：平滑、导数、匹配滤波、基线校正。
//! 所有函数都是对输入切片的纯函数，不保存任何状态。
//!
//! ## 子模块
//! - `linalg`: 二次正规方程 3×3 求解
//! - `smoothing`: x 距离滑动平均、Savitzky–Golay、残差信号
//! - `derivative`: 非均匀网格一阶/二阶导数
//! - `matched`: 高斯匹配滤波
//! - `baseline`: 二次多项式基线校正
//!
//! ## 依赖关系
//! - 被 `ftir/`, `models/spectrum.rs`, `commands/` 使用
//! - 使用 `models/spectrum.rs` 的 Sample

pub mod baseline;
pub mod derivative;
pub mod linalg;
pub mod matched;
pub mod smoothing;

pub use baseline::{correct_baseline, BaselineCorrection};
