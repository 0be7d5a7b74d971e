//! # 数据模型模块
//!
//! 定义光谱、峰和拟合结果的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `signal/`, `ftir/` 和 `commands/` 使用
//! - 子模块: spectrum, peak

pub mod peak;
pub mod spectrum;

pub use peak::{FitResult, Peak, ShapeKind};
pub use spectrum::{Preprocess, Sample, Spectrum};
