//! # FTIR 分析模块
//!
//! 在 `signal/` 的通用数值处理之上实现面向 FTIR 的分析流程：
//! 峰检测、目标吸收带匹配与结论、单峰峰形估计和结果导出。
//!
//! ## 子模块
//! - `detector`: 稳健检测器与导数 + 匹配滤波检测器
//! - `bands`: GO/石墨烯吸收带目录、匹配与结论判定
//! - `fit`: Gauss / Lorentz 峰形估计
//! - `export`: CSV / XY 导出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `signal/` 和 `models/`

pub mod bands;
pub mod detector;
pub mod export;
pub mod fit;

pub use bands::{decide_verdict, match_bands, top_picks, BandMatch, TopPicks, Verdict, BANDS};
pub use detector::{detect_peaks, DetectionMode, DetectorConfig};
pub use fit::{fit_peaks, DEFAULT_FIT_WINDOW};
