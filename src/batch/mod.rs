//! # 批量处理模块
//!
//! 对目录中的光谱文件逐个执行完整的分析流水线。
//!
//! ## 功能
//! - 收集匹配文件列表（glob 模式，可递归）
//! - 固定大小线程池并行处理
//! - 进度反馈与成功/跳过/失败统计
//!
//! ## 依赖关系
//! - 被 `commands/peaks.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
