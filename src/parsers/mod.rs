//! # 解析器模块
//!
//! 读取仪器导出的两列光谱文本。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: xy

pub mod xy;

use crate::error::{FtirError, Result};
use crate::models::Spectrum;
use std::path::Path;

/// 支持的输入扩展名
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "txt", "dat", "xy"];

/// 解析光谱文件
///
/// 所有支持的扩展名共用同一个分隔符宽松的两列解析器；
/// 未知扩展名同样尝试解析，但会记录一条警告日志。
pub fn parse_spectrum_file(path: &Path) -> Result<Spectrum> {
    if !path.exists() {
        return Err(FtirError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        log::warn!(
            "Unrecognized extension for '{}', parsing as two-column text",
            path.display()
        );
    }

    let spectrum = xy::parse_xy_file(path)?;
    log::info!(
        "Loaded '{}': {} samples",
        spectrum.name,
        spectrum.len()
    );
    Ok(spectrum)
}
