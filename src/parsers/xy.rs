//! # 两列光谱文本解析器
//!
//! 解析 CSV / TXT / DAT / XY 格式的 FTIR 导出文件。
//!
//! ## 格式说明
//! ```text
//! wavenumber,absorbance      <- 非数字行被跳过
//! 4000.0,0.0123
//! 3998.07	0.0125             <- 制表符分隔
//! 3996.14 0.0127 0.0         <- 多余的列被忽略
//! ```
//!
//! 每行取前两个字段作为 (x, y)；字段不足两个或数值非有限的行被跳过。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/spectrum.rs`
//! - 使用 `regex` 切分字段

use crate::error::{FtirError, Result};
use crate::models::{Sample, Spectrum};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[,;\t ]+").unwrap())
}

/// 解析光谱文件
pub fn parse_xy_file(path: &Path) -> Result<Spectrum> {
    let content = fs::read_to_string(path).map_err(|e| FtirError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    let spectrum = parse_xy_content(&content, name);
    if spectrum.is_empty() {
        return Err(FtirError::EmptySpectrum {
            path: path.display().to_string(),
        });
    }
    Ok(spectrum)
}

/// 从字符串内容解析，保留文件中的点顺序
pub fn parse_xy_content(content: &str, name: &str) -> Spectrum {
    let samples = content.lines().filter_map(parse_line).collect();
    Spectrum::new(name, samples)
}

fn parse_line(line: &str) -> Option<Sample> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = separator().split(line).filter(|s| !s.is_empty());
    let x: f64 = fields.next()?.trim().parse().ok()?;
    let y: f64 = fields.next()?.trim().parse().ok()?;

    (x.is_finite() && y.is_finite()).then(|| Sample::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let content = "wavenumber,absorbance\n\
                       4000.0,0.10\n\
                       3998.0\t0.20\n\
                       3996.0 , 0.30\n\
                       \n\
                       3994.0 0.40 extra\n";
        let spectrum = parse_xy_content(content, "sample");

        assert_eq!(spectrum.name, "sample");
        assert_eq!(spectrum.len(), 4);
        assert_eq!(spectrum.samples[0], Sample::new(4000.0, 0.10));
        assert_eq!(spectrum.samples[2], Sample::new(3996.0, 0.30));
        assert_eq!(spectrum.samples[3], Sample::new(3994.0, 0.40));
    }

    #[test]
    fn test_skip_invalid_lines() {
        let content = "# exported\n1000,NaN\n1001,inf\n1002\nabc,1\n1003,0.5\n";
        let spectrum = parse_xy_content(content, "s");
        assert_eq!(spectrum.samples, vec![Sample::new(1003.0, 0.5)]);
    }

    #[test]
    fn test_crlf_and_scientific_notation() {
        let content = "1.5e3,2.0E-2\r\n1.6e3,3.0E-2\r\n";
        let spectrum = parse_xy_content(content, "s");
        assert_eq!(spectrum.len(), 2);
        assert_eq!(spectrum.samples[1], Sample::new(1600.0, 0.03));
    }

    #[test]
    fn test_empty_file_is_error() {
        let path = std::env::temp_dir().join(format!("ftirkit_{}_empty.csv", std::process::id()));
        fs::write(&path, "x,y\n").unwrap();
        let result = parse_xy_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(FtirError::EmptySpectrum { .. })));
    }
}
