//! # 共享参数定义
//!
//! 多个子命令共用的预处理参数与检测参数，通过 `#[command(flatten)]` 嵌入。
//!
//! ## 依赖关系
//! - 被 `cli/peaks.rs`, `cli/baseline.rs`, `cli/transform.rs` 使用
//! - 转换为 `models::Preprocess` 与 `ftir::DetectorConfig`

use crate::error::{FtirError, Result};
use crate::ftir::{DetectionMode, DetectorConfig, TopPicks};
use crate::models::Preprocess;

use clap::{Args, ValueEnum};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────
// 预处理
// ─────────────────────────────────────────────────────────────

/// 预处理参数
#[derive(Args, Debug, Clone, Default)]
pub struct PreprocessArgs {
    /// Normalize intensity to [0, 1]
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Mirror the x axis (x -> max + min - x)
    #[arg(long, default_value_t = false)]
    pub invert_x: bool,

    /// Savitzky-Golay smoothing level (0 = off, window = 2*floor(level/2)+3)
    #[arg(long, default_value_t = 0)]
    pub smooth: usize,
}

impl PreprocessArgs {
    pub fn to_preprocess(&self) -> Preprocess {
        Preprocess {
            normalize: self.normalize,
            invert_x: self.invert_x,
            smooth_level: self.smooth,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 峰检测
// ─────────────────────────────────────────────────────────────

/// 峰检测参数；未给出的项使用所选模式的默认值
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Detection mode
    #[arg(short, long, value_enum, default_value = "deriv", env = "FTIRKIT_MODE")]
    pub mode: DetectionMode,

    /// Analysis x range in cm-1 (e.g., "400-4000"); default whole spectrum
    #[arg(short, long)]
    pub range: Option<String>,

    /// Apply quadratic baseline correction (target bands excluded) before detection
    #[arg(long, default_value_t = false)]
    pub baseline: bool,

    /// Minimum prominence on the [0, 1] normalized scale (default: automatic)
    #[arg(long)]
    pub min_prominence: Option<f64>,

    /// Minimum index distance between peaks (robust mode)
    #[arg(long)]
    pub min_distance: Option<usize>,

    /// Minimum valley-to-valley width in cm-1
    #[arg(long)]
    pub min_width: Option<f64>,

    /// Points per peak, sets the smoothing window (robust mode, must be > 3)
    #[arg(long)]
    pub points_per_peak: Option<f64>,

    /// Target FWHM of the matched filter in cm-1 (deriv mode)
    #[arg(long)]
    pub fwhm: Option<f64>,

    /// Pre-smoothing window in cm-1 (deriv mode)
    #[arg(long)]
    pub pre_smooth: Option<f64>,

    /// Second-derivative threshold, negative (deriv mode)
    #[arg(long, allow_negative_numbers = true)]
    pub curvature: Option<f64>,

    /// Minimum matched-filter response (deriv mode)
    #[arg(long)]
    pub mf_threshold: Option<f64>,

    /// Minimum x separation between peaks in cm-1 (deriv mode)
    #[arg(long)]
    pub min_separation: Option<f64>,
}

impl DetectArgs {
    /// 转换为检测配置，范围字符串在此校验
    pub fn to_config(&self) -> Result<DetectorConfig> {
        let x_range = self.range.as_deref().map(parse_range).transpose()?;

        Ok(DetectorConfig {
            mode: self.mode,
            x_range,
            min_prominence: self.min_prominence,
            min_distance: self.min_distance,
            min_width: self.min_width,
            points_per_peak: self.points_per_peak,
            target_fwhm: self.fwhm,
            pre_smooth: self.pre_smooth,
            curvature_threshold: self.curvature,
            mf_threshold: self.mf_threshold,
            min_separation: self.min_separation,
        })
    }
}

/// 主要峰显示参数
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Which peaks to list as main peaks
    #[arg(long, value_enum, default_value = "auto")]
    pub top_picks: TopPicks,

    /// Number of main peaks to list
    #[arg(long, default_value_t = 12)]
    pub top_n: usize,
}

// ─────────────────────────────────────────────────────────────
// 输出格式
// ─────────────────────────────────────────────────────────────

/// 光谱输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SpectrumFormat {
    /// CSV with x,y header
    Csv,
    /// Tab separated text with '#' comment header
    Xy,
}

/// 从文件扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> SpectrumFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("xy") | Some("dat") | Some("txt") => SpectrumFormat::Xy,
        _ => SpectrumFormat::Csv,
    }
}

// ─────────────────────────────────────────────────────────────
// 范围解析
// ─────────────────────────────────────────────────────────────

fn range_regex() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| {
        let num = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
        Regex::new(&format!(r"^\s*({num})\s*-\s*({num})\s*$")).unwrap()
    })
}

/// 解析 "min-max" 范围；两端可带符号或指数，如 "-50-50"、"1e-3-5"
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let caps = range_regex()
        .captures(range)
        .ok_or_else(|| FtirError::InvalidRange(range.to_string()))?;

    let bound = |i: usize| -> Result<f64> {
        caps[i]
            .parse()
            .map_err(|_| FtirError::InvalidRange(range.to_string()))
    };
    let min = bound(1)?;
    let max = bound(2)?;

    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(FtirError::InvalidRange(format!(
            "{} (must be min < max)",
            range
        )));
    }

    Ok((min, max))
}

/// 解析逗号分隔的多个范围，如 "1700-1750,1050-1150"
pub fn parse_ranges(ranges: &str) -> Result<Vec<(f64, f64)>> {
    ranges
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_range)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("400-4000").unwrap(), (400.0, 4000.0));
        assert_eq!(parse_range(" 1050.5 - 1150 ").unwrap(), (1050.5, 1150.0));
        assert!(parse_range("4000-400").is_err());
        assert!(parse_range("400").is_err());
        assert!(parse_range("a-b").is_err());
    }

    #[test]
    fn test_parse_range_signed_and_exponent_bounds() {
        assert_eq!(parse_range("1e-3-5").unwrap(), (0.001, 5.0));
        assert_eq!(parse_range("-100-200").unwrap(), (-100.0, 200.0));
        assert_eq!(parse_range("-200--100").unwrap(), (-200.0, -100.0));
        assert_eq!(parse_range("1.5E3-4e3").unwrap(), (1500.0, 4000.0));
        assert!(parse_range("5-1e-3").is_err());
        assert!(parse_range("1e-3").is_err());
    }

    #[test]
    fn test_parse_ranges() {
        let ranges = parse_ranges("1700-1750, 1050-1150,").unwrap();
        assert_eq!(ranges, vec![(1700.0, 1750.0), (1050.0, 1150.0)]);
        assert!(parse_ranges("1700-1750,bad").is_err());
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format_from_extension(Path::new("a.XY")), SpectrumFormat::Xy);
        assert_eq!(guess_format_from_extension(Path::new("a.csv")), SpectrumFormat::Csv);
        assert_eq!(guess_format_from_extension(Path::new("a")), SpectrumFormat::Csv);
    }

    #[test]
    fn test_preprocess_conversion() {
        let args = PreprocessArgs {
            normalize: true,
            invert_x: false,
            smooth: 5,
        };
        let pre = args.to_preprocess();
        assert!(pre.normalize);
        assert_eq!(pre.smoothing_window(), 7);
    }
}
