//! # 目标吸收带匹配与结论判定
//!
//! 面向氧化石墨烯 (GO) / 石墨烯的固定吸收带目录。每个吸收带选出落在其范围内
//! 突出度最大的峰，再根据两个布尔判据给出四种固定结论之一。
//!
//! ## 依赖关系
//! - 被 `commands/peaks.rs`, `commands/bands.rs` 使用
//! - 使用 `models/peak.rs` 的 Peak
//! - 使用 `ftir/detector` 的 DetectionMode（显示策略）

use crate::ftir::detector::DetectionMode;
use crate::models::Peak;

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// 吸收带类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandClass {
    /// 含氧官能团（氧化石墨烯）
    Go,
    /// sp² 芳香碳
    Sp2,
}

impl fmt::Display for BandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandClass::Go => write!(f, "GO"),
            BandClass::Sp2 => write!(f, "sp2"),
        }
    }
}

/// 吸收带
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub name: &'static str,
    /// 闭区间 [low, high] (cm⁻¹)
    pub range: (f64, f64),
    pub class: BandClass,
}

impl Band {
    pub fn contains(&self, x: f64) -> bool {
        x >= self.range.0 && x <= self.range.1
    }
}

/// GO/石墨烯目标吸收带
pub const BANDS: [Band; 7] = [
    Band {
        name: "O–H (ancho)",
        range: (3200.0, 3550.0),
        class: BandClass::Go,
    },
    Band {
        name: "O–H ácido",
        range: (2500.0, 3300.0),
        class: BandClass::Go,
    },
    Band {
        name: "C=O (carbonilo)",
        range: (1700.0, 1750.0),
        class: BandClass::Go,
    },
    Band {
        name: "Aromático C=C",
        range: (1580.0, 1620.0),
        class: BandClass::Sp2,
    },
    Band {
        name: "C–O (fenólico)",
        range: (1220.0, 1260.0),
        class: BandClass::Go,
    },
    Band {
        name: "Epoxi C–O–C",
        range: (1050.0, 1150.0),
        class: BandClass::Go,
    },
    Band {
        name: "C–H aromático",
        range: (3050.0, 3100.0),
        class: BandClass::Sp2,
    },
];

/// 吸收带区间列表（用作基线排除区间）
pub fn band_ranges(catalog: &[Band]) -> Vec<(f64, f64)> {
    catalog.iter().map(|b| b.range).collect()
}

/// GO 类吸收带判定为存在的最小突出度
pub const GO_MIN_PROMINENCE: f64 = 0.03;

/// sp2 类吸收带判定为存在的最小突出度
pub const SP2_MIN_PROMINENCE: f64 = 0.02;

/// 单个吸收带的匹配结果
#[derive(Debug, Clone, PartialEq)]
pub struct BandMatch {
    pub band: Band,
    pub hit: Option<Peak>,
}

/// 为每个吸收带选出范围内突出度最大的峰（并列时取先出现者）
pub fn match_bands(peaks: &[Peak], catalog: &[Band]) -> Vec<BandMatch> {
    catalog
        .iter()
        .map(|band| {
            let hit = peaks
                .iter()
                .filter(|p| band.contains(p.x))
                .fold(None::<&Peak>, |best, p| match best {
                    Some(b) if p.prominence <= b.prominence => Some(b),
                    _ => Some(p),
                })
                .cloned();
            BandMatch { band: *band, hit }
        })
        .collect()
}

/// 结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// 含氧带与芳香带都存在
    GoWithAromatic,
    /// 仅含氧带
    GoOnly,
    /// 仅芳香带
    Sp2Only,
    /// 都不存在
    Indeterminate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::GoWithAromatic => {
                "GO (oxygenated) present; evaluate rGO if C=O/C–O/epoxy decrease after reduction"
            }
            Verdict::GoOnly => "GO (oxygenated) with detectable O–H/C=O/C–O/epoxy",
            Verdict::Sp2Only => {
                "Graphene/graphite with little functionalization (oxygenated bands absent or weak in FTIR)"
            }
            Verdict::Indeterminate => "Indeterminate by FTIR; confirm with Raman/XPS",
        };
        write!(f, "{}", text)
    }
}

fn class_present(matches: &[BandMatch], class: BandClass, min_prominence: f64) -> bool {
    matches.iter().any(|m| {
        m.band.class == class && m.hit.as_ref().is_some_and(|p| p.prominence >= min_prominence)
    })
}

/// 由匹配结果判定结论（纯函数）
pub fn decide_verdict(matches: &[BandMatch]) -> Verdict {
    let has_go = class_present(matches, BandClass::Go, GO_MIN_PROMINENCE);
    let has_sp2 = class_present(matches, BandClass::Sp2, SP2_MIN_PROMINENCE);

    match (has_go, has_sp2) {
        (true, true) => Verdict::GoWithAromatic,
        (true, false) => Verdict::GoOnly,
        (false, true) => Verdict::Sp2Only,
        (false, false) => Verdict::Indeterminate,
    }
}

/// “主要峰”列表的显示策略
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum TopPicks {
    /// In-band peaks first in deriv mode, all peaks in robust mode
    #[default]
    Auto,
    /// Prefer peaks inside a target band
    InBand,
    /// All peaks in x order
    All,
}

/// 选出展示用的主要峰，返回 (在 `peaks` 中的下标, 峰)；偏好带内峰但带内为空时回落到全部峰
pub fn top_picks<'a>(
    peaks: &'a [Peak],
    catalog: &[Band],
    policy: TopPicks,
    mode: DetectionMode,
    limit: usize,
) -> Vec<(usize, &'a Peak)> {
    let prefer_in_band = match policy {
        TopPicks::Auto => mode == DetectionMode::Deriv,
        TopPicks::InBand => true,
        TopPicks::All => false,
    };

    let in_band: Vec<(usize, &Peak)> = peaks
        .iter()
        .enumerate()
        .filter(|(_, p)| catalog.iter().any(|b| b.contains(p.x)))
        .collect();

    let source: Vec<(usize, &Peak)> = if prefer_in_band && !in_band.is_empty() {
        in_band
    } else {
        peaks.iter().enumerate().collect()
    };

    source.into_iter().take(limit).collect()
}
