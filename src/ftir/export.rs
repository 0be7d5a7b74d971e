//! # 分析结果导出
//!
//! ## 支持格式
//! - CSV: 光谱 (x, y)、基线校正明细、峰列表、拟合结果
//! - XY: 带 `#` 注释头的两列文本
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/` 的 Spectrum, Peak, FitResult
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{FtirError, Result};
use crate::models::{FitResult, Peak, Spectrum};
use crate::signal::BaselineCorrection;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_error(path: &Path, e: std::io::Error) -> FtirError {
    FtirError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    }
}

/// 光谱导出为 CSV
pub fn spectrum_to_csv(spectrum: &Spectrum, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["x", "y"])?;
    for s in &spectrum.samples {
        wtr.write_record(&[format!("{:.6}", s.x), format!("{:.8e}", s.y)])?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

/// 光谱导出为 XY 文本
pub fn spectrum_to_xy(spectrum: &Spectrum, description: &str, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| write_error(output_path, e))?;
    let mut out = BufWriter::new(file);

    let write_all = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(out, "# Spectrum: {}", spectrum.name)?;
        writeln!(out, "# Processing: {}", description)?;
        writeln!(out, "# Columns: wavenumber (cm-1), intensity (a.u.)")?;
        writeln!(out, "#")?;
        for s in &spectrum.samples {
            writeln!(out, "{:.6}\t{:.8e}", s.x, s.y)?;
        }
        out.flush()
    };

    write_all(&mut out).map_err(|e| write_error(output_path, e))
}

/// 基线校正明细导出为 CSV：x, 原始 y, 基线, 校正后 y
pub fn baseline_to_csv(
    original: &Spectrum,
    correction: &BaselineCorrection,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["x", "y", "baseline", "corrected"])?;
    for ((s, b), c) in original
        .samples
        .iter()
        .zip(&correction.baseline)
        .zip(&correction.corrected)
    {
        wtr.write_record(&[
            format!("{:.6}", s.x),
            format!("{:.8e}", s.y),
            format!("{:.8e}", b),
            format!("{:.8e}", c.y),
        ])?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

/// 峰列表导出为 CSV，可附带拟合结果列
pub fn peaks_to_csv(
    peaks: &[Peak],
    fits: Option<&[Option<FitResult>]>,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["x", "y", "prominence", "width", "index"];
    if fits.is_some() {
        header.extend(["fit_kind", "fit_pos", "fit_height", "fit_fwhm", "fit_area"]);
    }
    wtr.write_record(&header)?;

    for (i, peak) in peaks.iter().enumerate() {
        let mut record = vec![
            format!("{:.4}", peak.x),
            format!("{:.6e}", peak.y),
            format!("{:.5}", peak.prominence),
            format!("{:.3}", peak.width),
            peak.index.to_string(),
        ];
        if let Some(fits) = fits {
            match fits.get(i).copied().flatten() {
                Some(fit) => record.extend([
                    fit.kind.to_string(),
                    format!("{:.4}", fit.pos),
                    format!("{:.6e}", fit.height),
                    format!("{:.4}", fit.fwhm),
                    format!("{:.6e}", fit.area),
                ]),
                None => record.extend(std::iter::repeat(String::new()).take(5)),
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

/// 拟合结果导出为 CSV（跳过无法拟合的峰）
pub fn fits_to_csv(peaks: &[Peak], fits: &[Option<FitResult>], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["peak_x", "kind", "pos", "height", "fwhm", "area"])?;
    for (peak, fit) in peaks.iter().zip(fits) {
        let Some(fit) = fit else { continue };
        wtr.write_record(&[
            format!("{:.4}", peak.x),
            fit.kind.to_string(),
            format!("{:.4}", fit.pos),
            format!("{:.6e}", fit.height),
            format!("{:.4}", fit.fwhm),
            format!("{:.6e}", fit.area),
        ])?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sample, ShapeKind};
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ftirkit_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_peaks_csv_with_partial_fits() {
        let peaks = vec![
            Peak {
                x: 1720.0,
                y: 0.5,
                prominence: 0.05,
                width: 30.0,
                index: 10,
            },
            Peak {
                x: 1600.0,
                y: 0.4,
                prominence: 0.03,
                width: 20.0,
                index: 5,
            },
        ];
        let fits = vec![
            Some(FitResult {
                kind: ShapeKind::Gauss,
                pos: 1720.0,
                height: 0.5,
                fwhm: 20.0,
                area: 10.6,
            }),
            None,
        ];

        let path = temp_path("peaks.csv");
        peaks_to_csv(&peaks, Some(&fits), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("x,y,prominence,width,index,fit_kind"));
        assert!(lines[1].contains("Gauss"));
        assert!(lines[2].ends_with(",,,,"));
    }

    #[test]
    fn test_baseline_csv_columns() {
        let samples: Vec<Sample> = (0..30)
            .map(|i| Sample::new(1000.0 + i as f64, 1.0 + 0.01 * i as f64))
            .collect();
        let spectrum = Spectrum::new("s", samples.clone());
        let correction = crate::signal::correct_baseline(&samples, &[]);

        let path = temp_path("baseline.csv");
        baseline_to_csv(&spectrum, &correction, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(content.lines().next(), Some("x,y,baseline,corrected"));
        assert_eq!(content.lines().count(), 31);
    }

    #[test]
    fn test_spectrum_xy_header() {
        let spectrum = Spectrum::new("go_sample", vec![Sample::new(400.0, 0.1)]);
        let path = temp_path("spectrum.xy");
        spectrum_to_xy(&spectrum, "baseline corrected", &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(content.starts_with("# Spectrum: go_sample"));
        assert_eq!(content.lines().filter(|l| !l.starts_with('#')).count(), 1);
    }
}
