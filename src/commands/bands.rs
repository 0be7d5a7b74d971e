//! # bands 子命令实现
//!
//! 打印目标吸收带目录及判定阈值。
//!
//! ## 依赖关系
//! - 使用 `ftir/bands.rs`

use crate::error::Result;
use crate::ftir::bands::{BandClass, BANDS, GO_MIN_PROMINENCE, SP2_MIN_PROMINENCE};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    name: &'static str,
    #[tabled(rename = "Range (cm-1)")]
    range: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Min prominence")]
    threshold: String,
}

/// 打印吸收带目录
pub fn execute() -> Result<()> {
    output::print_header("Target Bands (GO / graphene)");

    let rows: Vec<BandRow> = BANDS
        .iter()
        .map(|b| BandRow {
            name: b.name,
            range: format!("{:.0}-{:.0}", b.range.0, b.range.1),
            class: b.class.to_string(),
            threshold: format!(
                "{:.2}",
                match b.class {
                    BandClass::Go => GO_MIN_PROMINENCE,
                    BandClass::Sp2 => SP2_MIN_PROMINENCE,
                }
            ),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}
