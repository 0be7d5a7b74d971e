//! # ftirkit - FTIR 光谱分析工具
//!
//! 读取两列 FTIR 光谱文本，完成平滑、基线校正、峰检测、
//! 氧化石墨烯/石墨烯目标吸收带匹配与结论、单峰峰形估计。
//!
//! ## 子命令
//! - `peaks`     - 峰检测 + 吸收带匹配 + 结论（单文件或目录批量）
//! - `fit`       - 逐峰 Gauss / Lorentz 估计
//! - `baseline`  - 二次多项式基线校正
//! - `transform` - 归一化 / 反转 x / 平滑 / 残差信号
//! - `bands`     - 打印目标吸收带目录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (光谱文本解析)
//!   │     ├── ftir/      (检测、吸收带、拟合、导出)
//!   │     ├── signal/    (平滑、导数、匹配滤波、基线)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出与进度条)
//!   └── error.rs    (错误处理)
//! ```
//!
//! 诊断日志由 `RUST_LOG` 控制，例如 `RUST_LOG=debug ftirkit peaks sample.csv`。

mod batch;
mod cli;
mod commands;
mod error;
mod ftir;
mod models;
mod parsers;
mod signal;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
