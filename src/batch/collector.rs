//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的光谱文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多模式，不区分大小写）
//! - 递归目录搜索
//! - 按文件名排序，保证批量结果顺序稳定
//! - 跳过文件名主干带指定后缀的文件（本工具自己写出的结果文件）
//!
//! ## 依赖关系
//! - 被 `commands/peaks.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob` 编译匹配模式

use crate::error::{FtirError, Result};

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
    /// 需要跳过的文件名主干后缀（小写）
    skip_suffixes: Vec<String>,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
            skip_suffixes: Vec::new(),
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| FtirError::InvalidPattern {
                    pattern: s.to_string(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 跳过主干以 `suffix` 结尾的文件（不区分大小写），如 `go_peaks.csv` 对应 `_peaks`
    pub fn skip_stem_suffix(mut self, suffix: &str) -> Self {
        self.skip_suffixes.push(suffix.to_lowercase());
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.input)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if let Some(stem) = path.file_stem().and_then(|n| n.to_str()) {
            let stem = stem.to_lowercase();
            if self.skip_suffixes.iter().any(|s| stem.ends_with(s.as_str())) {
                return false;
            }
        }

        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|p| p.matches_with(filename, MATCH_OPTIONS))
    }
}
