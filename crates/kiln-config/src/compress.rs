//! Gzip step: options carried in the configuration, plus applying them to a
//! built output directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::build::Pattern;
use crate::error::Result;

/// Files at or below this size (bytes) are not compressed
pub const DEFAULT_THRESHOLD: u64 = 10_240;

/// Compressed output must be at most this fraction of the original
pub const DEFAULT_MIN_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Gzip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Output name template; `[path]` is the original path, `[query]` is dropped
    pub asset: String,
    pub algorithm: Algorithm,
    pub test: Pattern,
    pub threshold: u64,
    pub min_ratio: f64,
}

impl CompressionOptions {
    /// Gzip every file whose extension is in `extensions`.
    pub fn for_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        Ok(Self {
            asset: "[path].gz[query]".to_string(),
            algorithm: Algorithm::Gzip,
            test: Pattern::for_extensions(extensions)?,
            threshold: DEFAULT_THRESHOLD,
            min_ratio: DEFAULT_MIN_RATIO,
        })
    }

    /// Keep the compressed sibling only for large, compressible files.
    pub fn should_compress(&self, original_size: u64, compressed_size: u64) -> bool {
        if original_size <= self.threshold {
            return false;
        }
        (compressed_size as f64 / original_size as f64) <= self.min_ratio
    }

    pub fn output_path(&self, file: &Path) -> PathBuf {
        let rendered = self
            .asset
            .replace("[path]", &file.to_string_lossy())
            .replace("[query]", "");
        PathBuf::from(rendered)
    }

    /// Compress matching files under `dir`, writing `<file>.gz` siblings.
    pub fn apply(&self, dir: &Path) -> Result<CompressionReport> {
        let mut report = CompressionReport::default();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.test.is_match(&path.to_string_lossy()) {
                continue;
            }

            let original = fs::read(path)?;
            let original_size = original.len() as u64;
            if original_size <= self.threshold {
                debug!(path = %path.display(), original_size, "below compression threshold");
                report.skipped.push(SkippedAsset {
                    path: path.to_path_buf(),
                    reason: SkipReason::BelowThreshold,
                });
                continue;
            }

            let compressed = gzip(&original)?;
            let compressed_size = compressed.len() as u64;
            if !self.should_compress(original_size, compressed_size) {
                debug!(path = %path.display(), original_size, compressed_size, "ratio above minimum");
                report.skipped.push(SkippedAsset {
                    path: path.to_path_buf(),
                    reason: SkipReason::RatioTooHigh,
                });
                continue;
            }

            let output = self.output_path(path);
            fs::write(&output, &compressed)?;
            report.written.push(CompressedAsset {
                source: path.to_path_buf(),
                output,
                original_size,
                compressed_size,
            });
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "compression finished"
        );
        Ok(report)
    }
}

fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()
}

#[derive(Debug, Default)]
pub struct CompressionReport {
    pub written: Vec<CompressedAsset>,
    pub skipped: Vec<SkippedAsset>,
}

#[derive(Debug)]
pub struct CompressedAsset {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
}

#[derive(Debug)]
pub struct SkippedAsset {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BelowThreshold,
    RatioTooHigh,
}
