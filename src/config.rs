use crate::error::HuffError;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_EXTENSION: &str = "huff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct HuffConfig {
    pub threads: usize,
    /// Where results are written; `None` writes next to each input file.
    pub output_dir: Option<PathBuf>,
    pub extension: String,
    pub progress: bool,
    pub report: ReportFormat,
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            output_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            progress: true,
            report: ReportFormat::Text,
        }
    }
}

impl HuffConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = report;
        self
    }

    pub fn validate(&self) -> Result<(), HuffError> {
        if self.threads == 0 {
            return Err(HuffError::Config("thread count must be at least 1".to_string()));
        }
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(HuffError::Config("file extension must not be empty".to_string()));
        }
        Ok(())
    }
}

impl FromStr for ReportFormat {
    type Err = HuffError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(HuffError::Config(format!("Invalid report format: {}", s))),
        }
    }
}
