use anyhow::Context as _;
use graphkit_core::{AppConfig, DescriptionReader, OutputFormat};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings shared by every command: user config plus command-line overrides
pub struct CliContext {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl CliContext {
    pub fn load(format: Option<OutputFormat>) -> Self {
        let config = AppConfig::load();
        let format = format.unwrap_or_else(|| config.effective_format());
        Self { config, format }
    }

    /// Open a description file, applying the configured node limit
    pub fn open(&self, path: &Path) -> anyhow::Result<DescriptionReader<BufReader<File>>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        tracing::debug!("Reading graph descriptions from {}", path.display());
        Ok(DescriptionReader::new(BufReader::new(file)).with_node_limit(self.config.node_limit))
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
