use crate::config::GeneratorConfig;
use crate::discovery::discover;
use crate::error::{Result, UmbrellaError};
use crate::templater::Templater;
use log::{debug, info};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub headers: Vec<String>,
}

pub struct Generator {
    config: GeneratorConfig,
    templater: Templater,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let templater = match &config.template {
            Some(path) => Templater::from_file(path)?,
            None => Templater::builtin()?,
        };

        Ok(Self { config, templater })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The library's own subdirectory inside a source checkout.
    pub fn library_root(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.config.library)
    }

    pub fn output_path(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(self.config.umbrella_file_name())
    }

    /// Discover headers and render the document without touching disk.
    pub fn render(&self, source_dir: &Path) -> Result<(String, Vec<String>)> {
        let root = self.library_root(source_dir);
        debug!(
            "Generator::render: scanning {} (order = {})",
            root.display(),
            self.config.order
        );

        let headers = discover(&root, &self.config)?;
        let document = self.templater.render(
            &self.config.library,
            &self.config.include_guard(),
            &headers,
        )?;
        Ok((document, headers))
    }

    /// Regenerate `<target_dir>/<library>.h` from `<source_dir>/<library>`.
    pub fn generate(&self, source_dir: &Path, target_dir: &Path) -> Result<GenerationReport> {
        // Scan first so a bad source tree never leaves a fresh empty header behind.
        let (document, headers) = self.render(source_dir)?;

        if !target_dir.exists() {
            debug!("Generator::generate: creating {}", target_dir.display());
        }
        fs::create_dir_all(target_dir).map_err(|e| UmbrellaError::TargetDirectory {
            path: target_dir.to_path_buf(),
            source: e,
        })?;

        let output = self.output_path(target_dir);
        if self.config.atomic_write {
            write_atomic(target_dir, &output, &document)?;
        } else {
            write_direct(&output, &document)?;
        }

        info!(
            "Generator::generate: wrote {} with {} header(s)",
            output.display(),
            headers.len()
        );
        Ok(GenerationReport { output, headers })
    }
}

/// Generate with the default configuration.
pub fn generate(source_dir: &Path, target_dir: &Path) -> Result<GenerationReport> {
    Generator::new(GeneratorConfig::default())?.generate(source_dir, target_dir)
}

fn write_direct(output: &Path, document: &str) -> Result<()> {
    let write_err = |e| UmbrellaError::Write {
        path: output.to_path_buf(),
        source: e,
    };

    let file = File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)
}

fn write_atomic(target_dir: &Path, output: &Path, document: &str) -> Result<()> {
    let write_err = |e| UmbrellaError::Write {
        path: output.to_path_buf(),
        source: e,
    };

    let mut tmp = NamedTempFile::new_in(target_dir).map_err(write_err)?;
    tmp.write_all(document.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}
