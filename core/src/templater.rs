use crate::error::{Result, UmbrellaError};
use log::{debug, error};
use std::{error::Error, fs, path::Path};
use tera::{Context, Error as TeraError, ErrorKind, Tera};

const TEMPLATE_NAME: &str = "umbrella.h";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/umbrella.h.tera");

/// Renders the umbrella header document.
pub struct Templater {
    tera: Tera,
}

impl Templater {
    pub fn builtin() -> Result<Self> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Templater::from_file: loading {}", path.display());
        let source = fs::read_to_string(path).map_err(|e| {
            error!(
                "Templater::from_file: failed to read template '{}': {}",
                path.display(),
                e
            );
            UmbrellaError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| Self::diagnose_tera_error(e, TEMPLATE_NAME))?;
        Ok(Self { tera })
    }

    pub fn render(&self, library: &str, guard: &str, headers: &[String]) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("library", library);
        ctx.insert("guard", guard);
        ctx.insert("headers", headers);

        let output = self
            .tera
            .render(TEMPLATE_NAME, &ctx)
            .map_err(|e| Self::diagnose_tera_error(e, TEMPLATE_NAME))?;

        debug!(
            "Templater::render: {} include(s), output len = {}",
            headers.len(),
            output.len()
        );
        Ok(output)
    }

    fn diagnose_tera_error(err: TeraError, name: &str) -> UmbrellaError {
        let mut msg = format!("Error rendering template '{}': {}", name, err);

        match &err.kind {
            ErrorKind::Msg(_) => {}
            other => msg.push_str(&format!(" ({:?})", other)),
        }

        // Tera keeps the useful part of the message in the cause chain.
        let mut source_opt = err.source();
        let mut depth = 0usize;
        while let Some(source) = source_opt {
            depth += 1;
            msg.push_str(&format!(" | cause[{depth}]: {}", source));
            source_opt = source.source();
        }

        error!("Templater::diagnose_tera_error: {}", msg);
        UmbrellaError::Template(msg)
    }
}
