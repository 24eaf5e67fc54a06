//! Server-side HTML rendering with Tera.
//!
//! The three built-in templates are embedded at compile time. A templates
//! directory may be configured to override any of them by file name.

use std::{path::Path, sync::Arc};

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

use crate::view::{LandingModel, ViewModel};

pub const WEATHER_TEMPLATE: &str = "weather.html";
pub const GET_STARTED_TEMPLATE: &str = "get_started.html";

mod embedded {
    pub const BASE: &str = include_str!("../templates/base.html");
    pub const WEATHER: &str = include_str!("../templates/weather.html");
    pub const GET_STARTED: &str = include_str!("../templates/get_started.html");
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Cheap to clone; the compiled templates are shared.
#[derive(Clone)]
pub struct Renderer {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Renderer with the embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            tera: Arc::new(embedded_tera()?),
        })
    }

    /// Renderer whose templates come from `dir` where present, embedded otherwise.
    ///
    /// Overrides may extend `base.html` whether or not `dir` provides one.
    pub fn with_templates_dir(dir: &Path) -> Result<Self, RenderError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| RenderError::Compile(format!("{}: {e}", dir.display())))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| RenderError::Compile(format!("{}: {e}", dir.display())))?
                .path();
            if path.extension().is_some_and(|ext| ext == "html") {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                debug!(template = ?name, "Loading custom template");
                files.push((path, name));
            }
        }

        let mut tera = embedded_tera()?;
        tera.add_template_files(files)
            .map_err(|e| RenderError::Compile(e.to_string()))?;

        info!(dir = %dir.display(), "Loaded custom templates");

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Build from an optional override directory.
    pub fn from_dir(dir: Option<&Path>) -> Result<Self, RenderError> {
        match dir {
            Some(dir) => Self::with_templates_dir(dir),
            None => Self::new(),
        }
    }

    pub fn render_weather(&self, model: &ViewModel) -> Result<String, RenderError> {
        self.render(WEATHER_TEMPLATE, model)
    }

    pub fn render_get_started(&self, model: &LandingModel) -> Result<String, RenderError> {
        self.render(GET_STARTED_TEMPLATE, model)
    }

    fn render<T: Serialize>(&self, template: &str, model: &T) -> Result<String, RenderError> {
        let context =
            Context::from_serialize(model).map_err(|e| RenderError::Render(e.to_string()))?;

        self.tera.render(template, &context).map_err(RenderError::from)
    }
}

fn embedded_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html"]);

    tera.add_raw_templates(vec![
        ("base.html", embedded::BASE),
        (WEATHER_TEMPLATE, embedded::WEATHER),
        (GET_STARTED_TEMPLATE, embedded::GET_STARTED),
    ])
    .map_err(|e| RenderError::Compile(e.to_string()))?;

    Ok(tera)
}
