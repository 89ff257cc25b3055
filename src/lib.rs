//! cvgen
//!
//! Extracts resume data from a structured HTML page and re-renders it as a
//! standalone, printable HTML document on a new display surface.
//!
//! # Pipeline
//!
//! - **Extract**: [`extract::Extractor`] walks a [`SourceDocument`] and builds
//!   a [`ResumeRecord`]. Missing structure degrades to empty defaults.
//! - **Render**: [`render::render`] serializes the record into one
//!   self-contained HTML document with inline styles.
//! - **Present**: [`CvGenerator`] ties a trigger to the sequence
//!   render → open surface → write → close → focus, reporting failures once.
//!
//! # Example
//!
//! ```
//! use cvgen::surface::MemoryOpener;
//! use cvgen::{CvGenerator, GeneratorConfig, RecordingNotifier, SourceDocument};
//!
//! let doc = SourceDocument::parse(
//!     r#"<div class="header"><h1>Ana Ruiz</h1></div>
//!        <button id="generate-cv-btn">Generar CV</button>"#,
//! );
//! let mut generator = CvGenerator::new(&doc, GeneratorConfig::default());
//! assert_eq!(generator.record().personal_info.name, "Ana Ruiz");
//!
//! let mut opener = MemoryOpener::new();
//! let mut notifier = RecordingNotifier::default();
//! let outcome = generator
//!     .activate("generate-cv-btn", &mut opener, &mut notifier)
//!     .expect("control is bound");
//! assert!(outcome.is_displayed());
//! assert!(opener.surfaces()[0].writes[0].contains("<h1>Ana Ruiz</h1>"));
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod document;
pub mod extract;
pub mod generator;
pub mod record;
pub mod render;
pub mod surface;

pub use document::SourceDocument;
pub use generator::{
    CvGenerator, GenerationOutcome, GenerationState, Notifier, RecordingNotifier, StderrNotifier,
};
pub use record::{Entry, Language, PersonalInfo, ResumeRecord, SkillCategory};

/// Element id of the control that triggers generation
pub const DEFAULT_TRIGGER_ID: &str = "generate-cv-btn";

/// Message shown to the user when generation fails
pub const DEFAULT_ERROR_MESSAGE: &str = "Error al generar el CV. Por favor, inténtelo de nuevo.";

/// Configuration for a [`CvGenerator`]
///
/// The defaults match the host page: the trigger is the `generate-cv-btn`
/// control and the new surface is an 800x600 scrollable, resizable window.
///
/// # Examples
///
/// ```
/// let cfg = cvgen::GeneratorConfig::default();
/// assert_eq!(cfg.trigger_id, "generate-cv-btn");
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Size and behavior hints for the display surface
    pub surface: SurfaceFeatures,
    /// Id of the control whose activation starts generation
    pub trigger_id: String,
    /// Generic message shown through the notifier on failure
    pub error_message: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceFeatures::default(),
            trigger_id: DEFAULT_TRIGGER_ID.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Reject configurations that could never produce a visible CV.
    pub fn validate(&self) -> Result<()> {
        if self.trigger_id.trim().is_empty() {
            return Err(Error::ConfigError("trigger id must not be empty".into()));
        }
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(Error::ConfigError(format!(
                "surface size must be non-zero, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        Ok(())
    }
}

/// Hints passed to a [`surface::SurfaceOpener`] when opening a new surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFeatures {
    pub width: u32,
    pub height: u32,
    pub scrollbars: bool,
    pub resizable: bool,
}

impl Default for SurfaceFeatures {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scrollbars: true,
            resizable: true,
        }
    }
}

impl SurfaceFeatures {
    /// Render as a window feature string, e.g.
    /// `width=800,height=600,scrollbars=yes,resizable=yes`.
    pub fn to_feature_string(&self) -> String {
        let yn = |b: bool| if b { "yes" } else { "no" };
        format!(
            "width={},height={},scrollbars={},resizable={}",
            self.width,
            self.height,
            yn(self.scrollbars),
            yn(self.resizable)
        )
    }
}
