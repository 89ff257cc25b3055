//! Generator: owns the extracted record and drives one generation per
//! trigger activation.
//!
//! Each request runs `Idle → Rendering → Opening → Displaying`. A failure
//! moves to `Failed`: the full error goes to the log, the
//! user sees one generic alert, and the generator returns to `Idle`. There
//! is no retry.

use chrono::NaiveDate;

use crate::error::error_chain;
use crate::extract::Extractor;
use crate::record::ResumeRecord;
use crate::render::render;
use crate::surface::SurfaceOpener;
use crate::{Error, GeneratorConfig, Result, SourceDocument};

/// Position of the generator in the per-request state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Rendering,
    Opening,
    Displaying,
    Failed,
}

/// Result of one generation request
#[derive(Debug)]
pub struct GenerationOutcome {
    /// Terminal state reached (`Displaying` or `Failed`)
    pub state: GenerationState,
    /// State in which the failure happened, if any
    pub failed_in: Option<GenerationState>,
    /// The diagnostic error, if any
    pub error: Option<Error>,
}

impl GenerationOutcome {
    pub fn is_displayed(&self) -> bool {
        self.state == GenerationState::Displaying
    }
}

/// User-visible failure channel. `alert` blocks until acknowledged.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Prints alerts to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Keeps every alert it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Owns a [`ResumeRecord`] and turns trigger activations into displayed CVs.
#[derive(Debug)]
pub struct CvGenerator {
    record: ResumeRecord,
    config: GeneratorConfig,
    bound_control: Option<String>,
    state: GenerationState,
}

impl CvGenerator {
    /// Extract the record from `doc` and bind the configured trigger if the
    /// document carries that control.
    pub fn new(doc: &SourceDocument, config: GeneratorConfig) -> Self {
        let record = Extractor::new(doc).extract_record();
        let bound_control = if doc.has_control(&config.trigger_id) {
            Some(config.trigger_id.clone())
        } else {
            log::debug!("no trigger control #{} in source document", config.trigger_id);
            None
        };
        Self {
            record,
            config,
            bound_control,
            state: GenerationState::Idle,
        }
    }

    /// Build from an already extracted record, binding the configured trigger.
    pub fn from_record(record: ResumeRecord, config: GeneratorConfig) -> Self {
        let bound_control = Some(config.trigger_id.clone());
        Self {
            record,
            config,
            bound_control,
            state: GenerationState::Idle,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Id of the control wired to generation, if any
    pub fn bound_control(&self) -> Option<&str> {
        self.bound_control.as_deref()
    }

    /// Wire `control_id` as the trigger, replacing any previous binding.
    pub fn bind(&mut self, control_id: impl Into<String>) {
        self.bound_control = Some(control_id.into());
    }

    /// Handle an activation of `control_id`. Activations of anything but
    /// the bound control are ignored and return `None`.
    pub fn activate(
        &mut self,
        control_id: &str,
        opener: &mut dyn SurfaceOpener,
        notifier: &mut dyn Notifier,
    ) -> Option<GenerationOutcome> {
        if self.bound_control.as_deref() != Some(control_id) {
            log::debug!("ignoring activation of unbound control #{}", control_id);
            return None;
        }
        Some(self.generate(opener, notifier))
    }

    /// Render with today's date and display the result.
    pub fn generate(
        &mut self,
        opener: &mut dyn SurfaceOpener,
        notifier: &mut dyn Notifier,
    ) -> GenerationOutcome {
        let today = chrono::Local::now().date_naive();
        self.generate_at(today, opener, notifier)
    }

    /// Render with a fixed footer date and display the result.
    pub fn generate_at(
        &mut self,
        generated_on: NaiveDate,
        opener: &mut dyn SurfaceOpener,
        notifier: &mut dyn Notifier,
    ) -> GenerationOutcome {
        self.state = GenerationState::Rendering;
        // Rendering is infallible; only the display phase can fail.
        let document = render(&self.record, generated_on);

        self.state = GenerationState::Opening;
        if let Err(err) = self.display(&document, opener) {
            return self.fail(err, notifier);
        }

        self.state = GenerationState::Displaying;
        log::info!(
            "generated CV for {:?} ({} bytes)",
            self.record.personal_info.name,
            document.len()
        );
        GenerationOutcome {
            state: GenerationState::Displaying,
            failed_in: None,
            error: None,
        }
    }

    fn display(&self, document: &str, opener: &mut dyn SurfaceOpener) -> Result<()> {
        let mut surface = opener.open(&self.config.surface)?;
        surface.write(document)?;
        surface.close()?;
        surface.focus()
    }

    fn fail(&mut self, err: Error, notifier: &mut dyn Notifier) -> GenerationOutcome {
        let failed_in = self.state;
        self.state = GenerationState::Failed;
        log::error!("Error generating CV ({:?}): {}", failed_in, error_chain(&err));
        notifier.alert(&self.config.error_message);
        self.state = GenerationState::Idle;
        GenerationOutcome {
            state: GenerationState::Failed,
            failed_in: Some(failed_in),
            error: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemoryOpener;
    use crate::DEFAULT_ERROR_MESSAGE;

    const PAGE: &str = r#"<html><body>
        <div class="header"><h1>Ana Ruiz</h1>
            <div class="contact-info"><p>Email: ana@example.com</p></div></div>
        <button id="generate-cv-btn">Generar CV</button>
    </body></html>"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn binds_trigger_when_control_present() {
        let doc = SourceDocument::parse(PAGE);
        let g = CvGenerator::new(&doc, GeneratorConfig::default());
        assert_eq!(g.bound_control(), Some("generate-cv-btn"));
        assert_eq!(g.state(), GenerationState::Idle);

        let doc = SourceDocument::parse("<p>no button</p>");
        let g = CvGenerator::new(&doc, GeneratorConfig::default());
        assert_eq!(g.bound_control(), None);
    }

    #[test]
    fn successful_generation_follows_surface_lifecycle() {
        let doc = SourceDocument::parse(PAGE);
        let mut g = CvGenerator::new(&doc, GeneratorConfig::default());
        let mut opener = MemoryOpener::new();
        let mut notifier = RecordingNotifier::default();

        let outcome = g.generate_at(date(), &mut opener, &mut notifier);
        assert!(outcome.is_displayed());
        assert!(outcome.error.is_none());
        assert_eq!(g.state(), GenerationState::Displaying);
        assert!(notifier.messages.is_empty());

        let logs = opener.surfaces();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].writes.len(), 1);
        assert!(logs[0].writes[0].contains("Email: ana@example.com"));
        assert!(logs[0].writes[0].contains("31/1/2024"));
        assert!(logs[0].closed && logs[0].focused);
    }

    #[test]
    fn blocked_surface_alerts_once_and_returns_to_idle() {
        let doc = SourceDocument::parse(PAGE);
        let mut g = CvGenerator::new(&doc, GeneratorConfig::default());
        let before = g.record().clone();
        let mut opener = MemoryOpener::blocked();
        let mut notifier = RecordingNotifier::default();

        let outcome = g.generate_at(date(), &mut opener, &mut notifier);
        assert_eq!(outcome.state, GenerationState::Failed);
        assert_eq!(outcome.failed_in, Some(GenerationState::Opening));
        assert!(matches!(outcome.error, Some(Error::SurfaceError(_))));
        assert_eq!(notifier.messages, vec![DEFAULT_ERROR_MESSAGE.to_string()]);
        assert_eq!(g.state(), GenerationState::Idle);
        assert_eq!(g.record(), &before);
    }

    #[test]
    fn write_failure_is_reported() {
        let doc = SourceDocument::parse(PAGE);
        let mut g = CvGenerator::new(&doc, GeneratorConfig::default());
        let mut opener = MemoryOpener::failing_writes();
        let mut notifier = RecordingNotifier::default();

        let outcome = g.generate_at(date(), &mut opener, &mut notifier);
        assert!(!outcome.is_displayed());
        assert_eq!(notifier.messages.len(), 1);
        let logs = opener.surfaces();
        assert!(logs[0].writes.is_empty());
        assert!(!logs[0].focused);
    }

    #[test]
    fn unbound_activation_is_ignored() {
        let doc = SourceDocument::parse(PAGE);
        let mut g = CvGenerator::new(&doc, GeneratorConfig::default());
        let mut opener = MemoryOpener::new();
        let mut notifier = RecordingNotifier::default();

        assert!(g.activate("other-btn", &mut opener, &mut notifier).is_none());
        assert!(opener.surfaces().is_empty());

        let outcome = g.activate("generate-cv-btn", &mut opener, &mut notifier);
        assert!(outcome.unwrap().is_displayed());
    }

    #[test]
    fn repeated_generation_opens_a_new_surface_each_time() {
        let mut g = CvGenerator::from_record(ResumeRecord::default(), GeneratorConfig::default());
        let mut opener = MemoryOpener::new();
        let mut notifier = RecordingNotifier::default();
        g.generate_at(date(), &mut opener, &mut notifier);
        g.generate_at(date(), &mut opener, &mut notifier);

        let logs = opener.surfaces();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].writes, logs[1].writes);
    }

    #[test]
    fn custom_error_message_and_binding() {
        let config = GeneratorConfig {
            error_message: "boom".into(),
            ..Default::default()
        };
        let doc = SourceDocument::parse("<p></p>");
        let mut g = CvGenerator::new(&doc, config);
        g.bind("cli");
        let mut opener = MemoryOpener::blocked();
        let mut notifier = RecordingNotifier::default();
        let outcome = g.activate("cli", &mut opener, &mut notifier).unwrap();
        assert!(!outcome.is_displayed());
        assert_eq!(notifier.messages, vec!["boom"]);
    }
}
