//! Extractor: walks a [`SourceDocument`] and builds a [`ResumeRecord`].
//!
//! The source page follows a fixed vocabulary of class names: a `.header`
//! with an `h1` and `.contact-info` lines, then `.section` blocks, each with a
//! `.section-title` and `.entry` children. Every lookup tolerates missing
//! structure and falls back to an empty string or an empty list.

use scraper::ElementRef;

use crate::document::{all_within, first_within, text_of, text_within, SourceDocument};
use crate::record::{Entry, Language, PersonalInfo, ResumeRecord, SkillCategory};

pub const EMAIL_LABEL: &str = "Email:";
pub const PHONE_LABEL: &str = "Teléfono:";
pub const LINKEDIN_LABEL: &str = "LinkedIn:";
pub const GITHUB_LABEL: &str = "GitHub:";
pub const LOCATION_LABEL: &str = "Ubicación:";

pub const PROFILE_TITLE: &str = "Perfil Profesional";
pub const EDUCATION_TITLE: &str = "Educación";
pub const EXPERIENCE_TITLE: &str = "Experiencia Profesional";
pub const PUBLICATIONS_TITLE: &str = "Publicaciones y Proyectos";
pub const CERTIFICATIONS_TITLE: &str = "Certificaciones";
pub const LANGUAGES_TITLE: &str = "Idiomas";
pub const REFERENCES_TITLE: &str = "Referencias";

/// Read-only view over a source page that produces resume data.
pub struct Extractor<'d> {
    doc: &'d SourceDocument,
}

impl<'d> Extractor<'d> {
    pub fn new(doc: &'d SourceDocument) -> Self {
        Self { doc }
    }

    /// Run every extraction and assemble the record.
    pub fn extract_record(&self) -> ResumeRecord {
        let record = ResumeRecord {
            personal_info: self.extract_personal_info(),
            profile: self.extract_profile(),
            education: self.extract_section_data(EDUCATION_TITLE),
            experience: self.extract_section_data(EXPERIENCE_TITLE),
            skills: self.extract_skills_data(),
            publications: self.extract_section_data(PUBLICATIONS_TITLE),
            certifications: self.extract_section_data(CERTIFICATIONS_TITLE),
            languages: self.extract_languages_data(),
            references: self.extract_section_data(REFERENCES_TITLE),
        };

        log::debug!(
            "extracted record: {} education, {} experience, {} skill categories, {} publications, {} certifications, {} languages, {} references",
            record.education.len(),
            record.experience.len(),
            record.skills.len(),
            record.publications.len(),
            record.certifications.len(),
            record.languages.len(),
            record.references.len(),
        );
        if record.is_empty() {
            log::warn!("source document produced an empty resume record");
        }
        record
    }

    /// Name and contact lines. All-default when the page has no `.header`.
    pub fn extract_personal_info(&self) -> PersonalInfo {
        let Some(header) = self.doc.select_first(".header") else {
            return PersonalInfo::default();
        };
        PersonalInfo {
            name: text_within(header, "h1"),
            email: self.extract_contact_info(EMAIL_LABEL),
            phone: self.extract_contact_info(PHONE_LABEL),
            linkedin: self.extract_contact_info(LINKEDIN_LABEL),
            github: self.extract_contact_info(GITHUB_LABEL),
            location: self.extract_contact_info(LOCATION_LABEL),
        }
    }

    /// Text after `label` in the first contact line containing it, trimmed.
    pub fn extract_contact_info(&self, label: &str) -> String {
        let Some(contact) = self.doc.select_first(".contact-info") else {
            return String::new();
        };
        all_within(contact, "p")
            .into_iter()
            .map(text_of)
            .find_map(|line| {
                line.split_once(label)
                    .map(|(_, value)| value.trim().to_string())
            })
            .unwrap_or_default()
    }

    /// Profile paragraph. Only the first section of the page is considered.
    pub fn extract_profile(&self) -> String {
        let Some(first) = self.doc.select_first(".section") else {
            return String::new();
        };
        if !section_title(first).contains(PROFILE_TITLE) {
            return String::new();
        }
        text_within(first, "p")
    }

    /// Entries of the first section whose title contains `section_title`.
    pub fn extract_section_data(&self, section_title: &str) -> Vec<Entry> {
        match self.find_section(section_title) {
            Some(section) => all_within(section, ".entry")
                .into_iter()
                .map(entry_from)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Skill categories from the `.skills-grid` block.
    pub fn extract_skills_data(&self) -> Vec<SkillCategory> {
        let Some(grid) = self.doc.select_first(".skills-grid") else {
            return Vec::new();
        };
        all_within(grid, ".skill-category")
            .into_iter()
            .map(|category| SkillCategory {
                category: text_within(category, "h4"),
                skills: split_skills(&text_within(category, "p")),
            })
            .collect()
    }

    /// "Language: level" lines from the languages section.
    pub fn extract_languages_data(&self) -> Vec<Language> {
        let Some(section) = self.find_section(LANGUAGES_TITLE) else {
            return Vec::new();
        };
        all_within(section, ".entry-description p")
            .into_iter()
            .filter_map(|item| parse_language_line(&text_of(item)))
            .collect()
    }

    // First match in document order wins; a title only needs to contain the
    // searched text.
    fn find_section(&self, title: &str) -> Option<ElementRef<'d>> {
        self.doc
            .select_all(".section")
            .into_iter()
            .find(|section| {
                first_within(*section, ".section-title")
                    .map(|t| text_of(t).contains(title))
                    .unwrap_or(false)
            })
    }
}

/// Convenience wrapper: extract a full record from a document.
pub fn extract_record(doc: &SourceDocument) -> ResumeRecord {
    Extractor::new(doc).extract_record()
}

fn section_title(section: ElementRef<'_>) -> String {
    text_within(section, ".section-title")
}

fn entry_from(entry: ElementRef<'_>) -> Entry {
    Entry {
        title: text_within(entry, ".entry-title"),
        date: text_within(entry, ".entry-date"),
        subtitle: text_within(entry, ".entry-subtitle"),
        description: text_within(entry, ".entry-description").trim().to_string(),
    }
}

/// Split a comma-separated list, trimming each item. Empty items are kept.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',').map(|s| s.trim().to_string()).collect()
}

/// Parse "Language: level". The line is split on its first colon, so any
/// further colons stay in the level. Asterisks are stripped from the name.
pub fn parse_language_line(line: &str) -> Option<Language> {
    let (language, level) = line.split_once(':')?;
    Some(Language {
        language: language.replace('*', "").trim().to_string(),
        level: level.trim().to_string(),
    })
}
