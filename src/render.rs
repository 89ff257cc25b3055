//! Renderer: turns a [`ResumeRecord`] into one self-contained, printable
//! HTML document.
//!
//! Output is deterministic for a given record and date. Category blocks with
//! no data are left out entirely, and every interpolated value is escaped so
//! extracted text is always shown as text.

use chrono::NaiveDate;

use crate::extract::{
    CERTIFICATIONS_TITLE, EDUCATION_TITLE, EXPERIENCE_TITLE, LANGUAGES_TITLE, PROFILE_TITLE,
    PUBLICATIONS_TITLE, REFERENCES_TITLE,
};
use crate::record::{Entry, Language, ResumeRecord, SkillCategory};

pub const SKILLS_TITLE: &str = "Habilidades Técnicas";

const STYLESHEET: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Times New Roman', serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background-color: #fff;
        }

        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 2px solid #333;
            padding-bottom: 20px;
        }

        .header h1 {
            font-size: 2.5em;
            margin-bottom: 10px;
            font-weight: bold;
        }

        .header .contact-info {
            font-size: 1.1em;
            color: #666;
        }

        .section {
            margin-bottom: 25px;
        }

        .section-title {
            font-size: 1.4em;
            font-weight: bold;
            margin-bottom: 15px;
            text-transform: uppercase;
            letter-spacing: 1px;
            border-bottom: 1px solid #ccc;
            padding-bottom: 5px;
        }

        .entry {
            margin-bottom: 20px;
        }

        .entry-header {
            display: flex;
            justify-content: space-between;
            align-items: baseline;
            margin-bottom: 5px;
        }

        .entry-title {
            font-weight: bold;
            font-size: 1.1em;
        }

        .entry-date, .entry-subtitle {
            font-style: italic;
            color: #666;
        }

        .entry-subtitle {
            margin-bottom: 5px;
        }

        .entry-description {
            text-align: justify;
        }

        .skills-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
        }

        .skill-category h4 {
            font-weight: bold;
            margin-bottom: 5px;
        }

        .skill-category p {
            color: #666;
            font-size: 0.95em;
        }

        .generated-footer {
            text-align: center;
            margin-top: 40px;
            padding: 20px;
            background-color: #f8f9fa;
            border-radius: 8px;
        }

        @media print {
            body {
                max-width: none;
                margin: 0;
                padding: 15px;
            }

            .section {
                page-break-inside: avoid;
            }
        }
"#;

/// Render the full document. Pure: the same inputs give the same bytes.
pub fn render(record: &ResumeRecord, generated_on: NaiveDate) -> String {
    let info = &record.personal_info;
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CV - {name}</title>
    <style>{style}    </style>
</head>
<body>
    <div class="header">
        <h1>{name}</h1>
        <div class="contact-info">
            <p>Email: {email} | Teléfono: {phone}</p>
            <p>LinkedIn: {linkedin} | GitHub: {github}</p>
            <p>Ubicación: {location}</p>
        </div>
    </div>
"#,
        name = html_escape(&info.name),
        style = STYLESHEET,
        email = html_escape(&info.email),
        phone = html_escape(&info.phone),
        linkedin = html_escape(&info.linkedin),
        github = html_escape(&info.github),
        location = html_escape(&info.location),
    ));

    if !record.profile.is_empty() {
        html.push_str(&format!(
            "    <div class=\"section\"><h2 class=\"section-title\">{}</h2>\n        <p>{}</p>\n    </div>\n",
            PROFILE_TITLE,
            html_escape(&record.profile)
        ));
    }

    html.push_str(&entries_section(EDUCATION_TITLE, &record.education, true));
    html.push_str(&entries_section(EXPERIENCE_TITLE, &record.experience, true));
    html.push_str(&skills_section(&record.skills));
    html.push_str(&entries_section(PUBLICATIONS_TITLE, &record.publications, true));
    // Certifications use the reduced template: no description line.
    html.push_str(&entries_section(CERTIFICATIONS_TITLE, &record.certifications, false));
    html.push_str(&languages_section(&record.languages));
    html.push_str(&references_section(&record.references));

    html.push_str(&format!(
        r#"    <div class="generated-footer">
        <p><strong>CV Generado automáticamente</strong> - {}</p>
    </div>
</body>
</html>
"#,
        format_es_date(generated_on)
    ));

    html
}

/// Format a date the way the `es-ES` locale does: `d/m/yyyy`.
pub fn format_es_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// Escape text for use as HTML content or attribute value.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn section_open(title: &str) -> String {
    format!(
        "    <div class=\"section\"><h2 class=\"section-title\">{}</h2>\n",
        title
    )
}

fn entries_section(title: &str, entries: &[Entry], with_description: bool) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut html = section_open(title);
    for entry in entries {
        html.push_str(&format!(
            r#"        <div class="entry">
            <div class="entry-header">
                <div class="entry-title">{}</div>
                <div class="entry-date">{}</div>
            </div>
            <div class="entry-subtitle">{}</div>
"#,
            html_escape(&entry.title),
            html_escape(&entry.date),
            html_escape(&entry.subtitle),
        ));
        if with_description {
            html.push_str(&format!(
                "            <div class=\"entry-description\">\n                <p>{}</p>\n            </div>\n",
                html_escape(&entry.description)
            ));
        }
        html.push_str("        </div>\n");
    }
    html.push_str("    </div>\n");
    html
}

fn skills_section(skills: &[SkillCategory]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let mut html = section_open(SKILLS_TITLE);
    html.push_str("        <div class=\"skills-grid\">\n");
    for skill in skills {
        html.push_str(&format!(
            "            <div class=\"skill-category\">\n                <h4>{}</h4>\n                <p>{}</p>\n            </div>\n",
            html_escape(&skill.category),
            html_escape(&skill.skills.join(", ")),
        ));
    }
    html.push_str("        </div>\n    </div>\n");
    html
}

fn languages_section(languages: &[Language]) -> String {
    if languages.is_empty() {
        return String::new();
    }
    let mut html = section_open(LANGUAGES_TITLE);
    html.push_str("        <div class=\"entry-description\">\n");
    for lang in languages {
        html.push_str(&format!(
            "            <p><strong>{}:</strong> {}</p>\n",
            html_escape(&lang.language),
            html_escape(&lang.level)
        ));
    }
    html.push_str("        </div>\n    </div>\n");
    html
}

fn references_section(references: &[Entry]) -> String {
    if references.is_empty() {
        return String::new();
    }
    let mut html = section_open(REFERENCES_TITLE);
    html.push_str("        <div class=\"entry-description\">\n");
    for reference in references {
        html.push_str(&format!("            <p>{}</p>\n", html_escape(&reference.description)));
    }
    html.push_str("        </div>\n    </div>\n");
    html
}
