//! Properties of the rendered document

use chrono::NaiveDate;
use cvgen::extract::extract_record;
use cvgen::render::render;
use cvgen::{Entry, ResumeRecord, SourceDocument};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
}

fn fixture_record() -> ResumeRecord {
    let doc = SourceDocument::from_path("tests/fixtures/cv.html").expect("read fixture");
    extract_record(&doc)
}

#[test]
fn renders_one_entry_block_per_education_entry_in_order() {
    let titles = ["Doctorado", "Máster", "Grado"];
    let record = ResumeRecord {
        education: titles
            .iter()
            .map(|t| Entry { title: t.to_string(), ..Default::default() })
            .collect(),
        ..Default::default()
    };
    let html = render(&record, date());
    assert_eq!(html.matches("<div class=\"entry\">").count(), titles.len());

    let positions: Vec<usize> = titles
        .iter()
        .map(|t| html.find(&format!("<div class=\"entry-title\">{}</div>", t)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn rendering_is_deterministic_for_a_date() {
    let record = fixture_record();
    assert_eq!(render(&record, date()), render(&record, date()));
}

#[test]
fn renders_differ_only_in_footer_date() {
    let record = fixture_record();
    let a = render(&record, date());
    let b = render(&record, NaiveDate::from_ymd_opt(2030, 12, 25).unwrap());
    assert_ne!(a, b);
    assert_eq!(a.replace("9/6/2025", "DATE"), b.replace("25/12/2030", "DATE"));
}

#[test]
fn empty_references_have_no_heading() {
    let mut record = fixture_record();
    assert!(render(&record, date()).contains(">Referencias</h2>"));
    record.references.clear();
    assert!(!render(&record, date()).contains("Referencias"));
}

#[test]
fn full_record_renders_every_category() {
    let html = render(&fixture_record(), date());
    for heading in [
        "Perfil Profesional",
        "Educación",
        "Experiencia Profesional",
        "Habilidades Técnicas",
        "Publicaciones y Proyectos",
        "Certificaciones",
        "Idiomas",
        "Referencias",
    ] {
        assert!(html.contains(&format!(">{}</h2>", heading)), "missing {}", heading);
    }
    assert!(html.contains("<title>CV - Lucía Fernández</title>"));
    assert!(html.contains("<p>Email: lucia.fernandez@example.com | Teléfono: +34 612 345 678</p>"));
    assert!(html.contains("<p>Rust, Go, Python</p>"));
    assert!(html.contains("<p><strong>Inglés:</strong> C1</p>"));
    assert!(html.contains("<p>Disponibles bajo petición.</p>"));
}

#[test]
fn document_is_self_contained() {
    let html = render(&fixture_record(), date());
    assert!(html.contains("<style>"));
    assert!(html.contains("@media print"));
    assert!(!html.contains("<link"));
    assert!(!html.contains("<script"));
    assert!(!html.contains("src="));
}
