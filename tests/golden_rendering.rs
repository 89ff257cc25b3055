use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use cvgen::extract::extract_record;
use cvgen::render::render;
use cvgen::SourceDocument;
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens");
    p.push(name);
    p
}

#[test]
fn golden_render_matches_fixture() {
    let doc = SourceDocument::from_path("tests/fixtures/cv.html").expect("read fixture");
    let record = extract_record(&doc);
    let html = render(&record, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let digest = hex::encode(Sha256::digest(html.as_bytes()));

    let expected_path = golden_path("cv.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        fs::write(golden_path("cv.html"), &html).expect("write golden html");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let expected_html =
        fs::read_to_string(golden_path("cv.html")).expect("golden html is committed");
    assert_eq!(html, expected_html, "rendered CV differs from tests/goldens/cv.html");

    let expected = fs::read_to_string(&expected_path).expect("golden digest is committed");
    assert_eq!(digest, expected.trim());
}
