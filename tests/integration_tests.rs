//! Integration tests for resume-fit: file input through to a rendered report

use resume_fit::config::OutputFormat;
use resume_fit::input::InputManager;
use resume_fit::output::{AnalysisReport, ReportGenerator};
use resume_fit::{ResumeAnalyzer, ResumeFitError};
use std::io::{Cursor, Write};
use std::path::Path;

fn docx_with_body(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains("https://"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, docx_with_body(&["Jane Roe", "Python, SQL and Docker"])).unwrap();

    let text = InputManager::new().extract_text(&path).await.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Python, SQL and Docker"));
}

#[tokio::test]
async fn test_oversized_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "Python ".repeat(100)).unwrap();

    let manager = InputManager::new().with_max_file_size(64);
    let result = manager.extract_text(&path).await;

    assert!(matches!(
        result,
        Err(ResumeFitError::FileTooLarge { size: 700, limit: 64 })
    ));
}

#[tokio::test]
async fn test_mislabeled_pdf_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, "plain text pretending to be a PDF").unwrap();

    let result = InputManager::new().extract_text(&path).await;
    assert!(matches!(result, Err(ResumeFitError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeFitError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_end_to_end_frontend_analysis() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let analyzer = ResumeAnalyzer::with_defaults().unwrap();
    let result = analyzer.analyze(&text, Some("Frontend Developer")).unwrap();

    // 24 of 27 weight points: everything but UI/UX
    assert_eq!(result.score, 89);
    assert_eq!(result.target_job, "Frontend Developer");
    assert_eq!(result.matched_skills.len(), 6);
    assert_eq!(result.missing_skills.get("UI/UX"), Some(&3));
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].contains("UI/UX"));
}

#[tokio::test]
async fn test_markdown_and_text_resumes_score_the_same() {
    let manager = InputManager::new();
    let analyzer = ResumeAnalyzer::with_defaults().unwrap();

    let txt = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let md = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    for job in [None, Some("frontend-developer"), Some("Backend Developer")] {
        assert_eq!(
            analyzer.analyze(&txt, job).unwrap(),
            analyzer.analyze(&md, job).unwrap()
        );
    }
}

#[tokio::test]
async fn test_rendered_reports() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let analyzer = ResumeAnalyzer::with_defaults().unwrap();
    let result = analyzer.analyze(&text, Some("Frontend Developer")).unwrap();
    let report = AnalysisReport::new(result, 27).with_resume_file("sample_resume.txt");
    let generator = ReportGenerator::new();

    let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["score"], 89);
    assert_eq!(value["target_job"], "Frontend Developer");

    let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("Frontend Developer"));
    assert!(markdown.contains("UI/UX"));

    let html = generator.generate_report(&report, OutputFormat::Html).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("89"));
}
