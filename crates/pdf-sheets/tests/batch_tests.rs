mod common;

use common::*;
use pdf_sheets::batch::{batch_code, sort_by_batch_code};
use pdf_sheets::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn entry(file_name: &str) -> DocumentEntry {
    DocumentEntry {
        path: PathBuf::from(file_name),
        file_name: file_name.to_string(),
    }
}

fn names(entries: &[DocumentEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.file_name.as_str()).collect()
}

#[test]
fn test_batch_code() {
    assert_eq!(batch_code("A1_cover.pdf"), "A1");
    assert_eq!(batch_code("x.pdf"), "x.");
    assert_eq!(batch_code("a"), "a");
    assert_eq!(batch_code("éte.pdf"), "ét");
    assert_eq!(batch_code("sub/B2_inner.pdf"), "B2");
}

#[test]
fn test_sort_by_batch_code_is_stable() {
    let mut entries = vec![
        entry("B1_z.pdf"),
        entry("A2_b.pdf"),
        entry("B1_a.pdf"),
        entry("A1_c.pdf"),
    ];
    sort_by_batch_code(&mut entries);

    // Only the first two characters order; ties keep their input order
    assert_eq!(
        names(&entries),
        vec!["A1_c.pdf", "A2_b.pdf", "B1_z.pdf", "B1_a.pdf"]
    );
}

#[tokio::test]
async fn test_discover_only_pdfs_top_level() {
    let dir = TempDir::new().unwrap();
    write_test_pdf(&dir.path().join("b2_second.pdf"), &[A4]);
    write_test_pdf(&dir.path().join("a1_first.PDF"), &[A4]);
    std::fs::write(dir.path().join("notes.txt"), "not a document").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    write_test_pdf(&dir.path().join("sub").join("c3_nested.pdf"), &[A4]);

    let found = discover_documents(dir.path(), false).await.unwrap();
    assert_eq!(names(&found), vec!["a1_first.PDF", "b2_second.pdf"]);
    assert_eq!(found[0].path, dir.path().join("a1_first.PDF"));

    let found = discover_documents(dir.path(), true).await.unwrap();
    let nested = Path::new("sub").join("c3_nested.pdf");
    assert_eq!(
        names(&found),
        vec!["a1_first.PDF", "b2_second.pdf", nested.to_str().unwrap()]
    );
}

#[tokio::test]
async fn test_discover_missing_folder() {
    let result = discover_documents(Path::new("/definitely/not/a/folder"), false).await;
    assert!(matches!(result, Err(SheetsError::Io(_))));
}

#[tokio::test]
async fn test_corrupt_document_is_isolated() {
    let dir = TempDir::new().unwrap();
    write_test_pdf(&dir.path().join("01_first.pdf"), &[A4, A4_LANDSCAPE, A3]);
    std::fs::write(dir.path().join("02_broken.pdf"), b"this is not a PDF").unwrap();
    write_test_pdf(&dir.path().join("03_third.pdf"), &[A3, A3]);

    let report = analyze_folder(dir.path(), &AnalysisOptions::default())
        .await
        .unwrap();

    let inventory: Vec<&str> = report
        .inventory
        .iter()
        .map(|row| row.file_name.as_str())
        .collect();
    assert_eq!(inventory, vec!["01_first.pdf", "02_broken.pdf", "03_third.pdf"]);
    assert_eq!(report.inventory[0].page_count(), Some(3));
    assert!(matches!(
        report.inventory[1].pages,
        Err(DocumentReadError::Open(_))
    ));
    assert_eq!(report.inventory[2].page_count(), Some(2));

    let documents: Vec<&str> = report
        .documents
        .iter()
        .map(|stats| stats.file_name.as_str())
        .collect();
    assert_eq!(documents, vec!["01_first.pdf", "03_third.pdf"]);

    // 01: (1,2) (3) / 03: (1,2)
    assert_eq!(report.summary.total_pages, 5);
    assert_eq!(report.summary.total_sheets, 3);
    assert_eq!(report.summary.total_orphans, 1);
}

#[tokio::test]
async fn test_geometry_error_fails_document() {
    use lopdf::Dictionary;

    let dir = TempDir::new().unwrap();
    let pages = vec![
        Dictionary::from_iter(vec![("MediaBox", media_box(595, 842))]),
        Dictionary::new(),
    ];
    let mut doc = create_document_with(pages, Dictionary::new());
    write_pdf(&mut doc, &dir.path().join("01_no_box.pdf"));
    write_test_pdf(&dir.path().join("02_ok.pdf"), &[A4]);

    let report = analyze_folder(dir.path(), &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(matches!(
        report.inventory[0].pages,
        Err(DocumentReadError::Geometry { page: 2, .. })
    ));
    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.summary.total_pages, 1);
}

#[tokio::test]
async fn test_tolerance_option_applies() {
    let dir = TempDir::new().unwrap();
    // 595 pt and 596 pt wide differ by 0.35 mm
    write_test_pdf(&dir.path().join("01_doc.pdf"), &[(595, 842), (596, 842)]);

    let strict = analyze_folder(dir.path(), &AnalysisOptions::default())
        .await
        .unwrap();
    assert_eq!(strict.summary.total_sheets, 2);

    let loose = AnalysisOptions {
        tolerance_mm: 0.5,
        ..Default::default()
    };
    let report = analyze_folder(dir.path(), &loose).await.unwrap();
    assert_eq!(report.summary.total_sheets, 1);
}

#[tokio::test]
async fn test_invalid_options_rejected() {
    let dir = TempDir::new().unwrap();
    let options = AnalysisOptions {
        tolerance_mm: -1.0,
        ..Default::default()
    };
    let result = analyze_folder(dir.path(), &options).await;
    assert!(matches!(result, Err(SheetsError::Config(_))));
}

#[tokio::test]
async fn test_empty_folder() {
    let dir = TempDir::new().unwrap();
    let report = analyze_folder(dir.path(), &AnalysisOptions::default())
        .await
        .unwrap();
    assert_eq!(report, BatchReport::default());
}

fn pdf_bytes(page_sizes: &[(i64, i64)]) -> Vec<u8> {
    let mut doc = create_test_document(page_sizes);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, bytes) in entries {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_extract_zip_sanitizes_paths() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("batch.zip");
    write_zip(
        &archive,
        &[
            ("01_a.pdf", pdf_bytes(&[A4])),
            ("../escape.pdf", pdf_bytes(&[A4])),
        ],
    );

    let dest = dir.path().join("out");
    let written = archive::extract_zip(&archive, &dest).unwrap();

    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|path| path.starts_with(&dest)));
    assert!(dest.join("escape.pdf").exists());
    assert!(!dir.path().join("escape.pdf").exists());
}

#[test]
fn test_extract_zip_rejects_password_protected() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("locked.zip");
    let file = std::fs::File::create(&archive).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file(
        "01_a.pdf",
        zip::write::SimpleFileOptions::default().with_deprecated_encryption(b"secret"),
    )
    .unwrap();
    zip.write_all(&pdf_bytes(&[A4])).unwrap();
    zip.finish().unwrap();

    let result = archive::extract_zip(&archive, &dir.path().join("out"));
    match result {
        Err(SheetsError::Archive(message)) => assert!(message.contains("01_a.pdf")),
        other => panic!("Expected archive error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyze_unpacked_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("batch.zip");
    write_zip(
        &archive,
        &[
            ("02_b.pdf", pdf_bytes(&[A3, A3, A3])),
            ("01_a.pdf", pdf_bytes(&[A4, A4])),
            ("readme.txt", b"ignored".to_vec()),
        ],
    );

    assert!(is_zip(&archive));
    let unpacked = unpack_archive(&archive).await.unwrap();
    let report = analyze_folder(unpacked.path(), &AnalysisOptions::default())
        .await
        .unwrap();

    let documents: Vec<&str> = report
        .documents
        .iter()
        .map(|stats| stats.file_name.as_str())
        .collect();
    assert_eq!(documents, vec!["01_a.pdf", "02_b.pdf"]);
    assert_eq!(report.summary.total_pages, 5);
    assert_eq!(report.summary.total_sheets, 3);
    assert_eq!(report.summary.total_orphans, 1);
}

#[tokio::test]
async fn test_unpack_invalid_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("broken.zip");
    std::fs::write(&archive, b"not a zip").unwrap();

    assert!(matches!(
        unpack_archive(&archive).await,
        Err(SheetsError::Zip(_))
    ));
}
