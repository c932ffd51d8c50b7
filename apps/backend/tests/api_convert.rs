//! Convert API tests.

mod common;

use axum::http::{header, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::fixtures;
use common::{test_server, test_server_with};
use quiz_converter_backend::config::Config;

/// Test a full document converts into lists.
#[tokio::test]
async fn test_convert_sample_document() {
    let server = test_server();

    let response = server
        .post("/convert")
        .multipart(fixtures::docx_form(fixtures::sample_quiz_docx()))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let listas = body["listas"].as_array().unwrap();
    assert_eq!(listas.len(), 2);

    let first = &listas[0];
    assert_eq!(first["name"], "LISTA 1");
    assert_eq!(first["proficiency"], "Alta");
    assert_eq!(first["answerKey"], json!({ "1": "a" }));

    let questions = first["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["number"], "1");
    assert_eq!(questions[0]["examSource"], "ENEM 2019");
    assert_eq!(questions[0]["guessProbability"], "25.5");
    assert_eq!(questions[0]["alternatives"], json!({ "a": "Alt A", "b": "Alt B" }));
    assert_eq!(questions[0]["answer"], "a");
    let statement = questions[0]["statement"].as_str().unwrap();
    assert!(statement.starts_with("Enunciado texto"));
    assert!(statement.contains("[imagem-questao-1-1]"));
    assert!(!statement.contains("base64"));

    // No key entry for question 2, so no answer field at all.
    assert!(questions[1].get("answer").is_none());

    let second = &listas[1];
    assert_eq!(second["name"], "LISTA 2");
    assert_eq!(second["proficiency"], "Baixa");
    assert_eq!(second["questions"][0]["statement"], "Sem gabarito");
    assert_eq!(second["answerKey"], json!({}));
}

/// Test a document without list markers yields no lists.
#[tokio::test]
async fn test_convert_document_without_lists() {
    let server = test_server();
    let docx = fixtures::build_docx(&fixtures::paragraphs(&["Apenas um texto qualquer"]), &[]);

    let response = server
        .post("/convert")
        .multipart(fixtures::docx_form(docx))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "listas": [] }));
}

/// Test a file under another field name is still accepted.
#[tokio::test]
async fn test_convert_accepts_other_file_field() {
    let server = test_server();
    let docx = fixtures::build_docx(&fixtures::paragraphs(&["LISTA 9"]), &[]);
    let form = MultipartForm::new()
        .add_text("comment", "ignored")
        .add_part("file", Part::bytes(docx).file_name("outro.docx"));

    let response = server.post("/convert").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["listas"][0]["name"], "LISTA 9");
}

/// Test a multipart request without a file is rejected.
#[tokio::test]
async fn test_convert_without_file() {
    let server = test_server();
    let form = MultipartForm::new().add_text("comment", "sem arquivo");

    let response = server.post("/convert").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Nenhum arquivo enviado." }));
}

/// Test a text field named `docx` does not count as a file.
#[tokio::test]
async fn test_convert_text_field_named_docx() {
    let server = test_server();
    let form = MultipartForm::new().add_text("docx", "not a file");

    let response = server.post("/convert").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Nenhum arquivo enviado." }));
}

/// Test a request that is not multipart is rejected the same way.
#[tokio::test]
async fn test_convert_without_multipart_body() {
    let server = test_server();

    let response = server.post("/convert").json(&json!({ "docx": "x" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Nenhum arquivo enviado." }));
}

/// Test an unreadable document reports the conversion error.
#[tokio::test]
async fn test_convert_corrupt_document() {
    let server = test_server();
    let garbage = b"this is not a docx".to_vec();
    let expected = quiz_core::parse_docx(&garbage).unwrap_err().to_string();

    let response = server
        .post("/convert")
        .multipart(fixtures::docx_form(garbage))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": expected }));
}

/// Test an archive without the main document part.
#[tokio::test]
async fn test_convert_archive_without_document() {
    use std::io::{Cursor, Write};

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"hello").unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(fixtures::docx_form(bytes))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing document part: word/document.xml");
}

/// Test uploads over the configured limit are refused.
#[tokio::test]
async fn test_convert_upload_too_large() {
    let server = test_server_with(Config {
        max_upload_bytes: 64,
        ..Config::default()
    });

    let response = server
        .post("/convert")
        .multipart(fixtures::docx_form(fixtures::sample_quiz_docx()))
        .await;

    assert!(!response.status_code().is_success());
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Failed to read upload"));
}

/// Test CORS allows any origin.
#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = test_server();

    let response = server
        .get("/health")
        .add_header(header::ORIGIN, "https://example.com")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

/// Test health check.
#[tokio::test]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}
