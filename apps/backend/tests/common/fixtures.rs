//! Test fixtures: DOCX archives built in memory.

use axum_test::multipart::{MultipartForm, Part};
pub use quiz_core::testing::{build_docx, image_paragraph, paragraphs};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Two lists, the first with an image, a probability and an answer key.
pub fn sample_quiz_docx() -> Vec<u8> {
    let mut body = paragraphs(&[
        "LISTA 1",
        "Proficiência Alta",
        "QUESTÃO: 1",
        "PROVA: ENEM 2019",
        "PROBABILIDADE DE ACERTO AO ACASO: 25,5%",
        "Enunciado texto",
    ]);
    body.push_str(&image_paragraph("rIdImg1"));
    body.push_str(&paragraphs(&[
        "a) Alt A",
        "b) Alt B",
        "QUESTÃO: 2",
        "Segunda questão",
        "a) Sim",
        "b) Não",
        "GABARITO:",
        "1-A",
        "LISTA 2",
        "Proficiência Baixa",
        "QUESTÃO: 1",
        "Sem gabarito",
    ]));
    build_docx(&body, &[("image1.png", &[1u8, 2, 3][..])])
}

/// Multipart form with the document under the `docx` field.
pub fn docx_form(bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "docx",
        Part::bytes(bytes)
            .file_name("lista.docx")
            .mime_type(DOCX_MIME),
    )
}
