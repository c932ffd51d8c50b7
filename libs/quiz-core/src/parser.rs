//! Quiz parser for converted documents.
//!
//! # Format
//! ```text
//! LISTA 1
//! Proficiência Alta
//! QUESTÃO: 1
//! PROVA: ENEM 2019
//! PROBABILIDADE DE ACERTO AO ACASO: 20%
//! Enunciado da questão
//! a) Primeira alternativa
//! b) Segunda alternativa
//! GABARITO:
//! 1-A
//! ```
//!
//! Text that does not follow the format is skipped, never rejected: missing
//! labels leave the corresponding fields empty.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::docx::docx_to_html;
use crate::error::Result;
use crate::markdown::html_to_markdown;
use crate::types::{List, Question};

/// Empty-alt JPEG: the cover page, dropped without a placeholder.
static COVER_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!?\[\]\(data:image/jpeg;base64,[^)]+\)").unwrap());
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^LISTA\s+[0-9]+").unwrap());
static LIST_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^LISTA\s+[0-9]+").unwrap());
static PROFICIENCY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Profici[êe]ncia\s+").unwrap());
static PROFICIENCY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Profici[êe]ncia\s*").unwrap());
static ANSWER_KEY_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)GABARITO:").unwrap());
static QUESTION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)QUESTÃO:").unwrap());
static QUESTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)QUESTÃO:\s*([0-9]+)").unwrap());
static INLINE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!?\[[^\]]*\]\(data:image/[^)]+\)").unwrap());
static EXAM_SOURCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)PROVA:\s*(.+)").unwrap());
static GUESS_PROBABILITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PROBABILIDADE DE ACERTO AO ACASO:\s*([0-9.,]+)%").unwrap()
});
static ALTERNATIVE_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^[a-e]\)").unwrap());
static ALTERNATIVE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\n[a-e]\)").unwrap());
static ALTERNATIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([a-e])\)\s*(.*)").unwrap());
static ANSWER_KEY_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)[.\s-]*([A-Za-z])").unwrap());

/// Convert a DOCX document and parse the quiz lists it contains.
pub fn parse_docx(bytes: &[u8]) -> Result<Vec<List>> {
    let html = docx_to_html(bytes)?;
    let markdown = html_to_markdown(&html);
    Ok(parse_markdown(&markdown))
}

/// Parse converted document text into quiz lists.
///
/// Text before the first `LISTA <n>` line belongs to no list.
pub fn parse_markdown(text: &str) -> Vec<List> {
    let text = text.replace("\r\n", "\n");
    let text = COVER_IMAGE.replace_all(&text, "");

    let lists: Vec<List> = split_list_blocks(&text).into_iter().map(parse_list).collect();
    tracing::debug!(
        lists = lists.len(),
        questions = lists.iter().map(|l| l.questions.len()).sum::<usize>(),
        "parsed quiz document"
    );
    lists
}

/// Slice the text at every line that starts a list.
fn split_list_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = LIST_MARKER.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(idx, &start)| {
            let end = starts.get(idx + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .filter(|block| !block.trim().is_empty())
        .collect()
}

fn parse_list(block: &str) -> List {
    let mut list = List::default();

    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if let Some(first) = lines.first().filter(|line| LIST_NAME.is_match(line)) {
        list.name = first.to_string();
    }
    if let Some(line) = lines.iter().find(|line| PROFICIENCY_LINE.is_match(line)) {
        list.proficiency = PROFICIENCY_LABEL.replace(line, "").trim().to_string();
    }

    let (questions_part, answer_key_part) = match ANSWER_KEY_LABEL.find(block) {
        Some(label) => (&block[..label.start()], &block[label.end()..]),
        None => (block, ""),
    };

    list.questions = parse_questions(questions_part);
    list.answer_key = parse_answer_key(answer_key_part);
    list.apply_answer_key();
    list
}

/// Each question runs from its `QUESTÃO: <n>` header to the next `QUESTÃO:`
/// label or the end of the segment.
fn parse_questions(segment: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut pos = 0;

    while let Some(header) = QUESTION_HEADER.captures_at(segment, pos) {
        let body_start = header.get(0).map_or(segment.len(), |m| m.end());
        let body_end = QUESTION_MARKER
            .find_at(segment, body_start)
            .map_or(segment.len(), |m| m.start());

        questions.push(parse_question(&header[1], &segment[body_start..body_end]));
        pos = body_end;
    }

    questions
}

fn parse_question(number: &str, body: &str) -> Question {
    let mut question = Question::new(number);

    // Placeholders go in first so no field ever carries image data.
    let mut image_index = 0;
    let content = INLINE_IMAGE.replace_all(body.trim(), |_: &Captures| {
        image_index += 1;
        format!("[imagem-questao-{number}-{image_index}]")
    });

    if let Some(caps) = EXAM_SOURCE.captures(&content) {
        question.exam_source = caps[1].trim().to_string();
    }
    if let Some(caps) = GUESS_PROBABILITY.captures(&content) {
        question.guess_probability = caps[1].trim().replacen(',', ".", 1);
    }

    let content = EXAM_SOURCE.replace(&content, "");
    let content = GUESS_PROBABILITY.replace(&content, "");
    let content = content.trim();

    match ALTERNATIVE_START.find(content) {
        Some(start) => {
            question.statement = content[..start.start()].trim().to_string();
            for entry in split_alternatives(content[start.start()..].trim()) {
                if let Some(caps) = ALTERNATIVE.captures(entry) {
                    question
                        .alternatives
                        .insert(caps[1].to_lowercase(), caps[2].trim().to_string());
                }
            }
        }
        None => question.statement = content.to_string(),
    }

    question
}

/// Split at every newline that is followed by an alternative marker.
fn split_alternatives(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    for marker in ALTERNATIVE_BREAK.find_iter(text) {
        entries.push(&text[start..marker.start()]);
        start = marker.start() + 1;
    }
    entries.push(&text[start..]);
    entries
}

fn parse_answer_key(segment: &str) -> BTreeMap<String, String> {
    ANSWER_KEY_ENTRY
        .captures_iter(segment)
        .map(|caps| (caps[1].to_string(), caps[2].to_lowercase()))
        .collect()
}
