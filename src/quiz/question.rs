//! Question records and the CSV loader.
//!
//! The file is a header row followed by one question per row. `question` and
//! `answer` columns are required; `id`, `subject` and `difficulty` are read
//! when present. Fields may be double-quoted, in which case they can hold
//! commas, newlines and `""` escapes.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Optional identifier from the `id` column.
    pub id: Option<String>,
    /// Text shown to the player.
    pub prompt: String,
    /// The correct answer.
    pub answer: String,
    /// Free-form subject tag.
    pub subject: String,
    /// Free-form difficulty tag.
    pub difficulty: String,
}

impl Question {
    /// Creates a question with no id or tags.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            prompt: prompt.into(),
            answer: answer.into(),
            subject: String::new(),
            difficulty: String::new(),
        }
    }
}

/// Reads and parses a question CSV file.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = parse_questions(&text)?;
    log::info!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// File picked by default when a folder holds several quizzes.
pub const DEFAULT_QUESTION_FILE: &str = "questions.csv";

/// Lists the `*.csv` files directly inside `dir`, sorted by name.
pub fn list_question_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let io_error = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("found {} question files in {}", files.len(), dir.display());
    Ok(files)
}

/// Index of the quiz to preselect: [`DEFAULT_QUESTION_FILE`] when listed,
/// otherwise the first file.
pub fn default_question_file(files: &[PathBuf]) -> Option<usize> {
    files
        .iter()
        .position(|p| p.file_name().is_some_and(|n| n == DEFAULT_QUESTION_FILE))
        .or((!files.is_empty()).then_some(0))
}

/// Parses question CSV text.
///
/// Rows missing a question or an answer are skipped.
pub fn parse_questions(text: &str) -> Result<Vec<Question>> {
    let mut records = parse_records(text.strip_prefix('\u{feff}').unwrap_or(text))?.into_iter();

    let Some(header) = records.next() else {
        log::warn!("question CSV is empty");
        return Ok(Vec::new());
    };
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let question_col = column("question").ok_or(Error::MissingColumn("question"))?;
    let answer_col = column("answer").ok_or(Error::MissingColumn("answer"))?;
    let id_col = column("id");
    let subject_col = column("subject");
    let difficulty_col = column("difficulty");

    let field = |record: &[String], col: Option<usize>| {
        col.and_then(|c| record.get(c))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let questions: Vec<Question> = records
        .filter_map(|record| {
            let prompt = field(&record, Some(question_col));
            let answer = field(&record, Some(answer_col));
            if prompt.is_empty() || answer.is_empty() {
                return None;
            }
            let id = field(&record, id_col);
            Some(Question {
                id: (!id.is_empty()).then_some(id),
                prompt,
                answer,
                subject: field(&record, subject_col),
                difficulty: field(&record, difficulty_col),
            })
        })
        .collect();

    if questions.is_empty() {
        log::warn!("question CSV has no usable rows");
    }
    Ok(questions)
}

/// Splits CSV text into records of fields.
///
/// Blank lines outside quotes produce no record. A quote only opens a quoted
/// field at the start of that field; anywhere else it is kept as text.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
                quote_line = line;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_start = true;
            }
            '\r' => {}
            '\n' => {
                line += 1;
                finish_record(&mut records, &mut record, &mut field);
                field_start = true;
            }
            _ => {
                field.push(c);
                field_start = false;
            }
        }
    }

    if in_quotes {
        return Err(Error::UnterminatedQuote { line: quote_line });
    }
    finish_record(&mut records, &mut record, &mut field);
    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
