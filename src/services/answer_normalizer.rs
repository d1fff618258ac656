//! Reconciles the backend's inconsistent option and correct-answer encodings
//! into one canonical form.
//!
//! Observed encodings, each handled as a named branch rather than an inline
//! fallback: options arrive as an array of objects, a JSON-encoded string of
//! one, or a comma-separated string; correct answers arrive as a JSON array,
//! a JSON-encoded string, a bare string, or (for true/false) a boolean or
//! boolean-like string. Unparseable input degrades to empty/fallback values,
//! never to an error.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::domain::{AnswerOption, Exercise, ExerciseType, Question, QuestionType};
use crate::models::dto::response::{value_to_i32, value_to_string};
use crate::models::dto::{ExerciseDto, QuestionDto};

/// True/false questions never carry backend options; these two stand in.
static TRUE_FALSE_OPTIONS: Lazy<[AnswerOption; 2]> = Lazy::new(|| {
    [
        AnswerOption {
            id: "true".to_string(),
            label: "A".to_string(),
            text: "True".to_string(),
            value: "true".to_string(),
        },
        AnswerOption {
            id: "false".to_string(),
            label: "B".to_string(),
            text: "False".to_string(),
            value: "false".to_string(),
        },
    ]
});

pub fn parse_question_type(raw: Option<&str>) -> QuestionType {
    match raw.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("true_false") | Some("truefalse") | Some("boolean") | Some("bool") => {
            QuestionType::TrueFalse
        }
        _ => QuestionType::MultipleChoice,
    }
}

/// Options for one question, canonical form. True/false yields exactly the
/// two fixed options with ids "true" and "false".
pub fn parse_options(dto: &QuestionDto) -> Vec<AnswerOption> {
    if parse_question_type(dto.question_type.as_deref()) == QuestionType::TrueFalse {
        return TRUE_FALSE_OPTIONS.to_vec();
    }

    let Some(raw) = &dto.options else {
        return Vec::new();
    };

    match raw {
        Value::Array(entries) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_option_entry(entry, index))
            .collect(),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| parse_option_entry(entry, index))
                .collect(),
            // Not JSON: comma-separated fallback, e.g. "Paris,London,Rome".
            _ => encoded
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .enumerate()
                .map(|(index, piece)| AnswerOption {
                    id: piece.to_string(),
                    label: letter_label(index),
                    text: piece.to_string(),
                    value: piece.to_string(),
                })
                .collect(),
        },
        _ => Vec::new(),
    }
}

fn parse_option_entry(entry: &Value, index: usize) -> AnswerOption {
    match entry {
        Value::Object(fields) => {
            let value = fields.get("value").and_then(value_to_string);
            let id = fields
                .get("id")
                .and_then(value_to_string)
                .or_else(|| value.clone())
                .unwrap_or_else(|| index.to_string());
            let label = fields
                .get("label")
                .and_then(value_to_string)
                .unwrap_or_else(|| letter_label(index));
            let text = fields
                .get("text")
                .and_then(value_to_string)
                .or_else(|| value.clone())
                .unwrap_or_else(|| label.clone());
            let value = value.unwrap_or_else(|| id.clone());
            AnswerOption { id, label, text, value }
        }
        // Bare scalar: the scalar is both the display text and the identity.
        _ => {
            let text = value_to_string(entry).unwrap_or_else(|| index.to_string());
            AnswerOption {
                id: text.clone(),
                label: letter_label(index),
                text: text.clone(),
                value: text,
            }
        }
    }
}

fn letter_label(index: usize) -> String {
    if index < 26 {
        ((b'A' + index as u8) as char).to_string()
    } else {
        (index + 1).to_string()
    }
}

/// Canonical correct-answer ids for a question. Empty when the backend
/// omitted the field, which is a recognized condition rather than an error.
pub fn correct_answer_ids(dto: &QuestionDto) -> Vec<String> {
    let question_type = parse_question_type(dto.question_type.as_deref());
    let Some(raw) = &dto.correct_answer else {
        return Vec::new();
    };
    parse_answer_value(raw, question_type)
}

fn parse_answer_value(raw: &Value, question_type: QuestionType) -> Vec<String> {
    match raw {
        Value::Bool(b) => vec![b.to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(entries) => entries
            .iter()
            .flat_map(|entry| parse_answer_value(entry, question_type))
            .collect(),
        Value::String(s) => parse_answer_string(s, question_type),
        Value::Null | Value::Object(_) => Vec::new(),
    }
}

fn parse_answer_string(s: &str, question_type: QuestionType) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Boolean-like strings collapse to the synthetic true/false option ids.
    if question_type == QuestionType::TrueFalse {
        if trimmed.eq_ignore_ascii_case("true") {
            return vec!["true".to_string()];
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return vec!["false".to_string()];
        }
    }

    // JSON-encoded payloads, e.g. "[\"b\"]" or "\"b\"".
    if let Ok(decoded) = serde_json::from_str::<Value>(trimmed) {
        if !matches!(decoded, Value::String(_)) {
            return parse_answer_value(&decoded, question_type);
        }
        if let Value::String(inner) = decoded {
            return vec![inner];
        }
    }

    vec![trimmed.to_string()]
}

/// Set-membership test of a selected option id against the canonical
/// correct-answer list.
pub fn is_answer_correct(question: &Question, given_answer_id: &str) -> bool {
    question.correct.iter().any(|id| id == given_answer_id)
}

/// Resolve an answer id to the option it denotes, falling back through
/// identifier, value, positional index, label, then display text. The chain
/// mirrors observed backend inconsistency and is intentionally preserved.
pub fn find_option<'a>(question: &'a Question, given_id: &str) -> Option<&'a AnswerOption> {
    let options = &question.options;

    options
        .iter()
        .find(|o| o.id == given_id)
        .or_else(|| options.iter().find(|o| o.value == given_id))
        .or_else(|| {
            given_id
                .parse::<usize>()
                .ok()
                .and_then(|index| options.get(index))
        })
        .or_else(|| options.iter().find(|o| o.label.eq_ignore_ascii_case(given_id)))
        .or_else(|| options.iter().find(|o| o.text == given_id))
}

pub fn normalize_question(dto: &QuestionDto, index: usize) -> Question {
    let question_type = parse_question_type(dto.question_type.as_deref());
    Question {
        id: dto
            .id
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_else(|| format!("q-{}", index + 1)),
        prompt: dto.prompt.clone().unwrap_or_default(),
        question_type,
        points: dto.points.as_ref().and_then(value_to_i32).unwrap_or(1),
        options: parse_options(dto),
        correct: correct_answer_ids(dto),
        explanation: dto.explanation.clone(),
    }
}

pub fn normalize_exercise(
    dto: &ExerciseDto,
    exercise_type: ExerciseType,
    requested_id: &str,
) -> Exercise {
    Exercise {
        id: dto
            .id
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_else(|| requested_id.to_string()),
        title: dto.title.clone().unwrap_or_default(),
        exercise_type,
        questions: dto
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| normalize_question(q, index))
            .collect(),
        time_limit_seconds: dto
            .time_limit
            .as_ref()
            .and_then(value_to_i32)
            .filter(|&limit| limit > 0)
            .map(|limit| limit as u32),
    }
}
