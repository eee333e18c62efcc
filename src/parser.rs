// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::question::Question;

static CONFIRMATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^yes,\s*the\s*answer\s*is\s*correct\.?").expect("confirmation pattern")
});

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^score:").expect("score pattern"));

static ACCEPTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^accepted answers:").expect("accepted answers pattern"));

static POINTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*points?$").expect("points pattern"));

/// Normalize raw input into scanner lines: carriage returns removed,
/// surrounding whitespace trimmed. Blank lines are kept as empty strings,
/// they separate blocks downstream.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split('\n').map(normalize_line).collect()
}

fn normalize_line(line: &str) -> String {
    line.replace('\r', "").trim().to_string()
}

/// How a normalized line reads to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    /// Empty after normalization.
    Blank,
    /// An acknowledgement like "Yes, the answer is correct."
    Confirmation,
    /// A "Score:" grading line.
    Score,
    /// The "Accepted Answers:" delimiter.
    AcceptedMarker,
    /// A bare point counter like "1 point" or "2 points".
    Points,
    /// Anything else.
    Content,
}

impl LineClass {
    fn read(line: &str) -> Self {
        if line.is_empty() {
            LineClass::Blank
        } else if CONFIRMATION.is_match(line) {
            LineClass::Confirmation
        } else if SCORE.is_match(line) {
            LineClass::Score
        } else if ACCEPTED.is_match(line) {
            LineClass::AcceptedMarker
        } else if POINTS.is_match(line) {
            LineClass::Points
        } else {
            LineClass::Content
        }
    }
}

enum State {
    /// Between records: skipping inter-question noise until a content line
    /// becomes the next question text.
    SeekQuestion,
    /// Consuming consecutive content lines as options.
    CollectOptions {
        question: String,
        options: Vec<String>,
    },
    /// Skipping noise and stray content until the accepted-answers marker.
    SeekMarker {
        question: String,
        options: Vec<String>,
    },
    /// Marker consumed: the next non-blank line is the answer.
    ReadAnswer {
        question: String,
        options: Vec<String>,
    },
    /// Candidate emitted: skipping trailing grading noise.
    TrailingSkip,
}

/// Extract question records from a raw quiz export.
///
/// The scan is total: a block with no accepted-answers marker before the
/// input ends, or a candidate missing one of its three fields, is dropped
/// rather than reported. Records come out in source order.
pub fn parse_questions(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut state = State::SeekQuestion;
    for line in normalize_lines(text) {
        state = step(state, &line, &mut questions);
    }
    // A candidate still in flight here is discarded: emission only happens
    // on reading an answer line.
    questions
}

fn step(state: State, line: &str, questions: &mut Vec<Question>) -> State {
    match state {
        State::SeekQuestion => match LineClass::read(line) {
            LineClass::Content => State::CollectOptions {
                question: line.to_string(),
                options: Vec::new(),
            },
            _ => State::SeekQuestion,
        },
        State::CollectOptions {
            question,
            mut options,
        } => match LineClass::read(line) {
            LineClass::Content => {
                options.push(line.to_string());
                State::CollectOptions { question, options }
            }
            LineClass::AcceptedMarker => State::ReadAnswer { question, options },
            _ => State::SeekMarker { question, options },
        },
        State::SeekMarker { question, options } => match LineClass::read(line) {
            LineClass::AcceptedMarker => State::ReadAnswer { question, options },
            // Stray content here is already-consumed text; only the marker
            // ends this state.
            _ => State::SeekMarker { question, options },
        },
        State::ReadAnswer { question, options } => match LineClass::read(line) {
            LineClass::Blank => State::ReadAnswer { question, options },
            // The answer line is taken verbatim, with no classification
            // check: a line reading "Score: 5" is a valid answer here.
            _ => {
                emit(questions, question, options, line.to_string());
                State::TrailingSkip
            }
        },
        State::TrailingSkip => match LineClass::read(line) {
            LineClass::Blank | LineClass::Score | LineClass::Points => State::TrailingSkip,
            // Confirmation and marker lines are inter-question noise for the
            // next seek pass.
            LineClass::Confirmation | LineClass::AcceptedMarker => State::SeekQuestion,
            LineClass::Content => State::CollectOptions {
                question: line.to_string(),
                options: Vec::new(),
            },
        },
    }
}

/// Append the candidate if it is complete. Incomplete candidates are
/// silently dropped.
fn emit(questions: &mut Vec<Question>, question: String, options: Vec<String>, answer: String) {
    let record = Question {
        question,
        options,
        answer,
    };
    if record.is_complete() {
        questions.push(record);
    }
}
