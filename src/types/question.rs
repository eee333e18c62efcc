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

use serde::Deserialize;
use serde::Serialize;

/// A single quiz question as stored in the bank artifact.
///
/// Declaration order is the serialization order: `question`, `options`,
/// `answer`. Options keep their encounter order and may contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    /// Whether the record satisfies the bank invariants: non-empty question
    /// text, at least one option, non-empty answer.
    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.options.is_empty() && !self.answer.is_empty()
    }
}
