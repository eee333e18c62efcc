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

use std::path::Path;

use crate::bank::load_bank;
use crate::error::Fallible;
use crate::error::fail;

/// Check that a bank file parses and that every record satisfies the bank
/// invariants. Unlike an append run, corruption here is an error.
pub fn check_bank(path: &str) -> Fallible<()> {
    let questions = load_bank(Path::new(path))?;
    for (index, question) in questions.iter().enumerate() {
        if question.question.is_empty() {
            return fail(format!("record {index}: empty question text."));
        }
        if question.options.is_empty() {
            return fail(format!("record {index}: no options."));
        }
        if question.answer.is_empty() {
            return fail(format!("record {index}: empty answer."));
        }
    }
    println!("{} question(s), no problems found.", questions.len());
    Ok(())
}
