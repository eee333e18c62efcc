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

use std::fs;
use std::path::Path;

use crate::error::Fallible;
use crate::types::question::Question;

/// Read an existing bank, tolerating absence or corruption.
///
/// Any read or parse failure yields an empty bank, so an append run never
/// fails because of what was previously on disk.
pub fn load_bank_lenient(path: &Path) -> Vec<Question> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&text) {
        Ok(questions) => questions,
        Err(e) => {
            log::debug!("ignoring malformed bank at {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Read a bank strictly. Used by `check`, where corruption is an error
/// rather than something to recover from.
pub fn load_bank(path: &Path) -> Fallible<Vec<Question>> {
    let text = fs::read_to_string(path)?;
    let questions = serde_json::from_str(&text)?;
    Ok(questions)
}

/// Concatenate newly parsed records after the existing ones. Order within
/// each sequence is preserved and nothing is deduplicated.
pub fn merge_banks(existing: Vec<Question>, new: Vec<Question>) -> Vec<Question> {
    let mut merged = existing;
    merged.extend(new);
    merged
}

/// Persist the bank: create the parent directory if needed, serialize the
/// whole array, and write it in one operation. The previous file is only
/// replaced once serialization has succeeded.
pub fn write_bank(path: &Path, questions: &[Question]) -> Fallible<()> {
    let serialized = serde_json::to_string_pretty(questions)? + "\n";
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serialized)?;
    Ok(())
}
