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

use std::fs::read_to_string;
use std::io::Read;
use std::path::Path;

use crate::bank::load_bank_lenient;
use crate::bank::merge_banks;
use crate::bank::write_bank;
use crate::error::Fallible;
use crate::parser::parse_questions;

/// Run the parse command: acquire the full input, scan it, and persist the
/// bank. An unreadable input file is fatal; a missing or corrupt prior bank
/// is not.
pub fn run_parse(input: Option<String>, output: String, append: bool) -> Fallible<()> {
    let raw = match input {
        Some(path) => read_to_string(path)?,
        None => read_stdin()?,
    };
    let parsed = parse_questions(&raw);
    log::debug!("parsed {} record(s) from input", parsed.len());

    let out_path = Path::new(&output);
    let existing = if append {
        load_bank_lenient(out_path)
    } else {
        Vec::new()
    };
    let count = parsed.len();
    let merged = merge_banks(existing, parsed);
    write_bank(out_path, &merged)?;

    let suffix = if append { " (appended)" } else { "" };
    println!("Wrote {count} question(s) to {output}{suffix}.");
    Ok(())
}

/// Drain standard input to completion. The scanner never runs on partial
/// input.
fn read_stdin() -> Fallible<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::bank::load_bank;
    use crate::error::Fallible;
    use crate::types::question::Question;

    const EXPORT: &str = "\
What is 2+2?
3
4
5

Yes, the answer is correct.
Accepted Answers:
4
1 point
";

    fn expected() -> Question {
        Question {
            question: "What is 2+2?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            answer: "4".to_string(),
        }
    }

    #[test]
    fn test_parse_writes_bank() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("public").join("questions.json");
        fs::write(&input, EXPORT)?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            false,
        )?;

        assert_eq!(load_bank(&output)?, vec![expected()]);
        Ok(())
    }

    #[test]
    fn test_parse_overwrites_by_default() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("questions.json");
        fs::write(&input, EXPORT)?;
        fs::write(&output, r#"[{"question":"old","options":["x"],"answer":"x"}]"#)?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            false,
        )?;

        assert_eq!(load_bank(&output)?, vec![expected()]);
        Ok(())
    }

    #[test]
    fn test_append_concatenates_after_existing() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("questions.json");
        fs::write(&input, EXPORT)?;
        let prior = Question {
            question: "old".to_string(),
            options: vec!["x".to_string()],
            answer: "x".to_string(),
        };
        crate::bank::write_bank(&output, &[prior.clone()])?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            true,
        )?;

        assert_eq!(load_bank(&output)?, vec![prior, expected()]);
        Ok(())
    }

    #[test]
    fn test_append_recovers_from_corrupt_bank() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("questions.json");
        fs::write(&input, EXPORT)?;
        fs::write(&output, "{ not json")?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            true,
        )?;

        assert_eq!(load_bank(&output)?, vec![expected()]);
        Ok(())
    }

    #[test]
    fn test_append_to_missing_bank() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("questions.json");
        fs::write(&input, EXPORT)?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            true,
        )?;

        assert_eq!(load_bank(&output)?, vec![expected()]);
        Ok(())
    }

    #[test]
    fn test_input_with_no_records_writes_empty_bank() -> Fallible<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.txt");
        let output = dir.path().join("questions.json");
        fs::write(&input, "Q1\na\nb\n")?;

        run_parse(
            Some(input.display().to_string()),
            output.display().to_string(),
            false,
        )?;

        assert_eq!(fs::read_to_string(&output)?, "[]\n");
        Ok(())
    }

    #[test]
    fn test_unreadable_input_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let output = dir.path().join("questions.json");
        let result = run_parse(
            Some(missing.display().to_string()),
            output.display().to_string(),
            false,
        );
        assert!(result.is_err());
        // No partial output may exist after a failed run.
        assert!(!output.exists());
    }
}
