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

use std::path::Component;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;

/// The file loader takes path strings from HTTP requests and returns the
/// absolute path to the file inside the served directory, if it exists.
///
/// This takes unsafe strings from the client, so we have to ensure there's
/// no possibility of directory traversals.
pub struct FileLoader {
    /// Absolute path to the served root directory.
    root: PathBuf,
}

/// Errors that can occur when loading a path.
#[derive(Debug, PartialEq)]
pub enum FileLoaderError {
    /// Path is absolute.
    Absolute,
    /// Path does not exist.
    NotFound,
    /// Path is not a file.
    NotFile,
    /// Path points to a symbolic link.
    SymbolicLink,
    /// Path contains parent (`..`) components.
    ParentComponent,
}

impl FileLoader {
    /// Construct a new [`FileLoader`].
    pub fn new(path: PathBuf) -> Self {
        assert!(path.is_absolute());
        Self { root: path }
    }

    /// Given a path string from the client, check that a file exists at that
    /// location within the served root directory.
    ///
    /// Symbolic links and absolute paths are rejected. If the file is not
    /// found, the percent-decoded path (e.g., %20 to space) is tried as a
    /// fallback.
    pub fn validate(&self, path: &str) -> Result<PathBuf, FileLoaderError> {
        match self.validate_inner(path) {
            Ok(validated) => Ok(validated),
            Err(FileLoaderError::NotFound) => match percent_decode(path) {
                Some(decoded) if decoded != path => self.validate_inner(&decoded),
                _ => Err(FileLoaderError::NotFound),
            },
            Err(e) => Err(e),
        }
    }

    fn validate_inner(&self, path: &str) -> Result<PathBuf, FileLoaderError> {
        let path: PathBuf = PathBuf::from(path);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(FileLoaderError::ParentComponent);
        }
        if path.is_absolute() {
            return Err(FileLoaderError::Absolute);
        }
        let path: PathBuf = self.root.join(path);
        if !path.exists() {
            return Err(FileLoaderError::NotFound);
        }
        if path.is_symlink() {
            return Err(FileLoaderError::SymbolicLink);
        }
        if !path.is_file() {
            return Err(FileLoaderError::NotFile);
        }
        Ok(path)
    }
}

/// Decode percent-encoded characters in a URL path.
fn percent_decode(s: &str) -> Option<String> {
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;
    use crate::error::Fallible;

    fn make_root() -> Fallible<(tempfile::TempDir, PathBuf)> {
        let dir = tempdir()?;
        let root = dir.path().canonicalize()?;
        Ok((dir, root))
    }

    /// Absolute paths are rejected.
    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_abs_rejected() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        let loader = FileLoader::new(root);
        assert_eq!(
            loader.validate("/etc/passwd"),
            Err(FileLoaderError::Absolute)
        );
        Ok(())
    }

    /// Paths with parent components are rejected.
    #[test]
    fn test_parent_rejected() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        let loader = FileLoader::new(root);
        assert_eq!(
            loader.validate("../../../../../../../../../../etc/passwd"),
            Err(FileLoaderError::ParentComponent)
        );
        Ok(())
    }

    /// Paths to non-existent files are rejected.
    #[test]
    fn test_non_existent() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        let loader = FileLoader::new(root);
        assert_eq!(
            loader.validate("does_not_exist.json"),
            Err(FileLoaderError::NotFound)
        );
        Ok(())
    }

    /// Paths to directories are rejected.
    #[test]
    fn test_directory_rejected() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        fs::create_dir(root.join("assets"))?;
        let loader = FileLoader::new(root);
        assert_eq!(loader.validate("assets"), Err(FileLoaderError::NotFile));
        Ok(())
    }

    /// An existing file resolves to its absolute path.
    #[test]
    fn test_existing_file() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        fs::write(root.join("questions.json"), "[]")?;
        let loader = FileLoader::new(root.clone());
        assert_eq!(
            loader.validate("questions.json"),
            Ok(root.join("questions.json"))
        );
        Ok(())
    }

    /// A file in a subdirectory resolves.
    #[test]
    fn test_nested_file() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        fs::create_dir(root.join("assets"))?;
        fs::write(root.join("assets").join("app.js"), "")?;
        let loader = FileLoader::new(root.clone());
        assert_eq!(
            loader.validate("assets/app.js"),
            Ok(root.join("assets").join("app.js"))
        );
        Ok(())
    }

    /// A percent-encoded name falls back to the decoded file.
    #[test]
    fn test_percent_encoded_fallback() -> Fallible<()> {
        let (_dir, root) = make_root()?;
        fs::write(root.join("my file.txt"), "")?;
        let loader = FileLoader::new(root.clone());
        assert_eq!(
            loader.validate("my%20file.txt"),
            Ok(root.join("my file.txt"))
        );
        Ok(())
    }
}
