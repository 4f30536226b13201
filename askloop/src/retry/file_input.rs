//! # File & Directory Selection
//!
//! Ready-made callers of [`ValidatedRetryLoop`] for the two things an
//! interactive tool asks paths for: a file to import and a directory to
//! export into.
//!
//! Paths pasted or dragged into a terminal often arrive with surrounding
//! blanks and, on Unix, shell escapes (`My\ Data/in.txt`); [`clean_path`]
//! strips them before the path reaches the loader. Windows paths keep their
//! backslashes.
//!
//! ## Example
//! ```rust,no_run
//! use askloop::retry::{ExportTarget, Validation, exporting_path_input, file_input};
//! use askloop::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let notes = file_input(&mut terminal, "notes file", |path| {
//!     let text = std::fs::read_to_string(path)?;
//!     if text.trim().is_empty() {
//!         return Ok::<_, std::io::Error>(Validation::reject("No notes in file. Can not proceed."));
//!     }
//!     Ok(Validation::Accept(text))
//! })
//! .unwrap();
//!
//! if let ExportTarget::Directory(dir) = exporting_path_input(&mut terminal, "Notes").unwrap() {
//!     std::fs::write(dir.join(format!("{}.txt", notes.file_name)), notes.value).unwrap();
//! }
//! ```
use std::convert::Infallible;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::PromptError;
use crate::retry::{ValidatedRetryLoop, Validation};
use crate::utils::Terminal;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        /// Trims blanks and drops shell escape backslashes.
        pub fn clean_path(raw: &str) -> String {
            raw.trim().replace('\\', "")
        }
    } else {
        /// Trims blanks. Backslashes are path separators here and are kept.
        pub fn clean_path(raw: &str) -> String {
            raw.trim().to_string()
        }
    }
}

/// A file accepted by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedFile<T> {
    pub value: T,
    pub path: PathBuf,
    /// Last path component without its extension.
    pub file_name: String,
}

/// Where results should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// The operator left the path empty.
    Discard,
    Directory(PathBuf),
}

impl ExportTarget {
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Discard => None,
            Self::Directory(dir) => Some(dir),
        }
    }
}

impl ValidatedRetryLoop {
    /// A loop for picking an export directory; no success message.
    pub fn for_export(name: &str) -> Self {
        let prefix = if name.is_empty() {
            String::from("Exporting")
        } else {
            format!("{} exporting", name)
        };

        ValidatedRetryLoop::new(name)
            .message(format!("{} Path (leave empty if not to save)", prefix))
            .success_message(false)
    }

    /// Runs the loop, passing cleaned paths to `loader`.
    pub fn run_file<R, W, T, E, F>(
        &self,
        terminal: &mut Terminal<R, W>,
        mut loader: F,
    ) -> Result<ImportedFile<T>, PromptError>
    where
        R: BufRead,
        W: Write,
        E: Display,
        F: FnMut(&Path) -> Result<Validation<T>, E>,
    {
        self.run(terminal, |candidate| {
            let path = PathBuf::from(clean_path(candidate));
            let file_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            loader(&path).map(|outcome| {
                outcome.map(|value| ImportedFile {
                    value,
                    path,
                    file_name,
                })
            })
        })
    }

    /// Runs the loop as an export-directory picker.
    ///
    /// An empty answer means "do not save"; anything else must be an
    /// existing directory.
    pub fn run_export<R, W>(&self, terminal: &mut Terminal<R, W>) -> Result<ExportTarget, PromptError>
    where
        R: BufRead,
        W: Write,
    {
        let target = self.run(terminal, |candidate| {
            let cleaned = clean_path(candidate);
            if cleaned.is_empty() {
                return Ok::<_, Infallible>(Validation::Accept(ExportTarget::Discard));
            }

            let dir = PathBuf::from(cleaned);
            if !dir.is_dir() {
                return Ok(Validation::reject("Not a valid directory. Please try again."));
            }
            Ok(Validation::Accept(ExportTarget::Directory(dir)))
        })?;

        match &target {
            ExportTarget::Discard => terminal.say("The results will not be saved.")?,
            ExportTarget::Directory(dir) => {
                terminal.say(format_args!("The result will be saved in {}.", dir.display()))?
            }
        }

        Ok(target)
    }
}

/// Asks for `<name> path` until `loader` accepts the file.
pub fn file_input<R, W, T, E, F>(
    terminal: &mut Terminal<R, W>,
    name: &str,
    loader: F,
) -> Result<ImportedFile<T>, PromptError>
where
    R: BufRead,
    W: Write,
    E: Display,
    F: FnMut(&Path) -> Result<Validation<T>, E>,
{
    ValidatedRetryLoop::new(name).run_file(terminal, loader)
}

/// Asks where results of `name` should be exported.
pub fn exporting_path_input<R, W>(
    terminal: &mut Terminal<R, W>,
    name: &str,
) -> Result<ExportTarget, PromptError>
where
    R: BufRead,
    W: Write,
{
    ValidatedRetryLoop::for_export(name).run_export(terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use std::fs;
    use std::io::Cursor;

    fn terminal(script: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn printed(terminal: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(terminal.output()).into_owned()
    }

    fn count_lines(path: &Path) -> Result<Validation<usize>, std::io::Error> {
        let text = fs::read_to_string(path)?;
        let n = text.lines().filter(|l| !l.trim().is_empty()).count();
        if n == 0 {
            return Ok(Validation::reject("No lines in file. Can not proceed."));
        }
        Ok(Validation::Accept(n))
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_path_drops_shell_escapes() {
        assert_eq!(clean_path("  /tmp/My\\ Data/in.txt \n"), "/tmp/My Data/in.txt");
        assert_eq!(clean_path(""), "");
    }

    #[cfg(windows)]
    #[test]
    fn test_clean_path_keeps_windows_separators() {
        assert_eq!(
            clean_path("  C:\\Users\\ada\\data.txt \r\n"),
            r"C:\Users\ada\data.txt"
        );
        assert_eq!(clean_path(""), "");
    }

    #[test]
    fn test_file_input_skips_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.txt");
        let good = dir.path().join("atoms.list.txt");
        fs::write(&empty, "\n \n").unwrap();
        fs::write(&good, "H\nO\n\nH\n").unwrap();

        let script = format!(
            "{}\n{}\n{}\n",
            dir.path().join("missing.txt").display(),
            empty.display(),
            good.display()
        );
        let mut t = terminal(&script);

        let imported = file_input(&mut t, "atom list", count_lines).unwrap();
        assert_eq!(imported.value, 3);
        assert_eq!(imported.path, good);
        assert_eq!(imported.file_name, "atoms.list");

        let out = printed(&t);
        assert_eq!(out.matches("Error:\n ").count(), 1);
        assert_eq!(out.matches("No lines in file. Can not proceed.").count(), 1);
        assert!(out.ends_with("Successfully imported from atom list.\n"));
    }

    #[test]
    fn test_export_empty_means_discard() {
        let mut t = terminal("\n");
        let target = exporting_path_input(&mut t, "Result").unwrap();

        assert_eq!(target, ExportTarget::Discard);
        assert_eq!(
            printed(&t),
            "Please enter Result exporting Path (leave empty if not to save): \
             The results will not be saved.\n"
        );
    }

    #[test]
    fn test_export_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let script = format!("{}\n{}\n", file.display(), dir.path().display());
        let mut t = terminal(&script);

        let target = exporting_path_input(&mut t, "Result").unwrap();
        assert_eq!(target.directory(), Some(dir.path()));

        let out = printed(&t);
        assert_eq!(out.matches("Not a valid directory. Please try again.").count(), 1);
        assert!(out.contains("The result will be saved in"));
        assert!(!out.contains("Successfully imported"));
    }

    #[test]
    fn test_export_respects_policy() {
        let mut t = terminal("/definitely/not/here\n/nor/here\n");
        let err = ValidatedRetryLoop::for_export("")
            .policy(RetryPolicy::max_attempts(2))
            .run_export(&mut t)
            .unwrap_err();

        assert!(matches!(err, PromptError::Exhausted { attempts: 2, .. }));
        assert!(printed(&t).starts_with("Please enter Exporting Path"));
    }
}
