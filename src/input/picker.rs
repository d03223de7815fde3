// src/input/picker.rs
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::utils::AppError;

/// What the user is asked to choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    File,
    Directory,
}

/// Supplies the input location for a run.
pub trait FilePicker {
    fn pick(&mut self, kind: PickKind) -> Result<PathBuf, AppError>;
}

/// Uses the path given on the command line, prompting when it was omitted.
pub struct ArgumentPicker<R, W> {
    path: Option<PathBuf>,
    prompt: PromptPicker<R, W>,
}

impl ArgumentPicker<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        Self {
            path,
            prompt: PromptPicker::new(std::io::stdin().lock(), std::io::stderr()),
        }
    }
}

impl<R: BufRead, W: Write> FilePicker for ArgumentPicker<R, W> {
    fn pick(&mut self, kind: PickKind) -> Result<PathBuf, AppError> {
        let path = match self.path.take() {
            Some(path) => path,
            None => self.prompt.pick(kind)?,
        };
        check_kind(path, kind)
    }
}

/// Asks for a path on a terminal.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FilePicker for PromptPicker<R, W> {
    fn pick(&mut self, kind: PickKind) -> Result<PathBuf, AppError> {
        let what = match kind {
            PickKind::File => "file",
            PickKind::Directory => "folder",
        };
        write!(self.output, "Select {}: ", what)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        // Paths pasted from Explorer often arrive quoted.
        let trimmed = line.trim().trim_matches('"');
        if trimmed.is_empty() {
            return Err(AppError::Config(format!("No {} selected", what)));
        }
        Ok(PathBuf::from(trimmed))
    }
}

fn check_kind(path: PathBuf, kind: PickKind) -> Result<PathBuf, AppError> {
    let ok = match kind {
        PickKind::File => path.is_file(),
        PickKind::Directory => path.is_dir(),
    };
    if !ok {
        let expected = if kind == PickKind::File { "a file" } else { "a directory" };
        return Err(AppError::Config(format!("{} is not {}", path.display(), expected)));
    }
    Ok(path)
}
