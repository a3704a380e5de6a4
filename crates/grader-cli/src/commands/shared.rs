use std::path::Path;

use anyhow::{Context, bail};
use grader_console::{ActionOutcome, OutcomeStatus};

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

/// Read a UTF-8 text file given on the command line.
pub async fn read_text(path: &str) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {path}"))
}

/// Final path component of `path`, if it has one.
pub fn file_name(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Print a one-shot console action, or fail with its fixed error text.
pub fn finish_action(
    outcome: &ActionOutcome,
    spinner: &Progress,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match outcome.status {
        OutcomeStatus::Succeeded => {
            spinner.finish_clear();
            output(outcome, flags.format)
        }
        OutcomeStatus::Failed => {
            let message = outcome
                .message
                .clone()
                .unwrap_or_else(|| outcome.action.failure_message().to_string());
            spinner.finish_err(&message);
            bail!(message)
        }
        OutcomeStatus::Discarded => {
            spinner.finish_clear();
            bail!("{} result was discarded", outcome.action)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::{file_name, read_text};

    #[tokio::test]
    async fn read_text_returns_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1 pt: encapsulation\n1 pt: inheritance").unwrap();
        let text = read_text(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(text, "1 pt: encapsulation\n1 pt: inheritance");
    }

    #[tokio::test]
    async fn read_text_names_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rubric.txt");
        let err = read_text(missing.to_str().unwrap()).await.unwrap_err();
        assert!(format!("{err:#}").contains("rubric.txt"));
    }

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name("rubrics/oop.txt").as_deref(), Some("oop.txt"));
        assert_eq!(file_name("oop.pdf").as_deref(), Some("oop.pdf"));
        assert_eq!(file_name("/"), None);
    }
}
