//! Lab detail export
//!
//! Formats a lab's credentials as plain text (CRLF line endings) and hands
//! the text to a file or the clipboard.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lab_dashboard_client::Lab;

use crate::error::{CoreError, CoreResult};
use crate::traits::Clipboard;

/// How long the "copied" notice stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

pub const COPY_FEEDBACK_MESSAGE: &str = "Lab details copied to clipboard";

const LINE_BREAK: &str = "\r\n";
const SECTION_SEPARATOR: &str = "\r\n\r\n-------------------------\r\n\r\n";

struct Section<'a> {
    title: &'static str,
    lines: Vec<(&'a str, &'a str)>,
}

fn sections(lab: &Lab) -> [Section<'_>; 3] {
    [
        Section {
            title: "Vulnerable Applications",
            lines: lab
                .vulnerable_applications
                .iter()
                .map(|app| (app.name.as_str(), app.url.as_str()))
                .collect(),
        },
        Section {
            title: "Salt Lab Login",
            lines: vec![
                ("Username", lab.salt_login_details.username.as_str()),
                ("Password", lab.salt_login_details.password.as_str()),
            ],
        },
        Section {
            title: "AWS Console Login",
            lines: vec![
                ("URL", lab.aws_console_login.url.as_str()),
                ("Username", lab.aws_console_login.username.as_str()),
                ("Password", lab.aws_console_login.password.as_str()),
            ],
        },
    ]
}

/// Plain-text rendering of a lab's credentials.
#[must_use]
pub fn format_text(lab: &Lab) -> String {
    sections(lab)
        .iter()
        .map(|section| {
            let body = section
                .lines
                .iter()
                .map(|(title, value)| format!("{title}: {value}"))
                .collect::<Vec<_>>()
                .join(LINE_BREAK);
            format!("{}{LINE_BREAK}{LINE_BREAK}{body}", section.title)
        })
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// `"{lab_name} Details"`, with path separators and control characters replaced.
#[must_use]
pub fn export_file_name(lab_name: &str) -> String {
    let safe: String = lab_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    format!("{safe} Details")
}

/// Transient confirmation shown after a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub message: String,
    pub expires_at: Instant,
}

impl CopyFeedback {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            message: COPY_FEEDBACK_MESSAGE.to_string(),
            expires_at: now + COPY_FEEDBACK_DURATION,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// File and clipboard export of lab details.
pub struct ExportService {
    download_dir: PathBuf,
}

impl ExportService {
    #[must_use]
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Write the formatted details to `"{lab_name} Details"` in the download
    /// directory, replacing any previous export.
    pub fn download(&self, lab: &Lab, lab_name: &str) -> CoreResult<PathBuf> {
        std::fs::create_dir_all(&self.download_dir).map_err(|e| {
            CoreError::Export(format!(
                "cannot create {}: {e}",
                self.download_dir.display()
            ))
        })?;
        let path = self.download_dir.join(export_file_name(lab_name));
        std::fs::write(&path, format_text(lab))
            .map_err(|e| CoreError::Export(format!("cannot write {}: {e}", path.display())))?;
        log::info!("Exported details of lab '{lab_name}' to {}", path.display());
        Ok(path)
    }

    /// Put the formatted details on the clipboard.
    pub fn copy(&self, lab: &Lab, clipboard: &dyn Clipboard) -> CoreResult<CopyFeedback> {
        clipboard.write_text(&format_text(lab))?;
        Ok(CopyFeedback::new(Instant::now()))
    }
}
