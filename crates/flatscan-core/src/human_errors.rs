// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for host applications.
//
// The rectifier itself never fails on bad geometry, so everything here comes
// from input validation or from reading a saved configuration.

use crate::error::FlatscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth retrying as-is.
    Transient,
    /// The user has to change something first.
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the host may retry without user input.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FlatscanError` into a `HumanError` suitable for a scan screen.
pub fn humanize_error(err: &FlatscanError) -> HumanError {
    match err {
        FlatscanError::InvalidDimensions { width, height } => HumanError {
            message: "We couldn't scan this document.".into(),
            suggestion: format!(
                "The page size is not valid ({width} x {height}). Pick a page size in Settings and try again."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FlatscanError::InvalidOption(detail) => HumanError {
            message: "One of the scan settings isn't valid.".into(),
            suggestion: format!("Check the scan settings and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FlatscanError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The scan settings file couldn't be found.".into(),
                    suggestion: "Default settings will be used. Save your settings again to recreate it.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read the scan settings.".into(),
                    suggestion: "Check the file permissions, or save the settings to a different location.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing the scan settings.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        FlatscanError::Serialization(_) => HumanError {
            message: "The saved scan settings are damaged.".into(),
            suggestion: "Reset the scan settings to their defaults and save them again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
