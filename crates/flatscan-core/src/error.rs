// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Flatscan.
//
// Degenerate geometry is deliberately absent: the rectifier degrades to a
// best-effort image instead of failing. Only host-side validation and
// configuration I/O produce errors.

use thiserror::Error;

/// Top-level error type for all Flatscan operations.
#[derive(Debug, Error)]
pub enum FlatscanError {
    // -- Validation --
    #[error("invalid output dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid scan option: {0}")]
    InvalidOption(String),

    // -- Configuration persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FlatscanError>;
