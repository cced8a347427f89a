//! Domain error kinds.
//!
//! Library functions return `anyhow::Result` and attach context as errors
//! bubble up; the root cause of a domain failure is always one of these
//! variants, so the CLI can tell validation problems from I/O problems by
//! downcasting.

use std::path::PathBuf;
use thiserror::Error;

/// A domain-level failure in the palette pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PprError {
    /// No palette with the given name (after prefix stripping).
    #[error("palette '{0}' not found")]
    PaletteNotFound(String),

    /// Template file does not exist.
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Palette file failed schema validation.
    #[error("malformed palette {}: {reason}", .path.display())]
    MalformedPalette {
        /// File that failed to validate
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Bound output is not an SVG document.
    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    /// Placeholders remain after binding.
    #[error("unresolved placeholders: {}", .0.join(", "))]
    UnresolvedPlaceholder(Vec<String>),

    /// Root `<svg>` has no usable integer width/height.
    #[error("SVG root element is missing integer width/height attributes")]
    MissingDimensions,

    /// Palette synthesis did not find exactly 16 colors.
    #[error("expected 16 colors, found {}: [{}]", .found.len(), .found.join(", "))]
    Synthesis {
        /// Colors that were found, in document order
        found: Vec<String>,
    },

    /// A `WIDTHxHEIGHT` string did not parse.
    #[error("invalid resolution '{0}', expected WIDTHxHEIGHT (e.g. 1920x1080)")]
    InvalidResolution(String),

    /// A `color=placeholder` mapping pair did not parse.
    #[error("invalid color mapping '{0}'")]
    InvalidMapping(String),

    /// A name that cannot be used as a file name.
    #[error("invalid name '{0}'")]
    InvalidName(String),

    /// The template cycle list is empty.
    #[error("no templates available in {}", .0.display())]
    NoTemplates(PathBuf),
}

impl PprError {
    /// Finds the domain error at the root of an `anyhow` chain, if any.
    pub fn find_in(err: &anyhow::Error) -> Option<&Self> {
        err.chain().find_map(|cause| cause.downcast_ref::<Self>())
    }
}
