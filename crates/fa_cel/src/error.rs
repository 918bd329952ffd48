//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`toml::de::Error`]
    #[error(transparent)]
    SettingsError(#[from] toml::de::Error),

    /// archive is shorter than its tables declare
    #[error("archive is truncated: {needed} bytes declared, {available} available")]
    #[diagnostic(help("the file is shorter than its offset table, it is likely damaged"))]
    TruncatedArchive {
        /// The offset the tables point at
        needed: u64,
        /// The length of the archive
        available: u64,
    },

    /// group offset outside of the archive
    #[error("group {group} starts at {offset}, outside of the archive ({available} bytes)")]
    InvalidGroupOffset {
        /// Index of the group in the group table
        group: usize,
        /// The declared start of the group
        offset: u32,
        /// The length of the archive
        available: u64,
    },

    /// archive path is empty
    #[error("archive path is empty")]
    EmptyPath,

    /// no settings for the requested asset
    #[error("no settings found for asset {0}")]
    #[diagnostic(help("add a [cel.<name>] or [cl2.<name>] section to the settings file"))]
    MissingSettings(String),

    /// unable to find requested palette
    #[error("unable to find palette {0}")]
    PaletteNotFound(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
