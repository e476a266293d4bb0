//! Error types for unicdk.

use crate::types::StackKind;
use std::path::PathBuf;
use thiserror::Error;

/// Construct tree errors
#[derive(Debug, Error)]
pub enum ConstructError {
    #[error("There is already a construct with id '{id}' in scope '{scope}'")]
    DuplicateId { scope: String, id: String },

    #[error("Invalid construct id: {0:?}")]
    InvalidId(String),

    #[error("Construct '{0}' is still attached to a scope")]
    AlreadyAttached(String),
}

/// Errors raised while partitioning a mixed tree
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("No app factory configured for {0} stacks")]
    MissingFactory(StackKind),

    #[error("Factory for {expected} stack '{id}' returned a {actual} app")]
    KindMismatch {
        id: String,
        expected: StackKind,
        actual: StackKind,
    },

    #[error("Cannot attach '{id}' to {kind} app at {outdir:?}: id already taken")]
    IdCollision {
        kind: StackKind,
        id: String,
        outdir: PathBuf,
    },

    #[error("Stack '{id}' was detached from its scope during partitioning")]
    Detach { id: String },

    #[error("Construct error: {0}")]
    Construct(#[from] ConstructError),
}

/// Errors raised by a container while producing output
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize assembly: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Synthesis failed: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by the unicdk `App` facade
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Construct error: {0}")]
    Construct(#[from] ConstructError),

    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("Failed to clean output directory {path:?}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
