//! Assembly output
//!
//! The built-in apps write a small JSON assembly into their outdir: a
//! `manifest.json` listing every stack, and one artifact per stack holding the
//! serialized subtree. Output is deterministic: same tree, same bytes.

use crate::construct::Construct;
use crate::error::SynthError;
use crate::types::StackKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const ASSEMBLY_VERSION: &str = "1.0.0";

/// Serialized form of a construct subtree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstructSnapshot {
    pub id: String,
    pub path: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConstructSnapshot>,
}

impl ConstructSnapshot {
    pub fn capture(node: &Construct) -> Self {
        Self {
            id: node.id(),
            path: node.path(),
            tag: node.tag().to_string(),
            props: node.props(),
            children: node.children().iter().map(ConstructSnapshot::capture).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactEntry {
    pub id: String,
    pub path: String,
    /// Relative to the outdir
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub version: String,
    pub kind: StackKind,
    pub artifacts: Vec<ArtifactEntry>,
}

impl Manifest {
    pub fn load(outdir: &Path) -> Result<Self, SynthError> {
        let path = outdir.join(MANIFEST_FILE);
        let bytes = fs::read(&path).map_err(|source| SynthError::Io { path, source })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Write the assembly for every stack under `app_node` into `outdir`.
pub fn write_assembly(
    kind: StackKind,
    app_node: &Construct,
    outdir: &Path,
    artifact_path: fn(&str) -> PathBuf,
) -> Result<Manifest, SynthError> {
    create_dir(outdir)?;

    let mut artifacts = Vec::new();
    for stack in app_node.children() {
        let id = stack.id();
        let file = artifact_path(&id);
        write_json(&outdir.join(&file), &ConstructSnapshot::capture(&stack))?;
        debug!(stack = %id, file = %file.display(), "Wrote artifact");
        artifacts.push(ArtifactEntry {
            id,
            path: stack.path(),
            file,
        });
    }

    let manifest = Manifest {
        version: ASSEMBLY_VERSION.to_string(),
        kind,
        artifacts,
    };
    write_json(&outdir.join(MANIFEST_FILE), &manifest)?;
    Ok(manifest)
}

fn create_dir(path: &Path) -> Result<(), SynthError> {
    fs::create_dir_all(path).map_err(|source| SynthError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed JSON, written to a temp file and renamed into place.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SynthError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &bytes).map_err(|source| SynthError::Io {
        path: temp_path.clone(),
        source,
    })?;
    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        SynthError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
