//! Shared helpers for integration tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use unicdk::framework::{cdk::Cdk, cdk8s::Cdk8s, cdktf::Cdktf, Framework};
use unicdk::{Construct, Container, StackKind, SynthError};
use walkdir::WalkDir;

/// Serializes tests that read or write `UNICDK_*` environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given environment variables set, restoring them afterwards.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
        .collect();
    for (k, v) in vars {
        std::env::set_var(k, v);
    }

    let result = f();

    for (k, orig) in saved {
        match orig {
            Some(v) => std::env::set_var(&k, v),
            None => std::env::remove_var(&k),
        }
    }
    result
}

/// Relative paths of every file under `dir`, sorted.
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

/// Container that records the order it was synthesized in
#[derive(Debug)]
pub struct RecordingApp {
    kind: StackKind,
    node: Construct,
    outdir: PathBuf,
    log: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl RecordingApp {
    pub fn new(kind: StackKind, outdir: impl Into<PathBuf>, log: Rc<RefCell<Vec<String>>>) -> Self {
        let tag = match kind {
            StackKind::Cdk => Cdk::APP_TAG,
            StackKind::Cdktf => Cdktf::APP_TAG,
            StackKind::Cdk8s => Cdk8s::APP_TAG,
        };
        Self {
            kind,
            node: Construct::root("", tag),
            outdir: outdir.into(),
            log,
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Container for RecordingApp {
    fn kind(&self) -> StackKind {
        self.kind
    }

    fn node(&self) -> &Construct {
        &self.node
    }

    fn outdir(&self) -> &Path {
        &self.outdir
    }

    fn synth(&self) -> Result<(), SynthError> {
        let ids: Vec<String> = self.node.children().iter().map(|c| c.id()).collect();
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.kind, ids.join(",")));
        if self.fail {
            return Err(SynthError::Other("provider exploded".into()));
        }
        std::fs::create_dir_all(&self.outdir).map_err(|source| SynthError::Io {
            path: self.outdir.clone(),
            source,
        })?;
        std::fs::write(self.outdir.join("recorded.txt"), ids.join("\n")).map_err(|source| {
            SynthError::Io {
                path: self.outdir.join("recorded.txt"),
                source,
            }
        })
    }
}
