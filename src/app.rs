//! unicdk App
//!
//! The root of a mixed tree. Stacks from any of the three frameworks can be
//! created anywhere beneath [`App::node`]; [`App::synth`] partitions the tree
//! into one framework app per stack and synthesizes each of them.

use crate::classify::BoundaryClassifier;
use crate::config::SynthConfig;
use crate::construct::{Construct, KindTag};
use crate::container::Container;
use crate::error::{AppError, ConstructError};
use crate::framework::{cdk::Cdk, cdk8s::Cdk8s, cdktf::Cdktf, Framework, FrameworkApp};
use crate::partition::{self, AppFactoryFn, FactoryTable};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{info, instrument, warn};

/// Per-kind overrides for the app a stack is moved into.
///
/// Each factory receives the stack that triggered it. Unset slots fall back to
/// the built-in app writing to `<out_root>/<kind>.<stack id>.o`. Make sure
/// overrides give every app a distinct outdir so results do not mix.
#[derive(Default)]
pub struct AppFactory {
    pub cdk: Option<AppFactoryFn>,
    pub cdktf: Option<AppFactoryFn>,
    pub cdk8s: Option<AppFactoryFn>,
}

impl AppFactory {
    pub fn cdk<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Construct) -> Rc<dyn Container> + 'static,
    {
        self.cdk = Some(Box::new(factory));
        self
    }

    pub fn cdktf<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Construct) -> Rc<dyn Container> + 'static,
    {
        self.cdktf = Some(Box::new(factory));
        self
    }

    pub fn cdk8s<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Construct) -> Rc<dyn Container> + 'static,
    {
        self.cdk8s = Some(Box::new(factory));
        self
    }
}

impl fmt::Debug for AppFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppFactory")
            .field("cdk", &self.cdk.is_some())
            .field("cdktf", &self.cdktf.is_some())
            .field("cdk8s", &self.cdk8s.is_some())
            .finish()
    }
}

/// Options to create a unicdk [`App`] with
#[derive(Debug)]
pub struct AppOptions {
    pub app_factory: AppFactory,
    /// Remove each app's outdir before synthesizing it
    pub force_clean: bool,
    /// Base directory for the built-in apps' outdirs
    pub out_root: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            app_factory: AppFactory::default(),
            force_clean: false,
            out_root: PathBuf::from("."),
        }
    }
}

impl AppOptions {
    pub fn from_config(config: &SynthConfig) -> Self {
        Self {
            app_factory: AppFactory::default(),
            force_clean: config.force_clean,
            out_root: config.out_root.clone(),
        }
    }
}

/// A unicdk App can hold CDK stacks, CDKTF stacks and cdk8s charts.
pub struct App {
    node: Construct,
    factories: FactoryTable,
    classifier: BoundaryClassifier,
    force_clean: bool,
}

impl App {
    pub const TAG: KindTag = KindTag::from_static("unicdk.App");

    /// Create the app, as a root when `scope` is `None`.
    ///
    /// Factory defaults are resolved here, once.
    pub fn new(
        scope: Option<&Construct>,
        id: impl Into<String>,
        options: AppOptions,
    ) -> Result<Self, ConstructError> {
        let node = match scope {
            Some(scope) => Construct::new(scope, id, Self::TAG)?,
            None => Construct::root(id, Self::TAG),
        };

        let AppOptions {
            app_factory,
            force_clean,
            out_root,
        } = options;
        let factories = FactoryTable {
            cdk: Some(app_factory.cdk.unwrap_or_else(|| default_factory::<Cdk>(&out_root))),
            cdktf: Some(
                app_factory
                    .cdktf
                    .unwrap_or_else(|| default_factory::<Cdktf>(&out_root)),
            ),
            cdk8s: Some(
                app_factory
                    .cdk8s
                    .unwrap_or_else(|| default_factory::<Cdk8s>(&out_root)),
            ),
        };

        Ok(Self {
            node,
            factories,
            classifier: BoundaryClassifier::default(),
            force_clean,
        })
    }

    /// Replace the boundary classifier, e.g. to recognise custom stack types.
    pub fn with_classifier(mut self, classifier: BoundaryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Scope to create stacks in
    pub fn node(&self) -> &Construct {
        &self.node
    }

    pub fn force_clean(&self) -> bool {
        self.force_clean
    }

    /// Partition the tree and synthesize every resulting app in order.
    ///
    /// Synthesis errors from an app are returned unchanged; apps after the
    /// failing one are not synthesized.
    #[instrument(skip(self), fields(app = %self.node.id(), force_clean = self.force_clean))]
    pub fn synth(&self) -> Result<(), AppError> {
        let apps = partition::partition(&self.node, &self.classifier, &self.factories)?;
        for app in &apps {
            if self.force_clean {
                clean_outdir(app.outdir())?;
            }
            app.synth()?;
            info!(kind = %app.kind(), outdir = %app.outdir().display(), "Synthesized app");
        }
        Ok(())
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("node", &self.node)
            .field("factories", &self.factories)
            .field("force_clean", &self.force_clean)
            .finish()
    }
}

fn default_factory<F: Framework + 'static>(out_root: &Path) -> AppFactoryFn {
    let out_root = out_root.to_path_buf();
    Box::new(move |stack: &Construct| -> Rc<dyn Container> {
        Rc::new(FrameworkApp::<F>::new(
            out_root.join(F::KIND.default_outdir(&stack.id())),
        ))
    })
}

/// Remove `path` recursively. A missing path is not an error.
fn clean_outdir(path: &Path) -> Result<(), AppError> {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            warn!(outdir = %path.display(), "Removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(AppError::Clean {
            path: path.to_path_buf(),
            source,
        }),
    }
}
