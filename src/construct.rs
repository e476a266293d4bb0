//! Construct Tree
//!
//! The tree model shared by the three frameworks. Every node has an id that is
//! unique among its siblings, an optional scope (parent) and an ordered list of
//! children. Which framework created a node is recorded in its [`KindTag`].
//!
//! Handles are cheap to clone and single-threaded: parents own their children,
//! children hold a weak link back to their scope. Mutating a tree while a
//! traversal snapshot of it is being consumed is the caller's responsibility.

use crate::error::ConstructError;
use serde_json::Value;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Separator between ids in a construct path
pub const PATH_SEP: &str = "/";

/// Opaque discriminator set by the framework that created a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KindTag(Cow<'static, str>);

impl KindTag {
    pub const fn from_static(tag: &'static str) -> Self {
        KindTag(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Self {
        KindTag(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag for plain constructs that belong to no particular framework
pub const CONSTRUCT_TAG: KindTag = KindTag::from_static("constructs.Construct");

/// Traversal order for [`Construct::find_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructOrder {
    /// Scope before its children
    PreOrder,
    /// Children before their scope
    PostOrder,
}

struct Node {
    id: String,
    tag: KindTag,
    scope: Weak<RefCell<Node>>,
    children: Vec<Construct>,
    props: Option<Value>,
}

/// Handle to a node in a construct tree
#[derive(Clone)]
pub struct Construct(Rc<RefCell<Node>>);

impl Construct {
    /// Create a parentless node.
    pub fn root(id: impl Into<String>, tag: KindTag) -> Self {
        Construct(Rc::new(RefCell::new(Node {
            id: id.into(),
            tag,
            scope: Weak::new(),
            children: Vec::new(),
            props: None,
        })))
    }

    /// Create a node and attach it to `scope`.
    pub fn new(
        scope: &Construct,
        id: impl Into<String>,
        tag: KindTag,
    ) -> Result<Self, ConstructError> {
        let node = Construct::root(id, tag);
        scope.add_child(&node)?;
        Ok(node)
    }

    /// Create a plain construct with no framework affiliation.
    pub fn plain(scope: &Construct, id: impl Into<String>) -> Result<Self, ConstructError> {
        Construct::new(scope, id, CONSTRUCT_TAG)
    }

    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    pub fn tag(&self) -> KindTag {
        self.0.borrow().tag.clone()
    }

    /// The node's parent, or `None` for a root.
    pub fn scope(&self) -> Option<Construct> {
        self.0.borrow().scope.upgrade().map(Construct)
    }

    /// Snapshot of the direct children, in insertion order.
    pub fn children(&self) -> Vec<Construct> {
        self.0.borrow().children.clone()
    }

    pub fn find_child(&self, id: &str) -> Option<Construct> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|c| c.0.borrow().id == id)
            .cloned()
    }

    /// Topmost ancestor of this node (itself if it has no scope).
    pub fn tree_root(&self) -> Construct {
        let mut current = self.clone();
        while let Some(scope) = current.scope() {
            current = scope;
        }
        current
    }

    /// Ids from the tree root down to this node, joined with `/`.
    ///
    /// The root's own id is not part of the path, so a root has an empty path.
    pub fn path(&self) -> String {
        let mut ids = Vec::new();
        let mut current = self.clone();
        while let Some(scope) = current.scope() {
            ids.push(current.id());
            current = scope;
        }
        ids.reverse();
        ids.join(PATH_SEP)
    }

    pub fn props(&self) -> Option<Value> {
        self.0.borrow().props.clone()
    }

    pub fn set_props(&self, props: Value) {
        self.0.borrow_mut().props = Some(props);
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Construct) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// All nodes of the subtree rooted here, including this node.
    ///
    /// The result is a snapshot; later tree mutations do not affect it.
    pub fn find_all(&self, order: ConstructOrder) -> Vec<Construct> {
        let mut out = Vec::new();
        self.visit(order, &mut out);
        out
    }

    fn visit(&self, order: ConstructOrder, out: &mut Vec<Construct>) {
        if order == ConstructOrder::PreOrder {
            out.push(self.clone());
        }
        for child in self.children() {
            child.visit(order, out);
        }
        if order == ConstructOrder::PostOrder {
            out.push(self.clone());
        }
    }

    /// Detach the child with the given id. Returns false if there is none.
    pub fn try_remove_child(&self, id: &str) -> bool {
        let removed = {
            let mut node = self.0.borrow_mut();
            let Some(pos) = node.children.iter().position(|c| c.0.borrow().id == id) else {
                return false;
            };
            node.children.remove(pos)
        };
        removed.0.borrow_mut().scope = Weak::new();
        true
    }

    /// Attach a detached node as the last child of this one, keeping its id.
    pub fn add_child(&self, child: &Construct) -> Result<(), ConstructError> {
        let id = child.id();
        if child.scope().is_some() {
            return Err(ConstructError::AlreadyAttached(id));
        }
        if id.is_empty() || id.contains(PATH_SEP) {
            return Err(ConstructError::InvalidId(id));
        }
        // A node may not become a descendant of itself.
        let mut ancestor = Some(self.clone());
        while let Some(node) = ancestor {
            if node.ptr_eq(child) {
                return Err(ConstructError::AlreadyAttached(id));
            }
            ancestor = node.scope();
        }
        if self.find_child(&id).is_some() {
            return Err(ConstructError::DuplicateId {
                scope: self.describe(),
                id,
            });
        }

        child.0.borrow_mut().scope = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    /// Path for nested nodes, id for roots.
    fn describe(&self) -> String {
        let path = self.path();
        if path.is_empty() {
            self.id()
        } else {
            path
        }
    }
}

impl fmt::Debug for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Construct")
            .field("id", &node.id)
            .field("tag", &node.tag)
            .field("children", &node.children.len())
            .finish()
    }
}
