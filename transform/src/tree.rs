//! Transform trees recorded by the solver.
//!
//! Every node below the root carries the [`Transform`] that produced it from
//! its parent. A node marked terminal holds a pattern equal to the target, so
//! the labels on the path from the root to a terminal node form a valid
//! rewrite sequence.
//!
//! Nodes own their children outright. Pruning a branch is [`TransformNode::erase`]
//! followed by the parent declining to attach it, which drops the whole subtree.

use std::borrow::Cow;
use std::io;

use ptree::{Style, TreeItem};

use crate::types::Transform;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformNode {
    transform: Option<Transform>,
    terminal: bool,
    erased: bool,
    children: Vec<TransformNode>,
}

impl TransformNode {
    /// An unlabeled root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// A node produced by applying `transform` to its parent's pattern.
    pub fn new(transform: Transform) -> Self {
        Self { transform: Some(transform), ..Default::default() }
    }

    /// The transform that produced this node. `None` for the root.
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn children(&self) -> &[TransformNode] {
        &self.children
    }

    /// True if this node's pattern equals the target.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_erased(&self) -> bool {
        self.erased
    }

    pub(crate) fn mark_terminal(&mut self) {
        self.terminal = true;
    }

    /// Attach `child` unless it has been erased. Returns whether it was attached.
    pub fn attach(&mut self, child: TransformNode) -> bool {
        if child.erased {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Discard this node's subtree and mark the node as pruned.
    pub fn erase(&mut self) {
        self.children.clear();
        self.terminal = false;
        self.erased = true;
    }

    /// Number of nodes in this subtree, including this one.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(TransformNode::num_nodes).sum::<usize>()
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| c.height() + 1).max().unwrap_or(0)
    }

    fn contains_terminal(&self) -> bool {
        self.terminal || self.children.iter().any(TransformNode::contains_terminal)
    }

    fn collect_paths(&self, prefix: &mut Vec<Transform>, paths: &mut Vec<Vec<Transform>>) {
        if let Some(t) = &self.transform {
            prefix.push(t.clone());
        }
        if self.terminal {
            paths.push(prefix.clone());
        }
        for child in &self.children {
            child.collect_paths(prefix, paths);
        }
        if self.transform.is_some() {
            prefix.pop();
        }
    }
}

impl TreeItem for TransformNode {
    type Child = TransformNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        match &self.transform {
            Some(t) => write!(f, "{t}")?,
            None => write!(f, "ROOT")?,
        }
        if self.terminal {
            write!(f, " [target]")?;
        }
        Ok(())
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}

/// The result of a solve: a pruned tree of transform applications.
///
/// - identity: the source already matched, the root itself is terminal
/// - found: at least one terminal leaf exists
/// - exhausted: no terminal node, the root has no children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformTree {
    root: TransformNode,
}

impl TransformTree {
    /// Zero-step success.
    pub(crate) fn identity() -> Self {
        let mut root = TransformNode::root();
        root.mark_terminal();
        Self { root }
    }

    pub(crate) fn from_root(root: TransformNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &TransformNode {
        &self.root
    }

    /// True when the source was already equal to the target.
    pub fn is_identity(&self) -> bool {
        self.root.terminal
    }

    /// True when some node (possibly the root) reached the target.
    pub fn found(&self) -> bool {
        self.root.contains_terminal()
    }

    /// Every root-to-terminal label sequence, in depth-first order.
    ///
    /// An identity tree yields a single empty path; an exhausted tree yields none.
    pub fn success_paths(&self) -> Vec<Vec<Transform>> {
        let mut paths = Vec::new();
        self.root.collect_paths(&mut Vec::new(), &mut paths);
        paths
    }

    /// The first success path in depth-first order.
    pub fn first_success(&self) -> Option<Vec<Transform>> {
        self.success_paths().into_iter().next()
    }

    /// A shortest success path; ties go to the earliest in depth-first order.
    pub fn shortest_success(&self) -> Option<Vec<Transform>> {
        self.success_paths().into_iter().min_by_key(Vec::len)
    }

    pub fn num_nodes(&self) -> usize {
        self.root.num_nodes()
    }

    /// Render the tree as ASCII art, one node per line.
    pub fn render(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        ptree::write_tree(&self.root, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
