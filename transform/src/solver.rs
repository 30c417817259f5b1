//! Depth-bounded search for a transform sequence.
//!
//! The [`Solver`] holds a fixed target pattern. Given a source pattern it
//! explores every applicable rewrite depth-first, recording successful
//! applications in a [`TransformTree`]. Branches that cannot reach the target
//! within the depth bound are erased as soon as their subtree is exhausted, so
//! every surviving leaf is a terminal node.

use itertools::Itertools;
use restruct_affine::AffineExpr;
use strum::IntoEnumIterator;

use crate::config::SolverConfig;
use crate::mask::OperandMask;
use crate::pattern::{ComputePattern, IteratorKind};
use crate::tree::{TransformNode, TransformTree};
use crate::types::Transform;

// ============================================================================
// RESULTS
// ============================================================================

/// Counters collected during one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created, including the root.
    pub nodes_created: usize,
    /// Candidate transforms tried against some pattern.
    pub candidates_tried: usize,
    /// Candidates that produced a pattern.
    pub candidates_applied: usize,
    /// Nodes whose pattern equals the target.
    pub terminal_leaves: usize,
    /// Nodes erased as dead ends.
    pub nodes_pruned: usize,
    /// True if the node budget stopped the search early.
    pub budget_exhausted: bool,
}

/// Search outcome together with its statistics.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub tree: TransformTree,
    pub stats: SearchStats,
}

// ============================================================================
// SOLVER
// ============================================================================

#[derive(Debug, Clone)]
pub struct Solver {
    target: ComputePattern,
    config: SolverConfig,
}

impl Solver {
    /// Create a solver searching up to `max_depth` transforms deep.
    pub fn new(target: ComputePattern, max_depth: usize) -> Self {
        Self::with_config(target, SolverConfig::default().with_max_depth(max_depth))
    }

    pub fn with_config(target: ComputePattern, config: SolverConfig) -> Self {
        Self { target, config }
    }

    pub fn target(&self) -> &ComputePattern {
        &self.target
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Search for transform sequences rewriting `source` into the target.
    ///
    /// Returns the identity tree if `source` already equals the target, and a
    /// tree without terminal nodes if nothing was found within the bounds.
    pub fn solve(&self, source: &ComputePattern) -> TransformTree {
        self.solve_with_stats(source).tree
    }

    /// Like [`Solver::solve`], also reporting search statistics.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let solver = Solver::new(target, 3);
    /// let SolveResult { tree, stats } = solver.solve_with_stats(&source);
    /// if let Some(path) = tree.first_success() {
    ///     let rewritten = replay(&source, &path);
    /// }
    /// println!("explored {} nodes", stats.nodes_created);
    /// ```
    #[tracing::instrument(skip_all, fields(source = %source, target = %self.target, max_depth = self.config.max_depth))]
    pub fn solve_with_stats(&self, source: &ComputePattern) -> SolveResult {
        if *source == self.target {
            tracing::debug!("source already matches target");
            let stats = SearchStats { nodes_created: 1, terminal_leaves: 1, ..Default::default() };
            return SolveResult { tree: TransformTree::identity(), stats };
        }

        let mut search = Search { solver: self, stats: SearchStats { nodes_created: 1, ..Default::default() } };
        let mut root = TransformNode::root();
        search.driver(source, &mut root, 0);
        let stats = search.stats;

        tracing::debug!(
            nodes_created = stats.nodes_created,
            candidates_tried = stats.candidates_tried,
            candidates_applied = stats.candidates_applied,
            terminal_leaves = stats.terminal_leaves,
            nodes_pruned = stats.nodes_pruned,
            budget_exhausted = stats.budget_exhausted,
            "search finished"
        );

        SolveResult { tree: TransformTree::from_root(root), stats }
    }

    /// Candidate transforms for `pattern`, in search order.
    ///
    /// 1. When the pattern has more dimensions than the target: `Unroll` of
    ///    every dimension, then `MergeDims` over every pair `i < j`.
    /// 2. `DropSymbol` of every symbol.
    /// 3. `Permutation` over every pair of result positions, crossed with every
    ///    non-empty operand mask.
    /// 4. When the target has more dimensions: `ExpandDims` for each iterator
    ///    kind crossed with every non-empty operand mask.
    /// 5. `DecomposeExpr` at every sum result of the first operand.
    pub fn candidates(&self, pattern: &ComputePattern) -> Vec<Transform> {
        let num_dims = pattern.num_dims();
        let masks: Vec<OperandMask> = OperandMask::non_empty_subsets(pattern.num_operands()).collect();
        let mut candidates = Vec::new();

        if num_dims > self.target.num_dims() {
            candidates.extend((0..num_dims).map(Transform::unroll));
            candidates.extend((0..num_dims).tuple_combinations().map(|(d1, d2)| Transform::merge_dims(d1, d2)));
        }

        candidates.extend((0..pattern.num_symbols()).map(Transform::drop_symbol));

        for (p0, p1) in (0..pattern.max_num_results()).tuple_combinations() {
            candidates.extend(masks.iter().map(|mask| Transform::permutation((p0, p1), mask.clone())));
        }

        if self.target.num_dims() > num_dims {
            for kind in IteratorKind::iter() {
                candidates.extend(masks.iter().map(|mask| Transform::expand_dims(kind, mask.clone())));
            }
        }

        if let Some(first) = pattern.index_map(0) {
            candidates.extend(first.results().iter().positions(AffineExpr::is_add).map(Transform::decompose_expr));
        }

        candidates
    }
}

// ============================================================================
// DRIVER
// ============================================================================

struct Search<'a> {
    solver: &'a Solver,
    stats: SearchStats,
}

impl Search<'_> {
    fn driver(&mut self, pattern: &ComputePattern, node: &mut TransformNode, depth: usize) {
        if depth >= self.solver.config.max_depth {
            tracing::trace!(depth, "depth limit reached");
            self.prune(node);
            return;
        }

        for candidate in self.solver.candidates(pattern) {
            if self.should_stop() {
                break;
            }

            self.stats.candidates_tried += 1;
            let Some(derived) = candidate.apply(pattern) else {
                tracing::trace!(transform = %candidate, depth, "candidate not applicable");
                continue;
            };
            self.stats.candidates_applied += 1;
            self.stats.nodes_created += 1;

            let is_target = derived == self.solver.target;
            if is_target {
                tracing::debug!(transform = %candidate, depth = depth + 1, "reached target");
            }

            let mut child = TransformNode::new(candidate);
            if is_target {
                child.mark_terminal();
                self.stats.terminal_leaves += 1;
            } else {
                self.driver(&derived, &mut child, depth + 1);
            }
            node.attach(child);
        }

        if node.children().is_empty() {
            self.prune(node);
        }
    }

    fn prune(&mut self, node: &mut TransformNode) {
        node.erase();
        self.stats.nodes_pruned += 1;
    }

    fn should_stop(&mut self) -> bool {
        if self.solver.config.first_match && self.stats.terminal_leaves > 0 {
            return true;
        }
        if let Some(max_nodes) = self.solver.config.max_nodes
            && self.stats.nodes_created >= max_nodes
        {
            if !self.stats.budget_exhausted {
                tracing::debug!(max_nodes, "node budget exhausted");
            }
            self.stats.budget_exhausted = true;
            return true;
        }
        false
    }
}

// ============================================================================
// REPLAY
// ============================================================================

/// Apply `transforms` to `source` in order.
///
/// Used to materialize the pattern at the end of a success path. Returns
/// `None` if any step does not apply.
pub fn replay(source: &ComputePattern, transforms: &[Transform]) -> Option<ComputePattern> {
    transforms.iter().try_fold(source.clone(), |pattern, transform| transform.apply(&pattern))
}
