#![deny(missing_docs)]

//! # Tree Walker
//!
//! Recursive descent over the collection tree. Groups extend the tag context
//! and path prefix for their children, items become operations, and child
//! results are folded into the parent bottom-up.

use crate::collection::CollectionNode;
use crate::convert::operation::build_operation;
use crate::oas::models::{PathTable, SchemeRegistry, DEFAULT_TAG};
use serde::Serialize;
use tracing::{debug, warn};

/// Context inherited from enclosing groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkContext {
    tags: Vec<String>,
    prefix: String,
    strict: bool,
}

impl WalkContext {
    /// Root context. In strict mode overwritten operations are reported.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Context for the children of a group named `name`.
    ///
    /// Empty names add no tag segment but still extend the prefix.
    pub fn descend(&self, name: Option<&str>) -> Self {
        let name = name.unwrap_or_default();
        let mut tags = self.tags.clone();
        if !name.is_empty() {
            tags.push(name.to_string());
        }
        Self {
            tags,
            prefix: format!("{}/{}", self.prefix, name),
            strict: self.strict,
        }
    }

    /// The operation tag list: the joined context, or the default tag.
    pub fn tags(&self) -> Vec<String> {
        if self.tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            vec![self.tags.join(" > ")]
        }
    }

    /// Slash-joined names of the enclosing groups.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether collisions are reported.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// An operation that replaced an earlier one with the same path and method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCollision {
    /// Path template.
    pub path: String,
    /// Lower-case method.
    pub method: String,
    /// Prefix of the group where the two contributions met.
    pub group: String,
}

/// Partial result of walking a subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    /// Operations found in the subtree.
    pub paths: PathTable,
    /// Security schemes registered in the subtree.
    pub security_schemes: SchemeRegistry,
    /// Overwrites detected in the subtree (strict mode only).
    pub collisions: Vec<PathCollision>,
}

impl Contribution {
    /// Folds a child result into this accumulator.
    ///
    /// Path entries merge per method: methods present in `child` replace ours,
    /// other methods are kept. Schemes with the same name are replaced.
    pub fn absorb(&mut self, child: Contribution, ctx: &WalkContext) {
        self.collisions.extend(child.collisions);

        for (path, entry) in child.paths {
            let slot = self.paths.entry(path.clone()).or_default();
            for (method, operation) in entry {
                if ctx.is_strict() && slot.contains_key(&method) {
                    warn!(
                        path = %path,
                        method = %method,
                        group = %ctx.prefix(),
                        "operation overwritten by a later item"
                    );
                    self.collisions.push(PathCollision {
                        path: path.clone(),
                        method: method.clone(),
                        group: ctx.prefix().to_string(),
                    });
                }
                slot.insert(method, operation);
            }
        }

        self.security_schemes.extend(child.security_schemes);
    }
}

/// Walks one node.
pub fn walk(node: &CollectionNode, ctx: &WalkContext) -> Contribution {
    match node {
        CollectionNode::Group(group) => {
            let child_ctx = ctx.descend(group.name.as_deref());
            walk_children(&group.item, &child_ctx)
        }
        CollectionNode::Item(item) => build_operation(item, ctx),
        CollectionNode::Malformed => {
            debug!(group = %ctx.prefix(), "skipping malformed collection node");
            Contribution::default()
        }
    }
}

/// Walks sibling nodes in order and folds their results.
pub fn walk_children(nodes: &[CollectionNode], ctx: &WalkContext) -> Contribution {
    let mut acc = Contribution::default();
    for node in nodes {
        acc.absorb(walk(node, ctx), ctx);
    }
    acc
}
