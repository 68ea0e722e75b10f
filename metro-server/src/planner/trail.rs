//! Persistent path trail for search records.
//!
//! Search records branch heavily, and most of a child's path is its
//! parent's. A trail is a cons list: extending it allocates one node and
//! shares everything before it.

use std::rc::Rc;

use crate::domain::PathStep;

#[derive(Debug)]
struct Node {
    step: PathStep,
    prev: Option<Rc<Node>>,
    len: usize,
}

/// An immutable, shared-prefix list of path steps.
#[derive(Debug, Clone, Default)]
pub struct PathTrail {
    head: Option<Rc<Node>>,
}

impl PathTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new trail with `step` appended. `self` is unchanged.
    pub fn push(&self, step: PathStep) -> Self {
        let len = self.len() + 1;
        Self {
            head: Some(Rc::new(Node {
                step,
                prev: self.head.clone(),
                len,
            })),
        }
    }

    /// The most recent step.
    pub fn last(&self) -> Option<PathStep> {
        self.head.as_ref().map(|n| n.step)
    }

    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |n| n.len)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Steps from first to last.
    pub fn to_vec(&self) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.len());
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            steps.push(n.step);
            node = n.prev.as_deref();
        }
        steps.reverse();
        steps
    }
}
