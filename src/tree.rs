//! Huffman code tree construction.
//!
//! The tree is built with a binary min-heap keyed by `(weight, sequence)`.
//! Leaves get sequence numbers in ascending byte order and every merged node
//! takes the next free number, so among equal weights the node that entered
//! the heap first is extracted first. The first node extracted in a merge
//! becomes the left child.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTreeNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<CodeTreeNode>,
        right: Box<CodeTreeNode>,
    },
}

impl CodeTreeNode {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        CodeTreeNode::Leaf { byte, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            CodeTreeNode::Leaf { weight, .. } => *weight,
            CodeTreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, CodeTreeNode::Leaf { .. })
    }

    /// Joins two subtrees under a new internal node; `left` takes the 0 branch.
    pub fn merge(left: Self, right: Self) -> Self {
        let weight = left.weight() + right.weight();
        CodeTreeNode::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 1,
            CodeTreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 0,
            CodeTreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn path_length(&self, depth: u64) -> u64 {
        match self {
            CodeTreeNode::Leaf { weight, .. } => weight * depth,
            CodeTreeNode::Internal { left, right, .. } => {
                left.path_length(depth + 1) + right.path_length(depth + 1)
            }
        }
    }
}

/// Heap slot ordering nodes by ascending `(weight, seq)`.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    seq: usize,
    node: CodeTreeNode,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys to pop the minimum.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    pub root: CodeTreeNode,
}

impl CodeTree {
    /// Builds the Huffman tree for `frequencies`, or `None` when no byte occurs.
    ///
    /// A single distinct byte yields a tree whose root is that lone leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<HeapEntry> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (byte, weight))| HeapEntry {
                weight,
                seq,
                node: CodeTreeNode::leaf(byte, weight),
            })
            .collect();
        let mut next_seq = heap.len();

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = CodeTreeNode::merge(first.node, second.node);
            heap.push(HeapEntry {
                weight: node.weight(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }

        let root = heap.pop()?.node;
        log::trace!(
            "built code tree: {} leaves, depth {}",
            root.leaf_count(),
            root.depth()
        );
        Some(CodeTree { root })
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Sum of `weight * code length` over all leaves.
    ///
    /// A lone-leaf tree is counted at depth one, the length of its `"0"` code.
    pub fn weighted_path_length(&self) -> u64 {
        match &self.root {
            CodeTreeNode::Leaf { weight, .. } => *weight,
            internal => internal.path_length(0),
        }
    }
}
