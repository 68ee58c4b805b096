use std::{collections::BinaryHeap, cmp::Reverse};

use tracing::trace;

use crate::error::{Error, Result};

use super::{frequency::FrequencyTable, MAX_CODE_LENGTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeNode {
    Leaf { symbol: char, frequency: u64 },
    /// `left` and `right` index the arena of the owning [`HuffmanTree`].
    Internal { frequency: u64, left: usize, right: usize },
}

impl TreeNode {
    #[inline(always)]
    pub fn frequency(&self) -> u64 {
        match *self {
            TreeNode::Leaf { frequency, .. } | TreeNode::Internal { frequency, .. } => frequency,
        }
    }
}

/// Priority queue handle. Ordered by frequency, then by arena index.
///
/// Leaves enter the arena in ascending symbol order and every merged node is
/// appended after them, so ties between equal frequencies go to the smaller
/// symbol first and to older nodes before newer ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeapNode {
    frequency: u64,
    index: usize,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.frequency == other.frequency {
            return self.index.cmp(&other.index);
        }
        self.frequency.cmp(&other.frequency)
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Full binary merge tree over the symbols of a [`FrequencyTable`].
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<TreeNode>,
    root: usize,
}

impl HuffmanTree {
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(2 * frequencies.len() - 1);
        let mut queue = BinaryHeap::with_capacity(frequencies.len());

        for (symbol, frequency) in frequencies.sorted() {
            queue.push(Reverse(HeapNode { frequency, index: nodes.len() }));
            nodes.push(TreeNode::Leaf { symbol, frequency });
        }

        let mut root = 0;

        while let Some(Reverse(left)) = queue.pop() {
            let Some(Reverse(right)) = queue.pop() else {
                root = left.index;
                break;
            };

            let frequency = left.frequency + right.frequency;
            queue.push(Reverse(HeapNode { frequency, index: nodes.len() }));
            nodes.push(TreeNode::Internal { frequency, left: left.index, right: right.index });
        }

        trace!(leaves = frequencies.len(), nodes = nodes.len(), "built huffman tree");

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// The depth of every leaf as `(symbol, length)`, in traversal order.
    ///
    /// A tree made of a single leaf reports length 1 so that each occurrence of
    /// its symbol still costs one bit.
    pub fn code_lengths(&self) -> Result<Vec<(char, u8)>> {
        let mut lengths = Vec::with_capacity(self.num_leaves());
        let mut stack = vec![(self.root, 0usize)];

        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                TreeNode::Leaf { symbol, .. } => {
                    if depth > MAX_CODE_LENGTH {
                        return Err(Error::InvalidCodeLength(symbol, depth));
                    }
                    lengths.push((symbol, depth.max(1) as u8));
                }
                TreeNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }

        Ok(lengths)
    }
}
