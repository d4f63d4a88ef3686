//! Bump arena that owns every syntax node for one parse.
//!
//! Nodes are appended and never removed. Speculative parses that get
//! rewound may leave orphaned nodes behind; they are unreachable from the
//! root and cost only their slot. Indices are only ever handed out by
//! `alloc`, so lookups are infallible.

use svz_common::limits::MAX_NODE_PREALLOC;

use crate::node::{NodeData, NodeIndex, SyntaxKind, SyntaxNode};

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SyntaxNode>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    /// Pre-size the node vector from a token count estimate, capped so a
    /// pathological input cannot reserve unbounded memory up front.
    pub fn with_estimate(token_count: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(token_count.min(MAX_NODE_PREALLOC)),
        }
    }

    pub fn alloc(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode { kind, pos, end, data });
        index
    }

    pub fn get(&self, index: NodeIndex) -> &SyntaxNode {
        &self.nodes[index.0 as usize]
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> &mut SyntaxNode {
        &mut self.nodes[index.0 as usize]
    }

    pub fn kind(&self, index: NodeIndex) -> SyntaxKind {
        self.nodes[index.0 as usize].kind
    }

    /// Number of allocated nodes, including any orphaned by speculation.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BadData;

    #[test]
    fn alloc_returns_sequential_indices() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(
            SyntaxKind::BadExpression,
            0,
            0,
            NodeData::Bad(BadData { token: None }),
        );
        let b = arena.alloc(
            SyntaxKind::BadExpression,
            1,
            2,
            NodeData::Bad(BadData { token: None }),
        );
        assert_eq!(a, NodeIndex(0));
        assert_eq!(b, NodeIndex(1));
        assert_eq!(arena.get(b).pos, 1);
        assert_eq!(arena.len(), 2);
    }
}
