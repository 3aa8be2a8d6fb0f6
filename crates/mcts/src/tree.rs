//! Arena-allocated MCTS tree.
//!
//! Nodes sit in one Vec and point at each other by index, so a whole
//! search tree is dropped or rebuilt without walking it.

use crate::node::{Node, NodeId};
use othello_board::{Action, GameState};

/// Arena-allocated MCTS tree. The root is always `NodeId::ROOT`.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root for `root_state`.
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![Node::root(root_state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append the child of `parent` reached by `action` and link it.
    ///
    /// The caller has already removed `action` from the parent's untried set.
    pub(crate) fn add_child(&mut self, parent: NodeId, action: Action) -> NodeId {
        let state = self.get(parent).state.apply(&action);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(state, parent, action));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Children of `id` with their handles, in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.get(id).children.iter().map(move |&child| (child, self.get(child)))
    }

    /// Every node handle, root first.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Throw every node away and start again from `root_state`.
    pub fn reset(&mut self, root_state: GameState) {
        self.nodes.clear();
        self.nodes.push(Node::root(root_state));
    }

    /// Drop every node that is neither an ancestor of `keep` nor inside
    /// its subtree. Ancestors keep their statistics but lose their other
    /// children. Returns the new handle of `keep`; all other handles taken
    /// before the call are invalid afterwards.
    pub fn compact(&mut self, keep: NodeId) -> NodeId {
        let mut path = vec![keep.0];
        let mut current = self.get(keep).parent;
        while let Some(parent) = current {
            path.push(parent.0);
            current = self.get(parent).parent;
        }
        path.reverse();

        let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut order: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for &old in &path {
            remap[old] = Some(order.len());
            order.push(old);
        }

        // Breadth-first over the kept subtree, appending as we go.
        let mut cursor = order.len() - 1;
        while cursor < order.len() {
            for &child in &self.nodes[order[cursor]].children {
                remap[child.0] = Some(order.len());
                order.push(child.0);
            }
            cursor += 1;
        }

        let mut slots: Vec<Option<Node>> = std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        self.nodes.reserve(order.len());
        for old in order {
            if let Some(mut node) = slots[old].take() {
                node.parent = node.parent.and_then(|p| remap[p.0]).map(NodeId);
                node.children = node.children.iter().filter_map(|c| remap[c.0].map(NodeId)).collect();
                self.nodes.push(node);
            }
        }

        NodeId(path.len() - 1)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_board::Square;
    use othello_core::Player;

    fn place(tree: &Tree, parent: NodeId, sq: Square) -> Action {
        let state = tree.get(parent).state;
        state.board.action(state.to_move, Some(sq)).unwrap()
    }

    fn expand(tree: &mut Tree, parent: NodeId, sq: Square) -> NodeId {
        let action = place(tree, parent, sq);
        tree.get_mut(parent).untried.clear(sq);
        tree.add_child(parent, action)
    }

    #[test]
    fn test_new_tree() {
        let tree = Tree::new(GameState::initial());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::ROOT);
        assert_eq!(tree.get(tree.root()).state, GameState::initial());
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = Tree::new(GameState::initial());
        let child = expand(&mut tree, NodeId::ROOT, Square::D3);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(child).parent, Some(NodeId::ROOT));
        assert_eq!(tree.get(NodeId::ROOT).children, vec![child]);
        assert_eq!(tree.get(child).state.to_move, Player::White);
        assert_eq!(tree.get(child).state.steps, 1);
        assert_eq!(tree.depth(child), 1);
    }

    #[test]
    fn test_reset() {
        let mut tree = Tree::new(GameState::initial());
        expand(&mut tree, NodeId::ROOT, Square::D3);
        let other = GameState::initial().apply(&place(&tree, NodeId::ROOT, Square::C4));
        tree.reset(other);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(NodeId::ROOT).state, other);
    }

    #[test]
    fn test_compact_keeps_path_and_subtree() {
        let mut tree = Tree::new(GameState::initial());
        let d3 = expand(&mut tree, NodeId::ROOT, Square::D3);
        let c4 = expand(&mut tree, NodeId::ROOT, Square::C4);
        let c3 = expand(&mut tree, d3, Square::C3);
        let e3 = expand(&mut tree, d3, Square::E3);
        let _under_c4 = expand(&mut tree, c4, Square::C3);
        let deep = expand(&mut tree, c3, Square::B3);
        tree.get_mut(d3).visits = 7;
        let deep_state = tree.get(deep).state;
        let e3_state = tree.get(e3).state;
        assert_eq!(tree.len(), 7);

        let kept = tree.compact(c3);

        // root, d3, c3, deep
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(kept), 2);
        assert_eq!(tree.get(kept).causing_action.unwrap().square(), Some(Square::C3));

        let root = tree.get(NodeId::ROOT);
        assert_eq!(root.children.len(), 1);
        let d3 = root.children[0];
        assert_eq!(tree.get(d3).visits, 7);
        assert_eq!(tree.get(d3).children, vec![kept]);
        assert_eq!(tree.get(kept).children.len(), 1);
        assert_eq!(tree.get(tree.get(kept).children[0]).state, deep_state);
        assert!(tree.ids().all(|id| tree.get(id).state != e3_state));
    }

    #[test]
    fn test_compact_root_is_identity() {
        let mut tree = Tree::new(GameState::initial());
        expand(&mut tree, NodeId::ROOT, Square::D3);
        expand(&mut tree, NodeId::ROOT, Square::C4);
        assert_eq!(tree.compact(NodeId::ROOT), NodeId::ROOT);
        assert_eq!(tree.len(), 3);
    }
}
