use std::ops::Range;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::log_debug;
use super::board::Board;
use super::types::{Player, Position};

/// Number of nodes in the exhaustive tree from the empty board.
pub const FULL_TREE_NODE_COUNT: usize = 549_946;

static SHARED_TREE: OnceLock<Arc<GameTree>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One reachable board plus its search metadata.
///
/// Children of a node sit next to each other in the arena, in row-major
/// order of the cell that was filled to reach them.
#[derive(Debug, Clone)]
pub struct TreeNode {
    board: Board,
    parent: Option<NodeId>,
    first_child: u32,
    child_count: u8,
    mover: Player,
    last_move: Option<Position>,
    value: i8,
}

impl TreeNode {
    fn new(board: Board, parent: Option<NodeId>, mover: Player, last_move: Option<Position>) -> Self {
        Self {
            board,
            parent,
            first_child: 0,
            child_count: 0,
            mover,
            last_move,
            value: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The player whose mark is placed to produce this node's children.
    pub fn mover(&self) -> Player {
        self.mover
    }

    /// Cell filled to reach this node from its parent. `None` for the root.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Backed-up minimax value: +1 X wins, 0 draw, -1 O wins.
    pub fn value(&self) -> i8 {
        self.value
    }

    pub fn child_count(&self) -> usize {
        self.child_count as usize
    }

    pub fn is_terminal(&self) -> bool {
        self.child_count == 0
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + use<> {
        self.child_range().map(NodeId)
    }

    fn child_range(&self) -> Range<u32> {
        self.first_child..self.first_child + self.child_count as u32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub terminal_count: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub max_depth: usize,
}

/// Every game reachable from the empty board with X to move, fully
/// evaluated. Read-only once built.
#[derive(Debug)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl GameTree {
    pub fn build() -> Self {
        let started = Instant::now();
        let mut nodes = Vec::with_capacity(FULL_TREE_NODE_COUNT);
        nodes.push(TreeNode::new(Board::new(), None, Player::X, None));

        let mut tree = Self { nodes, root: NodeId(0) };
        tree.expand(tree.root);

        log_debug!(
            "Built game tree with {} nodes in {:?}",
            tree.nodes.len(),
            started.elapsed()
        );
        tree
    }

    /// Process-wide tree, built on first use.
    pub fn shared() -> Arc<GameTree> {
        SHARED_TREE
            .get_or_init(|| {
                let tree = GameTree::build();
                let stats = tree.stats();
                log_debug!(
                    "Game tree ready: {} nodes, {} terminal",
                    stats.node_count,
                    stats.terminal_count
                );
                Arc::new(tree)
            })
            .clone()
    }

    fn expand(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let board = node.board;
        let mover = node.mover;

        if board.is_terminal() {
            self.nodes[id.index()].value = board.utility();
            return;
        }

        let first_child = self.nodes.len() as u32;
        for pos in board.empty_cells() {
            let child = TreeNode::new(board.with_mark(pos, mover), Some(id), mover.opponent(), Some(pos));
            self.nodes.push(child);
        }
        let child_count = self.nodes.len() as u32 - first_child;

        assert!(
            child_count as usize == board.empty_count() && child_count > 0,
            "non-terminal board expanded into {} children:\n{}",
            child_count,
            board
        );

        let node = &mut self.nodes[id.index()];
        node.first_child = first_child;
        node.child_count = child_count as u8;
        let range = node.child_range();

        for child in range.clone() {
            self.expand(NodeId(child));
        }

        let values = self.nodes[range.start as usize..range.end as usize]
            .iter()
            .map(TreeNode::value);
        let value = if mover.is_maximizing() { values.max() } else { values.min() };
        self.nodes[id.index()].value = value.unwrap_or_else(|| unreachable!("node has children"));
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.node(id).children().map(|child| self.node(child))
    }

    /// Leaves in depth-first, generation order.
    pub fn terminal_nodes(&self) -> Vec<NodeId> {
        let mut terminal = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.is_terminal() {
                terminal.push(id);
            } else {
                stack.extend(node.child_range().rev().map(NodeId));
            }
        }
        terminal
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in self.nodes.iter() {
            let depth = node.board.count_of(Player::X) + node.board.count_of(Player::O);
            stats.max_depth = stats.max_depth.max(depth);
            if !node.is_terminal() {
                continue;
            }
            stats.terminal_count += 1;
            match node.board.utility() {
                1 => stats.x_wins += 1,
                -1 => stats.o_wins += 1,
                _ => stats.draws += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::types::Mark;

    fn tree() -> Arc<GameTree> {
        GameTree::shared()
    }

    #[test]
    fn test_root_is_empty_board_with_x_to_move() {
        let tree = tree();
        let root = tree.node(tree.root());
        assert_eq!(*root.board(), Board::new());
        assert_eq!(root.mover(), Player::X);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(root.child_count(), 9);
    }

    #[test]
    fn test_root_value_is_draw() {
        let tree = tree();
        assert_eq!(tree.node(tree.root()).value(), 0);
    }

    #[test]
    fn test_exhaustive_counts() {
        let stats = tree().stats();
        assert_eq!(
            stats,
            TreeStats {
                node_count: FULL_TREE_NODE_COUNT,
                terminal_count: 255_168,
                x_wins: 131_184,
                o_wins: 77_904,
                draws: 46_080,
                max_depth: 9,
            }
        );
    }

    #[test]
    fn test_terminal_nodes_match_stats() {
        let tree = tree();
        let terminal = tree.terminal_nodes();
        assert_eq!(terminal.len(), tree.stats().terminal_count);
        assert!(terminal.iter().all(|&id| tree.node(id).board().is_terminal()));

        // the first game in generation order fills cells strictly left to right
        let first = tree.node(terminal[0]).board();
        assert_eq!(*first, "XOX OXO X..".parse::<Board>().unwrap());
    }

    #[test]
    fn test_every_node_respects_structure() {
        let tree = tree();
        for index in 0..tree.len() {
            let id = NodeId(index as u32);
            let node = tree.node(id);
            let board = node.board();

            assert!(
                !(board.is_winning_for(Player::X) && board.is_winning_for(Player::O)),
                "double win:\n{}",
                board
            );

            if board.is_terminal() {
                assert!(node.is_terminal());
                assert_eq!(node.value(), board.utility());
                continue;
            }

            assert_eq!(node.child_count(), board.empty_count());
            let moves: Vec<Position> = tree.children(id).filter_map(TreeNode::last_move).collect();
            let expected: Vec<Position> = board.empty_cells().collect();
            assert_eq!(moves, expected);

            for child_id in node.children() {
                let child = tree.node(child_id);
                let pos = child.last_move().unwrap();
                assert_eq!(child.parent(), Some(id));
                assert_eq!(child.mover(), node.mover().opponent());
                assert_eq!(board.mark_at(pos), Mark::Empty);
                assert_eq!(*child.board(), board.with_mark(pos, node.mover()));
            }

            let values = tree.children(id).map(TreeNode::value);
            let expected_value = if node.mover() == Player::X { values.max() } else { values.min() };
            assert_eq!(Some(node.value()), expected_value);
        }
    }

    #[test]
    fn test_values_stay_in_range() {
        let tree = tree();
        for index in 0..tree.len() {
            let value = tree.node(NodeId(index as u32)).value();
            assert!((-1..=1).contains(&value));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let fresh = GameTree::build();
        let shared = tree();
        assert_eq!(fresh.len(), shared.len());
        for index in (0..fresh.len()).step_by(997) {
            let id = NodeId(index as u32);
            assert_eq!(fresh.node(id).board(), shared.node(id).board());
            assert_eq!(fresh.node(id).value(), shared.node(id).value());
        }
    }
}
