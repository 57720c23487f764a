use super::error::TicTacToeError;
use super::game_tree::{GameTree, NodeId};
use super::types::Position;

/// Follows `pos` from `node` to the matching precomputed child.
pub fn advance(tree: &GameTree, node: NodeId, pos: Position) -> Result<NodeId, TicTacToeError> {
    tree.node(node)
        .children()
        .find(|&child| tree.node(child).last_move() == Some(pos))
        .ok_or(TicTacToeError::invalid_move(pos))
}

/// Child with the best value for the side to move: highest for X, lowest
/// for O. Ties go to the first child in generation order.
pub fn best_child(tree: &GameTree, node: NodeId) -> Result<NodeId, TicTacToeError> {
    let maximizing = tree.node(node).mover().is_maximizing();
    let mut best: Option<(NodeId, i8)> = None;

    for child in tree.node(node).children() {
        let value = tree.node(child).value();
        let better = match best {
            None => true,
            Some((_, best_value)) if maximizing => value > best_value,
            Some((_, best_value)) => value < best_value,
        };
        if better {
            best = Some((child, value));
        }
    }

    best.map(|(child, _)| child).ok_or(TicTacToeError::NoMovesAvailable)
}

pub fn select_ai_move(tree: &GameTree, node: NodeId) -> Result<Position, TicTacToeError> {
    let child = best_child(tree, node)?;
    tree.node(child)
        .last_move()
        .ok_or(TicTacToeError::NoMovesAvailable)
}

/// Every legal move from `node` with the minimax value of the position it leads to.
pub fn candidate_moves(tree: &GameTree, node: NodeId) -> Vec<(Position, i8)> {
    tree.children(node)
        .filter_map(|child| child.last_move().map(|pos| (pos, child.value())))
        .collect()
}
