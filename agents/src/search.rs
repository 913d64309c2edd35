use crate::evaluation::evaluate;
use deep_chess_core::{classify, legal_moves, Board, Color, Mate, Move};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Evaluation of the best move for the side to move.
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
}

struct SearchInfo {
    nodes: u64,
}

/// Searches the position to a fixed depth for the side to move.
pub fn search(board: &Board, depth: u8) -> SearchResult {
    let mut info = SearchInfo { nodes: 0 };
    let (score, best_move) = alpha_beta_root(board, depth, &mut info);

    let result = SearchResult {
        best_move,
        score,
        depth,
        nodes: info.nodes,
    };

    debug!(
        best_move = ?result.best_move.map(|m| m.to_string()),
        score = result.score,
        nodes = result.nodes,
        "search finished"
    );

    result
}

/// Returns true if either side has run out of moves.
fn is_terminal(board: &Board) -> bool {
    Color::ALL
        .into_iter()
        .any(|color| classify(board, color) != Mate::NoMate)
}

fn alpha_beta_root(board: &Board, depth: u8, info: &mut SearchInfo) -> (f64, Option<Move>) {
    let side = board.side_to_move();
    let moves = legal_moves(board, side);

    // Even a lost position must return some move
    let mut best_move = moves.first().copied();
    let mut best_score = f64::NEG_INFINITY;

    if depth == 0 {
        return (evaluate(board, side), best_move);
    }

    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;

    for mv in moves {
        let mut child = board.clone();
        child.commit(mv);

        let score = -alpha_beta(&child, depth - 1, -beta, -alpha, info);

        // Ties keep the earlier move
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score > alpha {
            alpha = score;
        }

        if alpha >= beta {
            break;
        }
    }

    (best_score, best_move)
}

fn alpha_beta(board: &Board, depth: u8, mut alpha: f64, beta: f64, info: &mut SearchInfo) -> f64 {
    info.nodes += 1;

    let side = board.side_to_move();

    if depth == 0 || is_terminal(board) {
        return evaluate(board, side);
    }

    let mut best_score = f64::NEG_INFINITY;

    for mv in legal_moves(board, side) {
        let mut child = board.clone();
        child.commit(mv);

        let score = -alpha_beta(&child, depth - 1, -beta, -alpha, info);

        if score > best_score {
            best_score = score;
        }

        if score > alpha {
            alpha = score;
        }

        // Beta cutoff
        if alpha >= beta {
            break;
        }
    }

    best_score
}
