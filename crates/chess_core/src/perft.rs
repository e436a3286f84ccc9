use crate::{game::GameState, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves: Vec<Move> = state.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&state.apply(mv), depth - 1))
        .sum()
}

/// Per-move node counts at `depth`, useful when hunting a generator bug.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    state
        .all_legal_moves()
        .into_iter()
        .map(|mv| (mv, perft(&state.apply(mv), depth - 1)))
        .collect()
}
