use crate::{
    attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS},
    board::Board,
    castling::CastlingRights,
    types::*,
};

const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Destinations for the piece on `from` by movement pattern alone, ignoring
/// whether the mover's king ends up in check. Castling is not included.
pub fn pseudo_legal_moves(board: &Board, from: Coord) -> Vec<Coord> {
    let mut out = Vec::with_capacity(28);
    pseudo_moves_into(board, from, &mut out);
    out
}

fn pseudo_moves_into(board: &Board, from: Coord, out: &mut Vec<Coord>) {
    let Some(pc) = board.piece_at(from) else {
        return;
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_step(board, from, pc.color, out, &KNIGHT_OFFSETS),
        PieceKind::King => gen_step(board, from, pc.color, out, &KING_OFFSETS),
        PieceKind::Bishop => gen_slider(board, from, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(board, from, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => gen_slider(board, from, pc.color, out, &QUEEN_DIRS),
    }
}

/// Legal destinations for the piece on `from` when `side_to_move` is to play.
///
/// Castling is only considered when `castling` is supplied. Every candidate is
/// played out with [`Board::apply_move`] and dropped if it leaves the mover in
/// check. Empty squares and enemy pieces yield no moves.
pub fn legal_moves(
    board: &Board,
    from: Coord,
    side_to_move: Color,
    castling: Option<&CastlingRights>,
) -> Vec<Coord> {
    let mut out = Vec::with_capacity(28);
    legal_moves_into(board, from, side_to_move, castling, &mut out);
    out
}

/// Same as [`legal_moves`], reusing the caller's buffer.
pub fn legal_moves_into(
    board: &Board,
    from: Coord,
    side_to_move: Color,
    castling: Option<&CastlingRights>,
    out: &mut Vec<Coord>,
) {
    out.clear();
    let Some(pc) = board.piece_at(from) else {
        return;
    };
    if pc.color != side_to_move {
        return;
    }

    pseudo_moves_into(board, from, out);
    if pc.kind == PieceKind::King
        && let Some(rights) = castling
    {
        gen_castle(board, from, pc.color, rights, out);
    }

    out.retain(|&to| !board.apply_move(from, to).in_check(pc.color));
}

fn gen_pawn(board: &Board, from: Coord, c: Color, out: &mut Vec<Coord>) {
    let dir = c.forward();

    // forward 1
    if let Some(one) = from.offset(dir, 0)
        && board.piece_at(one).is_none()
    {
        out.push(one);

        // forward 2 from start
        if from.row() == c.pawn_row()
            && let Some(two) = from.offset(2 * dir, 0)
            && board.piece_at(two).is_none()
        {
            out.push(two);
        }
    }

    // captures only; no en-passant
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc)
            && let Some(target) = board.piece_at(to)
            && target.color != c
        {
            out.push(to);
        }
    }
}

fn gen_step(board: &Board, from: Coord, c: Color, out: &mut Vec<Coord>, deltas: &[(i8, i8)]) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Coord, c: Color, out: &mut Vec<Coord>, dirs: &[(i8, i8)]) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, dc);
        }
    }
}

fn gen_castle(board: &Board, from: Coord, c: Color, rights: &CastlingRights, out: &mut Vec<Coord>) {
    // Must be on original king square
    let row = c.back_row();
    if from.row() != row || from.col() != 4 {
        return;
    }
    // Can't castle out of check
    if board.in_check(c) {
        return;
    }

    let side = rights.side(c);
    let enemy = c.opposite();
    let rook = Piece::new(c, PieceKind::Rook);
    let at = |col: u8| Coord::new(row, col);

    // (right held, rook corner, squares that must be empty, squares the king crosses)
    let options: [(bool, u8, &[u8], &[u8]); 2] = [
        (side.kingside, 7, &[5, 6], &[5, 6]),
        (side.queenside, 0, &[1, 2, 3], &[3, 2]),
    ];

    for (held, rook_col, between, path) in options {
        if !held {
            continue;
        }
        if at(rook_col).and_then(|s| board.piece_at(s)) != Some(rook) {
            continue;
        }
        let clear = between
            .iter()
            .all(|&col| at(col).is_some_and(|s| board.piece_at(s).is_none()));
        let safe = path
            .iter()
            .all(|&col| at(col).is_some_and(|s| !board.is_square_attacked(s, enemy)));
        if clear
            && safe
            && let Some(dest) = path.last().and_then(|&col| at(col))
        {
            out.push(dest);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
