//////////////////////////
// engine.rs
//////////////////////////
//
// The automated opponent: one-ply greedy scoring with a little randomness so
// games do not repeat move for move.

use rand::seq::SliceRandom;

use crate::board::Board;
use crate::types::{Color, Move, PieceType, Square};

const CENTER_SQUARES: [Square; 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

/// How many of the best-scoring moves stay in the hat.
const TOP_MOVE_COUNT: usize = 3;

/// Capture-greedy score for one candidate move. Captures earn the victim's
/// value, landing on a center square earns a flat bonus, and quiet moves pay
/// a small penalty so any capture outranks them.
pub fn score_move(board: &Board, mv: Move) -> i32 {
    let mut score = 0;
    match board.piece_at(mv.to) {
        Some(target) => {
            score += match target.piece_type {
                PieceType::Queen => 9,
                PieceType::Rook => 5,
                PieceType::Bishop | PieceType::Knight => 3,
                PieceType::Pawn => 1,
                // Legal play never offers a king capture; the arm keeps the
                // match exhaustive.
                PieceType::King => 0,
            };
        }
        None => score -= 1,
    }
    if CENTER_SQUARES.contains(&mv.to) {
        score += 2;
    }
    score
}

/// Sorts the candidates best-first and keeps at most TOP_MOVE_COUNT of them.
fn ranked_moves(board: &Board, mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by(|a, b| score_move(board, *b).cmp(&score_move(board, *a)));
    moves.truncate(TOP_MOVE_COUNT);
    moves
}

/// Picks the automated side's move: uniformly at random among the top three
/// scoring fully legal moves. `None` means `color` has no legal move at all,
/// a position the caller should already have classified as mate or
/// stalemate.
pub fn automated_move(board: &Board, color: Color) -> Option<Move> {
    // legal_moves already refuses anything that leaves the king exposed, so
    // check positions need no extra evasion filtering here.
    let moves = board.legal_moves(color);
    if moves.is_empty() {
        return None;
    }
    let top = ranked_moves(board, moves);
    let mut rng = rand::thread_rng();
    top.choose(&mut rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    #[test]
    fn capture_scores_add_the_victims_value() {
        let mut board = Board::empty();
        board.squares[1][1] = Some(Piece::new(Color::Black, PieceType::Queen));
        board.squares[5][5] = Some(Piece::new(Color::Black, PieceType::Rook));
        board.squares[6][6] = Some(Piece::new(Color::Black, PieceType::Bishop));
        board.squares[2][6] = Some(Piece::new(Color::Black, PieceType::Knight));
        board.squares[4][4] = Some(Piece::new(Color::Black, PieceType::Pawn));

        // Scoring only looks at the destination.
        let from = (3, 2);
        assert_eq!(score_move(&board, Move { from, to: (1, 1) }), 9);
        assert_eq!(score_move(&board, Move { from, to: (5, 5) }), 5);
        assert_eq!(score_move(&board, Move { from, to: (6, 6) }), 3);
        assert_eq!(score_move(&board, Move { from, to: (2, 6) }), 3);
        // Pawn capture on a center square stacks the center bonus.
        assert_eq!(score_move(&board, Move { from, to: (4, 4) }), 3);
    }

    #[test]
    fn quiet_moves_prefer_the_center() {
        let board = Board::empty();
        let from = (3, 2);
        assert_eq!(score_move(&board, Move { from, to: (3, 3) }), 1);
        assert_eq!(score_move(&board, Move { from, to: (0, 0) }), -1);
    }

    #[test]
    fn ranked_moves_sorts_best_first_and_caps_at_three() {
        let mut board = Board::empty();
        board.squares[1][1] = Some(Piece::new(Color::Black, PieceType::Queen));
        board.squares[5][5] = Some(Piece::new(Color::Black, PieceType::Pawn));

        let from = (3, 2);
        let candidates = vec![
            Move { from, to: (0, 0) }, // -1
            Move { from, to: (5, 5) }, // 1
            Move { from, to: (1, 1) }, // 9
            Move { from, to: (4, 4) }, // 1
        ];
        let ranked = ranked_moves(&board, candidates);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], Move { from, to: (1, 1) });
        assert_eq!(score_move(&board, ranked[1]), 1);
        assert_eq!(score_move(&board, ranked[2]), 1);
    }

    #[test]
    fn automated_move_needs_a_legal_move() {
        let mut board = Board::empty();
        board.squares[7][7] = Some(Piece::new(Color::White, PieceType::King));
        assert_eq!(automated_move(&board, Color::Black), None);
        assert!(automated_move(&board, Color::White).is_some());
    }

    #[test]
    fn automated_move_stays_inside_the_top_three() {
        let mut board = Board::empty();
        board.squares[4][3] = Some(Piece::new(Color::White, PieceType::Queen));
        board.squares[4][6] = Some(Piece::new(Color::Black, PieceType::Rook));

        let legal = board.legal_moves(Color::White);
        let mut scores: Vec<i32> = legal.iter().map(|mv| score_move(&board, *mv)).collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        let cutoff = scores[2.min(scores.len() - 1)];

        for _ in 0..32 {
            let mv = automated_move(&board, Color::White).expect("white has moves");
            assert!(legal.contains(&mv));
            assert!(score_move(&board, mv) >= cutoff);
        }
    }

    #[test]
    fn automated_move_escapes_check() {
        let mut board = Board::empty();
        board.squares[4][4] = Some(Piece::new(Color::Black, PieceType::King));
        board.squares[4][0] = Some(Piece::new(Color::White, PieceType::Rook));
        board.squares[7][7] = Some(Piece::new(Color::White, PieceType::King));
        assert!(board.is_in_check(Color::Black));

        for _ in 0..16 {
            let mv = automated_move(&board, Color::Black).expect("the king has escapes");
            let mut trial = board.clone();
            trial.apply_move(mv);
            assert!(!trial.is_in_check(Color::Black));
        }
    }
}
