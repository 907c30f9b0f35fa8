//////////////////////////
// rules.rs
//////////////////////////
//
// Movement legality, check detection, and position classification. Everything
// here works on a Board plus the color asking the question; no rule state
// lives outside the grid itself.

use crate::board::Board;
use crate::types::{Color, GameStatus, Move, PieceType, Square};

impl Board {
    /// Pseudo-legal test for moving the piece on `from` to `to`: movement
    /// pattern, blocking, and no self-capture, but not whether the mover's
    /// own king is left attacked. `from` must hold a piece; calling this on
    /// an empty square is a caller bug and panics. An out-of-range `to` is an
    /// ordinary illegal move.
    pub fn is_valid_move(&self, from: Square, to: Square, mover: Color) -> bool {
        if to.0 >= 8 || to.1 >= 8 {
            return false;
        }
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => panic!("is_valid_move called on empty square {:?}", from),
        };
        if piece.color != mover {
            return false;
        }
        if let Some(target) = self.piece_at(to) {
            if target.color == mover {
                return false;
            }
        }
        match piece.piece_type {
            PieceType::Pawn => self.is_valid_pawn_move(from, to, mover),
            PieceType::Knight => self.is_valid_knight_move(from, to),
            PieceType::Bishop => self.is_valid_bishop_move(from, to),
            PieceType::Rook => self.is_valid_rook_move(from, to),
            PieceType::Queen => self.is_valid_queen_move(from, to),
            PieceType::King => self.is_valid_king_move(from, to),
        }
    }

    fn is_valid_pawn_move(&self, from: Square, to: Square, color: Color) -> bool {
        let dir = color.pawn_direction();
        let dr = to.0 as i32 - from.0 as i32;
        let dc = (to.1 as i32 - from.1 as i32).abs();

        if dc == 0 {
            // Forward moves only land on empty squares.
            if self.piece_at(to).is_some() {
                return false;
            }
            if dr == dir {
                return true;
            }
            if dr == 2 * dir && from.0 == color.pawn_home_row() {
                let midway = ((from.0 as i32 + dir) as usize, from.1);
                return self.piece_at(midway).is_none();
            }
            return false;
        }
        // One square diagonally, and only onto an enemy piece. No en passant.
        dc == 1 && dr == dir && self.piece_at(to).is_some()
    }

    fn is_valid_knight_move(&self, from: Square, to: Square) -> bool {
        let dr = (to.0 as i32 - from.0 as i32).abs();
        let dc = (to.1 as i32 - from.1 as i32).abs();
        (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
    }

    fn is_valid_bishop_move(&self, from: Square, to: Square) -> bool {
        let dr = (to.0 as i32 - from.0 as i32).abs();
        let dc = (to.1 as i32 - from.1 as i32).abs();
        dr == dc && dr > 0 && self.is_path_clear(from, to)
    }

    fn is_valid_rook_move(&self, from: Square, to: Square) -> bool {
        ((from.0 == to.0) != (from.1 == to.1)) && self.is_path_clear(from, to)
    }

    fn is_valid_queen_move(&self, from: Square, to: Square) -> bool {
        self.is_valid_bishop_move(from, to) || self.is_valid_rook_move(from, to)
    }

    fn is_valid_king_move(&self, from: Square, to: Square) -> bool {
        let dr = (to.0 as i32 - from.0 as i32).abs();
        let dc = (to.1 as i32 - from.1 as i32).abs();
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }

    /// Walks from `from` toward `to` one step at a time, endpoints excluded.
    /// Callers must pass rook- or bishop-aligned squares.
    fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.0 as i32 - from.0 as i32).signum();
        let dc = (to.1 as i32 - from.1 as i32).signum();
        let mut row = from.0 as i32 + dr;
        let mut col = from.1 as i32 + dc;
        while (row, col) != (to.0 as i32, to.1 as i32) {
            if self.squares[row as usize][col as usize].is_some() {
                return false;
            }
            row += dr;
            col += dc;
        }
        true
    }

    /// True when any piece of `by_color` has a pseudo-legal move onto
    /// `square`. Staying pseudo-legal here is what keeps check detection
    /// from recursing into itself.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    if piece.color == by_color && self.is_valid_move((row, col), square, by_color) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(square) => self.is_square_attacked(square, color.opposite()),
            None => false,
        }
    }

    /// Every fully legal move for `color`: pseudo-legal, and shown on a
    /// scratch copy of the board not to leave `color`'s own king attacked.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    if piece.color != color {
                        continue;
                    }
                    for to_row in 0..8 {
                        for to_col in 0..8 {
                            let mv = Move {
                                from: (row, col),
                                to: (to_row, to_col),
                            };
                            if self.is_valid_move(mv.from, mv.to, color)
                                && !self.leaves_king_exposed(mv, color)
                            {
                                moves.push(mv);
                            }
                        }
                    }
                }
            }
        }
        moves
    }

    fn leaves_king_exposed(&self, mv: Move, color: Color) -> bool {
        let mut trial = self.clone();
        trial.apply_move(mv);
        trial.is_in_check(color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Classifies the position for the side to move. Exactly one status
    /// holds for any board and color.
    pub fn game_status(&self, to_move: Color) -> GameStatus {
        let stuck = self.legal_moves(to_move).is_empty();
        match (self.is_in_check(to_move), stuck) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Check,
            (false, true) => GameStatus::Stalemate,
            (false, false) => GameStatus::Ongoing,
        }
    }

    /// Applies the move if it is fully legal for `mover`, then promotes any
    /// pawn that reached its farthest rank. Returns whether the move was
    /// applied; a rejected move leaves the board untouched.
    pub fn attempt_move(&mut self, from: Square, to: Square, mover: Color) -> bool {
        let mv = Move { from, to };
        if !self.is_valid_move(from, to, mover) || self.leaves_king_exposed(mv, mover) {
            return false;
        }
        self.apply_move(mv);
        self.promote_pawns();
        true
    }
}
