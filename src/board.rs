//////////////////////////
// board.rs
//////////////////////////

use std::fmt;

use colored::*;

use crate::types::{Color, Move, Piece, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8x8 grid of optional pieces, indexed `squares[row][col]` with row 0 at
/// the top (black's back rank) and row 7 at the bottom (white's back rank).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Standard starting position, white to move first.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.setup_initial_position();
        board
    }

    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    fn setup_initial_position(&mut self) {
        for (col, &piece_type) in BACK_RANK.iter().enumerate() {
            self.squares[0][col] = Some(Piece::new(Color::Black, piece_type));
            self.squares[7][col] = Some(Piece::new(Color::White, piece_type));
        }
        for col in 0..8 {
            self.squares[1][col] = Some(Piece::new(Color::Black, PieceType::Pawn));
            self.squares[6][col] = Some(Piece::new(Color::White, PieceType::Pawn));
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.0][square.1]
    }

    /// Moves whatever stands on `mv.from` onto `mv.to`, capturing by
    /// replacement. Legality is the caller's concern; `mv.from` must not be
    /// empty.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(
            self.piece_at(mv.from).is_some(),
            "apply_move from empty square {:?}",
            mv.from
        );
        self.squares[mv.to.0][mv.to.1] = self.squares[mv.from.0][mv.from.1].take();
    }

    /// Replaces every pawn standing on its color's farthest rank with a queen
    /// of the same color. Runs after each applied move, before the position
    /// is classified; a fresh queen can give check.
    pub fn promote_pawns(&mut self) {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    if piece.piece_type == PieceType::Pawn && row == piece.color.promotion_row() {
                        self.squares[row][col] = Some(Piece::new(piece.color, PieceType::Queen));
                    }
                }
            }
        }
    }

    /// Scans for the king of `color`. `None` means that king is gone, which
    /// correct play never produces; callers treat it as "not in check".
    pub fn king_square(&self, color: Color) -> Option<Square> {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    if piece.piece_type == PieceType::King && piece.color == color {
                        return Some((row, col));
                    }
                }
            }
        }
        None
    }

    /// Structural sanity check: one king per side, no pawn resting on a
    /// promotion rank. Meant for callers that drive whole games.
    pub fn validate_board_state(&self) -> Result<(), String> {
        let mut white_kings = 0;
        let mut black_kings = 0;
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    if piece.piece_type == PieceType::King {
                        match piece.color {
                            Color::White => white_kings += 1,
                            Color::Black => black_kings += 1,
                        }
                    }
                    if piece.piece_type == PieceType::Pawn && row == piece.color.promotion_row() {
                        return Err(format!("unpromoted {} pawn on row {}", piece.color, row));
                    }
                }
            }
        }
        if white_kings != 1 || black_kings != 1 {
            return Err(format!(
                "invalid number of kings: white={}, black={}",
                white_kings, black_kings
            ));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..8u8 {
            write!(f, " {} ", ((b'a' + col) as char).to_string().cyan())?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", "─".repeat(24).bright_magenta())?;
        for row in 0..8 {
            let rank = (8 - row).to_string();
            write!(f, "{} {}", rank.cyan(), "│".bright_magenta())?;
            for col in 0..8 {
                let text = match self.squares[row][col] {
                    Some(piece) => {
                        let symbol = piece.symbol().to_string();
                        if piece.color == Color::White {
                            symbol.bright_red()
                        } else {
                            symbol.bright_blue()
                        }
                    }
                    None => "·".bright_magenta(),
                };
                write!(f, " {} ", text)?;
            }
            writeln!(f, "{} {}", "│".bright_magenta(), rank.cyan())?;
        }
        writeln!(f, "  {}", "─".repeat(24).bright_magenta())?;
        write!(f, "  ")?;
        for col in 0..8u8 {
            write!(f, " {} ", ((b'a' + col) as char).to_string().cyan())?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_is_set_up() {
        let board = Board::new();
        assert_eq!(
            board.piece_at((7, 4)),
            Some(Piece::new(Color::White, PieceType::King))
        );
        assert_eq!(
            board.piece_at((0, 3)),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        for col in 0..8 {
            assert_eq!(
                board.piece_at((6, col)),
                Some(Piece::new(Color::White, PieceType::Pawn))
            );
            assert_eq!(
                board.piece_at((1, col)),
                Some(Piece::new(Color::Black, PieceType::Pawn))
            );
        }
        for row in 2..6 {
            for col in 0..8 {
                assert_eq!(board.piece_at((row, col)), None);
            }
        }
    }

    #[test]
    fn initial_position_validates() {
        assert!(Board::new().validate_board_state().is_ok());
    }

    #[test]
    fn empty_board_fails_validation() {
        assert!(Board::empty().validate_board_state().is_err());
    }

    #[test]
    fn resting_far_rank_pawn_fails_validation() {
        let mut board = Board::empty();
        board.squares[7][4] = Some(Piece::new(Color::White, PieceType::King));
        board.squares[0][4] = Some(Piece::new(Color::Black, PieceType::King));
        board.squares[0][2] = Some(Piece::new(Color::White, PieceType::Pawn));
        assert!(board.validate_board_state().is_err());
    }

    #[test]
    fn apply_move_relocates_the_piece() {
        let mut board = Board::new();
        board.apply_move(Move {
            from: (6, 4),
            to: (4, 4),
        });
        assert_eq!(board.piece_at((6, 4)), None);
        assert_eq!(
            board.piece_at((4, 4)),
            Some(Piece::new(Color::White, PieceType::Pawn))
        );
    }

    #[test]
    fn apply_move_captures_by_replacement() {
        let mut board = Board::empty();
        board.squares[4][4] = Some(Piece::new(Color::White, PieceType::Rook));
        board.squares[4][7] = Some(Piece::new(Color::Black, PieceType::Knight));
        board.apply_move(Move {
            from: (4, 4),
            to: (4, 7),
        });
        assert_eq!(board.piece_at((4, 4)), None);
        assert_eq!(
            board.piece_at((4, 7)),
            Some(Piece::new(Color::White, PieceType::Rook))
        );
    }

    #[test]
    fn promote_pawns_queens_both_colors() {
        let mut board = Board::empty();
        board.squares[0][3] = Some(Piece::new(Color::White, PieceType::Pawn));
        board.squares[7][2] = Some(Piece::new(Color::Black, PieceType::Pawn));
        board.squares[5][1] = Some(Piece::new(Color::White, PieceType::Pawn));
        board.promote_pawns();
        assert_eq!(
            board.piece_at((0, 3)),
            Some(Piece::new(Color::White, PieceType::Queen))
        );
        assert_eq!(
            board.piece_at((7, 2)),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        assert_eq!(
            board.piece_at((5, 1)),
            Some(Piece::new(Color::White, PieceType::Pawn))
        );
    }

    #[test]
    fn promote_pawns_ignores_wrong_far_rank() {
        let mut board = Board::empty();
        // A black pawn on row 0 would be moving backwards; it stays a pawn.
        board.squares[0][6] = Some(Piece::new(Color::Black, PieceType::Pawn));
        board.promote_pawns();
        assert_eq!(
            board.piece_at((0, 6)),
            Some(Piece::new(Color::Black, PieceType::Pawn))
        );
    }

    #[test]
    fn king_square_finds_both_kings() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Some((7, 4)));
        assert_eq!(board.king_square(Color::Black), Some((0, 4)));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }
}
