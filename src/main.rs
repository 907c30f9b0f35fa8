//////////////////////////
// main.rs
//////////////////////////
//
// welcome to genchess - a terminal chess game with an optional computer
// opponent that grabs material first and asks questions never.

use std::fmt;
use std::io::{self, Write};

use colored::*;

use genchess::board::Board;
use genchess::engine::automated_move;
use genchess::types::{Color, GameStatus, Move, Square};

enum TurnOutcome {
    Moved,
    Retry,
    Quit,
}

#[derive(Debug)]
enum InputError {
    BadFormat,
    EmptySquare,
    WrongColor,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::BadFormat => write!(f, "use coordinates like 'e2e4' or 'e2 e4'"),
            InputError::EmptySquare => write!(f, "there's no piece on that square"),
            InputError::WrongColor => write!(f, "that's not your piece"),
        }
    }
}

fn main() {
    println!("{}", "Welcome to genchess!".bright_magenta().bold());

    loop {
        println!("\nCommands:");
        println!("  play        - Play vs. the computer (you are White)");
        println!("  play human  - Play a local human vs. human game");
        println!("  quit        - Exit");
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            println!("Read error!");
            continue;
        }
        let cmd = line.trim();

        match cmd {
            "quit" => {
                println!("Goodbye!");
                break;
            }
            "play" => {
                println!("Starting a game against the computer...");
                play_ai_game();
            }
            "play human" => {
                println!("Starting a local human vs. human game...");
                play_local_game();
            }
            "" => {}
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }
    }
}

fn play_ai_game() {
    let mut board = Board::new();
    let mut turn = Color::White;

    println!("You play White. Enter moves like 'e2e4'; 'moves e2' lists a piece's options.");
    loop {
        println!("\n{}", board);
        if let Err(e) = board.validate_board_state() {
            println!("{} {}", "Board invalid:".bright_red(), e);
            break;
        }
        if announce_status(&board, turn) {
            break;
        }

        if turn == Color::Black {
            println!("Computer thinking...");
            match automated_move(&board, turn) {
                Some(mv) => {
                    if !board.attempt_move(mv.from, mv.to, turn) {
                        println!("Computer move was rejected. Stopping.");
                        break;
                    }
                    println!("Computer plays: {}", format_move(mv).bright_blue());
                    turn = turn.opposite();
                }
                None => {
                    // announce_status has already reported mate or stalemate.
                    println!("Computer has no move. Stopping.");
                    break;
                }
            }
            continue;
        }

        match human_turn(&mut board, turn) {
            TurnOutcome::Moved => turn = turn.opposite(),
            TurnOutcome::Retry => {}
            TurnOutcome::Quit => break,
        }
    }
}

fn play_local_game() {
    let mut board = Board::new();
    let mut turn = Color::White;

    println!("Enter moves like 'e2e4' or 'e2 e4'; 'moves e2' lists a piece's options.");
    loop {
        println!("\n{}", board);
        if let Err(e) = board.validate_board_state() {
            println!("{} {}", "Board invalid:".bright_red(), e);
            break;
        }
        if announce_status(&board, turn) {
            break;
        }

        match human_turn(&mut board, turn) {
            TurnOutcome::Moved => turn = turn.opposite(),
            TurnOutcome::Retry => {}
            TurnOutcome::Quit => break,
        }
    }
}

/// Prints the status line for the side to move. Returns true when the game
/// is over.
fn announce_status(board: &Board, to_move: Color) -> bool {
    match board.game_status(to_move) {
        GameStatus::Checkmate => {
            let winner = to_move.opposite();
            println!("{}", format!("Checkmate! {} wins!", winner).bright_yellow());
            true
        }
        GameStatus::Stalemate => {
            println!("{}", "Stalemate! The game is a draw.".bright_yellow());
            true
        }
        GameStatus::Check => {
            println!("{}", format!("{} is in check!", to_move).bright_yellow());
            false
        }
        GameStatus::Ongoing => false,
    }
}

fn human_turn(board: &mut Board, turn: Color) -> TurnOutcome {
    println!("{} to move:", turn);
    print!("> ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        println!("Read error!");
        return TurnOutcome::Quit;
    }
    let input = line.trim();

    if input == "quit" {
        return TurnOutcome::Quit;
    }
    if input.is_empty() {
        return TurnOutcome::Retry;
    }
    if let Some(square_text) = input.strip_prefix("moves ") {
        show_moves(board, square_text.trim(), turn);
        return TurnOutcome::Retry;
    }

    let (from, to) = match parse_move(input) {
        Ok(pair) => pair,
        Err(e) => {
            println!("{} {}", "Bad input:".bright_red(), e);
            return TurnOutcome::Retry;
        }
    };
    if let Err(e) = select_piece(board, from, turn) {
        println!("{} {}", "Bad input:".bright_red(), e);
        return TurnOutcome::Retry;
    }
    if board.attempt_move(from, to, turn) {
        TurnOutcome::Moved
    } else {
        println!("{}", "Illegal move.".bright_red());
        TurnOutcome::Retry
    }
}

fn show_moves(board: &Board, square_text: &str, turn: Color) {
    let from = match parse_square(square_text) {
        Some(square) => square,
        None => {
            println!("{} {}", "Bad input:".bright_red(), InputError::BadFormat);
            return;
        }
    };
    if let Err(e) = select_piece(board, from, turn) {
        println!("{} {}", "Bad input:".bright_red(), e);
        return;
    }
    let destinations: Vec<String> = board
        .legal_moves(turn)
        .into_iter()
        .filter(|mv| mv.from == from)
        .map(|mv| square_name(mv.to))
        .collect();
    if destinations.is_empty() {
        println!("{} has no legal moves.", square_name(from));
    } else {
        println!(
            "{} can reach: {}",
            square_name(from),
            destinations.join(" ").bright_green()
        );
    }
}

/// The guard that keeps driver input honest: the engine itself treats an
/// empty `from` square as a caller bug.
fn select_piece(board: &Board, from: Square, turn: Color) -> Result<(), InputError> {
    match board.piece_at(from) {
        Some(piece) if piece.color == turn => Ok(()),
        Some(_) => Err(InputError::WrongColor),
        None => Err(InputError::EmptySquare),
    }
}

fn parse_move(text: &str) -> Result<(Square, Square), InputError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (from_text, to_text) = match parts.as_slice() {
        [mv] if mv.len() == 4 && mv.is_ascii() => (&mv[..2], &mv[2..]),
        [from, to] => (*from, *to),
        _ => return Err(InputError::BadFormat),
    };
    let from = parse_square(from_text).ok_or(InputError::BadFormat)?;
    let to = parse_square(to_text).ok_or(InputError::BadFormat)?;
    Ok((from, to))
}

/// "e2" -> (6, 4). Rank 1 is the bottom of the rendered board, row 7.
fn parse_square(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = match bytes[0] {
        b'a'..=b'h' => (bytes[0] - b'a') as usize,
        _ => return None,
    };
    let row = match bytes[1] {
        b'1'..=b'8' => 7 - (bytes[1] - b'1') as usize,
        _ => return None,
    };
    Some((row, col))
}

fn square_name(square: Square) -> String {
    let file = (b'a' + square.1 as u8) as char;
    let rank = 8 - square.0;
    format!("{}{}", file, rank)
}

fn format_move(mv: Move) -> String {
    format!("{}{}", square_name(mv.from), square_name(mv.to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_square_flips_rank_to_row() {
        assert_eq!(parse_square("a1"), Some((7, 0)));
        assert_eq!(parse_square("e2"), Some((6, 4)));
        assert_eq!(parse_square("h8"), Some((0, 7)));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
    }

    #[test]
    fn parse_move_accepts_both_forms() {
        assert_eq!(parse_move("e2e4").ok(), Some(((6, 4), (4, 4))));
        assert_eq!(parse_move("e2 e4").ok(), Some(((6, 4), (4, 4))));
        assert!(parse_move("e2e").is_err());
        assert!(parse_move("e2 e4 e5").is_err());
    }

    #[test]
    fn square_name_matches_the_board_labels() {
        assert_eq!(square_name((6, 4)), "e2");
        assert_eq!(square_name((0, 0)), "a8");
        assert_eq!(square_name((7, 7)), "h1");
    }
}
