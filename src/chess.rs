//! Chess board with basic move legality
//!
//! Per-piece movement only: no check detection, castling, en passant or
//! promotion. Row 0 is Black's back rank; White moves up the board.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a pawn step
    fn pawn_dir(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// FEN-style letter: uppercase White, lowercase Black
    pub fn from_char(c: char) -> Option<Self> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { kind, side })
    }

    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// Board coordinate, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Square shifted by a signed delta, if still on the board
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Opening position, White at the bottom
    pub fn standard() -> Self {
        Self::from_rows([
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ])
    }

    /// Build from eight rows of letters; anything that is not a piece letter is empty
    pub fn from_rows(rows: [&str; 8]) -> Self {
        let mut board = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().take(8).enumerate() {
                board.squares[r][c] = Piece::from_char(ch);
            }
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Move whatever is on `from` to `to`; returns the captured piece
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.get(from);
        let captured = self.get(to);
        self.set(to, moving);
        self.set(from, None);
        captured
    }

    fn is_opponent(&self, sq: Square, side: Side) -> bool {
        self.get(sq).is_some_and(|p| p.side != side)
    }

    /// Rows as letters, '.' for empty
    pub fn to_rows(&self) -> Vec<String> {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|p| p.map(Piece::to_char).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

/// Destinations reachable in one move by the piece on `from`
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.side, &mut moves),
        PieceKind::Knight => step_moves(board, from, piece.side, &KNIGHT_JUMPS, &mut moves),
        PieceKind::King => step_moves(board, from, piece.side, &ALL_DIRECTIONS, &mut moves),
        PieceKind::Bishop => slide_moves(board, from, piece.side, &DIAGONALS, &mut moves),
        PieceKind::Rook => slide_moves(board, from, piece.side, &ORTHOGONALS, &mut moves),
        PieceKind::Queen => slide_moves(board, from, piece.side, &ALL_DIRECTIONS, &mut moves),
    }
    moves
}

fn pawn_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Square>) {
    let dir = side.pawn_dir();

    if let Some(one) = from.offset(dir, 0).filter(|sq| board.get(*sq).is_none()) {
        moves.push(one);
        if from.row == side.pawn_start_row() {
            if let Some(two) = from.offset(2 * dir, 0).filter(|sq| board.get(*sq).is_none()) {
                moves.push(two);
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diag) = from.offset(dir, dc) {
            if board.is_opponent(diag, side) {
                moves.push(diag);
            }
        }
    }
}

fn step_moves(board: &Board, from: Square, side: Side, deltas: &[(i8, i8)], moves: &mut Vec<Square>) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            if board.get(to).is_none() || board.is_opponent(to, side) {
                moves.push(to);
            }
        }
    }
}

fn slide_moves(board: &Board, from: Square, side: Side, dirs: &[(i8, i8)], moves: &mut Vec<Square>) {
    for &(dr, dc) in dirs {
        let mut cursor = from;
        while let Some(to) = cursor.offset(dr, dc) {
            match board.get(to) {
                None => moves.push(to),
                Some(p) => {
                    if p.side != side {
                        moves.push(to);
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

/// Result of clicking a square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece of the side to move is now selected
    Selected(Square),
    /// The selected piece moved
    Moved {
        from: Square,
        to: Square,
        captured: Option<Piece>,
    },
    /// Selection cleared without moving
    Deselected,
    /// Nothing selectable there
    Ignored,
}

/// Two-player hot-seat game driven by square clicks
#[derive(Debug, Clone)]
pub struct ChessGame {
    pub board: Board,
    turn: Side,
    selected: Option<Square>,
    legal: Vec<Square>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: Side::White,
            selected: None,
            legal: Vec::new(),
        }
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Destinations highlighted for the current selection
    pub fn highlighted(&self) -> &[Square] {
        &self.legal
    }

    /// Status line for the side to move
    pub fn status(&self) -> &'static str {
        match self.turn() {
            Side::White => "White's turn",
            Side::Black => "Black's turn",
        }
    }

    /// Select a piece, move the selected piece, or clear the selection
    pub fn click(&mut self, sq: Square) -> ClickOutcome {
        if let Some(from) = self.selected.take() {
            let legal = std::mem::take(&mut self.legal);
            if legal.contains(&sq) {
                let captured = self.board.move_piece(from, sq);
                self.turn = self.turn.opponent();
                log::debug!("{:?} -> {:?}, {}", from, sq, self.status());
                return ClickOutcome::Moved {
                    from,
                    to: sq,
                    captured,
                };
            }
            return ClickOutcome::Deselected;
        }

        match self.board.get(sq) {
            Some(piece) if piece.side == self.turn() => {
                self.selected = Some(sq);
                self.legal = legal_moves(&self.board, sq);
                ClickOutcome::Selected(sq)
            }
            _ => ClickOutcome::Ignored,
        }
    }
}
