use crate::engine::board::Board;
use crate::engine::square_set::SquareSet;
use crate::engine::types::{Player, Square, Winner};
use tracing::{debug, info};

/// 着手要求が受理されなかった理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MoveError {
    /// 指定マスが合法手ではない（埋まっている、または挟める石が無い）。
    #[error("illegal move at {square}")]
    IllegalMove {
        /// 要求されたマス。
        square: Square,
    },
    /// 行・列またはインデックスが盤外。
    #[error("square is outside the 8x8 board")]
    OutOfRange,
}

/// 着手の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    /// 反転したマス（着手したマスは含まない）。
    flipped: SquareSet,
    /// パスさせられたプレイヤー（手番が打てずに飛ばされた場合）。
    forced_pass: Option<Player>,
    /// 着手したプレイヤー。
    player: Player,
    /// 着手したマス。
    square: Square,
}

impl Placement {
    /// 反転したマスの集合を返す。
    #[inline]
    #[must_use]
    pub const fn flipped(&self) -> SquareSet {
        self.flipped
    }

    /// 着手直後に自動でパスしたプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn forced_pass(&self) -> Option<Player> {
        self.forced_pass
    }

    /// 着手したプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    /// 着手したマスを返す。
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }
}

/// 手番解決後に強調表示すべき合法手。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Highlight {
    /// 双方とも打てない。
    GameOver,
    /// `player` の合法手。
    Moves {
        /// 強調表示の色となるプレイヤー。
        player: Player,
        /// 合法手の集合（非空）。
        squares: SquareSet,
    },
}

/// 盤面と手番を保持し、ルールに従って進行させる。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Game {
    /// 盤面。
    board: Board,
    /// 現在の手番。
    current_player: Player,
}

impl Game {
    /// 初期局面（黒番）から開始する。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            board: Board::initial(),
            current_player: Player::Black,
        }
    }

    /// 盤面と手番から生成する。
    ///
    /// 複製された状態の復元に使う。手番の解決は行わない。
    #[inline]
    #[must_use]
    pub const fn from_parts(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
        }
    }

    /// 初期局面に戻す。
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::initial();
        info!("game reset");
    }

    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 現在の手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// `player` が `square` に打てるかを返す。
    #[inline]
    #[must_use]
    pub fn is_legal_move(&self, square: Square, player: Player) -> bool {
        self.board.is_legal_move(square, player)
    }

    /// インデックス指定版の `is_legal_move`。盤外のインデックスは `false`。
    #[inline]
    #[must_use]
    pub fn is_legal_index(&self, index: usize, player: Player) -> bool {
        square_from_index(index).is_ok_and(|square| self.is_legal_move(square, player))
    }

    /// `player` の合法手を返す。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> SquareSet {
        self.board.legal_moves(player)
    }

    /// 現手番で `square` に着手する。
    ///
    /// 石を置いて挟んだ石を反転させ、手番を相手に渡す。相手に合法手が無ければ
    /// 自動でパスし、手番は着手したプレイヤーに戻る。
    ///
    /// # Errors
    ///
    /// 指定マスが合法手でない場合、`MoveError::IllegalMove` を返す（盤面・手番は変化しない）。
    ///
    pub fn apply_move(&mut self, square: Square) -> Result<Placement, MoveError> {
        let player = self.current_player;
        if !self.board.is_legal_move(square, player) {
            debug!(?player, %square, "rejected illegal move");
            return Err(MoveError::IllegalMove { square });
        }

        let flipped = self.board.place(square, player);
        self.current_player = player.opponent();
        debug!(?player, %square, flipped = flipped.len(), "stone placed");

        let forced_pass = match self.resolve_turn() {
            Highlight::Moves { player: next, .. } if next == player => Some(player.opponent()),
            Highlight::Moves { .. } => None,
            Highlight::GameOver => {
                // 終局時は着手したプレイヤーの手番のままにする。
                self.current_player = player;
                None
            }
        };

        Ok(Placement {
            flipped,
            forced_pass,
            player,
            square,
        })
    }

    /// 行・列指定版の `apply_move`。
    ///
    /// # Errors
    ///
    /// - `MoveError::OutOfRange`: 行・列が 0..8 の範囲外の場合
    /// - `MoveError::IllegalMove`: 指定マスが合法手でない場合
    ///
    #[inline]
    pub fn apply_move_at(&mut self, row: u8, col: u8) -> Result<Placement, MoveError> {
        let square = Square::from_row_col(row, col).ok_or(MoveError::OutOfRange)?;
        self.apply_move(square)
    }

    /// インデックス指定版の `apply_move`。
    ///
    /// # Errors
    ///
    /// - `MoveError::OutOfRange`: インデックスが 0..64 の範囲外の場合
    /// - `MoveError::IllegalMove`: 指定マスが合法手でない場合
    ///
    #[inline]
    pub fn apply_move_index(&mut self, index: usize) -> Result<Placement, MoveError> {
        let square = square_from_index(index)?;
        self.apply_move(square)
    }

    /// 指定プレイヤーの石数を返す。
    #[inline]
    #[must_use]
    pub fn count_stones(&self, player: Player) -> u32 {
        self.board.count(player)
    }

    /// 双方とも合法手が無いかを返す。
    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.legal_moves(Player::Black).is_empty() && self.legal_moves(Player::White).is_empty()
    }

    /// 石数の多い側を勝者として返す（同数なら引き分け）。
    ///
    /// 終局前に呼んでも現在の石数を比較するだけである。
    #[inline]
    #[must_use]
    pub fn winner(&self) -> Winner {
        let (black, white) = self.board.counts();
        Winner::from_counts(black, white)
    }

    /// 現手番に合法手が無ければパスを適用し、強調表示すべき合法手を返す。
    ///
    /// - 現手番に合法手があれば何もしない。
    /// - 現手番が打てず相手が打てる場合は手番を相手に渡す。
    /// - 双方とも打てない場合は手番を変えずに `Highlight::GameOver` を返す。
    pub fn resolve_turn(&mut self) -> Highlight {
        let highlight = self.highlight();
        if let Highlight::Moves { player, .. } = highlight {
            if player != self.current_player {
                debug!(skipped = ?self.current_player, "forced pass");
                self.current_player = player;
            }
        }
        highlight
    }

    /// 手番解決後に強調表示すべき合法手を返す（状態は変更しない）。
    #[must_use]
    pub fn highlight(&self) -> Highlight {
        let player = self.current_player;
        let squares = self.legal_moves(player);
        if !squares.is_empty() {
            return Highlight::Moves { player, squares };
        }

        let other = player.opponent();
        let other_squares = self.legal_moves(other);
        if !other_squares.is_empty() {
            return Highlight::Moves {
                player: other,
                squares: other_squares,
            };
        }

        Highlight::GameOver
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

/// 一次元インデックスを `Square` に変換する。
fn square_from_index(index: usize) -> Result<Square, MoveError> {
    u8::try_from(index)
        .ok()
        .and_then(Square::new)
        .ok_or(MoveError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::{Game, Highlight, MoveError};
    use crate::engine::board::{Board, parse};
    use crate::engine::types::{Cell, Player, Square, Winner};

    /// 黒が (0,2) に打つと白が打てなくなる局面。黒はさらに (7,2) に打てる。
    fn pass_setup() -> Game {
        let board = parse(
            "XO......
             ........
             ........
             ........
             ........
             ........
             ........
             XO......",
        );
        Game::from_parts(board, Player::Black)
    }

    #[test]
    fn opening_invariant() {
        let game = Game::initial();
        let occupied: Vec<(u8, Cell)> = Square::all()
            .map(|sq| (sq.index(), game.board().cell(sq)))
            .filter(|&(_, cell)| !cell.is_empty())
            .collect();
        assert_eq!(
            occupied,
            vec![
                (27, Cell::White),
                (28, Cell::Black),
                (35, Cell::Black),
                (36, Cell::White),
            ]
        );
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn textbook_first_move() {
        let mut game = Game::initial();
        let placement = game.apply_move_at(2, 3);
        assert!(placement.is_ok(), "got={placement:?}");
        let Ok(placement) = placement else { return };

        let flipped: Vec<u8> = placement.flipped().iter().map(Square::index).collect();
        assert_eq!(flipped, vec![27]);
        assert_eq!(placement.square().index(), 19);
        assert_eq!(placement.player(), Player::Black);
        assert_eq!(placement.forced_pass(), None);
        assert_eq!(game.count_stones(Player::Black), 4);
        assert_eq!(game.count_stones(Player::White), 1);
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn occupied_square_is_rejected_without_change() {
        let mut game = Game::initial();
        let before = game;
        let result = game.apply_move_index(27);
        assert!(matches!(result, Err(MoveError::IllegalMove { .. })));
        assert_eq!(game, before);
    }

    #[test]
    fn non_capturing_square_is_rejected_without_change() {
        let mut game = Game::initial();
        let before = game;
        assert_eq!(
            game.apply_move_at(0, 0).map(|p| p.square()),
            Err(MoveError::IllegalMove {
                square: Square::from_row_col(0, 0).unwrap_or_else(|| panic!("corner")),
            })
        );
        // 隣接しているが挟めないマス。
        assert!(game.apply_move_at(2, 2).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut game = Game::initial();
        let before = game;
        assert_eq!(
            game.apply_move_at(8, 0).map(|p| p.square()),
            Err(MoveError::OutOfRange)
        );
        assert_eq!(
            game.apply_move_index(64).map(|p| p.square()),
            Err(MoveError::OutOfRange)
        );
        assert!(!game.is_legal_index(usize::MAX, Player::Black));
        assert!(game.is_legal_index(19, Player::Black));
        assert_eq!(game, before);
    }

    #[test]
    fn opponent_without_moves_is_skipped() {
        let mut game = pass_setup();
        let placement = game.apply_move_at(0, 2);
        assert!(placement.is_ok(), "got={placement:?}");
        let Ok(placement) = placement else { return };

        assert_eq!(placement.forced_pass(), Some(Player::White));
        assert_eq!(game.current_player(), Player::Black);
        assert!(!game.is_game_over());

        let last = game.apply_move_at(7, 2);
        assert!(last.is_ok(), "got={last:?}");
        assert!(game.is_game_over());
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.winner(), Winner::Black);
        assert_eq!(game.highlight(), Highlight::GameOver);
    }

    #[test]
    fn resolve_turn_is_idempotent_at_game_over() {
        let board = Board::from_cells([Cell::White; 64]);
        let mut game = Game::from_parts(board, Player::Black);
        assert_eq!(game.resolve_turn(), Highlight::GameOver);
        assert_eq!(game.resolve_turn(), Highlight::GameOver);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.winner(), Winner::White);
    }

    #[test]
    fn resolve_turn_passes_to_player_with_moves() {
        let mut game = Game::from_parts(*pass_setup().board(), Player::White);
        let highlight = game.resolve_turn();
        assert!(matches!(
            highlight,
            Highlight::Moves {
                player: Player::Black,
                ..
            }
        ));
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn game_over_query_has_no_side_effects() {
        for player in [Player::Black, Player::White] {
            let game = Game::from_parts(Board::initial(), player);
            let before = game;
            assert!(!game.is_game_over());
            assert!(!game.is_game_over());
            assert_eq!(game, before);
        }
    }

    #[test]
    fn full_board_is_terminal() {
        let mut cells = [Cell::Black; 64];
        for slot in cells.iter_mut().skip(32) {
            *slot = Cell::White;
        }
        let game = Game::from_parts(Board::from_cells(cells), Player::White);
        assert!(game.legal_moves(Player::Black).is_empty());
        assert!(game.legal_moves(Player::White).is_empty());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Winner::Draw);
    }

    #[test]
    fn empty_board_is_terminal() {
        let game = Game::from_parts(Board::empty(), Player::Black);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Winner::Draw);
    }

    #[test]
    fn reset_restores_opening() {
        let mut game = Game::initial();
        assert!(game.apply_move_index(19).is_ok());
        game.reset();
        assert_eq!(game, Game::initial());
    }
}
