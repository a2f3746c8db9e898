//! ゲームセッション。
//!
//! `Session` は `Game` を所有し、着手・リセット・同期状態の受信を受け付けて、
//! そのたびに表示側（`Presenter`）へ盤面全体の更新と終局を通知する。

use crate::engine::board::CELL_COUNT;
use crate::engine::game::{Game, Highlight, MoveError, Placement};
use crate::engine::snapshot::Snapshot;
use crate::engine::square_set::SquareSet;
use crate::engine::types::{Cell, Player, Square, Winner};
use tracing::{debug, info, trace};

/// 表示用のマスの状態（合法手の強調表示を含む）。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CellView {
    /// 空きマス。
    #[default]
    Empty,
    /// 黒石。
    Black,
    /// 白石。
    White,
    /// 黒が打てるマス。
    PlaceableBlack,
    /// 白が打てるマス。
    PlaceableWhite,
}

impl CellView {
    /// 打てるマスとして強調表示されているか。
    #[inline]
    #[must_use]
    pub const fn is_placeable(self) -> bool {
        matches!(self, Self::PlaceableBlack | Self::PlaceableWhite)
    }
}

/// 盤面全体の更新通知。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Refresh {
    /// 黒の石数。
    black: u32,
    /// 各マスの値。
    cells: [Cell; CELL_COUNT],
    /// 現在の手番。
    current_player: Player,
    /// 手番解決後の強調表示。
    highlight: Highlight,
    /// 白の石数。
    white: u32,
}

impl Refresh {
    /// 手番解決済みのゲームから更新内容を組み立てる。
    fn new(game: &Game, highlight: Highlight) -> Self {
        let (black, white) = game.board().counts();
        Self {
            black,
            cells: *game.board().cells(),
            current_player: game.current_player(),
            highlight,
            white,
        }
    }

    /// 各マスの値を返す。
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// 石数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub const fn counts(&self) -> (u32, u32) {
        (self.black, self.white)
    }

    /// 現在の手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// 強調表示する合法手を返す（終局時は空）。
    #[inline]
    #[must_use]
    pub const fn highlighted(&self) -> SquareSet {
        match self.highlight {
            Highlight::Moves { squares, .. } => squares,
            Highlight::GameOver => SquareSet::EMPTY,
        }
    }

    /// 強調表示の色となるプレイヤーを返す（終局時は `None`）。
    #[inline]
    #[must_use]
    pub const fn highlight_player(&self) -> Option<Player> {
        match self.highlight {
            Highlight::Moves { player, .. } => Some(player),
            Highlight::GameOver => None,
        }
    }

    /// 双方とも打てない状態か。
    #[inline]
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.highlight, Highlight::GameOver)
    }

    /// 手番表示用の文字列を返す。
    #[inline]
    #[must_use]
    pub const fn turn_label(&self) -> &'static str {
        match self.current_player {
            Player::Black => "Black Turn",
            Player::White => "White Turn",
        }
    }

    /// マスごとの表示状態を返す。
    #[must_use]
    pub fn cell_views(&self) -> [CellView; CELL_COUNT] {
        let mut views = [CellView::Empty; CELL_COUNT];

        for (view, cell) in views.iter_mut().zip(self.cells) {
            *view = match cell {
                Cell::Empty => CellView::Empty,
                Cell::Black => CellView::Black,
                Cell::White => CellView::White,
            };
        }

        if let Highlight::Moves { player, squares } = self.highlight {
            let placeable = match player {
                Player::Black => CellView::PlaceableBlack,
                Player::White => CellView::PlaceableWhite,
            };
            for square in squares {
                if let Some(view) = views.get_mut(usize::from(square.index())) {
                    *view = placeable;
                }
            }
        }

        views
    }
}

/// 盤面の描画・状態表示を担う協調者。
pub trait Presenter {
    /// 初期化・リセット・着手・同期状態の受信のたびに呼ばれる。
    fn on_refresh(&mut self, refresh: &Refresh);

    /// 更新後に双方とも打てなくなっていた場合に、`on_refresh` の直後に呼ばれる。
    fn on_game_over(&mut self, winner: Winner);
}

/// 1つの `Game` とその表示側をまとめて所有するセッション。
#[derive(Debug)]
pub struct Session<P> {
    /// 進行中のゲーム。
    game: Game,
    /// 表示側。
    presenter: P,
}

impl<P: Presenter> Session<P> {
    /// 初期局面でセッションを開始し、最初の更新を通知する。
    #[inline]
    pub fn new(presenter: P) -> Self {
        let mut session = Self {
            game: Game::initial(),
            presenter,
        };
        info!("session started");
        session.refresh();
        session
    }

    /// ゲームを返す。
    #[inline]
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// 表示側を返す。
    #[inline]
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// 表示側を可変で返す。
    #[inline]
    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// セッションを終了し、表示側を取り出す。
    #[inline]
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// 現手番として (row, col) に着手する。
    ///
    /// 受理された場合は更新を通知し、終局していれば終局も通知する。
    /// 拒否された場合は状態も通知も変化しない。
    ///
    /// # Errors
    ///
    /// - `MoveError::OutOfRange`: 行・列が盤外の場合
    /// - `MoveError::IllegalMove`: 指定マスが合法手でない場合
    ///
    pub fn request_move(&mut self, row: u8, col: u8) -> Result<Placement, MoveError> {
        let square = Square::from_row_col(row, col).ok_or_else(|| {
            debug!(row, col, "rejected out-of-range move");
            MoveError::OutOfRange
        })?;
        self.place(square)
    }

    /// インデックス指定版の `request_move`。
    ///
    /// # Errors
    ///
    /// - `MoveError::OutOfRange`: インデックスが 0..64 の範囲外の場合
    /// - `MoveError::IllegalMove`: 指定マスが合法手でない場合
    ///
    pub fn request_move_index(&mut self, index: usize) -> Result<Placement, MoveError> {
        let square = u8::try_from(index)
            .ok()
            .and_then(Square::new)
            .ok_or_else(|| {
                debug!(index, "rejected out-of-range move");
                MoveError::OutOfRange
            })?;
        self.place(square)
    }

    /// 初期局面に戻し、更新を通知する。
    #[inline]
    pub fn reset(&mut self) {
        self.game.reset();
        self.refresh();
    }

    /// 同期レイヤーへ送る状態を返す。
    #[inline]
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.game)
    }

    /// 同期レイヤーから受け取った状態で置き換え、派生値を再計算して通知する。
    #[inline]
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.game = snapshot.restore();
        debug!(current_player = ?self.game.current_player(), "snapshot applied");
        self.refresh();
    }

    /// 着手を適用して更新を通知する。
    fn place(&mut self, square: Square) -> Result<Placement, MoveError> {
        let placement = self.game.apply_move(square)?;
        self.refresh();
        Ok(placement)
    }

    /// 手番を解決し、表示側へ更新（と必要なら終局）を通知する。
    fn refresh(&mut self) {
        let highlight = self.game.resolve_turn();
        let refresh = Refresh::new(&self.game, highlight);
        trace!(board = %self.game.board(), "refresh");
        self.presenter.on_refresh(&refresh);

        if refresh.is_game_over() {
            let winner = self.game.winner();
            let (black, white) = refresh.counts();
            info!(%winner, black, white, "game over");
            self.presenter.on_game_over(winner);
        }
    }
}
