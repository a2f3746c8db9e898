use crate::engine::square_set::SquareSet;
use crate::engine::types::{Cell, Direction, Player, Square};
use core::fmt;

/// 盤面のマス数。
pub const CELL_COUNT: usize = 64;

/// 初期配置（白）の1つ目（row 3, col 3）。
const START_WHITE_0: usize = 27;

/// 初期配置（黒）の1つ目（row 3, col 4）。
const START_BLACK_0: usize = 28;

/// 初期配置（黒）の2つ目（row 4, col 3）。
const START_BLACK_1: usize = 35;

/// 初期配置（白）の2つ目（row 4, col 4）。
const START_WHITE_1: usize = 36;

/// 64マスの盤面。インデックスは `row * 8 + col`。
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    /// 各マスの値。
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// 石の無い盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// 初期局面（中央4マス）を返す。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        cells[START_WHITE_0] = Cell::White;
        cells[START_BLACK_0] = Cell::Black;
        cells[START_BLACK_1] = Cell::Black;
        cells[START_WHITE_1] = Cell::White;
        Self { cells }
    }

    /// 任意のマス配列から盤面を生成する。
    ///
    /// 盤面が実戦で到達可能かどうかは検証しない。
    #[inline]
    #[must_use]
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// 全マスの値を返す。
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// 指定マスの値を返す。
    #[inline]
    #[must_use]
    pub fn cell(&self, square: Square) -> Cell {
        self.cells
            .get(usize::from(square.index()))
            .copied()
            .unwrap_or_default()
    }

    /// 指定マスの値を書き換える。
    #[inline]
    pub(crate) fn set(&mut self, square: Square, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(usize::from(square.index())) {
            *slot = cell;
        }
    }

    /// 指定プレイヤーの石数を返す。
    #[inline]
    #[must_use]
    pub fn count(&self, player: Player) -> u32 {
        let stone = player.stone();
        let total = self.cells.iter().filter(|&&cell| cell == stone).count();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// 石数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        (self.count(Player::Black), self.count(Player::White))
    }

    /// 空きマスの集合を返す。
    #[inline]
    #[must_use]
    pub fn empty_squares(&self) -> SquareSet {
        Square::all()
            .filter(|&square| self.cell(square).is_empty())
            .collect()
    }

    /// `square` から `direction` へ走査し、挟める相手の石の並びを返す。
    ///
    /// 相手の石が1つ以上連続し、その直後に `player` の石がある場合のみ非空。
    /// 盤端の判定は各ステップで現在のマスから行う。
    #[must_use]
    pub fn run_in_dir(&self, square: Square, player: Player, direction: Direction) -> SquareSet {
        let own = player.stone();
        let opponent = player.opponent().stone();
        let mut run = SquareSet::EMPTY;
        let mut current = square.step(direction);

        while let Some(next) = current {
            let cell = self.cell(next);
            if cell == opponent {
                run.insert(next);
                current = next.step(direction);
            } else if cell == own {
                return run;
            } else {
                return SquareSet::EMPTY;
            }
        }

        SquareSet::EMPTY
    }

    /// `player` が `square` に打ったときに反転する石の集合を返す（全方向）。
    ///
    /// `square` が空きマスかどうかは確認しない。
    #[must_use]
    pub fn flips(&self, square: Square, player: Player) -> SquareSet {
        Direction::ALL
            .into_iter()
            .fold(SquareSet::EMPTY, |acc, direction| {
                acc.union(self.run_in_dir(square, player, direction))
            })
    }

    /// `player` が `square` に打てるかを返す。
    #[must_use]
    pub fn is_legal_move(&self, square: Square, player: Player) -> bool {
        if !self.cell(square).is_empty() {
            return false;
        }

        Direction::ALL
            .into_iter()
            .any(|direction| !self.run_in_dir(square, player, direction).is_empty())
    }

    /// 石に隣接する空きマス（合法手の候補）を返す。
    #[must_use]
    pub fn frontier(&self) -> SquareSet {
        let mut candidates = SquareSet::EMPTY;

        for square in Square::all() {
            if self.cell(square).is_empty() {
                continue;
            }

            for direction in Direction::ALL {
                if let Some(next) = square.step(direction) {
                    if self.cell(next).is_empty() {
                        candidates.insert(next);
                    }
                }
            }
        }

        candidates
    }

    /// `player` の合法手の集合を返す。
    ///
    /// 石に隣接する空きマスを候補とし、候補ごとに合法性を検証する。
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> SquareSet {
        self.frontier()
            .iter()
            .filter(|&square| self.is_legal_move(square, player))
            .collect()
    }

    /// 石を置き、挟んだ石を反転させる。反転したマスの集合を返す。
    ///
    /// 合法性の確認は呼び出し側で行うこと。
    pub(crate) fn place(&mut self, square: Square, player: Player) -> SquareSet {
        let flipped = self.flips(square, player);
        let stone = player.stone();

        self.set(square, stone);
        for target in flipped {
            self.set(target, stone);
        }

        flipped
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(usize::from(Square::BOARD_LEN)).enumerate() {
            if i != usize::MIN {
                f.write_str("\n")?;
            }
            for cell in row {
                let glyph = match *cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{self}\n)")
    }
}

/// テキスト表現（`.` / `X` / `O` の8行）から盤面を生成する（テスト向け）。
#[cfg(test)]
pub(crate) fn parse(text: &str) -> Board {
    let mut cells = [Cell::Empty; CELL_COUNT];
    let glyphs = text
        .chars()
        .filter(|ch| matches!(ch, '.' | 'X' | 'O'))
        .take(CELL_COUNT);
    for (slot, ch) in cells.iter_mut().zip(glyphs) {
        *slot = match ch {
            'X' => Cell::Black,
            'O' => Cell::White,
            _ => Cell::Empty,
        };
    }
    Board::from_cells(cells)
}
