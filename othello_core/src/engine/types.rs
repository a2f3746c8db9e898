use core::fmt;
use serde::{Deserialize, Serialize};

/// 手番（打つ側のプレイヤー）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手。
    Black,
    /// 後手。
    White,
}

impl Player {
    /// 相手側のプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// このプレイヤーの石が置かれたマスの値を返す。
    #[inline]
    #[must_use]
    pub const fn stone(self) -> Cell {
        match self {
            Self::Black => Cell::Black,
            Self::White => Cell::White,
        }
    }
}

/// 盤面の1マスの値。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// 空きマス。
    #[default]
    Empty,
    /// 黒石。
    Black,
    /// 白石。
    White,
}

impl Cell {
    /// 石の持ち主を返す（空きマスなら `None`）。
    #[inline]
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }

    /// 空きマスかどうか。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Player> for Cell {
    #[inline]
    fn from(player: Player) -> Self {
        player.stone()
    }
}

/// 終局時の勝敗。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Winner {
    /// 黒の勝ち。
    Black,
    /// 白の勝ち。
    White,
    /// 引き分け。
    Draw,
}

impl Winner {
    /// 石数から勝敗を決める。
    #[inline]
    #[must_use]
    pub const fn from_counts(black: u32, white: u32) -> Self {
        if black > white {
            Self::Black
        } else if white > black {
            Self::White
        } else {
            Self::Draw
        }
    }
}

impl fmt::Display for Winner {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match *self {
            Self::Black => "Black Win!",
            Self::White => "White Win!",
            Self::Draw => "Draw",
        };
        f.write_str(text)
    }
}

/// 盤面上のマス（0..=63のインデックス）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(
    /// `row * 8 + col` に対応する0..=63の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// 盤面のマス数。
    pub const COUNT: u8 = 64;

    /// インデックスから `Square` を生成する。範囲外なら `None`。
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }
        Some(Self(index))
    }

    /// インデックスから `Square` を生成する（範囲チェックなし）。
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 行・列から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row >= Self::BOARD_LEN || col >= Self::BOARD_LEN {
            return None;
        }

        let idx = match row.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        match idx.checked_add(col) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 行（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// 列（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// そのマスを表すビット（`u64`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u64 {
        let one = u64::MIN.wrapping_add(1);
        let shift = u32::from(self.0);

        one.checked_shl(shift).unwrap_or(u64::MIN)
    }

    /// `direction` へ1マス進んだマスを返す。
    ///
    /// 盤外に出る場合、または行・列の連続性が崩れる（端を回り込む）場合は `None`。
    /// 判定は常に現在のマスの行・列から行うため、走査の各ステップで呼び出せばよい。
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let row = match self.row().checked_add_signed(direction.row_delta()) {
            Some(value) => value,
            None => return None,
        };
        let col = match self.col().checked_add_signed(direction.col_delta()) {
            Some(value) => value,
            None => return None,
        };
        Self::from_row_col(row, col)
    }

    /// 全マスを昇順で返す。
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        (u8::MIN..Self::COUNT).map(Self)
    }
}

impl fmt::Display for Square {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// 8方向。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// 左上（-9）。
    NorthWest,
    /// 上（-8）。
    North,
    /// 右上（-7）。
    NorthEast,
    /// 左（-1）。
    West,
    /// 右（+1）。
    East,
    /// 左下（+7）。
    SouthWest,
    /// 下（+8）。
    South,
    /// 右下（+9）。
    SouthEast,
}

impl Direction {
    /// 全方向。
    pub const ALL: [Self; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// 行方向の変化量。
    #[inline]
    #[must_use]
    pub const fn row_delta(self) -> i8 {
        match self {
            Self::NorthWest | Self::North | Self::NorthEast => -1,
            Self::West | Self::East => 0,
            Self::SouthWest | Self::South | Self::SouthEast => 1,
        }
    }

    /// 列方向の変化量。
    #[inline]
    #[must_use]
    pub const fn col_delta(self) -> i8 {
        match self {
            Self::NorthWest | Self::West | Self::SouthWest => -1,
            Self::North | Self::South => 0,
            Self::NorthEast | Self::East | Self::SouthEast => 1,
        }
    }

    /// 一次元インデックス上のオフセット（-9, -8, -7, -1, 1, 7, 8, 9）。
    #[inline]
    #[must_use]
    pub const fn offset(self) -> i8 {
        match self {
            Self::NorthWest => -9,
            Self::North => -8,
            Self::NorthEast => -7,
            Self::West => -1,
            Self::East => 1,
            Self::SouthWest => 7,
            Self::South => 8,
            Self::SouthEast => 9,
        }
    }
}
