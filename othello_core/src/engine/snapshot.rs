use crate::engine::board::{Board, CELL_COUNT};
use crate::engine::game::Game;
use crate::engine::types::{Cell, Player};
use serde::{Deserialize, Serialize};

/// 複製先へ送るゲーム状態の復元に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SnapshotError {
    /// マスの数が64ではない。
    #[error("snapshot board must have 64 cells, got {len}")]
    BoardLength {
        /// 受け取ったマスの数。
        len: usize,
    },
}

/// 同期レイヤーが転送する最小限の状態（盤面64マス＋手番）。
///
/// 合法手・石数・終局判定などの派生値は含めず、受信側で再計算する。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "RawSnapshot", try_from = "RawSnapshot")]
pub struct Snapshot {
    /// 各マスの値。
    cells: [Cell; CELL_COUNT],
    /// 手番。
    current_player: Player,
}

/// シリアライズ用の表現（serde は長さ64の配列を直接扱えないため `Vec` を使う）。
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawSnapshot {
    /// 各マスの値。
    board: Vec<Cell>,
    /// 手番。
    current_player: Player,
}

impl Snapshot {
    /// ゲームの現在状態を取り出す。
    #[inline]
    #[must_use]
    pub const fn capture(game: &Game) -> Self {
        Self {
            cells: *game.board().cells(),
            current_player: game.current_player(),
        }
    }

    /// マス列と手番から生成する。
    ///
    /// # Errors
    ///
    /// `cells` の長さが64でない場合、`SnapshotError::BoardLength` を返す。
    ///
    #[inline]
    pub fn from_cells(cells: &[Cell], current_player: Player) -> Result<Self, SnapshotError> {
        let array: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|_len_mismatch| SnapshotError::BoardLength { len: cells.len() })?;
        Ok(Self {
            cells: array,
            current_player,
        })
    }

    /// 各マスの値を返す。
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// ゲーム状態を復元する。
    #[inline]
    #[must_use]
    pub const fn restore(&self) -> Game {
        Game::from_parts(Board::from_cells(self.cells), self.current_player)
    }
}

impl From<Snapshot> for RawSnapshot {
    #[inline]
    fn from(snapshot: Snapshot) -> Self {
        Self {
            board: snapshot.cells.to_vec(),
            current_player: snapshot.current_player,
        }
    }
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = SnapshotError;

    #[inline]
    fn try_from(raw: RawSnapshot) -> Result<Self, SnapshotError> {
        Self::from_cells(&raw.board, raw.current_player)
    }
}
