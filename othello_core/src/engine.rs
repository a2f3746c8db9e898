/// 盤面（64マス）と方向走査・合法手・反転処理の実装。
pub mod board;
/// ゲーム進行（手番、自動パス、終局判定）の実装。
pub mod game;
/// 同期レイヤー向けの状態スナップショット。
pub mod snapshot;
/// マスの集合。
pub mod square_set;
pub mod types;

pub type Board = board::Board;
pub type Game = game::Game;
pub type Highlight = game::Highlight;
pub type MoveError = game::MoveError;
pub type Placement = game::Placement;
pub type Snapshot = snapshot::Snapshot;
pub type SnapshotError = snapshot::SnapshotError;
pub type SquareSet = square_set::SquareSet;
pub type Cell = types::Cell;
pub type Direction = types::Direction;
pub type Player = types::Player;
pub type Square = types::Square;
pub type Winner = types::Winner;
