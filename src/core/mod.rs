mod action_code;
mod board;
mod level;
mod model_helpers;
mod models;
mod replay;
mod update;

pub use action_code::{decode_actions, parse_action_list};
pub use board::Board;
pub use level::Level;
pub use model_helpers::boxes_cover_targets;
pub use models::{CellKind, Direction, GameChangeType, GameState, GameUpdate, Position, RejectReason, UserAction};
pub use replay::{replay, verify_solution};
pub use update::step;
