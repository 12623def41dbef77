use crate::core::{Direction, GameChangeType, GameState, RejectReason};

pub struct GameRenderState {
    pub game: GameState,
    pub level_index: usize,
    pub level_count: usize,
    pub facing: Direction,
    pub won: bool,
    pub has_next_level: bool,
    pub rejection: Option<RejectReason>,
    pub last_change: Option<GameChangeType>,
    pub notice: Option<String>,
}
