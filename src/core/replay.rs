use crate::core::{decode_actions, step, Direction, GameState, GameUpdate, Level, UserAction};
use crate::error::ReplayError;

/// Replays `moves` from the level's starting state. Recorded histories only
/// hold accepted moves, so any rejection means the list does not belong to
/// this level.
pub fn replay(level: &Level, moves: impl IntoIterator<Item = Direction>) -> Result<GameState, ReplayError> {
    let mut game = level.initial_state();
    for (index, direction) in moves.into_iter().enumerate() {
        match step(level, &game, UserAction::Move(direction)) {
            GameUpdate::NextState(next, _) => game = next,
            GameUpdate::Rejected(reason) => {
                return Err(ReplayError::Rejected { index, direction, reason });
            }
        }
    }
    Ok(game)
}

/// Checks that a submitted list of action codes solves `level`.
pub fn verify_solution(level: &Level, codes: &[u8]) -> Result<GameState, ReplayError> {
    let moves = decode_actions(codes)?;
    let game = replay(level, moves)?;
    if !game.is_won() {
        return Err(ReplayError::NotSolved {
            on_targets: game.boxes_on_targets(),
            targets: game.targets().len(),
        });
    }
    Ok(game)
}
