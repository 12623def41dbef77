use crate::core::{GameChangeType, GameState, GameUpdate, Level, RejectReason, UserAction};

/// Resolves one action against `game`. A rejected move returns no state at
/// all, so the caller keeps the old one untouched.
pub fn step(level: &Level, game: &GameState, action: UserAction) -> GameUpdate {
    let UserAction::Move(dir) = action;
    let board = level.board();

    let Some(next_player) = board.neighbor(game.player, dir) else {
        return GameUpdate::Rejected(RejectReason::OutOfBounds);
    };
    if !board.is_walkable(next_player) {
        return GameUpdate::Rejected(RejectReason::Wall);
    }

    if !game.has_box_at(next_player) {
        return GameUpdate::NextState(game.advance(next_player, None, dir), GameChangeType::PlayerMove);
    }

    let Some(next_box) = board.neighbor(next_player, dir) else {
        return GameUpdate::Rejected(RejectReason::BoxOutOfBounds);
    };
    if !board.is_walkable(next_box) {
        return GameUpdate::Rejected(RejectReason::BoxAgainstWall);
    }
    if game.has_box_at(next_box) {
        return GameUpdate::Rejected(RejectReason::BoxAgainstBox);
    }

    GameUpdate::NextState(
        game.advance(next_player, Some((next_player, next_box)), dir),
        GameChangeType::PlayerAndBoxMove,
    )
}
