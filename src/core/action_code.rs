//! Numeric action codes recorded for each accepted move.
//!
//! The reward contract replays these exact values (2 up, 8 down, 4 left,
//! 6 right), so they must not change.

use crate::core::{Direction, GameState};
use crate::error::ActionCodeError;

impl Direction {
    pub fn action_code(self) -> u8 {
        match self {
            Direction::Up => 2,
            Direction::Down => 8,
            Direction::Left => 4,
            Direction::Right => 6,
        }
    }

    pub fn from_action_code(code: u8) -> Result<Direction, ActionCodeError> {
        match code {
            2 => Ok(Direction::Up),
            8 => Ok(Direction::Down),
            4 => Ok(Direction::Left),
            6 => Ok(Direction::Right),
            other => Err(ActionCodeError::UnknownCode(other)),
        }
    }

    fn from_lurd(ch: char) -> Option<Direction> {
        match ch.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl GameState {
    pub fn action_codes(&self) -> Vec<u8> {
        self.history.iter().map(|dir| dir.action_code()).collect()
    }
}

pub fn decode_actions(codes: &[u8]) -> Result<Vec<Direction>, ActionCodeError> {
    codes.iter().map(|&code| Direction::from_action_code(code)).collect()
}

/// Reads a move list typed by a person: either action codes separated by
/// commas or whitespace (`"2, 8,4"`), or LURD letters (`"uuRdl"`).
pub fn parse_action_list(text: &str) -> Result<Vec<Direction>, ActionCodeError> {
    let text = text.trim();
    if text.chars().any(|c| c.is_ascii_digit()) {
        return text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                let code = token
                    .parse::<u8>()
                    .map_err(|_| ActionCodeError::UnknownToken(token.to_string()))?;
                Direction::from_action_code(code)
            })
            .collect();
    }

    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Direction::from_lurd(c).ok_or(ActionCodeError::UnknownToken(c.to_string())))
        .collect()
}
