pub use dissimilar::diff as __diff;
use crate::console_interface::{parse_level, render_game_to_string};
use crate::core::{step, Direction, GameState, GameUpdate, Level, UserAction};

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

pub struct GameTestState {
    pub game_state: GameState,
    pub level: Level,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        let level = parse_level(level).expect("test level should parse");
        Self { game_state: level.initial_state(), level }
    }

    pub fn game_to_string(&self) -> String {
        render_game_to_string(&self.level, &self.game_state).trim_matches('\n').into()
    }

    pub fn assert_move(&mut self, direction: Direction) -> GameUpdate {
        self.assert_step(UserAction::Move(direction))
    }

    pub fn assert_moves(&mut self, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(dir);
        }
    }

    pub fn assert_step(&mut self, action: UserAction) -> GameUpdate {
        let update = step(&self.level, &self.game_state, action);
        let GameUpdate::NextState(new_state, _change_type) = &update else {
            panic!("Expected NextState update, got {:?}, in map\n{}", update, self.game_to_string());
        };

        self.game_state = new_state.clone();
        update
    }

    /// Expects the move to be rejected and checks the state did not change.
    pub fn assert_rejected(&mut self, direction: Direction) -> GameUpdate {
        let before = self.game_state.clone();
        let update = self.try_step(UserAction::Move(direction));
        assert!(
            matches!(update, GameUpdate::Rejected(_)),
            "Expected rejection moving {:?}, got {:?}, in map\n{}", direction, update, self.game_to_string()
        );
        assert_eq!(before, self.game_state);
        update
    }

    pub fn try_step(&mut self, action: UserAction) -> GameUpdate {
        let update = step(&self.level, &self.game_state, action);
        if let GameUpdate::NextState(new_state, _change_type) = &update {
            self.game_state = new_state.clone();
        };

        update
    }

    pub fn assert_matches(&self, expected: &str) {
        let actual = self.game_to_string();
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }
}
