
mod test {
    use Direction::*;
    use crate::core::*;
    use crate::test::test_util::GameTestState;

    #[test]
    fn is_won_flips_exactly_on_the_covering_push() {
        let level = Level::from_flags(
            4,
            &[0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [Position(5)],
            [Position(10)],
            Position(15),
        ).unwrap();
        let moves = [Left, Left, Left, Up, Up, Up, Right, Down, Left, Down, Right];

        let mut game = level.initial_state();
        for (i, &dir) in moves.iter().enumerate() {
            assert!(!game.is_won(), "won too early, before move {}", i);
            let GameUpdate::NextState(next, _) = step(&level, &game, UserAction::Move(dir)) else {
                panic!("move {} ({:?}) should be accepted", i, dir);
            };
            game = next;
        }
        assert!(game.is_won());
        assert_eq!(game.player(), Position(9));
        assert!(game.has_box_at(Position(10)));
    }

    #[test]
    fn level_without_boxes_is_never_won() {
        let game = GameTestState::new(r#"
#@ #
"#);
        assert!(!game.game_state.is_won());
    }

    #[test]
    fn level_starting_solved_is_won() {
        let game = GameTestState::new(r#"
#@*#
"#);
        assert!(game.game_state.is_won());
    }

    #[test]
    fn partial_cover_is_not_won() {
        let mut game = GameTestState::new(r#"
#######
#@$.$.#
#######
"#);
        game.assert_move(Right);
        game.assert_matches(r#"
#######
# @*$.#
#######
"#);
        assert_eq!(game.game_state.boxes_on_targets(), 1);
        assert!(!game.game_state.is_won());
    }

    #[test]
    fn extra_target_prevents_win() {
        let mut game = GameTestState::new(r#"
######
#@$. #
#  . #
######
"#);
        game.assert_move(Right);
        assert_eq!(game.game_state.boxes_on_targets(), 1);
        assert!(!game.game_state.is_won());
    }

    #[test]
    fn two_boxes_on_two_targets_is_won() {
        let mut game = GameTestState::new(r#"
######
#@$ .#
#    #
# $  #
# .  #
######
"#);
        game.assert_moves(&[Right, Right]);
        assert!(!game.game_state.is_won());
        game.assert_moves(&[Left, Left, Down, Down]);
        game.assert_matches(r#"
######
#   *#
#    #
#@$  #
# .  #
######
"#);
        game.assert_moves(&[Up, Right, Down]);
        assert!(game.game_state.is_won());
        game.assert_matches(r#"
######
#   *#
#    #
# @  #
# *  #
######
"#);
    }
}
