use crate::core::{CellKind, Direction, GameState, Level, Position, UserAction};
use crate::error::LevelError;
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

/// Parses a level in the usual text notation:
/// `#` wall, `@` player, `+` player on target, `$` box, `*` box on target,
/// `.` target, anything else floor. Blank lines are skipped and short rows
/// are padded with floor.
pub fn parse_level(s: &str) -> Result<Level, LevelError> {
    let rows: Vec<&str> = s.lines().filter(|line| !line.is_empty()).collect();
    let width = rows.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut cells = Vec::with_capacity(width * rows.len());
    let mut player = None;
    let mut boxes = Vec::new();
    let mut targets = Vec::new();

    for (i, line) in rows.iter().enumerate() {
        let mut chars = line.chars();
        for j in 0..width {
            let pos = Position::from_row_col(i, j, width);
            let c = match chars.next() {
                Some('#') => CellKind::Wall,
                Some('.') => {
                    targets.push(pos);
                    CellKind::Empty
                }
                Some('$') => {
                    boxes.push(pos);
                    CellKind::Empty
                }
                Some('*') => {
                    boxes.push(pos);
                    targets.push(pos);
                    CellKind::Empty
                }
                Some('@') => {
                    place_player(&mut player, pos)?;
                    CellKind::Empty
                }
                Some('+') => {
                    place_player(&mut player, pos)?;
                    targets.push(pos);
                    CellKind::Empty
                }
                _ => CellKind::Empty,
            };
            cells.push(c);
        }
    }

    let player = player.ok_or(LevelError::MissingPlayer)?;
    Level::new(width, cells, boxes, targets, player)
}

fn place_player(player: &mut Option<Position>, pos: Position) -> Result<(), LevelError> {
    match player.replace(pos) {
        Some(_) => Err(LevelError::SecondPlayer(pos)),
        None => Ok(()),
    }
}

pub fn render_game_to_string(level: &Level, game: &GameState) -> String {
    let board = level.board();
    let mut result = String::new();
    for (row, cells) in board.rows().enumerate() {
        for (col, &kind) in cells.iter().enumerate() {
            let pos = Position::from_row_col(row, col, board.width());
            let has_player = pos == game.player();
            let has_box = game.has_box_at(pos);
            let ch = match (kind, level.is_target(pos)) {
                (CellKind::Wall, _) => '#',
                (CellKind::Empty, false) => if has_player { '@' } else if has_box { '$' } else { ' ' },
                (CellKind::Empty, true) => if has_player { '+' } else if has_box { '*' } else { '.' },
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    level: &Level,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        let title = format!("Sokoban - Level {}/{}", state.level_index + 1, state.level_count);
        let game_text = render_game_to_string(level, &state.game);
        let game_paragraph = Paragraph::new(game_text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let status_paragraph = Paragraph::new(status_line(state))
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(if state.won { Color::Green } else { Color::Yellow }))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        let instruction_paragraph = Paragraph::new(instructions(state))
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub fn status_line(state: &GameRenderState) -> String {
    let mut status = format!(
        "Moves: {} | Boxes on targets: {}/{} | Facing: {:?}",
        state.game.history().len(),
        state.game.boxes_on_targets(),
        state.game.targets().len(),
        state.facing,
    );
    if state.won {
        status = format!("You won level {}! | {}", state.level_index + 1, status);
    }
    if let Some(reason) = &state.rejection {
        status = format!("{} | Blocked: {}", status, reason);
    } else if let Some(change_type) = &state.last_change {
        status = format!("{} | Last: {:?}", status, change_type);
    }
    if let Some(notice) = &state.notice {
        status = format!("{} | {}", status, notice);
    }
    status
}

fn instructions(state: &GameRenderState) -> &'static str {
    match (state.won, state.has_next_level) {
        (true, true) => "M submit claim | N next level | R restart | Q quit",
        (true, false) => "Last level done! M submit claim | N restart game | Q quit",
        (false, _) => "WASD/Arrows move | R restart | PgUp/PgDn level | Q quit",
    }
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Restart,
    NextLevel,
    PreviousLevel,
    SubmitClaim,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Up))
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Down))
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Left))
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Right))
                }
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::PageDown => ConsoleInput::NextLevel,
                KeyCode::PageUp => ConsoleInput::PreviousLevel,
                KeyCode::Char('m') | KeyCode::Char('M') => ConsoleInput::SubmitClaim,
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_short_rows_are_padded_with_floor() {
        let level = parse_level("####\n#@$\n####").unwrap();
        assert_eq!(level.width(), 4);
        assert_eq!(level.height(), 3);
        assert_eq!(level.board().cell_kind(Position(7)), Ok(CellKind::Empty));
        assert_eq!(
            render_game_to_string(&level, &level.initial_state()),
            "####\n#@$ \n####\n"
        );
    }

    #[test]
    fn test_level_without_player_fails() {
        assert_eq!(parse_level("#$.#").unwrap_err(), LevelError::MissingPlayer);
    }

    #[test]
    fn test_second_player_fails() {
        assert_eq!(parse_level("#@ @#").unwrap_err(), LevelError::SecondPlayer(Position(3)));
        assert_eq!(parse_level("#@\n#+").unwrap_err(), LevelError::SecondPlayer(Position(3)));
    }

    #[test]
    fn test_render_reproduces_every_glyph() {
        let text = "#######\n#+$*. #\n#######\n";
        let level = parse_level(text).unwrap();
        assert_eq!(render_game_to_string(&level, &level.initial_state()), text);

        let text = "######\n#@ $.#\n######\n";
        let level = parse_level(text).unwrap();
        assert_eq!(render_game_to_string(&level, &level.initial_state()), text);
    }
}
