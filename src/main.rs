// Terminal Sokoban. Controls: W/A/S/D or arrow keys move, R restarts,
// N/PgDn next level, PgUp previous level, M submits the win claim, Q quits.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sokoban_engine::config::{Cli, Mode, init_tracing};
use sokoban_engine::console_interface::ConsoleInput::*;
use sokoban_engine::console_interface::{
    cleanup_terminal, handle_input, render_game, render_game_to_string, setup_terminal,
};
use sokoban_engine::core::{parse_action_list, replay, verify_solution, GameChangeType, RejectReason, UserAction as Action};
use sokoban_engine::level_source::{LevelPack, LevelSource};
use sokoban_engine::models::GameRenderState;
use sokoban_engine::session::{GameSession, SessionMove, WinClaim};
use sokoban_engine::win_sink::{ClaimWriter, WinSink};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

// The terminal belongs to the game while playing, so claims go to a file.
const DEFAULT_PLAY_CLAIMS: &str = "exports/claims.jsonl";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let pack = cli.load_pack()?;
    let mode = cli.mode();
    let claims = match (&cli.claims, &mode) {
        (Some(path), _) => Some(path.clone()),
        (None, Mode::Play) => Some(PathBuf::from(DEFAULT_PLAY_CLAIMS)),
        (None, _) => None,
    };
    let mut sink = open_sink(claims.as_deref())?;

    let result = match mode {
        Mode::Play => run_interactive(pack, cli.level, sink.as_mut()),
        Mode::Show => run_show(&pack, cli.level),
        Mode::Replay { actions } => run_replay(&pack, cli.level, &actions, sink.as_mut()),
        Mode::Verify { actions } => run_verify(&pack, cli.level, &actions),
    };
    if let Err(err) = &result {
        error!(error = %err, "run failed");
    }
    result
}

fn open_sink(claims: Option<&Path>) -> Result<Box<dyn WinSink>, Box<dyn std::error::Error>> {
    Ok(match claims {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().append(true).create(true).open(path)?;
            Box::new(ClaimWriter::new(file))
        }
        None => Box::new(ClaimWriter::new(io::stdout())),
    })
}

fn run_show(pack: &LevelPack, level_index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let level = pack.level(level_index)?;
    print!("{}", render_game_to_string(&level, &level.initial_state()));
    println!(
        "Level {}/{}: {}x{}, {} boxes, {} targets",
        level_index + 1,
        pack.level_count(),
        level.width(),
        level.height(),
        level.initial_boxes().len(),
        level.targets().len()
    );
    Ok(())
}

fn run_replay(
    pack: &LevelPack,
    level_index: usize,
    actions: &str,
    sink: &mut dyn WinSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = pack.level(level_index)?;
    let moves = parse_action_list(actions)?;
    let game = replay(&level, moves)?;

    print!("{}", render_game_to_string(&level, &game));
    println!(
        "{} moves, {}/{} boxes on targets",
        game.history().len(),
        game.boxes_on_targets(),
        game.targets().len()
    );
    if game.is_won() {
        println!("Solved level {}", level_index + 1);
        sink.submit(&WinClaim {
            level_index,
            actions: game.action_codes(),
        })?;
    }
    Ok(())
}

fn run_verify(pack: &LevelPack, level_index: usize, actions: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = pack.level(level_index)?;
    let codes: Vec<u8> = parse_action_list(actions)?
        .into_iter()
        .map(|dir| dir.action_code())
        .collect();
    let game = verify_solution(&level, &codes)?;
    info!(level = level_index, moves = game.history().len(), "solution verified");
    println!("Level {} solved in {} moves", level_index + 1, game.history().len());
    Ok(())
}

fn run_interactive(
    pack: LevelPack,
    level_index: usize,
    sink: &mut dyn WinSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = GameSession::new(pack, level_index)?;
    let mut terminal = setup_terminal()?;
    let result = play_loop(&mut session, &mut terminal, sink);
    cleanup_terminal()?;
    result
}

fn play_loop(
    session: &mut GameSession<LevelPack>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sink: &mut dyn WinSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rejection: Option<RejectReason> = None;
    let mut last_change: Option<GameChangeType> = None;
    let mut notice: Option<String> = None;
    let mut claimed = false;

    render_game(terminal, session.level(), &render_state(session, rejection, last_change, notice.clone()))?;

    loop {
        match handle_input() {
            Ok(Quit) => break,
            Ok(Timeout) | Ok(Unknown) => continue,
            Ok(UserAction(Action::Move(dir))) => {
                notice = None;
                match session.apply_move(dir) {
                    SessionMove::Accepted { change, .. } => {
                        rejection = None;
                        last_change = Some(change);
                    }
                    SessionMove::Rejected(reason) => rejection = Some(reason),
                    SessionMove::Finished => {}
                }
            }
            Ok(Restart) => {
                session.restart();
                (rejection, last_change, notice, claimed) = (None, None, None, false);
            }
            Ok(NextLevel) => {
                if !session.next_level()? {
                    session.restart_game()?;
                }
                (rejection, last_change, notice, claimed) = (None, None, None, false);
            }
            Ok(PreviousLevel) => {
                if session.level_index() > 0 {
                    session.select_level(session.level_index() - 1)?;
                    (rejection, last_change, notice, claimed) = (None, None, None, false);
                }
            }
            Ok(SubmitClaim) => {
                notice = match (session.win_claim(), claimed) {
                    (None, _) => Some("Nothing to claim yet".to_string()),
                    (Some(_), true) => Some("Claim already submitted".to_string()),
                    (Some(claim), false) => match sink.submit(&claim) {
                        Ok(()) => {
                            claimed = true;
                            Some(format!("Claim for level {} submitted", claim.level_index + 1))
                        }
                        Err(err) => {
                            error!(error = %err, "claim submission failed");
                            Some(format!("Claim failed: {}", err))
                        }
                    },
                };
            }
            Err(err) => {
                error!(error = %err, "error reading input");
                break;
            }
        }

        render_game(terminal, session.level(), &render_state(session, rejection, last_change, notice.clone()))?;
    }

    io::stdout().flush()?;
    Ok(())
}

fn render_state(
    session: &GameSession<LevelPack>,
    rejection: Option<RejectReason>,
    last_change: Option<GameChangeType>,
    notice: Option<String>,
) -> GameRenderState {
    GameRenderState {
        game: session.state().clone(),
        level_index: session.level_index(),
        level_count: session.level_count(),
        facing: session.facing(),
        won: session.is_won(),
        has_next_level: session.has_next_level(),
        rejection,
        last_change,
        notice,
    }
}
