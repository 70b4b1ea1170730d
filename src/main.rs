use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use starfall::build_info;
use starfall::core::logic::{process_input, tick};
use starfall::core::types::{GamePhase, World, PHYSICS_TICK_MS};
use starfall::input::map_key;
use starfall::ui::scene::render_scene;
use starfall::utils::persistence::{load_high_score, save_high_score, HighScore};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "starfall {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Starfall - Terminal Arcade Platformer\n");
                println!("Catch falling stars before they fade. Don't let the counter");
                println!("drop below 50.\n");
                println!("Usage: starfall [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'starfall --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    // Restore terminal even if the game loop failed
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut high_score = load_high_score();
    let mut world = World::new(&mut rng);
    let mut last_tick = Instant::now();
    let mut recorded = false;

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            render_scene(frame, area, &world, high_score.best_score);
        })?;

        if event::poll(Duration::from_millis(PHYSICS_TICK_MS))? {
            if let Event::Key(key_event) = event::read()? {
                match world.phase {
                    GamePhase::Ended => match key_event.code {
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            high_score.best_score = high_score.best_score.max(world.score);
                            world = World::new(&mut rng);
                            last_tick = Instant::now();
                            recorded = false;
                        }
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        _ => {}
                    },
                    GamePhase::Playing => process_input(&mut world, map_key(key_event.code)),
                }
            }
        }

        if world.quit_requested {
            break;
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick = now;
        tick(&mut world, dt_ms, &mut rng);

        // Persist a new record as soon as the run ends. The in-memory best
        // stays untouched so the lose screen can celebrate it.
        if world.phase == GamePhase::Ended && !recorded {
            recorded = true;
            if world.score > high_score.best_score {
                save_high_score(&HighScore {
                    best_score: world.score,
                })?;
            }
        }
    }

    // A quit mid-run can still set a record.
    if world.score > high_score.best_score {
        save_high_score(&HighScore {
            best_score: world.score,
        })?;
    }

    Ok(())
}
