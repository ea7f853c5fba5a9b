//! Interactive chat loop

use crate::ConsoleFormatter;
use coach_application::{BackendGateway, CoachController, SendOutcome};
use coach_domain::Mode;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// What one input line asked the loop to do next.
enum LineOutcome {
    Continue,
    Exit,
}

/// Line-oriented chat session over a [`CoachController`].
///
/// Plain lines are chat turns; `/`-prefixed lines are local commands. The
/// loop itself holds no session state beyond display preferences — the
/// controller owns everything it renders.
pub struct ChatRepl<G: BackendGateway + 'static> {
    controller: Arc<CoachController<G>>,
    default_mode: Mode,
    show_panels: bool,
}

impl<G: BackendGateway + 'static> ChatRepl<G> {
    pub fn new(controller: Arc<CoachController<G>>, default_mode: Mode) -> Self {
        Self {
            controller,
            default_mode,
            show_panels: true,
        }
    }

    /// Whether the board and score panels are printed after each turn.
    pub fn with_panels(mut self, show: bool) -> Self {
        self.show_panels = show;
        self
    }

    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;
        let history = history_file();
        if let Some(path) = &history {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_help();

        loop {
            let line = match rl.readline(">>> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(command) = line.strip_prefix('/') {
                if matches!(self.dispatch(command).await, LineOutcome::Exit) {
                    break;
                }
            } else {
                let _ = rl.add_history_entry(line);
                self.chat_turn(line).await;
            }
        }

        if let Some(path) = &history {
            let _ = rl.save_history(path);
        }
        Ok(())
    }

    fn print_help(&self) {
        println!();
        println!("Debate Coach — type a claim or pitch, get pushback.");
        println!(
            "{}",
            ConsoleFormatter::format_session_line(&self.controller.state())
        );
        println!();
        println!("  /mode <m>   switch mode (debate | pitch), fresh session");
        println!("  /board      show the argument board");
        println!("  /score      show the current score and fallacies");
        println!("  /new        restart the session in the current mode");
        println!("  /help       this text");
        println!("  /quit       exit");
        println!();
    }

    /// Run one slash command (`command` has the `/` already stripped).
    async fn dispatch(&self, command: &str) -> LineOutcome {
        let (name, argument) = match command.split_once(' ') {
            Some((name, rest)) => (name, Some(rest.trim())),
            None => (command, None),
        };

        match name {
            "quit" | "exit" | "q" => {
                println!("Bye!");
                return LineOutcome::Exit;
            }
            "help" | "h" | "?" => self.print_help(),
            "mode" => self.switch_mode(argument).await,
            "board" => {
                print!(
                    "{}",
                    ConsoleFormatter::format_board(&self.controller.state().board)
                );
            }
            "score" => {
                let state = self.controller.state();
                print!("{}", ConsoleFormatter::format_score(state.score.as_ref()));
                if !state.fallacies.is_empty() {
                    print!("{}", ConsoleFormatter::format_fallacies(&state.fallacies));
                }
            }
            "new" => {
                let mode = self
                    .controller
                    .state()
                    .session
                    .map(|s| s.mode)
                    .unwrap_or(self.default_mode);
                match self.controller.new_session(mode).await {
                    Ok(()) => println!(
                        "{}",
                        ConsoleFormatter::format_session_line(&self.controller.state())
                    ),
                    Err(e) => eprintln!("Could not start session: {e}"),
                }
            }
            other => {
                println!("Unknown command: /{other} (try /help)");
            }
        }
        LineOutcome::Continue
    }

    async fn switch_mode(&self, argument: Option<&str>) {
        let Some(argument) = argument.filter(|a| !a.is_empty()) else {
            println!("Usage: /mode <debate | pitch>");
            return;
        };
        match argument.parse::<Mode>() {
            Ok(mode) => match self.controller.switch_mode(mode).await {
                Ok(()) => {
                    println!("Switched to {mode}. Fresh session, clean slate.");
                    println!(
                        "{}",
                        ConsoleFormatter::format_session_line(&self.controller.state())
                    );
                }
                Err(e) => eprintln!("Could not switch mode: {e}"),
            },
            Err(e) => eprintln!("{e}"),
        }
    }

    async fn chat_turn(&self, text: &str) {
        match self.controller.send(text).await {
            SendOutcome::Replied | SendOutcome::Failed => {
                let state = self.controller.state();
                if let Some(turn) = state.conversation.last() {
                    println!("{}", ConsoleFormatter::format_turn(turn));
                }
                if self.show_panels {
                    println!();
                    print!("{}", ConsoleFormatter::format_panels(&state));
                }
            }
            SendOutcome::Ignored => {
                println!("No active session — use /new to start one.");
            }
            SendOutcome::Superseded => {
                // A mode switch raced this turn; its reply was discarded.
            }
        }
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("debate-coach").join("history.txt"))
}
