//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! The REPL owns the conversation context: each question and each final
//! answer is appended, so later deliberations see the full history.
//! Intermediate opinions, drafts, and critiques never enter the context.

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use council_application::{
    ContextManager, DeliberationParams, RunDeliberationInput, RunDeliberationUseCase,
};
use council_application::ports::provider::CouncilGateway;
use council_domain::{Query, RoleAssignment};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Interactive chat REPL
pub struct ChatRepl<G: CouncilGateway + 'static> {
    use_case: RunDeliberationUseCase<G>,
    assignment: RoleAssignment,
    params: DeliberationParams,
    context: ContextManager,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<G: CouncilGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<G>, assignment: RoleAssignment) -> Self {
        Self {
            use_case: RunDeliberationUseCase::new(gateway),
            assignment,
            params: DeliberationParams::default(),
            context: ContextManager::new(),
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set deliberation parameters (timeout, sampling)
    pub fn with_params(mut self, params: DeliberationParams) -> Self {
        self.params = params;
        self
    }

    /// Override the readline history file location
    pub fn with_history_file(mut self, path: PathBuf) -> Self {
        self.history_file = Some(path);
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("llm-council").join("history.txt"))
        });

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           LLM Council - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Mode: {}", self.assignment.mode());
        println!("Seats:");
        for (role, model) in self.assignment.seats() {
            println!("  {} - {}", role, model);
        }
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /seats    - Show the current role assignment");
        println!("  /clear    - Forget the conversation so far");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /seats           - Show the current role assignment");
                println!("  /clear           - Forget the conversation so far");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/seats" => {
                println!();
                println!("Current seats ({} mode):", self.assignment.mode());
                for (role, model) in self.assignment.seats() {
                    println!("  {} - {}", role, model);
                }
                println!();
                false
            }
            "/clear" => {
                self.context = ContextManager::new();
                println!("Conversation cleared.");
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let Some(query) = Query::try_new(question) else {
            return;
        };

        // Snapshot before the run: the engine sees the context as it was
        // when the question was asked.
        let input = RunDeliberationInput::new(query, self.assignment.clone())
            .with_context(self.context.snapshot())
            .with_params(self.params.clone());

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        match result {
            Ok(outcome) => {
                let output = ConsoleFormatter::format_answer_only(&outcome);
                println!("{}", output);

                let _ = self.context.append_user(question);
                let _ = self.context.append_assistant(&outcome.final_answer);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
