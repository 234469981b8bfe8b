//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with the whole transcript
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - Multiple LLMs deliberate on your question")]
#[command(long_about = r#"
llm-council runs a council of LLMs that deliberate on a question.

Classic mode:
1. Gathering: every council member answers your question in parallel
2. Synthesis: the chairman merges the opinions into one final answer

Debate mode:
1. Drafting: the proponent writes an initial answer
2. Logic audit: the opponent hunts for flaws and renders a verdict
3. Synthesis: on a flawed verdict, the chairman reconciles draft and
   critique; an approved draft is returned as-is

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m gpt-4o -m claude-3-5-sonnet-20240620 "Compare async runtimes"
  llm-council --mode debate "Is this proof correct?"
  llm-council --chat
"#)]
pub struct Cli {
    /// The question for the council (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Deliberation mode (classic or debate)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Classic-mode member models (can be specified multiple times, 2-3 seats)
    #[arg(short, long, value_name = "MODEL")]
    pub member: Vec<String>,

    /// Model to use as chairman for final synthesis
    #[arg(long, value_name = "MODEL")]
    pub chairman: Option<String>,

    /// Debate-mode model drafting the initial answer
    #[arg(long, value_name = "MODEL")]
    pub proponent: Option<String>,

    /// Debate-mode model auditing the draft
    #[arg(long, value_name = "MODEL")]
    pub opponent: Option<String>,

    /// Output format (falls back to the config file, then "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
