//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wowza - FSM-driven lexer for the Wowza language
#[derive(Parser, Debug)]
#[command(name = "wowza")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lex a file and display the token stream
    Lex {
        /// Source file
        path: PathBuf,

        /// Also print whitespace tokens
        #[arg(long)]
        keep_whitespace: bool,
    },

    /// Step the Wowza machine over INPUT and print each state it visits
    Trace {
        input: String,

        /// State to start from
        #[arg(long, default_value = wowza_lexer::INITIAL_STATE)]
        from: String,
    },

    /// Print the keyword, token, and character-class tables
    Symbols,
}
