use clap::{Parser, Subcommand};
use postflow::Platform;

#[derive(Parser, Debug)]
#[command(name = "postflow")]
#[command(about = "Turn raw ideas into viral LinkedIn and Twitter posts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post from an idea
    #[command(alias = "g")]
    Generate {
        /// The raw idea (read from stdin when omitted)
        #[arg(num_args = 0..)]
        idea: Vec<String>,

        /// Target platform: linkedin or twitter
        #[arg(short, long, default_value = "linkedin")]
        platform: Platform,

        /// Copy the post to the clipboard
        #[arg(short, long)]
        copy: bool,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Save an API key, replacing any stored key
    Set {
        /// The OpenAI API key (starts with "sk-")
        key: String,
    },

    /// Show the stored key, masked unless --reveal is given
    Show {
        #[arg(long)]
        reveal: bool,
    },

    /// Remove the stored key
    Clear,
}
