use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "otpass", version)]
#[command(
    about = "Generate One-time Password",
    long_about = "Generate One-time Password\n\nReads the provider directory from standard input and fuzzy-matches the given provider and/or account name."
)]
pub struct Cli {
    /// fuzzy search provider names
    #[arg(value_name = "P")]
    pub provider: Option<String>,

    /// fuzzy search account names
    #[arg(short, long, value_name = "A")]
    pub account: Option<String>,

    /// if set, do not use clipboard
    #[arg(short = 'c', long)]
    pub no_clip: bool,

    /// Log resolution details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
