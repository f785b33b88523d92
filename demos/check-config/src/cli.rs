use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    name = "check-config",
    long_about = "Validate a configuration of the JSON output plugin and print a summary"
)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Path to the XML configuration (the <params> element).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config_file: String,

    /// Print the summary on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose informational messages.
    #[arg(long)]
    pub verbose: bool,
}
