//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send a prompt and stream the reply
    Chat(ChatArgs),
}

/// Arguments for [`CliCommand::Chat`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatArgs {
    /// Backend base URL override (`--url`)
    pub url: Option<String>,
    /// Workspace directory override (`--path`)
    pub workspace_path: Option<String>,
    /// Prompt words joined by spaces
    pub prompt: String,
}

/// Usage text.
pub const USAGE: &str = "usage: streamchat [--url URL] [--path DIR] <prompt...>";

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use streamchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["streamchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut chat = ChatArgs::default();
    let mut words = Vec::new();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" => match args.next() {
                Some(url) => chat.url = Some(url),
                None => return CliCommand::Help,
            },
            "--path" => match args.next() {
                Some(path) => chat.workspace_path = Some(path),
                None => return CliCommand::Help,
            },
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        return CliCommand::Help;
    }
    chat.prompt = words.join(" ");
    CliCommand::Chat(chat)
}
