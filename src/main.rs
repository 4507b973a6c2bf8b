use streamchat::adapters::TerminalSink;
use streamchat::cli::{apply_overrides, parse_args, CliCommand, USAGE, VERSION};
use streamchat::client::ChatClient;
use streamchat::config::ClientConfig;
use streamchat::logging::init_tracing;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("streamchat {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
        CliCommand::Chat(args) => args,
    };

    init_tracing();

    let config = apply_overrides(ClientConfig::from_env(), &args);
    let runtime = tokio::runtime::Runtime::new()?;

    let client = ChatClient::from_config(config)?;
    let mut sink = TerminalSink::stdout();

    match runtime.block_on(client.submit(&args.prompt, &mut sink)) {
        Ok(summary) => {
            tracing::debug!(?summary, "chat finished");
            Ok(())
        }
        Err(_) => {
            // The error itself was already rendered by the client.
            eprintln!("{}", sink.status_line());
            std::process::exit(1);
        }
    }
}
