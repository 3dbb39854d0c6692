use clap::Parser;
use stockroom::cli::commands::{Cli, Commands};
use stockroom::cli::handlers;
use stockroom::logging;

fn main() {
    let cli = Cli::parse();

    // No subcommand → add form; `edit <ID>` without field flags → edit form
    let interactive = match &cli.command {
        None => Some(None),
        Some(Commands::Edit(args)) if !args.has_changes() => Some(Some(args.id)),
        Some(_) => None,
    };

    let result = match interactive {
        Some(edit) => stockroom::tui::run(cli.config.as_deref(), cli.demo, cli.verbose, edit),
        None => {
            logging::init_stderr(cli.verbose);
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
