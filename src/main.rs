use bomwerk::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => bomwerk::cli::commands::extract::run(args, &cli.global),
        Commands::Produce(args) => bomwerk::cli::commands::produce::run(args, &cli.global),
        Commands::Diff(args) => bomwerk::cli::commands::diff::run(args, &cli.global),
        Commands::Completions(args) => bomwerk::cli::commands::completions::run(args),
    }
}
