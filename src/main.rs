use clap::Parser;
use miette::Result;
use stockroom::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;

    stockroom::logging::init_logging(global.verbose, global.quiet)?;

    match cli.command {
        Commands::Init(args) => stockroom::cli::commands::init::run(args),
        Commands::Form(args) => stockroom::cli::commands::form::run(args, &global),
        Commands::Add(args) => stockroom::cli::commands::add::run(args, &global),
        Commands::Search(args) => stockroom::cli::commands::search::run(args, &global),
        Commands::List(args) => stockroom::cli::commands::list::run(args, &global),
        Commands::Material(cmd) => stockroom::cli::commands::material::run(cmd, &global),
        Commands::Completions(args) => stockroom::cli::commands::completions::run(args),
    }
}
