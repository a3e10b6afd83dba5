use clap::Parser;
use miette::Result;
use quire::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` or `grep -q` terminates quietly
    // instead of panicking on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

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

    // Logs go to stderr, stdout is reserved for notes and listings
    let default_level = if global.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("QUIRE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init(args) => quire::cli::commands::init::run(args),
        Commands::Add(args) => quire::cli::commands::add::run(args, &global),
        Commands::View(args) => quire::cli::commands::view::run(args, &global),
        Commands::Completions(args) => quire::cli::commands::completions::run(args),
    }
}
