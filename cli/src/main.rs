mod commands;
mod terminal;

use commands::CommandLine;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    let cfg = commands.to_config();

    print::banner(cfg.quiet);
    print::header("getting ready to probe", cfg.quiet);

    commands::probe::probe(&cfg).await
}
