use clap::Parser;
use placefinder::cli::{self, Cli, Commands};
use placefinder::{Config, run};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `init` must work even when the existing config file does not parse.
    if matches!(cli.command, Some(Commands::Init)) {
        return cli::cmd_init(&Config::default_config_path());
    }

    let config = Config::load()?;
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli.command, config))
}
