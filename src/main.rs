use clap::Parser as _;

use xrandr_setup::{cli, commands, logging};

fn main() {
    let args = cli::Cli::parse();
    logging::init(args.verbose);

    if let Err(err) = commands::apply::run(&args) {
        tracing::error!("{err:#}");
        std::process::exit(exit_code(&err));
    }
}

/// Map a failure to a process exit code: the raw OS error when one is in
/// the chain, else 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<std::io::Error>())
        .and_then(std::io::Error::raw_os_error)
        .unwrap_or(1)
}
