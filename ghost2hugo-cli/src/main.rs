use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod convert;
mod error;
mod export;
mod images;
mod post;
mod site;
mod time;

use error::Error;

fn main() -> miette::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = convert::Args::parse();
    convert::run(&args)?;
    Ok(())
}
