// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! edgepub: bridges infrastructure lifecycle events to component build jobs

mod commands;
mod env;
mod exit_error;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{handle, pipeline, render};
use exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "edgepub",
    version = env::VERSION,
    about = "Publish edge components from infrastructure lifecycle events"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Handle one lifecycle event (create, update or delete)
    Handle(handle::HandleArgs),
    /// Run a build pipeline inside an accepted build job
    Pipeline(pipeline::PipelineArgs),
    /// Print the standard gdk pipeline definition
    Render(render::RenderArgs),
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => 1,
        };
        eprintln!("error: {:#}", e);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::render(args),
        Command::Handle(args) => runtime()?.block_on(handle::handle(args)),
        Command::Pipeline(args) => runtime()?.block_on(pipeline::pipeline(args)),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
