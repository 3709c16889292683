mod commands;
mod logging;
mod progress;
mod prompt;
mod render;

use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use progress::CliReporter;
use rb_clean_core::{CleanEngine, RunOptions, ScanRoot};
use tracing::{debug, error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    if let Err(err) = run(&args) {
        error!("{:#}", err);
        eprintln!("{} {:#}", "ERROR:".red().bold(), err);
        process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let mut config = rb_clean_core::config::load_configuration()
        .context("Error loading configuration")?;
    if let Some(list) = &args.skip_folder {
        config = config.with_skip_list(list);
    }
    if let Some(case) = args.path_case {
        config = config.with_path_case(case.into());
    }
    debug!("Configuration: {:?}", config);

    let engine = CleanEngine::load(&args.rekordbox_xml, config)?;

    let selected = match &args.root {
        Some(root) => root.clone(),
        None => prompt::select_root(&engine.common_root())?,
    };
    let root = ScanRoot::new(&selected)?;

    let mode = args.run_mode();

    println!(
        "\nStarting to {} from folder {}",
        if mode.is_commit() { "clean" } else { "simulate cleaning" },
        root.path().display()
    );

    let details_file = args
        .details_file
        .then(|| render::details_file_name(mode, chrono::Local::now()));
    if let Some(path) = &details_file {
        println!(
            "The details will be written to the following file: {}",
            path.display()
        );
    }

    if mode.is_commit() {
        println!(
            "\n{}",
            "WE ARE ABOUT TO DELETE FILES FROM YOUR REKORDBOX LIBRARY! MAKE SURE YOUR LIBRARY IS BACKED UP"
                .red()
                .bold()
        );
        if !prompt::prompt_confirm("Do you want to proceed?", None)? {
            println!("\nOk, bye!");
            return Ok(());
        }
    }

    let options = RunOptions {
        mode,
        check_missing: args.check_xml,
    };
    let reporter = CliReporter::new();
    let result = engine.reconcile(&root, &options, &reporter);

    render::print_summary(&result);
    if args.details {
        render::print_details(&result);
    }
    if let Some(path) = &details_file {
        render::write_details_file(&result, path)
            .with_context(|| format!("Could not write {}", path.display()))?;
        info!("Details written to {}", path.display());
    }

    Ok(())
}
