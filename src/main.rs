use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use files::{
    file::{files_with_extension, ExtensionFilter},
    resize::PendingResize,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::args::Args;
use crate::error::Result;
mod args;
mod error;
mod files;

fn run(args: &Args) -> Result<u64> {
    println!("Processing images in directory: {}", args.directory.display());
    println!("File types to process: {:?}", args.filetypes);

    let filter = ExtensionFilter::new(args.filetypes.as_slice())?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} resized {wide_msg}")?,
    );

    // Sequential: each image is saved before the walk moves on.
    for path in files_with_extension(&args.directory, &filter) {
        let path = path?;
        pb.set_message(path.display().to_string());
        let pending = PendingResize::open(&path)?;
        pb.suspend(|| {
            let record = pending.record();
            println!("Original Dimensions: {}x{}", record.original.0, record.original.1);
            println!("Resized Dimensions: {}x{}", record.resized.0, record.resized.1);
        });
        let record = pending.save()?;
        pb.suspend(|| println!("Image saved to {}", record.output.display()));
        debug!("Processed {}", record);
        pb.inc(1);
    }

    let count = pb.position();
    pb.finish_and_clear();
    Ok(count)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(count) => {
            println!("Resized {} image(s)", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("{err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
