use std::path::PathBuf;

use clap::Parser;

/// Resize image files in a directory to the nearest power-of-two dimensions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The root directory to search for image files
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub directory: PathBuf,

    /// Image file extensions to process (e.g. '.jpg' '.png')
    #[arg(
        long,
        value_name = "EXT",
        num_args = 1..,
        default_values = [".jpg", ".png"]
    )]
    pub filetypes: Vec<String>,
}
