use clap::Parser;
use rock_ai_common::AnalysisMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rock-ai")]
#[command(about = "Geological analysis of rock photographs with Gemini", long_about = None)]
pub struct Cli {
    /// Rock photograph to analyze
    #[arg(required = true)]
    pub image: PathBuf,

    /// Where the photo was taken (e.g. "Yosemite Valley, CA")
    #[arg(short, long)]
    pub location: Option<String>,

    /// Run with and without the location and show both reports
    #[arg(short, long)]
    pub compare: bool,

    /// Save results as JSON
    #[arg(short, long)]
    pub save: bool,

    /// Never send the location, even if --location is given
    #[arg(long)]
    pub no_location: bool,

    /// Analysis depth (detailed/quick)
    #[arg(short, long, default_value = "detailed")]
    pub mode: AnalysisMode,

    /// Directory for saved JSON files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Location to send, after applying --no-location
    pub fn effective_location(&self) -> Option<&str> {
        if self.no_location {
            None
        } else {
            self.location.as_deref()
        }
    }
}
