
use clap::Args;
use simple_error::bail;

use crate::cli::core::AFTER_HELP;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct DetectSettings {
    /// Free text to scan for supported drug names, e.g. a medication list
    #[clap(required = true)]
    #[clap(value_name = "TEXT")]
    pub text: String,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_detect_settings(settings: DetectSettings) -> Result<DetectSettings, Box<dyn std::error::Error>> {
    if settings.text.trim().is_empty() {
        bail!("The input text cannot be empty.");
    }
    Ok(settings)
}
