//! Command-line driver.
//!
//! ```text
//! glyphgen extract <config.plist>
//! glyphgen procedural [config.plist]
//! ```
//!
//! Both modes save a UFO and then compile it to OTF with fontmake. A failed
//! compile leaves the saved UFO in place.

use std::env;
use std::error::Error as StdError;
use std::path::Path;
use std::process::ExitCode;

use glyphgen::{Config, FontCompiler, SynthesisConfig};
use log::{error, info};

static USAGE: &str = "usage: glyphgen extract <config.plist>\n       glyphgen procedural [config.plist]";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["extract", config] => extract(Path::new(config)),
        ["procedural"] => procedural(None),
        ["procedural", config] => procedural(Some(Path::new(config))),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", error_chain(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn extract(config_path: &Path) -> Result<(), Box<dyn StdError>> {
    let config = Config::load(config_path)?;
    let report = glyphgen::extract::run(&config)?;
    info!(
        "extracted {} of {} characters",
        report.extracted.len(),
        report.extracted.len() + report.skipped.len()
    );
    FontCompiler::default().compile(&config.ufo_path, &config.otf_path)?;
    Ok(())
}

fn procedural(config_path: Option<&Path>) -> Result<(), Box<dyn StdError>> {
    let config = match config_path {
        Some(path) => SynthesisConfig::load(path)?,
        None => SynthesisConfig::default(),
    };
    let font = glyphgen::synthesize::run(&config)?;
    info!("generated {} glyphs", font.glyph_count());
    FontCompiler::default().compile(&config.ufo_path, &config.otf_path)?;
    Ok(())
}

/// Formats an error followed by each of its sources.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
