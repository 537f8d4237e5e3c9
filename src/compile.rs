//! Compiling a saved UFO into a binary font.
//!
//! Binary font encoding is left to an external compiler, [fontmake] by
//! default. The saved UFO is never modified by this step.
//!
//! [fontmake]: https://github.com/googlefonts/fontmake

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::CompileError;

static DEFAULT_PROGRAM: &str = "fontmake";

/// Runs an external UFO to OTF compiler.
#[derive(Debug, Clone)]
pub struct FontCompiler {
    program: OsString,
}

impl Default for FontCompiler {
    fn default() -> Self {
        FontCompiler { program: DEFAULT_PROGRAM.into() }
    }
}

impl FontCompiler {
    /// A compiler invoking `program` with fontmake's arguments.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        FontCompiler { program: program.into() }
    }

    /// The arguments passed to the compiler.
    pub fn args(ufo: &Path, otf: &Path) -> Vec<OsString> {
        vec![
            "-u".into(),
            ufo.into(),
            "-o".into(),
            "otf".into(),
            "--output-path".into(),
            otf.into(),
            "--production-names".into(),
        ]
    }

    /// Compiles the UFO at `ufo` into `otf`, waiting for the compiler to exit.
    ///
    /// Not retried on failure. On success, the size of the written file is
    /// logged, or a warning if the compiler exited cleanly without writing
    /// it.
    pub fn compile(&self, ufo: &Path, otf: &Path) -> Result<(), CompileError> {
        let program = self.program.to_string_lossy().into_owned();
        log::info!("compiling {} to {} with {program}", ufo.display(), otf.display());
        let output = Command::new(&self.program)
            .args(Self::args(ufo, otf))
            .output()
            .map_err(|source| CompileError::Spawn { program: program.clone(), source })?;

        if !output.status.success() {
            return Err(CompileError::Failed {
                program,
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        match fs::metadata(otf) {
            Ok(meta) => log::info!("wrote {} ({} bytes)", otf.display(), meta.len()),
            Err(_) => log::warn!("{program} succeeded but {} was not written", otf.display()),
        }
        Ok(())
    }
}
