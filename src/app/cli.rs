use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Generate a .clangd file for an STM32CubeMX project in the current directory"
)]
pub struct Cli {
    /// Add the -Wall flag. Not added by default
    #[arg(long, alias = "Wall")]
    pub wall: bool,

    /// Use a named preset from presets.toml instead of the directory name
    #[arg(long)]
    pub preset: Option<String>,

    /// Project metadata file listing HeaderPath (relative to the project root)
    #[arg(long)]
    pub project_file: Option<PathBuf>,

    /// Generated build rules carrying the compiler invocation (relative to the project root)
    #[arg(long)]
    pub build_rules: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Like `try_parse_from`, but also accepts the single-dash `-Wall` spelling.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(args.into_iter().map(Into::into).map(|arg: OsString| {
            if arg == "-Wall" {
                OsString::from("--wall")
            } else {
                arg
            }
        }))
    }
}
