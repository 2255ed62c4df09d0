use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "corrosion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Corrosion language interpreter", long_about = None)]
pub struct Args {
    /// Script to run. Starts an interactive session if omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(short, long, value_name = "PROMPT", default_value = "> ")]
    pub prompt: String,

    /// Log filter directive, e.g. `debug` or `corrosion_core=trace`.
    /// Overrides `RUST_LOG`.
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print the parsed program before evaluating it.
    #[arg(long = "print-ast")]
    pub print_ast: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["corrosion"]).expect("args to be valid");
        assert!(args.file.is_none());
        assert_eq!(args.prompt, "> ");
        assert!(args.log_level.is_none());
        assert!(!args.print_ast);
    }

    #[test]
    fn parse_script_args() {
        let args = Args::try_parse_from([
            "corrosion",
            "script.cor",
            "--print-ast",
            "--log-level",
            "debug",
        ])
        .expect("args to be valid");
        assert_eq!(args.file, Some(PathBuf::from("script.cor")));
        assert!(args.print_ast);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
