// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::Parser;

use crate::output::BoolStyle;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"Input:
    Standard input holds one sample per line, features separated by whitespace.
    Lines starting with '#' and blank lines are ignored.

Output:
    One prediction per input line on standard output, in input order.

Examples:
    tabular-inference scaler.onnx model.onnx < samples.txt
    tabular-inference scaler.json model.json --bool-style lower < samples.txt
    printf '1 2\n-1 2\n' | tabular-inference scaler.json model.json"#)]
pub struct Cli {
    /// Path to the fitted scaler artifact (.onnx or .json)
    pub scaler: PathBuf,

    /// Path to the trained model artifact (.onnx or .json)
    pub model: PathBuf,

    /// Boolean output convention (python: True/False, lower: true/false, numeric: 1/0)
    #[arg(long, default_value_t = BoolStyle::Python)]
    pub bool_style: BoolStyle,

    /// Intra-op threads for ONNX artifacts (0 = let ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Show verbose output on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_paths() {
        let args = Cli::parse_from(["app", "scaler.json", "model.onnx"]);
        assert_eq!(args.scaler, PathBuf::from("scaler.json"));
        assert_eq!(args.model, PathBuf::from("model.onnx"));
        assert_eq!(args.bool_style, BoolStyle::Python);
        assert_eq!(args.threads, 0);
        assert!(!args.verbose);
    }

    #[test]
    fn test_custom_flags() {
        let args = Cli::parse_from([
            "app",
            "s.onnx",
            "m.onnx",
            "--bool-style",
            "numeric",
            "--threads",
            "4",
            "-v",
        ]);
        assert_eq!(args.bool_style, BoolStyle::Numeric);
        assert_eq!(args.threads, 4);
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_paths_rejected() {
        assert!(Cli::try_parse_from(["app"]).is_err());
        assert!(Cli::try_parse_from(["app", "scaler.json"]).is_err());
    }

    #[test]
    fn test_invalid_bool_style_rejected() {
        assert!(Cli::try_parse_from(["app", "s.json", "m.json", "--bool-style", "yes"]).is_err());
    }
}
