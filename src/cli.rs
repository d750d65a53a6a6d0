use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "newslens",
    version,
    about = "Fake news detector: classifier verdict plus heuristic indicators"
)]
pub struct Cli {
    /// Article text. Falls back to --file, then stdin.
    pub text: Option<String>,
    #[arg(long, short, help = "Read the article from a .txt, .md, .docx or .pdf file")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Directory holding config.json (default: platform config dir)")]
    pub config_dir: Option<PathBuf>,
    #[arg(long, help = "Vectorizer artifact, overrides the config file")]
    pub vectorizer: Option<PathBuf>,
    #[arg(long, help = "Model artifact, overrides the config file")]
    pub model: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Omit the recommendations section")]
    pub no_recommendations: bool,
    #[arg(long, default_value_t = false, help = "Write config.json (with any artifact overrides) and exit")]
    pub init_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_file_and_overrides() {
        let cli = Cli::try_parse_from([
            "newslens",
            "--file",
            "story.docx",
            "--json",
            "--model",
            "m.json",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("story.docx")));
        assert!(cli.json);
        assert_eq!(cli.model, Some(PathBuf::from("m.json")));
        assert!(cli.text.is_none());
        assert!(!cli.init_config);
    }
}
