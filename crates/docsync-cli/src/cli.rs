use clap::{Args, Parser, Subcommand};
use docsync_model::PipelineConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsync", version, about = "Keep a documentation corpus in step with research findings")]
pub(crate) struct Cli {
    #[arg(long, global = true, default_value = ".", help = "Corpus root directory")]
    pub(crate) root: PathBuf,
    #[arg(
        long,
        global = true,
        default_value = "output",
        help = "Artifact directory, relative to the root"
    )]
    pub(crate) output_dir: PathBuf,
    #[arg(
        long,
        global = true,
        default_value = "config",
        help = "Configuration directory, relative to the root"
    )]
    pub(crate) config_dir: PathBuf,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub(crate) json: bool,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub(crate) verbose: bool,
    #[command(flatten)]
    pub(crate) credentials: Credentials,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    pub(crate) fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(&self.root)
            .with_output_dir(&self.output_dir)
            .with_config_dir(&self.config_dir)
    }
}

/// Service credentials and search scope, normally taken from the environment
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct Credentials {
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true, global = true)]
    pub(crate) perplexity_key: Option<String>,
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, global = true)]
    pub(crate) anthropic_key: Option<String>,
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub(crate) github_token: Option<String>,
    #[arg(
        long,
        env = "SEARCH_SCOPE",
        default_value = docsync_research::DEFAULT_SCOPE,
        global = true,
        help = "Query set: all, claude-models, claude-code, mcp, pricing, tools"
    )]
    pub(crate) scope: String,
}

impl Credentials {
    pub(crate) fn perplexity(&self) -> Option<&str> {
        self.perplexity_key.as_deref().filter(|k| !k.is_empty())
    }

    pub(crate) fn anthropic(&self) -> Option<&str> {
        self.anthropic_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Collect findings from search and source-hosting services
    Research,
    /// Summarize findings into updates and file recommendations
    Analyze,
    /// Bump the version and patch the corpus from the last analysis
    Update,
    /// Check the corpus; exits 1 when any error is found
    Validate,
    /// Research, analyze, update and validate in sequence
    Run,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn directories_resolve_against_root() {
        let cli = Cli::parse_from(["docsync", "--root", "/srv/docs", "--output-dir", "out", "validate"]);
        let config = cli.pipeline_config();
        assert_eq!(config.output_dir, PathBuf::from("/srv/docs/out"));
        assert_eq!(config.config_dir, PathBuf::from("/srv/docs/config"));
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let credentials = Credentials {
            perplexity_key: Some(String::new()),
            anthropic_key: Some("k".into()),
            ..Credentials::default()
        };
        assert_eq!(credentials.perplexity(), None);
        assert_eq!(credentials.anthropic(), Some("k"));
    }
}
