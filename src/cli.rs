use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "starfeed")]
#[command(about = "A terminal feed of recently created GitHub repositories, sorted by stars")]
pub struct CliArgs {
    /// Only show repositories created within the last N days (overrides config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_days_only() {
        let args = CliArgs::parse_from(["starfeed", "--days", "7"]);
        assert_eq!(args.days, Some(7));
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let args = CliArgs::parse_from([
            "starfeed",
            "--days", "7",
            "--config", "/custom/config.toml",
        ]);
        assert_eq!(args.days, Some(7));
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(["starfeed"]);
        assert_eq!(args.days, None);
        assert_eq!(args.config, None);
    }
}
