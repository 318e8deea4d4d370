use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "braincards-export")]
#[command(about = "Export flashcard decks as a tab-separated file for import into Anki")]
#[command(version)]
pub struct CliArgs {
    /// Pack ID
    #[arg(long, value_name = "INT")]
    pub pack: Option<u64>,

    /// Deck ID (prompted for when neither --pack nor --deck is given)
    #[arg(long, value_name = "INT")]
    pub deck: Option<u64>,

    /// Fetch cards for all decks in the pack (only --pack is required)
    #[arg(long)]
    pub full_pack: bool,

    /// Write the export to this file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.full_pack && self.pack.is_none() {
            return Err("--full-pack requires --pack <INT>".to_string());
        }

        if let Some(ref path) = self.output {
            if path.is_dir() {
                return Err(format!("Output path {} is a directory", path.display()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pack: Option<u64>, deck: Option<u64>, full_pack: bool) -> CliArgs {
        CliArgs { pack, deck, full_pack, output: None }
    }

    #[test]
    fn test_validate_full_pack_without_pack_fails() {
        assert!(args(None, None, true).validate().is_err());
        assert!(args(None, Some(3), true).validate().is_err());
    }

    #[test]
    fn test_validate_valid_combinations_succeed() {
        assert!(args(Some(7), None, true).validate().is_ok());
        assert!(args(Some(7), Some(3), false).validate().is_ok());
        // Missing ids are prompted for later
        assert!(args(None, None, false).validate().is_ok());
    }

    #[test]
    fn test_validate_output_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(Some(7), Some(3), false);
        a.output = Some(dir.path().to_path_buf());
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let a = CliArgs::try_parse_from(["braincards-export", "--pack", "7", "--full-pack"]).unwrap();
        assert_eq!(a.pack, Some(7));
        assert_eq!(a.deck, None);
        assert!(a.full_pack);

        let a = CliArgs::try_parse_from(["braincards-export", "--pack", "7", "--deck", "3", "-o", "out.txt"]).unwrap();
        assert_eq!(a.deck, Some(3));
        assert!(!a.full_pack);
        assert_eq!(a.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_parse_rejects_non_integer_ids() {
        assert!(CliArgs::try_parse_from(["braincards-export", "--pack", "abc"]).is_err());
    }
}
