//! Command-line interface definition using clap.
//!
//! ```text
//! hangpack [-a|-z] <ARCHIVE>
//! ```
//!
//! `-a` (the default) writes each conversation oldest first, `-z` newest
//! first. Any other option is rejected before the archive is opened.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SortOrder;

/// Convert a Google Hangouts Takeout archive into one CSV file per
/// conversation, written to the current directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "hangpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    hangpack Hangouts.json
    hangpack -z Takeout/Hangouts/Hangouts.json")]
pub struct Args {
    /// Sort events oldest first (default)
    #[arg(short = 'a', conflicts_with = "descending")]
    pub ascending: bool,

    /// Sort events newest first
    #[arg(short = 'z')]
    pub descending: bool,

    /// Path to Hangouts.json
    pub archive: PathBuf,
}

impl Args {
    /// Event order selected by the flags.
    pub fn order(&self) -> SortOrder {
        if self.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_order_is_ascending() {
        let args = Args::try_parse_from(["hangpack", "Hangouts.json"]).unwrap();
        assert_eq!(args.order(), SortOrder::Ascending);
        assert_eq!(args.archive, PathBuf::from("Hangouts.json"));
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from(["hangpack", "-a", "x.json"]).unwrap();
        assert_eq!(args.order(), SortOrder::Ascending);

        let args = Args::try_parse_from(["hangpack", "-z", "x.json"]).unwrap();
        assert_eq!(args.order(), SortOrder::Descending);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Args::try_parse_from(["hangpack", "-a", "-z", "x.json"]).is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = Args::try_parse_from(["hangpack", "-q", "x.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_archive_required() {
        assert!(Args::try_parse_from(["hangpack"]).is_err());
        assert!(Args::try_parse_from(["hangpack", "a.json", "b.json"]).is_err());
    }
}
