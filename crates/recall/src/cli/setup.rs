use clap::{Args, Parser, Subcommand, ValueEnum};
use recallapp::model::RecordKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "recall",
    bin_name = "recall",
    version,
    disable_help_subcommand = true,
    after_help = "Running `recall` with no command shows every project and wiki."
)]
#[command(about = "Browse and edit your project and wiki index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding settings.json and recall.toml
    #[arg(
        long,
        global = true,
        env = "RECALL_DATA_DIR",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub data: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "projects", alias = "p")]
    Project,
    #[value(alias = "wikis", alias = "w")]
    Wiki,
}

impl From<KindArg> for RecordKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Project => RecordKind::Project,
            KindArg::Wiki => RecordKind::Wiki,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Link a spreadsheet (must contain `projects` and `wikis` sheets)
    #[command(display_order = 1)]
    Connect {
        /// The id from the spreadsheet URL
        spreadsheet_id: String,
    },

    /// Forget the linked spreadsheet
    #[command(display_order = 2)]
    Disconnect,

    /// Show the current connection and expected sheet layout
    #[command(display_order = 3)]
    Status,

    /// Browse records as cards, optionally filtered
    #[command(alias = "v", display_order = 10)]
    View(ViewArgs),

    /// Show every tag, type and status in use
    #[command(display_order = 11)]
    Tags,

    /// List one sheet as a table with display indexes
    #[command(alias = "ls", display_order = 12)]
    List {
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// Create a project or wiki
    #[command(alias = "n", display_order = 20)]
    Create {
        #[command(subcommand)]
        record: CreateCommands,
    },

    /// Change fields of a project or wiki
    #[command(alias = "u", display_order = 21)]
    Update {
        #[command(subcommand)]
        record: UpdateCommands,
    },

    /// Delete a project or wiki
    #[command(alias = "rm", display_order = 22)]
    Delete {
        #[arg(value_enum)]
        kind: KindArg,
        /// Display index (from `recall list`) or record id
        selector: String,
    },

    /// Open an AI chat pre-filled with a record's context
    #[command(display_order = 30)]
    Ask {
        #[arg(value_enum)]
        kind: KindArg,
        /// Display index (from `recall list`) or record id
        selector: String,
        /// Print the URL instead of opening a browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ViewArgs {
    /// Case-insensitive text to find in names and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keep records carrying any of these tags (repeatable)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Keep projects of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Keep projects with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Only show projects
    #[arg(long, conflicts_with = "wikis")]
    pub projects: bool,

    /// Only show wikis
    #[arg(long)]
    pub wikis: bool,
}

/// Columns shared by projects and wikis.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonFields {
    /// Drive folder id
    #[arg(long, value_name = "ID")]
    pub folder: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// README document id
    #[arg(long, value_name = "ID")]
    pub readme: Option<String>,

    /// One-line description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create a project
    #[command(alias = "p")]
    Project {
        #[arg(long)]
        name: String,
        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        common: CommonFields,
    },

    /// Create a wiki
    #[command(alias = "w")]
    Wiki {
        #[arg(long)]
        topic: String,
        #[command(flatten)]
        common: CommonFields,
    },
}

#[derive(Subcommand, Debug)]
pub enum UpdateCommands {
    /// Update a project
    #[command(alias = "p")]
    Project {
        /// Display index (from `recall list`) or record id
        selector: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        common: CommonFields,
    },

    /// Update a wiki
    #[command(alias = "w")]
    Wiki {
        /// Display index (from `recall list`) or record id
        selector: String,
        #[arg(long)]
        topic: Option<String>,
        #[command(flatten)]
        common: CommonFields,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["recall"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn view_collects_repeated_tags() {
        let cli = Cli::try_parse_from([
            "recall", "view", "-t", "rust", "--tag", "cli", "--type", "app", "-s", "idx",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::View(args)) => {
                assert_eq!(args.tags, ["rust", "cli"]);
                assert_eq!(args.project_type.as_deref(), Some("app"));
                assert_eq!(args.search.as_deref(), Some("idx"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn projects_and_wikis_flags_conflict() {
        assert!(Cli::try_parse_from(["recall", "view", "--projects", "--wikis"]).is_err());
    }

    #[test]
    fn kind_aliases() {
        let cli = Cli::try_parse_from(["recall", "delete", "wikis", "3"]).unwrap();
        match cli.command {
            Some(Commands::Delete { kind, selector }) => {
                assert_eq!(kind, KindArg::Wiki);
                assert_eq!(selector, "3");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_project_requires_name() {
        assert!(Cli::try_parse_from(["recall", "create", "project"]).is_err());
        let cli = Cli::try_parse_from([
            "recall", "create", "project", "--name", "Recall", "--tags", "a, b", "-d", "Index",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create {
                record: CreateCommands::Project { name, common, .. },
            }) => {
                assert_eq!(name, "Recall");
                assert_eq!(common.tags.as_deref(), Some("a, b"));
                assert_eq!(common.description.as_deref(), Some("Index"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["recall", "status", "-v", "--data", "/tmp/x"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
    }
}
