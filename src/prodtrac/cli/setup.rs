use clap::{CommandFactory, Parser, Subcommand};
use prodtrac::view::SortField;

#[derive(Parser, Debug)]
#[command(
    name = "prodtrac",
    bin_name = "prodtrac",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Terminal client for a product inventory service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the product service
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Products,
    Session,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Products => "Product Commands:",
            CommandGroup::Session => "Interactive:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "show" | "add" | "update" | "delete" => Some(CommandGroup::Products),
            "shell" => Some(CommandGroup::Session),
            "health" | "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Products,
            CommandGroup::Session,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("prodtrac {version}\n"));
    output.push_str("Terminal client for a product inventory service\n");
    output.push('\n');
    output.push_str("Usage: prodtrac [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --api-url <URL>  Base URL of the product service\n");
    output.push_str("  -v, --verbose        Verbose output\n");
    output.push_str("      --no-color       Disable colored output\n");
    output.push_str("  -h, --help           Print help\n");
    output.push_str("  -V, --version        Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Products(c)) => match c {
            ProductCommands::List { .. } => "list",
            ProductCommands::Show { .. } => "show",
            ProductCommands::Add { .. } => "add",
            ProductCommands::Update { .. } => "update",
            ProductCommands::Delete { .. } => "delete",
        },
        Some(Commands::Session(SessionCommands::Shell)) => "shell",
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Health => "health",
            MiscCommands::Config { .. } => "config",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Products(ProductCommands),

    #[command(flatten)]
    Session(SessionCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show products whose id, name or description contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Column to sort by (id, name, description, price, quantity)
        #[arg(short, long, value_name = "FIELD")]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show one product
    #[command(display_order = 2)]
    Show { id: i64 },

    /// Add a product
    #[command(alias = "new", display_order = 3)]
    Add {
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        quantity: Option<String>,
    },

    /// Update a product (unset fields keep their current value)
    #[command(alias = "edit", display_order = 4)]
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        quantity: Option<String>,
    },

    /// Delete a product
    #[command(alias = "rm", display_order = 5)]
    Delete {
        id: i64,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Start an interactive session
    #[command(display_order = 10)]
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Check that the product service is reachable
    #[command(display_order = 20)]
    Health,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (api-url, timeout, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_flags() {
        let cli = Cli::try_parse_from(["prodtrac", "ls", "-f", "pen", "-s", "price", "--desc"])
            .unwrap();
        match cli.command {
            Some(Commands::Products(ProductCommands::List { filter, sort, desc })) => {
                assert_eq!(filter.as_deref(), Some("pen"));
                assert_eq!(sort, Some(SortField::Price));
                assert!(desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort_field() {
        assert!(Cli::try_parse_from(["prodtrac", "list", "--sort", "colour"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "prodtrac",
            "rm",
            "3",
            "-y",
            "--api-url",
            "http://inventory:9000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://inventory:9000"));
        assert!(matches!(
            cli.command,
            Some(Commands::Products(ProductCommands::Delete { id: 3, yes: true }))
        ));
    }

    #[test]
    fn grouped_help_lists_every_command() {
        let help = get_grouped_help();
        for name in ["list", "show", "add", "update", "delete", "shell", "health", "config"] {
            assert!(help.contains(&format!("  {:<12}", name)), "missing {}", name);
        }
    }
}
