//! Clap derive structures for the `cgxeasy` CLI.
//!
//! Defines the command tree, global flags, and the shared element-target
//! arguments used by every per-element subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cgxeasy -- reconcile SD-WAN controller objects from the command line
#[derive(Debug, Parser)]
#[command(
    name = "cgxeasy",
    version,
    about = "Idempotent SD-WAN controller automation",
    long_about = "Resolve sites, elements and interfaces by name and bring DHCP pools,\n\
        relays, tags, security zones, SNMP users, prefix lists and site tunnels\n\
        to the requested state with one write per change.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "CGX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "CGX_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// API auth token (overrides profile and keyring)
    #[arg(long, env = "CGX_AUTH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CGX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CGX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CGX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sites
    Sites(SitesArgs),

    /// List elements (ION devices)
    #[command(alias = "el")]
    Elements(ElementsArgs),

    /// Manage DHCP server pools and their custom options
    Dhcp(DhcpArgs),

    /// Manage interface relays, tags, zones and sub-interfaces
    #[command(alias = "if")]
    Interface(InterfaceArgs),

    /// Manage SNMPv3 users on element agents
    Snmp(SnmpArgs),

    /// Upsert global and site-local prefix lists
    Prefix(PrefixArgs),

    /// Create site-to-site tunnels
    Tunnel(TunnelArgs),

    /// Run line commands interactively or from a script
    Shell(ShellArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Element Targets ──────────────────────────────────────────────────

/// Exactly one way of choosing the elements a command applies to.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ElementTargetArgs {
    /// Element name
    #[arg(long, short = 'e')]
    pub element: Option<String>,

    /// File with one element name per line
    #[arg(long)]
    pub elements_file: Option<PathBuf>,

    /// Regular expression matched against element names
    #[arg(long)]
    pub element_match: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES / ELEMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List all sites
    #[command(alias = "ls")]
    List {
        /// Only sites whose name matches this regular expression
        #[arg(long, short = 'm')]
        matching: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ElementsArgs {
    #[command(subcommand)]
    pub command: ElementsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ElementsCommand {
    /// List all elements
    #[command(alias = "ls")]
    List {
        /// Only elements whose name matches this regular expression
        #[arg(long, short = 'm')]
        matching: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DHCP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DhcpArgs {
    #[command(subcommand)]
    pub command: DhcpCommand,
}

#[derive(Debug, Subcommand)]
pub enum DhcpCommand {
    /// Delete the pool serving a subnet
    #[command(alias = "rm")]
    Delete {
        /// Site name
        #[arg(long, short = 's')]
        site: String,

        /// Pool subnet (e.g. 192.168.0.0/24)
        #[arg(long)]
        subnet: String,
    },

    /// Add a custom option to a pool
    OptionAdd {
        #[arg(long, short = 's')]
        site: String,

        #[arg(long)]
        subnet: String,

        /// Option name as declared in the definition
        #[arg(long)]
        name: String,

        /// Full definition, e.g. "option tftp-server code 150 = ip-address;"
        #[arg(long)]
        definition: String,

        /// Option value
        #[arg(long)]
        value: String,

        /// Vendor class identifier
        #[arg(long)]
        vendor_class: Option<String>,
    },

    /// Remove a custom option from a pool
    OptionRemove {
        #[arg(long, short = 's')]
        site: String,

        #[arg(long)]
        subnet: String,

        /// Option name
        #[arg(long)]
        name: String,

        /// Only remove the option carrying this vendor class
        #[arg(long)]
        vendor_class: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INTERFACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InterfaceArgs {
    #[command(subcommand)]
    pub command: InterfaceCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfaceCommand {
    /// Add a DHCP relay server to an interface
    RelayAdd {
        #[command(flatten)]
        target: ElementTargetArgs,

        /// Interface name
        #[arg(long, short = 'i')]
        interface: String,

        /// Relay server IP address
        #[arg(long)]
        server: String,
    },

    /// Remove a DHCP relay server from an interface
    RelayRemove {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'i')]
        interface: String,

        #[arg(long)]
        server: String,
    },

    /// Tag an interface
    TagAdd {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'i')]
        interface: String,

        #[arg(long, short = 't')]
        tag: String,
    },

    /// Remove a tag from an interface
    TagRemove {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'i')]
        interface: String,

        #[arg(long, short = 't')]
        tag: String,
    },

    /// Bind an interface to a security zone, moving it out of any other
    ZoneSet {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'i')]
        interface: String,

        /// Security zone name
        #[arg(long, short = 'z')]
        zone: String,
    },

    /// Remove an interface from its security zone
    ZoneClear {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'i')]
        interface: String,
    },

    /// Create a VLAN sub-interface
    SubCreate {
        #[command(flatten)]
        target: ElementTargetArgs,

        /// Parent interface name
        #[arg(long)]
        parent: String,

        /// VLAN id (1-4094)
        #[arg(long)]
        vlan: u16,

        /// Interface role (defaults to lan)
        #[arg(long)]
        used_for: Option<String>,
    },

    /// Delete a sub-interface
    SubDelete {
        #[command(flatten)]
        target: ElementTargetArgs,

        /// Sub-interface name (e.g. 1.100)
        #[arg(long, short = 'i')]
        interface: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SNMP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SnmpArgs {
    #[command(subcommand)]
    pub command: SnmpCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnmpCommand {
    /// Create or update an SNMPv3 user
    UserSet {
        #[command(flatten)]
        target: ElementTargetArgs,

        /// User name
        #[arg(long, short = 'u')]
        user: String,

        /// Security level (noauth, auth, private)
        #[arg(long)]
        security_level: Option<String>,

        /// Authentication algorithm (md5, sha)
        #[arg(long)]
        auth_type: Option<String>,

        /// Authentication passphrase (prompted when omitted with --auth-type)
        #[arg(long)]
        auth_phrase: Option<String>,

        /// Privacy algorithm (des, aes)
        #[arg(long)]
        enc_type: Option<String>,

        /// Privacy passphrase (prompted when omitted with --enc-type)
        #[arg(long)]
        enc_phrase: Option<String>,

        /// SNMP engine id
        #[arg(long)]
        engine_id: Option<String>,
    },

    /// Remove an SNMPv3 user
    UserRemove {
        #[command(flatten)]
        target: ElementTargetArgs,

        #[arg(long, short = 'u')]
        user: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PREFIX LISTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PrefixArgs {
    #[command(subcommand)]
    pub command: PrefixCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefixCommand {
    /// Merge prefixes into a tenant-wide prefix list
    GlobalSet {
        /// Prefix list name
        #[arg(long, short = 'n')]
        name: String,

        /// Prefixes to add (comma-separated or repeated)
        #[arg(long, value_delimiter = ',', required = true)]
        prefixes: Vec<String>,
    },

    /// Merge prefixes into a site-local prefix list
    LocalSet {
        #[command(flatten)]
        sites: SiteTargetArgs,

        #[arg(long, short = 'n')]
        name: String,

        #[arg(long, value_delimiter = ',', required = true)]
        prefixes: Vec<String>,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SiteTargetArgs {
    /// Site name
    #[arg(long, short = 's')]
    pub site: Option<String>,

    /// Regular expression matched against site names
    #[arg(long)]
    pub site_match: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TUNNELS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TunnelArgs {
    #[command(subcommand)]
    pub command: TunnelCommand,
}

#[derive(Debug, Subcommand)]
pub enum TunnelCommand {
    /// Link every WAN interface pair shared by two sites
    Create {
        /// First site name
        site_a: String,

        /// Second site name
        site_b: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHELL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Run the commands in this file instead of reading stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Stop at the first command that reports a failure
    #[arg(long)]
    pub fail_fast: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Store the active profile's auth token in the system keyring
    SetToken,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
