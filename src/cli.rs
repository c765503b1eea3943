use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "clipbridge",
    about = "Sync a remote session's clipboard with the system clipboard"
)]
pub struct Cli {
    /// Host only allows clipboard writes during a user gesture
    #[arg(long)]
    pub gesture_restricted: bool,

    /// xclip-compatible program used for the system clipboard
    #[arg(long, default_value = "xclip")]
    pub xclip: String,

    /// Use an in-process clipboard instead of xclip
    #[arg(long)]
    pub memory: bool,

    /// Simulate a host without any clipboard API
    #[arg(long)]
    pub no_clipboard: bool,

    /// Simulate a host without a permission query facility
    #[arg(long, conflicts_with_all = ["deny_read", "deny_write"])]
    pub no_permissions: bool,

    /// Answer clipboard-read permission queries with "denied"
    #[arg(long)]
    pub deny_read: bool,

    /// Answer clipboard-write permission queries with "denied"
    #[arg(long)]
    pub deny_write: bool,
}
