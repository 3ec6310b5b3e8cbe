#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! CLI for diagnosing mail synchronization across IMAP accounts
//! (read-only)

use std::process::ExitCode;

use clap::Parser;
use imapdiag::scanner;
use imapdiag::{AccountSession, Credentials, MailboxFilter, ScanStore, ServerAddr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_EXCLUDE: &str =
    "(Deleted|Draft|Entw[uü]rf|Gelöscht|Junk|Papierkorb|Spam|Template|Trash|Vorlage)";

#[derive(Parser)]
#[command(name = "imapdiag")]
#[command(about = "Scan IMAP accounts and diagnose mail synchronization problems (read-only)")]
struct Args {
    /// One or more servers as host[:port]; the first is scanned, any
    /// further servers are compared against it
    #[arg(required = true)]
    servers: Vec<String>,

    /// Account user name (falls back to IMAPDIAG_USER)
    #[arg(short, long)]
    user: Option<String>,

    /// Account password (falls back to IMAPDIAG_PASSWORD)
    #[arg(short, long)]
    password: Option<String>,

    /// IMAP search expression selecting the messages to scan
    #[arg(short = 'f', long, default_value = "UNDELETED")]
    search: String,

    /// Regex over mailbox names; matching mailboxes are scanned
    #[arg(short = 'm', long, default_value = "^INBOX$")]
    include: String,

    /// Regex over mailbox names; matching mailboxes are skipped
    #[arg(short = 'x', long, default_value = DEFAULT_EXCLUDE)]
    exclude: String,

    /// Scan store URL (a SQLite path, optionally prefixed sqlite:)
    #[arg(short = 's', long, default_value = ":memory:")]
    db: String,

    /// Drop all existing scan records before scanning
    #[arg(short, long)]
    clear: bool,

    /// Log level when RUST_LOG is unset
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(mismatches) => {
            error!(mismatches, "mismatches detected");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<u64> {
    let creds = Credentials::resolve(args.user.clone(), args.password.clone())?;
    let filter = MailboxFilter::new(&args.exclude, &args.include)?;
    let mut store = ScanStore::open(&args.db, args.clear)?;

    let mut addrs = Vec::new();
    for server in &args.servers {
        addrs.push(ServerAddr::parse(server)?);
    }
    let primary_addr = addrs.remove(0);
    let mut primary = AccountSession::connect(primary_addr, &creds, &args.search)?;

    let total = if addrs.is_empty() {
        scanner::scan_account(&mut primary, &filter, &mut store, None)?
    } else {
        // One primary-vs-peer comparison completes, peer disconnect
        // included, before the next peer is connected.
        let mut total = 0;
        for peer_addr in addrs {
            let mut peer = AccountSession::connect(peer_addr, &creds, &args.search)?;
            total += scanner::scan_account(&mut primary, &filter, &mut store, Some(&mut peer))?;
            peer.disconnect();
        }
        total
    };
    primary.disconnect();

    info!(
        records = store.record_count()?,
        mismatches = total,
        "done"
    );
    Ok(total)
}
