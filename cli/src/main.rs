//! `xcp420` entry point.
//!
//! Plain-text board over the Counterparty fairminter API: list campaigns
//! with their XCP-420 compliance badge, inspect one campaign, or print the
//! block height and price quotes the board is working from.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Parser;
use clap::Subcommand;
use xcp420_backend_client::BlockHeightTracker;
use xcp420_backend_client::CounterpartyClient;
use xcp420_backend_client::DEFAULT_API_BASE;
use xcp420_backend_client::PriceFeed;
use xcp420_backend_client::xcp_usd_price;
use xcp420_cli::board_line;
use xcp420_cli::detail_view;
use xcp420_cli::fee_line;
use xcp420_cli::mempool_line;
use xcp420_cli::on_board;
use xcp420_format::format_price;
use xcp420_models::StatusFilter;

#[derive(Parser)]
#[command(name = "xcp420", about = "Board for XCP-420 fairminter campaigns", version)]
struct Cli {
    /// Counterparty API base URL.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List campaigns with their compliance badge.
    Board {
        /// Lifecycle filter: all, open, closed, pending.
        #[arg(long, default_value = "open")]
        status: String,
        /// Only campaigns that grade strict or loose.
        #[arg(long)]
        standard: bool,
        /// Only campaigns matching the 420/1000 XCP burn spec.
        #[arg(long)]
        burn_spec: bool,
    },
    /// Show one campaign and its recorded mints.
    Show { tx_hash: String },
    /// List fairmints currently waiting in the mempool.
    Mempool {
        /// Maximum number of events to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Print the reconciled current block height.
    Height,
    /// Print the cached price quotes.
    Prices,
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CounterpartyClient::new(cli.api_base.as_str());

    match cli.command {
        Command::Board {
            status,
            standard,
            burn_spec,
        } => {
            let status: StatusFilter = status.parse().map_err(anyhow::Error::msg)?;
            let tracker = BlockHeightTracker::new();
            let feed = PriceFeed::new();
            let (minters, height, quotes) =
                tokio::join!(client.fairminters(status), tracker.current(), feed.quotes());
            let now = now_unix();
            for minter in minters? {
                if !on_board(&minter, standard, burn_spec) {
                    continue;
                }
                println!("{}", board_line(&minter, height as i64, &quotes, now));
            }
        }
        Command::Mempool { limit } => {
            for event in client.mempool_fairmints(limit).await? {
                println!("{}", mempool_line(&event));
            }
        }
        Command::Show { tx_hash } => {
            let tracker = BlockHeightTracker::new();
            let feed = PriceFeed::new();
            let (minter, page, height, quotes) = tokio::join!(
                client.fairminter(&tx_hash),
                client.fairmints_for(&tx_hash),
                tracker.current(),
                feed.quotes(),
            );
            print!(
                "{}",
                detail_view(&minter?, &page?, height as i64, &quotes, now_unix())
            );
        }
        Command::Height => {
            println!("{}", BlockHeightTracker::new().current().await);
        }
        Command::Prices => {
            let quotes = PriceFeed::new().quotes().await;
            println!("XCP/BTC   {}", quotes.xcp_btc);
            println!("BTC/USD   {}", quotes.btc_usd);
            println!(
                "XCP/USD   {}",
                format_price(xcp_usd_price(1.0, quotes.xcp_btc, quotes.btc_usd))
            );
            println!("fee rate  {} sat/vB", quotes.btc_fee_rate);
            println!("{}", fee_line(&quotes));
        }
    }

    Ok(())
}
