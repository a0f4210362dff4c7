mod app;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quicklp::domain::lp::{LpMode, PartialLpConfig};

#[derive(Parser, Debug)]
#[command(version, about = "One-shot Meteora DLMM liquidity positions on Solana")]
struct Args {
    /// Path to config file (defaults to QuickLp.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// RPC endpoint URL (overrides config)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Path to keypair file used for signing (overrides config)
    #[arg(long, global = true)]
    keypair: Option<String>,

    /// Market data API base URL (overrides config)
    #[arg(long, global = true)]
    market_data_url: Option<String>,

    /// Transaction builder API base URL (overrides config)
    #[arg(long, global = true)]
    tx_builder_url: Option<String>,

    /// Await confirmation for versioned transactions too
    #[arg(long, global = true)]
    always_confirm: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct LpOverrides {
    /// Bin step in basis points
    #[arg(long, allow_negative_numbers = true)]
    bin_step: Option<i64>,

    /// Lower bound of the price range
    #[arg(long)]
    min_price: Option<String>,

    /// Upper bound of the price range
    #[arg(long)]
    max_price: Option<String>,

    /// zap or normal
    #[arg(long)]
    mode: Option<String>,
}

impl From<LpOverrides> for PartialLpConfig {
    fn from(o: LpOverrides) -> Self {
        PartialLpConfig {
            bin_step: o.bin_step,
            min_price: o.min_price,
            max_price: o.max_price,
            mode: o.mode,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List trending quote-denominated pools
    Pools {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single pool
    Pool { address: String },
    /// Validate LP parameters and optionally a wallet address
    Validate {
        #[arg(long)]
        wallet: Option<String>,
        #[command(flatten)]
        lp: LpOverrides,
    },
    /// Check a wallet's SOL balance against a minimum
    Balance {
        address: String,
        #[arg(long)]
        required_sol: Option<f64>,
    },
    /// Print the preset LP configurations
    Presets,
    /// Create a position: build, sign and submit its transactions
    Create {
        /// Token X mint or well-known symbol (SOL, USDC, ...)
        token_x: String,
        /// Token Y mint or well-known symbol
        token_y: String,
        /// Position owner; defaults to the configured keypair
        #[arg(long)]
        wallet: Option<String>,
        #[command(flatten)]
        lp: LpOverrides,
        /// Shorthand for --mode zap
        #[arg(long, conflicts_with = "mode")]
        zap: bool,
        /// Start from the pair's recommended preset
        #[arg(long)]
        recommended: bool,
        #[arg(long)]
        skip_balance_check: bool,
        /// Approve every wallet prompt without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Create AppCfg with priority: CLI args > Config file > Defaults
    let mut app_cfg = app::AppCfg::from_config(app::load_config(args.config.as_deref())?);

    if let Some(rpc_url) = args.rpc_url {
        app_cfg.config.rpc.url = rpc_url;
    }
    if let Some(keypair) = args.keypair {
        app_cfg.config.wallet.keypair = Some(keypair);
    }
    if let Some(url) = args.market_data_url {
        app_cfg.config.api.market_data_url = url;
    }
    if let Some(url) = args.tx_builder_url {
        app_cfg.config.api.tx_builder_url = url;
    }
    if args.always_confirm {
        app_cfg.config.signer.always_confirm = true;
    }

    let command = match args.command {
        Commands::Pools { page, limit, json } => {
            app_cfg.json = json;
            app::Command::Pools { page, limit }
        }
        Commands::Pool { address } => app::Command::Pool { address },
        Commands::Validate { wallet, lp } => app::Command::Validate {
            wallet,
            overrides: lp.into(),
        },
        Commands::Balance {
            address,
            required_sol,
        } => app::Command::Balance {
            address,
            required_sol,
        },
        Commands::Presets => app::Command::Presets,
        Commands::Create {
            token_x,
            token_y,
            wallet,
            lp,
            zap,
            recommended,
            skip_balance_check,
            yes,
        } => {
            app_cfg.assume_yes = yes;
            let mut overrides: PartialLpConfig = lp.into();
            if zap {
                overrides.mode = Some(LpMode::Zap.to_string());
            }
            app::Command::Create {
                token_x,
                token_y,
                wallet,
                overrides,
                recommended,
                skip_balance_check,
            }
        }
    };

    app::run(app_cfg, command).await
}
