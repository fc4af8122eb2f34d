//! Haven Ledger - Insurance ledger CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haven_core::{Amount, CallContext, Height, Identity};
use haven_ledger::{Genesis, LedgerError, LedgerSettings, LedgerStorage, WalletBalances};

/// Haven Ledger - Decentralized insurance ledger
#[derive(Parser)]
#[command(name = "haven-ledger")]
#[command(about = "Policy, claim, and treasury operations for the Haven insurance ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to ledger storage (overrides the settings file)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new ledger
    Init {
        /// Owner identity (overrides the settings file)
        #[arg(long)]
        owner: Option<String>,

        /// Initial insurance fee
        #[arg(long)]
        fee: Option<Amount>,

        /// Initial claim payout
        #[arg(long)]
        claim_amount: Option<Amount>,

        /// Funds placed in the treasury at deployment
        #[arg(long)]
        initial_treasury: Option<Amount>,
    },

    /// Show ledger status
    Status {
        /// Height used for policy counts
        #[arg(long, default_value = "0")]
        height: Height,
    },

    /// Buy a policy
    Buy {
        /// Buyer identity
        #[arg(long)]
        caller: String,

        /// Current height
        #[arg(long)]
        height: Height,

        /// Buyer's available external funds
        #[arg(long)]
        available: Amount,
    },

    /// File a claim
    Claim {
        /// Policy holder
        #[arg(long)]
        caller: String,

        /// Current height
        #[arg(long)]
        height: Height,
    },

    /// Show a holder's policy
    Policy {
        /// Policy holder
        #[arg(long)]
        holder: String,

        /// Current height
        #[arg(long)]
        height: Height,
    },

    /// Deposit into the treasury
    Fund {
        #[arg(long)]
        caller: String,

        #[arg(long)]
        amount: Amount,

        /// Depositor's available external funds
        #[arg(long)]
        available: Amount,
    },

    /// Change the insurance fee (owner only)
    SetFee {
        #[arg(long)]
        caller: String,

        #[arg(long)]
        fee: Amount,
    },

    /// Change the claim payout (owner only)
    SetClaimAmount {
        #[arg(long)]
        caller: String,

        #[arg(long)]
        amount: Amount,
    },

    /// Withdraw treasury funds (owner only)
    Withdraw {
        #[arg(long)]
        caller: String,

        #[arg(long)]
        amount: Amount,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haven_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Some(LedgerSettings::load(path)?),
        None => None,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.as_ref().map(|s| s.data_dir.clone()))
        .unwrap_or_else(LedgerSettings::default_data_dir);

    let storage = LedgerStorage::new(data_dir.clone())?;

    match cli.command {
        Commands::Init {
            owner,
            fee,
            claim_amount,
            initial_treasury,
        } => {
            let mut genesis = match (owner, settings) {
                (Some(owner), Some(settings)) => Genesis {
                    owner: Identity::new(owner),
                    ..settings.genesis
                },
                (Some(owner), None) => Genesis::new(owner),
                (None, Some(settings)) => settings.genesis,
                (None, None) => {
                    anyhow::bail!("An owner is required: pass --owner or a --config file")
                }
            };
            if let Some(fee) = fee {
                genesis.insurance_fee = fee;
            }
            if let Some(claim_amount) = claim_amount {
                genesis.claim_amount = claim_amount;
            }
            if let Some(initial_treasury) = initial_treasury {
                genesis.initial_treasury = initial_treasury;
            }

            let contract = storage.initialize(genesis)?;
            info!("Ledger state saved to {:?}", data_dir);

            let params = contract.params();
            println!("\n=== Ledger Deployed ===\n");
            println!("Owner:         {}", params.owner);
            println!("Insurance fee: {}", params.insurance_fee);
            println!("Claim amount:  {}", params.claim_amount);
            println!("Treasury:      {}", contract.get_contract_balance());
        }

        Commands::Status { height } => {
            if !storage.has_contract() {
                println!("Ledger not initialized. Run 'haven-ledger init' first.");
                return Ok(());
            }

            let contract = storage.load_contract()?;
            let params = contract.params();
            let counts = contract.registry().count_by_status(height);

            println!("\n=== Ledger Status ===\n");
            println!("Owner:         {}", params.owner);
            println!("Insurance fee: {}", params.insurance_fee);
            println!("Claim amount:  {}", params.claim_amount);
            println!("Treasury:      {}", contract.get_contract_balance());
            println!(
                "  Credited: {}  Debited: {}",
                contract.treasury().total_credited(),
                contract.treasury().total_debited()
            );
            println!("\nPolicies at height {}:", height);
            println!("  Waiting:   {}", counts.waiting);
            println!("  Claimable: {}", counts.claimable);
            println!("  Claimed:   {}", counts.claimed);
            println!("  Expired:   {}", counts.expired);
            if counts.not_yet_active > 0 {
                println!("  Pending:   {}", counts.not_yet_active);
            }
        }

        Commands::Buy {
            caller,
            height,
            available,
        } => {
            let mut contract = storage.load_contract()?;
            let ctx = CallContext::new(caller, height);
            let funds = WalletBalances::new().with(ctx.caller.clone(), available);

            contract
                .buy_insurance(&ctx, &funds)
                .map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!(
                "Policy issued to {} at height {} for {}",
                ctx.caller,
                height,
                contract.get_insurance_fee()
            );
        }

        Commands::Claim { caller, height } => {
            let mut contract = storage.load_contract()?;
            let ctx = CallContext::new(caller, height);

            contract.file_claim(&ctx).map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!(
                "Claim paid to {}: {}",
                ctx.caller,
                contract.get_claim_amount()
            );
        }

        Commands::Policy { holder, height } => {
            let contract = storage.load_contract()?;
            let holder = Identity::new(holder);

            match (contract.get_policy(&holder), contract.coverage_report(&holder, height)) {
                (Some(policy), Some(report)) => {
                    println!("\n=== Policy {} ===\n", holder.short());
                    println!("Holder:       {}", policy.holder);
                    println!("Start height: {}", policy.start_height);
                    println!("Expires at:   {}", policy.expires_at());
                    println!("Premium paid: {}", policy.premium_paid);
                    println!("Status:       {}", report.status);
                    println!("\n{}", report.message);
                }
                _ => println!("No policy found for {}", holder),
            }
        }

        Commands::Fund {
            caller,
            amount,
            available,
        } => {
            let mut contract = storage.load_contract()?;
            let caller = Identity::new(caller);
            let funds = WalletBalances::new().with(caller.clone(), available);
            contract
                .fund_treasury(&caller, amount, &funds)
                .map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!("Treasury balance: {}", contract.get_contract_balance());
        }

        Commands::SetFee { caller, fee } => {
            let mut contract = storage.load_contract()?;
            contract
                .update_insurance_fee(&Identity::new(caller), fee)
                .map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!("Insurance fee: {}", contract.get_insurance_fee());
        }

        Commands::SetClaimAmount { caller, amount } => {
            let mut contract = storage.load_contract()?;
            contract
                .update_claim_amount(&Identity::new(caller), amount)
                .map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!("Claim amount: {}", contract.get_claim_amount());
        }

        Commands::Withdraw { caller, amount } => {
            let mut contract = storage.load_contract()?;
            contract
                .withdraw_excess_funds(&Identity::new(caller), amount)
                .map_err(LedgerError::from)?;
            storage.save_contract(&contract)?;

            println!(
                "Withdrew {}; treasury balance: {}",
                amount,
                contract.get_contract_balance()
            );
        }
    }

    Ok(())
}
