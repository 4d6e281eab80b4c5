use std::error::Error;

use api_types::category::CategoryKind;
use api_types::transaction::TransactionRequest;
use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use finanzas_client::{
    AccountStore, ApiClient, AuthStore, BalanceStore, CategoryStore, CollectionState, Session,
    TransactionStore,
};

mod settings;

#[derive(Parser, Debug)]
#[command(name = "finanzas")]
#[command(about = "Personal-finance API client (accounts, categories, transactions)")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the login email.
    #[arg(long)]
    email: Option<String>,
    /// Account password (never echoed; preferably set via env).
    #[arg(long, env = "FINANZAS_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new user, then sign in.
    Register(RegisterArgs),
    Accounts(Accounts),
    Categories(Categories),
    Transactions(Transactions),
    /// Monthly income/expense totals.
    Balance(BalanceArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Accounts {
    #[command(subcommand)]
    command: AccountCommand,
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        /// Opening balance in minor units (cents).
        #[arg(long)]
        opening_balance_minor: Option<i64>,
    },
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        balance_minor: i64,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug)]
struct Categories {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for CategoryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => CategoryKind::Income,
            KindArg::Expense => CategoryKind::Expense,
        }
    }
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug)]
struct Transactions {
    #[command(subcommand)]
    command: TransactionCommand,
}

#[derive(Args, Debug)]
struct TransactionFields {
    #[arg(long)]
    account: String,
    /// Amount in minor units (cents).
    #[arg(long)]
    amount_minor: i64,
    #[arg(long, default_value = "")]
    note: String,
    #[arg(long)]
    category: String,
    /// RFC3339 timestamp; defaults to now.
    #[arg(long)]
    at: Option<String>,
}

#[derive(Subcommand, Debug)]
enum TransactionCommand {
    List {
        /// Restrict to one account.
        #[arg(long)]
        account: Option<String>,
    },
    Income(TransactionFields),
    Expense(TransactionFields),
    Edit {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: TransactionFields,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug)]
struct BalanceArgs {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
}

type MainResult = Result<(), Box<dyn Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "finanzas_client=warn".to_string()),
        )
        .init();

    let settings = settings::load(cli.config.as_deref(), cli.base_url, cli.email)?;
    let session = Session::new();
    let api = ApiClient::with_base_url(&settings.base_url);
    let auth = AuthStore::new(api.clone(), session.clone());

    if let Command::Register(args) = &cli.command {
        auth.register(&args.name, &settings.email, &cli.password)
            .await;
        let state = auth.snapshot();
        if let Some(message) = state.error_message {
            return Err(message.into());
        }
        println!("registered and signed in as {}", settings.email);
        return Ok(());
    }

    auth.login(&settings.email, &cli.password).await;
    let state = auth.snapshot();
    if let Some(message) = state.error_message {
        return Err(message.into());
    }
    tracing::debug!(user_id = ?state.user_id, "signed in");

    match cli.command {
        Command::Register(_) => unreachable!("handled above"),
        Command::Accounts(accounts) => {
            let store = AccountStore::new(api, session);
            match accounts.command {
                AccountCommand::List => store.load().await,
                AccountCommand::Create {
                    name,
                    opening_balance_minor,
                } => store.create(name, opening_balance_minor).await,
                AccountCommand::Update {
                    id,
                    name,
                    balance_minor,
                } => store.update(&id, name, balance_minor).await,
                AccountCommand::Delete { id } => store.delete(&id).await,
            }
            report(&store.snapshot())
        }
        Command::Categories(categories) => {
            let store = CategoryStore::new(api, session);
            match categories.command {
                CategoryCommand::List => store.load().await,
                CategoryCommand::Create { name, kind } => store.create(name, kind.into()).await,
                CategoryCommand::Delete { id } => store.delete(&id).await,
            }
            report(&store.snapshot())
        }
        Command::Transactions(transactions) => {
            let store = TransactionStore::new(api, session);
            match transactions.command {
                TransactionCommand::List { account } => store.load(account.as_deref()).await,
                TransactionCommand::Income(fields) => store.add_income(request_from(fields)?).await,
                TransactionCommand::Expense(fields) => {
                    store.add_expense(request_from(fields)?).await
                }
                TransactionCommand::Edit { id, fields } => {
                    store.edit(&id, request_from(fields)?).await
                }
                TransactionCommand::Delete { id } => store.delete(&id).await,
            }
            report(&store.snapshot())
        }
        Command::Balance(args) => {
            let store = BalanceStore::new(api, session);
            store.load_monthly(args.year, args.month).await;
            let state = store.snapshot();
            if let Some(message) = state.error_message {
                return Err(message.into());
            }
            println!("{}", serde_json::to_string_pretty(&state.monthly)?);
            Ok(())
        }
    }
}

fn request_from(fields: TransactionFields) -> Result<TransactionRequest, Box<dyn Error + Send + Sync>> {
    let occurred_at: DateTime<FixedOffset> = match fields.at.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)?,
        None => Local::now().fixed_offset(),
    };
    Ok(TransactionRequest {
        account_id: fields.account,
        amount_minor: fields.amount_minor,
        note: fields.note,
        category_id: fields.category,
        occurred_at,
    })
}

fn report<T: serde::Serialize>(state: &CollectionState<T>) -> MainResult {
    if let Some(message) = &state.error_message {
        return Err(message.clone().into());
    }
    println!("{}", serde_json::to_string_pretty(&state.items)?);
    Ok(())
}
