use std::{error::Error, sync::Arc};

use api_types::CounterpartyKind;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use client::{AppConfig, CurrencyCatalog, LedgerApi, LedgerClient};
use forms::{FormSite, PaymentForm, Surface};
use fx::Direction;

#[derive(Parser, Debug)]
#[command(name = "partita")]
#[command(about = "Terminal client for the partita ledger API")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported currencies and their rates to base.
    Currencies,
    /// List settlement accounts.
    Accounts,
    /// Show a counterparty and its balance summary.
    Details(DetailsArgs),
    /// Record a payment, collection, or refund.
    Pay(PayArgs),
}

#[derive(Args, Debug)]
struct DetailsArgs {
    /// `customer` or `supplier`.
    #[arg(long)]
    kind: String,
    #[arg(long)]
    id: i64,
}

#[derive(Args, Debug)]
struct PayArgs {
    /// `customer` or `supplier`.
    #[arg(long)]
    kind: String,
    #[arg(long)]
    id: i64,
    /// Amount in the payment currency, always positive; use `--refund`
    /// to flip the direction.
    #[arg(long)]
    amount: String,
    /// Payment currency code; defaults to the counterparty currency.
    #[arg(long)]
    currency: Option<String>,
    /// Settlement account id.
    #[arg(long)]
    account: Option<i64>,
    /// Manual exchange rate override for the settlement pair.
    #[arg(long)]
    rate: Option<String>,
    #[arg(long)]
    refund: bool,
    /// `cash`, `bank` or `card`.
    #[arg(long, default_value = "cash")]
    method: String,
    /// Payment date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

fn parse_kind(raw: &str) -> Result<CounterpartyKind, String> {
    match raw {
        "customer" => Ok(CounterpartyKind::Customer),
        "supplier" => Ok(CounterpartyKind::Supplier),
        other => Err(format!("unknown counterparty kind: {other}")),
    }
}

fn parse_method(raw: &str) -> Result<api_types::payment::PaymentMethod, String> {
    use api_types::payment::PaymentMethod;
    match raw {
        "cash" => Ok(PaymentMethod::Cash),
        "bank" => Ok(PaymentMethod::Bank),
        "card" => Ok(PaymentMethod::Card),
        other => Err(format!("unknown payment method: {other}")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "partita={level},client={level},forms={level}",
            level = config.level
        ))
        .init();

    tracing::debug!("using ledger API at {}", config.base_url);

    let client = LedgerClient::new(&config.base_url)
        .map_err(|err| format!("invalid base url: {err}"))?;
    let catalog = Arc::new(CurrencyCatalog::new());

    match cli.command {
        Command::Currencies => {
            let base = catalog.load_base_currency(&client).await;
            let options = catalog
                .load_currency_options(&client)
                .await
                .map_err(|err| format!("failed to load currencies: {err}"))?;
            let rates = catalog.rates();
            println!("base currency: {base}");
            for (code, label) in options {
                let rate = rates.get(&code).copied().unwrap_or_default();
                println!("{code}  {label}  rate-to-base {rate}");
            }
        }
        Command::Accounts => {
            let accounts = client
                .accounts()
                .await
                .map_err(|err| format!("failed to load accounts: {err}"))?;
            for account in accounts {
                println!(
                    "#{}  {}  {} {:.2}",
                    account.id, account.name, account.currency, account.balance
                );
            }
        }
        Command::Details(args) => {
            let kind = parse_kind(&args.kind)?;
            let counterparty = client
                .counterparty(kind, args.id)
                .await
                .map_err(|err| format!("failed to load counterparty: {err}"))?;
            let details = client
                .counterparty_details(kind, args.id)
                .await
                .map_err(|err| format!("failed to load details: {err}"))?;
            println!(
                "{} (#{}) ledger currency {}",
                counterparty.name, counterparty.id, counterparty.currency
            );
            println!(
                "open balance {:.2}, check balance {:.2}",
                details.open_balance, details.check_balance
            );
        }
        Command::Pay(args) => {
            let kind = parse_kind(&args.kind)?;
            let method = parse_method(&args.method)?;
            let site = FormSite {
                kind,
                surface: Surface::Page,
                supports_account: true,
            };

            let mut form = PaymentForm::new(site, args.id, catalog);
            form.open_new(&client).await?;

            if let Some(date) = args.date {
                form.set_payment_date(date);
            }
            if let Some(currency) = args.currency.as_deref() {
                form.set_payment_currency(currency);
            }
            form.set_account(args.account);
            form.set_amount(&args.amount);
            if args.refund {
                form.set_direction(Direction::Refund);
            }
            form.set_method(method);
            if let Some(notes) = args.notes.as_deref() {
                form.set_notes(notes);
            }
            // A manual rate wins over the auto-resolved one, so apply it
            // last.
            if let Some(rate) = args.rate.as_deref() {
                form.set_rate(rate);
            }

            let fields = form.fields().clone();
            println!(
                "{} {} {} -> {} at rate {} = {}",
                fields.method.as_str(),
                fields.amount,
                fields.payment_currency,
                fields.account_currency,
                fields.rate,
                fields.converted
            );

            form.submit(&client).await?;
            if let Some(summary) = form.summary() {
                println!("recorded; open balance now {:.2}", summary.open_balance);
            } else {
                println!("recorded");
            }
        }
    }

    Ok(())
}
