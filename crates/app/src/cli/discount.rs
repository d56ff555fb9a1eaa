use clap::{Args, Subcommand};
use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use till_app::{
    database::{self, Db},
    domain::discounts::{
        DiscountsService, PgDiscountsService,
        models::{DiscountRuleUuid, NewDiscountRule},
    },
};

#[derive(Debug, Args)]
pub(crate) struct DiscountCommand {
    #[command(subcommand)]
    command: DiscountSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountSubcommand {
    Create(CreateDiscountArgs),
}

#[derive(Debug, Args)]
struct CreateDiscountArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Unique discount code, e.g. SAVE10
    #[arg(long)]
    code: String,

    /// Percentage off the subtotal, 0-100 with up to two decimal places
    #[arg(long)]
    percent: String,

    /// Minimum cart quantity recorded on the rule
    #[arg(long)]
    min_quantity: Option<u32>,

    /// Create the rule deactivated
    #[arg(long, default_value_t = false)]
    inactive: bool,

    /// Window start (RFC 3339); requires --ends-at
    #[arg(long)]
    starts_at: Option<String>,

    /// Window end (RFC 3339); requires --starts-at
    #[arg(long)]
    ends_at: Option<String>,

    /// Optional rule UUID; generated when omitted
    #[arg(long)]
    rule_uuid: Option<Uuid>,
}

pub(crate) async fn run(command: DiscountCommand) -> Result<(), String> {
    match command.command {
        DiscountSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateDiscountArgs) -> Result<(), String> {
    let percent = args
        .percent
        .parse::<Decimal>()
        .map_err(|error| format!("invalid percent: {error}"))?;

    let starts_at = parse_timestamp(args.starts_at.as_deref(), "starts-at")?;
    let ends_at = parse_timestamp(args.ends_at.as_deref(), "ends-at")?;

    if starts_at.is_some() != ends_at.is_some() {
        return Err("starts-at and ends-at must be given together".to_string());
    }

    let uuid = args
        .rule_uuid
        .map_or_else(DiscountRuleUuid::new, DiscountRuleUuid::from_uuid);

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgDiscountsService::new(Db::new(pool));

    let rule = service
        .create_rule(NewDiscountRule {
            uuid,
            code: args.code,
            discount_percent: percent,
            min_quantity: args.min_quantity,
            active: !args.inactive,
            starts_at,
            ends_at,
        })
        .await
        .map_err(|error| format!("failed to create discount rule: {error}"))?;

    println!("rule_uuid: {}", rule.uuid);
    println!("code: {}", rule.code);
    println!("discount_percent: {}", rule.discount_percent);
    println!("active: {}", rule.active);

    Ok(())
}

fn parse_timestamp(raw: Option<&str>, flag: &str) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid {flag} timestamp: {error}"))
    })
    .transpose()
}
