use clap::{Args, Subcommand};
use uuid::Uuid;

use till_app::{
    database::{self, Db},
    domain::orders::{
        OrdersService, PgOrdersService,
        models::{OrderStatus, OrderUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Move an order's status one step forward
    Advance(AdvanceOrderArgs),
}

#[derive(Debug, Args)]
struct AdvanceOrderArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    #[arg(long)]
    order_uuid: Uuid,

    /// Target status: paid or shipped
    #[arg(long)]
    to: String,
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Advance(args) => advance(args).await,
    }
}

async fn advance(args: AdvanceOrderArgs) -> Result<(), String> {
    let to = args
        .to
        .parse::<OrderStatus>()
        .map_err(|error| error.to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));

    service
        .advance_status(OrderUuid::from_uuid(args.order_uuid), to)
        .await
        .map_err(|error| format!("failed to advance order: {error}"))?;

    println!("order_uuid: {}", args.order_uuid);
    println!("status: {}", to.as_str());

    Ok(())
}
