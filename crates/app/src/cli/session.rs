use clap::{Args, Subcommand};
use uuid::Uuid;

use till_app::{
    auth::{
        IdentityService, PgIdentityService,
        models::{Role, UserUuid},
    },
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    Create(CreateSessionArgs),
}

#[derive(Debug, Args)]
struct CreateSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID the session belongs to; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,

    /// Session role: customer or staff
    #[arg(long, default_value = "customer")]
    role: String,
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateSessionArgs) -> Result<(), String> {
    let role = args
        .role
        .parse::<Role>()
        .map_err(|error| error.to_string())?;

    let user = args
        .user_uuid
        .map_or_else(UserUuid::new, UserUuid::from_uuid);

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgIdentityService::new(Db::new(pool));

    let issued = service
        .issue_session(user, role)
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    println!("user_uuid: {}", issued.user);
    println!("role: {}", issued.role.as_str());
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
