use bakelink_app::{
    database,
    domain::owners::{OwnersService, PgOwnersService, data::NewOwner, records::OwnerUuid},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateOwnerArgs {
    /// Bakery display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional owner UUID; generated when omitted
    #[arg(long)]
    owner_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateOwnerArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOwnersService::new(pool);

    let owner = service
        .create_owner(NewOwner {
            uuid: args.owner_uuid.map_or_else(OwnerUuid::new, OwnerUuid::from),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create owner: {error}"))?;

    println!("owner_uuid: {}", owner.uuid);
    println!("owner_name: {}", owner.name);

    Ok(())
}
