use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

use staybook_cli::seeder;
use staybook_config::DatabaseConfig;
use staybook_db::{init_db_pool, run_migrations};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "staybook-cli")]
#[command(about = "Staybook CLI - Administrative tools for Staybook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a bookable room
    CreateRoom {
        /// Display name of the room
        #[arg(short = 'n', long)]
        name: String,

        /// Price of one night, in whole currency units
        #[arg(short = 'p', long)]
        price: i64,
    },
    /// Create a guest account
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake rooms
    SeedRooms {
        /// Number of rooms to create
        #[arg(short = 'c', long, default_value = "25")]
        count: usize,
    },
    /// Delete rooms that have no bookings
    ClearRooms,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    let mut db_config = DatabaseConfig::from_env()?;
    db_config.max_connections = 5;
    let pool = init_db_pool(&db_config).await?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateRoom { name, price } => {
            let id = seeder::create_room(&pool, &name, price).await?;
            println!("✅ Room created");
            println!("   Id: {}", id);
            println!("   Name: {}", name);
            println!("   Price per night: {}", price);
        }
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_user(&pool, first_name, last_name, email, password).await?,
        Commands::SeedRooms { count } => {
            let ids = seeder::seed_rooms(&pool, count).await?;
            println!("✅ Created {} rooms", ids.len());
        }
        Commands::ClearRooms => {
            seeder::clear_rooms(&pool).await?;
        }
    }

    Ok(())
}

async fn handle_create_user(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> CliResult {
    let first_name = match first_name {
        Some(v) => v,
        None => Input::new().with_prompt("First name").interact_text()?,
    };

    let last_name = match last_name {
        Some(v) => v,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };

    let email = match email {
        Some(v) => v,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(v) => v,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user_id = seeder::create_user(pool, &first_name, &last_name, &email, &password).await?;

    println!("\n✅ User created successfully!");
    println!("   Id: {}", user_id);
    println!("   Email: {}", email);
    println!("   Name: {} {}", first_name, last_name);

    Ok(())
}
