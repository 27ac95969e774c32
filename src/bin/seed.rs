//! Seed script for development — creates the initial admin account and a few
//! sample departments.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` environment variables (reads .env).

use sqlx::PgPool;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== orgadmin seed script ===");

    seed_admin_user(&pool).await?;
    seed_departments(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: {ADMIN_EMAIL} / {ADMIN_PASSWORD}");
    println!("Remember to change these credentials in production.");

    Ok(())
}

async fn seed_admin_user(pool: &PgPool) -> anyhow::Result<()> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = 'admin')",
    )
    .bind(ADMIN_EMAIL)
    .fetch_one(pool)
    .await?;

    if exists {
        println!("[skip] Admin user already exists");
        return Ok(());
    }

    let hash = orgadmin::services::auth::hash_password(ADMIN_PASSWORD)?;
    sqlx::query(
        "INSERT INTO users (name, email, username, password_hash, role)
         VALUES ('Administrator', $1, 'admin', $2, 'admin')",
    )
    .bind(ADMIN_EMAIL)
    .bind(&hash)
    .execute(pool)
    .await?;

    println!("[done] Created admin user");
    Ok(())
}

async fn seed_departments(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Departments already present");
        return Ok(());
    }

    for (name, description) in [
        ("Engineering", "Product development and infrastructure"),
        ("Operations", "Day-to-day business operations"),
        ("Human Resources", "Hiring, onboarding, and people care"),
    ] {
        sqlx::query("INSERT INTO departments (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }

    println!("[done] Created sample departments");
    Ok(())
}
