// Foundation CMS connection check
//
// Verifies the external services the server depends on:
// - PostgreSQL at DATABASE_URL (reports user and document counts)
// - Cloudinary, when credentials are set (uploads a 1x1 PNG and deletes it)

use std::env;

use bytes::Bytes;
use foundation_cms::backend::extract::UploadedFile;
use foundation_cms::backend::media::{CloudinaryClient, MediaHost};
use foundation_cms::shared::config::MediaConfig;
use sqlx::postgres::PgPoolOptions;

/// Smallest valid PNG: one transparent pixel
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

async fn check_database(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔗 Testing database connection...");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(database_url)
        .await?;
    println!("✅ Database connection successful!");

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    println!("👤 Users: {}", users);

    let collections: Vec<(String, i64)> = sqlx::query_as(
        "SELECT collection, COUNT(*) FROM documents GROUP BY collection ORDER BY collection",
    )
    .fetch_all(&pool)
    .await?;

    println!("📋 Documents:");
    if collections.is_empty() {
        println!("  (none)");
    }
    for (collection, count) in collections {
        println!("  - {}: {}", collection, count);
    }

    pool.close().await;
    Ok(())
}

async fn check_media(config: MediaConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔗 Testing Cloudinary ({})...", config.cloud_name);
    let client = CloudinaryClient::new(config);

    let asset = client
        .upload(UploadedFile {
            file_name: Some("connection-check.png".into()),
            content_type: Some("image/png".into()),
            bytes: Bytes::from_static(PIXEL_PNG),
        })
        .await?;
    println!("✅ Upload successful: {}", asset.url);

    client.destroy(&asset.public_id, asset.kind).await?;
    println!("🧹 Test asset {} deleted", asset.public_id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut failed = false;

    match var("DATABASE_URL") {
        Some(url) => {
            if let Err(e) = check_database(&url).await {
                println!("❌ Database check failed: {}", e);
                failed = true;
            }
        }
        None => println!("⚠️  DATABASE_URL not set; the server would use in-memory stores"),
    }

    match (
        var("CLOUDINARY_CLOUD_NAME"),
        var("CLOUDINARY_API_KEY"),
        var("CLOUDINARY_API_SECRET"),
    ) {
        (Some(cloud), Some(key), Some(secret)) => {
            let mut config = MediaConfig::new(cloud, key, secret);
            if let Some(base) = var("CLOUDINARY_API_BASE") {
                config = config.with_api_base(base);
            }
            if let Err(e) = check_media(config).await {
                println!("❌ Cloudinary check failed: {}", e);
                failed = true;
            }
        }
        _ => println!("⚠️  Cloudinary credentials not set; uploads are disabled"),
    }

    if failed {
        std::process::exit(1);
    }
    println!("🎉 All configured services reachable");
    Ok(())
}
