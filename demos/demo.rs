//! Lists the accounts reachable with `MAILTRAP_API_TOKEN` and the accesses on the first one.
//!
//! ```sh
//! MAILTRAP_API_TOKEN=... RUST_LOG=mailtrap_client=debug cargo run --example demo
//! ```

use mailtrap_client::ClientBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::from_env().build()?;

    let accounts = client.accounts().list().await?;
    for account in &accounts {
        println!("Account {}: {}", account.id, account.name);
    }

    let Some(first) = accounts.first() else {
        println!("No accounts available for this token");
        return Ok(());
    };

    for access in client.account(first.id).accesses().list().await? {
        let holder = access
            .specifier
            .email
            .or(access.specifier.name)
            .unwrap_or_else(|| access.specifier.id.to_string());
        println!("  {} {holder}", access.specifier_type);
        for resource in &access.resources {
            println!(
                "    {} {}: {}",
                resource.resource_type, resource.resource_id, resource.access_level
            );
        }
    }

    Ok(())
}
