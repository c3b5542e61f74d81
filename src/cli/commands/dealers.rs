//! Dealer listing command handlers

use crate::config::Config;
use crate::models::dealer::CarDealer;
use crate::services::DealerDirectory;
use crate::state::build_shared_http_client;

fn directory(config: &Config) -> anyhow::Result<DealerDirectory> {
    let client = build_shared_http_client(config.dealerships.request_timeout_seconds)?;
    Ok(DealerDirectory::new(
        client,
        config.dealerships.dealers_url.clone(),
    ))
}

pub async fn cmd_list_dealers(config: &Config, state: Option<&str>) -> anyhow::Result<()> {
    let directory = directory(config)?;

    let dealers = match state {
        Some(state) => directory.list_dealers_by_state(state).await?,
        None => directory.list_dealers().await?,
    };

    if dealers.is_empty() {
        match state {
            Some(state) => println!("No dealers found in {state}."),
            None => println!("No dealers found."),
        }
        return Ok(());
    }

    println!("Dealers ({} total)", dealers.len());
    println!("{:-<70}", "");

    for dealer in &dealers {
        print_dealer_line(dealer);
    }

    Ok(())
}

pub async fn cmd_dealer_info(config: &Config, id: i64) -> anyhow::Result<()> {
    let directory = directory(config)?;

    let Some(dealer) = directory.get_dealer_by_id(id).await? else {
        println!("Dealer {id} not found.");
        return Ok(());
    };

    println!("{dealer}");
    println!("{:-<70}", "");
    println!("  ID:      {}", dealer.id);
    println!("  Short:   {}", dealer.short_name);
    println!("  Address: {}", dealer.address);
    println!("  City:    {}, {} {}", dealer.city, dealer.st, dealer.zip);
    println!("  Coords:  {:.4}, {:.4}", dealer.lat, dealer.long);

    Ok(())
}

fn print_dealer_line(dealer: &CarDealer) {
    println!("• {dealer}");
    println!("  ID: {} | {} | {}", dealer.id, dealer.address, dealer.city);
}
