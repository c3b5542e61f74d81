//! Review listing command handler

use std::sync::Arc;

use crate::clients::nlu::NluClient;
use crate::config::Config;
use crate::services::ReviewService;
use crate::state::build_shared_http_client;

pub async fn cmd_list_reviews(config: &Config, dealer_id: i64) -> anyhow::Result<()> {
    let client = build_shared_http_client(config.dealerships.request_timeout_seconds)?;
    let sentiment = Arc::new(NluClient::new(client.clone(), config.nlu.clone()));
    let service = ReviewService::new(client, config.dealerships.reviews_url.clone(), sentiment);

    let reviews = service.list_reviews_for_dealer(dealer_id).await?;

    if reviews.is_empty() {
        println!("No reviews for dealer {dealer_id}.");
        return Ok(());
    }

    println!("Reviews for dealer {} ({} total)", dealer_id, reviews.len());
    println!("{:-<70}", "");

    for review in &reviews {
        let indicator = match review.sentiment.as_str() {
            "positive" => "+",
            "negative" => "-",
            _ => "~",
        };

        println!("{indicator} {review}");

        if let Some(vehicle) = &review.vehicle {
            println!(
                "  Purchased {} {} {} on {}",
                vehicle.car_year, vehicle.car_make, vehicle.car_model, vehicle.purchase_date
            );
        }
        println!("  Sentiment: {}", review.sentiment);
    }

    Ok(())
}
