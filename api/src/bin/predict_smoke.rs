//! Posts the reference payload to a running server and prints what comes back.
//!
//! Usage: `predict_smoke [URL]`, defaulting to the local `/predict` endpoint.

use clap::Parser;
use crop_balance_api::schema::PredictRequest;

const DEFAULT_URL: &str = "http://127.0.0.1:8000/predict";

#[derive(Debug, Parser)]
#[command(name = "predict_smoke")]
#[command(about = "Send the reference payload to a running /predict endpoint")]
struct SmokeArgs {
    #[arg(default_value = DEFAULT_URL, help = "Full URL of the predict endpoint")]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let SmokeArgs { url } = SmokeArgs::parse();

    let payload = PredictRequest {
        year: 2024,
        area: 10.0,
        production: 1000.0,
        yield_per_ha: 5.0,
        fertilizer: 50.0,
        irrigation: 20.0,
        crop: "Rice".to_string(),
        season: "kharif".to_string(),
    };

    tracing::debug!("POST {}", url);
    match reqwest::Client::new().post(&url).json(&payload).send().await {
        Ok(response) => {
            println!("Status Code: {}", response.status().as_u16());
            match response.json::<serde_json::Value>().await {
                Ok(body) => println!("Response: {}", body),
                Err(e) => println!("Error: {}", e),
            }
        }
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}
