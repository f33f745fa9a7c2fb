use crate::config::Credentials;
use crate::error::Result;
use crate::services::{DiscogsApi, DiscogsClient};

pub fn run(username: Option<String>, token: Option<String>) {
    let credentials = match Credentials::resolve(username, token) {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    let outcome: Result<()> = runtime.block_on(async {
        let client = DiscogsClient::new(&credentials.token)?;
        let value = client.collection_value(&credentials.username).await?;

        println!("💰 Collection value for \"{}\"", credentials.username);
        println!("   Minimum: {}", value.minimum);
        println!("   Median:  {}", value.median);
        println!("   Maximum: {}", value.maximum);
        Ok(())
    });

    if let Err(e) = outcome {
        eprintln!("❌ Error fetching collection value: {}", e);
        std::process::exit(1);
    }
}
