use crate::config::{Credentials, Currency};
use crate::constants::{ITEM_DELAY_MS, PAGE_SIZE};
use crate::error::Result;
use crate::services::{
    BracketSpec, DiscogsClient, PriceErrorPolicy, RetryPolicy, SortOptions, Sorter,
};
use std::time::Duration;

pub fn run(
    currency: String,
    brackets: String,
    username: Option<String>,
    token: Option<String>,
    on_price_error: String,
    dry_run: bool,
) {
    // Validate everything up front so the run can never die on bad config
    // halfway through the collection.
    let (credentials, options) =
        match prepare(currency, brackets, username, token, on_price_error, dry_run) {
            Ok(prepared) => prepared,
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };

    println!(
        "🎵 Sorting collection of \"{}\" into {} bracket(s) [{}]",
        options.username,
        options.brackets.boundaries().len() + 1,
        options.currency_code
    );

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    let outcome: Result<()> = runtime.block_on(async {
        let client = DiscogsClient::new(&credentials.token)?;
        let sorter = Sorter::new(&client, options).await?;
        sorter.run().await?;
        Ok(())
    });

    if let Err(e) = outcome {
        eprintln!("\n❌ Sort aborted: {}", e);
        eprintln!("   Items already moved stay where they are; rerun to continue.");
        std::process::exit(1);
    }
}

fn prepare(
    currency: String,
    brackets: String,
    username: Option<String>,
    token: Option<String>,
    on_price_error: String,
    dry_run: bool,
) -> Result<(Credentials, SortOptions)> {
    let credentials = Credentials::resolve(username, token)?;
    let currency = Currency::from_code(&currency)?;
    let brackets = BracketSpec::parse(&brackets, &currency.symbol)?;
    let on_price_error = PriceErrorPolicy::from_str(&on_price_error)?;

    let options = SortOptions {
        username: credentials.username.clone(),
        currency_code: currency.code,
        brackets,
        per_page: PAGE_SIZE,
        item_delay: Duration::from_millis(ITEM_DELAY_MS),
        retry: RetryPolicy::default(),
        on_price_error,
        dry_run,
    };

    Ok((credentials, options))
}
