use std::time::Instant;

use chrono::Days;
use tracing_subscriber::EnvFilter;

use tradingdays::configuration::CalendarConfiguration;
use tradingdays::time::epoch::utc_now;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional first argument: path to a calendar configuration JSON.
    let config = match std::env::args().nth(1) {
        Some(path) => match CalendarConfiguration::from_reader(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{path}: {error}");
                std::process::exit(1);
            }
        },
        None => CalendarConfiguration::default()
    };
    let calendar = config.build();

    let now = utc_now();
    let now30 = now + Days::new(30);

    // Trading days over the next month, excluding the configured holidays.
    for day in calendar.trading_days(now, now30, false) {
        println!("{day}");
    }

    // The second pass over the same window is served from the cache.
    let tic = Instant::now();
    for day in calendar.trading_days(now, now30, false) {
        println!("{day}");
    }
    println!("{:?}", tic.elapsed());
    println!("{}", calendar.cache_stats());
}
