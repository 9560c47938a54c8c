//! Domain Scout - AI-powered domain name suggestions with availability checking
//!
//! Run `domain-scout serve` for the proxy service, or pass a niche to run
//! the client flow against a running proxy.

use domain_scout::{
    client::{format_price, SuggestionClient},
    gate::AdmissionGate,
    server::{self, AppState},
    types::{CompletionConfig, RegistrarConfig, ServerConfig},
    DomainScoutError, GoDaddyRegistrar, OpenAiCompletion,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long the celebration stays on screen
const CELEBRATION_MILLIS: u64 = 3500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = domain_scout::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    if args.len() > 1 && args[1] == "serve" {
        return run_server().await;
    }

    let niche = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        String::new()
    };

    if let Err(e) = run_client(&niche).await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    Ok(())
}

/// Run the proxy service
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,domain_scout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = domain_scout::VERSION, "starting domain-scout proxy");

    let config = ServerConfig::from_env()?;
    let completion = OpenAiCompletion::new(&CompletionConfig::from_env()?)?;
    let registrar = GoDaddyRegistrar::new(&RegistrarConfig::from_env()?)?;
    let gate = AdmissionGate::new(config.rate_limit_cap, config.rate_limit_window);

    let state = AppState::new(Arc::new(completion), Arc::new(registrar), Arc::new(gate));

    server::run(&config, state).await
}

/// Run the client flow: generate, fan out availability checks, render
async fn run_client(niche: &str) -> Result<(), DomainScoutError> {
    println!("🔭 Domain Scout - AI-powered domain name suggestions");
    println!("════════════════════════════════════════════════════");
    println!();

    let niche = if niche.is_empty() {
        let sample = random_niche();
        println!("🎲 No niche given, trying: \"{}\"", sample);
        sample.to_string()
    } else {
        println!("🎯 Generating domain names for: \"{}\"", niche);
        niche.to_string()
    };

    let base_url =
        env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
    let client = SuggestionClient::new(base_url)?;

    let spinner = make_spinner("🤖 Generating suggestions...");
    let suggestions = match client.fetch_suggestions(&niche).await {
        Ok(suggestions) => {
            spinner.finish_and_clear();
            suggestions
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    if suggestions.is_empty() {
        println!("❌ No suggestions were generated. Try a different niche.");
        return Ok(());
    }

    println!("🎨 Suggestions ({}):", suggestions.len());
    for (i, domain) in suggestions.iter().enumerate() {
        println!("{:2}. {}", i + 1, domain);
    }
    println!();

    let spinner = make_spinner("🔍 Checking availability...");
    let report = client.check_domains(&suggestions).await;
    spinner.finish_and_clear();

    let prices = domain_scout::client::price_display_map(&report.results);

    // All rows render together, only after the whole batch has settled
    println!("📋 Results:");
    println!("───────────");
    for status in &report.results {
        if status.available {
            let price = prices
                .get(&status.domain)
                .map(|p| format!(" - {}", p))
                .unwrap_or_default();
            println!("✅ {} Available{}", pad(&status.domain), price);
        } else {
            println!("❌ {} Not Available", pad(&status.domain));
        }
    }
    println!();

    if let Some(warning) = &report.warning {
        println!("⚠️  {}", warning);
        println!();
    }

    let available = report.results.iter().filter(|r| r.available).count();
    println!("📈 {} of {} domains available", available, report.results.len());
    if let Some(cheapest) = report
        .results
        .iter()
        .filter(|r| r.available)
        .filter_map(|r| r.price)
        .min()
    {
        println!("💰 Cheapest available: {}", format_price(cheapest));
    }

    celebrate().await;

    Ok(())
}

/// Show the celebration for a fixed interval, then clear it.
/// Fires even when nothing is available.
async fn celebrate() {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("🎉 🎊 🎉 🎊 🎉");
    spinner.enable_steady_tick(Duration::from_millis(120));

    tokio::time::sleep(Duration::from_millis(CELEBRATION_MILLIS)).await;
    spinner.finish_and_clear();
}

fn make_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn pad(domain: &str) -> String {
    format!("{:<24}", domain)
}

fn random_niche() -> &'static str {
    let samples = [
        "specialty coffee roasting",
        "indie game studio",
        "sustainable fashion brand",
        "home fitness coaching",
        "artisan bakery",
        "travel photography",
    ];

    let mut rng = rand::thread_rng();
    samples[rng.gen_range(0..samples.len())]
}

/// Print help information
fn print_help() {
    println!("🔭 Domain Scout - AI-powered domain name suggestions");
    println!("════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-scout serve               # Run the proxy service");
    println!("    domain-scout [NICHE]             # Generate and check domains");
    println!();
    println!("EXAMPLES:");
    println!("    domain-scout \"coffee\"            # Suggestions for a niche");
    println!("    domain-scout                     # Suggestions for a random niche");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    SERVER_URL          Proxy service URL (default: http://localhost:3001)");
    println!();
    println!("  serve:");
    println!("    PORT                Listen port (default: 3001)");
    println!("    ALLOWED_ORIGIN      CORS origin (default: http://localhost:3000)");
    println!("    RATE_LIMIT_MAX      Requests per client per 24h (default: 10)");
    println!("    OPENAI_API_KEY      OpenAI API key (required)");
    println!("    OPENAI_MODEL        OpenAI model (default: gpt-4.1-mini)");
    println!("    OPENAI_BASE_URL     OpenAI-compatible endpoint override");
    println!("    GODADDY_API_KEY     GoDaddy API key (required)");
    println!("    GODADDY_API_SECRET  GoDaddy API secret (required)");
    println!("    GODADDY_BASE_URL    Registrar endpoint override");
}
