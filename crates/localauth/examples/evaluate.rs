//! Print what this machine supports, then show one authentication prompt.
//!
//! Usage: cargo run -p localauth --example evaluate -- [policy] [reason]
//!
//! `LOCALAUTH_*` variables (or a `.env` next to this crate's manifest) set
//! the timeout and button titles.

use std::path::Path;
use std::process;

use localauth::{Authenticator, EvaluateOptions, Outcome, Policy};
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = dotenvy::from_path(Path::new(env!("CARGO_MANIFEST_DIR")).join(".env"));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let policy = match args.next() {
        Some(value) => value.parse::<Policy>().unwrap_or_else(|error| {
            eprintln!("{error}");
            eprintln!(
                "expected one of: {}",
                Policy::ALL.map(|policy| policy.name()).join(", ")
            );
            process::exit(2);
        }),
        None => Policy::BiometricsOrPasscode,
    };
    let reason = args
        .next()
        .unwrap_or_else(|| "Authenticate to continue".to_string());

    let options = EvaluateOptions::from_env().unwrap_or_else(|error| {
        eprintln!("{error}");
        process::exit(2);
    });
    let authenticator = Authenticator::new().with_options(options);

    println!("Backend:  {}", authenticator.backend_id());
    println!("Biometry: {}", authenticator.biometry_type());
    println!("\nPolicies:");
    for candidate in Policy::ALL {
        match authenticator.capability(candidate) {
            Ok(()) => println!("  {candidate:<28} available"),
            Err(reason) => println!("  {candidate:<28} unavailable ({reason})"),
        }
    }

    println!("\nEvaluating {policy}...");
    match authenticator.evaluate_outcome(policy, &reason) {
        Outcome::Success => println!("Success"),
        Outcome::Denied(reason) => {
            println!("Denied: {reason}");
            process::exit(1);
        }
        Outcome::Error(error) => {
            println!("Error: {error}");
            process::exit(1);
        }
    }
}
