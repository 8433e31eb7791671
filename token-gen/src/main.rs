use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::{Map, Value};

use sujhav_auth::config::FALLBACK_JWT_SECRET;
use sujhav_auth::services::auth::JwtIssuer;

/// Mint a session token the auth service will accept, for local development.
///
/// - Signs HS256 with JWT_SECRET (or the development fallback)
/// - Sets userId, iat, exp; role / isSujhavStudent / extra claims are optional
/// - Prints the token, or a ready-to-paste header/cookie unless --quiet
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Value of the `userId` claim
    #[arg(long)]
    user_id: String,

    /// `role` claim (e.g. admin, teacher, student)
    #[arg(long)]
    role: Option<String>,

    /// Set `isSujhavStudent: true`
    #[arg(long, default_value_t = false)]
    sujhav_student: bool,

    /// Extra claim as key=value (value parsed as JSON, else kept as a string). Repeatable.
    #[arg(long = "claim", value_name = "KEY=VALUE")]
    claims: Vec<String>,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: u64,

    /// Signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Print only the token
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn parse_claim(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("claim must be key=value: {raw}");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("claim key is empty: {raw}");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut extra = Map::new();
    for raw in &args.claims {
        let (key, value) = parse_claim(raw)?;
        extra.insert(key, value);
    }
    if let Some(role) = &args.role {
        extra.insert("role".to_string(), Value::from(role.as_str()));
    }
    if args.sujhav_student {
        extra.insert("isSujhavStudent".to_string(), Value::Bool(true));
    }

    let secret = match args.secret.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => {
            eprintln!("warning: JWT_SECRET not set, signing with the development fallback");
            FALLBACK_JWT_SECRET
        }
    };

    let token = JwtIssuer::new(secret, args.ttl)
        .issue(Value::from(args.user_id.as_str()), extra)
        .context("failed to sign token")?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("Authorization: Bearer {}", token);
    println!("Cookie: token={}", token);
    println!("expires in: {}s", args.ttl);

    Ok(())
}
