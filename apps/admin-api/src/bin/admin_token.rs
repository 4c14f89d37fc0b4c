//! # Admin Token Issuer
//!
//! Prints a bearer token for local use against the admin API.
//!
//! ## Usage
//! ```bash
//! # Comment-only admin
//! cargo run -p statusguard-admin-api --bin admin-token -- --user clerk
//!
//! # Admin who may also email customers
//! cargo run -p statusguard-admin-api --bin admin-token -- --user manager \
//!     --resource sales::comment --resource sales::emails
//! ```
//!
//! Signs with `JWT_SECRET` / `JWT_LIFETIME_SECS`, same as the server.

use std::env;

use anyhow::Context;
use statusguard_admin_api::auth::JwtManager;
use statusguard_admin_api::AdminConfig;
use statusguard_core::ADMIN_COMMENT_RESOURCE;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut username = String::from("admin");
    let mut resources: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    username = args[i + 1].clone();
                    i += 1;
                }
            }
            "--resource" | "-r" => {
                if i + 1 < args.len() {
                    resources.push(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Statusguard Admin Token Issuer");
                println!();
                println!("Usage: admin-token [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --user <NAME>        Admin username (default: admin)");
                println!("  -r, --resource <ACL>     Grant an ACL resource (repeatable, default: sales::comment)");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if resources.is_empty() {
        resources.push(ADMIN_COMMENT_RESOURCE.to_string());
    }

    let config = AdminConfig::load().context("invalid configuration")?;
    let jwt = JwtManager::new(config.jwt_secret, config.jwt_lifetime_secs);

    let token = jwt
        .issue_token(&username, &resources)
        .context("failed to issue token")?;

    println!("{}", token);
    Ok(())
}
