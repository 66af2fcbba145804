use super::{load_config, open_identity};
use crate::output::print_json;
use anyhow::Context;
use plant_core::identity::IdentityProvider;
use std::path::Path;

pub fn login(root: &Path, email: &str, password: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let mut identity = open_identity(root, &config);
    let user = identity.login(email, password).context("login failed")?;
    if json {
        print_json(&user)?;
    } else {
        println!("Logged in as {}", user.display_name());
    }
    Ok(())
}

pub fn logout(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let mut identity = open_identity(root, &config);
    let was = identity.current_user().map(|u| u.email.clone());
    identity.logout();
    if json {
        print_json(&serde_json::json!({ "logged_out": was }))?;
    } else {
        match was {
            Some(email) => println!("Logged out {email}"),
            None => println!("Not logged in"),
        }
    }
    Ok(())
}

pub fn whoami(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let identity = open_identity(root, &config);
    let user = identity.current_user();
    if json {
        return print_json(&serde_json::json!({
            "authenticated": identity.is_authenticated(),
            "user": user,
        }));
    }
    match user {
        Some(u) => println!("{} <{}> ({})", u.display_name(), u.email, u.role),
        None => println!("Not logged in"),
    }
    Ok(())
}
