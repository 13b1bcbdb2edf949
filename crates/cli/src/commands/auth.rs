use anyhow::{Context as _, Result};
use tracing::info;

use greedible_auth::Session;

use crate::args::LoginArgs;
use crate::context::Context;
use crate::render::{or_dash, print_json};
use crate::session_store;

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let session = ctx.client.login(&args.email, &args.password).await?;
    let path = ctx.session_path()?;
    session_store::save(&path, &session).context("failed to save session")?;
    info!(path = %path.display(), "session saved");

    if ctx.json {
        return print_json(&session.profile);
    }
    match &session.profile {
        Some(profile) => println!(
            "Signed in as {} ({})",
            profile.display_name(),
            profile.role
        ),
        None => println!("Signed in"),
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let removed = session_store::clear(&ctx.session_path()?)?;
    if ctx.json {
        return print_json(&serde_json::json!({ "signed_out": removed }));
    }
    if removed {
        println!("Signed out");
    } else {
        println!("No saved session");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let mut session: Session = ctx.session().await?;
    if ctx.uses_saved_session() {
        session = ctx.client.validate(session).await?;
        session_store::save(&ctx.session_path()?, &session)?;
    }

    let Some(profile) = &session.profile else {
        anyhow::bail!("the backend returned no profile for this token");
    };
    if ctx.json {
        return print_json(profile);
    }
    println!("{}", profile.display_name());
    println!("  id:    {}", or_dash(profile.staff_id()));
    println!("  email: {}", or_dash(profile.email.as_deref()));
    println!("  role:  {}", profile.role);
    Ok(())
}
