use anyhow::Context;
use dialoguer::Input;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    target_type: String,
    message: Option<String>,
    company_name: Option<String>,
    signed_in_at: Option<String>,
}

pub async fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sent = ctx
        .session
        .send_otp(&args.target, args.target_type, args.country_code.as_deref())
        .await;
    if !sent.ok {
        anyhow::bail!(
            "auth login: {}",
            sent.message.unwrap_or_else(|| "failed to send code".into())
        );
    }

    let credential = ctx
        .session
        .otp_credential()
        .context("auth login: no pending verification after sending code")?;

    let code = match &args.code {
        Some(code) => code.clone(),
        None => {
            if !flags.quiet {
                eprintln!("Code sent to {} ({}).", credential.target, credential.target_type);
            }
            Input::<String>::new()
                .with_prompt("Verification code")
                .interact_text()
                .context("auth login: failed to read verification code")?
        }
    };

    let verified = ctx.session.verify_otp(&code, !args.no_profile).await;
    if !verified.ok {
        anyhow::bail!(
            "auth login: {}",
            verified.message.unwrap_or_else(|| "verification failed".into())
        );
    }

    let state = ctx.session.snapshot();
    output(
        &AuthLoginResponse {
            authenticated: true,
            target_type: credential.target_type.to_string(),
            message: verified.message,
            company_name: state
                .recruiter_profile()
                .and_then(|p| p.company_name.clone()),
            signed_in_at: state.token_set_at().map(|t| t.to_rfc3339()),
        },
        flags.format,
    )
}
