use serde::Serialize;

use medhire_session::ProfileRefresh;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    strategy: &'static str,
    company_name: Option<String>,
    profile_status: Option<String>,
    pending_documents: usize,
    signed_in_at: Option<String>,
    expires_at: Option<String>,
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // A saved cookie may still be live even with no local session recorded.
    let refresh = ctx.session.mount().await;
    let state = ctx.session.snapshot();
    let expiry = ctx.session.settings().expiry;

    let note = match refresh {
        ProfileRefresh::Loaded => None,
        ProfileRefresh::Unauthorized => {
            Some("not signed in. Run 'medhire auth login <email|phone>'".to_string())
        }
        ProfileRefresh::ClearedDueToError => {
            Some("could not reach the server; local session cleared".to_string())
        }
        ProfileRefresh::SessionExpired => {
            Some("session expired. Run 'medhire auth login <email|phone>'".to_string())
        }
    };

    let strategy = if ctx.config.session.persist_token {
        "token"
    } else {
        "cookie"
    };

    output(
        &AuthStatusResponse {
            authenticated: ctx.session.is_authenticated(),
            strategy,
            company_name: state
                .recruiter_profile()
                .and_then(|p| p.company_name.clone()),
            profile_status: state.recruiter_profile().map(|p| p.status.clone()),
            pending_documents: state
                .account
                .as_ref()
                .map_or(0, |a| a.pending_documents().count()),
            signed_in_at: state.token_set_at().map(|t| t.to_rfc3339()),
            expires_at: state
                .token_set_at()
                .and_then(|t| t.checked_add_signed(expiry))
                .map(|t| t.to_rfc3339()),
            note,
        },
        flags.format,
    )
}
