use anyhow::{Context, bail};
use serde::Serialize;
use tek_auth::{AdminClaims, token_store};
use tek_client::ApiClient;
use tek_config::TekConfig;
use tek_core::entities::NewAdmin;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::cli::subcommands::admin::{AdminLoginArgs, AdminRegisterArgs};
use crate::commands::shared::parse::resolve_password;
use crate::context::{AppContext, Backend};
use crate::output::output;

/// Tokens within this many seconds of expiry are reported as expiring.
const EXPIRY_WARNING_SECS: i64 = 15 * 60;

#[derive(Debug, Serialize)]
struct LoginResponse {
    authenticated: bool,
    username: String,
    expires_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    cleared: bool,
}

#[derive(Debug, Default, Serialize)]
struct StatusResponse {
    authenticated: bool,
    username: Option<String>,
    admin_id: Option<i64>,
    expires_at: Option<String>,
    expiring_soon: bool,
    token_source: Option<&'static str>,
    note: Option<String>,
}

fn status_from_token(token: Option<&str>) -> StatusResponse {
    let Some(token) = token else {
        return StatusResponse {
            note: Some("no stored token; run `tkf admin login`".into()),
            ..StatusResponse::default()
        };
    };
    match AdminClaims::decode(token) {
        Ok(claims) => {
            let expired = claims.is_near_expiry(0);
            StatusResponse {
                authenticated: !expired,
                username: Some(claims.username.clone()),
                admin_id: claims.admin_id,
                expires_at: Some(claims.expires_at.to_rfc3339()),
                expiring_soon: claims.is_near_expiry(EXPIRY_WARNING_SECS),
                token_source: None,
                note: expired.then(|| "token expired; run `tkf admin login`".into()),
            }
        }
        Err(error) => StatusResponse {
            note: Some(error.to_string()),
            ..StatusResponse::default()
        },
    }
}

/// Handle the token commands (`login`, `logout`, `status`), which need no
/// store. Returns `None` for every other admin command.
pub async fn handle_session(
    action: &AdminCommands,
    flags: &GlobalFlags,
    config: &TekConfig,
) -> Option<anyhow::Result<()>> {
    match action {
        AdminCommands::Login(args) => Some(login(args, flags, config).await),
        AdminCommands::Logout => Some(
            token_store::delete()
                .map_err(anyhow::Error::from)
                .and_then(|()| output(&LogoutResponse { cleared: true }, flags.format)),
        ),
        AdminCommands::Status => {
            let token = token_store::load();
            let mut status = status_from_token(token.as_deref());
            status.token_source = token_store::detect_token_source().map(token_store::TokenSource::as_str);
            Some(output(&status, flags.format))
        }
        _ => None,
    }
}

async fn login(args: &AdminLoginArgs, flags: &GlobalFlags, config: &TekConfig) -> anyhow::Result<()> {
    let password = resolve_password(args.password.as_deref())?;
    let client = ApiClient::new(&config.api)?;
    let token = client
        .login(&args.username, &password)
        .await
        .context("admin login failed")?;
    token_store::store(&token.access_token).context("failed to store token")?;

    let expires_at = AdminClaims::decode(&token.access_token)
        .ok()
        .map(|c| c.expires_at.to_rfc3339());
    tracing::info!(username = %args.username, "admin logged in");
    output(
        &LoginResponse {
            authenticated: true,
            username: args.username.clone(),
            expires_at,
        },
        flags.format,
    )
}

/// Handle `tkf admin <subcommand>` for commands that need a backend.
pub async fn handle(
    action: &AdminCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AdminCommands::Login(_) | AdminCommands::Logout | AdminCommands::Status => {
            bail!("token commands are handled before the backend opens")
        }
        AdminCommands::Register(args) => register(args, ctx, flags).await,
        AdminCommands::Create(args) => {
            let Backend::Local(service) = &ctx.backend else {
                bail!("`admin create` works on the local store only; pass --local or use `admin register`");
            };
            let weight = args
                .weight
                .unwrap_or(ctx.config.general.default_admin_weight);
            let admin = service
                .create_admin(&args.username, &args.email, &args.full_name, weight, args.superadmin)
                .await?;
            output(&admin, flags.format)
        }
        AdminCommands::List => {
            let admins = match &ctx.backend {
                Backend::Remote(client) => client.admins().await?,
                Backend::Local(service) => service.list_admins().await?,
            };
            output(&admins, flags.format)
        }
        AdminCommands::Weight(args) => {
            let response = match &ctx.backend {
                Backend::Remote(client) => {
                    client
                        .update_admin_weight(args.admin_id, args.weight)
                        .await?
                }
                Backend::Local(service) => {
                    service
                        .update_admin_weight(args.admin_id, args.weight)
                        .await?
                }
            };
            output(&response, flags.format)
        }
    }
}

async fn register(
    args: &AdminRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let Backend::Remote(client) = &ctx.backend else {
        bail!("`admin register` talks to the API; use `admin create` with --local");
    };
    let registration_code = args
        .code
        .clone()
        .or_else(|| {
            let api = &ctx.config.api;
            api.has_registration_code()
                .then(|| api.registration_code.clone())
        })
        .context("registration code required: pass --code or set TEKNOFEST_API__REGISTRATION_CODE")?;
    let admin = NewAdmin {
        username: args.username.clone(),
        email: args.email.clone(),
        password: resolve_password(args.password.as_deref())?,
        full_name: args.full_name.clone(),
        registration_code,
    };
    let created = client.register_admin(&admin).await?;
    output(&created, flags.format)
}
