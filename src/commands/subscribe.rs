use super::Host;
use super::common::{CommonArgs, init_logging};
use crate::Result;
use crate::credentials::{ACCESS_TOKEN, CredentialStore};
use crate::oauth::RefreshOutcome;
use crate::pipeline::InvocationContext;
use crate::subscription::{SubscriptionClient, SubscriptionOutcome};
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SubscribeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Id of the subscription to create, unique per subscriber
    #[arg(long, value_name = "ID")]
    pub subscription_id: String,

    /// Collection to subscribe to (overrides `subscription_collection`)
    #[arg(long, value_name = "COLLECTION")]
    pub collection: Option<String>,

    /// Subscriber to notify (overrides `subscriber_id`)
    #[arg(long, value_name = "ID")]
    pub subscriber_id: Option<String>,
}

async fn subscribe_inner(args: &SubscribeArgs) -> Result<SubscriptionOutcome> {
    let ctx = InvocationContext::new(args.common.load_config()?)?;
    let mut store = args.common.credential_store()?;

    if let RefreshOutcome::Rejected(reason) = ctx.refresher().refresh(&mut store).await? {
        return Err(app_err!("token refresh was rejected: {reason}"));
    }
    let access_token = store.get(ACCESS_TOKEN, true).await?;

    let config = ctx.config();
    let collection = args.collection.as_deref().or_else(|| config.subscription_collection());
    let subscriber_id = args.subscriber_id.as_deref().or_else(|| config.subscriber_id());

    SubscriptionClient::new(ctx.client().clone(), &config.api_base_url, &config.user_id)
        .create(&access_token, collection, &args.subscription_id, subscriber_id)
        .await
}

/// Create a push subscription for the token owner
///
/// # Errors
///
/// Returns an error if the token refresh fails or the request cannot be sent
pub async fn process_subscribe<H: Host>(host: &mut H, args: &SubscribeArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let outcome = match subscribe_inner(args).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Subscription failed: {e}");
            host.exit(1);
            return Err(e);
        }
    };

    let id = &args.subscription_id;
    if outcome.is_success() {
        let state = if matches!(outcome, SubscriptionOutcome::AlreadyExists) {
            "already exists"
        } else {
            "created"
        };
        let _ = writeln!(host.output(), "Subscription '{id}' {state}");
        return Ok(());
    }

    let _ = match outcome {
        SubscriptionOutcome::Failed(status) => writeln!(host.error(), "❌ Subscription '{id}' was not created (HTTP status {status})"),
        _ => writeln!(host.error(), "❌ Subscription '{id}' is already used by another subscriber"),
    };
    host.exit(1);

    Ok(())
}
