// Path: crates/services/src/links/app_links/mod.rs
//! Application links and their verification lifecycle.
//!
//! ```text
//! start ─► Initialized ─ack ok─► VerificationStarted ─result─► VerificationSuccess
//!              │                       │                     └► VerificationError
//!              ├─ack error─► VerificationError
//!              ├─timeout───► VerificationTimedOut  (either ongoing state)
//!              └─expiry────► VerificationExpired   (either ongoing state)
//! ```
//!
//! Terminal states are never left. A new request may only replace a terminal link.

pub mod dispatcher;
pub mod expiry;
pub mod relay;
pub mod store;

use super::LinksModule;
use dispatcher::OracleRequestDispatcher;
use links_api::state::StateAccess;
use links_api::transaction::context::TxContext;
use links_types::app::{
    client_id, ApplicationLink, ApplicationLinkState, LinkData, OracleRequest,
    OracleRequestCallData,
};
use links_types::error::{LinkError, StateError};
use links_types::events::LinkEvent;
use links_types::ibc::PacketTimeout;
use store::{ApplicationLinkStore, LinkDelta};

impl LinksModule {
    /// Sends an oracle request verifying `link_data` and records the link as `Initialized`.
    ///
    /// Nothing is written if the request cannot be sent.
    #[allow(clippy::too_many_arguments)]
    pub fn start_application_link(
        &self,
        state: &mut dyn StateAccess,
        owner: &str,
        link_data: LinkData,
        call_data: OracleRequestCallData,
        source_port: &str,
        source_channel: &str,
        timeout: PacketTimeout,
        ctx: &mut TxContext,
    ) -> Result<ApplicationLink, LinkError> {
        self.require_profile(&*state, owner)?;
        link_data.validate()?;
        call_data.validate()?;
        if !call_data
            .application
            .eq_ignore_ascii_case(&link_data.application)
        {
            return Err(LinkError::InvalidLinkData(format!(
                "call data application {} does not match link application {}",
                call_data.application, link_data.application
            )));
        }

        let previous =
            ApplicationLinkStore::get(&*state, owner, &link_data.application, &link_data.username)?;
        if previous.as_ref().is_some_and(ApplicationLink::is_ongoing) {
            return Err(LinkError::OngoingVerification {
                application: link_data.application,
                username: link_data.username,
            });
        }

        let client_id = client_id(owner, &link_data.application, &link_data.username);
        if let Some(holder) = ApplicationLinkStore::get_by_client_id(&*state, &client_id)? {
            if holder.owner != owner
                || holder.data.application != link_data.application
                || holder.data.username != link_data.username
            {
                return Err(LinkError::InvalidLinkData(format!(
                    "client id {} is already used by {}/{}",
                    client_id, holder.data.application, holder.data.username
                )));
            }
        }

        let params = self.params.links_params(&*state)?;
        let request = OracleRequest {
            id: 0,
            script_id: params.oracle.script_id,
            call_data,
            client_id,
        };

        OracleRequestDispatcher::new(self.channels.as_ref(), self.capabilities.as_ref()).dispatch(
            state,
            &params.oracle,
            source_port,
            source_channel,
            &request,
            timeout,
        )?;

        let link = ApplicationLink {
            owner: owner.to_string(),
            data: link_data,
            state: ApplicationLinkState::Initialized,
            oracle_request: request,
            result: None,
            created_at: ctx.block_timestamp,
            expires_at: ctx
                .block_height
                .saturating_add(params.app_links.expiry_interval),
        };
        ApplicationLinkStore::apply(
            state,
            LinkDelta::Upsert {
                previous: previous.as_ref(),
                next: &link,
            },
        )?;

        tracing::info!(
            target: "links",
            "application link {} created, expires at height {}",
            link.client_id(),
            link.expires_at
        );
        ctx.emit(LinkEvent::ApplicationLinkCreated {
            owner: link.owner.clone(),
            application: link.data.application.clone(),
            username: link.data.username.clone(),
            client_id: link.client_id().to_string(),
            creation_time: link.created_at,
            expiration_height: link.expires_at,
        });
        Ok(link)
    }

    /// Removes the link of `owner` for `username` on `application`, in any state.
    pub fn unlink_application(
        &self,
        state: &mut dyn StateAccess,
        owner: &str,
        application: &str,
        username: &str,
        ctx: &mut TxContext,
    ) -> Result<ApplicationLink, LinkError> {
        let link = ApplicationLinkStore::get(&*state, owner, application, username)?.ok_or_else(
            || LinkError::ApplicationLinkNotFound {
                application: application.to_string(),
                username: username.to_string(),
            },
        )?;
        ApplicationLinkStore::apply(state, LinkDelta::Remove(&link))?;

        tracing::info!(target: "links", "application link {} deleted", link.client_id());
        ctx.emit(LinkEvent::ApplicationLinkDeleted {
            owner: link.owner.clone(),
            application: link.data.application.clone(),
            username: link.data.username.clone(),
            expiration_height: link.expires_at,
        });
        Ok(link)
    }

    /// Writes `next` over `previous` and reports the new state.
    pub(crate) fn transition(
        state: &mut dyn StateAccess,
        previous: &ApplicationLink,
        next: &ApplicationLink,
        ctx: &mut TxContext,
    ) -> Result<(), StateError> {
        ApplicationLinkStore::apply(
            state,
            LinkDelta::Upsert {
                previous: Some(previous),
                next,
            },
        )?;
        tracing::info!(
            target: "links",
            "application link {}: {} -> {}",
            next.client_id(),
            previous.state,
            next.state
        );
        ctx.emit(LinkEvent::ApplicationLinkSaved {
            owner: next.owner.clone(),
            application: next.data.application.clone(),
            username: next.data.username.clone(),
            state: next.state,
        });
        Ok(())
    }
}
