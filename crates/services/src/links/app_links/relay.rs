// Path: crates/services/src/links/app_links/relay.rs
//! Oracle callbacks: request acknowledgements, request timeouts and results.
//!
//! Every callback is a no-op when its client id no longer resolves to a link,
//! since the owner may have unlinked while the request was in flight.

use super::store::ApplicationLinkStore;
use crate::links::LinksModule;
use links_api::state::StateAccess;
use links_api::transaction::context::TxContext;
use links_crypto::sign::verify_signature;
use links_types::app::{ApplicationLink, ApplicationLinkState, LinkResult};
use links_types::error::LinkError;
use links_types::oracle::obi::{self, OracleScriptResult};
use links_types::oracle::{
    decode_packet, Acknowledgement, OracleRequestPacketAck, OracleResponsePacketData,
    ResolveStatus,
};

const REQUEST_EXPIRED: &str = "request expired";
const REQUEST_FAILED: &str = "request failed";
const INVALID_USERNAME: &str = "invalid application username";
const INVALID_SIGNATURE: &str = "invalid signature";

fn lookup(
    state: &dyn StateAccess,
    client_id: &str,
) -> Result<Option<ApplicationLink>, LinkError> {
    let link = ApplicationLinkStore::get_by_client_id(state, client_id)?;
    if link.is_none() {
        tracing::debug!(target: "links", "no application link for client id {}", client_id);
    }
    Ok(link)
}

fn failed(link: &ApplicationLink, reason: &str) -> ApplicationLink {
    ApplicationLink {
        state: ApplicationLinkState::VerificationError,
        result: Some(LinkResult::error(reason)),
        ..link.clone()
    }
}

impl LinksModule {
    /// Applies the oracle chain's acknowledgement of a request packet.
    ///
    /// Only an `Initialized` link moves: a success records the oracle request id
    /// and starts the verification, an error fails it with the reported reason.
    pub fn on_request_acknowledged(
        &self,
        state: &mut dyn StateAccess,
        client_id: &str,
        ack: &Acknowledgement,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        let Some(link) = lookup(&*state, client_id)? else {
            return Ok(());
        };
        if link.state != ApplicationLinkState::Initialized {
            tracing::debug!(
                target: "links",
                "ignoring acknowledgement for {} in state {}",
                client_id,
                link.state
            );
            return Ok(());
        }

        let next = match ack {
            Acknowledgement::Error(reason) => {
                tracing::warn!(target: "links", "oracle rejected request {}: {}", client_id, reason);
                failed(&link, reason)
            }
            Acknowledgement::Result(bytes) => {
                let packet_ack: OracleRequestPacketAck = decode_packet(bytes).map_err(|e| {
                    tracing::error!(target: "links", "malformed request ack for {}: {}", client_id, e);
                    LinkError::MalformedResult(format!(
                        "cannot decode oracle request packet acknowledgement: {}",
                        e
                    ))
                })?;
                let mut next = link.clone();
                next.state = ApplicationLinkState::VerificationStarted;
                next.oracle_request.id = packet_ack.request_id;
                next
            }
        };
        Ok(Self::transition(state, &link, &next, ctx)?)
    }

    /// Marks an ongoing verification as timed out after its request packet timed out.
    pub fn on_request_timeout(
        &self,
        state: &mut dyn StateAccess,
        client_id: &str,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        let Some(link) = lookup(&*state, client_id)? else {
            return Ok(());
        };
        if !link.is_ongoing() {
            tracing::debug!(
                target: "links",
                "ignoring timeout for {} in state {}",
                client_id,
                link.state
            );
            return Ok(());
        }
        let next = ApplicationLink {
            state: ApplicationLinkState::VerificationTimedOut,
            result: None,
            ..link.clone()
        };
        Ok(Self::transition(state, &link, &next, ctx)?)
    }

    /// Applies an oracle response to the link it answers.
    ///
    /// Protocol failures are recorded on the link. A result that cannot be
    /// decoded, or an owner without a profile, is an error and nothing is written.
    pub fn on_result(
        &self,
        state: &mut dyn StateAccess,
        response: &OracleResponsePacketData,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        let client_id = response.client_id.as_str();
        let Some(link) = lookup(&*state, client_id)? else {
            return Ok(());
        };
        if link.state.is_terminal() {
            tracing::debug!(
                target: "links",
                "ignoring result for {} in terminal state {}",
                client_id,
                link.state
            );
            return Ok(());
        }

        let next = match response.resolve_status {
            ResolveStatus::Open => {
                tracing::debug!(target: "links", "oracle request {} still open", client_id);
                return Ok(());
            }
            ResolveStatus::Expired => failed(&link, REQUEST_EXPIRED),
            ResolveStatus::Failure => failed(&link, REQUEST_FAILED),
            ResolveStatus::Success => self.verify_result(&*state, &link, &response.result)?,
        };
        Ok(Self::transition(state, &link, &next, ctx)?)
    }

    fn verify_result(
        &self,
        state: &dyn StateAccess,
        link: &ApplicationLink,
        result: &[u8],
    ) -> Result<ApplicationLink, LinkError> {
        let client_id = link.client_id();
        let decoded: OracleScriptResult = obi::decode(result).map_err(|e| {
            tracing::error!(target: "links", "undecodable oracle result for {}: {}", client_id, e);
            LinkError::MalformedResult(format!("cannot decode oracle result: {}", e))
        })?;

        if decoded.username.to_lowercase() != link.data.username.to_lowercase() {
            tracing::warn!(
                target: "links",
                "oracle returned username {} for {}",
                decoded.username,
                client_id
            );
            return Ok(failed(link, INVALID_USERNAME));
        }

        let profile = self
            .profiles
            .profile(state, &link.owner)?
            .ok_or_else(|| LinkError::ProfileNotFound(link.owner.clone()))?;
        let value = hex::decode(&decoded.value)
            .map_err(|e| LinkError::MalformedResult(format!("value is not hex: {}", e)))?;
        let signature = hex::decode(&decoded.signature)
            .map_err(|e| LinkError::MalformedResult(format!("signature is not hex: {}", e)))?;

        if let Err(e) = verify_signature(&profile.public_key, &value, &signature) {
            tracing::warn!(target: "links", "oracle result signature for {} rejected: {}", client_id, e);
            return Ok(failed(link, INVALID_SIGNATURE));
        }

        Ok(ApplicationLink {
            state: ApplicationLinkState::VerificationSuccess,
            result: Some(LinkResult::Success {
                value: decoded.value,
                signature: decoded.signature,
            }),
            ..link.clone()
        })
    }
}
