// Path: crates/services/src/links/tests/mod.rs

use super::*;
use crate::links::app_links::store::ApplicationLinkStore;
use links_test_utils::fixtures::{chain, SolanaAccount, TestAccount};
use links_test_utils::{assert_emitted, assert_err, assert_ok, MemoryState, MockChannels, StaticProfiles};
use links_types::app::{ApplicationLink, ApplicationLinkState, LinkResult};
use links_types::config::LinksParams;
use links_types::error::ChannelError;
use links_types::ibc::LINKS_PORT_ID;
use links_types::oracle::obi::{self, OracleScriptCallData, OracleScriptResult};
use links_types::oracle::{encode_packet, OracleRequestPacketAck, ResolveStatus};


const CHANNEL: &str = "channel-0";

struct Harness {
    module: LinksModule,
    channels: Arc<MockChannels>,
    state: MemoryState,
    owner: TestAccount,
    other: TestAccount,
}

impl Harness {
    fn new() -> Self {
        let owner = TestAccount::from_seed(1, "desmos").unwrap();
        let other = TestAccount::from_seed(2, "desmos").unwrap();
        let profiles = StaticProfiles::new()
            .with(owner.profile("alice"))
            .with(other.profile("mallory"));
        let channels = Arc::new(MockChannels::new().with_channel(LINKS_PORT_ID, CHANNEL, "channel-9"));
        let mut params = LinksParams::default();
        params.app_links.expiry_interval = 100;
        let module = LinksModule::new(
            Arc::new(profiles),
            Arc::new(params),
            channels.clone(),
            channels.clone(),
        );
        Self {
            module,
            channels,
            state: MemoryState::new(),
            owner,
            other,
        }
    }

    fn ctx(&self, height: u64) -> TxContext {
        TxContext::new(height, 1_700_000_000 + height, self.owner.address.clone())
    }

    async fn call<P: Encode>(
        &mut self,
        method: &str,
        params: &P,
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        self.module
            .handle_service_call(&mut self.state, method, &params.encode(), ctx)
            .await
    }

    async fn link_application(&mut self, height: u64) -> Result<TxContext, TransactionError> {
        let mut ctx = self.ctx(height);
        let params = LinkApplicationParams {
            link_data: LinkData::new("twitter", "alice"),
            call_data: OracleRequestCallData::new("twitter", "7465737431"),
            source_port: LINKS_PORT_ID.to_string(),
            source_channel: CHANNEL.to_string(),
            timeout_height: 0,
            timeout_timestamp: 0,
        };
        self.call("link_application@v1", &params, &mut ctx).await?;
        Ok(ctx)
    }

    fn app_link(&self) -> ApplicationLink {
        ApplicationLinkStore::get(&self.state, &self.owner.address, "twitter", "alice")
            .unwrap()
            .unwrap()
    }

    fn last_request(&self) -> Packet {
        self.channels.sent_packets(&self.state).unwrap().pop().unwrap()
    }

    async fn acknowledge(&mut self, ack: Acknowledgement, height: u64) {
        let packet = self.last_request();
        let mut ctx = TxContext::internal(height, 0);
        assert_ok!(
            self.module
                .on_acknowledgement_packet(&mut self.state, &packet, &encode_packet(&ack).unwrap(), &mut ctx)
                .await
        );
    }

    async fn start_verification(&mut self, height: u64) {
        self.link_application(height).await.unwrap();
        let ack = Acknowledgement::success(encode_packet(&OracleRequestPacketAck { request_id: 42 }).unwrap());
        self.acknowledge(ack, height).await;
    }

    async fn deliver(&mut self, status: ResolveStatus, result: Vec<u8>, height: u64) -> Acknowledgement {
        let response = OracleResponsePacketData {
            client_id: client_id_of(&self.owner.address),
            request_id: 42,
            ans_count: 10,
            request_time: 1,
            resolve_time: 2,
            resolve_status: status,
            result,
        };
        let packet = Packet {
            sequence: 1,
            source_port: "oracle".into(),
            source_channel: "channel-9".into(),
            destination_port: LINKS_PORT_ID.into(),
            destination_channel: CHANNEL.into(),
            data: encode_packet(&response).unwrap(),
            timeout: PacketTimeout::default(),
        };
        let mut ctx = TxContext::internal(height, 0);
        self.module.on_recv_packet(&mut self.state, &packet, &mut ctx).await
    }

    async fn end_block(&mut self, height: u64) -> TxContext {
        let mut ctx = TxContext::internal(height, 0);
        self.module.on_end_block(&mut self.state, &mut ctx).await.unwrap();
        ctx
    }

    fn assert_consistent(&self) {
        let broken = self.module.check_invariants(&self.state).unwrap();
        assert!(broken.is_empty(), "broken invariants: {:?}", broken);
    }
}

fn client_id_of(owner: &str) -> String {
    links_types::app::client_id(owner, "twitter", "alice")
}

fn signed_result(signer: &TestAccount, username: &str) -> Vec<u8> {
    let value = b"tweet 1234567890".to_vec();
    obi::encode(&OracleScriptResult {
        signature: hex::encode(signer.sign(&value).unwrap()),
        value: hex::encode(&value),
        username: username.to_string(),
    })
}

fn app_link_params(application: &str, username: &str, call_application: &str) -> LinkApplicationParams {
    LinkApplicationParams {
        link_data: LinkData::new(application, username),
        call_data: OracleRequestCallData::new(call_application, "7465737431"),
        source_port: LINKS_PORT_ID.to_string(),
        source_channel: CHANNEL.to_string(),
        timeout_height: 0,
        timeout_timestamp: 0,
    }
}

fn chain_link_params(account: &TestAccount, owner: &str) -> LinkChainAccountParams {
    let (address, proof) = account.link_to(owner).unwrap();
    LinkChainAccountParams {
        address,
        proof,
        chain_config: chain("cosmos"),
    }
}

#[tokio::test]
async fn test_link_chain_account_sets_default() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();
    let mut ctx = h.ctx(5);

    assert_ok!(h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx).await);

    let link = ChainLinkStore::get_by_address(&h.state, "cosmos", &external.address)
        .unwrap()
        .unwrap();
    assert_eq!(link.owner, owner);
    assert_eq!(link.created_at, ctx.block_timestamp);
    assert_eq!(
        ChainLinkStore::default_external_address(&h.state, &owner, "cosmos").unwrap(),
        Some(external.address.clone())
    );
    assert_emitted!(ctx.events, LinkEvent::ChainLinkSaved { .. });
    assert_emitted!(ctx.events, LinkEvent::DefaultExternalAddressSet { .. });
    h.assert_consistent();
}

#[tokio::test]
async fn test_link_ed25519_account() {
    let mut h = Harness::new();
    let external = SolanaAccount::from_seed(11).unwrap();
    let owner = h.owner.address.clone();
    let (address, proof) = external.link_to(&owner).unwrap();
    let params = LinkChainAccountParams {
        address,
        proof,
        chain_config: chain("solana"),
    };
    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &params, &mut ctx).await);
    assert_eq!(ChainLinkStore::owner_links(&h.state, &owner).unwrap().len(), 1);
}

#[tokio::test]
async fn test_chain_link_requires_profile() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let stranger = TestAccount::from_seed(99, "desmos").unwrap();
    let mut ctx = TxContext::new(5, 5, stranger.address.clone());
    let err = assert_err!(
        h.call("link_chain_account@v1", &chain_link_params(&external, &stranger.address), &mut ctx)
            .await
    );
    assert!(matches!(err, TransactionError::Link(LinkError::ProfileNotFound(_))));
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_address_cannot_be_linked_twice() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();
    let other = h.other.address.clone();

    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx).await);

    let mut ctx = TxContext::new(6, 6, other.clone());
    let err = assert_err!(
        h.call("link_chain_account@v1", &chain_link_params(&external, &other), &mut ctx)
            .await
    );
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::DuplicateChainLink { .. })
    ));
    assert_eq!(
        ChainLinkStore::owner_of(&h.state, "cosmos", &external.address).unwrap(),
        Some(owner)
    );
}

#[tokio::test]
async fn test_address_case_does_not_bypass_uniqueness() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();
    let other = h.other.address.clone();

    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx).await);

    let mut params = chain_link_params(&external, &other);
    params.address = AddressData::Bech32 {
        value: external.address.to_uppercase(),
        prefix: "cosmos".into(),
    };
    let mut ctx = TxContext::new(6, 6, other.clone());
    let err = assert_err!(h.call("link_chain_account@v1", &params, &mut ctx).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::DuplicateChainLink { .. })
    ));
    assert_eq!(
        ChainLinkStore::owner_of(&h.state, "cosmos", &external.address.to_uppercase()).unwrap(),
        None
    );
    assert!(ChainLinkStore::owner_links(&h.state, &other).unwrap().is_empty());
    h.assert_consistent();
}

#[tokio::test]
async fn test_uppercase_address_is_stored_lowercase() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();

    let mut params = chain_link_params(&external, &owner);
    params.address = AddressData::Bech32 {
        value: external.address.to_uppercase(),
        prefix: "cosmos".into(),
    };
    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &params, &mut ctx).await);

    let link = ChainLinkStore::get_by_address(&h.state, "cosmos", &external.address)
        .unwrap()
        .unwrap();
    assert_eq!(link.address(), external.address);
    h.assert_consistent();
}

#[tokio::test]
async fn test_proof_for_another_profile_is_rejected() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();
    let other = h.other.address.clone();

    // A proof published for `owner`, submitted by `other`.
    let mut ctx = TxContext::new(5, 5, other);
    let err = assert_err!(
        h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx)
            .await
    );
    assert!(matches!(err, TransactionError::Link(LinkError::ProofNotBound(_))));
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_tampered_proof_is_rejected() {
    let mut h = Harness::new();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let owner = h.owner.address.clone();
    let mut params = chain_link_params(&external, &owner);
    if let Some(byte) = params.proof.signature.last_mut() {
        *byte ^= 0x01;
    }
    let mut ctx = h.ctx(5);
    let err = assert_err!(h.call("link_chain_account@v1", &params, &mut ctx).await);
    assert!(matches!(err, TransactionError::Link(LinkError::Verification(_))));
}

#[tokio::test]
async fn test_default_address_promotion() {
    let mut h = Harness::new();
    let owner = h.owner.address.clone();
    let first = TestAccount::from_seed(10, "cosmos").unwrap();
    let second = TestAccount::from_seed(11, "cosmos").unwrap();

    for (account, height) in [(&first, 5), (&second, 6)] {
        let mut ctx = h.ctx(height);
        assert_ok!(h.call("link_chain_account@v1", &chain_link_params(account, &owner), &mut ctx).await);
    }

    let mut ctx = h.ctx(7);
    let params = UnlinkChainAccountParams {
        chain_name: "cosmos".into(),
        address: first.address.clone(),
    };
    assert_ok!(h.call("unlink_chain_account@v1", &params, &mut ctx).await);
    assert_eq!(
        ChainLinkStore::default_external_address(&h.state, &owner, "cosmos").unwrap(),
        Some(second.address.clone())
    );
    assert_emitted!(ctx.events, LinkEvent::ChainLinkDeleted { .. });

    let params = UnlinkChainAccountParams {
        chain_name: "cosmos".into(),
        address: second.address.clone(),
    };
    assert_ok!(h.call("unlink_chain_account@v1", &params, &mut ctx).await);
    assert_eq!(ChainLinkStore::default_external_address(&h.state, &owner, "cosmos").unwrap(), None);
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_set_default_external_address() {
    let mut h = Harness::new();
    let owner = h.owner.address.clone();
    let first = TestAccount::from_seed(10, "cosmos").unwrap();
    let second = TestAccount::from_seed(11, "cosmos").unwrap();
    for account in [&first, &second] {
        let mut ctx = h.ctx(5);
        assert_ok!(h.call("link_chain_account@v1", &chain_link_params(account, &owner), &mut ctx).await);
    }

    let mut ctx = h.ctx(6);
    let params = SetDefaultExternalAddressParams {
        chain_name: "cosmos".into(),
        address: second.address.clone(),
    };
    assert_ok!(h.call("set_default_external_address@v1", &params, &mut ctx).await);
    assert_eq!(
        ChainLinkStore::default_external_address(&h.state, &owner, "cosmos").unwrap(),
        Some(second.address.clone())
    );

    let params = SetDefaultExternalAddressParams {
        chain_name: "cosmos".into(),
        address: "cosmos1unknown".into(),
    };
    let err = assert_err!(h.call("set_default_external_address@v1", &params, &mut ctx).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::ChainLinkNotFound { .. })
    ));
}

#[tokio::test]
async fn test_only_owner_can_unlink_chain_account() {
    let mut h = Harness::new();
    let owner = h.owner.address.clone();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx).await);

    let mut ctx = TxContext::new(6, 6, h.other.address.clone());
    let params = UnlinkChainAccountParams {
        chain_name: "cosmos".into(),
        address: external.address.clone(),
    };
    let err = assert_err!(h.call("unlink_chain_account@v1", &params, &mut ctx).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::ChainLinkNotFound { .. })
    ));
    assert!(ChainLinkStore::get(&h.state, &owner, "cosmos", &external.address)
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_result_before_expiry_survives_sweep() {
    let mut h = Harness::new();
    let ctx = h.link_application(500).await.unwrap();
    assert_emitted!(
        ctx.events,
        LinkEvent::ApplicationLinkCreated {
            expiration_height: 600,
            ..
        }
    );
    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::Initialized);
    assert_eq!(link.expires_at, 600);

    let ack = Acknowledgement::success(encode_packet(&OracleRequestPacketAck { request_id: 42 }).unwrap());
    h.acknowledge(ack, 510).await;
    assert_eq!(h.app_link().state, ApplicationLinkState::VerificationStarted);
    assert_eq!(h.app_link().oracle_request.id, 42);

    let result = signed_result(&h.owner, "Alice");
    let ack = h.deliver(ResolveStatus::Success, result, 550).await;
    assert_eq!(ack, Acknowledgement::success(vec![1]));
    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationSuccess);
    assert!(matches!(link.result, Some(LinkResult::Success { .. })));

    let ctx = h.end_block(600).await;
    assert!(ctx.events.is_empty());
    assert_eq!(h.app_link(), link);
    h.assert_consistent();
}

#[tokio::test]
async fn test_unanswered_request_expires() {
    let mut h = Harness::new();
    h.start_verification(500).await;

    assert!(h.end_block(599).await.events.is_empty());
    let ctx = h.end_block(600).await;
    assert_emitted!(
        ctx.events,
        LinkEvent::ApplicationLinkSaved {
            state: ApplicationLinkState::VerificationExpired,
            ..
        }
    );
    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationExpired);
    assert_eq!(link.result, None);

    // Sweeping the same height again changes nothing.
    let before = h.state.clone();
    assert!(h.end_block(600).await.events.is_empty());
    assert_eq!(h.state, before);
    h.assert_consistent();
}

#[tokio::test]
async fn test_ongoing_verification_blocks_restart() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let err = assert_err!(h.link_application(501).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::OngoingVerification { .. })
    ));
    assert_eq!(h.channels.sent_packets(&h.state).unwrap().len(), 1);

    // Once terminal, a new request replaces the old link.
    h.deliver(ResolveStatus::Failure, Vec::new(), 502).await;
    h.link_application(503).await.unwrap();
    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::Initialized);
    assert_eq!(link.expires_at, 603);
    assert_eq!(link.result, None);
    h.assert_consistent();
}

#[tokio::test]
async fn test_dispatch_failure_persists_nothing() {
    let mut h = Harness::new();
    h.channels.fail_sends(true);
    let err = assert_err!(h.link_application(500).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::Dispatch(ChannelError::PacketSend(_)))
    ));
    assert!(h.state.is_empty());

    h.channels.fail_sends(false);
    let mut ctx = h.ctx(500);
    let params = LinkApplicationParams {
        link_data: LinkData::new("twitter", "alice"),
        call_data: OracleRequestCallData::new("twitter", "7465737431"),
        source_port: LINKS_PORT_ID.to_string(),
        source_channel: "channel-404".to_string(),
        timeout_height: 0,
        timeout_timestamp: 0,
    };
    let err = assert_err!(h.call("link_application@v1", &params, &mut ctx).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::Dispatch(ChannelError::ChannelNotFound { .. }))
    ));
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_invalid_call_data_rejected() {
    let mut h = Harness::new();
    let mut ctx = h.ctx(500);
    let params = LinkApplicationParams {
        link_data: LinkData::new("twitter", "alice"),
        call_data: OracleRequestCallData::new("twitter", "not hex"),
        source_port: LINKS_PORT_ID.to_string(),
        source_channel: CHANNEL.to_string(),
        timeout_height: 0,
        timeout_timestamp: 0,
    };
    let err = assert_err!(h.call("link_application@v1", &params, &mut ctx).await);
    assert!(matches!(err, TransactionError::Link(LinkError::InvalidLinkData(_))));
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_call_data_must_target_linked_application() {
    let mut h = Harness::new();
    let mut ctx = h.ctx(500);
    let err = assert_err!(
        h.call("link_application@v1", &app_link_params("twitter", "alice", "github"), &mut ctx)
            .await
    );
    assert!(matches!(err, TransactionError::Link(LinkError::InvalidLinkData(_))));
    assert!(h.state.is_empty());
    assert!(ctx.events.is_empty());

    // Case alone is not a mismatch; the oracle sees the lowercase name.
    assert_ok!(
        h.call("link_application@v1", &app_link_params("twitter", "alice", "Twitter"), &mut ctx)
            .await
    );
    let request: OracleRequestPacketData = decode_packet(&h.last_request().data).unwrap();
    let call: OracleScriptCallData = obi::decode(&request.calldata).unwrap();
    assert_eq!(call.application, "twitter");
}

#[tokio::test]
async fn test_colliding_client_id_rejected() {
    let mut h = Harness::new();
    let mut ctx = h.ctx(500);
    assert_ok!(
        h.call("link_application@v1", &app_link_params("twitter", "a-b", "twitter"), &mut ctx)
            .await
    );

    // `twitter-a/b` yields the same client id as `twitter/a-b`.
    let err = assert_err!(
        h.call("link_application@v1", &app_link_params("twitter-a", "b", "twitter-a"), &mut ctx)
            .await
    );
    assert!(matches!(err, TransactionError::Link(LinkError::InvalidLinkData(_))));
    assert_eq!(h.channels.sent_packets(&h.state).unwrap().len(), 1);
    assert!(ApplicationLinkStore::get(&h.state, &h.owner.address, "twitter-a", "b")
        .unwrap()
        .is_none());
    h.assert_consistent();

    // The first link still expires on schedule.
    h.end_block(600).await;
    let first = ApplicationLinkStore::get(&h.state, &h.owner.address, "twitter", "a-b")
        .unwrap()
        .unwrap();
    assert_eq!(first.state, ApplicationLinkState::VerificationExpired);

    // Once it is gone the id is free again.
    let params = UnlinkApplicationParams {
        application: "twitter".into(),
        username: "a-b".into(),
    };
    let mut ctx = h.ctx(601);
    assert_ok!(h.call("unlink_application@v1", &params, &mut ctx).await);
    assert_ok!(
        h.call("link_application@v1", &app_link_params("twitter-a", "b", "twitter-a"), &mut ctx)
            .await
    );
    h.assert_consistent();
}

#[tokio::test]
async fn test_error_ack_fails_verification() {
    let mut h = Harness::new();
    h.link_application(500).await.unwrap();
    h.acknowledge(Acknowledgement::error("out of gas"), 501).await;

    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::error("out of gas")));
    assert!(ApplicationLinkStore::expiring_at(&h.state, 600).unwrap().is_empty());

    // A late success acknowledgement leaves the terminal link alone.
    let ack = Acknowledgement::success(encode_packet(&OracleRequestPacketAck { request_id: 7 }).unwrap());
    h.acknowledge(ack, 502).await;
    assert_eq!(h.app_link(), link);
    h.assert_consistent();
}

#[tokio::test]
async fn test_malformed_ack_is_an_error() {
    let mut h = Harness::new();
    h.link_application(500).await.unwrap();
    let packet = h.last_request();
    let ack = encode_packet(&Acknowledgement::success(b"not json".to_vec())).unwrap();
    let mut ctx = TxContext::internal(501, 0);
    let err = assert_err!(
        h.module
            .on_acknowledgement_packet(&mut h.state, &packet, &ack, &mut ctx)
            .await
    );
    assert!(matches!(err, TransactionError::Link(LinkError::MalformedResult(_))));
    assert_eq!(h.app_link().state, ApplicationLinkState::Initialized);
}

#[tokio::test]
async fn test_timeout_ends_verification() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let packet = h.last_request();
    let mut ctx = TxContext::internal(520, 0);
    assert_ok!(h.module.on_timeout_packet(&mut h.state, &packet, &mut ctx).await);

    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationTimedOut);
    assert_eq!(link.result, None);
    assert!(h.end_block(600).await.events.is_empty());
    h.assert_consistent();
}

#[tokio::test]
async fn test_username_mismatch_recorded() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let result = signed_result(&h.owner, "bob");
    let ack = h.deliver(ResolveStatus::Success, result, 550).await;
    assert!(ack.is_success());

    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::error("invalid application username")));
}

#[tokio::test]
async fn test_foreign_signature_recorded() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let impostor = TestAccount::from_seed(77, "desmos").unwrap();
    let result = signed_result(&impostor, "alice");
    h.deliver(ResolveStatus::Success, result, 550).await;

    let link = h.app_link();
    assert_eq!(link.state, ApplicationLinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::error("invalid signature")));
}

#[tokio::test]
async fn test_oracle_failure_statuses() {
    for (status, reason) in [
        (ResolveStatus::Expired, "request expired"),
        (ResolveStatus::Failure, "request failed"),
    ] {
        let mut h = Harness::new();
        h.start_verification(500).await;
        assert!(h.deliver(status, Vec::new(), 550).await.is_success());
        assert_eq!(h.app_link().result, Some(LinkResult::error(reason)));
    }
}

#[tokio::test]
async fn test_open_status_changes_nothing() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let before = h.state.clone();
    assert!(h.deliver(ResolveStatus::Open, Vec::new(), 550).await.is_success());
    assert_eq!(h.state, before);
}

#[tokio::test]
async fn test_malformed_result_returns_error_ack() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let before = h.state.clone();

    let ack = h.deliver(ResolveStatus::Success, vec![0, 0, 0, 9, b'x'], 550).await;
    assert!(!ack.is_success());
    assert_eq!(h.state, before);

    let bad_hex = obi::encode(&OracleScriptResult {
        signature: "zz".into(),
        value: "00".into(),
        username: "alice".into(),
    });
    let ack = h.deliver(ResolveStatus::Success, bad_hex, 551).await;
    assert!(!ack.is_success());
    assert_eq!(h.state, before);
}

#[tokio::test]
async fn test_result_for_unknown_client_is_ignored() {
    let mut h = Harness::new();
    let ack = h.deliver(ResolveStatus::Failure, Vec::new(), 550).await;
    assert_eq!(ack, Acknowledgement::success(vec![1]));
    assert!(h.state.is_empty());
}

#[tokio::test]
async fn test_terminal_link_ignores_results() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    h.deliver(ResolveStatus::Failure, Vec::new(), 550).await;
    let finished = h.app_link();

    let result = signed_result(&h.owner, "alice");
    h.deliver(ResolveStatus::Success, result, 560).await;
    assert_eq!(h.app_link(), finished);
}

#[tokio::test]
async fn test_unlink_application() {
    let mut h = Harness::new();
    h.start_verification(500).await;
    let mut ctx = h.ctx(520);
    let params = UnlinkApplicationParams {
        application: "twitter".into(),
        username: "alice".into(),
    };
    assert_ok!(h.call("unlink_application@v1", &params, &mut ctx).await);
    assert_emitted!(
        ctx.events,
        LinkEvent::ApplicationLinkDeleted {
            expiration_height: 600,
            ..
        }
    );
    assert!(ApplicationLinkStore::get(&h.state, &h.owner.address, "twitter", "alice")
        .unwrap()
        .is_none());

    // The late result finds nothing to update.
    let result = signed_result(&h.owner, "alice");
    assert!(h.deliver(ResolveStatus::Success, result, 530).await.is_success());
    assert!(h.end_block(600).await.events.is_empty());

    let err = assert_err!(h.call("unlink_application@v1", &params, &mut ctx).await);
    assert!(matches!(
        err,
        TransactionError::Link(LinkError::ApplicationLinkNotFound { .. })
    ));
    h.assert_consistent();
}

#[tokio::test]
async fn test_profile_deletion_removes_all_links() {
    let mut h = Harness::new();
    let owner = h.owner.address.clone();
    let external = TestAccount::from_seed(10, "cosmos").unwrap();
    let mut ctx = h.ctx(5);
    assert_ok!(h.call("link_chain_account@v1", &chain_link_params(&external, &owner), &mut ctx).await);
    h.start_verification(500).await;

    let params = DeleteProfileLinksParams { owner: owner.clone() };
    let mut user_ctx = h.ctx(510);
    let err = assert_err!(h.call("delete_profile_links@v1", &params, &mut user_ctx).await);
    assert!(matches!(err, TransactionError::Unauthorized(_)));

    let mut ctx = TxContext::internal(510, 0);
    assert_ok!(h.call("delete_profile_links@v1", &params, &mut ctx).await);
    assert_emitted!(ctx.events, LinkEvent::ChainLinkDeleted { .. });
    assert_emitted!(ctx.events, LinkEvent::ApplicationLinkDeleted { .. });

    // Only the mock channel bookkeeping is left.
    assert!(h.state.keys_with_prefix(b"chain_link").is_empty());
    assert!(h.state.keys_with_prefix(b"app_link").is_empty());
    assert!(h.state.keys_with_prefix(b"default_external_address").is_empty());
}

#[tokio::test]
async fn test_unknown_method() {
    let mut h = Harness::new();
    let mut ctx = h.ctx(1);
    let err = assert_err!(h.call("link_everything@v1", &(), &mut ctx).await);
    assert!(matches!(err, TransactionError::Unsupported(_)));
}

#[test]
fn test_service_metadata() {
    let h = Harness::new();
    assert_eq!(h.module.id(), "links");
    assert!(h.module.capabilities().contains(Capabilities::ON_END_BLOCK));
    assert!(h.module.capabilities().contains(Capabilities::PACKET_MODULE));
    assert!(h.module.as_on_end_block().is_some());
    assert!(h.module.as_packet_module().is_some());
}
