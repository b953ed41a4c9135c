#![cfg_attr(not(feature = "std"), no_std)]
#![recursion_limit = "256"]

//! Authorship registry runtime.
//!
//! A minimal proof-of-authority solochain: block production (Aura), finality
//! (Grandpa), block time (Timestamp) and the claim registry. Block time is the
//! authoritative clock against which claimed timestamps are checked.

// Make the WASM binary available
#[cfg(feature = "std")]
include!(concat!(env!("OUT_DIR"), "/wasm_binary.rs"));

use pallet_authorship::{ClaimRecord, Fingerprint};
use sp_api::impl_runtime_apis;
use sp_consensus_aura::sr25519::AuthorityId as AuraId;
use sp_consensus_grandpa::AuthorityId as GrandpaId;
use sp_core::{crypto::KeyTypeId, OpaqueMetadata};
use sp_runtime::{
    create_runtime_str, generic, impl_opaque_keys,
    traits::{BlakeTwo256, Block as BlockT, IdentifyAccount, NumberFor, Verify},
    transaction_validity::{TransactionSource, TransactionValidity},
    ApplyExtrinsicResult, MultiSignature,
};
use sp_std::prelude::*;
#[cfg(feature = "std")]
use sp_version::NativeVersion;
use sp_version::RuntimeVersion;

// Frame imports
use frame_support::{
    construct_runtime, derive_impl, parameter_types,
    traits::{ConstBool, ConstU32, ConstU64},
    weights::{constants::RocksDbWeight, Weight},
};
use frame_system::limits::{BlockLength, BlockWeights};

pub use frame_support::weights::constants::WEIGHT_REF_TIME_PER_SECOND;
#[cfg(any(feature = "std", test))]
pub use sp_runtime::BuildStorage;
pub use sp_runtime::Perbill;

/// Opaque types for node integration
pub mod opaque {
    use super::*;

    pub use sp_runtime::OpaqueExtrinsic as UncheckedExtrinsic;

    pub type Header = generic::Header<BlockNumber, BlakeTwo256>;
    pub type Block = generic::Block<Header, UncheckedExtrinsic>;

    impl_opaque_keys! {
        pub struct SessionKeys {
            pub aura: Aura,
            pub grandpa: Grandpa,
        }
    }
}

// Runtime version
#[sp_version::runtime_version]
pub const VERSION: RuntimeVersion = RuntimeVersion {
    spec_name: create_runtime_str!("authorship"),
    impl_name: create_runtime_str!("authorship"),
    authoring_version: 1,
    spec_version: 1,
    impl_version: 1,
    apis: RUNTIME_API_VERSIONS,
    transaction_version: 1,
    state_version: 1,
};

/// Native version
#[cfg(feature = "std")]
pub fn native_version() -> NativeVersion {
    NativeVersion {
        runtime_version: VERSION,
        can_author_with: Default::default(),
    }
}

/// Time constants
pub const MILLISECS_PER_BLOCK: u64 = 6000;
pub const SLOT_DURATION: u64 = MILLISECS_PER_BLOCK;

/// Type definitions
pub type BlockNumber = u32;
pub type Signature = MultiSignature;
pub type AccountId = <<Signature as Verify>::Signer as IdentifyAccount>::AccountId;
pub type Nonce = u32;
pub type Hash = sp_core::H256;
pub type Moment = u64;

/// Block weights and limits
const NORMAL_DISPATCH_RATIO: Perbill = Perbill::from_percent(75);
const MAXIMUM_BLOCK_WEIGHT: Weight = Weight::from_parts(
    2u64 * WEIGHT_REF_TIME_PER_SECOND,
    u64::MAX,
);

parameter_types! {
    pub const Version: RuntimeVersion = VERSION;
    pub const BlockHashCount: BlockNumber = 2400;
    pub BlockWeightsConfig: BlockWeights = BlockWeights::with_sensible_defaults(
        MAXIMUM_BLOCK_WEIGHT,
        NORMAL_DISPATCH_RATIO,
    );
    pub BlockLengthConfig: BlockLength = BlockLength::max_with_normal_ratio(
        5 * 1024 * 1024,
        NORMAL_DISPATCH_RATIO,
    );
    pub const SS58Prefix: u8 = 42;
}

/// Configure frame_system
#[derive_impl(frame_system::config_preludes::SolochainDefaultConfig)]
impl frame_system::Config for Runtime {
    type BlockWeights = BlockWeightsConfig;
    type BlockLength = BlockLengthConfig;
    type AccountId = AccountId;
    type Nonce = Nonce;
    type Hash = Hash;
    type Block = Block;
    type BlockHashCount = BlockHashCount;
    type DbWeight = RocksDbWeight;
    type Version = Version;
    type AccountData = (); // Feeless chain: no balances
    type SS58Prefix = SS58Prefix;
    type MaxConsumers = ConstU32<16>;
}

/// Configure pallet_aura (block production)
impl pallet_aura::Config for Runtime {
    type AuthorityId = AuraId;
    type DisabledValidators = ();
    type MaxAuthorities = ConstU32<32>;
    type AllowMultipleBlocksPerSlot = ConstBool<false>;
    type SlotDuration = pallet_aura::MinimumPeriodTimesTwo<Runtime>;
}

/// Configure pallet_grandpa (finality)
impl pallet_grandpa::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
    type MaxAuthorities = ConstU32<32>;
    type MaxNominators = ConstU32<0>;
    type MaxSetIdSessionEntries = ConstU64<0>;
    type KeyOwnerProof = sp_core::Void;
    type EquivocationReportSystem = ();
}

/// Configure pallet_timestamp
parameter_types! {
    pub const MinimumPeriod: Moment = SLOT_DURATION / 2;
}

impl pallet_timestamp::Config for Runtime {
    type Moment = Moment;
    type OnTimestampSet = Aura;
    type MinimumPeriod = MinimumPeriod;
    type WeightInfo = ();
}

/// Configure pallet_authorship
///
/// Claims may be up to five minutes old (submission latency) and at most thirty
/// seconds ahead of block time (clock skew).
parameter_types! {
    pub const AllowedMarginEarly: u64 = 5 * 60;
    pub const AllowedMarginLate: u64 = 30;
}

impl pallet_authorship::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type AllowedMarginEarly = AllowedMarginEarly;
    type AllowedMarginLate = AllowedMarginLate;
    type WeightInfo = pallet_authorship::weights::SubstrateWeight<Runtime>;
}

construct_runtime!(
    pub enum Runtime {
        System: frame_system,
        Timestamp: pallet_timestamp,
        Aura: pallet_aura,
        Grandpa: pallet_grandpa,
        Authorship: pallet_authorship,
    }
);

/// The address format for describing accounts
pub type Address = sp_runtime::MultiAddress<AccountId, ()>;
/// Block header type
pub type Header = generic::Header<BlockNumber, BlakeTwo256>;
/// Block type
pub type Block = generic::Block<Header, UncheckedExtrinsic>;
/// The SignedExtension to the basic transaction logic
pub type SignedExtra = (
    frame_system::CheckNonZeroSender<Runtime>,
    frame_system::CheckSpecVersion<Runtime>,
    frame_system::CheckTxVersion<Runtime>,
    frame_system::CheckGenesis<Runtime>,
    frame_system::CheckEra<Runtime>,
    frame_system::CheckNonce<Runtime>,
    frame_system::CheckWeight<Runtime>,
);
/// Unchecked extrinsic type
pub type UncheckedExtrinsic =
    generic::UncheckedExtrinsic<Address, RuntimeCall, Signature, SignedExtra>;
/// Executive: handles dispatch to the various modules
pub type Executive = frame_executive::Executive<
    Runtime,
    Block,
    frame_system::ChainContext<Runtime>,
    Runtime,
    AllPalletsWithSystem,
>;

impl_runtime_apis! {
    impl sp_api::Core<Block> for Runtime {
        fn version() -> RuntimeVersion {
            VERSION
        }

        fn execute_block(block: Block) {
            Executive::execute_block(block);
        }

        fn initialize_block(header: &<Block as BlockT>::Header) -> sp_runtime::ExtrinsicInclusionMode {
            Executive::initialize_block(header)
        }
    }

    impl sp_api::Metadata<Block> for Runtime {
        fn metadata() -> OpaqueMetadata {
            OpaqueMetadata::new(Runtime::metadata().into())
        }

        fn metadata_at_version(version: u32) -> Option<OpaqueMetadata> {
            Runtime::metadata_at_version(version)
        }

        fn metadata_versions() -> sp_std::vec::Vec<u32> {
            Runtime::metadata_versions()
        }
    }

    impl sp_block_builder::BlockBuilder<Block> for Runtime {
        fn apply_extrinsic(extrinsic: <Block as BlockT>::Extrinsic) -> ApplyExtrinsicResult {
            Executive::apply_extrinsic(extrinsic)
        }

        fn finalize_block() -> <Block as BlockT>::Header {
            Executive::finalize_block()
        }

        fn inherent_extrinsics(data: sp_inherents::InherentData) -> Vec<<Block as BlockT>::Extrinsic> {
            data.create_extrinsics()
        }

        fn check_inherents(
            block: Block,
            data: sp_inherents::InherentData,
        ) -> sp_inherents::CheckInherentsResult {
            data.check_extrinsics(&block)
        }
    }

    impl sp_transaction_pool::runtime_api::TaggedTransactionQueue<Block> for Runtime {
        fn validate_transaction(
            source: TransactionSource,
            tx: <Block as BlockT>::Extrinsic,
            block_hash: <Block as BlockT>::Hash,
        ) -> TransactionValidity {
            Executive::validate_transaction(source, tx, block_hash)
        }
    }

    impl sp_offchain::OffchainWorkerApi<Block> for Runtime {
        fn offchain_worker(header: &<Block as BlockT>::Header) {
            Executive::offchain_worker(header)
        }
    }

    impl sp_consensus_aura::AuraApi<Block, AuraId> for Runtime {
        fn slot_duration() -> sp_consensus_aura::SlotDuration {
            sp_consensus_aura::SlotDuration::from_millis(Aura::slot_duration())
        }

        fn authorities() -> Vec<AuraId> {
            pallet_aura::Authorities::<Runtime>::get().into_inner()
        }
    }

    impl sp_session::SessionKeys<Block> for Runtime {
        fn generate_session_keys(seed: Option<Vec<u8>>) -> Vec<u8> {
            opaque::SessionKeys::generate(seed)
        }

        fn decode_session_keys(
            encoded: Vec<u8>,
        ) -> Option<Vec<(Vec<u8>, KeyTypeId)>> {
            opaque::SessionKeys::decode_into_raw_public_keys(&encoded)
        }
    }

    impl sp_consensus_grandpa::GrandpaApi<Block> for Runtime {
        fn grandpa_authorities() -> sp_consensus_grandpa::AuthorityList {
            Grandpa::grandpa_authorities()
        }

        fn current_set_id() -> sp_consensus_grandpa::SetId {
            Grandpa::current_set_id()
        }

        fn submit_report_equivocation_unsigned_extrinsic(
            _equivocation_proof: sp_consensus_grandpa::EquivocationProof<
                <Block as BlockT>::Hash,
                NumberFor<Block>,
            >,
            _key_owner_proof: sp_consensus_grandpa::OpaqueKeyOwnershipProof,
        ) -> Option<()> {
            None
        }

        fn generate_key_ownership_proof(
            _set_id: sp_consensus_grandpa::SetId,
            _authority_id: GrandpaId,
        ) -> Option<sp_consensus_grandpa::OpaqueKeyOwnershipProof> {
            None
        }
    }

    impl frame_system_rpc_runtime_api::AccountNonceApi<Block, AccountId, Nonce> for Runtime {
        fn account_nonce(account: AccountId) -> Nonce {
            System::account_nonce(account)
        }
    }

    impl pallet_authorship_runtime_api::AuthorshipApi<Block, AccountId> for Runtime {
        fn lookup_claim(fingerprint: Fingerprint) -> ClaimRecord<AccountId> {
            Authorship::lookup_claim(&fingerprint)
        }

        fn verify_claim(fingerprint: Fingerprint, timestamp: u64, claimant: AccountId, name: Vec<u8>) -> bool {
            Authorship::verify_claim(&fingerprint, timestamp, &claimant, &name)
        }

        fn claim_count() -> u64 {
            Authorship::claim_count()
        }

        fn claim_at(index: u64) -> Option<Fingerprint> {
            Authorship::claim_at(index)
        }
    }

    impl sp_genesis_builder::GenesisBuilder<Block> for Runtime {
        fn build_state(config: Vec<u8>) -> sp_genesis_builder::Result {
            frame_support::genesis_builder_helper::build_state::<RuntimeGenesisConfig>(config)
        }

        fn get_preset(id: &Option<sp_genesis_builder::PresetId>) -> Option<Vec<u8>> {
            frame_support::genesis_builder_helper::get_preset::<RuntimeGenesisConfig>(id, |_| None)
        }

        fn preset_names() -> Vec<sp_genesis_builder::PresetId> {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_support::traits::Get;

    #[test]
    fn claim_window_is_five_minutes_back_thirty_seconds_ahead() {
        assert_eq!(<Runtime as pallet_authorship::Config>::AllowedMarginEarly::get(), 300);
        assert_eq!(<Runtime as pallet_authorship::Config>::AllowedMarginLate::get(), 30);
    }

    #[test]
    fn registry_queries_on_empty_genesis() {
        let storage = RuntimeGenesisConfig::default().build_storage().unwrap();
        sp_io::TestExternalities::new(storage).execute_with(|| {
            let fingerprint = Fingerprint::compute(b"hello");
            assert_eq!(Authorship::claim_count(), 0);
            assert_eq!(Authorship::lookup_claim(&fingerprint), ClaimRecord::absent());
        });
    }

    #[test]
    fn authorship_api_reads_genesis_claims() {
        use pallet_authorship_runtime_api::runtime_decl_for_authorship_api::AuthorshipApiV1;

        let fingerprint = Fingerprint::compute(b"hello");
        let alice = AccountId::new([1u8; 32]);
        let bob = AccountId::new([2u8; 32]);
        let config = RuntimeGenesisConfig {
            authorship: pallet_authorship::GenesisConfig {
                claims: vec![(fingerprint.storage_key(), 1_700_000_000, alice.clone(), b"Bob".to_vec())],
            },
            ..Default::default()
        };
        let storage = config.build_storage().unwrap();

        sp_io::TestExternalities::new(storage).execute_with(|| {
            assert_eq!(<Runtime as AuthorshipApiV1<Block, AccountId>>::claim_count(), 1);
            assert_eq!(<Runtime as AuthorshipApiV1<Block, AccountId>>::claim_at(0), Some(fingerprint));
            assert_eq!(<Runtime as AuthorshipApiV1<Block, AccountId>>::claim_at(1), None);

            let record = <Runtime as AuthorshipApiV1<Block, AccountId>>::lookup_claim(fingerprint);
            assert!(record.exists);
            assert_eq!(record.timestamp, 1_700_000_000);
            assert_eq!(record.claimant, Some(alice.clone()));
            assert_eq!(record.name, b"Bob".to_vec());

            assert!(<Runtime as AuthorshipApiV1<Block, AccountId>>::verify_claim(
                fingerprint,
                1_700_000_000,
                alice.clone(),
                b"Bob".to_vec(),
            ));
            assert!(!<Runtime as AuthorshipApiV1<Block, AccountId>>::verify_claim(
                fingerprint,
                1_700_000_000,
                bob,
                b"Bob".to_vec(),
            ));
            assert!(!<Runtime as AuthorshipApiV1<Block, AccountId>>::verify_claim(
                Fingerprint::compute(b"hello world"),
                1_700_000_000,
                alice,
                b"Bob".to_vec(),
            ));
        });
    }
}
