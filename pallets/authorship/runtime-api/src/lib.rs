#![cfg_attr(not(feature = "std"), no_std)]

//! Runtime API for the authorship registry.
//!
//! Read-only queries served from a block's state. Node-side RPC and off-chain
//! tooling call these instead of decoding raw storage.

use codec::Codec;
use sp_std::vec::Vec;

pub use pallet_authorship::{ClaimRecord, Fingerprint};

sp_api::decl_runtime_apis! {
    pub trait AuthorshipApi<AccountId>
    where
        AccountId: Codec,
    {
        /// The stored record, or the absent record (`exists == false`).
        fn lookup_claim(fingerprint: Fingerprint) -> ClaimRecord<AccountId>;

        /// True iff the fingerprint is claimed with exactly these fields.
        fn verify_claim(fingerprint: Fingerprint, timestamp: u64, claimant: AccountId, name: Vec<u8>) -> bool;

        /// Number of accepted claims.
        fn claim_count() -> u64;

        /// Fingerprint accepted at position `index` of the claim log.
        fn claim_at(index: u64) -> Option<Fingerprint>;
    }
}
