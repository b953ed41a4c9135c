#![cfg_attr(not(feature = "std"), no_std)]

//! # Authorship Pallet
//!
//! The Authorship pallet keeps a registry of timestamped authorship claims over
//! file fingerprints. A claim asserts that an account held a given file at a
//! given moment; anyone can later verify or look up the claim.
//!
//! ## Overview
//!
//! - Files are identified by their SHA2-256 multihash (see
//!   [`authorship_fingerprint`]). Only the 32-byte digest is stored.
//! - Each fingerprint can be claimed exactly once. Claims are never amended,
//!   revoked or overwritten.
//! - The submitter supplies the claimed timestamp. It is stored verbatim but
//!   must lie within `[now - AllowedMarginEarly, now + AllowedMarginLate]`,
//!   where `now` is the block timestamp in seconds.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! - `submit_claim` - Claim a fingerprint for the signed origin
//!
//! ### Public Functions
//!
//! - `verify_claim` - Exact match of timestamp, claimant and name
//! - `lookup_claim` - Stored record, or the canonical absent record
//! - `claim_count` - Number of accepted claims
//! - `claim_at` - Fingerprint accepted at a given position in the claim log

pub use pallet::*;
pub use weights::WeightInfo;

pub use authorship_fingerprint::{Fingerprint, FingerprintError, StorageKey};

pub mod weights;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

const LOG_TARGET: &str = "runtime::authorship";

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::UniqueSaturatedInto;
    use sp_std::vec::Vec;

    /// The pallet's configuration trait.
    #[pallet::config]
    pub trait Config: frame_system::Config + pallet_timestamp::Config {
        /// The overarching event type.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// How far in the past (seconds) a claimed timestamp may lie.
        #[pallet::constant]
        type AllowedMarginEarly: Get<u64>;

        /// How far in the future (seconds) a claimed timestamp may lie.
        #[pallet::constant]
        type AllowedMarginLate: Get<u64>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::without_storage_info]
    pub struct Pallet<T>(_);

    /// A stored claim.
    #[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
    pub struct Claim<AccountId> {
        /// Unix time in seconds, as claimed by the submitter.
        pub timestamp: u64,
        /// Account that submitted the claim.
        pub claimant: AccountId,
        /// Free-form name supplied with the claim. Not interpreted.
        pub name: Vec<u8>,
    }

    /// Query shape for lookups. `exists == false` with zeroed fields stands for
    /// "never claimed".
    #[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
    pub struct ClaimRecord<AccountId> {
        pub exists: bool,
        pub timestamp: u64,
        pub claimant: Option<AccountId>,
        pub name: Vec<u8>,
    }

    impl<AccountId> ClaimRecord<AccountId> {
        /// The record returned for a fingerprint that was never claimed.
        pub fn absent() -> Self {
            ClaimRecord { exists: false, timestamp: 0, claimant: None, name: Vec::new() }
        }
    }

    impl<AccountId> From<Option<Claim<AccountId>>> for ClaimRecord<AccountId> {
        fn from(claim: Option<Claim<AccountId>>) -> Self {
            match claim {
                Some(Claim { timestamp, claimant, name }) => {
                    ClaimRecord { exists: true, timestamp, claimant: Some(claimant), name }
                }
                None => ClaimRecord::absent(),
            }
        }
    }

    /// Claims keyed by fingerprint.
    ///
    /// A key is written once, on the first accepted submission, and never
    /// touched again.
    #[pallet::storage]
    pub type Claims<T: Config> =
        StorageMap<_, Blake2_128Concat, Fingerprint, Claim<T::AccountId>, OptionQuery>;

    /// Number of accepted claims. Equals the number of keys in `Claims`.
    #[pallet::storage]
    #[pallet::getter(fn claim_count)]
    pub type ClaimCount<T: Config> = StorageValue<_, u64, ValueQuery>;

    /// Accepted fingerprints in acceptance order, indexed `0..ClaimCount`.
    #[pallet::storage]
    #[pallet::getter(fn claim_at)]
    pub type ClaimLog<T: Config> = StorageMap<_, Twox64Concat, u64, Fingerprint, OptionQuery>;

    /// Genesis configuration for the pallet
    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Claims present from genesis: `(key, timestamp, claimant, name)`.
        pub claims: Vec<(StorageKey, u64, T::AccountId, Vec<u8>)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            for (key, timestamp, claimant, name) in &self.claims {
                let fingerprint = Fingerprint::from_storage_key(*key);
                assert!(
                    !Claims::<T>::contains_key(fingerprint),
                    "duplicate fingerprint in genesis claims"
                );
                Pallet::<T>::insert_claim(
                    fingerprint,
                    Claim { timestamp: *timestamp, claimant: claimant.clone(), name: name.clone() },
                );
            }
        }
    }

    /// Events emitted by the pallet
    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A fingerprint was claimed.
        Claimed {
            fingerprint: Fingerprint,
            timestamp: u64,
            submitter: T::AccountId,
            name: Vec<u8>,
        },
    }

    /// Errors that can occur in the pallet
    #[pallet::error]
    pub enum Error<T> {
        /// The identifier is neither a SHA2-256 multihash nor a 32-byte key
        MalformedIdentifier,
        /// This fingerprint has already been claimed
        DuplicateClaim,
        /// The claimed timestamp is outside the accepted window around block time
        TimestampOutOfRange,
    }

    /// Dispatchable functions (extrinsics)
    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Claim a fingerprint for the signed origin.
        ///
        /// # Arguments
        ///
        /// * `origin` - The claimant
        /// * `identifier` - 34-byte SHA2-256 multihash, or the bare 32-byte digest
        /// * `timestamp` - Claimed unix time in seconds
        /// * `name` - Arbitrary bytes stored with the claim
        ///
        /// # Errors
        ///
        /// - `MalformedIdentifier` if the identifier does not parse
        /// - `DuplicateClaim` if the fingerprint is already claimed
        /// - `TimestampOutOfRange` if `timestamp` is outside the window
        ///
        /// All checks happen before any storage write.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::submit_claim(name.len() as u32))]
        pub fn submit_claim(
            origin: OriginFor<T>,
            identifier: Vec<u8>,
            timestamp: u64,
            name: Vec<u8>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let fingerprint = Fingerprint::from_identifier(&identifier).map_err(|err| {
                log::debug!(target: LOG_TARGET, "rejecting malformed identifier: {}", err);
                Error::<T>::MalformedIdentifier
            })?;

            if Claims::<T>::contains_key(fingerprint) {
                log::debug!(target: LOG_TARGET, "rejecting duplicate claim for {}", fingerprint);
                return Err(Error::<T>::DuplicateClaim.into());
            }

            let now = Self::now_seconds();
            Self::check_timestamp(timestamp, now).map_err(|err| {
                log::debug!(
                    target: LOG_TARGET,
                    "rejecting claim for {}: timestamp {} outside window around {}",
                    fingerprint,
                    timestamp,
                    now,
                );
                err
            })?;

            let index = Self::insert_claim(
                fingerprint,
                Claim { timestamp, claimant: who.clone(), name: name.clone() },
            );
            log::debug!(target: LOG_TARGET, "claim #{} accepted for {}", index, fingerprint);

            Self::deposit_event(Event::Claimed { fingerprint, timestamp, submitter: who, name });

            Ok(())
        }
    }

    /// Public helper functions (not dispatchable)
    impl<T: Config> Pallet<T> {
        /// Block time in whole seconds.
        pub fn now_seconds() -> u64 {
            let now: u64 = pallet_timestamp::Pallet::<T>::get().unique_saturated_into();
            now / 1000
        }

        /// Check a claimed timestamp against `now`. Both bounds are inclusive.
        pub fn check_timestamp(claimed: u64, now: u64) -> Result<(), Error<T>> {
            let earliest = now.saturating_sub(T::AllowedMarginEarly::get());
            let latest = now.saturating_add(T::AllowedMarginLate::get());
            ensure!(earliest <= claimed && claimed <= latest, Error::<T>::TimestampOutOfRange);
            Ok(())
        }

        /// True iff the fingerprint is claimed with exactly these fields.
        pub fn verify_claim(
            fingerprint: &Fingerprint,
            timestamp: u64,
            claimant: &T::AccountId,
            name: &[u8],
        ) -> bool {
            Claims::<T>::get(fingerprint).map_or(false, |claim| {
                claim.timestamp == timestamp && &claim.claimant == claimant && claim.name == name
            })
        }

        /// The stored record, or [`ClaimRecord::absent`].
        pub fn lookup_claim(fingerprint: &Fingerprint) -> ClaimRecord<T::AccountId> {
            Claims::<T>::get(fingerprint).into()
        }

        /// The stored claim, if any.
        pub fn claim(fingerprint: &Fingerprint) -> Option<Claim<T::AccountId>> {
            Claims::<T>::get(fingerprint)
        }

        /// Check if a fingerprint has been claimed
        pub fn is_claimed(fingerprint: &Fingerprint) -> bool {
            Claims::<T>::contains_key(fingerprint)
        }

        /// Store a claim, bump the counter and append to the log. Returns the
        /// log index. Callers must have checked that the key is free.
        fn insert_claim(fingerprint: Fingerprint, claim: Claim<T::AccountId>) -> u64 {
            let index = ClaimCount::<T>::get();
            Claims::<T>::insert(fingerprint, claim);
            ClaimLog::<T>::insert(index, fingerprint);
            ClaimCount::<T>::put(index.saturating_add(1));
            index
        }
    }
}
