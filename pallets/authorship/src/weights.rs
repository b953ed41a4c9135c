//! Weights for pallet_authorship
//!
//! Hand-derived from the storage accesses of each call until benchmark output
//! from `benchmarking.rs` replaces them.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet_authorship.
pub trait WeightInfo {
    fn submit_claim(n: u32) -> Weight;
}

/// Weights for pallet_authorship using the runtime's configured database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// Storage: `Authorship::Claims` (r:1 w:1)
    /// Storage: `Timestamp::Now` (r:1 w:0)
    /// Storage: `Authorship::ClaimCount` (r:1 w:1)
    /// Storage: `Authorship::ClaimLog` (r:0 w:1)
    /// The range of component `n` is `[0, 1024]`.
    fn submit_claim(n: u32) -> Weight {
        Weight::from_parts(25_000_000, 3_600)
            .saturating_add(Weight::from_parts(2_000, 0).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(3_u64))
            .saturating_add(T::DbWeight::get().writes(3_u64))
    }
}

// For backwards compatibility and tests
impl WeightInfo for () {
    fn submit_claim(n: u32) -> Weight {
        Weight::from_parts(25_000_000, 3_600)
            .saturating_add(Weight::from_parts(2_000, 0).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(3_u64))
            .saturating_add(RocksDbWeight::get().writes(3_u64))
    }
}
