//! Benchmarking setup for pallet-authorship

use super::*;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use sp_std::vec;

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn submit_claim(n: Linear<0, 1024>) {
        let caller: T::AccountId = whitelisted_caller();
        // 1000 seconds of block time.
        pallet_timestamp::Now::<T>::put(T::Moment::from(1_000_000u32));

        let fingerprint = Fingerprint::compute(b"benchmark");
        let name = vec![b'a'; n as usize];

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), fingerprint.to_bytes().to_vec(), 1_000u64, name.clone());

        assert_eq!(ClaimCount::<T>::get(), 1);
        assert!(Pallet::<T>::verify_claim(&fingerprint, 1_000, &caller, &name));
    }

    impl_benchmark_test_suite!(Pallet, crate::tests::new_test_ext(), crate::tests::Test);
}
