multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Transfer-Stake Status — delegated/portable stake switch
// ============================================================

/// One-way switch gating `stakeFor` and `transferStake`. There is no
/// disable path once the controller enables it.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum TransferStakeStatus {
    Disabled,
    /// Terminal state.
    Enabled,
}
