multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Transfer Status — global transfer lock
// ============================================================

/// One-way switch: the token deploys Locked and the controller can
/// release it exactly once. There is no path back to Locked.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum TransferStatus {
    /// Only the treasury, the staking registry and unlocked addresses
    /// may originate transfers.
    Locked,
    /// Anyone may transfer. Terminal state.
    Unrestricted,
}
