#![no_std]

multiversx_sc::imports!();

pub mod token_proxy;

// ============================================================
// Contract
// ============================================================
//
// One-shot VEGA → NEB converter. The NEB allocation is pre-funded
// into this contract by the token controller. Phases over time:
//
//   now <  swap_deadline                       swap only
//   swap_deadline <= now < leftover_deadline   redeemRemainder only
//   now >= leftover_deadline                   retired
//
// The conversion rate is fixed against the legacy supply snapshot,
// independent of how much others have swapped.

#[multiversx_sc::contract]
pub trait VegaSwap {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        vega_token: ManagedAddress,
        neb_token: ManagedAddress,
        vega_total_supply: BigUint,
        nebula_allocation: BigUint,
        max_dilution_ratio: u64,
        swap_deadline: u64,
        leftover_deadline: u64,
    ) {
        let deployer = self.blockchain().get_caller();
        self.controller().set(&deployer);

        self.vega_token().set(&vega_token);
        self.neb_token().set(&neb_token);
        self.vega_total_supply().set(&vega_total_supply);
        self.nebula_allocation().set(&nebula_allocation);
        self.max_dilution_ratio().set(max_dilution_ratio);
        self.swap_deadline().set(swap_deadline);
        self.leftover_deadline().set(leftover_deadline);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: swap
    // amount == 0 sweeps the caller's full VEGA balance.
    // ========================================================

    #[endpoint(swap)]
    fn swap(&self, amount: BigUint) {
        let now = self.blockchain().get_block_timestamp();
        require!(now < self.swap_deadline().get(), "Vega deadline passed");

        let caller = self.blockchain().get_caller();
        let vega_amount = if amount == 0u64 {
            self.vega_balance_of(&caller)
        } else {
            amount
        };

        // Pull the legacy tokens into custody first; an unauthorized
        // or underfunded pull aborts the whole transaction.
        let own_address = self.blockchain().get_sc_address();
        self.tx()
            .to(&self.vega_token().get())
            .typed(token_proxy::TokenProxy)
            .transfer_from(&caller, &own_address, &vega_amount)
            .sync_call();

        let neb_amount = self.calculate_redeemable_neb(vega_amount.clone());
        self.tx()
            .to(&self.neb_token().get())
            .typed(token_proxy::TokenProxy)
            .transfer(&caller, &neb_amount)
            .sync_call();

        self.vega_total_swapped().update(|t| *t += &vega_amount);
        self.nebula_total_swapped().update(|t| *t += &neb_amount);
        self.vega_swapped(&caller).update(|s| *s += &vega_amount);
        self.nebula_swapped(&caller).update(|s| *s += &neb_amount);
        self.can_redeem_leftover(&caller).set(true);

        self.swap_executed_event(&caller, &vega_amount, &neb_amount);
    }

    // ========================================================
    // ENDPOINT: redeemRemainder
    // Pro-rata share of the undistributed allocation, weighted by
    // the caller's cumulative VEGA contribution. Strict one-shot.
    // The too-early case reuses the swap-deadline error identity.
    // ========================================================

    #[endpoint(redeemRemainder)]
    fn redeem_remainder(&self) {
        require!(
            self.redeem_leftover_enabled().get(),
            "Redeem leftover not enabled"
        );

        let now = self.blockchain().get_block_timestamp();
        require!(now >= self.swap_deadline().get(), "Vega deadline passed");
        require!(
            now < self.leftover_deadline().get(),
            "Redeem leftover deadline passed"
        );

        let caller = self.blockchain().get_caller();
        require!(
            self.can_redeem_leftover(&caller).get(),
            "Ineligible for leftover redemption"
        );

        let remainder = self.calculate_leftover_neb(caller.clone());
        self.tx()
            .to(&self.neb_token().get())
            .typed(token_proxy::TokenProxy)
            .transfer(&caller, &remainder)
            .sync_call();

        // The pool snapshot (allocation - total swapped) stays fixed,
        // so redemption order cannot change anyone's share.
        self.nebula_swapped(&caller).update(|s| *s += &remainder);
        self.can_redeem_leftover(&caller).set(false);

        self.leftover_redeemed_event(&caller, &remainder);
    }

    // ========================================================
    // ENDPOINT: enableRedeemLeftover (controller-only)
    // ========================================================

    #[endpoint(enableRedeemLeftover)]
    fn enable_redeem_leftover(&self) {
        self.require_controller();
        self.redeem_leftover_enabled().set(true);
        self.redeem_leftover_enabled_event();
    }

    #[endpoint(transferControl)]
    fn transfer_control(&self, new_controller: ManagedAddress) {
        self.require_controller();
        let previous = self.controller().get();
        self.controller().set(&new_controller);
        self.control_transferred_event(&previous, &new_controller);
    }

    // ========================================================
    // VIEWS: conversion formulas
    // ========================================================

    /// NEB received for swapping `amount` VEGA, at the fixed rate
    /// against the legacy supply snapshot.
    #[view(calculateRedeemableNeb)]
    fn calculate_redeemable_neb(&self, amount: BigUint) -> BigUint {
        self.nebula_allocation().get() * amount / self.vega_total_supply().get()
    }

    /// The address's pro-rata share of the undistributed allocation.
    /// Zero when nothing was ever swapped.
    #[view(calculateLeftoverNeb)]
    fn calculate_leftover_neb(&self, address: ManagedAddress) -> BigUint {
        let vega_total_swapped = self.vega_total_swapped().get();
        if vega_total_swapped == 0u64 {
            return BigUint::zero();
        }
        let leftover_pool = self.nebula_allocation().get() - self.nebula_total_swapped().get();
        self.vega_swapped(&address).get() * leftover_pool / vega_total_swapped
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn vega_balance_of(&self, address: &ManagedAddress) -> BigUint {
        self.tx()
            .to(&self.vega_token().get())
            .typed(token_proxy::TokenProxy)
            .balance_of(address)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn require_controller(&self) {
        require!(
            self.blockchain().get_caller() == self.controller().get(),
            "Only controller can call this"
        );
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("swapExecuted")]
    fn swap_executed_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] vega_amount: &BigUint,
        neb_amount: &BigUint,
    );

    #[event("leftoverRedeemed")]
    fn leftover_redeemed_event(&self, #[indexed] caller: &ManagedAddress, amount: &BigUint);

    #[event("redeemLeftoverEnabled")]
    fn redeem_leftover_enabled_event(&self);

    #[event("controlTransferred")]
    fn control_transferred_event(
        &self,
        #[indexed] previous: &ManagedAddress,
        #[indexed] current: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Immutable creation config ──

    #[view(getController)]
    #[storage_mapper("controller")]
    fn controller(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getVegaToken)]
    #[storage_mapper("vegaToken")]
    fn vega_token(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getNebToken)]
    #[storage_mapper("nebToken")]
    fn neb_token(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getVegaTotalSupply)]
    #[storage_mapper("vegaTotalSupply")]
    fn vega_total_supply(&self) -> SingleValueMapper<BigUint>;

    #[view(getNebulaAllocation)]
    #[storage_mapper("nebulaAllocation")]
    fn nebula_allocation(&self) -> SingleValueMapper<BigUint>;

    // Stored for observers; the proportional formula already bounds
    // issuance to the allocation.
    #[view(getMaxDilutionRatio)]
    #[storage_mapper("maxDilutionRatio")]
    fn max_dilution_ratio(&self) -> SingleValueMapper<u64>;

    #[view(getSwapDeadline)]
    #[storage_mapper("swapDeadline")]
    fn swap_deadline(&self) -> SingleValueMapper<u64>;

    #[view(getLeftoverDeadline)]
    #[storage_mapper("leftoverDeadline")]
    fn leftover_deadline(&self) -> SingleValueMapper<u64>;

    // ── Running totals ──

    #[view(getVegaTotalSwapped)]
    #[storage_mapper("vegaTotalSwapped")]
    fn vega_total_swapped(&self) -> SingleValueMapper<BigUint>;

    #[view(getNebulaTotalSwapped)]
    #[storage_mapper("nebulaTotalSwapped")]
    fn nebula_total_swapped(&self) -> SingleValueMapper<BigUint>;

    #[view(getVegaSwapped)]
    #[storage_mapper("vegaSwapped")]
    fn vega_swapped(&self, address: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getNebulaSwapped)]
    #[storage_mapper("nebulaSwapped")]
    fn nebula_swapped(&self, address: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(canRedeemLeftover)]
    #[storage_mapper("canRedeemLeftover")]
    fn can_redeem_leftover(&self, address: &ManagedAddress) -> SingleValueMapper<bool>;

    #[view(isRedeemLeftoverEnabled)]
    #[storage_mapper("redeemLeftoverEnabled")]
    fn redeem_leftover_enabled(&self) -> SingleValueMapper<bool>;
}
