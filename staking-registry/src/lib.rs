#![no_std]

multiversx_sc::imports!();

pub mod token_proxy;
pub mod types;

use types::TransferStakeStatus;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait StakingRegistry {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, token_address: ManagedAddress) {
        let deployer = self.blockchain().get_caller();
        self.controller().set(&deployer);
        self.token_address().set(&token_address);
        self.transfer_stake_status().set(TransferStakeStatus::Disabled);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: stake
    // Pulls the caller's tokens into registry custody under the
    // caller's pre-granted allowance and books them against the
    // given Nebula public key. A failed pull aborts the whole
    // transaction inside the token contract.
    // ========================================================

    #[endpoint(stake)]
    fn stake(&self, amount: BigUint, pub_key: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        self.pull_tokens(&caller, &amount);
        self.stakes(&caller, &pub_key).update(|s| *s += &amount);
        self.stake_deposited_event(&caller, &amount, &pub_key);
    }

    // ========================================================
    // ENDPOINT: stakeFor
    // Delegated stake: pulls from the caller but credits another
    // owner's stake entry. Gated by the transfer-stake switch;
    // the owner's consent is deliberately not required.
    // ========================================================

    #[endpoint(stakeFor)]
    fn stake_for(&self, amount: BigUint, pub_key: ManagedBuffer, owner: ManagedAddress) {
        self.require_transfer_stake_enabled();
        let caller = self.blockchain().get_caller();
        self.pull_tokens(&caller, &amount);
        self.stakes(&owner, &pub_key).update(|s| *s += &amount);
        self.stake_deposited_event(&owner, &amount, &pub_key);
    }

    // ========================================================
    // ENDPOINT: removeStake
    // ========================================================

    #[endpoint(removeStake)]
    fn remove_stake(&self, amount: BigUint, pub_key: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        self.deduct_stake(&caller, &pub_key, &amount);

        self.tx()
            .to(&self.token_address().get())
            .typed(token_proxy::NebTokenProxy)
            .transfer(&caller, &amount)
            .sync_call();

        self.stake_removed_event(&caller, &amount, &pub_key);
    }

    // ========================================================
    // ENDPOINT: transferStake
    // Reassigns escrowed stake to another owner without moving
    // the underlying token balance.
    // ========================================================

    #[endpoint(transferStake)]
    fn transfer_stake(&self, amount: BigUint, new_address: ManagedAddress, pub_key: ManagedBuffer) {
        self.require_transfer_stake_enabled();
        let caller = self.blockchain().get_caller();
        self.deduct_stake(&caller, &pub_key, &amount);
        self.stakes(&new_address, &pub_key).update(|s| *s += &amount);
        self.stake_transferred_event(&caller, &amount, &new_address, &pub_key);
    }

    // ========================================================
    // ENDPOINT: enableTransferStake (controller-only, one-way)
    // ========================================================

    #[endpoint(enableTransferStake)]
    fn enable_transfer_stake(&self) {
        self.require_controller();
        self.transfer_stake_status().set(TransferStakeStatus::Enabled);
        self.transfer_stake_enabled_event();
    }

    #[endpoint(transferControl)]
    fn transfer_control(&self, new_controller: ManagedAddress) {
        self.require_controller();
        let previous = self.controller().get();
        self.controller().set(&new_controller);
        self.control_transferred_event(&previous, &new_controller);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn pull_tokens(&self, from: &ManagedAddress, amount: &BigUint) {
        let own_address = self.blockchain().get_sc_address();
        self.tx()
            .to(&self.token_address().get())
            .typed(token_proxy::NebTokenProxy)
            .transfer_from(from, &own_address, amount)
            .sync_call();
    }

    fn deduct_stake(&self, owner: &ManagedAddress, pub_key: &ManagedBuffer, amount: &BigUint) {
        let staked = self.stakes(owner, pub_key).get();
        require!(
            *amount <= staked,
            "Insufficient stake: staked {}, missing {}",
            staked,
            (amount - &staked)
        );
        // Entries are zeroed on full withdrawal, never deleted.
        self.stakes(owner, pub_key).set(staked - amount);
    }

    fn require_transfer_stake_enabled(&self) {
        require!(
            self.transfer_stake_status().get() == TransferStakeStatus::Enabled,
            "Transfer stake is disabled"
        );
    }

    fn require_controller(&self) {
        require!(
            self.blockchain().get_caller() == self.controller().get(),
            "Only controller can call this"
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getStake)]
    fn get_stake(&self, address: ManagedAddress, pub_key: ManagedBuffer) -> BigUint {
        self.stakes(&address, &pub_key).get()
    }

    /// Total tokens in registry custody: the registry's own balance in
    /// the underlying token, which equals the sum of all stake entries.
    #[view(getTotalStaked)]
    fn total_staked(&self) -> BigUint {
        let own_address = self.blockchain().get_sc_address();
        self.tx()
            .to(&self.token_address().get())
            .typed(token_proxy::NebTokenProxy)
            .balance_of(own_address)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    #[view(isTransferStakeEnabled)]
    fn is_transfer_stake_enabled(&self) -> bool {
        self.transfer_stake_status().get() == TransferStakeStatus::Enabled
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("stakeDeposited")]
    fn stake_deposited_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &BigUint,
        key: &ManagedBuffer,
    );

    #[event("stakeRemoved")]
    fn stake_removed_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &BigUint,
        key: &ManagedBuffer,
    );

    #[event("stakeTransferred")]
    fn stake_transferred_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] to: &ManagedAddress,
        key: &ManagedBuffer,
    );

    #[event("transferStakeEnabled")]
    fn transfer_stake_enabled_event(&self);

    #[event("controlTransferred")]
    fn control_transferred_event(
        &self,
        #[indexed] previous: &ManagedAddress,
        #[indexed] current: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getController)]
    #[storage_mapper("controller")]
    fn controller(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getTokenAddress)]
    #[storage_mapper("tokenAddress")]
    fn token_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("stakes")]
    fn stakes(
        &self,
        address: &ManagedAddress,
        pub_key: &ManagedBuffer,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("transferStakeStatus")]
    fn transfer_stake_status(&self) -> SingleValueMapper<TransferStakeStatus>;
}
