#![no_std]

multiversx_sc::imports!();

pub mod staking_registry_proxy;
pub mod types;

use types::TransferStatus;

// ============================================================
// Constants
// ============================================================

/// Basis points denominator for the inflation rate
const BPS_DENOMINATOR: u64 = 10_000;

/// Scheduled mint years are whole 365-day periods, no leap adjustment
const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Treasury staking cap: internal stake must stay strictly below
/// 67% of total supply (67000 / 100000)
const STAKING_CAP_NUMERATOR: u64 = 67_000;
const STAKING_CAP_DENOMINATOR: u64 = 100_000;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait NebToken {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        token_name: ManagedBuffer,
        token_symbol: ManagedBuffer,
        initial_supply: BigUint,
        mint_start_year: u64,
        initial_inflation_rate: u64,
        inflation_rate_decay: u64,
    ) {
        require!(inflation_rate_decay > 1, "Inflation decay rate too low");

        let deployer = self.blockchain().get_caller();
        self.controller().set(&deployer);

        self.token_name().set(&token_name);
        self.token_symbol().set(&token_symbol);

        // The entire initial supply is treasury-held: the ledger's own
        // address is the treasury identity.
        let treasury = self.blockchain().get_sc_address();
        self.total_supply().set(&initial_supply);
        self.balances(&treasury).set(&initial_supply);

        self.mint_start_year().set(mint_start_year);
        self.initial_inflation_rate().set(initial_inflation_rate);
        self.inflation_rate_decay().set(inflation_rate_decay);
        self.initial_mint_timestamp()
            .set(self.blockchain().get_block_timestamp());

        // Year 0 holds the initial supply; the schedule chains off it.
        self.completed_mints(0u64).set(&initial_supply);

        self.transfer_status().set(TransferStatus::Locked);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: transfer / approve / transferFrom
    // The shared balance primitive consumed by the registry and
    // the swap program. Every balance move runs the gate.
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.perform_transfer(caller, to, amount);
    }

    #[endpoint(approve)]
    fn approve(&self, spender: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.set_allowance(caller, spender, amount);
    }

    #[endpoint(transferFrom)]
    fn transfer_from(&self, from: ManagedAddress, to: ManagedAddress, amount: BigUint) {
        let spender = self.blockchain().get_caller();
        let allowed = self.allowances(&from, &spender).get();
        require!(
            allowed >= amount,
            "Insufficient allowance: allowed {}, requested {}",
            allowed,
            amount
        );
        self.allowances(&from, &spender).set(allowed - &amount);
        self.perform_transfer(from, to, amount);
    }

    // ========================================================
    // ENDPOINT: mintNewTokens
    // Scheduled inflation. Year mintStartYear takes its amount
    // from year 0 at the initial rate; every later year decays
    // the previous year's amount by (d-1)/d. Years may not be
    // skipped or repeated.
    // ========================================================

    #[endpoint(mintNewTokens)]
    fn mint_new_tokens(&self, year: u64) {
        self.require_controller();
        require!(self.mint_enabled().get(), "Minting is disabled");

        let mint_start_year = self.mint_start_year().get();
        require!(
            year >= mint_start_year,
            "Mint year {} is in the past",
            year
        );

        let now = self.blockchain().get_block_timestamp();
        let elapsed_years = (now - self.initial_mint_timestamp().get()) / SECONDS_PER_YEAR;
        require!(
            elapsed_years >= year,
            "Mint year {} is in the future",
            year
        );

        require!(
            self.completed_mints(year).get() == 0u64,
            "Mint already completed for year {}",
            year
        );

        let amount = if year == mint_start_year {
            self.completed_mints(0u64).get() * self.initial_inflation_rate().get()
                / BPS_DENOMINATOR
        } else {
            let previous = self.completed_mints(year - 1).get();
            require!(
                previous > 0u64,
                "No mint completed for prior year {}",
                (year - 1)
            );
            let decay = self.inflation_rate_decay().get();
            previous * (decay - 1) / decay
        };

        // Minted tokens are treasury-held, not yet in circulation.
        let treasury = self.blockchain().get_sc_address();
        self.perform_transfer(ManagedAddress::zero(), treasury, amount.clone());

        self.completed_mints(year).set(&amount);
        self.mint_completed_event(year, &amount);
    }

    // ========================================================
    // ENDPOINTS: controller configuration
    // ========================================================

    #[endpoint(setMintEnabled)]
    fn set_mint_enabled(&self, enabled: bool) {
        self.require_controller();
        self.mint_enabled().set(enabled);
        self.mint_enabled_toggled_event(enabled);
    }

    #[endpoint(setInflationDecay)]
    fn set_inflation_decay(&self, decay: u64) {
        self.require_controller();
        require!(decay > 1, "Inflation decay rate too low");
        self.inflation_rate_decay().set(decay);
        self.decay_rate_changed_event(decay);
    }

    #[endpoint(setStakingRegistry)]
    fn set_staking_registry(&self, address: ManagedAddress) {
        self.require_controller();
        require!(
            self.staking_registry().is_empty(),
            "Staking bridge already set"
        );
        self.staking_registry().set(&address);

        // The registry must be able to push tokens back out while
        // transfers are still locked.
        self.unlocked_addresses().insert(address.clone());

        self.staking_bridge_set_event(&address);
        self.address_unlock_toggled_event(&address, true);
    }

    #[endpoint(issueTokens)]
    fn issue_tokens(&self, recipient: ManagedAddress, amount: BigUint) {
        self.require_controller();
        let treasury = self.blockchain().get_sc_address();
        self.perform_transfer(treasury, recipient.clone(), amount.clone());
        self.tokens_issued_event(&recipient, &amount);
    }

    #[endpoint(setAddressUnlocked)]
    fn set_address_unlocked(&self, address: ManagedAddress, unlocked: bool) {
        self.require_controller();
        if unlocked {
            self.unlocked_addresses().insert(address.clone());
        } else {
            self.unlocked_addresses().swap_remove(&address);
        }
        self.address_unlock_toggled_event(&address, unlocked);
    }

    #[endpoint(enableTransfers)]
    fn enable_transfers(&self) {
        self.require_controller();
        // One-way: there is no endpoint that sets Locked again.
        self.transfer_status().set(TransferStatus::Unrestricted);
        self.transfers_enabled_event();
    }

    #[endpoint(transferControl)]
    fn transfer_control(&self, new_controller: ManagedAddress) {
        self.require_controller();
        let previous = self.controller().get();
        self.controller().set(&new_controller);
        self.control_transferred_event(&previous, &new_controller);
    }

    // ========================================================
    // ENDPOINTS: treasury staking proxy
    // Stakes treasury-held tokens into the registry under the
    // ledger's own identity. The registry pulls the tokens via
    // the bridge allowance.
    // ========================================================

    #[endpoint(stake)]
    fn stake(&self, pub_key: ManagedBuffer, amount: BigUint) {
        self.require_controller();
        let bridge = self.staking_registry();
        require!(!bridge.is_empty(), "Staking bridge not set");

        let max_stake =
            self.total_supply().get() * STAKING_CAP_NUMERATOR / STAKING_CAP_DENOMINATOR;
        let staked = self.internal_staked_neb().get();
        require!(
            &staked + &amount < max_stake,
            "Staking rate exceeded: staked {}, maximum {}",
            staked,
            max_stake
        );

        self.tx()
            .to(&bridge.get())
            .typed(staking_registry_proxy::StakingRegistryProxy)
            .stake(amount.clone(), pub_key)
            .sync_call();

        self.internal_staked_neb().set(staked + amount);
    }

    #[endpoint(removeStake)]
    fn remove_stake(&self, pub_key: ManagedBuffer, amount: BigUint) {
        self.require_controller();
        let bridge = self.staking_registry();
        require!(!bridge.is_empty(), "Staking bridge not set");

        // The registry's own insufficiency check rejects
        // over-withdrawal before this decrement can underflow.
        self.tx()
            .to(&bridge.get())
            .typed(staking_registry_proxy::StakingRegistryProxy)
            .remove_stake(amount.clone(), pub_key)
            .sync_call();

        self.internal_staked_neb().update(|s| *s -= amount);
    }

    #[endpoint(approveStakingBridge)]
    fn approve_staking_bridge(&self) {
        self.require_controller();
        let bridge = self.staking_registry();
        require!(!bridge.is_empty(), "Staking bridge not set");
        let treasury = self.blockchain().get_sc_address();
        self.set_allowance(treasury, bridge.get(), self.unlimited_allowance());
    }

    #[endpoint(revokeStakingBridgeAllowance)]
    fn revoke_staking_bridge_allowance(&self) {
        self.require_controller();
        let bridge = self.staking_registry();
        require!(!bridge.is_empty(), "Staking bridge not set");
        let treasury = self.blockchain().get_sc_address();
        self.set_allowance(treasury, bridge.get(), BigUint::zero());
    }

    // ========================================================
    // ENDPOINT: registerNebulaKey
    // Open to any holder. Last write wins; keys are not unique
    // across callers.
    // ========================================================

    #[endpoint(registerNebulaKey)]
    fn register_nebula_key(&self, pub_key: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        self.nebula_keys(&caller).set(&pub_key);
        self.key_registered_event(&caller, &pub_key);
    }

    // ========================================================
    // INTERNAL: transfer gate + balance primitive
    // Every path that moves balance funnels through here,
    // including scheduled mints (zero-address sender).
    // ========================================================

    fn require_transfer_permitted(&self, from: &ManagedAddress, to: &ManagedAddress) {
        if from == &self.blockchain().get_sc_address() {
            return;
        }
        if from.is_zero() {
            return;
        }
        if self.transfer_status().get() == TransferStatus::Unrestricted {
            return;
        }
        let bridge = self.staking_registry();
        if !bridge.is_empty() && *to == bridge.get() {
            return;
        }
        require!(
            self.unlocked_addresses().contains(from),
            "Transfers are disabled"
        );
    }

    fn perform_transfer(&self, from: ManagedAddress, to: ManagedAddress, amount: BigUint) {
        self.require_transfer_permitted(&from, &to);

        if from.is_zero() {
            // Mint: supply grows by exactly the credited amount.
            self.total_supply().update(|s| *s += &amount);
        } else {
            let balance = self.balances(&from).get();
            require!(
                balance >= amount,
                "Insufficient balance: balance {}, requested {}",
                balance,
                amount
            );
            self.balances(&from).set(balance - &amount);
        }

        self.balances(&to).update(|b| *b += &amount);
        self.transfer_event(&from, &to, &amount);
    }

    /// Sentinel for the bridge allowance: 2^256 - 1, matching the
    /// conventional unlimited ERC20 approval.
    fn unlimited_allowance(&self) -> BigUint {
        (BigUint::from(1u64) << 256usize) - 1u64
    }

    fn set_allowance(&self, owner: ManagedAddress, spender: ManagedAddress, amount: BigUint) {
        self.allowances(&owner, &spender).set(&amount);
        self.approval_event(&owner, &spender, &amount);
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

    #[view(getBalance)]
    fn balance_of(&self, address: ManagedAddress) -> BigUint {
        self.balances(&address).get()
    }

    #[view(getAllowance)]
    fn allowance_of(&self, owner: ManagedAddress, spender: ManagedAddress) -> BigUint {
        self.allowances(&owner, &spender).get()
    }

    #[view(isTransfersEnabled)]
    fn is_transfers_enabled(&self) -> bool {
        self.transfer_status().get() == TransferStatus::Unrestricted
    }

    #[view(isAddressUnlocked)]
    fn is_address_unlocked(&self, address: ManagedAddress) -> bool {
        self.unlocked_addresses().contains(&address)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("approval")]
    fn approval_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] spender: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("mintEnabledToggled")]
    fn mint_enabled_toggled_event(&self, #[indexed] enabled: bool);

    #[event("mintCompleted")]
    fn mint_completed_event(&self, #[indexed] year: u64, amount: &BigUint);

    #[event("decayRateChanged")]
    fn decay_rate_changed_event(&self, #[indexed] decay: u64);

    #[event("tokensIssued")]
    fn tokens_issued_event(&self, #[indexed] recipient: &ManagedAddress, amount: &BigUint);

    #[event("transfersEnabled")]
    fn transfers_enabled_event(&self);

    #[event("stakingBridgeSet")]
    fn staking_bridge_set_event(&self, #[indexed] address: &ManagedAddress);

    #[event("addressUnlockToggled")]
    fn address_unlock_toggled_event(&self, #[indexed] address: &ManagedAddress, unlocked: bool);

    #[event("keyRegistered")]
    fn key_registered_event(&self, #[indexed] caller: &ManagedAddress, key: &ManagedBuffer);

    #[event("controlTransferred")]
    fn control_transferred_event(
        &self,
        #[indexed] previous: &ManagedAddress,
        #[indexed] current: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Identity / metadata ──

    #[view(getController)]
    #[storage_mapper("controller")]
    fn controller(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getTokenName)]
    #[storage_mapper("tokenName")]
    fn token_name(&self) -> SingleValueMapper<ManagedBuffer>;

    #[view(getTokenSymbol)]
    #[storage_mapper("tokenSymbol")]
    fn token_symbol(&self) -> SingleValueMapper<ManagedBuffer>;

    // ── Balance ledger ──

    #[view(getTotalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("balances")]
    fn balances(&self, address: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("allowances")]
    fn allowances(
        &self,
        owner: &ManagedAddress,
        spender: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    // ── Transfer lock ──

    #[storage_mapper("transferStatus")]
    fn transfer_status(&self) -> SingleValueMapper<TransferStatus>;

    #[storage_mapper("unlockedAddresses")]
    fn unlocked_addresses(&self) -> UnorderedSetMapper<ManagedAddress>;

    // ── Inflation schedule ──

    #[view(isMintEnabled)]
    #[storage_mapper("mintEnabled")]
    fn mint_enabled(&self) -> SingleValueMapper<bool>;

    #[view(getInitialMintTimestamp)]
    #[storage_mapper("initialMintTimestamp")]
    fn initial_mint_timestamp(&self) -> SingleValueMapper<u64>;

    #[view(getMintStartYear)]
    #[storage_mapper("mintStartYear")]
    fn mint_start_year(&self) -> SingleValueMapper<u64>;

    #[view(getInitialInflationRate)]
    #[storage_mapper("initialInflationRate")]
    fn initial_inflation_rate(&self) -> SingleValueMapper<u64>;

    #[view(getInflationRateDecay)]
    #[storage_mapper("inflationRateDecay")]
    fn inflation_rate_decay(&self) -> SingleValueMapper<u64>;

    #[view(getCompletedMint)]
    #[storage_mapper("completedMints")]
    fn completed_mints(&self, year: u64) -> SingleValueMapper<BigUint>;

    // ── Staking bridge ──

    #[view(getStakingRegistry)]
    #[storage_mapper("stakingRegistry")]
    fn staking_registry(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getInternalStakedNeb)]
    #[storage_mapper("internalStakedNeb")]
    fn internal_staked_neb(&self) -> SingleValueMapper<BigUint>;

    // ── Nebula key registry ──

    #[view(getNebulaKey)]
    #[storage_mapper("nebulaKeys")]
    fn nebula_keys(&self, address: &ManagedAddress) -> SingleValueMapper<ManagedBuffer>;
}
