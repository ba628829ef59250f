// Blackbox scenario tests for the staking registry. The NEB token
// contract is deployed alongside so the allowance-gated pulls and the
// locked-transfer push-back paths run for real.

use multiversx_sc_scenario::imports::*;

use neb_token::NebToken;
use staking_registry::StakingRegistry;

const OWNER: TestAddress = TestAddress::new("owner");
const USER1: TestAddress = TestAddress::new("user1");
const USER2: TestAddress = TestAddress::new("user2");
const TOKEN: TestSCAddress = TestSCAddress::new("neb-token");
const REGISTRY: TestSCAddress = TestSCAddress::new("staking-registry");

const TOKEN_CODE: MxscPath = MxscPath::new("../neb-token/output/neb-token.mxsc.json");
const REGISTRY_CODE: MxscPath = MxscPath::new("output/staking-registry.mxsc.json");

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(TOKEN_CODE, neb_token::ContractBuilder);
    blockchain.register_contract(REGISTRY_CODE, staking_registry::ContractBuilder);
    blockchain
}

/// Token + registry wired together, USER1 and USER2 funded with 1000
/// NEB each. Transfers stay globally locked: stake deposits rely on
/// the to-is-registry gate arm, withdrawals on the registry being in
/// the unlocked set.
fn setup() -> ScenarioWorld {
    let mut world = world();
    world.account(OWNER).nonce(1);
    world.account(USER1).nonce(1);
    world.account(USER2).nonce(1);

    world
        .tx()
        .from(OWNER)
        .raw_deploy()
        .argument(&ManagedBuffer::<StaticApi>::from("Nebula"))
        .argument(&ManagedBuffer::<StaticApi>::from("NEB"))
        .argument(&1_000_000u64)
        .argument(&2u64)
        .argument(&500u64)
        .argument(&4u64)
        .code(TOKEN_CODE)
        .new_address(TOKEN)
        .run();

    world
        .tx()
        .from(OWNER)
        .raw_deploy()
        .argument(&TOKEN.to_managed_address::<StaticApi>())
        .code(REGISTRY_CODE)
        .new_address(REGISTRY)
        .run();

    world
        .tx()
        .from(OWNER)
        .to(TOKEN)
        .raw_call("setStakingRegistry")
        .argument(&REGISTRY.to_managed_address::<StaticApi>())
        .run();

    for user in [USER1, USER2] {
        world
            .tx()
            .from(OWNER)
            .to(TOKEN)
            .raw_call("issueTokens")
            .argument(&user.to_managed_address::<StaticApi>())
            .argument(&1_000u64)
            .run();
    }

    world
}

fn approve(world: &mut ScenarioWorld, user: TestAddress, amount: u64) {
    world
        .tx()
        .from(user)
        .to(TOKEN)
        .raw_call("approve")
        .argument(&REGISTRY.to_managed_address::<StaticApi>())
        .argument(&amount)
        .run();
}

fn stake(world: &mut ScenarioWorld, user: TestAddress, amount: u64, key: &str) {
    world
        .tx()
        .from(user)
        .to(REGISTRY)
        .raw_call("stake")
        .argument(&amount)
        .argument(&ManagedBuffer::<StaticApi>::from(key))
        .run();
}

fn assert_stake(world: &mut ScenarioWorld, user: TestAddress, key: &'static str, expected: u64) {
    world
        .query()
        .to(REGISTRY)
        .whitebox(staking_registry::contract_obj, |sc| {
            assert_eq!(
                sc.stakes(&user.to_managed_address(), &ManagedBuffer::from(key)).get(),
                BigUint::from(expected)
            );
        });
}

fn assert_token_balance(world: &mut ScenarioWorld, user: TestAddress, expected: u64) {
    world.query().to(TOKEN).whitebox(neb_token::contract_obj, |sc| {
        assert_eq!(
            sc.balances(&user.to_managed_address()).get(),
            BigUint::from(expected)
        );
    });
}

// ============================================================
// Self stake / unstake
// ============================================================

#[test]
fn stake_and_remove_stake_test() {
    let mut world = setup();
    approve(&mut world, USER1, 1_000);
    stake(&mut world, USER1, 500, "validator-a");

    assert_stake(&mut world, USER1, "validator-a", 500);
    assert_token_balance(&mut world, USER1, 500);

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("removeStake")
        .argument(&200u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .run();

    assert_stake(&mut world, USER1, "validator-a", 300);
    assert_token_balance(&mut world, USER1, 700);

    // Full withdrawal zeroes the entry
    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("removeStake")
        .argument(&300u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .run();
    assert_stake(&mut world, USER1, "validator-a", 0);
    assert_token_balance(&mut world, USER1, 1_000);
}

#[test]
fn remove_stake_shortfall_test() {
    let mut world = setup();
    approve(&mut world, USER1, 1_000);
    stake(&mut world, USER1, 300, "validator-a");

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("removeStake")
        .argument(&400u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .returns(ExpectError(4, "Insufficient stake: staked 300, missing 100"))
        .run();

    // Stakes are booked per (account, key) pair
    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("removeStake")
        .argument(&1u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-b"))
        .returns(ExpectError(4, "Insufficient stake: staked 0, missing 1"))
        .run();
}

#[test]
fn stake_without_allowance_fails_test() {
    let mut world = setup();

    // No approve: the pull is rejected inside the token and the whole
    // stake aborts with nothing booked.
    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("stake")
        .argument(&500u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .returns(ExpectError(4, "Insufficient allowance: allowed 0, requested 500"))
        .run();

    assert_stake(&mut world, USER1, "validator-a", 0);
    assert_token_balance(&mut world, USER1, 1_000);
}

#[test]
fn stake_accumulates_per_key_test() {
    let mut world = setup();
    approve(&mut world, USER1, 1_000);
    stake(&mut world, USER1, 200, "validator-a");
    stake(&mut world, USER1, 100, "validator-a");
    stake(&mut world, USER1, 300, "validator-b");

    assert_stake(&mut world, USER1, "validator-a", 300);
    assert_stake(&mut world, USER1, "validator-b", 300);
    assert_token_balance(&mut world, USER1, 400);
}

// ============================================================
// Delegated stake and stake transfer
// ============================================================

#[test]
fn stake_for_gating_test() {
    let mut world = setup();
    approve(&mut world, USER1, 1_000);

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("stakeFor")
        .argument(&300u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .argument(&USER2.to_managed_address::<StaticApi>())
        .returns(ExpectError(4, "Transfer stake is disabled"))
        .run();

    // Only the controller can flip the switch
    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("enableTransferStake")
        .returns(ExpectError(4, "Only controller can call this"))
        .run();
    world.tx().from(OWNER).to(REGISTRY).raw_call("enableTransferStake").run();

    // Pulls from the caller, credits the owner
    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("stakeFor")
        .argument(&300u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .argument(&USER2.to_managed_address::<StaticApi>())
        .run();

    assert_stake(&mut world, USER1, "validator-a", 0);
    assert_stake(&mut world, USER2, "validator-a", 300);
    assert_token_balance(&mut world, USER1, 700);
    assert_token_balance(&mut world, USER2, 1_000);
}

#[test]
fn transfer_stake_test() {
    let mut world = setup();
    approve(&mut world, USER1, 1_000);
    stake(&mut world, USER1, 600, "validator-a");

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("transferStake")
        .argument(&600u64)
        .argument(&USER2.to_managed_address::<StaticApi>())
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .returns(ExpectError(4, "Transfer stake is disabled"))
        .run();

    world.tx().from(OWNER).to(REGISTRY).raw_call("enableTransferStake").run();

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("transferStake")
        .argument(&250u64)
        .argument(&USER2.to_managed_address::<StaticApi>())
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .run();

    // Book entries move; no token balance moves
    assert_stake(&mut world, USER1, "validator-a", 350);
    assert_stake(&mut world, USER2, "validator-a", 250);
    assert_token_balance(&mut world, USER1, 400);
    assert_token_balance(&mut world, USER2, 1_000);

    // The new owner can withdraw what was moved to them
    world
        .tx()
        .from(USER2)
        .to(REGISTRY)
        .raw_call("removeStake")
        .argument(&250u64)
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .run();
    assert_token_balance(&mut world, USER2, 1_250);

    world
        .tx()
        .from(USER1)
        .to(REGISTRY)
        .raw_call("transferStake")
        .argument(&400u64)
        .argument(&USER2.to_managed_address::<StaticApi>())
        .argument(&ManagedBuffer::<StaticApi>::from("validator-a"))
        .returns(ExpectError(4, "Insufficient stake: staked 350, missing 50"))
        .run();
}
