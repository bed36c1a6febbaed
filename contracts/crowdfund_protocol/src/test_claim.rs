use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address,
};

use crate::invariants::assert_custody;
use crate::test::{Setup, GOAL, UNIT};
use crate::Error;

/// Campaign with 0.6 + 0.5 units pledged against a 1 unit goal.
fn funded_campaign(s: &Setup) -> (u64, Address, Address, Address) {
    let creator = Address::generate(&s.env);
    let donor1 = s.funded_account(UNIT);
    let donor2 = s.funded_account(UNIT);
    let id = s.create(&creator, GOAL);
    s.client.contribute(&id, &donor1, &6_000_000);
    s.client.contribute(&id, &donor2, &5_000_000);
    (id, creator, donor1, donor2)
}

#[test]
fn test_owner_claims_raised_minus_fee() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);
    s.advance_days(31);

    let paid = s.client.claim_funds(&id, &creator);

    // 1.1 units raised, 2% fee.
    assert_eq!(paid, 10_780_000);
    assert_eq!(s.token.balance(&creator), 10_780_000);
    assert_eq!(s.token.balance(&s.fee_recipient), 220_000);
    assert_eq!(s.contract_balance(), 0);

    let campaign = s.client.get_campaign(&id);
    assert!(campaign.claimed);
    // The fee comes out of the payout, not the recorded total.
    assert_eq!(campaign.amount_raised, 11_000_000);
    assert_custody(&s);
}

#[test]
fn test_claim_exactly_at_deadline() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);
    let deadline = s.client.get_campaign(&id).deadline;
    s.env.ledger().set_timestamp(deadline);

    assert_eq!(s.client.claim_funds(&id, &creator), 10_780_000);
}

#[test]
fn test_non_owner_cannot_claim() {
    let s = Setup::new();
    let (id, _, donor1, _) = funded_campaign(&s);

    // Before the deadline.
    assert_eq!(
        s.client.try_claim_funds(&id, &donor1),
        Err(Ok(Error::Unauthorized))
    );

    // And after it, with the goal met.
    s.advance_days(31);
    assert_eq!(
        s.client.try_claim_funds(&id, &donor1),
        Err(Ok(Error::Unauthorized))
    );
    assert!(!s.client.get_campaign(&id).claimed);
}

#[test]
fn test_non_owner_cannot_claim_failed_campaign() {
    let s = Setup::new();
    let creator = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);
    let id = s.create(&creator, GOAL);
    s.advance_days(31);

    assert_eq!(
        s.client.try_claim_funds(&id, &stranger),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_second_claim_fails() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);
    s.advance_days(31);

    s.client.claim_funds(&id, &creator);

    assert_eq!(
        s.client.try_claim_funds(&id, &creator),
        Err(Ok(Error::AlreadyClaimed))
    );
    assert_eq!(s.token.balance(&creator), 10_780_000);
}

#[test]
fn test_claim_before_deadline_fails() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);

    assert_eq!(
        s.client.try_claim_funds(&id, &creator),
        Err(Ok(Error::NotYetEligible))
    );
}

#[test]
fn test_claim_without_goal_fails() {
    let s = Setup::new();
    let creator = Address::generate(&s.env);
    let donor = s.funded_account(UNIT);
    let id = s.create(&creator, GOAL);
    s.client.contribute(&id, &donor, &(GOAL - 1));
    s.advance_days(31);

    assert_eq!(
        s.client.try_claim_funds(&id, &creator),
        Err(Ok(Error::GoalNotMet))
    );
    assert_eq!(s.contract_balance(), GOAL - 1);
}

#[test]
fn test_claim_cancelled_campaign_fails() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);

    s.client.cancel_campaign(&id, &creator);
    s.advance_days(31);

    assert_eq!(
        s.client.try_claim_funds(&id, &creator),
        Err(Ok(Error::CampaignCancelled))
    );
}

#[test]
fn test_claim_unknown_campaign_fails() {
    let s = Setup::new();
    let creator = Address::generate(&s.env);

    assert_eq!(
        s.client.try_claim_funds(&42, &creator),
        Err(Ok(Error::NotFound))
    );
}

#[test]
fn test_refund_after_claim_fails() {
    let s = Setup::new();
    let (id, creator, donor1, donor2) = funded_campaign(&s);
    s.advance_days(31);

    s.client.claim_funds(&id, &creator);

    for donor in [donor1, donor2] {
        assert_eq!(
            s.client.try_claim_refund(&id, &donor),
            Err(Ok(Error::AlreadyClaimed))
        );
    }
    assert_eq!(s.contract_balance(), 0);
}

#[test]
fn test_claim_with_zero_fee_skips_fee_transfer() {
    let s = Setup::new();
    s.client.set_platform_fee(&s.admin, &0);
    let (id, creator, _, _) = funded_campaign(&s);
    s.advance_days(31);

    assert_eq!(s.client.claim_funds(&id, &creator), 11_000_000);
    assert_eq!(s.token.balance(&s.fee_recipient), 0);
}

#[test]
fn test_claim_keeps_campaigns_isolated() {
    let s = Setup::new();
    let (id, creator, _, _) = funded_campaign(&s);
    let donor = s.funded_account(UNIT);
    let other = s.create(&creator, GOAL);
    s.client.contribute(&other, &donor, &(UNIT / 2));
    s.advance_days(31);

    s.client.claim_funds(&id, &creator);

    // The second campaign's pool is untouched and still refundable.
    assert_eq!(s.contract_balance(), UNIT / 2);
    assert_eq!(s.client.claim_refund(&other, &donor), UNIT / 2);
    assert_custody(&s);
}
