// contracts/crowdfund_protocol/src/invariants.rs
//
// Ledger-wide accounting checks, called from the other test modules after
// each scenario.

use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::test::{Setup, GOAL, UNIT};

/// Contract custody equals what every unclaimed campaign still owes.
pub(crate) fn assert_custody(s: &Setup) {
    let owed: i128 = s
        .client
        .get_all_campaigns()
        .iter()
        .map(|c| c.balance())
        .sum();
    assert_eq!(s.contract_balance(), owed, "custody does not match ledger");
}

/// `amount_raised` equals the sum of the campaign's contribution log.
pub(crate) fn assert_log_matches_raised(s: &Setup, campaign_id: u64) {
    let campaign = s.client.get_campaign(&campaign_id);
    let logged: i128 = s
        .client
        .get_contributions(&campaign_id)
        .iter()
        .map(|c| c.amount)
        .sum();
    assert_eq!(campaign.amount_raised, logged);
    assert_eq!(campaign.contribution_count, s.client.get_contributions(&campaign_id).len());
}

#[test]
fn test_custody_across_mixed_outcomes() {
    let s = Setup::new();
    let owner = Address::generate(&s.env);
    let donor1 = s.funded_account(3 * UNIT);
    let donor2 = s.funded_account(3 * UNIT);

    let success = s.create(&owner, GOAL);
    let failure = s.create(&owner, GOAL);
    let cancelled = s.create(&owner, GOAL);

    s.client.contribute(&success, &donor1, &6_000_000);
    s.client.contribute(&success, &donor2, &5_000_000);
    s.client.contribute(&failure, &donor1, &3_000_000);
    s.client.contribute(&cancelled, &donor2, &2_000_000);
    s.client.contribute(&cancelled, &donor1, &1_000_000);
    assert_custody(&s);

    s.client.cancel_campaign(&cancelled, &owner);
    s.client.claim_refund(&cancelled, &donor2);
    assert_custody(&s);

    s.advance_days(31);
    s.client.claim_funds(&success, &owner);
    assert_custody(&s);

    s.client.claim_refund(&failure, &donor1);
    s.client.claim_refund(&cancelled, &donor1);
    assert_custody(&s);
    assert_eq!(s.contract_balance(), 0);

    for id in [success, failure, cancelled] {
        assert_log_matches_raised(&s, id);
    }
}

#[test]
fn test_refunds_never_exceed_pledges() {
    let s = Setup::new();
    let owner = Address::generate(&s.env);
    let donor = s.funded_account(UNIT);
    let id = s.create(&owner, GOAL);

    s.client.contribute(&id, &donor, &1_000_000);
    s.client.contribute(&id, &donor, &2_000_000);
    s.advance_days(31);

    assert_eq!(s.client.claim_refund(&id, &donor), 3_000_000);
    assert!(s.client.try_claim_refund(&id, &donor).is_err());

    let campaign = s.client.get_campaign(&id);
    assert_eq!(campaign.amount_refunded, 3_000_000);
    assert!(campaign.amount_refunded <= campaign.amount_raised);
    assert_eq!(s.token.balance(&donor), UNIT);
    assert_custody(&s);
}
