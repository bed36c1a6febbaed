//! # Crowdfund Protocol Contract
//!
//! A goal-and-deadline crowdfunding ledger. Owners open campaigns, anyone
//! contributes the native asset before the deadline, and the pool is either
//! paid to the owner (goal met, minus the platform fee) or returned to each
//! contributor (goal missed, or campaign cancelled).
//!
//! | Phase        | Entry Point(s)                                            |
//! |--------------|-----------------------------------------------------------|
//! | Bootstrap    | [`CrowdfundProtocol::init`]                               |
//! | Config       | `set_platform_fee`, `set_fee_recipient`, `set_duration_bounds` |
//! | Lifecycle    | `create_campaign`, `contribute`, `claim_funds`, `claim_refund`, `cancel_campaign` |
//! | Queries      | `get_campaign`, `get_all_campaigns`, `get_contributions`, ... |
//!
//! Storage layout lives in [`storage`], value movement in [`payout`]. Every
//! entry point validates all preconditions before its first write, and
//! writes its post-condition state before any token transfer.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, String, Vec};

pub mod events;
pub mod payout;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_claim;

use payout::Payout;
pub use types::{Campaign, CampaignStatus, Config, Contribution, SECONDS_PER_DAY};

pub const DEFAULT_PLATFORM_FEE_PERCENT: u32 = 2;
pub const MAX_PLATFORM_FEE_PERCENT: u32 = 10;
pub const DEFAULT_MIN_DURATION_DAYS: u32 = 1;
pub const DEFAULT_MAX_DURATION_DAYS: u32 = 365;
/// Upper bound on results per call for every paged read.
pub const MAX_PAGE_SIZE: u32 = 50;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    NotFound = 4,
    Unauthorized = 5,
    CampaignEnded = 6,
    AlreadyClaimed = 7,
    NotYetEligible = 8,
    GoalNotMet = 9,
    NoContribution = 10,
    CampaignCancelled = 11,
    RefundNotAvailable = 12,
    Overflow = 13,
}

#[contract]
pub struct CrowdfundProtocol;

#[contractimpl]
impl CrowdfundProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation and configuration
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract.
    ///
    /// - `admin` must authorize and may later change the fee and duration rules.
    /// - `token` is the Stellar Asset Contract of the native asset held in custody.
    /// - `fee_recipient` receives the platform fee on each successful claim.
    ///
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address, token: Address, fee_recipient: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let config = Config {
            admin,
            token,
            fee_recipient,
            platform_fee_percent: DEFAULT_PLATFORM_FEE_PERCENT,
            min_duration_days: DEFAULT_MIN_DURATION_DAYS,
            max_duration_days: DEFAULT_MAX_DURATION_DAYS,
        };
        storage::save_config(&env, &config);
        events::emit_config_updated(&env, &config);
        Ok(())
    }

    /// Set the fee deducted from successful payouts, in whole percent.
    pub fn set_platform_fee(env: Env, admin: Address, percent: u32) -> Result<(), Error> {
        let mut config = Self::require_admin(&env, &admin)?;
        if percent > MAX_PLATFORM_FEE_PERCENT {
            return Err(Error::InvalidInput);
        }
        config.platform_fee_percent = percent;
        storage::save_config(&env, &config);
        events::emit_config_updated(&env, &config);
        Ok(())
    }

    pub fn set_fee_recipient(env: Env, admin: Address, recipient: Address) -> Result<(), Error> {
        let mut config = Self::require_admin(&env, &admin)?;
        config.fee_recipient = recipient;
        storage::save_config(&env, &config);
        events::emit_config_updated(&env, &config);
        Ok(())
    }

    /// Set the accepted campaign duration range, inclusive, in days.
    ///
    /// Applies to campaigns created afterwards; existing deadlines are untouched.
    pub fn set_duration_bounds(
        env: Env,
        admin: Address,
        min_days: u32,
        max_days: u32,
    ) -> Result<(), Error> {
        let mut config = Self::require_admin(&env, &admin)?;
        if min_days == 0 || min_days > max_days {
            return Err(Error::InvalidInput);
        }
        config.min_duration_days = min_days;
        config.max_duration_days = max_days;
        storage::save_config(&env, &config);
        events::emit_config_updated(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::load_config(&env)
    }

    pub fn platform_fee_percent(env: Env) -> Result<u32, Error> {
        Ok(storage::load_config(&env)?.platform_fee_percent)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign lifecycle
    // ─────────────────────────────────────────────────────────

    /// Open a new campaign owned by `owner`.
    ///
    /// - `title` must be non-empty and `goal` positive.
    /// - `duration_days` must fall within the configured bounds.
    ///
    /// The deadline is `now + duration_days * 86400`. Returns the new 1-based ID.
    pub fn create_campaign(
        env: Env,
        owner: Address,
        title: String,
        description: String,
        image_url: String,
        category: String,
        goal: i128,
        duration_days: u32,
    ) -> Result<u64, Error> {
        owner.require_auth();
        let config = storage::load_config(&env)?;

        if title.is_empty() || goal <= 0 || !config.accepts_duration(duration_days) {
            return Err(Error::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let deadline = (duration_days as u64)
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| now.checked_add(secs))
            .ok_or(Error::Overflow)?;

        let id = storage::next_campaign_id(&env)?;
        let campaign = Campaign {
            id,
            owner: owner.clone(),
            title: title.clone(),
            description,
            image_url,
            category,
            goal,
            created_at: now,
            deadline,
            amount_raised: 0,
            amount_refunded: 0,
            contribution_count: 0,
            claimed: false,
            active: true,
        };
        storage::save_campaign(&env, &campaign);
        storage::add_owner_campaign(&env, &owner, id);

        log!(&env, "campaign created", id, deadline);
        events::emit_campaign_created(&env, id, owner, title, goal, deadline);
        Ok(id)
    }

    /// Pledge `amount` of the native asset to `campaign_id`.
    ///
    /// The ledger is updated before the asset is pulled from `contributor`;
    /// a failed transfer reverts the whole call.
    pub fn contribute(
        env: Env,
        campaign_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<(), Error> {
        contributor.require_auth();
        let config = storage::load_config(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidInput);
        }

        let mut campaign = storage::load_campaign(&env, campaign_id)?;
        let now = env.ledger().timestamp();
        if !campaign.accepts_contributions(now) {
            return Err(Error::CampaignEnded);
        }

        let pledged = storage::get_pledge(&env, campaign_id, &contributor);
        let new_pledge = pledged.checked_add(amount).ok_or(Error::Overflow)?;
        campaign.amount_raised = campaign
            .amount_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let index = campaign.contribution_count;
        campaign.contribution_count = index.checked_add(1).ok_or(Error::Overflow)?;

        if !storage::has_pledged(&env, campaign_id, &contributor) {
            storage::add_contributor_campaign(&env, &contributor, campaign_id);
        }
        storage::set_pledge(&env, campaign_id, &contributor, new_pledge);
        storage::append_contribution(
            &env,
            campaign_id,
            index,
            &Contribution {
                contributor: contributor.clone(),
                amount,
                timestamp: now,
            },
        );
        storage::save_campaign(&env, &campaign);

        payout::collect(&env, &config.token, &contributor, amount);

        events::emit_contribution_made(&env, campaign_id, contributor, amount);
        Ok(())
    }

    /// Withdraw the raised funds of a successful campaign.
    ///
    /// Only the owner, only once, only after the deadline and only when the
    /// goal was met. The campaign is marked claimed before any transfer.
    /// Returns the amount paid to the owner, net of the platform fee.
    pub fn claim_funds(env: Env, campaign_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let config = storage::load_config(&env)?;
        let mut campaign = storage::load_campaign(&env, campaign_id)?;

        if caller != campaign.owner {
            return Err(Error::Unauthorized);
        }
        if campaign.claimed {
            return Err(Error::AlreadyClaimed);
        }
        if !campaign.active {
            return Err(Error::CampaignCancelled);
        }
        if !campaign.is_expired(env.ledger().timestamp()) {
            return Err(Error::NotYetEligible);
        }
        if !campaign.goal_met() {
            return Err(Error::GoalNotMet);
        }

        // Nothing may have left custody before a successful claim.
        let held = campaign.balance();
        if held != campaign.amount_raised {
            return Err(Error::Overflow);
        }
        let (net, fee) = payout::split_fee(held, config.platform_fee_percent)?;

        campaign.claimed = true;
        storage::save_campaign(&env, &campaign);

        let payout = Payout::new(&env, config.token)
            .to(&campaign.owner, net)
            .to(&config.fee_recipient, fee);
        debug_assert_eq!(payout.total(), held);
        payout.execute(&env);

        log!(&env, "funds claimed", campaign_id, net, fee);
        events::emit_funds_claimed(&env, campaign_id, campaign.owner, net, fee);
        Ok(net)
    }

    /// Return `contributor`'s whole pledge from a cancelled campaign, or from
    /// one that ended short of its goal.
    ///
    /// The pledge is zeroed before the transfer. Returns the refunded amount.
    pub fn claim_refund(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let config = storage::load_config(&env)?;
        let mut campaign = storage::load_campaign(&env, campaign_id)?;

        if campaign.claimed {
            return Err(Error::AlreadyClaimed);
        }
        if !campaign.refunds_open(env.ledger().timestamp()) {
            return Err(Error::RefundNotAvailable);
        }

        let pledged = storage::get_pledge(&env, campaign_id, &contributor);
        if pledged <= 0 {
            return Err(Error::NoContribution);
        }
        if pledged > campaign.balance() {
            return Err(Error::Overflow);
        }

        campaign.amount_refunded = campaign
            .amount_refunded
            .checked_add(pledged)
            .ok_or(Error::Overflow)?;
        storage::set_pledge(&env, campaign_id, &contributor, 0);
        storage::save_campaign(&env, &campaign);

        Payout::new(&env, config.token)
            .to(&contributor, pledged)
            .execute(&env);

        log!(&env, "refund issued", campaign_id, pledged);
        events::emit_refund_issued(&env, campaign_id, contributor, pledged);
        Ok(pledged)
    }

    /// Cancel an open campaign, which immediately opens refunds.
    ///
    /// Only the owner may cancel, and only while the campaign is active,
    /// unclaimed and before its deadline. No funds move.
    pub fn cancel_campaign(env: Env, campaign_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        storage::load_config(&env)?;
        let mut campaign = storage::load_campaign(&env, campaign_id)?;

        if caller != campaign.owner {
            return Err(Error::Unauthorized);
        }
        if campaign.claimed {
            return Err(Error::AlreadyClaimed);
        }
        if !campaign.active {
            return Err(Error::CampaignCancelled);
        }
        if campaign.is_expired(env.ledger().timestamp()) {
            return Err(Error::CampaignEnded);
        }

        campaign.active = false;
        storage::save_campaign(&env, &campaign);

        log!(&env, "campaign cancelled", campaign_id);
        events::emit_campaign_cancelled(&env, campaign_id, campaign.owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    /// Every campaign, ordered by ID.
    pub fn get_all_campaigns(env: Env) -> Vec<Campaign> {
        storage::load_campaign_range(&env, 1, storage::campaign_count(&env))
    }

    /// Up to `limit` campaigns starting at `start_id`, ordered by ID.
    /// `limit` is capped at `MAX_PAGE_SIZE`.
    pub fn get_campaigns_page(env: Env, start_id: u64, limit: u32) -> Vec<Campaign> {
        let limit = limit.min(MAX_PAGE_SIZE) as u64;
        storage::load_campaign_range(&env, start_id, limit)
    }

    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        storage::load_campaign(&env, campaign_id)
    }

    /// Up to `limit` of `owner`'s campaigns, skipping the first `start`, in
    /// creation order. `limit` is capped at `MAX_PAGE_SIZE`.
    pub fn get_campaigns_by_owner(
        env: Env,
        owner: Address,
        start: u32,
        limit: u32,
    ) -> Vec<Campaign> {
        let mut out = Vec::new(&env);
        let ids = storage::owner_campaigns(&env, &owner, start, limit.min(MAX_PAGE_SIZE));
        for id in ids.iter() {
            if let Ok(campaign) = storage::load_campaign(&env, id) {
                out.push_back(campaign);
            }
        }
        out
    }

    pub fn get_owner_campaign_count(env: Env, owner: Address) -> u32 {
        storage::owner_campaign_count(&env, &owner)
    }

    /// IDs of campaigns `contributor` has pledged to, in first-pledge order,
    /// skipping the first `start`. `limit` is capped at `MAX_PAGE_SIZE`.
    pub fn get_contributed_campaigns(
        env: Env,
        contributor: Address,
        start: u32,
        limit: u32,
    ) -> Vec<u64> {
        storage::contributor_campaigns(&env, &contributor, start, limit.min(MAX_PAGE_SIZE))
    }

    pub fn get_contributed_campaign_count(env: Env, contributor: Address) -> u32 {
        storage::contributor_campaign_count(&env, &contributor)
    }

    /// The campaign's whole contribution log, oldest first.
    ///
    /// Cost grows with the log; use `get_contributions_page` for campaigns
    /// with many contributions.
    pub fn get_contributions(env: Env, campaign_id: u64) -> Result<Vec<Contribution>, Error> {
        let campaign = storage::load_campaign(&env, campaign_id)?;
        Ok(storage::load_contribution_range(
            &env,
            &campaign,
            0,
            campaign.contribution_count,
        ))
    }

    /// Up to `limit` log entries starting at position `start`, oldest first.
    /// `limit` is capped at `MAX_PAGE_SIZE`.
    pub fn get_contributions_page(
        env: Env,
        campaign_id: u64,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Contribution>, Error> {
        let campaign = storage::load_campaign(&env, campaign_id)?;
        Ok(storage::load_contribution_range(
            &env,
            &campaign,
            start,
            limit.min(MAX_PAGE_SIZE),
        ))
    }

    /// Cumulative unrefunded pledge of `contributor`; 0 if none.
    pub fn get_contributor_amount(env: Env, campaign_id: u64, contributor: Address) -> i128 {
        storage::get_pledge(&env, campaign_id, &contributor)
    }

    /// Funding progress in whole percent, capped at 100.
    pub fn get_campaign_progress(env: Env, campaign_id: u64) -> Result<u32, Error> {
        Ok(storage::load_campaign(&env, campaign_id)?.progress())
    }

    pub fn is_expired(env: Env, campaign_id: u64) -> Result<bool, Error> {
        let campaign = storage::load_campaign(&env, campaign_id)?;
        Ok(campaign.is_expired(env.ledger().timestamp()))
    }

    pub fn get_campaign_status(env: Env, campaign_id: u64) -> Result<CampaignStatus, Error> {
        let campaign = storage::load_campaign(&env, campaign_id)?;
        Ok(campaign.status(env.ledger().timestamp()))
    }

    // ─────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────

    fn require_admin(env: &Env, caller: &Address) -> Result<Config, Error> {
        caller.require_auth();
        let config = storage::load_config(env)?;
        if *caller != config.admin {
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }
}
