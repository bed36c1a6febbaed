// contracts/crowdfund_protocol/src/types.rs
//
// Campaign records and the pure lifecycle predicates over them.
//
// Expiry is never stored: every predicate takes the ledger timestamp read
// once by the calling entry point, so the same `Campaign` value always
// answers the same way for the same `now`.

use soroban_sdk::{contracttype, Address, String};

/// Seconds in one day; durations are supplied in whole days.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Derived lifecycle state of a campaign, computed from stored flags and the
/// current ledger time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting contributions.
    Live,
    /// Deadline passed with the goal met; owner has not claimed yet.
    Successful,
    /// Deadline passed without reaching the goal; contributors may refund.
    Failed,
    /// Owner withdrew the raised funds.
    Claimed,
    /// Owner cancelled; contributors may refund.
    Cancelled,
}

/// A funding campaign stored on-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Sequential 1-based ID. Zero is never assigned.
    pub id: u64,
    /// Address that created the campaign and receives the payout.
    pub owner: Address,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    /// Target amount in the asset's smallest unit.
    pub goal: i128,
    /// Ledger timestamp the campaign was created at.
    pub created_at: u64,
    /// Ledger timestamp at which contributions stop.
    pub deadline: u64,
    /// Sum of every accepted contribution. Never decremented.
    pub amount_raised: i128,
    /// Sum of every refund paid out of this campaign's pool.
    pub amount_refunded: i128,
    /// Number of entries in the contribution log.
    pub contribution_count: u32,
    /// Set once, when the owner withdraws the funds.
    pub claimed: bool,
    /// Cleared only by cancellation.
    pub active: bool,
}

impl Campaign {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.deadline
    }

    pub fn goal_met(&self) -> bool {
        self.amount_raised >= self.goal
    }

    /// Contributions are accepted only while active and before the deadline.
    pub fn accepts_contributions(&self, now: u64) -> bool {
        self.active && !self.is_expired(now)
    }

    /// Refunds open once the campaign is cancelled, or once it has ended
    /// short of its goal. A claimed pool is never refundable.
    pub fn refunds_open(&self, now: u64) -> bool {
        if self.claimed {
            return false;
        }
        !self.active || (self.is_expired(now) && !self.goal_met())
    }

    /// Funding progress in whole percent, capped at 100.
    pub fn progress(&self) -> u32 {
        if self.goal <= 0 || self.amount_raised <= 0 {
            return 0;
        }
        if self.goal_met() {
            return 100;
        }
        // raised < goal here, so the quotient is below 100.
        let pct = match self.amount_raised.checked_mul(100) {
            Some(scaled) => scaled / self.goal,
            None => self.amount_raised / (self.goal / 100),
        };
        pct.min(99) as u32
    }

    /// Amount still held in custody for this campaign.
    pub(crate) fn balance(&self) -> i128 {
        if self.claimed {
            0
        } else {
            self.amount_raised - self.amount_refunded
        }
    }

    pub fn status(&self, now: u64) -> CampaignStatus {
        if self.claimed {
            CampaignStatus::Claimed
        } else if !self.active {
            CampaignStatus::Cancelled
        } else if !self.is_expired(now) {
            CampaignStatus::Live
        } else if self.goal_met() {
            CampaignStatus::Successful
        } else {
            CampaignStatus::Failed
        }
    }
}

/// One entry in a campaign's append-only contribution log.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub contributor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Contract-wide configuration, written by `init` and the admin setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Address allowed to change the fee and duration rules.
    pub admin: Address,
    /// Stellar Asset Contract of the native asset held in custody.
    pub token: Address,
    /// Receives the platform fee on every successful claim.
    pub fee_recipient: Address,
    /// Whole percent deducted from each payout.
    pub platform_fee_percent: u32,
    pub min_duration_days: u32,
    pub max_duration_days: u32,
}

impl Config {
    pub fn accepts_duration(&self, days: u32) -> bool {
        days >= self.min_duration_days && days <= self.max_duration_days
    }
}
