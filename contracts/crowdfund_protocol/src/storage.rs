// contracts/crowdfund_protocol/src/storage.rs
//
// Storage helpers for CrowdfundProtocol.
//
// Layout:
//   instance   DataKey::Config                        → Config
//   instance   DataKey::CampaignCount                 → u64 (last assigned id)
//   persistent DataKey::Campaign(id)                  → Campaign
//   persistent DataKey::Pledge(id, contributor)       → i128 cumulative, zeroed on refund
//   persistent DataKey::Contribution(id, index)       → Contribution (append-only log)
//   persistent DataKey::OwnerCampaignCount(owner)             → u32
//   persistent DataKey::OwnerCampaign(owner, index)           → u64
//   persistent DataKey::ContributorCampaignCount(address)     → u32
//   persistent DataKey::ContributorCampaign(address, index)   → u64
//
// The log and both indexes are stored one entry per key, so no single entry
// grows with the number of contributions or campaigns an account touches.
//
// Persistent entries are bumped to outlive the longest default campaign plus
// a refund window, clamped to the network's maximum TTL.

use soroban_sdk::{contracttype, Address, Env, TryFromVal, Val, Vec};

use crate::{
    types::{Campaign, Config, Contribution},
    Error,
};

/// Ledgers per day at a ~5s close time.
const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP: u32 = DAY_IN_LEDGERS * 30;
const INSTANCE_THRESHOLD: u32 = INSTANCE_BUMP - DAY_IN_LEDGERS;
const PERSISTENT_BUMP: u32 = DAY_IN_LEDGERS * 400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    CampaignCount,
    Campaign(u64),
    Pledge(u64, Address),
    Contribution(u64, u32),
    OwnerCampaignCount(Address),
    OwnerCampaign(Address, u32),
    ContributorCampaignCount(Address),
    ContributorCampaign(Address, u32),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_THRESHOLD, INSTANCE_BUMP);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    let bump = PERSISTENT_BUMP.min(env.storage().max_ttl());
    let threshold = bump.saturating_sub(DAY_IN_LEDGERS);
    env.storage().persistent().extend_ttl(key, threshold, bump);
}

/// Read a persistent entry, bumping its TTL when it exists.
fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

// ─────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Result<Config, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

// ─────────────────────────────────────────────────────────
// Campaign counter
// ─────────────────────────────────────────────────────────

/// Number of campaigns ever created, which is also the last assigned ID.
pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reserve the next campaign ID. IDs start at 1 and are never reused.
pub fn next_campaign_id(env: &Env) -> Result<u64, Error> {
    let id = campaign_count(env).checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::CampaignCount, &id);
    bump_instance(env);
    Ok(id)
}

// ─────────────────────────────────────────────────────────
// Campaign CRUD
// ─────────────────────────────────────────────────────────

/// Persist a campaign. Overwrites any existing record at the same ID.
pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let key = DataKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    bump_persistent(env, &key);
}

/// Load a campaign by ID, failing with `Error::NotFound` if missing.
pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    read_persistent(env, &DataKey::Campaign(id)).ok_or(Error::NotFound)
}

/// Load campaigns `start..start + limit`, skipping IDs past the counter.
pub fn load_campaign_range(env: &Env, start: u64, limit: u64) -> Vec<Campaign> {
    let mut out = Vec::new(env);
    let last = campaign_count(env);
    let first = if start == 0 { 1 } else { start };
    let mut id = first;
    while id <= last && (id - first) < limit {
        if let Some(c) = read_persistent(env, &DataKey::Campaign(id)) {
            out.push_back(c);
        }
        id += 1;
    }
    out
}

// ─────────────────────────────────────────────────────────
// Pledges and the contribution log
// ─────────────────────────────────────────────────────────

/// Cumulative, unrefunded pledge of `contributor`. 0 if none.
pub fn get_pledge(env: &Env, campaign_id: u64, contributor: &Address) -> i128 {
    read_persistent(env, &DataKey::Pledge(campaign_id, contributor.clone())).unwrap_or(0)
}

pub fn set_pledge(env: &Env, campaign_id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Pledge(campaign_id, contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

/// `true` if `contributor` ever pledged to `campaign_id`, refunded or not.
pub fn has_pledged(env: &Env, campaign_id: u64, contributor: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pledge(campaign_id, contributor.clone()))
}

/// Store `entry` at position `index` of the campaign's log.
pub fn append_contribution(env: &Env, campaign_id: u64, index: u32, entry: &Contribution) {
    let key = DataKey::Contribution(campaign_id, index);
    env.storage().persistent().set(&key, entry);
    bump_persistent(env, &key);
}

/// Read up to `limit` log entries of `campaign` starting at `start`, in
/// insertion order.
pub fn load_contribution_range(
    env: &Env,
    campaign: &Campaign,
    start: u32,
    limit: u32,
) -> Vec<Contribution> {
    let mut out = Vec::new(env);
    let end = start.saturating_add(limit).min(campaign.contribution_count);
    for index in start..end {
        let key = DataKey::Contribution(campaign.id, index);
        if let Some(entry) = read_persistent(env, &key) {
            out.push_back(entry);
        }
    }
    out
}

// ─────────────────────────────────────────────────────────
// Secondary indexes
// ─────────────────────────────────────────────────────────

fn append_index(
    env: &Env,
    count_key: DataKey,
    item_key: impl Fn(u32) -> DataKey,
    campaign_id: u64,
) {
    let count: u32 = read_persistent(env, &count_key).unwrap_or(0);
    let item = item_key(count);
    env.storage().persistent().set(&item, &campaign_id);
    bump_persistent(env, &item);
    env.storage().persistent().set(&count_key, &(count + 1));
    bump_persistent(env, &count_key);
}

fn load_index(
    env: &Env,
    count: u32,
    item_key: impl Fn(u32) -> DataKey,
    start: u32,
    limit: u32,
) -> Vec<u64> {
    let mut out = Vec::new(env);
    let end = start.saturating_add(limit).min(count);
    for index in start..end {
        if let Some(id) = read_persistent(env, &item_key(index)) {
            out.push_back(id);
        }
    }
    out
}

pub fn owner_campaign_count(env: &Env, owner: &Address) -> u32 {
    read_persistent(env, &DataKey::OwnerCampaignCount(owner.clone())).unwrap_or(0)
}

pub fn add_owner_campaign(env: &Env, owner: &Address, campaign_id: u64) {
    append_index(
        env,
        DataKey::OwnerCampaignCount(owner.clone()),
        |i| DataKey::OwnerCampaign(owner.clone(), i),
        campaign_id,
    );
}

/// IDs of `owner`'s campaigns at positions `start..start + limit`.
pub fn owner_campaigns(env: &Env, owner: &Address, start: u32, limit: u32) -> Vec<u64> {
    load_index(
        env,
        owner_campaign_count(env, owner),
        |i| DataKey::OwnerCampaign(owner.clone(), i),
        start,
        limit,
    )
}

pub fn contributor_campaign_count(env: &Env, contributor: &Address) -> u32 {
    read_persistent(env, &DataKey::ContributorCampaignCount(contributor.clone())).unwrap_or(0)
}

pub fn add_contributor_campaign(env: &Env, contributor: &Address, campaign_id: u64) {
    append_index(
        env,
        DataKey::ContributorCampaignCount(contributor.clone()),
        |i| DataKey::ContributorCampaign(contributor.clone(), i),
        campaign_id,
    );
}

/// IDs of campaigns `contributor` pledged to, at positions `start..start + limit`.
pub fn contributor_campaigns(
    env: &Env,
    contributor: &Address,
    start: u32,
    limit: u32,
) -> Vec<u64> {
    load_index(
        env,
        contributor_campaign_count(env, contributor),
        |i| DataKey::ContributorCampaign(contributor.clone(), i),
        start,
        limit,
    )
}
