use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub owner: Address,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionMade {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

/// `amount` is what the owner received, net of `fee`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsClaimed {
    pub campaign_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCancelled {
    pub campaign_id: u64,
    pub owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdated {
    pub admin: Address,
    pub fee_recipient: Address,
    pub platform_fee_percent: u32,
    pub min_duration_days: u32,
    pub max_duration_days: u32,
}

pub fn emit_campaign_created(
    env: &Env,
    campaign_id: u64,
    owner: Address,
    title: String,
    goal: i128,
    deadline: u64,
) {
    let topics = (symbol_short!("created"), campaign_id);
    let data = CampaignCreated {
        campaign_id,
        owner,
        title,
        goal,
        deadline,
    };
    env.events().publish(topics, data);
}

pub fn emit_contribution_made(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("contrib"), campaign_id);
    let data = ContributionMade {
        campaign_id,
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_claimed(env: &Env, campaign_id: u64, owner: Address, amount: i128, fee: i128) {
    let topics = (symbol_short!("claimed"), campaign_id);
    let data = FundsClaimed {
        campaign_id,
        owner,
        amount,
        fee,
    };
    env.events().publish(topics, data);
}

pub fn emit_refund_issued(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), campaign_id);
    let data = RefundIssued {
        campaign_id,
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_campaign_cancelled(env: &Env, campaign_id: u64, owner: Address) {
    let topics = (symbol_short!("cancelled"), campaign_id);
    let data = CampaignCancelled { campaign_id, owner };
    env.events().publish(topics, data);
}

pub fn emit_config_updated(env: &Env, config: &crate::types::Config) {
    let topics = (symbol_short!("config"),);
    let data = ConfigUpdated {
        admin: config.admin.clone(),
        fee_recipient: config.fee_recipient.clone(),
        platform_fee_percent: config.platform_fee_percent,
        min_duration_days: config.min_duration_days,
        max_duration_days: config.max_duration_days,
    };
    env.events().publish(topics, data);
}
