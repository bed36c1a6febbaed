// contracts/crowdfund_protocol/src/payout.rs
//
// Value movement for CrowdfundProtocol.
//
// Entry points that move funds run in two phases: they first write the
// post-condition state (claimed flag, zeroed pledge) and only then build and
// execute a `Payout`. A nested call made by the token contract during
// `execute` therefore sees the already-updated ledger.

use soroban_sdk::{token, Address, Env, Vec};

use crate::Error;

/// Split `amount` into `(net, fee)` where `fee = floor(amount * percent / 100)`.
pub fn split_fee(amount: i128, fee_percent: u32) -> Result<(i128, i128), Error> {
    let fee = amount
        .checked_mul(fee_percent as i128)
        .ok_or(Error::Overflow)?
        / 100;
    let net = amount.checked_sub(fee).ok_or(Error::Overflow)?;
    Ok((net, fee))
}

/// Pull `amount` from `from` into contract custody.
pub fn collect(env: &Env, token: &Address, from: &Address, amount: i128) {
    token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
}

/// Outbound transfers from contract custody, executed after state is saved.
pub struct Payout {
    token: Address,
    legs: Vec<(Address, i128)>,
}

impl Payout {
    pub fn new(env: &Env, token: Address) -> Self {
        Self {
            token,
            legs: Vec::new(env),
        }
    }

    /// Queue a transfer. Zero amounts are dropped.
    pub fn to(mut self, recipient: &Address, amount: i128) -> Self {
        if amount > 0 {
            self.legs.push_back((recipient.clone(), amount));
        }
        self
    }

    pub fn total(&self) -> i128 {
        self.legs.iter().map(|(_, amount)| amount).sum()
    }

    pub fn execute(self, env: &Env) {
        let client = token::Client::new(env, &self.token);
        let from = env.current_contract_address();
        for (recipient, amount) in self.legs.iter() {
            client.transfer(&from, &recipient, &amount);
        }
    }
}
