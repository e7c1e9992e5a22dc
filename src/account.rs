/// Token account records
///
/// One record is the point-in-time snapshot of a discovered token account.
/// Construction is two-phase: `load` performs the ledger queries, then hands
/// the results to the pure `from_parts` constructor, so snapshot validation
/// is testable without a network. A record is either fully populated or does
/// not exist.
use crate::constants::SOLSCAN_URL;
use crate::errors::SweepError;
use crate::rpc::{LedgerClient, TokenAccountMeta};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_token::instruction::{burn, close_account};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct TokenAccountRecord {
    pub address: Pubkey,
    pub mint: Pubkey,
    /// Held amount in base units, trusted for the rest of the session
    pub amount: u64,
    /// Lamports reclaimed when the account closes
    pub rent_lamports: u64,
    /// 1-based position in discovery order
    pub index: usize,
}

impl TokenAccountRecord {
    /// Pure constructor from already-queried parts
    pub fn from_parts(
        address: Pubkey,
        index: usize,
        meta: &TokenAccountMeta,
        rent_lamports: u64,
    ) -> Result<Self, SweepError> {
        let mint = Pubkey::from_str(&meta.mint).map_err(|e| {
            SweepError::Lookup(format!(
                "Account {} references invalid mint '{}': {}",
                address, meta.mint, e
            ))
        })?;

        Ok(Self {
            address,
            mint,
            amount: meta.amount,
            rent_lamports,
            index,
        })
    }

    /// Hydrate a record from the ledger. Any failed query leaves no record.
    pub async fn load<C: LedgerClient + ?Sized>(
        client: &C,
        address: Pubkey,
        index: usize,
    ) -> Result<Self, SweepError> {
        let meta = client.get_token_account_meta(&address).await?;
        let rent_lamports = client.get_sol_balance(&address).await?;
        Self::from_parts(address, index, &meta, rent_lamports)
    }

    pub fn has_balance(&self) -> bool {
        self.amount > 0
    }

    /// Instruction burning the full snapshot amount. Partial burns are not
    /// supported; a zero-balance account never gets one.
    pub fn burn_instruction(&self, owner: &Pubkey) -> Result<Instruction, SweepError> {
        if self.amount == 0 {
            return Err(SweepError::InvalidAmount(format!(
                "Account {} has no balance to burn",
                self.address
            )));
        }

        burn(
            &spl_token::id(),
            &self.address,
            &self.mint,
            owner,
            &[],
            self.amount,
        )
        .map_err(|e| {
            SweepError::Submission(format!("Failed to build burn instruction: {}", e))
        })
    }

    /// Instruction closing the account, returning its rent to the owner
    pub fn close_instruction(&self, owner: &Pubkey) -> Result<Instruction, SweepError> {
        close_account(&spl_token::id(), &self.address, owner, owner, &[]).map_err(|e| {
            SweepError::Submission(format!("Failed to build close instruction: {}", e))
        })
    }

    /// Explorer link for the account
    pub fn account_url(&self) -> String {
        format!("{}/account/{}", SOLSCAN_URL, self.address)
    }

    /// Explorer link for the mint
    pub fn mint_url(&self) -> String {
        format!("{}/token/{}", SOLSCAN_URL, self.mint)
    }
}

/// Explorer link for a submitted transaction
pub fn transaction_url(signature: &str) -> String {
    format!("{}/tx/{}", SOLSCAN_URL, signature)
}
