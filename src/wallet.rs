/// Wallet signer
///
/// Holds the session keypair decoded from a user-supplied secret. All key
/// material lives here; the rest of the crate only sees the public address
/// and the signing call.
use crate::errors::SweepError;
use solana_sdk::{
    hash::Hash, instruction::Instruction, pubkey::Pubkey, signature::Keypair, signer::Signer,
    transaction::Transaction,
};

pub struct Wallet {
    keypair: Keypair,
}

impl Wallet {
    /// Build a wallet from an encoded secret.
    ///
    /// Accepts the base58 form or the JSON byte-array form `[1,2,...]`;
    /// either way the decoded key must be exactly 64 bytes.
    pub fn from_encoded_secret(secret: &str) -> Result<Self, SweepError> {
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(SweepError::InvalidSecret("empty secret".to_string()));
        }

        let bytes = if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let inner = trimmed.trim_start_matches('[').trim_end_matches(']');
            inner
                .split(',')
                .map(|s| s.trim().parse::<u8>())
                .collect::<Result<Vec<u8>, _>>()
                .map_err(|e| {
                    SweepError::InvalidSecret(format!("Failed to parse byte array: {}", e))
                })?
        } else {
            bs58::decode(trimmed)
                .into_vec()
                .map_err(|e| SweepError::InvalidSecret(format!("Invalid base58: {}", e)))?
        };

        if bytes.len() != 64 {
            return Err(SweepError::InvalidSecret(format!(
                "Invalid private key length: expected 64 bytes, got {}",
                bytes.len()
            )));
        }

        let keypair = Keypair::try_from(&bytes[..])
            .map_err(|e| SweepError::InvalidSecret(format!("Failed to create keypair: {}", e)))?;

        Ok(Self { keypair })
    }

    /// The wallet's public address, stable for the session
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Sign the given instructions into one transaction anchored at `recent_blockhash`
    pub fn sign_instructions(
        &self,
        instructions: &[Instruction],
        recent_blockhash: Hash,
    ) -> Transaction {
        Transaction::new_signed_with_payer(
            instructions,
            Some(&self.pubkey()),
            &[&self.keypair],
            recent_blockhash,
        )
    }
}
