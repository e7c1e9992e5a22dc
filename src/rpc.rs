/// Ledger RPC client
///
/// Raw JSON-RPC over HTTP against the one endpoint resolved for the session.
/// Response bodies are parsed with explicit field extraction and validation;
/// the pure `parse_*` helpers keep the shape checks testable without a
/// network. The `LedgerClient` trait is the seam the sweep workflow depends
/// on, so tests substitute a stub ledger.
use crate::constants::{LAMPORTS_PER_SOL, TOKEN_PROGRAM_ID};
use crate::errors::SweepError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::{hash::Hash, pubkey::Pubkey, transaction::Transaction};
use std::str::FromStr;

/// Converts lamports to SOL amount
pub fn lamports_to_sol(lamports: u64) -> f64 {
    (lamports as f64) / (LAMPORTS_PER_SOL as f64)
}

/// Point-in-time metadata of one token account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountMeta {
    pub mint: String,
    pub amount: u64,
}

/// Gateway to the remote ledger
///
/// Every call is a blocking request/response from the workflow's point of
/// view; nothing here retries on its own.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Enumerate the owner's token accounts in the ledger's native return order
    async fn get_token_accounts_by_owner(&self, owner: &Pubkey)
        -> Result<Vec<Pubkey>, SweepError>;

    /// Balance and mint of one token account
    async fn get_token_account_meta(
        &self,
        account: &Pubkey,
    ) -> Result<TokenAccountMeta, SweepError>;

    /// Native balance in lamports (the rent reclaimed when the account closes)
    async fn get_sol_balance(&self, account: &Pubkey) -> Result<u64, SweepError>;

    /// Fresh blockhash to anchor a submission
    async fn get_latest_blockhash(&self) -> Result<Hash, SweepError>;

    /// Submit a signed transaction, returning its signature
    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, SweepError>;
}

pub struct RpcClient {
    rpc_url: String,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Self {
        logger::log(
            LogTag::Rpc,
            "INIT",
            &format!("Initializing RPC client with URL: {}", rpc_url),
        );
        Self {
            rpc_url: rpc_url.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Post one JSON-RPC call and return the full response body.
    /// Only transport and HTTP-level failures surface here; the JSON-RPC
    /// `error` member is inspected by each caller so it can map the failure
    /// to the right category.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, SweepError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        Ok(body)
    }
}

/// Extract the JSON-RPC error message, if the response carries one
fn rpc_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown RPC error");
    Some(message.to_string())
}

/// Parse a getTokenAccountsByOwner response into addresses, preserving the
/// ledger's return order
fn parse_owned_accounts(body: &Value) -> Result<Vec<Pubkey>, SweepError> {
    let accounts = body
        .get("result")
        .and_then(|r| r.get("value"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            SweepError::Parse("getTokenAccountsByOwner: missing result.value array".to_string())
        })?;

    let mut addresses = Vec::with_capacity(accounts.len());
    for account in accounts {
        let pubkey_str = account
            .get("pubkey")
            .and_then(|p| p.as_str())
            .ok_or_else(|| {
                SweepError::Parse("getTokenAccountsByOwner: entry without pubkey".to_string())
            })?;
        let pubkey = Pubkey::from_str(pubkey_str).map_err(|e| {
            SweepError::Parse(format!("Invalid account pubkey '{}': {}", pubkey_str, e))
        })?;
        addresses.push(pubkey);
    }
    Ok(addresses)
}

/// Parse a jsonParsed getAccountInfo response into token account metadata.
/// Anything that is not a live SPL token account is a lookup failure.
fn parse_token_account_meta(body: &Value, address: &Pubkey) -> Result<TokenAccountMeta, SweepError> {
    let value = body
        .get("result")
        .and_then(|r| r.get("value"))
        .ok_or_else(|| SweepError::Parse("getAccountInfo: missing result.value".to_string()))?;

    if value.is_null() {
        return Err(SweepError::Lookup(format!("Account {} not found", address)));
    }

    let program = value
        .get("data")
        .and_then(|d| d.get("program"))
        .and_then(|p| p.as_str());
    if program != Some("spl-token") {
        return Err(SweepError::Lookup(format!(
            "Account {} is not owned by the SPL Token program (program: {})",
            address,
            program.unwrap_or("unknown")
        )));
    }

    let info = value
        .get("data")
        .and_then(|d| d.get("parsed"))
        .and_then(|p| p.get("info"))
        .ok_or_else(|| {
            SweepError::Lookup(format!("Account {} has no parsed token info", address))
        })?;

    let mint = info
        .get("mint")
        .and_then(|m| m.as_str())
        .ok_or_else(|| SweepError::Lookup(format!("Account {} has no mint field", address)))?;

    let amount_str = info
        .get("tokenAmount")
        .and_then(|t| t.get("amount"))
        .and_then(|a| a.as_str())
        .ok_or_else(|| SweepError::Lookup(format!("Account {} has no token amount", address)))?;

    let amount = amount_str.parse::<u64>().map_err(|e| {
        SweepError::Lookup(format!(
            "Account {} has unparseable amount '{}': {}",
            address, amount_str, e
        ))
    })?;

    Ok(TokenAccountMeta {
        mint: mint.to_string(),
        amount,
    })
}

/// Parse a getBalance response into lamports
fn parse_balance(body: &Value) -> Result<u64, SweepError> {
    body.get("result")
        .and_then(|r| r.get("value"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| SweepError::Parse("getBalance: missing result.value".to_string()))
}

/// Parse a getLatestBlockhash response into a Hash
fn parse_blockhash(body: &Value) -> Result<Hash, SweepError> {
    let blockhash_str = body
        .get("result")
        .and_then(|r| r.get("value"))
        .and_then(|v| v.get("blockhash"))
        .and_then(|b| b.as_str())
        .ok_or_else(|| {
            SweepError::Parse("getLatestBlockhash: missing result.value.blockhash".to_string())
        })?;

    Hash::from_str(blockhash_str)
        .map_err(|e| SweepError::Parse(format!("Invalid blockhash '{}': {}", blockhash_str, e)))
}

/// Serialize a signed transaction into the base64 wire form
fn encode_transaction(transaction: &Transaction) -> Result<String, SweepError> {
    let serialized = bincode::serialize(transaction)
        .map_err(|e| SweepError::Submission(format!("Failed to serialize transaction: {}", e)))?;
    Ok(general_purpose::STANDARD.encode(serialized))
}

#[async_trait]
impl LedgerClient for RpcClient {
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
    ) -> Result<Vec<Pubkey>, SweepError> {
        let params = json!([
            owner.to_string(),
            { "programId": TOKEN_PROGRAM_ID },
            { "encoding": "jsonParsed" }
        ]);

        let body = self.rpc_call("getTokenAccountsByOwner", params).await?;
        if let Some(message) = rpc_error_message(&body) {
            return Err(SweepError::Lookup(format!(
                "getTokenAccountsByOwner failed: {}",
                message
            )));
        }
        parse_owned_accounts(&body)
    }

    async fn get_token_account_meta(
        &self,
        account: &Pubkey,
    ) -> Result<TokenAccountMeta, SweepError> {
        let params = json!([
            account.to_string(),
            { "encoding": "jsonParsed" }
        ]);

        let body = self.rpc_call("getAccountInfo", params).await?;
        if let Some(message) = rpc_error_message(&body) {
            return Err(SweepError::Lookup(format!(
                "getAccountInfo failed for {}: {}",
                account, message
            )));
        }
        parse_token_account_meta(&body, account)
    }

    async fn get_sol_balance(&self, account: &Pubkey) -> Result<u64, SweepError> {
        let body = self
            .rpc_call("getBalance", json!([account.to_string()]))
            .await?;
        if let Some(message) = rpc_error_message(&body) {
            return Err(SweepError::Lookup(format!(
                "getBalance failed for {}: {}",
                account, message
            )));
        }
        parse_balance(&body)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SweepError> {
        let params = json!([{ "commitment": "finalized" }]);
        let body = self.rpc_call("getLatestBlockhash", params).await?;
        if let Some(message) = rpc_error_message(&body) {
            return Err(SweepError::Lookup(format!(
                "getLatestBlockhash failed: {}",
                message
            )));
        }
        parse_blockhash(&body)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, SweepError> {
        let tx_base64 = encode_transaction(transaction)?;

        // No preflight and no RPC-side retries: a rejection is terminal for
        // this account's attempt and the operator decides about re-running.
        let params = json!([
            tx_base64,
            {
                "encoding": "base64",
                "skipPreflight": true,
                "maxRetries": 0
            }
        ]);

        let body = self
            .rpc_call("sendTransaction", params)
            .await
            .map_err(|e| SweepError::Submission(format!("Transport failure: {}", e)))?;

        if let Some(message) = rpc_error_message(&body) {
            return Err(SweepError::Submission(message));
        }

        let signature = body
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| {
                SweepError::Submission("sendTransaction: response without signature".to_string())
            })?;

        logger::debug(
            LogTag::Rpc,
            &format!("Transaction accepted with signature {}", signature),
        );
        Ok(signature.to_string())
    }
}
