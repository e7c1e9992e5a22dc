/// Account-processing workflow
///
/// Drives one sweep session: discover the wallet's token accounts, classify
/// them by balance, ask the selector which non-zero accounts to burn, then
/// submit per-account transactions. Selected non-zero accounts are always
/// fully processed before any zero-balance account, each submission is
/// independent, and a failed account never blocks the rest of the batch.
use crate::account::{transaction_url, TokenAccountRecord};
use crate::constants::SUBMIT_COOLDOWN_MS;
use crate::errors::SweepError;
use crate::logger::{self, LogTag};
use crate::rpc::{lamports_to_sol, LedgerClient};
use crate::selection::Selector;
use crate::wallet::Wallet;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::time::Duration;

/// Terminal state of one discovered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SweepStatus {
    /// Non-zero balance, not selected; never touched
    Skipped,
    /// Transaction accepted by the ledger
    Submitted { signature: String },
    /// Submission rejected; the rest of the batch continued
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub index: usize,
    pub address: Pubkey,
    pub status: SweepStatus,
}

/// Aggregated session result, in discovery order
#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub outcomes: Vec<SweepOutcome>,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SweepStatus::Submitted { .. }))
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Successfully processed {} out of {} accounts",
            self.succeeded(),
            self.total()
        )
    }
}

pub struct SweepRunner<'a, C: LedgerClient> {
    client: &'a C,
    wallet: &'a Wallet,
    cooldown: Duration,
}

impl<'a, C: LedgerClient> SweepRunner<'a, C> {
    pub fn new(client: &'a C, wallet: &'a Wallet) -> Self {
        Self {
            client,
            wallet,
            cooldown: Duration::from_millis(SUBMIT_COOLDOWN_MS),
        }
    }

    /// Override the post-submission cooldown (tests run with zero)
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Enumerate the owner's accounts and hydrate one record per address,
    /// assigning 1-based indices in discovery order. Any failed snapshot
    /// aborts the whole run: a broken snapshot cannot be safely processed.
    pub async fn discover(&self) -> Result<Vec<TokenAccountRecord>, SweepError> {
        let addresses = self
            .client
            .get_token_accounts_by_owner(&self.wallet.pubkey())
            .await?;

        let mut records = Vec::with_capacity(addresses.len());
        for (position, address) in addresses.into_iter().enumerate() {
            let record = TokenAccountRecord::load(self.client, address, position + 1).await?;
            records.push(record);
        }
        Ok(records)
    }

    /// Run the full sweep: discover, classify, select, submit, aggregate
    pub async fn run<S: Selector>(&self, selector: &mut S) -> Result<SweepReport, SweepError> {
        let records = self.discover().await?;
        logger::log(
            LogTag::Sweep,
            "INFO",
            &format!("Found {} token accounts", records.len()),
        );

        for record in &records {
            log_account(record);
        }

        let nonzero: Vec<&TokenAccountRecord> =
            records.iter().filter(|r| r.has_balance()).collect();

        let mut statuses: HashMap<usize, SweepStatus> = HashMap::new();

        if !nonzero.is_empty() {
            logger::log(LogTag::Sweep, "SELECT", "=== Non-Zero Balance Tokens ===");
            for record in &nonzero {
                logger::log(
                    LogTag::Sweep,
                    "SELECT",
                    &format!("Token [{}]: Balance = {}", record.index, record.amount),
                );
            }

            let chosen = selector.select(&nonzero);

            // Selected accounts first, in the order the selection was given.
            // Indices outside the non-zero set are ignored, duplicates are
            // processed once.
            for index in chosen {
                if statuses.contains_key(&index) {
                    continue;
                }
                if let Some(record) = nonzero.iter().find(|r| r.index == index) {
                    self.process_account(record, true, &mut statuses).await;
                }
            }
        }

        for record in &nonzero {
            if !statuses.contains_key(&record.index) {
                logger::log(
                    LogTag::Sweep,
                    "SKIP",
                    &format!("Token [{}] balance not ZERO, skipping", record.index),
                );
                statuses.insert(record.index, SweepStatus::Skipped);
            }
        }

        // All zero-balance accounts, in discovery order
        for record in records.iter().filter(|r| !r.has_balance()) {
            self.process_account(record, false, &mut statuses).await;
        }

        let outcomes = records
            .iter()
            .map(|record| SweepOutcome {
                index: record.index,
                address: record.address,
                status: statuses
                    .remove(&record.index)
                    .unwrap_or(SweepStatus::Skipped),
            })
            .collect();

        let report = SweepReport { outcomes };
        logger::log(LogTag::Sweep, "SUMMARY", &report.summary());
        Ok(report)
    }

    /// Build, sign and submit one account's transaction, recording the
    /// outcome. Failures are caught here; the cooldown only follows success.
    async fn process_account(
        &self,
        record: &TokenAccountRecord,
        burn: bool,
        statuses: &mut HashMap<usize, SweepStatus>,
    ) {
        log_account(record);
        match self.submit_account(record, burn).await {
            Ok(signature) => {
                logger::log(
                    LogTag::Sweep,
                    "SUCCESS",
                    &format!("Transaction sent: {}", transaction_url(&signature)),
                );
                logger::log(
                    LogTag::Sweep,
                    "SUCCESS",
                    &format!(
                        "Transferred {} SOL",
                        lamports_to_sol(record.rent_lamports)
                    ),
                );
                statuses.insert(record.index, SweepStatus::Submitted { signature });
                tokio::time::sleep(self.cooldown).await;
            }
            Err(e) => {
                logger::log(
                    LogTag::Sweep,
                    "ERROR",
                    &format!("Failed to process account {}: {}", record.address, e),
                );
                statuses.insert(
                    record.index,
                    SweepStatus::Failed {
                        error: e.to_string(),
                    },
                );
            }
        }
    }

    async fn submit_account(
        &self,
        record: &TokenAccountRecord,
        burn: bool,
    ) -> Result<String, SweepError> {
        let owner = self.wallet.pubkey();

        let mut instructions = Vec::with_capacity(2);
        if burn {
            logger::log(
                LogTag::Sweep,
                "BURN",
                &format!("Burning {} tokens from token [{}]", record.amount, record.index),
            );
            // Burn must precede close: a non-empty account cannot be closed
            instructions.push(record.burn_instruction(&owner)?);
        }
        instructions.push(record.close_instruction(&owner)?);

        // Fetched per submission, not per batch: blockhashes expire and a
        // stale one is a guaranteed rejection
        let blockhash = self.client.get_latest_blockhash().await?;
        let transaction = self.wallet.sign_instructions(&instructions, blockhash);
        self.client.send_transaction(&transaction).await
    }
}

/// Per-account display block
fn log_account(record: &TokenAccountRecord) {
    logger::log(
        LogTag::Sweep,
        "ACCOUNT",
        &format!("Token number [{}]", record.index),
    );
    logger::log(
        LogTag::Sweep,
        "ACCOUNT",
        &format!("Account: {}", record.account_url()),
    );
    logger::log(
        LogTag::Sweep,
        "ACCOUNT",
        &format!("Token address: {}", record.mint_url()),
    );
    logger::log(
        LogTag::Sweep,
        "ACCOUNT",
        &format!("Balance: {}", record.amount),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::TokenAccountMeta;
    use async_trait::async_trait;
    use solana_sdk::{hash::Hash, signature::Keypair, transaction::Transaction};
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct MockAccount {
        address: Pubkey,
        meta: TokenAccountMeta,
        rent: u64,
    }

    /// Stub ledger whose enumeration reflects prior closes and which records
    /// every submitted transaction for inspection
    struct MockLedger {
        accounts: Vec<MockAccount>,
        closed: Mutex<HashSet<Pubkey>>,
        submitted: Mutex<Vec<Transaction>>,
        fail_accounts: HashSet<Pubkey>,
    }

    impl MockLedger {
        fn new(balances: &[u64]) -> Self {
            let accounts = balances
                .iter()
                .map(|&amount| MockAccount {
                    address: Pubkey::new_unique(),
                    meta: TokenAccountMeta {
                        mint: Pubkey::new_unique().to_string(),
                        amount,
                    },
                    rent: 2_039_280,
                })
                .collect();
            Self {
                accounts,
                closed: Mutex::new(HashSet::new()),
                submitted: Mutex::new(Vec::new()),
                fail_accounts: HashSet::new(),
            }
        }

        fn fail_on(mut self, position: usize) -> Self {
            self.fail_accounts.insert(self.accounts[position].address);
            self
        }

        fn address(&self, position: usize) -> Pubkey {
            self.accounts[position].address
        }

        fn submitted(&self) -> Vec<Transaction> {
            self.submitted.lock().unwrap().clone()
        }
    }

    /// The account a transaction closes: first account of its close instruction
    fn close_target(tx: &Transaction) -> Option<Pubkey> {
        tx.message
            .instructions
            .iter()
            .find(|ix| ix.data.first() == Some(&9))
            .map(|ix| tx.message.account_keys[ix.accounts[0] as usize])
    }

    /// Instruction discriminators in order (burn = 8, close = 9)
    fn discriminators(tx: &Transaction) -> Vec<u8> {
        tx.message
            .instructions
            .iter()
            .map(|ix| ix.data[0])
            .collect()
    }

    #[async_trait]
    impl LedgerClient for MockLedger {
        async fn get_token_accounts_by_owner(
            &self,
            _owner: &Pubkey,
        ) -> Result<Vec<Pubkey>, SweepError> {
            let closed = self.closed.lock().unwrap();
            Ok(self
                .accounts
                .iter()
                .filter(|a| !closed.contains(&a.address))
                .map(|a| a.address)
                .collect())
        }

        async fn get_token_account_meta(
            &self,
            account: &Pubkey,
        ) -> Result<TokenAccountMeta, SweepError> {
            self.accounts
                .iter()
                .find(|a| a.address == *account)
                .map(|a| a.meta.clone())
                .ok_or_else(|| SweepError::Lookup(format!("Account {} not found", account)))
        }

        async fn get_sol_balance(&self, account: &Pubkey) -> Result<u64, SweepError> {
            self.accounts
                .iter()
                .find(|a| a.address == *account)
                .map(|a| a.rent)
                .ok_or_else(|| SweepError::Lookup(format!("Account {} not found", account)))
        }

        async fn get_latest_blockhash(&self) -> Result<Hash, SweepError> {
            Ok(Hash::new_unique())
        }

        async fn send_transaction(&self, transaction: &Transaction) -> Result<String, SweepError> {
            let target = close_target(transaction)
                .ok_or_else(|| SweepError::Submission("no close instruction".to_string()))?;
            if self.fail_accounts.contains(&target) {
                return Err(SweepError::Submission("simulated rejection".to_string()));
            }

            self.closed.lock().unwrap().insert(target);
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(transaction.clone());
            Ok(format!("mock-signature-{}", submitted.len()))
        }
    }

    struct ScriptedSelector(Vec<usize>);

    impl Selector for ScriptedSelector {
        fn select(&mut self, _candidates: &[&TokenAccountRecord]) -> Vec<usize> {
            self.0.clone()
        }
    }

    fn test_wallet() -> Wallet {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        Wallet::from_encoded_secret(&encoded).unwrap()
    }

    fn runner<'a>(client: &'a MockLedger, wallet: &'a Wallet) -> SweepRunner<'a, MockLedger> {
        SweepRunner::new(client, wallet).with_cooldown(Duration::ZERO)
    }

    #[tokio::test]
    async fn discovery_assigns_contiguous_indices() {
        let ledger = MockLedger::new(&[0, 500, 0, 42]);
        let wallet = test_wallet();

        let records = runner(&ledger, &wallet).discover().await.unwrap();
        assert_eq!(records.len(), 4);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i + 1);
            assert_eq!(record.address, ledger.address(i));
        }
    }

    #[tokio::test]
    async fn empty_selection_closes_only_zero_accounts() {
        // A(0), B(500), C(0); selection empty
        let ledger = MockLedger::new(&[0, 500, 0]);
        let wallet = test_wallet();

        let report = runner(&ledger, &wallet)
            .run(&mut ScriptedSelector(vec![]))
            .await
            .unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(
            report.summary(),
            "Successfully processed 2 out of 3 accounts"
        );
        assert_eq!(report.outcomes[1].status, SweepStatus::Skipped);

        let submitted = ledger.submitted();
        assert_eq!(submitted.len(), 2);
        for tx in &submitted {
            // Close only, never a burn
            assert_eq!(discriminators(tx), vec![9]);
        }
        let targets: HashSet<Pubkey> = submitted.iter().filter_map(close_target).collect();
        assert!(targets.contains(&ledger.address(0)));
        assert!(targets.contains(&ledger.address(2)));
        assert!(!targets.contains(&ledger.address(1)));
    }

    #[tokio::test]
    async fn selected_account_burned_then_closed_before_zero_accounts() {
        let ledger = MockLedger::new(&[0, 500, 0]);
        let wallet = test_wallet();

        let report = runner(&ledger, &wallet)
            .run(&mut ScriptedSelector(vec![2]))
            .await
            .unwrap();

        assert_eq!(report.succeeded(), 3);
        assert_eq!(
            report.summary(),
            "Successfully processed 3 out of 3 accounts"
        );

        let submitted = ledger.submitted();
        assert_eq!(submitted.len(), 3);

        // Non-zero selected account is processed first
        let first = &submitted[0];
        assert_eq!(close_target(first), Some(ledger.address(1)));
        assert_eq!(discriminators(first), vec![8, 9]);

        // Burn carries the full snapshot amount in one signed payload
        let burn_ix = &first.message.instructions[0];
        assert_eq!(&burn_ix.data[1..9], &500u64.to_le_bytes());

        // Zero-balance accounts follow in discovery order, close only
        assert_eq!(close_target(&submitted[1]), Some(ledger.address(0)));
        assert_eq!(close_target(&submitted[2]), Some(ledger.address(2)));
        assert_eq!(discriminators(&submitted[1]), vec![9]);
        assert_eq!(discriminators(&submitted[2]), vec![9]);
    }

    #[tokio::test]
    async fn unknown_selection_indices_are_ignored() {
        let ledger = MockLedger::new(&[0, 500, 0]);
        let wallet = test_wallet();

        let report = runner(&ledger, &wallet)
            .run(&mut ScriptedSelector(vec![5, 1, 3]))
            .await
            .unwrap();

        // Positions 1 and 3 are zero-balance, 5 does not exist: nothing in
        // the selection is actionable, so only the zero sweep runs
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.outcomes[1].status, SweepStatus::Skipped);
        assert_eq!(ledger.submitted().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_selection_processed_once() {
        let ledger = MockLedger::new(&[0, 500, 0]);
        let wallet = test_wallet();

        let report = runner(&ledger, &wallet)
            .run(&mut ScriptedSelector(vec![2, 2]))
            .await
            .unwrap();

        assert_eq!(report.succeeded(), 3);
        assert_eq!(ledger.submitted().len(), 3);
    }

    #[tokio::test]
    async fn submission_failure_does_not_block_the_batch() {
        let ledger = MockLedger::new(&[0, 500, 0]).fail_on(0);
        let wallet = test_wallet();

        let report = runner(&ledger, &wallet)
            .run(&mut ScriptedSelector(vec![]))
            .await
            .unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 1);
        assert!(matches!(
            report.outcomes[0].status,
            SweepStatus::Failed { .. }
        ));
        assert_eq!(report.outcomes[1].status, SweepStatus::Skipped);
        assert!(matches!(
            report.outcomes[2].status,
            SweepStatus::Submitted { .. }
        ));

        // The failed account's transaction was never accepted
        let submitted = ledger.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(close_target(&submitted[0]), Some(ledger.address(2)));
    }

    #[tokio::test]
    async fn rediscovery_after_close_omits_closed_accounts() {
        let ledger = MockLedger::new(&[0, 500, 0]);
        let wallet = test_wallet();
        let runner = runner(&ledger, &wallet);

        runner.run(&mut ScriptedSelector(vec![])).await.unwrap();

        // A and C are closed; only B remains, re-indexed from 1
        let records = runner.discover().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, ledger.address(1));
        assert_eq!(records[0].index, 1);
    }
}
