/// Interactive boundary
///
/// Everything the session needs from the operator is collected here: the
/// encoded secret (read without echo), the endpoint choice, and the burn
/// selection. The workflow itself never touches the terminal.
use crate::account::TokenAccountRecord;
use crate::endpoints::RpcEndpoint;
use crate::errors::SweepError;
use crate::logger::{self, LogTag};
use crate::selection::{selection_or_empty, Selector};
use console::Term;

/// Prompt for the encoded private key, input hidden
pub fn read_private_key() -> Result<String, SweepError> {
    println!("\n=== Solana Token Sweeper ===");
    println!(
        "Automatically closes empty token accounts and asks which non-empty \
         token accounts to burn and close"
    );
    println!("Please enter your private key (input is hidden for security):");

    let term = Term::stdout();
    let secret = term
        .read_secure_line()
        .map_err(|e| SweepError::Prompt(format!("Failed to read private key: {}", e)))?;

    if secret.trim().is_empty() {
        return Err(SweepError::InvalidSecret("empty secret".to_string()));
    }
    Ok(secret)
}

/// Prompt for the RPC endpoint, collecting a credential or URL where the
/// preset needs one. An invalid numeric choice falls back to preset 1.
pub fn select_endpoint() -> Result<RpcEndpoint, SweepError> {
    println!("\n=== RPC Endpoint Selection ===");
    println!("Available RPC endpoints:");
    println!("1. Solana Mainnet (api.mainnet-beta.solana.com), default option");
    println!("2. Public Node (solana-rpc.publicnode.com), recommended");
    println!("3. Helius (requires API key)");
    println!("4. QuickNode (requires custom URL)");
    println!("5. Custom RPC endpoint");

    let choice = read_line("Select RPC endpoint (1-5): ")?;

    let endpoint = match choice.trim() {
        "2" => RpcEndpoint::PublicNode,
        "3" => {
            let api_key = read_line("Enter your Helius API key: ")?;
            RpcEndpoint::Helius { api_key }
        }
        "4" => {
            let url = read_line("Enter your QuickNode RPC URL: ")?;
            RpcEndpoint::QuickNode { url }
        }
        "5" => {
            let url = read_line("Enter custom RPC URL: ")?;
            RpcEndpoint::Custom { url }
        }
        _ => RpcEndpoint::MainnetBeta,
    };

    logger::log(
        LogTag::Prompt,
        "INFO",
        &format!("Using {} RPC endpoint", endpoint.label()),
    );
    Ok(endpoint)
}

fn read_line(question: &str) -> Result<String, SweepError> {
    println!("{}", question);
    Term::stdout()
        .read_line()
        .map_err(|e| SweepError::Prompt(format!("Failed to read input: {}", e)))
}

/// Selector backed by the burn-selection prompt. A malformed selection
/// degrades to the empty selection with a warning instead of aborting.
pub struct PromptSelector;

impl Selector for PromptSelector {
    fn select(&mut self, _candidates: &[&TokenAccountRecord]) -> Vec<usize> {
        match read_line(
            "Enter token numbers to burn (space-separated) or press Enter to skip:",
        ) {
            Ok(input) => selection_or_empty(&input),
            Err(e) => {
                logger::log(
                    LogTag::Prompt,
                    "WARNING",
                    &format!("{}. Using only zero-balance tokens.", e),
                );
                Vec::new()
            }
        }
    }
}
