use solsweep::logger::{self, LogTag};
use solsweep::prompt::{self, PromptSelector};
use solsweep::rpc::RpcClient;
use solsweep::sweep::SweepRunner;
use solsweep::wallet::Wallet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    logger::log(LogTag::System, "START", "🧹 Starting Solana token sweeper");

    // Secret and endpoint are resolved before any network contact; a failure
    // here aborts the session
    let secret = prompt::read_private_key()?;
    let wallet = match Wallet::from_encoded_secret(&secret) {
        Ok(wallet) => wallet,
        Err(e) => {
            logger::log(
                LogTag::Wallet,
                "ERROR",
                &format!("Failed to load wallet: {}", e),
            );
            return Err(e.into());
        }
    };
    logger::log(
        LogTag::Wallet,
        "INFO",
        &format!("Wallet: {}", wallet.pubkey()),
    );

    let endpoint = prompt::select_endpoint()?;
    let url = match endpoint.resolve_url() {
        Ok(url) => url,
        Err(e) => {
            logger::log(
                LogTag::System,
                "ERROR",
                &format!("Failed to resolve endpoint: {}", e),
            );
            return Err(e.into());
        }
    };

    let client = RpcClient::new(&url);

    logger::log(LogTag::System, "INFO", "Starting token account processing...");

    let runner = SweepRunner::new(&client, &wallet);
    let report = match runner.run(&mut PromptSelector).await {
        Ok(report) => report,
        Err(e) => {
            logger::log(LogTag::Sweep, "ERROR", &format!("Sweep aborted: {}", e));
            logger::flush();
            return Err(e.into());
        }
    };

    logger::log(
        LogTag::System,
        "COMPLETE",
        &format!("🎉 Sweep complete: {}", report.summary()),
    );
    logger::flush();
    Ok(())
}
