/// Shared constants for the sweeper

/// SPL Token program that owns every account this tool touches
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Solscan explorer base URL used in all reference links
pub const SOLSCAN_URL: &str = "https://solscan.io";

/// Pause after each successful submission to avoid RPC throttling
pub const SUBMIT_COOLDOWN_MS: u64 = 1000;

/// Approximate rent held by one token account, in SOL
pub const TOKEN_ACCOUNT_RENT_SOL: f64 = 0.00203928;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
