/// Log tags identifying which part of the sweeper emitted a message

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Wallet,
    Rpc,
    Sweep,
    Prompt,
}

impl LogTag {
    /// Plain string form used for file output
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Wallet => "WALLET",
            LogTag::Rpc => "RPC",
            LogTag::Sweep => "SWEEP",
            LogTag::Prompt => "PROMPT",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
