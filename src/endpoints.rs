/// RPC endpoint presets
///
/// The well-known endpoints are fixed; Helius needs an API key and QuickNode
/// a full URL. Resolution fails loudly when a required credential or URL is
/// missing, so an unusable preset can never reach the RPC client.
use crate::errors::SweepError;
use url::Url;

/// The default public mainnet endpoint
pub const MAINNET_BETA_URL: &str = "https://api.mainnet-beta.solana.com";

/// Community-run public endpoint with friendlier rate limits
pub const PUBLIC_NODE_URL: &str = "https://solana-rpc.publicnode.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcEndpoint {
    MainnetBeta,
    PublicNode,
    Helius { api_key: String },
    QuickNode { url: String },
    Custom { url: String },
}

impl RpcEndpoint {
    /// Human-readable preset name for logging
    pub fn label(&self) -> &'static str {
        match self {
            RpcEndpoint::MainnetBeta => "Solana Mainnet",
            RpcEndpoint::PublicNode => "Public Node",
            RpcEndpoint::Helius { .. } => "Helius",
            RpcEndpoint::QuickNode { .. } => "QuickNode",
            RpcEndpoint::Custom { .. } => "Custom",
        }
    }

    /// Resolve the preset into the one URL used for the session
    pub fn resolve_url(&self) -> Result<String, SweepError> {
        match self {
            RpcEndpoint::MainnetBeta => Ok(MAINNET_BETA_URL.to_string()),
            RpcEndpoint::PublicNode => Ok(PUBLIC_NODE_URL.to_string()),
            RpcEndpoint::Helius { api_key } => {
                if api_key.trim().is_empty() {
                    return Err(SweepError::EndpointConfig(
                        "Helius preset requires an API key".to_string(),
                    ));
                }
                Ok(format!(
                    "https://mainnet.helius-rpc.com/?api-key={}",
                    api_key.trim()
                ))
            }
            RpcEndpoint::QuickNode { url } | RpcEndpoint::Custom { url } => {
                let trimmed = url.trim();
                if trimmed.is_empty() {
                    return Err(SweepError::EndpointConfig(format!(
                        "{} preset requires a URL",
                        self.label()
                    )));
                }
                Url::parse(trimmed).map_err(|e| {
                    SweepError::EndpointConfig(format!("Invalid RPC URL '{}': {}", trimmed, e))
                })?;
                Ok(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_presets_resolve() {
        assert_eq!(
            RpcEndpoint::MainnetBeta.resolve_url().unwrap(),
            MAINNET_BETA_URL
        );
        assert_eq!(
            RpcEndpoint::PublicNode.resolve_url().unwrap(),
            PUBLIC_NODE_URL
        );
    }

    #[test]
    fn helius_requires_api_key() {
        let endpoint = RpcEndpoint::Helius {
            api_key: "  ".to_string(),
        };
        assert!(matches!(
            endpoint.resolve_url(),
            Err(SweepError::EndpointConfig(_))
        ));

        let endpoint = RpcEndpoint::Helius {
            api_key: "abc123".to_string(),
        };
        assert_eq!(
            endpoint.resolve_url().unwrap(),
            "https://mainnet.helius-rpc.com/?api-key=abc123"
        );
    }

    #[test]
    fn custom_url_must_parse() {
        let endpoint = RpcEndpoint::Custom {
            url: "not a url".to_string(),
        };
        assert!(matches!(
            endpoint.resolve_url(),
            Err(SweepError::EndpointConfig(_))
        ));

        let endpoint = RpcEndpoint::QuickNode {
            url: "https://example.quiknode.pro/token/".to_string(),
        };
        assert_eq!(
            endpoint.resolve_url().unwrap(),
            "https://example.quiknode.pro/token/"
        );
    }

    #[test]
    fn quicknode_requires_url() {
        let endpoint = RpcEndpoint::QuickNode {
            url: String::new(),
        };
        assert!(matches!(
            endpoint.resolve_url(),
            Err(SweepError::EndpointConfig(_))
        ));
    }
}
