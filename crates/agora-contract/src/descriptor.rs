//! Contract descriptor: where the governance contract lives per network.

use crate::value::{Address, TokenId};
use serde::{Deserialize, Serialize};

/// Token id of the chain's native token, used to fund space-creation fees.
pub const NATIVE_TOKEN_ID: &str = "tti_5649544520544f4b454e6e40";

/// The chain's native token.
pub fn native_token() -> TokenId {
    TokenId::new(NATIVE_TOKEN_ID)
}

/// Deployment network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Localnet,
}

/// Governance contract addresses, one per network, plus the network the
/// client is currently talking to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDescriptor {
    pub network: Network,
    pub mainnet: Option<Address>,
    pub testnet: Option<Address>,
    pub localnet: Option<Address>,
}

impl ContractDescriptor {
    /// Descriptor with a single known address on the given network.
    pub fn single(network: Network, address: Address) -> Self {
        let mut descriptor = Self {
            network,
            mainnet: None,
            testnet: None,
            localnet: None,
        };
        match network {
            Network::Mainnet => descriptor.mainnet = Some(address),
            Network::Testnet => descriptor.testnet = Some(address),
            Network::Localnet => descriptor.localnet = Some(address),
        }
        descriptor
    }

    /// Address for the active network, if configured.
    pub fn address(&self) -> Option<&Address> {
        self.address_for(self.network)
    }

    pub fn address_for(&self, network: Network) -> Option<&Address> {
        match network {
            Network::Mainnet => self.mainnet.as_ref(),
            Network::Testnet => self.testnet.as_ref(),
            Network::Localnet => self.localnet.as_ref(),
        }
    }
}

impl Default for ContractDescriptor {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            mainnet: None,
            testnet: None,
            localnet: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_resolves_active_network_only() {
        let descriptor =
            ContractDescriptor::single(Network::Testnet, Address::new("agora_f1926c54b810"));
        assert_eq!(
            descriptor.address().map(Address::as_str),
            Some("agora_f1926c54b810")
        );
        assert!(descriptor.address_for(Network::Mainnet).is_none());
    }
}
