//! Chain-native asset registry.
//!
//! The governing token ("BHP") and the utility token ("BHPGas") are
//! registered in the genesis block; their asset IDs are fixed. Fees are
//! always denominated in the utility token.

use bhp_primitives::hash256::Hash256;

/// Asset ID of the governing token ("BHP"), in wire byte order.
pub const GOVERNING_TOKEN_ID: Hash256 = Hash256::new([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe,
    0x60, 0x85, 0xaf, 0x90, 0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22,
    0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33, 0x6f, 0xc5,
]);

/// Asset ID of the utility token ("BHPGas"), in wire byte order.
pub const UTILITY_TOKEN_ID: Hash256 = Hash256::new([
    0x25, 0x12, 0x75, 0x3e, 0x70, 0x83, 0xdb, 0xfc, 0x93, 0x08, 0xc4, 0xab,
    0xca, 0xf5, 0x5b, 0xbb, 0x0b, 0xd9, 0xb4, 0x29, 0xa1, 0xa5, 0x79, 0x31,
    0x2e, 0x02, 0x50, 0x2b, 0xbb, 0x5d, 0x0b, 0xa6,
]);

/// Display name of the governing token.
pub const GOVERNING_TOKEN_NAME: &str = "BHP";

/// Display name of the utility token.
pub const UTILITY_TOKEN_NAME: &str = "BHPGas";

/// Check whether an asset ID names the governing token.
pub fn is_governing(asset_id: &Hash256) -> bool {
    *asset_id == GOVERNING_TOKEN_ID
}

/// Check whether an asset ID names the utility token.
pub fn is_utility(asset_id: &Hash256) -> bool {
    *asset_id == UTILITY_TOKEN_ID
}

/// Category byte of a registered asset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssetType {
    /// Credit flag.
    CreditFlag,
    /// Duty flag.
    DutyFlag,
    /// The governing token.
    GoverningToken,
    /// The utility token.
    UtilityToken,
    /// A share asset.
    Share,
    /// An invoice asset.
    Invoice,
    /// A user-registered token.
    Token,
}

impl AssetType {
    /// Return the wire byte for this asset type.
    pub fn byte(&self) -> u8 {
        match self {
            AssetType::CreditFlag => 0x40,
            AssetType::DutyFlag => 0x80,
            AssetType::GoverningToken => 0x00,
            AssetType::UtilityToken => 0x01,
            AssetType::Share => 0x90,
            AssetType::Invoice => 0x98,
            AssetType::Token => 0xa0,
        }
    }

    /// Parse an asset type from its wire byte.
    ///
    /// # Arguments
    /// * `byte` - The asset type byte.
    ///
    /// # Returns
    /// `Some(AssetType)` for known bytes, `None` otherwise.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x40 => Some(AssetType::CreditFlag),
            0x80 => Some(AssetType::DutyFlag),
            0x00 => Some(AssetType::GoverningToken),
            0x01 => Some(AssetType::UtilityToken),
            0x90 => Some(AssetType::Share),
            0x98 => Some(AssetType::Invoice),
            0xa0 => Some(AssetType::Token),
            _ => None,
        }
    }
}
