//! Address encoding between the two chains
//!
//! Foreign-chain events carry local recipients as raw 20-byte addresses;
//! they are rendered as bech32 with the chain's account prefix before use.
//! Outbound transfers name a foreign account id, which must be a valid
//! account on the foreign chain:
//!
//! - 2 to 64 characters
//! - lowercase `a-z`, digits and the separators `-`, `_`, `.`
//! - separators never lead, trail or follow another separator

use cosmwasm_std::{StdError, StdResult};

/// Shortest valid foreign account id
pub const MIN_REMOTE_ACCOUNT_LEN: usize = 2;

/// Longest valid foreign account id
pub const MAX_REMOTE_ACCOUNT_LEN: usize = 64;

// ============================================================================
// Foreign Accounts
// ============================================================================

/// Check a foreign-chain account id
pub fn is_valid_remote_account(account: &str) -> bool {
    let bytes = account.as_bytes();
    if bytes.len() < MIN_REMOTE_ACCOUNT_LEN || bytes.len() > MAX_REMOTE_ACCOUNT_LEN {
        return false;
    }

    let is_separator = |c: u8| c == b'-' || c == b'_' || c == b'.';
    let mut last_was_separator = true;
    for &c in bytes {
        if is_separator(c) {
            if last_was_separator {
                return false;
            }
            last_was_separator = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            last_was_separator = false;
        } else {
            return false;
        }
    }
    !last_was_separator
}

// ============================================================================
// Bech32
// ============================================================================

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CHECKSUM_LEN: usize = 6;
const GENERATOR: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// Render a raw 20-byte account as bech32 under `hrp`
pub fn encode_bech32_address(bytes: &[u8; 20], hrp: &str) -> StdResult<String> {
    if hrp.is_empty() {
        return Err(StdError::generic_err("Empty bech32 prefix"));
    }
    let data = to_base32(bytes);
    let checksum = checksum(hrp, &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(hrp);
    out.push('1');
    out.extend(
        data.iter()
            .chain(checksum.iter())
            .map(|&v| CHARSET[v as usize] as char),
    );
    Ok(out)
}

/// Split 8-bit bytes into zero-padded 5-bit groups
fn to_base32(data: &[u8]) -> Vec<u8> {
    let mut acc = 0u32;
    let mut bits = 0u32;
    let mut out = Vec::with_capacity((data.len() * 8).div_ceil(5));

    for &value in data {
        acc = (acc << 8) | u32::from(value);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 31) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 31) as u8);
    }
    out
}

fn checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hrp = hrp.as_bytes();
    let expanded = hrp
        .iter()
        .map(|c| c >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.iter().map(|c| c & 31))
        .chain(data.iter().copied())
        .chain([0u8; CHECKSUM_LEN]);

    let modulus = polymod(expanded) ^ 1;
    let mut out = [0u8; CHECKSUM_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = ((modulus >> (5 * (CHECKSUM_LEN - 1 - i))) & 31) as u8;
    }
    out
}

fn polymod(values: impl Iterator<Item = u8>) -> u32 {
    values.fold(1u32, |chk, v| {
        let top = chk >> 25;
        GENERATOR
            .iter()
            .enumerate()
            .filter(|(i, _)| (top >> i) & 1 == 1)
            .fold(((chk & 0x01ff_ffff) << 5) ^ u32::from(v), |acc, (_, g)| acc ^ g)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_terra_address() {
        let raw = [
            0x35, 0x74, 0x30, 0x74, 0x95, 0x6c, 0x71, 0x08, 0x00, 0xe8, 0x31, 0x98, 0x01, 0x1c,
            0xcb, 0xd4, 0xdd, 0xf1, 0x55, 0x6d,
        ];
        assert_eq!(
            encode_bech32_address(&raw, "terra").unwrap(),
            "terra1x46rqay4d3cssq8gxxvqz8xt6nwlz4td20k38v"
        );
    }

    #[test]
    fn test_encode_uses_prefix() {
        let addr = encode_bech32_address(&[0x11; 20], "terra").unwrap();
        assert!(addr.starts_with("terra1"));
        assert_eq!(addr.len(), "terra1".len() + 32 + 6);

        let other = encode_bech32_address(&[0x11; 20], "cosmos").unwrap();
        assert!(other.starts_with("cosmos1"));
        assert_ne!(addr[6..], other[7..]);
        assert!(encode_bech32_address(&[0x11; 20], "").is_err());
    }

    #[test]
    fn test_remote_account_accepts_valid_ids() {
        for account in [
            "mynearaccount.near",
            "alice.near",
            "ab",
            "sub.account-1_x.testnet",
            "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
        ] {
            assert!(is_valid_remote_account(account), "{}", account);
        }
    }

    #[test]
    fn test_remote_account_rejects_invalid_ids() {
        let too_long = "a".repeat(MAX_REMOTE_ACCOUNT_LEN + 1);
        for account in [
            "",
            "a",
            too_long.as_str(),
            "Alice.near",
            ".alice",
            "alice.",
            "alice..near",
            "alice-_near",
            "alice near",
            "alice@near",
        ] {
            assert!(!is_valid_remote_account(account), "{}", account);
        }
    }
}
