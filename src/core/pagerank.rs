//! Checksum expected by the Google toolbar PageRank endpoint.
//!
//! The arithmetic is on 64-bit signed integers; intermediate values stay well
//! below overflow because every step is reduced modulo 2^32.

use crate::core::urlencode;

const INT32_UNIT: i64 = 4_294_967_296;

fn str_to_num(text: &str, mut check: i64, magic: i64) -> i64 {
    for byte in text.bytes() {
        check *= magic;
        if check >= INT32_UNIT {
            check -= INT32_UNIT * (check / INT32_UNIT);
            if check < -2_147_483_648 {
                check += INT32_UNIT;
            }
        }
        check += i64::from(byte);
    }
    check
}

pub fn hash_url(url: &str) -> i64 {
    let mut check1 = str_to_num(url, 0x1505, 0x21);
    let check2 = str_to_num(url, 0, 0x1003F);

    check1 >>= 2;
    check1 = ((check1 >> 4) & 0x3FF_FFC0) | (check1 & 0x3F);
    check1 = ((check1 >> 4) & 0x3F_FC00) | (check1 & 0x3FF);
    check1 = ((check1 >> 4) & 0x3_C000) | (check1 & 0x3FFF);

    let t1 = ((((check1 & 0x3C0) << 4) | (check1 & 0x3C)) << 2) | (check2 & 0xF0F);
    let t2 = ((((check1 & 0xFFFF_C000) << 4) | (check1 & 0x3C00)) << 0xA) | (check2 & 0xF0F_0000);

    t1 | t2
}

/// `7`, a Luhn-style check digit, then the unsigned decimal hash.
pub fn check_hash(hash: i64) -> String {
    let digits = (hash as u64).to_string();

    let mut check_byte: u32 = 0;
    let mut flag: u32 = 0;
    for digit in digits.bytes().rev() {
        let mut re = u32::from(digit - b'0');
        if flag % 2 == 1 {
            re += re;
            re = re / 10 + re % 10;
        }
        check_byte += re;
        flag += 1;
    }

    check_byte %= 10;
    if check_byte != 0 {
        check_byte = 10 - check_byte;
        if flag % 2 == 1 {
            if check_byte % 2 == 1 {
                check_byte += 9;
            }
            check_byte >>= 1;
        }
    }

    format!("7{}{}", check_byte, digits)
}

pub fn toolbar_query(base: &str, url: &str) -> String {
    format!(
        "{}?client=navclient-auto&ch={}&features=Rank&q=info:{}&num=100&filter=0",
        base,
        check_hash(hash_url(url)),
        urlencode(url)
    )
}

/// Reads the rank from a toolbar response such as `Rank_1:1:5`. `None` when
/// the marker is missing; 0 when no digits follow it.
pub fn parse_rank(body: &str) -> Option<u32> {
    let pos = body.find("Rank_")?;
    let tail = body.get(pos + 9..).unwrap_or_default();
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some(digits.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_url() {
        assert_eq!(hash_url("http://www.google.com/"), 804486762);
        assert_eq!(hash_url("http://github.com/"), 3096955383);
    }

    #[test]
    fn test_check_hash() {
        assert_eq!(check_hash(hash_url("http://www.google.com/")), "78804486762");
        assert_eq!(check_hash(hash_url("http://github.com/")), "713096955383");
    }

    #[test]
    fn test_toolbar_query() {
        assert_eq!(
            toolbar_query("http://toolbarqueries.google.com/tbr", "http://github.com/"),
            "http://toolbarqueries.google.com/tbr?client=navclient-auto&ch=713096955383&features=Rank&q=info:http%3A%2F%2Fgithub.com%2F&num=100&filter=0"
        );
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("Rank_1:1:5\n"), Some(5));
        assert_eq!(parse_rank("Rank_1:2:10\n"), Some(10));
        assert_eq!(parse_rank("Rank_1:1:"), Some(0));
        assert_eq!(parse_rank("nothing here"), None);
    }
}
