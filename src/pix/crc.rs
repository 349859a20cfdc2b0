//! CRC-16/CCITT-FALSE, the checksum closing every payload (tag `63`).

/// Tag and length of the checksum field. The CRC covers these four characters too.
pub const CRC_PREFIX: &str = "6304";

const POLYNOMIAL: u16 = 0x1021;

/// CRC-16/CCITT-FALSE: poly `0x1021`, init `0xFFFF`, MSB first, no final xor.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Four upper-case hex digits for `payload`, which must already end in [`CRC_PREFIX`].
pub fn checksum(payload: &str) -> String {
    format!("{:04X}", crc16(payload.as_bytes()))
}

/// Recomputes the checksum of a complete payload and compares it with the trailing four
/// digits. Hex case is ignored.
pub fn verify_checksum(payload: &str) -> bool {
    let Some(split) = payload.len().checked_sub(4) else {
        return false;
    };
    if !payload.is_ascii() {
        return false;
    }
    let (body, digits) = payload.split_at(split);
    body.ends_with(CRC_PREFIX) && checksum(body).eq_ignore_ascii_case(digits)
}
