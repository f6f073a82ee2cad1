// ABOUTME: Hardware (MAC) address parsing and normalisation.
// ABOUTME: Accepts colon or dash separated octets, renders lowercase with colons.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacAddressError {
    #[error("MAC address must have 6 octets, found {0}")]
    WrongLength(usize),

    #[error("invalid octet in MAC address: '{0}'")]
    InvalidOctet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn parse(value: &str) -> Result<Self, MacAddressError> {
        let parts: Vec<&str> = value.trim().split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(MacAddressError::WrongLength(parts.len()));
        }

        let mut octets = [0u8; 6];
        for (slot, part) in octets.iter_mut().zip(&parts) {
            if part.len() != 2 {
                return Err(MacAddressError::InvalidOctet(part.to_string()));
            }
            *slot = u8::from_str_radix(part, 16)
                .map_err(|_| MacAddressError::InvalidOctet(part.to_string()))?;
        }

        Ok(Self(octets))
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// All-zero addresses are reported by interfaces without hardware (e.g. loopback).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
