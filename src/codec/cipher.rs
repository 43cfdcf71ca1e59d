// src/codec/cipher.rs
use crate::core::error::{Result, ToolError};

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CAESAR_SHIFT: i32 = 3;

/// Shifts ASCII letters within their own case, wrapping modulo 26.
pub fn caesar(text: &str, shift: i32) -> String {
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_uppercase() {
                b'A'
            } else if c.is_ascii_lowercase() {
                b'a'
            } else {
                return c;
            };
            let offset = (c as u8 - base) as i32;
            let shifted = (offset + shift).rem_euclid(26) as u8;
            (base + shifted) as char
        })
        .collect()
}

fn normalized_key(key: &str) -> Result<Vec<char>> {
    let key: Vec<char> = key.to_uppercase().chars().collect();
    if key.is_empty() {
        return Err(ToolError::MissingKey);
    }
    Ok(key)
}

/// Upper-cases the text and replaces letter `n` of the alphabet with the key
/// character at `n mod key length`.
pub fn substitution_encode(text: &str, key: &str) -> Result<String> {
    let key = normalized_key(key)?;
    Ok(text
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                let position = (c as u8 - b'A') as usize;
                key[position % key.len()]
            } else {
                c
            }
        })
        .collect())
}

/// Inverse lookup by first occurrence in the key. Letters that are absent
/// from the key, or found past the 26th key character, pass through.
pub fn substitution_decode(text: &str, key: &str) -> Result<String> {
    let key = normalized_key(key)?;
    Ok(text
        .to_uppercase()
        .chars()
        .map(|c| {
            if !c.is_ascii_uppercase() {
                return c;
            }
            match key.iter().position(|&k| k == c) {
                Some(index) if index < ALPHABET.len() => ALPHABET[index] as char,
                _ => c,
            }
        })
        .collect())
}
