//! Passcode generation

use rand::{rngs::OsRng, Rng};
use std::sync::Mutex;

use crate::domain::entities::{CODE_MAX, CODE_MIN};

/// Produce a uniformly distributed 6-digit passcode from `rng`
///
/// Values fall in `100000..=999999`, so the string is always six digits
/// without zero padding.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// Source of new passcodes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws passcodes from the OS CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(&mut OsRng)
    }
}

/// Hands out a predetermined sequence of codes, repeating the last one
///
/// For tests and local demos only.
#[derive(Debug)]
pub struct FixedCodeGenerator {
    codes: Mutex<Vec<String>>,
}

impl FixedCodeGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        codes.reverse();
        Self {
            codes: Mutex::new(codes),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        let mut codes = self.codes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if codes.len() > 1 {
            codes.pop().unwrap_or_default()
        } else {
            codes.last().cloned().unwrap_or_else(|| CODE_MIN.to_string())
        }
    }
}
