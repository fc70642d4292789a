//! Identifier generation for synthesized meeting links.
//!
//! Providers never pull randomness ambiently; they are constructed with an
//! [`IdSource`] so tests can script exact identifiers and assert full link
//! shapes. Production code uses [`RandomIdSource`].

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;
use rand::distr::Alphanumeric;

/// A source of meeting identifiers.
///
/// Implementations must be `Send + Sync`; providers share one source behind
/// an `Arc`.
pub trait IdSource: Send + Sync {
    /// Returns `len` decimal digits with a nonzero first digit.
    fn digits(&self, len: usize) -> String;

    /// Returns `len` lowercase letters.
    fn letters(&self, len: usize) -> String;

    /// Returns `len` lowercase letters and digits.
    fn lower_alnum(&self, len: usize) -> String;

    /// Returns `len` mixed-case letters and digits.
    fn alphanumeric(&self, len: usize) -> String;
}

/// Thread-local-RNG-backed id source for production use.
#[derive(Debug, Default)]
pub struct RandomIdSource;

impl RandomIdSource {
    /// Creates a new random id source.
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for RandomIdSource {
    fn digits(&self, len: usize) -> String {
        let mut rng = rand::rng();
        let mut out = String::with_capacity(len);
        if len > 0 {
            out.push(char::from(b'1' + rng.random_range(0..9u8)));
        }
        for _ in 1..len {
            out.push(char::from(b'0' + rng.random_range(0..10u8)));
        }
        out
    }

    fn letters(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
            .collect()
    }

    fn lower_alnum(&self, len: usize) -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::rng();
        (0..len)
            .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
            .collect()
    }

    fn alphanumeric(&self, len: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Scripted id source for deterministic tests.
///
/// Pops one value from the tape per call, regardless of which method is
/// called. The tape owner is responsible for scripting values of the right
/// shape for the provider under test.
#[derive(Debug)]
pub struct FixedIdSource {
    tape: Mutex<VecDeque<String>>,
}

impl FixedIdSource {
    /// Creates a source that yields the given values in order.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tape: Mutex::new(values.into_iter().map(Into::into).collect()),
        }
    }

    fn next(&self) -> String {
        self.tape
            .lock()
            .expect("id tape lock poisoned")
            .pop_front()
            .expect("id tape exhausted")
    }
}

impl IdSource for FixedIdSource {
    fn digits(&self, _len: usize) -> String {
        self.next()
    }

    fn letters(&self, _len: usize) -> String {
        self.next()
    }

    fn lower_alnum(&self, _len: usize) -> String {
        self.next()
    }

    fn alphanumeric(&self, _len: usize) -> String {
        self.next()
    }
}
