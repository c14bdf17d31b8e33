//! # Address Generation
//!
//! Produces candidate IPv4 addresses for a run. Each octet is an independent
//! uniform draw over `[0, 255]`, so duplicates are possible and legal.
//!
//! The default source draws from the thread-local generator returned by
//! [`rand::rng`], which is seeded once per thread from the operating system and
//! never reseeded per call. [`SeededAddresses`] gives reproducible sequences.

use std::net::Ipv4Addr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can hand out the next address to probe.
pub trait AddressSource: Send {
    fn next_address(&mut self) -> Ipv4Addr;
}

/// Draws one address from `rng`: four independent uniform octets.
pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    Ipv4Addr::new(rng.random(), rng.random(), rng.random(), rng.random())
}

/// Generates one address from the thread-local generator.
pub fn generate() -> Ipv4Addr {
    random_address(&mut rand::rng())
}

/// Unbounded stream of random addresses backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAddresses;

impl AddressSource for RandomAddresses {
    fn next_address(&mut self) -> Ipv4Addr {
        generate()
    }
}

/// Random addresses from an explicitly seeded generator.
#[derive(Debug, Clone)]
pub struct SeededAddresses {
    rng: StdRng,
}

impl SeededAddresses {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl AddressSource for SeededAddresses {
    fn next_address(&mut self) -> Ipv4Addr {
        random_address(&mut self.rng)
    }
}

/// Cycles through a fixed list of addresses.
///
/// An empty list yields `0.0.0.0` forever.
#[derive(Debug, Clone)]
pub struct FixedAddresses {
    addrs: Vec<Ipv4Addr>,
    cursor: usize,
}

impl FixedAddresses {
    pub fn new(addrs: Vec<Ipv4Addr>) -> Self {
        Self { addrs, cursor: 0 }
    }
}

impl AddressSource for FixedAddresses {
    fn next_address(&mut self) -> Ipv4Addr {
        if self.addrs.is_empty() {
            return Ipv4Addr::UNSPECIFIED;
        }
        let addr = self.addrs[self.cursor % self.addrs.len()];
        self.cursor = self.cursor.wrapping_add(1);
        addr
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
