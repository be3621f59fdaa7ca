use crate::error::{Error, Result};
use blake2::{Blake2b512, Digest};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use log::{debug, warn};
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use zeroize::Zeroizing;

const SEED_LEN: usize = 32;
const KEYSTREAM_BUFFER_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyKind {
    Cryptographic,
    Fallback,
}

enum Engine {
    Keystream {
        cipher: ChaCha20,
        buffer: Zeroizing<Vec<u8>>,
        pos: usize,
    },
    Fallback(SmallRng),
}

pub struct RandomSource {
    engine: Engine,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);

        match OsRng.try_fill_bytes(&mut seed[..]) {
            Ok(()) => Self::from_seed(&seed),
            Err(e) => {
                warn!(
                    "Operating system random source unavailable ({}), using non-cryptographic fallback",
                    e
                );
                Self::fallback(fallback_seed())
            }
        }
    }

    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        let mut cipher = ChaCha20::new(seed.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; KEYSTREAM_BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer);

        Self {
            engine: Engine::Keystream {
                cipher,
                buffer,
                pos: 0,
            },
        }
    }

    /// Non-cryptographic generator. Draws are scaled rather than
    /// rejection-sampled, so they carry a small bias.
    pub fn fallback(seed: u64) -> Self {
        Self {
            engine: Engine::Fallback(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn entropy_kind(&self) -> EntropyKind {
        match self.engine {
            Engine::Keystream { .. } => EntropyKind::Cryptographic,
            Engine::Fallback(_) => EntropyKind::Fallback,
        }
    }

    pub fn is_cryptographic(&self) -> bool {
        self.entropy_kind() == EntropyKind::Cryptographic
    }

    pub fn require_cryptographic(&self) -> Result<()> {
        if self.is_cryptographic() {
            Ok(())
        } else {
            Err(Error::DegradedRandomness)
        }
    }

    fn next_u32(&mut self) -> u32 {
        match &mut self.engine {
            Engine::Keystream {
                cipher,
                buffer,
                pos,
            } => {
                if *pos + 4 > buffer.len() {
                    buffer.fill(0);
                    cipher.apply_keystream(buffer);
                    *pos = 0;
                }

                let value = u32::from_le_bytes([
                    buffer[*pos],
                    buffer[*pos + 1],
                    buffer[*pos + 2],
                    buffer[*pos + 3],
                ]);
                *pos += 4;
                value
            }
            Engine::Fallback(rng) => rng.next_u32(),
        }
    }

    /// Returns an integer in `[0, max)`.
    ///
    /// On the keystream path draws at or above the largest multiple of `max`
    /// that fits in 32 bits are rejected, so the result carries no modulo
    /// bias.
    pub fn uniform(&mut self, max: usize) -> Result<usize> {
        if max == 0 {
            return Err(Error::EmptyRange);
        }

        let bound = u32::try_from(max).map_err(|_| Error::RangeTooLarge(max))?;

        if let Engine::Fallback(_) = self.engine {
            let scaled = (u64::from(self.next_u32()) * u64::from(bound)) >> 32;
            return Ok(scaled as usize);
        }

        let threshold = rejection_threshold(bound);
        loop {
            let draw = self.next_u32();
            if u64::from(draw) < threshold {
                return Ok((draw % bound) as usize);
            }
        }
    }

    pub fn sample_indices(&mut self, n: usize, k: usize) -> Result<Vec<usize>> {
        if k > n {
            return Err(Error::InvalidOptions(format!(
                "cannot draw {} distinct indices from {}",
                k, n
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.uniform(n - i)?;
            indices.swap(i, j);
        }
        indices.truncate(k);

        Ok(indices)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        let index = self.uniform(items.len())?;
        Ok(&items[index])
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn rejection_threshold(max: u32) -> u64 {
    let range = 1u64 << 32;
    (range / u64::from(max)) * u64::from(max)
}

fn fallback_seed() -> u64 {
    let mut hasher = Blake2b512::new();

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());

    let marker = 0u8;
    hasher.update((&marker as *const u8 as usize).to_le_bytes());

    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    debug!("Fallback generator seeded from clock and process data");

    u64::from_le_bytes(bytes)
}
