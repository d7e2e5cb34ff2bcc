use std::sync::Mutex;

use rand::Rng;

const ALPHABET: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

/// Generates chronologically sortable keys for new children.
///
/// A key is the millisecond timestamp in 8 characters followed by 12
/// random characters. Keys generated within the same millisecond reuse the
/// previous random part incremented by one, so they stay strictly ordered.
#[derive(Default)]
pub struct PushIdGenerator {
    last: Mutex<Last>,
}

impl PushIdGenerator {
    /// Returns `None` when the clock reads before the epoch or the generator is unusable.
    pub fn generate(&self) -> Option<String> {
        let now = u64::try_from(crate::message::now_millis()).ok()?;
        let mut last = self.last.lock().ok()?;
        Some(last.next(now, &mut rand::rng()))
    }
}

#[derive(Default)]
struct Last {
    time: u64,
    random: [u8; RANDOM_LEN],
}

impl Last {
    fn next(&mut self, now: u64, rng: &mut impl Rng) -> String {
        if now == self.time {
            for digit in self.random.iter_mut().rev() {
                if *digit == 63 {
                    *digit = 0;
                    continue;
                }
                *digit += 1;
                break;
            }
        } else {
            self.time = now;
            for digit in &mut self.random {
                *digit = rng.random_range(0..64);
            }
        }

        let mut out = [0u8; TIME_LEN + RANDOM_LEN];
        let mut time = now;
        for slot in out[..TIME_LEN].iter_mut().rev() {
            *slot = ALPHABET[(time % 64) as usize];
            time /= 64;
        }
        for (slot, digit) in out[TIME_LEN..].iter_mut().zip(self.random) {
            *slot = ALPHABET[usize::from(digit)];
        }

        out.iter().map(|&c| char::from(c)).collect()
    }
}
