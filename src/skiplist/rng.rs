//! Tower-height generation: `1 + Geometric(p = 1/2)`, expected value 2.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn draw_height(rng: &mut impl Rng) -> usize {
    let mut height = 1usize;
    while rng.gen_bool(0.5) {
        height += 1;
    }
    height
}

/// Draw a tower height using `rand`'s own thread-local generator.
///
/// Safe to call from any number of threads concurrently: `rand::thread_rng`
/// is itself thread-local, so there is no shared mutable state to race on.
pub fn generate_height() -> usize {
    draw_height(&mut rand::thread_rng())
}

/// Draw a tower height deterministically from `(seed, index)`.
///
/// Used when a [`crate::Config`] seed is set: each element gets its own
/// independently seeded generator keyed by its position in the input, so the
/// result does not depend on which thread happened to process which index,
/// a property the unseeded thread-local path cannot offer.
pub fn generate_height_seeded(seed: u64, index: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    draw_height(&mut rng)
}
