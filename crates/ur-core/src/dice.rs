//! Dice.
//!
//! A roll is four two-sided dice thrown together, counting the marked
//! sides. Rolls therefore range over 0..=4 with a binomial distribution.

use rand::Rng;

/// Number of two-sided dice thrown per roll
pub const DICE_COUNT: u8 = 4;

/// Highest possible roll
pub const MAX_ROLL: u8 = DICE_COUNT;

/// Throw the dice
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    (0..DICE_COUNT).filter(|_| rng.gen_bool(0.5)).count() as u8
}

/// Probability of throwing exactly `roll`
pub fn probability(roll: u8) -> f64 {
    if roll > MAX_ROLL {
        return 0.0;
    }
    let ways = binomial(DICE_COUNT as u32, roll as u32);
    ways as f64 / (1u32 << DICE_COUNT) as f64
}

fn binomial(n: u32, k: u32) -> u32 {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
