//! Random sources for scattered brushes

/// Source of uniformly distributed values in `[0, 1)`.
///
/// The spray brush draws its dot offsets from here; tests plug in
/// fixed sequences.
pub trait ScatterSource {
    fn next_unit(&mut self) -> f32;
}

/// Counter-based integer hash generator.
///
/// Deterministic for a given seed, which keeps replays reproducible.
#[derive(Debug, Clone)]
pub struct HashScatter {
    seed: u32,
    counter: u32,
}

impl HashScatter {
    pub fn new(seed: u32) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seed from a host random value in `[0, 1)`, such as `Math.random()`.
    /// Out-of-range and NaN inputs are clamped.
    pub fn from_unit(unit: f64) -> Self {
        let unit = if unit.is_nan() { 0.0 } else { unit.clamp(0.0, 1.0) };
        Self::new((unit * f64::from(u32::MAX)) as u32)
    }

    fn hash(seed: u32, counter: u32) -> u32 {
        let mut h = seed
            .wrapping_mul(374_761_393)
            .wrapping_add(counter.wrapping_mul(668_265_263))
            .wrapping_add(1_013_904_223);
        h ^= h >> 13;
        h = h.wrapping_mul(1_274_126_177);
        h ^= h >> 16;
        h
    }
}

impl Default for HashScatter {
    fn default() -> Self {
        Self::new(0x5eed)
    }
}

impl ScatterSource for HashScatter {
    fn next_unit(&mut self) -> f32 {
        self.counter = self.counter.wrapping_add(1);
        // Top 24 bits fit an f32 mantissa exactly, so the result stays below 1.0
        (Self::hash(self.seed, self.counter) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceScatter {
    values: Vec<f32>,
    index: usize,
}

impl SequenceScatter {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }
}

impl ScatterSource for SequenceScatter {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.index % self.values.len()];
        self.index = self.index.wrapping_add(1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_scatter_range() {
        let mut scatter = HashScatter::new(7);
        for _ in 0..10_000 {
            let v = scatter.next_unit();
            assert!((0.0..1.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_hash_scatter_is_deterministic_per_seed() {
        let a: Vec<f32> = {
            let mut s = HashScatter::new(42);
            (0..16).map(|_| s.next_unit()).collect()
        };
        let b: Vec<f32> = {
            let mut s = HashScatter::new(42);
            (0..16).map(|_| s.next_unit()).collect()
        };
        let c: Vec<f32> = {
            let mut s = HashScatter::new(43);
            (0..16).map(|_| s.next_unit()).collect()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_scatter_spreads_values() {
        let mut scatter = HashScatter::default();
        let values: Vec<f32> = (0..1000).map(|_| scatter.next_unit()).collect();
        let low = values.iter().filter(|v| **v < 0.5).count();
        assert!((300..700).contains(&low), "skewed distribution: {low}/1000 below 0.5");
    }

    #[test]
    fn test_from_unit_seeds_differ() {
        let sample = |unit: f64| {
            let mut s = HashScatter::from_unit(unit);
            (0..8).map(|_| s.next_unit()).collect::<Vec<f32>>()
        };
        assert_ne!(sample(0.25), sample(0.75));
        assert_eq!(HashScatter::from_unit(0.25).seed, u32::MAX / 4);
        assert_eq!(HashScatter::from_unit(2.0).seed, u32::MAX);
        assert_eq!(HashScatter::from_unit(f64::NAN).seed, 0);
    }

    #[test]
    fn test_sequence_scatter_cycles() {
        let mut scatter = SequenceScatter::new([0.1, 0.9]);
        assert_eq!(scatter.next_unit(), 0.1);
        assert_eq!(scatter.next_unit(), 0.9);
        assert_eq!(scatter.next_unit(), 0.1);
    }
}
