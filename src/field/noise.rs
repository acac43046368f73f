use crate::foundation::math::Rng64;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Seeded 2D gradient (Perlin) noise.
///
/// The permutation table holds 256 random bytes doubled to 512 entries so lattice hashing never
/// has to wrap. Output is roughly in `[-1, 1]` and zero on integer lattice points.
#[derive(Clone)]
pub struct Perlin2 {
    perm: [u8; 512],
}

impl Perlin2 {
    /// Build a noise field whose permutation table is drawn from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let mut perm = [0u8; 512];
        let (lo, hi) = perm.split_at_mut(256);
        lo.iter_mut().for_each(|slot| *slot = rng.next_u8());
        hi.copy_from_slice(lo);
        Self { perm }
    }

    /// Sample the field at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        // Same lattice wrap as `floor(x) & 255` on two's-complement integers.
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let x = x - xf;
        let y = y - yf;

        let u = fade(x);
        let v = fade(y);

        let p = |i: usize| usize::from(self.perm[i]);
        let a = p(xi) + yi;
        let aa = p(a);
        let ab = p(a + 1);
        let b = p(xi + 1) + yi;
        let ba = p(b);
        let bb = p(b + 1);

        mix(
            mix(grad(aa, x, y), grad(ba, x - 1.0, y), u),
            mix(grad(ab, x, y - 1.0), grad(bb, x - 1.0, y - 1.0), u),
            v,
        )
    }
}

impl std::fmt::Debug for Perlin2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin2").finish_non_exhaustive()
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let g = GRAD3[hash % 12];
    g[0] * x + g[1] * y
}

#[cfg(test)]
#[path = "../../tests/unit/field/noise.rs"]
mod tests;
