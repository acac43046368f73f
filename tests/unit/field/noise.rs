use super::*;

#[test]
fn same_seed_gives_identical_field() {
    let a = Perlin2::new(42);
    let b = Perlin2::new(42);
    for i in 0..200 {
        let x = i as f64 * 0.173;
        let y = i as f64 * -0.311;
        assert_eq!(a.sample(x, y), b.sample(x, y));
    }
}

#[test]
fn different_seeds_differ_somewhere() {
    let a = Perlin2::new(1);
    let b = Perlin2::new(2);
    let differs = (0..100).any(|i| {
        let x = 0.37 + i as f64 * 0.5;
        a.sample(x, 0.61) != b.sample(x, 0.61)
    });
    assert!(differs);
}

#[test]
fn lattice_points_are_zero() {
    let n = Perlin2::new(7);
    for x in -3..4 {
        for y in -3..4 {
            assert_eq!(n.sample(f64::from(x), f64::from(y)), 0.0);
        }
    }
}

#[test]
fn output_is_bounded() {
    let n = Perlin2::new(99);
    for i in 0..2_000 {
        let x = (i as f64) * 0.0371 - 20.0;
        let y = (i as f64) * 0.0173 + 3.0;
        let v = n.sample(x, y);
        assert!((-1.5..=1.5).contains(&v), "{v} at ({x},{y})");
    }
}

#[test]
fn field_is_continuous() {
    let n = Perlin2::new(5);
    let eps = 1e-6;
    for i in 0..100 {
        let x = i as f64 * 0.23 + 0.01;
        let y = i as f64 * 0.07 + 0.02;
        let d = (n.sample(x + eps, y) - n.sample(x, y)).abs();
        assert!(d < 1e-4);
    }
}

#[test]
fn handles_large_and_negative_coordinates() {
    let n = Perlin2::new(3);
    assert!(n.sample(-1e6 + 0.5, 1e6 + 0.25).is_finite());
    assert!(n.sample(300.5, -299.5).is_finite());
}
