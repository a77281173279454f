use super::*;
use crate::color::Rgb;

#[test]
fn offsets_stay_within_amplitude() {
    let mut seen = std::collections::HashSet::new();
    for i in 0..10_000u64 {
        let d = noise_offset(42, i);
        assert!((-NOISE_AMPLITUDE..=NOISE_AMPLITUDE).contains(&d));
        seen.insert(d);
    }
    assert_eq!(seen.len(), 9);
}

#[test]
fn noise_is_deterministic_per_seed() {
    let mut a = Canvas::new(32, 8, Rgb::new(128, 128, 128)).unwrap();
    let mut b = Canvas::new(32, 8, Rgb::new(128, 128, 128)).unwrap();
    let mut c = Canvas::new(32, 8, Rgb::new(128, 128, 128)).unwrap();
    apply_noise(&mut a, 7);
    apply_noise(&mut b, 7);
    apply_noise(&mut c, 8);
    assert_eq!(a.as_premul_bytes(), b.as_premul_bytes());
    assert_ne!(a.as_premul_bytes(), c.as_premul_bytes());
}

#[test]
fn noise_shifts_channels_together_and_keeps_alpha() {
    let mut canvas = Canvas::new(16, 16, Rgb::new(100, 120, 140)).unwrap();
    apply_noise(&mut canvas, 1);
    for px in canvas.as_premul_bytes().chunks_exact(4) {
        let d = i32::from(px[0]) - 100;
        assert!(d.abs() <= NOISE_AMPLITUDE);
        assert_eq!(i32::from(px[1]) - 120, d);
        assert_eq!(i32::from(px[2]) - 140, d);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn noise_clamps_at_channel_limits() {
    let mut canvas = Canvas::new(16, 16, Rgb::new(0, 255, 2)).unwrap();
    apply_noise(&mut canvas, 3);
    for px in canvas.as_premul_bytes().chunks_exact(4) {
        assert!(px[0] <= 4);
        assert!(px[1] >= 251);
        assert!(px[2] <= 6);
    }
}
