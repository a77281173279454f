use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_alpha8(&src, 3, 2, 0.0).unwrap(), src);
    assert_eq!(blur_alpha8(&src, 3, 2, f32::NAN).unwrap(), src);
}

#[test]
fn constant_mask_is_identity() {
    let (w, h) = (6u32, 4u32);
    let src = vec![200u8; (w * h) as usize];
    assert_eq!(blur_alpha8(&src, w, h, 2.0).unwrap(), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_alpha8(&src, w, h, 1.0).unwrap();

    assert!(out.iter().filter(|&&a| a != 0).count() > 1);
    let sum: i32 = out.iter().map(|&a| i32::from(a)).sum();
    assert!((sum - 255).abs() <= 30, "sum={sum}");
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(kernel_radius(0.0), 0);
    assert_eq!(kernel_radius(-1.0), 0);
    assert_eq!(kernel_radius(1.0), 3);
    assert_eq!(kernel_radius(21.6), 65);
}

#[test]
fn kernel_sums_to_one() {
    let k = gaussian_kernel_q16(7, 2.3).unwrap();
    assert_eq!(k.len(), 15);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
}

#[test]
fn mismatched_buffer_is_rejected() {
    assert!(blur_alpha8(&[0u8; 5], 2, 2, 1.0).is_err());
}
