use super::*;

#[test]
fn font_size_is_clamped_to_a_positive_value() {
    assert_eq!(Font::builtin(0.0).size_px(), 1.0);
    assert_eq!(Font::builtin(f32::NAN).size_px(), 1.0);
    assert_eq!(Font::builtin(37.5).size_px(), 37.5);
}

#[test]
fn file_identity_depends_on_path_and_index() {
    let a = FontFile::new("fonts/a.ttf", vec![1, 2, 3], 0);
    let b = FontFile::new("fonts/b.ttf", vec![1, 2, 3], 0);
    let a1 = FontFile::new("fonts/a.ttf", vec![1, 2, 3], 1);
    assert_ne!(a.id(), b.id());
    assert_ne!(a.id(), a1.id());
    assert_eq!(a.id(), FontFile::new("fonts/a.ttf", vec![9, 9, 9], 0).id());
}

#[test]
fn sha256_matches_known_digest() {
    let f = FontFile::new("x.ttf", b"abc".to_vec(), 0);
    assert_eq!(
        f.sha256_hex(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn describe_names_the_origin() {
    assert_eq!(FontFace::Builtin.describe(), "<builtin>");
    let f = FontFace::File(Arc::new(FontFile::new("fonts/NotoSansSC-Bold.ttf", vec![], 0)));
    assert!(f.describe().ends_with("NotoSansSC-Bold.ttf"));
}
