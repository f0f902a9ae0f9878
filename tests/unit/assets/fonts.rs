use super::*;

#[test]
fn empty_book_resolves_nothing() {
    let book = FontBook::empty();
    assert_eq!(book.face_count(), 0);
    assert!(book.resolve(Some("Arial"), &["Helvetica".to_string()]).is_none());
    assert!(book.resolve(None, &[]).is_none());
}

#[test]
fn garbage_font_data_adds_no_faces() {
    let book = FontBook::empty().with_font_data(b"definitely not a font".to_vec());
    assert_eq!(book.face_count(), 0);
}

#[test]
fn missing_font_dir_is_ignored() {
    let book =
        FontBook::empty().with_font_dir(&std::env::temp_dir().join("adlayout_missing_fonts"));
    assert_eq!(book.face_count(), 0);
}

#[test]
fn system_fonts_fall_back_softly() {
    let book = FontBook::system();
    if book.face_count() == 0 {
        return;
    }
    let face = book
        .resolve(Some("No Such Family 12345"), &[])
        .expect("any face is used as the last resort");
    assert!(!face.exact);
    assert!(!face.data.is_empty());
}
