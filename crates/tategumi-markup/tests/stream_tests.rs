//! Integration tests for the token stream cursor.

use tategumi_markup::{StreamError, TokenStream};

fn stream() -> TokenStream<char> {
    TokenStream::new("あいうえお".chars().collect())
}

#[test]
fn test_get_and_peek() {
    let mut s = stream();
    assert_eq!(s.peek(0), Some(&'あ'));
    assert_eq!(s.get(), Some('あ'));
    assert_eq!(s.peek(1), Some(&'う'));
    assert_eq!(s.pos(), 1);
}

#[test]
fn test_prev_and_rewind() {
    let mut s = stream();
    let _ = s.get();
    let _ = s.get();
    s.prev().unwrap();
    assert_eq!(s.get(), Some('い'));
    s.rewind();
    assert_eq!(s.pos(), 0);
    assert_eq!(s.prev(), Err(StreamError::BeforeStart));
}

#[test]
fn test_set_pos_bounds() {
    let mut s = stream();
    s.set_pos(5).unwrap();
    assert!(!s.has_next());
    assert_eq!(s.get(), None);
    assert_eq!(s.set_pos(6), Err(StreamError::OutOfRange { pos: 6, len: 5 }));
}

#[test]
fn test_take_while() {
    let mut s = TokenStream::new(vec![' ', ' ', 'a']);
    assert_eq!(s.take_while(|c| *c == ' ').len(), 2);
    assert_eq!(s.get(), Some('a'));
}

#[test]
fn test_replace_and_push_front() {
    let mut s = stream();
    s.replace(0, 'ア').unwrap();
    s.push_front('・');
    assert_eq!(s.get(), Some('・'));
    assert_eq!(s.get(), Some('ア'));
    assert!(s.replace(10, 'x').is_err());
}
