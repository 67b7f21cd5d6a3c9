//! Helper utilities for unit tests.

/// Build a [`LineBuffer`](crate::buffer::LineBuffer) from string literals.
///
/// Lines are escaped exactly as they are when a document is read from disk.
macro_rules! buffer {
    ( $($line:expr),+ $(,)? ) => {
        $crate::buffer::LineBuffer::from_lines([ $( $line ),+ ])
    };
}
