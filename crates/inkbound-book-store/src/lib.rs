//! Inkbound book store: filesystem implementation of `BookSource`.

pub mod fs_book_source;
