//! Some dirty work

mod writer;

pub(crate) use writer::Writer;
