//! Arithmetic calculator grammar for `ruly`.

pub mod grammar;
