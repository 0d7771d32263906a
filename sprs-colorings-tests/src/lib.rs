//! Integration tests for optional features of `sprs-colorings`, see the
//! `tests` directory.
