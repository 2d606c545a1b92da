//! File-level tests for the sidecar formats.
//!
//! These tests write real files into temporary directories and check the
//! on-disk layout as well as load/save round trips.
