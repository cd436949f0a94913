#![allow(dead_code)]

use fs_runtime::Mount;
use fs_runtime_mocked::MemFs;
use prefs_io::{PrefsFs, PrefsOptions};
use std::sync::Arc;

/// Install a test subscriber; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Adapter over a fresh in-memory filesystem, plus a handle to that filesystem for probing.
pub fn mem_prefs() -> (PrefsFs<MemFs>, Arc<MemFs>) {
    mem_prefs_with(PrefsOptions::default())
}

pub fn mem_prefs_with(options: PrefsOptions) -> (PrefsFs<MemFs>, Arc<MemFs>) {
    init_tracing();
    let mount = Mount::mounted(MemFs::new());
    let fs = mount.get().expect("Should be mounted");
    (PrefsFs::with_options(mount, options), fs)
}
