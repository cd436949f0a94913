//! Preferences storage demo
//!
//! Runs a create/update/verify/read/rename/clean cycle against a host
//! directory.
//!
//! Usage: `prefs_demo <root-dir> [options.json]`

use fs_runtime::{Mount, StdFs};
use prefs_io::{PrefsFs, PrefsOptions, PrefsStorage};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let root = args
        .next()
        .ok_or("usage: prefs_demo <root-dir> [options.json]")?;
    let options = match args.next() {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            PrefsOptions::from_reader(bytes.as_slice())?
        }
        None => PrefsOptions::default(),
    };
    info!(root = %root, ?options, "starting");

    // Startup routine: bring the filesystem up, then hand the mount over
    std::fs::create_dir_all(&root)?;
    let mount = Mount::unmounted();
    let prefs = PrefsFs::with_options(mount.clone(), options);
    mount.mount(StdFs::new(&root));

    prefs.init()?;
    if !prefs.exists("/demo")? {
        prefs.mkdir("/demo")?;
    }

    let n = prefs.update("/demo/greeting", b"hello, preferences")?;
    info!(bytes = n, "stored greeting");

    let n = prefs.update("/demo/greeting", b"hello, preferences")?;
    info!(bytes = n, "stored same greeting again");

    let n = prefs.update("/demo/greeting", b"hi")?;
    info!(bytes = n, size = prefs.size("/demo/greeting")?, "stored shorter greeting");

    prefs.verify("/demo/greeting", b"hi")?;

    let mut buf = [0u8; 64];
    let n = prefs.read("/demo/greeting", &mut buf)?;
    info!(content = %String::from_utf8_lossy(&buf[..n]), "read back");

    prefs.rename("/demo/greeting", "/demo/salutation")?;
    info!(
        old = prefs.exists("/demo/greeting")?,
        new = prefs.exists("/demo/salutation")?,
        "renamed"
    );

    prefs.clean_dir("/demo")?;
    info!(exists = prefs.exists("/demo")?, "cleaned");

    Ok(())
}
