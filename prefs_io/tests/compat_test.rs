mod common;

use common::mem_prefs;
use fs_runtime::Mount;
use fs_runtime_mocked::{MemFs, WANT_ERROR};
use prefs_io::compat::{
    fs_clean_dir, fs_create, fs_exists, fs_get_size, fs_init, fs_mkdir, fs_read, fs_rename,
    fs_unlink, fs_update, fs_verify,
};
use prefs_io::{PrefsFs, PrefsStorage};

#[test]
fn happy_path() {
    let (prefs, _fs) = mem_prefs();

    assert!(fs_init(&prefs));
    assert!(fs_mkdir(&prefs, "/nvs"));
    assert_eq!(fs_create(&prefs, "/nvs/key", b"hello"), 5);
    assert!(fs_verify(&prefs, "/nvs/key", b"hello"));
    assert_eq!(fs_get_size(&prefs, "/nvs/key"), 5);

    let mut buf = [0u8; 8];
    assert_eq!(fs_read(&prefs, "/nvs/key", &mut buf), 5);
    assert_eq!(&buf[..5], b"hello");

    assert_eq!(fs_update(&prefs, "/nvs/key", b"hi"), 2);
    assert_eq!(fs_get_size(&prefs, "/nvs/key"), 2);

    assert!(fs_rename(&prefs, "/nvs/key", "/nvs/other"));
    assert!(!fs_exists(&prefs, "/nvs/key"));
    assert!(fs_exists(&prefs, "/nvs/other"));
    assert!(fs_unlink(&prefs, "/nvs/other"));
    assert!(fs_clean_dir(&prefs, "/nvs"));
    assert!(!fs_exists(&prefs, "/nvs"));
}

#[test]
fn failures_map_to_sentinels() {
    let (prefs, _fs) = mem_prefs();
    let mut buf = [0u8; 8];

    assert_eq!(fs_read(&prefs, "/missing", &mut buf), -1);
    assert_eq!(fs_get_size(&prefs, "/missing"), -1);
    assert!(!fs_exists(&prefs, "/missing"));
    assert!(!fs_verify(&prefs, "/missing", b"x"));
    assert!(!fs_unlink(&prefs, "/missing"));
    assert!(!fs_rename(&prefs, "/missing", "/other"));
    assert!(!fs_clean_dir(&prefs, "/missing"));
    assert_eq!(fs_create(&prefs, "/no-dir/key", b"x"), -1);

    let bad = [WANT_ERROR as u8];
    assert_eq!(fs_update(&prefs, "/key", &bad), -1);
}

#[test]
fn verify_over_limit_is_false() {
    let (prefs, _fs) = mem_prefs();
    let data = vec![3u8; 1500];

    assert_eq!(fs_create(&prefs, "/big", &data), 1500);
    assert!(!fs_verify(&prefs, "/big", &data));
}

#[test]
fn unmounted_returns_sentinels() {
    let prefs: PrefsFs<MemFs> = PrefsFs::new(Mount::unmounted());
    let mut buf = [0u8; 8];

    assert!(fs_init(&prefs));
    assert!(!fs_mkdir(&prefs, "/nvs"));
    assert!(!fs_verify(&prefs, "/k", b"v"));
    assert_eq!(fs_create(&prefs, "/k", b"v"), -1);
    assert_eq!(fs_update(&prefs, "/k", b"v"), -1);
    assert_eq!(fs_read(&prefs, "/k", &mut buf), -1);
    assert_eq!(fs_get_size(&prefs, "/k"), -1);
    assert!(!fs_exists(&prefs, "/k"));
    assert!(!fs_rename(&prefs, "/k", "/j"));
    assert!(!fs_unlink(&prefs, "/k"));
    assert!(!fs_clean_dir(&prefs, "/nvs"));
}

#[test]
fn works_through_trait_object() {
    let (prefs, _fs) = mem_prefs();
    let storage: &dyn PrefsStorage = &prefs;

    assert_eq!(fs_create(storage, "/key", b"abc"), 3);
    assert!(fs_verify(storage, "/key", b"abc"));
}
