#[macro_use]
extern crate hamcrest;

use embedded_io::{ErrorKind, Read, Seek, SeekFrom, Write};
use fs_runtime::{DirEntry, FileHandle, FileSystem, OpenMode, StdFs};
use hamcrest::prelude::*;

fn new_fs() -> (tempfile::TempDir, StdFs) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let fs = StdFs::new(dir.path());
    (dir, fs)
}

#[test]
fn write_then_read() {
    let (_dir, fs) = new_fs();

    let mut file = fs.open("/key", OpenMode::WriteTruncate).unwrap();
    assert_eq!(file.write(b"hello").unwrap(), 5);
    drop(file);

    let mut file = fs.open("/key", OpenMode::Read).unwrap();
    assert_eq!(file.size(), 5);
    let mut buf = [0u8; 16];
    let n = file.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"hello");
}

#[test]
fn open_missing_file_fails() {
    let (_dir, fs) = new_fs();

    assert_eq!(fs.open("/nope", OpenMode::Read).err(), Some(ErrorKind::NotFound));
    assert_eq!(
        fs.open("/nope", OpenMode::ReadWrite).err(),
        Some(ErrorKind::NotFound)
    );
    assert_eq!(
        fs.open("/no-dir/key", OpenMode::WriteTruncate).err(),
        Some(ErrorKind::NotFound)
    );
}

#[test]
fn read_write_keeps_content_and_seeks() {
    let (dir, fs) = new_fs();

    let mut file = fs.open("/key", OpenMode::WriteTruncate).unwrap();
    file.write(b"abcdef").unwrap();
    drop(file);

    let mut file = fs.open("/key", OpenMode::ReadWrite).unwrap();
    assert_eq!(file.size(), 6);
    file.seek(SeekFrom::Start(2)).unwrap();
    file.write(b"XY").unwrap();
    drop(file);

    let content = std::fs::read(dir.path().join("key")).unwrap();
    assert_eq!(content, b"abXYef");
}

#[test]
fn mkdir_exists_and_list() {
    let (_dir, fs) = new_fs();

    assert!(!fs.exists("/nvs"));
    fs.mkdir("/nvs").unwrap();
    assert!(fs.exists("/nvs"));
    assert_eq!(fs.mkdir("/nvs"), Err(ErrorKind::AlreadyExists));

    fs.mkdir("/nvs/sub").unwrap();
    fs.open("/nvs/b", OpenMode::WriteTruncate).unwrap();
    fs.open("/nvs/a", OpenMode::WriteTruncate).unwrap();

    let entries = fs.list_dir("/nvs").unwrap();
    assert_that!(
        entries,
        equal_to(vec![
            DirEntry {
                path: "/nvs/a".to_string(),
                is_dir: false
            },
            DirEntry {
                path: "/nvs/b".to_string(),
                is_dir: false
            },
            DirEntry {
                path: "/nvs/sub".to_string(),
                is_dir: true
            },
        ])
    );
}

#[test]
fn rename_and_remove() {
    let (_dir, fs) = new_fs();

    fs.open("/old", OpenMode::WriteTruncate).unwrap();
    fs.rename("/old", "/new").unwrap();
    assert!(!fs.exists("/old"));
    assert!(fs.exists("/new"));

    fs.remove("/new").unwrap();
    assert!(!fs.exists("/new"));
    assert_eq!(fs.remove("/new"), Err(ErrorKind::NotFound));
}

#[test]
fn remove_non_empty_directory_fails() {
    let (_dir, fs) = new_fs();

    fs.mkdir("/nvs").unwrap();
    fs.open("/nvs/key", OpenMode::WriteTruncate).unwrap();

    assert!(fs.remove("/nvs").is_err());
    assert!(fs.exists("/nvs/key"));
}

#[test]
fn open_directory_is_invalid() {
    let (_dir, fs) = new_fs();

    fs.mkdir("/nvs").unwrap();
    assert_eq!(
        fs.open("/nvs", OpenMode::Read).err(),
        Some(ErrorKind::InvalidInput)
    );
}
