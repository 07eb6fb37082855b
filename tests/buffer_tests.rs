use colcrack::buffers::{BufferFilter, BufferRegistry, WriteMode, DEFAULT_BUFFER_SIZE};
use colcrack::error::CrackError;
use rstest::rstest;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }
}

#[test]
fn test_load_then_save_preserves_text() {
    let ctx = TestContext::new();
    let source = ctx.write("plain.txt", b"Attack at dawn\nRetreat at dusk\n");
    let target = ctx.dir.path().join("copy.txt");

    let mut registry = BufferRegistry::with_buffers(2).unwrap();
    let loaded = registry.load_file(0, &source).unwrap();
    assert_eq!(loaded, 31);

    registry.save_file(0, &target, WriteMode::Create).unwrap();
    assert_eq!(fs::read(&target).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn test_write_modes() {
    let ctx = TestContext::new();
    let target = ctx.write("out.txt", b"old");

    let mut registry = BufferRegistry::with_buffers(1).unwrap();
    registry.set(0, b"new").unwrap();

    let err = registry.save_file(0, &target, WriteMode::Create).unwrap_err();
    assert!(matches!(err, CrackError::Io(_)));
    assert_eq!(fs::read(&target).unwrap(), b"old");

    registry.save_file(0, &target, WriteMode::Append).unwrap();
    assert_eq!(fs::read(&target).unwrap(), b"oldnew");

    registry.save_file(0, &target, WriteMode::Overwrite).unwrap();
    assert_eq!(fs::read(&target).unwrap(), b"new");
}

#[test]
fn test_non_ascii_file_leaves_buffer_empty() {
    let ctx = TestContext::new();
    let source = ctx.write("latin1.txt", b"caf\xe9");

    let mut registry = BufferRegistry::with_buffers(1).unwrap();
    registry.set(0, b"previous").unwrap();
    let err = registry.load_file(0, &source).unwrap_err();

    assert!(matches!(err, CrackError::Buffer(_)));
    assert!(registry.get(0).unwrap().is_empty());
    assert_eq!(registry.get(0).unwrap().capacity(), DEFAULT_BUFFER_SIZE);
}

#[test]
fn test_directories_and_missing_files_are_rejected() {
    let ctx = TestContext::new();
    let mut registry = BufferRegistry::with_buffers(1).unwrap();

    assert!(matches!(
        registry.load_file(0, ctx.dir.path()),
        Err(CrackError::Buffer(_))
    ));
    assert!(matches!(
        registry.load_file(0, ctx.dir.path().join("missing.txt")),
        Err(CrackError::Io(_))
    ));
}

#[test]
fn test_large_file_grows_buffer() {
    let ctx = TestContext::new();
    let text = vec![b'x'; DEFAULT_BUFFER_SIZE * 2];
    let source = ctx.write("big.txt", &text);

    let mut registry = BufferRegistry::with_buffers(1).unwrap();
    registry.load_file(0, &source).unwrap();
    let buffer = registry.get(0).unwrap();
    assert_eq!(buffer.len(), text.len());
    assert!(buffer.capacity() >= text.len());
}

#[rstest]
#[case(BufferFilter::Alpha, "Hello, World 42!\n", "HelloWorld")]
#[case(BufferFilter::Alphanum, "Hello, World 42!\n", "HelloWorld42")]
#[case(BufferFilter::Lalpha, "Hello, World 42!\n", "helloworld")]
#[case(BufferFilter::Ualpha, "Hello, World 42!\n", "HELLOWORLD")]
#[case(BufferFilter::Flipcase, "Hello, World 42!\n", "hELLOwORLD")]
#[case(BufferFilter::Num, "Hello, World 42!\n", "42")]
#[case(BufferFilter::Esp, "Hello, World 42!\n", "Hello,World42!")]
#[case(BufferFilter::Enl, "Hello,\r\nWorld\n", "Hello,World")]
#[case(BufferFilter::None, "Hello,\r\nWorld\n", "Hello,\r\nWorld\n")]
fn test_filters(#[case] filter: BufferFilter, #[case] input: &str, #[case] expected: &str) {
    let mut registry = BufferRegistry::with_buffers(1).unwrap();
    registry.set(0, input.as_bytes()).unwrap();
    registry.filter(0, filter).unwrap();
    assert_eq!(registry.get(0).unwrap().as_bytes(), expected.as_bytes());
}

#[test]
fn test_pair_mut_sizes_output_and_rejects_aliasing() {
    let mut registry = BufferRegistry::with_buffers(3).unwrap();
    registry.set(2, b"ciphertext").unwrap();

    {
        let (input, output) = registry.pair_mut(2, 0).unwrap();
        assert_eq!(input, b"ciphertext");
        assert_eq!(output.len(), input.len());
        output.copy_from_slice(input);
    }
    assert_eq!(registry.get(0).unwrap().as_bytes(), b"ciphertext");

    assert!(matches!(registry.pair_mut(1, 1), Err(CrackError::Buffer(_))));
    assert!(registry.pair_mut(0, 7).is_err());
}

#[test]
fn test_create_grows_and_shrinks() {
    let mut registry = BufferRegistry::new();
    assert_eq!(registry.count(), 0);
    registry.create(4).unwrap();
    assert_eq!(registry.count(), 4);
    registry.set(3, b"gone").unwrap();
    registry.create(2).unwrap();
    assert_eq!(registry.count(), 2);
    assert!(registry.get(3).is_err());

    registry.set(1, b"abc").unwrap();
    registry.copy(1, 0).unwrap();
    assert_eq!(registry.get(0).unwrap().as_bytes(), b"abc");
    registry.clear(1).unwrap();
    assert!(registry.get(1).unwrap().is_empty());
}

#[test]
fn test_file_locks_are_released() {
    let ctx = TestContext::new();
    let source = ctx.write("shared.txt", b"read me");
    let target = ctx.dir.path().join("written.txt");

    // A concurrent reader holding a shared lock does not stop a load.
    let reader = File::open(&source).unwrap();
    reader.lock_shared().unwrap();
    let mut registry = BufferRegistry::with_buffers(1).unwrap();
    registry.load_file(0, &source).unwrap();
    reader.unlock().unwrap();

    registry.save_file(0, &target, WriteMode::Overwrite).unwrap();
    for path in [&source, &target] {
        let handle = File::open(path).unwrap();
        assert!(handle.try_lock().is_ok(), "{} still locked", path.display());
    }
    assert_eq!(fs::read(&target).unwrap(), b"read me");
}
