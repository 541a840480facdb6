// Integration tests for sources and manifests
// Tests cover: file mapping, digest correctness, manifest text format

use std::io::Write;

use rollchunk::manifest::{self, ManifestEntry};
use rollchunk::{ChunkConfig, ChunkError, ChunkHasher, ChunkRecord, HashAlgorithm, Source};

const SHA1_OF_1MIB_ZEROS: &str = "3b71f43ff30f4b15b5cd85dd9e95ebc7e84eb5a3";

fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn small_config() -> ChunkConfig {
    ChunkConfig::new(16, 128)
        .unwrap()
        .with_window_size(16)
        .with_split_bits(5)
}

fn sample(len: usize) -> Vec<u8> {
    xorshift_bytes(0x0BAD_F00D, len)
}

fn xorshift_bytes(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

// ============================================================================
// Reference Manifests
// ============================================================================

#[test]
fn test_two_mib_of_zeros_manifest() {
    let file = temp_file(&vec![0u8; 2 * 1024 * 1024]);
    let source = Source::open(file.path()).unwrap();

    let mut out = Vec::new();
    let count = manifest::write_manifest(&source, ChunkConfig::default(), &mut out).unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "0\t1048576\t{digest}\n1048576\t1048576\t{digest}\n",
            digest = SHA1_OF_1MIB_ZEROS
        )
    );
}

/// Reference manifest for `xorshift_bytes(0x2545_F491, 2 MiB)`.
const XORSHIFT_2MIB_MANIFEST: [&str; 11] = [
    "0\t157479\t73ee277705eb62f1bfff778d953957c3604d7512\n",
    "157479\t410943\t52efe4ce03d270ca6b6eb2dc86e0164818dabc42\n",
    "568422\t151157\t0bec00d641e59b2bc894616741d57bb45651c992\n",
    "719579\t88237\t3add2e168849479c4730160dcaa15859f543fa73\n",
    "807816\t127261\te49f433af621350981ce12444dff5a1b3d0995d3\n",
    "935077\t71188\tce92791b2a68d5e0a95086a1fe8fd80a1c1e470a\n",
    "1006265\t267861\td60f861c0c0f7f4e4bc93208bd0386b3ff900fd7\n",
    "1274126\t192694\tc6a5670f2ee67f2c128f6fe7cd3dd950195c4bda\n",
    "1466820\t153797\tb36f23052271294e14f4313cb307d0fabab676c5\n",
    "1620617\t365695\tea18bab518c63e630892f3f84ebf0f6b484d1b35\n",
    "1986312\t110840\ta6913462ef8831de3654e9e9483838844e24a82f\n",
];

#[test]
fn test_xorshift_manifest_matches_reference() {
    let file = temp_file(&xorshift_bytes(0x2545_F491, 2 * 1024 * 1024));
    let source = Source::open(file.path()).unwrap();

    let mut out = Vec::new();
    let count = manifest::write_manifest(&source, ChunkConfig::default(), &mut out).unwrap();

    assert_eq!(count, XORSHIFT_2MIB_MANIFEST.len());
    assert_eq!(String::from_utf8(out).unwrap(), XORSHIFT_2MIB_MANIFEST.concat());
}

#[test]
fn test_small_file_is_one_line() {
    let file = temp_file(b"hello world");
    let source = Source::open(file.path()).unwrap();

    let entries = manifest::build(&source, ChunkConfig::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].to_string(),
        "0\t11\t2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
    );
}

#[test]
fn test_empty_file_has_empty_manifest() {
    let file = temp_file(b"");
    let source = Source::open(file.path()).unwrap();

    let mut out = Vec::new();
    assert_eq!(
        manifest::write_manifest(&source, ChunkConfig::default(), &mut out).unwrap(),
        0
    );
    assert!(out.is_empty());
}

// ============================================================================
// Digest Correctness
// ============================================================================

#[test]
fn test_every_digest_matches_its_range() {
    let data = sample(50_000);
    let file = temp_file(&data);
    let source = Source::open(file.path()).unwrap();

    let entries = manifest::build(&source, small_config()).unwrap();
    assert!(entries.len() > 100);

    let mut next = 0u64;
    for entry in &entries {
        assert_eq!(entry.record.start, next);
        next = entry.record.end();

        let range = entry.record.start as usize..entry.record.end() as usize;
        assert_eq!(
            entry.digest,
            ChunkHasher::digest(HashAlgorithm::Sha1, &data[range])
        );
    }
    assert_eq!(next, data.len() as u64);
}

#[test]
fn test_mapped_and_memory_sources_agree() {
    let data = sample(20_000);
    let file = temp_file(&data);

    let mapped = manifest::build(&Source::open(file.path()).unwrap(), small_config()).unwrap();
    let memory = manifest::build(&Source::from_bytes(data), small_config()).unwrap();
    assert_eq!(mapped, memory);
}

#[test]
fn test_digest_record_rejects_foreign_record() {
    let source = Source::from_bytes(vec![1u8; 10]);
    let err = manifest::digest_record(&source, &ChunkRecord::new(8, 4), HashAlgorithm::Sha1);
    assert!(matches!(err, Err(ChunkError::RecordOutOfBounds { .. })));
}

// ============================================================================
// Text Format
// ============================================================================

#[test]
fn test_manifest_lines_parse_back() {
    let data = sample(10_000);
    let mut out = Vec::new();
    manifest::write_manifest(&data, small_config(), &mut out).unwrap();

    let text = String::from_utf8(out.clone()).unwrap();
    assert!(text.ends_with('\n'));
    for line in text.lines() {
        let fields: Vec<_> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2].len(), 40);
        assert!(fields[2].bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    let parsed = manifest::read_manifest(&out[..]).unwrap();
    assert_eq!(parsed, manifest::build(&data, small_config()).unwrap());
}

#[test]
fn test_read_manifest_reports_bad_line() {
    let text = "0\t5\t2aae6c35c94fcfb415dbe95f408b9ce91ee846ed\n5\tfive\tdeadbeef\n";
    let err = manifest::read_manifest(text.as_bytes()).unwrap_err();
    assert!(matches!(err, ChunkError::Parse { .. }));
    assert!(err.to_string().contains("five"));
}

#[test]
fn test_entry_from_str() {
    let entry: ManifestEntry = "7\t3\t2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        .parse()
        .unwrap();
    assert_eq!(entry.record, ChunkRecord::new(7, 3));
    assert_eq!(entry.digest.algorithm(), HashAlgorithm::Sha1);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_manifest_matches_sequential() {
    let data = sample(200_000);
    assert_eq!(
        manifest::build_parallel(&data, small_config()).unwrap(),
        manifest::build(&data, small_config()).unwrap()
    );
}
