#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rollchunk::{ChunkConfig, Chunker, chunker};

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (segment, data) = input;
    let segment = usize::from(segment % 512) + 1;

    let config = ChunkConfig::new(16, 256)
        .unwrap()
        .with_window_size(16)
        .with_split_bits(5);

    let expected = chunker::chunk_bytes(data.clone(), config).unwrap();

    // Verify: segmented pushes give the same chunks, data and hashes
    let mut chunker = Chunker::new(config, data.len() as u64).unwrap();
    let mut chunks = Vec::new();
    for part in data.chunks(segment) {
        chunks.extend(chunker.push(Bytes::copy_from_slice(part)));
    }
    chunks.extend(chunker.finish());
    assert_eq!(chunks, expected);

    // Verify: chunk data is the input, in order
    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
    assert_eq!(joined, data);

    // Verify: hashing is on by default
    assert!(chunks.iter().all(|c| c.hash.is_some()));
});
