#![no_main]

use libfuzzer_sys::fuzz_target;
use rollchunk::{ChunkConfig, RollingChecksum, scanner};

fuzz_target!(|data: Vec<u8>| {
    let configs = [
        // Dense boundaries
        ChunkConfig::new(4, 64).unwrap().with_window_size(8).with_split_bits(3),
        // Medium chunks
        ChunkConfig::new(64, 1024).unwrap().with_window_size(32).with_split_bits(8),
        // min_size == max_size
        ChunkConfig::new(128, 128).unwrap().with_window_size(16).with_split_bits(5),
        // Default config
        ChunkConfig::default(),
    ];

    for config in configs {
        let records = scanner::scan(&data, config).unwrap();
        let min = config.min_size() as u64;
        let max = config.max_size() as u64;

        // Verify: records tile the input
        let mut expected_start = 0u64;
        for record in &records {
            assert_eq!(record.start, expected_start);
            assert!(record.length > 0);
            expected_start = record.end();
        }
        assert_eq!(expected_start, data.len() as u64);

        // Verify: size policy on every record but the last
        if let Some((last, body)) = records.split_last() {
            for record in body {
                assert!(record.length <= max);
                assert!(record.length > min || record.length == max);
            }
            assert!(last.length < max + min || last.length == max);
        }

        // Verify: determinism
        assert_eq!(records, scanner::scan(&data, config).unwrap());
    }

    // Verify: until the first real byte leaves the window, the rolling state
    // equals the direct computation over the zero-padded window
    let config = ChunkConfig::default().with_window_size(16);
    let head = &data[..data.len().min(16)];
    let mut sum = RollingChecksum::new(&config).unwrap();
    for &byte in head {
        sum.push(byte);
    }
    let mut window = vec![0u8; 16 - head.len()];
    window.extend_from_slice(head);
    assert_eq!(sum.sums(), RollingChecksum::direct_sums(&window, config.char_offset()));
});
