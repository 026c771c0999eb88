//! Order-preservation properties of the writer/reader pair
//!
//! For any sequence of chunk submissions, reading the database back must
//! yield every stream's chunks in submission order, regardless of how streams
//! were interleaved during population.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tempfile::TempDir;

use corpusdb::{Corpus, CorpusWriter};

fn write_corpus(path: &std::path::Path, chunks: &[(u64, Vec<u8>)]) {
    let mut writer = CorpusWriter::create(path).unwrap();
    for (stream_id, payload) in chunks {
        writer.add_chunk(*stream_id, payload).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_single_chunk_streams_read_back_as_blocks() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("corpus.db");
    // Block-mode usage: every chunk its own stream
    write_corpus(
        &path,
        &[(0, b"one".to_vec()), (1, b"two".to_vec()), (2, b"three".to_vec())],
    );

    let mut corpus = Corpus::open(&path).unwrap();
    let blocks = corpus.blocks().unwrap();
    assert_eq!(blocks.len(), 3);
    assert!(blocks.iter().all(|b| b.stream_index == 0));
    assert_eq!(corpus.stream_count(), 3);
}

#[test]
fn test_sparse_stream_ids_are_preserved() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("corpus.db");
    write_corpus(
        &path,
        &[(1000, b"a".to_vec()), (5, b"b".to_vec()), (1000, b"c".to_vec())],
    );

    let corpus = Corpus::open(&path).unwrap();
    assert_eq!(corpus.stream_ids(), &[1000, 5]);
}

proptest! {
    #[test]
    fn prop_streams_read_back_in_submission_order(
        chunks in proptest::collection::vec(
            (0u64..6, proptest::collection::vec(any::<u8>(), 0..64)),
            1..50,
        )
    ) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("corpus.db");
        write_corpus(&path, &chunks);

        let mut expected: BTreeMap<u64, Vec<Vec<u8>>> = BTreeMap::new();
        let mut expected_order = Vec::new();
        for (stream_id, payload) in &chunks {
            if !expected.contains_key(stream_id) {
                expected_order.push(*stream_id);
            }
            expected.entry(*stream_id).or_default().push(payload.clone());
        }

        let mut corpus = Corpus::open(&path).unwrap();
        prop_assert_eq!(corpus.chunk_count(), chunks.len() as u64);

        let streams = corpus.streams().unwrap();
        let ids: Vec<u64> = streams.iter().map(|s| s.id).collect();
        prop_assert_eq!(ids, expected_order);
        for stream in &streams {
            prop_assert_eq!(&stream.chunks, &expected[&stream.id]);
        }
    }

    #[test]
    fn prop_blocks_assign_contiguous_stream_positions(
        chunks in proptest::collection::vec(
            (0u64..4, proptest::collection::vec(any::<u8>(), 0..32)),
            1..40,
        )
    ) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("corpus.db");
        write_corpus(&path, &chunks);

        let mut corpus = Corpus::open(&path).unwrap();
        let blocks = corpus.blocks().unwrap();

        let mut next: BTreeMap<u64, u64> = BTreeMap::new();
        for (i, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.id, i as u64);
            let pos = next.entry(block.stream_id).or_insert(0);
            prop_assert_eq!(block.stream_index, *pos);
            *pos += 1;
        }
    }
}
