use criterion::{Criterion, criterion_group, criterion_main};
use huffdec::decoder::decode;
use huffdec::model::PrefixTree;
use huffdec::model::tree_builder::build;
use huffdec::parser::{BufferedByteSource, ByteParser};
use std::hint::black_box;
use std::io;

const NUM_SYMBOLS: usize = 256;
const NUM_TOKENS: usize = 200_000;
const LINE_WIDTH: usize = 80;

/// Balanced table of fixed-length codes.
fn balanced_table() -> Vec<(String, String)> {
    let bits = NUM_SYMBOLS.trailing_zeros() as usize;
    (0..NUM_SYMBOLS)
        .map(|i| (format!("tok{i}"), format!("{i:0bits$b}")))
        .collect()
}

/// Skewed table: codes 1, 01, 001, ..., like a very uneven frequency distribution.
fn skewed_table() -> Vec<(String, String)> {
    (0..NUM_SYMBOLS)
        .map(|i| {
            let code = if i + 1 < NUM_SYMBOLS {
                format!("{}1", "0".repeat(i))
            } else {
                "0".repeat(i)
            };
            (format!("tok{i}"), code)
        })
        .collect()
}

/// Encodes a pseudo-random token sequence, wrapped at `LINE_WIDTH`.
fn encode(table: &[(String, String)]) -> Vec<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut bits = Vec::new();
    let mut column = 0;
    for _ in 0..NUM_TOKENS {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        // Favor short codes so the skewed stream stays reasonable in size
        let index = (state % 16) as usize % table.len();
        for &b in table[index].1.as_bytes() {
            bits.push(b);
            column += 1;
            if column == LINE_WIDTH {
                bits.push(b'\n');
                column = 0;
            }
        }
    }
    bits
}

fn decode_in_memory(tree: &PrefixTree, bits: &[u8]) -> usize {
    decode(tree, ByteParser::for_bytes(bits), io::sink()).unwrap()
}

fn decode_buffered(tree: &PrefixTree, bits: &[u8]) -> usize {
    let source = BufferedByteSource::from_reader(bits);
    decode(tree, ByteParser::new(source), io::sink()).unwrap()
}

fn tree_building(c: &mut Criterion) {
    let balanced = balanced_table();
    let skewed = skewed_table();
    c.bench_function("build_balanced", |b| {
        b.iter(|| build(black_box(&balanced).iter().map(|(t, c)| (t, c))).unwrap())
    });
    c.bench_function("build_skewed", |b| {
        b.iter(|| build(black_box(&skewed).iter().map(|(t, c)| (t, c))).unwrap())
    });
}

fn stream_decoding(c: &mut Criterion) {
    for (name, table) in [("balanced", balanced_table()), ("skewed", skewed_table())] {
        let tree = build(table.iter().map(|(t, c)| (t, c))).unwrap();
        let bits = encode(&table);
        c.bench_function(&format!("decode_in_memory_{name}"), |b| {
            b.iter(|| decode_in_memory(&tree, black_box(&bits)))
        });
        c.bench_function(&format!("decode_buffered_{name}"), |b| {
            b.iter(|| decode_buffered(&tree, black_box(&bits)))
        });
    }
}

criterion_group!(building, tree_building);
criterion_group! {
    name = decoding;
    config = Criterion::default().sample_size(20);
    targets = stream_decoding
}
criterion_main!(building, decoding);
